//! Wren Lexer — tokenizes Wren source code.
//!
//! Converts source text into a stream of tokens, handling:
//! - Keywords, identifiers, fields, literals
//! - Maximal-munch punctuation (including `->`)
//! - String interpolation with arbitrary nesting
//! - Raw strings, attributes, BOM and shebang lines
//! - Significant newlines (every line feed is a token)
//! - Comments (line and nested block)

pub mod scanner;
pub mod source;
pub mod token;


pub use scanner::Scanner;
pub use source::SourceBuffer;
pub use token::{Token, TokenKind};
