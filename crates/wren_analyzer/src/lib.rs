//! Wren Analyzer — the library facade over the analysis pipeline.
//!
//! `analyze` runs scanner → parser → resolver → type checker on one
//! source text and returns the module AST together with every
//! diagnostic, in pipeline order. The type checker only runs when no
//! stage before it reported an error, because the AST cannot be
//! trusted after a syntax or scoping failure.

use wren_ast::Module;
use wren_lexer::SourceBuffer;
use wren_parser::Parser;

pub use wren_diagnostics::{Diagnostic, Severity, Span};

/// Everything one analysis produces. Diagnostics are ordered:
/// parser first, then resolver, then type checker, each in its own
/// traversal order.
#[derive(Debug)]
pub struct Analysis {
    pub module: Module,
    pub diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.is_error())
    }
}

/// Run the full pipeline on one source text.
pub fn analyze(source_text: &str, path: &str) -> Analysis {
    let buffer = SourceBuffer::new(path, source_text);
    let parsed = Parser::new(&buffer).parse();

    let module = parsed.module;
    let mut diagnostics = parsed.diagnostics;
    diagnostics.extend(wren_resolve::resolve(&module, &buffer));

    // The checker stays silent on untrustworthy ASTs.
    if !diagnostics.iter().any(|d| d.is_error()) {
        diagnostics.extend(wren_types::check(&module));
    }

    Analysis {
        module,
        diagnostics,
    }
}

/// Parse only: the same shape with just parser diagnostics.
pub fn parse_only(source_text: &str, path: &str) -> Analysis {
    let buffer = SourceBuffer::new(path, source_text);
    let parsed = Parser::new(&buffer).parse();
    Analysis {
        module: parsed.module,
        diagnostics: parsed.diagnostics,
    }
}
