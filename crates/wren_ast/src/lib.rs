//! Wren AST — Abstract Syntax Tree node definitions.
//!
//! This crate defines every node the parser produces. It contains
//! NO logic beyond span bookkeeping — purely data structures.
//! Nodes keep the tokens they were parsed from, so every node can
//! report a byte span into the source.

pub mod expr;
pub mod stmt;
pub mod visitor;

pub use expr::*;
pub use stmt::*;
pub use visitor::{walk_body, walk_expr, walk_method, walk_module, walk_stmt, Visitor};
