//! Wren Name Resolution — scope and declaration analysis.
//!
//! Walks the AST with a scope stack, detecting undefined and
//! duplicate variables. Wren class bodies are not lexical scopes:
//! a marker frame triggers the class-body rule instead, where an
//! unresolved name becomes a forward-reference candidate judged
//! against module scope once the whole module has been seen.

pub mod resolver;
pub mod scope;
mod suggest;


pub use resolver::resolve;
pub use scope::{DeclSite, Frame, ScopeStack, MODULE_BUILTINS};
