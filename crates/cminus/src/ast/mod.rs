//! Abstract Syntax Tree definitions
//!
//! The analyzer consumes trees built elsewhere. Nodes carry a source line,
//! owned children, and slots the passes fill in: expression types and the
//! scope/symbol each node resolved to.

mod types;
mod expr;
mod stmt;

pub use types::*;
pub use expr::*;
pub use stmt::*;

/// A complete C-Minus program: the top-level declaration sequence
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub declarations: Vec<Stmt>,
}

impl Program {
    pub fn new(declarations: Vec<Stmt>) -> Self {
        Self { declarations }
    }
}
