//! C-Minus semantic analysis
//!
//! Takes an already-parsed C-Minus program and runs the two analysis passes:
//!
//! - **Declaration pass**: builds the scope-tree symbol table (global scope,
//!   one scope per function, one per nested block) and records every use of
//!   every name.
//! - **Type-checking pass**: re-enters the same scopes, assigns a type to every
//!   expression and reports each violated rule.
//!
//! Errors never abort analysis; they go to a [`DiagnosticSink`] and the
//! returned [`AnalysisResult`] says whether any occurred.

pub mod common;
pub mod ast;
pub mod sema;

// Re-exports for convenience
pub use common::{CompileError, CompileResult, DiagnosticReporter, DiagnosticSink, SemanticError, SemanticErrorKind};
pub use ast::{Program, Type};
pub use sema::{AnalysisResult, AnalyzerConfig, SemanticAnalyzer, SymbolTable};
