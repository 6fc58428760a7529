//! Semantic analysis module
//!
//! Two traversals over the same tree: the declaration pass builds the scope
//! tree, the type-checking pass re-enters it and types every expression.

mod analyzer;
mod check;
mod cursor;
mod declare;
pub mod report;
mod symtab;
mod walk;

pub use analyzer::{AnalysisResult, AnalyzerConfig, SemanticAnalyzer};
pub use check::type_check;
pub use cursor::{block_scope_name, ScopeEvent};
pub use declare::{build_symbol_table, PassOutcome};
pub use symtab::{Scope, ScopeId, Signature, Symbol, SymbolId, SymbolTable, GLOBAL_SCOPE};
pub use walk::{walk_expr, walk_program, walk_stmt, Visitor};
