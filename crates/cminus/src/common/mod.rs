//! Common infrastructure shared by the analysis passes

mod error;
mod intern;

pub use error::{
    CompileError, CompileResult, DiagnosticReporter, DiagnosticSink, Listing, ReporterSink,
    SemanticError, SemanticErrorKind,
};
pub use intern::{Name, NameTable};
