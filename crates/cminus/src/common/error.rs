//! Error types and diagnostic reporting

use std::io::Write;

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::{Files, SimpleFiles};
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use thiserror::Error;

use crate::ast::Type;

/// One kind of semantic rule violation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemanticErrorKind {
    #[error("redefined variable '{0}'")]
    RedefinedVariable(String),

    #[error("redefined function '{0}'")]
    RedefinedFunction(String),

    #[error("undefined identifier '{0}'")]
    UndefinedIdentifier(String),

    #[error("invalid type '{ty}' for {what} '{name}'")]
    InvalidDeclaredType {
        what: &'static str,
        name: String,
        ty: Type,
    },

    #[error("invalid type '{0}' for condition")]
    InvalidCondition(Type),

    #[error("not allowed operation between '{left}' and '{right}'")]
    OperandMismatch { left: Type, right: Type },

    #[error("lvalue required as left operand of assignment")]
    LvalueRequired,

    #[error("type mismatch between left and right operand of assignment")]
    AssignmentMismatch,

    #[error("array index must be integer")]
    ArrayIndexType,

    #[error("array index is not allowed for non-array variable")]
    IndexOnNonArray,

    #[error("called object '{0}' is not a function")]
    NotAFunction(String),

    #[error("too few arguments for function '{0}'")]
    TooFewArguments(String),

    #[error("too many arguments to function '{0}'")]
    TooManyArguments(String),

    #[error("type mismatch between parameter '{param}' and argument {position}")]
    ArgumentMismatch { param: String, position: usize },

    #[error("return with a value, in function returning void")]
    ReturnValueInVoid,

    #[error("return with no value, in function returning non-void")]
    ReturnMissingValue,

    #[error("return type mismatch, expected '{0}'")]
    ReturnTypeMismatch(Type),
}

/// A semantic error anchored at a source line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Semantic Error: {kind} at line {line}")]
pub struct SemanticError {
    pub kind: SemanticErrorKind,
    pub line: u32,
}

impl SemanticError {
    pub fn new(kind: SemanticErrorKind, line: u32) -> Self {
        Self { kind, line }
    }
}

/// Error surfaced to callers that want a `Result` out of analysis
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("semantic analysis failed with {count} error(s)")]
    Semantic { count: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CompileResult<T> = Result<T, CompileError>;

/// Append-only destination for semantic diagnostics
pub trait DiagnosticSink {
    fn report(&mut self, error: SemanticError);

    /// Free-form listing text such as the trace-mode symbol table reports.
    /// Sinks without a text stream drop it.
    fn listing(&mut self, _text: &str) {}
}

impl DiagnosticSink for Vec<SemanticError> {
    fn report(&mut self, error: SemanticError) {
        self.push(error);
    }
}

/// Writes one `Semantic Error: ... at line N` line per diagnostic
pub struct Listing<W: Write> {
    out: W,
}

impl<W: Write> Listing<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DiagnosticSink for Listing<W> {
    fn report(&mut self, error: SemanticError) {
        // A broken listing stream must not stop analysis.
        let _ = writeln!(self.out, "{error}");
    }

    fn listing(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }
}

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    /// Build the codespan diagnostic for `error`, labelling its whole source line.
    ///
    /// Builtins are declared at line 0 and get no label.
    pub fn diagnostic(&self, file_id: usize, error: &SemanticError) -> Diagnostic<usize> {
        let diagnostic = Diagnostic::error().with_message("Semantic error");
        let label = error
            .line
            .checked_sub(1)
            .and_then(|index| self.files.line_range(file_id, index as usize).ok())
            .map(|range| Label::primary(file_id, range).with_message(error.kind.to_string()));

        match label {
            Some(label) => diagnostic.with_labels(vec![label]),
            None => diagnostic.with_notes(vec![error.kind.to_string()]),
        }
    }

    pub fn report_error(&self, file_id: usize, error: &SemanticError) {
        let diagnostic = self.diagnostic(file_id, error);
        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, &diagnostic);
    }

    /// Write plain text to the same stream as the diagnostics
    pub fn write_text(&self, text: &str) {
        let _ = writeln!(self.writer.lock(), "{text}");
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Sink that renders every diagnostic against one registered source file
pub struct ReporterSink<'a> {
    reporter: &'a DiagnosticReporter,
    file_id: usize,
}

impl<'a> ReporterSink<'a> {
    pub fn new(reporter: &'a DiagnosticReporter, file_id: usize) -> Self {
        Self { reporter, file_id }
    }
}

impl DiagnosticSink for ReporterSink<'_> {
    fn report(&mut self, error: SemanticError) {
        self.reporter.report_error(self.file_id, &error);
    }

    fn listing(&mut self, text: &str) {
        self.reporter.write_text(text);
    }
}
