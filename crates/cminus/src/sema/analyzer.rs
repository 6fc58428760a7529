//! Two-pass semantic analyzer driver

use log::debug;

use crate::ast::Program;
use crate::common::{CompileError, CompileResult, DiagnosticSink};
use super::check::type_check;
use super::cursor::ScopeEvent;
use super::declare::build_symbol_table;
use super::report;
use super::symtab::SymbolTable;

/// Configuration options for the analyzer
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    /// Write the symbol table listings to the sink after the declaration pass
    pub trace: bool,
    pub verbose: bool,
}

/// Everything one analysis run leaves behind
#[derive(Debug)]
pub struct AnalysisResult {
    pub table: SymbolTable,
    /// Set when any semantic error was reported. Later phases must not run.
    pub failed: bool,
    pub error_count: usize,
    pub declaration_events: Vec<ScopeEvent>,
    pub check_events: Vec<ScopeEvent>,
}

impl AnalysisResult {
    pub fn into_result(self) -> CompileResult<Self> {
        if self.failed {
            return Err(CompileError::Semantic { count: self.error_count });
        }
        Ok(self)
    }
}

/// Semantic analyzer: symbol table construction followed by type checking
pub struct SemanticAnalyzer {
    config: AnalyzerConfig,
}

impl SemanticAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Analyze a program, reporting every error to `sink`.
    ///
    /// The tree is annotated in place: scopes and resolved symbols by the
    /// first pass, expression types by the second.
    pub fn analyze(&self, program: &mut Program, sink: &mut dyn DiagnosticSink) -> AnalysisResult {
        let mut table = SymbolTable::new();

        if self.config.verbose {
            eprintln!("Building symbol table...");
        }
        let declared = build_symbol_table(program, &mut table, sink);

        if self.config.trace {
            sink.listing(&report::render_all(&table));
        }

        if self.config.verbose {
            eprintln!("Checking types...");
        }
        let checked = type_check(program, &table, sink);

        let error_count = declared.error_count + checked.error_count;
        debug!("semantic analysis finished with {error_count} error(s)");

        AnalysisResult {
            table,
            failed: error_count > 0,
            error_count,
            declaration_events: declared.events,
            check_events: checked.events,
        }
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}
