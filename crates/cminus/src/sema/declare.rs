//! Declaration pass: builds the scope tree and inserts every declared name

use log::debug;

use crate::ast::*;
use crate::common::{DiagnosticSink, SemanticError, SemanticErrorKind};
use super::cursor::{block_scope_name, ScopeCursor, ScopeEvent};
use super::symtab::{Signature, SymbolId, SymbolTable};
use super::walk::{walk_program, Visitor};

/// What one pass produced besides its diagnostics
#[derive(Debug, Clone, Default)]
pub struct PassOutcome {
    pub error_count: usize,
    pub events: Vec<ScopeEvent>,
}

struct DeclarationPass<'a> {
    table: &'a mut SymbolTable,
    sink: &'a mut dyn DiagnosticSink,
    cursor: ScopeCursor,
    error_count: usize,
}

impl DeclarationPass<'_> {
    fn error(&mut self, kind: SemanticErrorKind, line: u32) {
        self.error_count += 1;
        self.sink.report(SemanticError::new(kind, line));
    }

    fn declare_binding(&mut self, decl: &VarDecl, line: u32) {
        let scope = self.cursor.current();
        if self.table.lookup_local(scope, &decl.name).is_some() {
            self.error(SemanticErrorKind::RedefinedVariable(decl.name.clone()), line);
            return;
        }
        self.table.insert(scope, &decl.name, decl.ty, line);
    }

    fn declare_function(&mut self, func: &mut FunDecl, line: u32) {
        let enclosing = self.cursor.current();
        let scope = if self.table.lookup_local(enclosing, &func.name).is_some() {
            self.error(SemanticErrorKind::RedefinedFunction(func.name.clone()), line);
            // Parameters and locals of the duplicate still need a home.
            let name = block_scope_name(&func.name, line);
            self.table.create_scope(name, enclosing)
        } else {
            let symbol = self.table.insert(enclosing, &func.name, Type::Function, line);
            self.table.set_signature(
                symbol,
                Signature {
                    return_type: func.return_type,
                    params: func.signature_params(),
                },
            );
            self.table.create_scope(func.name.as_str(), enclosing)
        };

        func.scope = Some(scope);
        self.cursor.enter_function(self.table, scope);
    }

    fn enter_block(&mut self, block: &mut Compound, line: u32) {
        if self.cursor.take_body_pending() {
            return;
        }
        let enclosing = self.cursor.current();
        let name = block_scope_name(&self.table.scope(enclosing).name, line);
        let scope = self.table.create_scope(name, enclosing);
        block.scope = Some(scope);
        self.cursor.enter(self.table, scope);
    }

    /// Record a use of `name`, returning the symbol it resolves to.
    fn reference(&mut self, name: &str, line: u32) -> Option<SymbolId> {
        let Some(symbol) = self.table.lookup(self.cursor.current(), name) else {
            self.error(SemanticErrorKind::UndefinedIdentifier(name.to_string()), line);
            return None;
        };
        let found = self.table.symbol(symbol);
        let (owner, ty) = (found.scope, found.ty);
        Some(self.table.insert(owner, name, ty, line))
    }
}

impl Visitor for DeclarationPass<'_> {
    fn enter_stmt(&mut self, stmt: &mut Stmt) {
        let line = stmt.line;
        match &mut stmt.kind {
            StmtKind::VarDecl(decl) | StmtKind::Param(decl) => self.declare_binding(decl, line),
            StmtKind::FunDecl(func) => self.declare_function(func, line),
            StmtKind::Compound(block) => self.enter_block(block, line),
            StmtKind::VoidParam
            | StmtKind::Expr(_)
            | StmtKind::If { .. }
            | StmtKind::While { .. }
            | StmtKind::Return(_) => {}
        }
    }

    fn leave_stmt(&mut self, stmt: &mut Stmt) {
        if matches!(stmt.kind, StmtKind::Compound(_)) {
            self.cursor.leave(self.table);
        }
    }

    fn enter_expr(&mut self, expr: &mut Expr) {
        let line = expr.line;
        match &mut expr.kind {
            ExprKind::Var(access) => access.symbol = self.reference(&access.name, line),
            ExprKind::Call(call) => call.symbol = self.reference(&call.name, line),
            ExprKind::Binary { .. } | ExprKind::Const(_) | ExprKind::Assign { .. } => {}
        }
    }
}

/// Run the declaration pass over `program`, filling `table` and annotating
/// the tree with the scopes and symbols it resolved.
pub fn build_symbol_table(
    program: &mut Program,
    table: &mut SymbolTable,
    sink: &mut dyn DiagnosticSink,
) -> PassOutcome {
    debug!("declaration pass: {} top-level declarations", program.declarations.len());

    let mut pass = DeclarationPass {
        cursor: ScopeCursor::new(table.global()),
        table,
        sink,
        error_count: 0,
    };
    walk_program(&mut pass, program);

    debug!(
        "declaration pass done: {} scopes, {} errors",
        pass.table.scope_count(),
        pass.error_count
    );
    PassOutcome {
        error_count: pass.error_count,
        events: pass.cursor.into_events(),
    }
}
