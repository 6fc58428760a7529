//! Type-checking pass: re-enters the scopes built by the declaration pass and
//! assigns a type to every expression, reporting each rule violation.
//!
//! Once an expression is typed `Error`, the rules that consume it stay quiet
//! so one mistake yields one diagnostic.

use log::debug;

use crate::ast::*;
use crate::common::{DiagnosticSink, SemanticError, SemanticErrorKind};
use super::cursor::{block_scope_name, ScopeCursor};
use super::declare::PassOutcome;
use super::symtab::{ScopeId, SymbolTable};
use super::walk::{walk_program, Visitor};

struct TypeChecker<'a> {
    table: &'a SymbolTable,
    sink: &'a mut dyn DiagnosticSink,
    cursor: ScopeCursor,
    error_count: usize,
}

impl TypeChecker<'_> {
    fn error(&mut self, kind: SemanticErrorKind, line: u32) {
        self.error_count += 1;
        self.sink.report(SemanticError::new(kind, line));
    }

    /// Scope recorded on the node, or the child of the current scope that
    /// carries `name`. Falls back to the current scope so the cursor stays
    /// balanced on trees the declaration pass never saw.
    fn resolve_scope(&self, recorded: Option<ScopeId>, name: &str) -> ScopeId {
        let current = self.cursor.current();
        recorded
            .or_else(|| self.table.find_child_scope(current, name))
            .unwrap_or(current)
    }

    fn check_binding(&mut self, decl: &VarDecl, what: &'static str, line: u32) {
        if !decl.ty.is_bindable() {
            self.error(
                SemanticErrorKind::InvalidDeclaredType {
                    what,
                    name: decl.name.clone(),
                    ty: decl.ty,
                },
                line,
            );
        }
    }

    fn check_condition(&mut self, condition: &Expr) {
        let ty = condition.checked_type();
        if ty != Type::Integer && !ty.is_error() {
            self.error(SemanticErrorKind::InvalidCondition(ty), condition.line);
        }
    }

    fn check_return(&mut self, value: Option<&Expr>, line: u32) {
        let Some(expected) = self
            .table
            .enclosing_signature(self.cursor.current())
            .map(|signature| signature.return_type)
        else {
            return;
        };

        match value {
            Some(value) if expected == Type::Void => {
                self.error(SemanticErrorKind::ReturnValueInVoid, value.line);
            }
            Some(value) => {
                let ty = value.checked_type();
                if ty != expected && !ty.is_error() {
                    self.error(SemanticErrorKind::ReturnTypeMismatch(expected), value.line);
                }
            }
            None if expected != Type::Void => {
                self.error(SemanticErrorKind::ReturnMissingValue, line);
            }
            None => {}
        }
    }

    fn binary_type(&mut self, left: &Expr, right: &Expr, line: u32) -> Type {
        let (left, right) = (left.checked_type(), right.checked_type());
        if left.is_error() || right.is_error() {
            return Type::Error;
        }
        if left != Type::Integer || right != Type::Integer {
            self.error(SemanticErrorKind::OperandMismatch { left, right }, line);
        }
        Type::Integer
    }

    fn assign_type(&mut self, target: &Expr, value: &Expr, line: u32) -> Type {
        let (target_ty, value_ty) = (target.checked_type(), value.checked_type());
        if target_ty.is_error() || value_ty.is_error() {
            return Type::Error;
        }

        let is_variable = matches!(target.kind, ExprKind::Var(_));
        if !is_variable || target_ty == Type::Function || target_ty.is_array() {
            self.error(SemanticErrorKind::LvalueRequired, line);
            return Type::Error;
        }
        if target_ty != value_ty {
            self.error(SemanticErrorKind::AssignmentMismatch, line);
            return Type::Error;
        }
        target_ty
    }

    fn var_type(&mut self, access: &VarAccess, line: u32) -> Type {
        let Some(symbol) = access.symbol else {
            return Type::Error;
        };
        let declared = self.table.symbol(symbol).ty;

        let Some(index) = &access.index else {
            return declared;
        };
        let index_ty = index.checked_type();
        if index_ty.is_error() {
            return Type::Error;
        }

        match declared.element_type() {
            Some(element) if index_ty == Type::Integer => element,
            Some(_) => {
                self.error(SemanticErrorKind::ArrayIndexType, line);
                Type::Error
            }
            None => {
                self.error(SemanticErrorKind::IndexOnNonArray, line);
                Type::Error
            }
        }
    }

    fn call_type(&mut self, call: &Call, line: u32) -> Type {
        let Some(symbol) = call.symbol else {
            return Type::Error;
        };
        let table = self.table;
        let Some(signature) = table.symbol(symbol).signature.as_ref() else {
            self.error(SemanticErrorKind::NotAFunction(call.name.clone()), line);
            return Type::Error;
        };
        let (expected, found) = (signature.params.len(), call.args.len());

        if found < expected {
            self.error(SemanticErrorKind::TooFewArguments(call.name.clone()), line);
        } else if found > expected {
            self.error(SemanticErrorKind::TooManyArguments(call.name.clone()), line);
        } else {
            let mismatch = signature
                .params
                .iter()
                .zip(&call.args)
                .enumerate()
                .find(|(_, ((_, param_ty), arg))| {
                    let arg_ty = arg.checked_type();
                    !arg_ty.is_error() && arg_ty != *param_ty
                })
                .map(|(index, ((param, _), _))| (param.clone(), index + 1));

            if let Some((param, position)) = mismatch {
                self.error(SemanticErrorKind::ArgumentMismatch { param, position }, line);
            }
        }

        signature.return_type
    }
}

impl Visitor for TypeChecker<'_> {
    fn enter_stmt(&mut self, stmt: &mut Stmt) {
        match &stmt.kind {
            StmtKind::FunDecl(func) => {
                let scope = self.resolve_scope(func.scope, &func.name);
                self.cursor.enter_function(self.table, scope);
            }
            StmtKind::Compound(block) => {
                if self.cursor.take_body_pending() {
                    return;
                }
                let name = block_scope_name(&self.table.scope(self.cursor.current()).name, stmt.line);
                let scope = self.resolve_scope(block.scope, &name);
                self.cursor.enter(self.table, scope);
            }
            _ => {}
        }
    }

    fn leave_stmt(&mut self, stmt: &mut Stmt) {
        let line = stmt.line;
        match &stmt.kind {
            StmtKind::VarDecl(decl) => self.check_binding(decl, "variable", line),
            StmtKind::Param(decl) => self.check_binding(decl, "parameter", line),
            StmtKind::Compound(_) => self.cursor.leave(self.table),
            StmtKind::If { condition, .. } | StmtKind::While { condition, .. } => {
                self.check_condition(condition);
            }
            StmtKind::Return(value) => self.check_return(value.as_ref(), line),
            StmtKind::VoidParam | StmtKind::FunDecl(_) | StmtKind::Expr(_) => {}
        }
    }

    fn leave_expr(&mut self, expr: &mut Expr) {
        let line = expr.line;
        let ty = match &expr.kind {
            ExprKind::Binary { left, right, .. } => self.binary_type(left, right, line),
            ExprKind::Const(_) => Type::Integer,
            ExprKind::Assign { target, value } => self.assign_type(target, value, line),
            ExprKind::Var(access) => self.var_type(access, line),
            ExprKind::Call(call) => self.call_type(call, line),
        };
        expr.ty = Some(ty);
    }
}

/// Run the type-checking pass over a program already processed by
/// [`build_symbol_table`](super::build_symbol_table).
pub fn type_check(
    program: &mut Program,
    table: &SymbolTable,
    sink: &mut dyn DiagnosticSink,
) -> PassOutcome {
    debug!("type-checking pass");

    let mut checker = TypeChecker {
        table,
        sink,
        cursor: ScopeCursor::new(table.global()),
        error_count: 0,
    };
    walk_program(&mut checker, program);

    debug!("type-checking pass done: {} errors", checker.error_count);
    PassOutcome {
        error_count: checker.error_count,
        events: checker.cursor.into_events(),
    }
}
