//! Generic pre/post-order syntax tree traversal shared by both passes

use crate::ast::*;

/// Hooks called around every node. Children are visited between the
/// `enter_*` and `leave_*` calls of their parent, in source order.
pub trait Visitor {
    fn enter_stmt(&mut self, _stmt: &mut Stmt) {}
    fn leave_stmt(&mut self, _stmt: &mut Stmt) {}
    fn enter_expr(&mut self, _expr: &mut Expr) {}
    fn leave_expr(&mut self, _expr: &mut Expr) {}
}

pub fn walk_program<V: Visitor + ?Sized>(visitor: &mut V, program: &mut Program) {
    for decl in &mut program.declarations {
        walk_stmt(visitor, decl);
    }
}

pub fn walk_stmt<V: Visitor + ?Sized>(visitor: &mut V, stmt: &mut Stmt) {
    visitor.enter_stmt(stmt);
    match &mut stmt.kind {
        StmtKind::VarDecl(_) | StmtKind::Param(_) | StmtKind::VoidParam => {}
        StmtKind::FunDecl(func) => {
            for param in &mut func.params {
                walk_stmt(visitor, param);
            }
            walk_stmt(visitor, &mut func.body);
        }
        StmtKind::Compound(block) => {
            for item in &mut block.stmts {
                walk_stmt(visitor, item);
            }
        }
        StmtKind::Expr(expr) => walk_expr(visitor, expr),
        StmtKind::If { condition, then_branch, else_branch } => {
            walk_expr(visitor, condition);
            walk_stmt(visitor, then_branch);
            if let Some(else_branch) = else_branch {
                walk_stmt(visitor, else_branch);
            }
        }
        StmtKind::While { condition, body } => {
            walk_expr(visitor, condition);
            walk_stmt(visitor, body);
        }
        StmtKind::Return(value) => {
            if let Some(value) = value {
                walk_expr(visitor, value);
            }
        }
    }
    visitor.leave_stmt(stmt);
}

pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: &mut Expr) {
    visitor.enter_expr(expr);
    match &mut expr.kind {
        ExprKind::Const(_) => {}
        ExprKind::Binary { left, right, .. } => {
            walk_expr(visitor, left);
            walk_expr(visitor, right);
        }
        ExprKind::Assign { target, value } => {
            walk_expr(visitor, target);
            walk_expr(visitor, value);
        }
        ExprKind::Var(access) => {
            if let Some(index) = &mut access.index {
                walk_expr(visitor, index);
            }
        }
        ExprKind::Call(call) => {
            for arg in &mut call.args {
                walk_expr(visitor, arg);
            }
        }
    }
    visitor.leave_expr(expr);
}
