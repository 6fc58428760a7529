//! Expression AST nodes

use super::Type;
use crate::sema::SymbolId;

/// Expression node
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub line: u32,
    /// Type of this expression (filled in during type checking)
    pub ty: Option<Type>,
}

impl Expr {
    pub fn new(kind: ExprKind, line: u32) -> Self {
        Self { kind, line, ty: None }
    }

    pub fn constant(value: i64, line: u32) -> Self {
        Self::new(ExprKind::Const(value), line)
    }

    pub fn var(name: impl Into<String>, line: u32) -> Self {
        Self::new(
            ExprKind::Var(VarAccess { name: name.into(), index: None, symbol: None }),
            line,
        )
    }

    pub fn index(name: impl Into<String>, index: Expr, line: u32) -> Self {
        Self::new(
            ExprKind::Var(VarAccess {
                name: name.into(),
                index: Some(Box::new(index)),
                symbol: None,
            }),
            line,
        )
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>, line: u32) -> Self {
        Self::new(ExprKind::Call(Call { name: name.into(), args, symbol: None }), line)
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr, line: u32) -> Self {
        Self::new(
            ExprKind::Binary { op, left: Box::new(left), right: Box::new(right) },
            line,
        )
    }

    pub fn assign(target: Expr, value: Expr, line: u32) -> Self {
        Self::new(
            ExprKind::Assign { target: Box::new(target), value: Box::new(value) },
            line,
        )
    }

    /// Type assigned by the checker; unchecked nodes count as errors.
    pub fn checked_type(&self) -> Type {
        self.ty.unwrap_or(Type::Error)
    }
}

/// Expression kinds
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Binary operation: a + b, x < y
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Integer literal
    Const(i64),

    /// Assignment: x = y, a[i] = y
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },

    /// Variable access, optionally indexed: x, a[i]
    Var(VarAccess),

    /// Function call: f(a, b)
    Call(Call),
}

#[derive(Debug, Clone)]
pub struct VarAccess {
    pub name: String,
    pub index: Option<Box<Expr>>,
    /// Symbol the name resolved to in the declaration pass
    pub symbol: Option<SymbolId>,
}

#[derive(Debug, Clone)]
pub struct Call {
    pub name: String,
    pub args: Vec<Expr>,
    /// Symbol the name resolved to in the declaration pass
    pub symbol: Option<SymbolId>,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}
