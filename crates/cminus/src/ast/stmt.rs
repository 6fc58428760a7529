//! Statement and declaration AST nodes

use super::{Expr, Type};
use crate::sema::ScopeId;

/// Statement node
#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub line: u32,
}

impl Stmt {
    pub fn new(kind: StmtKind, line: u32) -> Self {
        Self { kind, line }
    }

    pub fn var_decl(name: impl Into<String>, ty: Type, line: u32) -> Self {
        Self::new(StmtKind::VarDecl(VarDecl { name: name.into(), ty }), line)
    }

    pub fn param(name: impl Into<String>, ty: Type, line: u32) -> Self {
        Self::new(StmtKind::Param(VarDecl { name: name.into(), ty }), line)
    }

    pub fn void_param(line: u32) -> Self {
        Self::new(StmtKind::VoidParam, line)
    }

    pub fn function(
        name: impl Into<String>,
        return_type: Type,
        params: Vec<Stmt>,
        body: Stmt,
        line: u32,
    ) -> Self {
        Self::new(
            StmtKind::FunDecl(FunDecl {
                name: name.into(),
                return_type,
                params,
                body: Box::new(body),
                scope: None,
            }),
            line,
        )
    }

    pub fn compound(stmts: Vec<Stmt>, line: u32) -> Self {
        Self::new(StmtKind::Compound(Compound { stmts, scope: None }), line)
    }

    pub fn expr(expr: Expr) -> Self {
        let line = expr.line;
        Self::new(StmtKind::Expr(expr), line)
    }

    pub fn if_(condition: Expr, then_branch: Stmt, else_branch: Option<Stmt>, line: u32) -> Self {
        Self::new(
            StmtKind::If {
                condition,
                then_branch: Box::new(then_branch),
                else_branch: else_branch.map(Box::new),
            },
            line,
        )
    }

    pub fn while_(condition: Expr, body: Stmt, line: u32) -> Self {
        Self::new(StmtKind::While { condition, body: Box::new(body) }, line)
    }

    pub fn ret(value: Option<Expr>, line: u32) -> Self {
        Self::new(StmtKind::Return(value), line)
    }
}

/// Statement kinds
#[derive(Debug, Clone)]
pub enum StmtKind {
    /// Variable or array declaration: int x; int a[10];
    VarDecl(VarDecl),

    /// Function parameter: int x, int a[]
    Param(VarDecl),

    /// The `void` in `f(void)`
    VoidParam,

    /// Function declaration with its body
    FunDecl(FunDecl),

    /// Compound statement (block): { ... }
    Compound(Compound),

    /// Expression statement: expr;
    Expr(Expr),

    /// If statement: if (cond) then [else else]
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    /// While loop: while (cond) body
    While {
        condition: Expr,
        body: Box<Stmt>,
    },

    /// Return statement: return [expr];
    Return(Option<Expr>),
}

#[derive(Debug, Clone)]
pub struct VarDecl {
    pub name: String,
    pub ty: Type,
}

#[derive(Debug, Clone)]
pub struct FunDecl {
    pub name: String,
    pub return_type: Type,
    /// `Param` nodes, or a single `VoidParam`
    pub params: Vec<Stmt>,
    /// Always a `Compound`
    pub body: Box<Stmt>,
    /// Scope opened for this function by the declaration pass
    pub scope: Option<ScopeId>,
}

impl FunDecl {
    /// Declared parameters in order, skipping the `void` marker
    pub fn signature_params(&self) -> Vec<(String, Type)> {
        self.params
            .iter()
            .filter_map(|p| match &p.kind {
                StmtKind::Param(decl) => Some((decl.name.clone(), decl.ty)),
                _ => None,
            })
            .collect()
    }
}

/// Block (compound statement); local declarations come first
#[derive(Debug, Clone)]
pub struct Compound {
    pub stmts: Vec<Stmt>,
    /// Scope opened for this block by the declaration pass. Function bodies
    /// share the function's scope and are left unset.
    pub scope: Option<ScopeId>,
}
