//! Scope cursor shared by the declaration and type-checking passes

use log::trace;

use super::symtab::{ScopeId, SymbolTable};

/// A scope transition observed during a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeEvent {
    Enter(String),
    Exit(String),
}

/// Explicit "current scope" state threaded through one traversal.
///
/// A function declaration enters its scope and leaves the body pending; the
/// body's compound statement then reuses that scope instead of opening a new
/// one. Leaving any compound statement returns to the enclosing scope.
#[derive(Debug)]
pub struct ScopeCursor {
    stack: Vec<ScopeId>,
    body_pending: bool,
    events: Vec<ScopeEvent>,
}

impl ScopeCursor {
    pub fn new(root: ScopeId) -> Self {
        Self {
            stack: vec![root],
            body_pending: false,
            events: Vec::new(),
        }
    }

    pub fn current(&self) -> ScopeId {
        // The root is never popped.
        self.stack[self.stack.len() - 1]
    }

    pub fn enter(&mut self, table: &SymbolTable, scope: ScopeId) {
        let name = &table.scope(scope).name;
        trace!("enter scope '{}' (depth {})", name, self.stack.len());
        self.events.push(ScopeEvent::Enter(name.clone()));
        self.stack.push(scope);
    }

    /// Enter a function scope; its body block will not open another one.
    pub fn enter_function(&mut self, table: &SymbolTable, scope: ScopeId) {
        self.enter(table, scope);
        self.body_pending = true;
    }

    /// Consume the pending-body marker left by `enter_function`.
    pub fn take_body_pending(&mut self) -> bool {
        std::mem::take(&mut self.body_pending)
    }

    pub fn leave(&mut self, table: &SymbolTable) {
        if self.stack.len() == 1 {
            return;
        }
        if let Some(scope) = self.stack.pop() {
            let name = &table.scope(scope).name;
            trace!("leave scope '{}'", name);
            self.events.push(ScopeEvent::Exit(name.clone()));
        }
    }

    pub fn into_events(self) -> Vec<ScopeEvent> {
        self.events
    }
}

/// Name of a block scope that is not a function body
pub fn block_scope_name(enclosing: &str, line: u32) -> String {
    format!("{enclosing}-{line}")
}
