//! Scope-tree symbol table
//!
//! Scopes form a tree rooted at the global scope: functions hang off the
//! global scope and nested blocks hang off their enclosing scope. Scopes and
//! symbols live in arenas owned by the table and are addressed by id, so a
//! symbol's owning scope is a plain back-reference.

use std::collections::HashMap;

use crate::ast::Type;
use crate::common::{Name, NameTable};

/// Name of the root scope
pub const GLOBAL_SCOPE: &str = "global";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(u32);

/// Return type and ordered parameters of a function symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub return_type: Type,
    pub params: Vec<(String, Type)>,
}

/// A declared identifier in one scope
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: Name,
    pub ty: Type,
    pub scope: ScopeId,
    /// Declaration line, then every line that references the symbol
    pub lines: Vec<u32>,
    /// Declaration-site line; nothing assigns storage yet
    pub location: u32,
    pub signature: Option<Signature>,
}

/// A lexical scope: global, function, or nested block
#[derive(Debug, Clone)]
pub struct Scope {
    pub name: String,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    symbols: HashMap<Name, SymbolId>,
    /// Symbols in insertion order
    order: Vec<SymbolId>,
}

impl Scope {
    fn new(name: String, parent: Option<ScopeId>) -> Self {
        Self {
            name,
            parent,
            children: Vec::new(),
            symbols: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn symbols(&self) -> &[SymbolId] {
        &self.order
    }
}

/// The whole scope tree for one analysis run
#[derive(Debug)]
pub struct SymbolTable {
    names: NameTable,
    scopes: Vec<Scope>,
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    /// Create a table holding the global scope and the builtin
    /// `int input(void)` and `void output(int value)`.
    pub fn new() -> Self {
        let mut table = Self {
            names: NameTable::new(),
            scopes: vec![Scope::new(GLOBAL_SCOPE.to_string(), None)],
            symbols: Vec::new(),
        };

        let global = table.global();
        let input = table.insert(global, "input", Type::Function, 0);
        table.set_signature(input, Signature { return_type: Type::Integer, params: Vec::new() });

        let output = table.insert(global, "output", Type::Function, 0);
        table.symbols[output.0 as usize].location = 1;
        table.set_signature(
            output,
            Signature {
                return_type: Type::Void,
                params: vec![("value".to_string(), Type::Integer)],
            },
        );

        table
    }

    pub fn global(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0 as usize]
    }

    fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.0 as usize]
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0 as usize]
    }

    pub fn name(&self, id: SymbolId) -> &str {
        self.names.resolve(self.symbol(id).name)
    }

    /// Allocate a scope and append it to `parent`'s children.
    ///
    /// Sibling names are not checked for uniqueness; callers guarantee it
    /// through the naming scheme.
    pub fn create_scope(&mut self, name: impl Into<String>, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(name.into(), Some(parent)));
        self.scope_mut(parent).children.push(id);
        id
    }

    pub fn find_child_scope(&self, parent: ScopeId, name: &str) -> Option<ScopeId> {
        self.scope(parent)
            .children
            .iter()
            .copied()
            .find(|&child| self.scope(child).name == name)
    }

    /// Record `name` in `scope`.
    ///
    /// A name already present only gains `line` as a new reference; the
    /// existing symbol keeps its type. Redeclaration checks belong to the
    /// caller.
    pub fn insert(&mut self, scope: ScopeId, name: &str, ty: Type, line: u32) -> SymbolId {
        let key = self.names.intern(name);
        if let Some(&id) = self.scope(scope).symbols.get(&key) {
            self.symbols[id.0 as usize].lines.push(line);
            return id;
        }

        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol {
            name: key,
            ty,
            scope,
            lines: vec![line],
            location: line,
            signature: None,
        });
        let owner = self.scope_mut(scope);
        owner.symbols.insert(key, id);
        owner.order.push(id);
        id
    }

    pub fn set_signature(&mut self, symbol: SymbolId, signature: Signature) {
        self.symbols[symbol.0 as usize].signature = Some(signature);
    }

    /// Resolve `name` from `scope` outwards; inner declarations shadow outer ones.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        let key = self.names.get(name)?;
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id);
            if let Some(&symbol) = scope.symbols.get(&key) {
                return Some(symbol);
            }
            current = scope.parent;
        }
        None
    }

    /// Resolve `name` in `scope` only, ignoring enclosing scopes.
    pub fn lookup_local(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        let key = self.names.get(name)?;
        self.scope(scope).symbols.get(&key).copied()
    }

    /// Number of ancestors between `scope` and the root
    pub fn depth(&self, scope: ScopeId) -> usize {
        let mut depth = 0;
        let mut current = self.scope(scope).parent;
        while let Some(id) = current {
            depth += 1;
            current = self.scope(id).parent;
        }
        depth
    }

    /// The function-level ancestor of `scope` (the one whose parent is the
    /// global scope), or `None` when `scope` is the global scope itself.
    pub fn function_scope(&self, scope: ScopeId) -> Option<ScopeId> {
        let mut current = scope;
        loop {
            match self.scope(current).parent {
                None => return None,
                Some(parent) if parent == self.global() => return Some(current),
                Some(parent) => current = parent,
            }
        }
    }

    /// Signature of the function enclosing `scope`
    pub fn enclosing_signature(&self, scope: ScopeId) -> Option<&Signature> {
        let function = self.function_scope(scope)?;
        let symbol = self.lookup_local(self.global(), &self.scope(function).name)?;
        self.symbol(symbol).signature.as_ref()
    }

    /// Every scope once: self, then each child left to right
    pub fn preorder(&self) -> Vec<ScopeId> {
        let mut order = Vec::with_capacity(self.scopes.len());
        let mut stack = vec![self.global()];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.scope(id).children.iter().rev().copied());
        }
        order
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
