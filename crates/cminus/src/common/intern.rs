//! Identifier interning for the symbol table

use std::fmt;

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Interned identifier
pub type Name = DefaultSymbol;

/// Owns the text of every identifier the symbol table has seen
#[derive(Default)]
pub struct NameTable {
    interner: DefaultStringInterner,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, text: &str) -> Name {
        self.interner.get_or_intern(text)
    }

    /// Returns the name only if it was interned before. Lookups use this so
    /// that probing for unknown identifiers does not grow the table.
    pub fn get(&self, text: &str) -> Option<Name> {
        self.interner.get(text)
    }

    pub fn resolve(&self, name: Name) -> &str {
        self.interner.resolve(name).unwrap_or("<unknown>")
    }
}

impl fmt::Debug for NameTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameTable")
            .field("len", &self.interner.len())
            .finish()
    }
}
