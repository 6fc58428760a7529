//! Type representations in the AST

use std::fmt;

/// C-Minus type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Void,
    Integer,
    IntegerArray,
    VoidArray,
    Boolean,
    Function,
    /// A semantic error was already reported for this expression
    Error,
}

impl Type {
    /// Element type of an array type, `None` for everything else
    pub fn element_type(self) -> Option<Type> {
        match self {
            Type::IntegerArray => Some(Type::Integer),
            Type::VoidArray => Some(Type::Void),
            Type::Void | Type::Integer | Type::Boolean | Type::Function | Type::Error => None,
        }
    }

    pub fn is_array(self) -> bool {
        self.element_type().is_some()
    }

    pub fn is_error(self) -> bool {
        self == Type::Error
    }

    /// Void and void arrays cannot be the type of a variable or parameter
    pub fn is_bindable(self) -> bool {
        !matches!(self, Type::Void | Type::VoidArray)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Type::Void => "void",
            Type::Integer => "int",
            Type::IntegerArray => "int[]",
            Type::VoidArray => "void[]",
            Type::Boolean => "bool",
            Type::Function => "Function",
            Type::Error => "error",
        };
        // `pad` so the reports can use width specifiers
        f.pad(text)
    }
}
