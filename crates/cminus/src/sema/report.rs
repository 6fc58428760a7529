//! Listings over a finished symbol table
//!
//! All reports walk scopes in pre-order and list symbols in declaration order.

use std::fmt::{self, Write};

use crate::ast::Type;
use super::symtab::{ScopeId, SymbolId, SymbolTable};

fn symbols_preorder(table: &SymbolTable) -> impl Iterator<Item = (ScopeId, SymbolId)> + '_ {
    table
        .preorder()
        .into_iter()
        .flat_map(move |scope| table.scope(scope).symbols().iter().map(move |&symbol| (scope, symbol)))
}

/// Every symbol with its type, scope, location and reference lines
pub fn symbol_table(table: &SymbolTable, out: &mut impl Write) -> fmt::Result {
    writeln!(out, "Variable Name  Variable Type  Scope Name  Location   Line Numbers")?;
    writeln!(out, "-------------  -------------  ----------  --------   ------------")?;
    for (scope, id) in symbols_preorder(table) {
        let symbol = table.symbol(id);
        write!(
            out,
            "{:<14} {:<14} {:<11} {:<8}  ",
            table.name(id),
            symbol.ty,
            table.scope(scope).name,
            symbol.location
        )?;
        for line in &symbol.lines {
            write!(out, "{line:>4} ")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Every function with its return type and parameters
pub fn function_table(table: &SymbolTable, out: &mut impl Write) -> fmt::Result {
    writeln!(out, "Function Name  Scope Name  Return Type  Parameter Name  Parameter Type")?;
    writeln!(out, "-------------  ----------  -----------  --------------  --------------")?;
    for (scope, id) in symbols_preorder(table) {
        let Some(signature) = &table.symbol(id).signature else {
            continue;
        };
        write!(
            out,
            "{:<14} {:<11} {:<12} ",
            table.name(id),
            table.scope(scope).name,
            signature.return_type
        )?;
        if signature.params.is_empty() {
            write!(out, "{:16}{:<14}", "", "Void")?;
        }
        for (name, ty) in &signature.params {
            write!(out, "\n{:40}{:<15} {:<14}", "", name, ty)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Global variables and functions, functions listed by return type
pub fn globals_table(table: &SymbolTable, out: &mut impl Write) -> fmt::Result {
    writeln!(out, "   ID Name     ID Type    Data Type")?;
    writeln!(out, "------------  ---------  -----------")?;
    for &id in table.scope(table.global()).symbols() {
        let symbol = table.symbol(id);
        let (kind, data) = match &symbol.signature {
            Some(signature) => ("Function", signature.return_type),
            None if symbol.ty == Type::Function => ("Function", Type::Function),
            None => ("Variable", symbol.ty),
        };
        writeln!(out, "{:<13} {:<10} {:<11} ", table.name(id), kind, data)?;
    }
    Ok(())
}

/// Non-function symbols of every nested scope with their nesting level
pub fn local_table(table: &SymbolTable, out: &mut impl Write) -> fmt::Result {
    writeln!(out, "  Scope Name    Nested Level     ID Name      Data Type")?;
    writeln!(out, "--------------  ------------  -------------  -----------")?;
    for (scope, id) in symbols_preorder(table) {
        let symbol = table.symbol(id);
        if scope == table.global() || symbol.ty == Type::Function {
            continue;
        }
        writeln!(
            out,
            "{:<15} {:<13} {:<14} {:<11}",
            table.scope(scope).name,
            table.depth(scope),
            table.name(id),
            symbol.ty
        )?;
    }
    Ok(())
}

/// All four listings with their headings, as printed in trace mode
pub fn render_all(table: &SymbolTable) -> String {
    let mut out = String::new();
    let sections: [(&str, fn(&SymbolTable, &mut String) -> fmt::Result); 4] = [
        ("Symbol Table", symbol_table),
        ("Function Table", function_table),
        ("Function and Global Variables", globals_table),
        ("Local Variables", local_table),
    ];
    for (title, report) in sections {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "\n< {title} >");
        let _ = report(table, &mut out);
    }
    out
}
