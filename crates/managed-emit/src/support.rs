//! Renders `_support/types.<decl>` (spec.md §6): the one global file every
//! namespace's declarations import from for branded numerics, the `Char`
//! brand, and the two marker types that stand in for pointers and
//! by-reference parameters once their target erases them structurally.

use crate::primitives::{BRANDED_NUMERICS, CHAR_SUPPORT_ALIAS};
use crate::writer::IndentWriter;

pub fn render() -> String {
    let mut w = IndentWriter::new();
    w.line("// Generated support types. One brand per CLR numeric primitive so");
    w.line("// that Int32 and Double are not structurally interchangeable.");
    w.write_line();

    for (clr_name, alias) in BRANDED_NUMERICS {
        w.line(&format!("export type {alias} = number & {{ readonly __clrBrand: \"{clr_name}\" }};"));
    }
    w.line(&format!("export type {CHAR_SUPPORT_ALIAS} = string & {{ readonly __clrBrand: \"System.Char\" }};"));
    w.write_line();

    w.line("// Pointers and by-reference parameters have no structural target");
    w.line("// representation; they are carried as opaque wrappers.");
    w.line("export type Ptr<T> = { readonly __clrPointerTo: T };");
    w.line("export type ByRef<T> = { readonly __clrByRefTo: T };");

    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_branded_numeric_gets_an_alias() {
        let out = render();
        for (_, alias) in BRANDED_NUMERICS {
            assert!(out.contains(&format!("export type {alias} =")), "missing alias for {alias}");
        }
        assert!(out.contains("export type Char ="));
        assert!(out.contains("export type Ptr<T>"));
        assert!(out.contains("export type ByRef<T>"));
    }
}
