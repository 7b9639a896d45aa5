//! Primitive widening table (spec.md §4.8: "Primitive widening types emit
//! as branded aliases of the target's unified numeric type"). The target
//! language has one numeric type, so every CLR numeric primitive is
//! printed as a distinct branded alias defined in `_support/types` rather
//! than collapsing them all to the same syntax.

/// `(clr_full_name, support_alias_name)` for every CLR primitive that
/// widens to the target's numeric type and therefore needs a brand to
/// stay distinguishable.
pub const BRANDED_NUMERICS: &[(&str, &str)] = &[
    ("System.SByte", "SByte"),
    ("System.Byte", "Byte"),
    ("System.Int16", "Int16"),
    ("System.UInt16", "UInt16"),
    ("System.Int32", "Int32"),
    ("System.UInt32", "UInt32"),
    ("System.Int64", "Int64"),
    ("System.UInt64", "UInt64"),
    ("System.Single", "Single"),
    ("System.Double", "Double"),
    ("System.Decimal", "Decimal"),
    ("System.IntPtr", "IntPtr"),
    ("System.UIntPtr", "UIntPtr"),
];

/// Primitives that map directly onto a native target-language type with
/// no brand needed.
pub const DIRECT_PRIMITIVES: &[(&str, &str)] = &[
    ("System.Void", "void"),
    ("System.Boolean", "boolean"),
    ("System.String", "string"),
    ("System.Object", "unknown"),
];

/// `Char` gets its own brand: a CLR char is a UTF-16 code unit, not a
/// target-language string.
pub const CHAR_CLR_NAME: &str = "System.Char";
pub const CHAR_SUPPORT_ALIAS: &str = "Char";

pub fn branded_numeric(clr_full_name: &str) -> Option<&'static str> {
    BRANDED_NUMERICS.iter().find(|(name, _)| *name == clr_full_name).map(|(_, alias)| *alias)
}

pub fn direct_primitive(clr_full_name: &str) -> Option<&'static str> {
    if clr_full_name == CHAR_CLR_NAME {
        return None;
    }
    DIRECT_PRIMITIVES.iter().find(|(name, _)| *name == clr_full_name).map(|(_, ts)| *ts)
}

pub fn is_char(clr_full_name: &str) -> bool {
    clr_full_name == CHAR_CLR_NAME
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int32_widens_to_a_branded_alias() {
        assert_eq!(branded_numeric("System.Int32"), Some("Int32"));
        assert_eq!(direct_primitive("System.Int32"), None);
    }

    #[test]
    fn string_and_void_are_direct() {
        assert_eq!(direct_primitive("System.String"), Some("string"));
        assert_eq!(direct_primitive("System.Void"), Some("void"));
    }

    #[test]
    fn char_is_neither_direct_nor_in_the_numeric_table() {
        assert!(is_char("System.Char"));
        assert_eq!(branded_numeric("System.Char"), None);
        assert_eq!(direct_primitive("System.Char"), None);
    }
}
