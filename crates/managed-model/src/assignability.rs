//! Target-level assignability (spec.md §4.2.2): whether one erased type
//! can stand in for another -- same type, numeric widening, "everything
//! widens to object", or a base/interface relationship walked through the
//! graph. Used by structural conformance to decide whether a class member
//! already satisfies an interface member instead of comparing raw
//! signature text.

use crate::graph::SymbolGraph;
use crate::ids::TypeStableId;
use crate::type_ref::{NamedTypeRef, TypeRef};

/// Implicit numeric widening conversions, ECMA-335 style. `decimal` is
/// deliberately left out: the CLR does not treat it as a built-in numeric
/// primitive for implicit widening.
fn numeric_widening_targets(from: &str) -> &'static [&'static str] {
    match from {
        "System.SByte" => &["System.Int16", "System.Int32", "System.Int64", "System.Single", "System.Double"],
        "System.Byte" => &[
            "System.Int16",
            "System.UInt16",
            "System.Int32",
            "System.UInt32",
            "System.Int64",
            "System.UInt64",
            "System.Single",
            "System.Double",
        ],
        "System.Int16" => &["System.Int32", "System.Int64", "System.Single", "System.Double"],
        "System.UInt16" => &[
            "System.Int32",
            "System.UInt32",
            "System.Int64",
            "System.UInt64",
            "System.Single",
            "System.Double",
        ],
        "System.Char" => &[
            "System.UInt16",
            "System.Int32",
            "System.UInt32",
            "System.Int64",
            "System.UInt64",
            "System.Single",
            "System.Double",
        ],
        "System.Int32" => &["System.Int64", "System.Single", "System.Double"],
        "System.UInt32" => &["System.Int64", "System.UInt64", "System.Single", "System.Double"],
        "System.Int64" => &["System.Single", "System.Double"],
        "System.UInt64" => &["System.Single", "System.Double"],
        "System.Single" => &["System.Double"],
        _ => &[],
    }
}

fn widens_to(from: &str, to: &str) -> bool {
    numeric_widening_targets(from).contains(&to)
}

/// Two erased type references denote the same shape.
pub fn erased_equal(a: &TypeRef, b: &TypeRef) -> bool {
    a.erased().canonical_name() == b.erased().canonical_name()
}

fn is_object(named: &NamedTypeRef) -> bool {
    named.namespace == "System" && named.simple_name == "Object" && named.arity == 0
}

fn is_subtype_of(from: &TypeStableId, to: &TypeStableId, graph: &SymbolGraph, seen: &mut Vec<TypeStableId>) -> bool {
    if from == to {
        return true;
    }
    if seen.contains(from) {
        return false;
    }
    seen.push(from.clone());
    let Some(ty) = graph.type_by_stable_id(from) else { return false };
    if let Some(TypeRef::Named(base)) = &ty.base_type {
        if is_subtype_of(&base.stable_id(), to, graph, seen) {
            return true;
        }
    }
    ty.interfaces.iter().any(|iface| match iface {
        TypeRef::Named(named) => is_subtype_of(&named.stable_id(), to, graph, seen),
        _ => false,
    })
}

/// Is `from` assignable to `to` at the target level: same erased shape,
/// numeric widening, everything widens to `object`, or `from` is a
/// subtype of `to` through the base/interface chain.
pub fn is_assignable_to(from: &TypeRef, to: &TypeRef, graph: &SymbolGraph) -> bool {
    let from = from.erased();
    let to = to.erased();
    if from.canonical_name() == to.canonical_name() {
        return true;
    }
    let (TypeRef::Named(from_named), TypeRef::Named(to_named)) = (&from, &to) else {
        return false;
    };
    if is_object(to_named) {
        return true;
    }
    if widens_to(&from_named.clr_full_name(), &to_named.clr_full_name()) {
        return true;
    }
    is_subtype_of(&from_named.stable_id(), &to_named.stable_id(), graph, &mut Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_symbol::{TypeKind, TypeSymbol};

    fn named(namespace: &str, simple_name: &str) -> TypeRef {
        TypeRef::Named(NamedTypeRef {
            assembly: "asm".into(),
            namespace: namespace.into(),
            simple_name: simple_name.into(),
            arity: 0,
            type_arguments: vec![],
            interface_stable_id: None,
        })
    }

    #[test]
    fn identical_erased_shapes_are_assignable() {
        let graph = SymbolGraph::new();
        assert!(is_assignable_to(&named("System", "String"), &named("System", "String"), &graph));
    }

    #[test]
    fn narrower_numeric_type_widens_to_wider_one() {
        let graph = SymbolGraph::new();
        assert!(is_assignable_to(&named("System", "Int32"), &named("System", "Int64"), &graph));
        assert!(!is_assignable_to(&named("System", "Int64"), &named("System", "Int32"), &graph));
    }

    #[test]
    fn everything_widens_to_object() {
        let graph = SymbolGraph::new();
        assert!(is_assignable_to(&named("System", "String"), &named("System", "Object"), &graph));
        assert!(is_assignable_to(&named("App", "Widget"), &named("System", "Object"), &graph));
    }

    #[test]
    fn pointer_and_byref_wrappers_are_erased_before_comparison() {
        let graph = SymbolGraph::new();
        let ptr = TypeRef::Pointer { pointee: Box::new(named("System", "Int32")), depth: 1 };
        let byref = TypeRef::ByReference { referent: Box::new(named("System", "Int32")) };
        assert!(is_assignable_to(&ptr, &byref, &graph));
    }

    #[test]
    fn derived_type_is_assignable_to_its_base() {
        let mut graph = SymbolGraph::new();
        let base_id = TypeStableId::new("asm", "App.Base");
        graph.insert_type("App", TypeSymbol::new(base_id.clone(), TypeKind::Class)).unwrap();

        let mut derived = TypeSymbol::new(TypeStableId::new("asm", "App.Derived"), TypeKind::Class);
        derived.base_type = Some(TypeRef::Named(NamedTypeRef {
            assembly: "asm".into(),
            namespace: "App".into(),
            simple_name: "Base".into(),
            arity: 0,
            type_arguments: vec![],
            interface_stable_id: None,
        }));
        graph.insert_type("App", derived).unwrap();

        assert!(is_assignable_to(&named("App", "Derived"), &named("App", "Base"), &graph));
        assert!(!is_assignable_to(&named("App", "Base"), &named("App", "Derived"), &graph));
    }

    #[test]
    fn unrelated_types_are_not_assignable() {
        let graph = SymbolGraph::new();
        assert!(!is_assignable_to(&named("App", "Widget"), &named("App", "Gadget"), &graph));
    }
}
