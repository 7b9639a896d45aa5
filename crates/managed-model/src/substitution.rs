//! Generic-parameter substitution over `TypeRef` trees. Shared by the
//! interface inliner (§4.2.3), structural conformance (§4.2.2), and the
//! closed-generic interface substitution the reflection reader defers to
//! Shape (§4.1).

use crate::type_ref::{NamedTypeRef, TypeRef};
use indexmap::IndexMap;

/// Maps a generic parameter name to its substituted `TypeRef`. An
/// `IndexMap` keeps substitution order deterministic when composing
/// multiple maps transitively (§4.2.3: "compose substitutions
/// transitively through multi-level chains").
pub type SubstitutionMap = IndexMap<String, TypeRef>;

/// Substitute every generic-parameter reference in `type_ref` using
/// `map`, excluding the names in `exclude` (a method's own generic
/// parameters, per §4.2.3, "exclude the method's own generic parameters
/// from substitution to avoid capturing them").
pub fn substitute(type_ref: &TypeRef, map: &SubstitutionMap, exclude: &[String]) -> TypeRef {
    match type_ref {
        TypeRef::GenericParameter { name, .. } => {
            if exclude.iter().any(|e| e == name) {
                type_ref.clone()
            } else {
                map.get(name).cloned().unwrap_or_else(|| type_ref.clone())
            }
        }
        TypeRef::Named(named) => TypeRef::Named(NamedTypeRef {
            type_arguments: named
                .type_arguments
                .iter()
                .map(|a| substitute(a, map, exclude))
                .collect(),
            ..named.clone()
        }),
        TypeRef::Array { element, rank } => TypeRef::Array {
            element: Box::new(substitute(element, map, exclude)),
            rank: *rank,
        },
        TypeRef::Pointer { pointee, depth } => TypeRef::Pointer {
            pointee: Box::new(substitute(pointee, map, exclude)),
            depth: *depth,
        },
        TypeRef::ByReference { referent } => TypeRef::ByReference {
            referent: Box::new(substitute(referent, map, exclude)),
        },
        TypeRef::Nested { declaring, nested_name, full } => TypeRef::Nested {
            declaring: Box::new(substitute(declaring, map, exclude)),
            nested_name: nested_name.clone(),
            full: Box::new(substitute(full, map, exclude)),
        },
        TypeRef::Placeholder { .. } => type_ref.clone(),
    }
}

/// Compose two substitutions transitively: `outer` applied after `inner`,
/// as needed when `IDerived<T> : IMiddle<List<T>> : IBase<U>` chains
/// multiple levels of generic arguments (§4.2.3).
pub fn compose(inner: &SubstitutionMap, outer: &SubstitutionMap) -> SubstitutionMap {
    let mut composed = SubstitutionMap::new();
    for (name, ty) in inner {
        composed.insert(name.clone(), substitute(ty, outer, &[]));
    }
    for (name, ty) in outer {
        composed.entry(name.clone()).or_insert_with(|| ty.clone());
    }
    composed
}

/// Build a substitution map from a generic type's parameter names and a
/// closed reference's type arguments, positionally.
pub fn map_from_type_arguments(parameter_names: &[String], type_arguments: &[TypeRef]) -> SubstitutionMap {
    parameter_names
        .iter()
        .cloned()
        .zip(type_arguments.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_generic_parameter() {
        let mut map = SubstitutionMap::new();
        map.insert("T".to_string(), TypeRef::named_simple("System.String"));
        let generic_param = TypeRef::GenericParameter { parameter_id: 0, name: "T".into() };
        let substituted = substitute(&generic_param, &map, &[]);
        assert_eq!(substituted.canonical_name(), "System.String");
    }

    #[test]
    fn excludes_methods_own_generic_parameters() {
        let mut map = SubstitutionMap::new();
        map.insert("T".to_string(), TypeRef::named_simple("System.String"));
        let generic_param = TypeRef::GenericParameter { parameter_id: 0, name: "T".into() };
        let substituted = substitute(&generic_param, &map, &["T".to_string()]);
        assert_eq!(substituted.canonical_name(), "T");
    }

    #[test]
    fn composes_transitively() {
        let mut inner = SubstitutionMap::new();
        inner.insert("T".to_string(), TypeRef::GenericParameter { parameter_id: 0, name: "U".into() });
        let mut outer = SubstitutionMap::new();
        outer.insert("U".to_string(), TypeRef::named_simple("System.Int32"));
        let composed = compose(&inner, &outer);
        assert_eq!(composed.get("T").unwrap().canonical_name(), "System.Int32");
    }
}
