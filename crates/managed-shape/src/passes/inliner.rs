//! 4.2.3 — Interface inliner. Flattens interface inheritance: every
//! ancestor's members are copied into each derived interface and the
//! `extends` list (here, `interfaces`) is cleared. Runs after the first
//! index build so [`clrbind_index::Indexes`] still reflects the
//! pre-flattened hierarchy the conformance pass needs, and before
//! explicit-implementation synthesis, which depends on flattened
//! interfaces.

use clrbind_model::member::{EventSymbol, MethodSymbol, PropertySymbol};
use clrbind_model::substitution::{map_from_type_arguments, substitute, SubstitutionMap};
use clrbind_model::type_ref::TypeRef;
use clrbind_model::{SymbolGraph, TypeKind, TypeStableId};

fn substitute_method(method: &MethodSymbol, map: &SubstitutionMap) -> MethodSymbol {
    let exclude: Vec<String> = method.generic_parameters.iter().map(|p| p.name.clone()).collect();
    MethodSymbol {
        common: method.common.clone(),
        generic_parameters: method.generic_parameters.clone(),
        parameters: method
            .parameters
            .iter()
            .map(|p| clrbind_model::ParameterSymbol {
                name: p.name.clone(),
                ty: substitute(&p.ty, map, &exclude),
                modifier: p.modifier,
                has_default: p.has_default,
            })
            .collect(),
        return_type: substitute(&method.return_type, map, &exclude),
        is_static: method.is_static,
        is_abstract: method.is_abstract,
        is_virtual: method.is_virtual,
        signature: method.signature.clone(),
    }
}

fn substitute_property(property: &PropertySymbol, map: &SubstitutionMap) -> PropertySymbol {
    PropertySymbol {
        common: property.common.clone(),
        index_parameters: property
            .index_parameters
            .iter()
            .map(|p| clrbind_model::ParameterSymbol {
                name: p.name.clone(),
                ty: substitute(&p.ty, map, &[]),
                modifier: p.modifier,
                has_default: p.has_default,
            })
            .collect(),
        property_type: substitute(&property.property_type, map, &[]),
        is_static: property.is_static,
        has_getter: property.has_getter,
        has_setter: property.has_setter,
        is_readonly_surface: property.is_readonly_surface,
        signature: property.signature.clone(),
    }
}

fn substitute_event(event: &EventSymbol, map: &SubstitutionMap) -> EventSymbol {
    EventSymbol {
        common: event.common.clone(),
        handler_type: substitute(&event.handler_type, map, &[]),
        is_static: event.is_static,
        signature: event.signature.clone(),
    }
}

/// Recursively gather `(ancestor_id, substitution_map)` pairs in
/// root-first order, composing substitutions transitively through
/// multi-level chains (§4.2.3).
fn collect_ancestors(
    graph: &SymbolGraph,
    iface_ref: &TypeRef,
    outer: &SubstitutionMap,
    out: &mut Vec<(TypeStableId, SubstitutionMap)>,
) {
    let TypeRef::Named(named) = iface_ref else { return };
    let ancestor_id = named.stable_id();
    let Some(ancestor) = graph.type_by_stable_id(&ancestor_id) else { return };

    let parameter_names: Vec<String> = ancestor.generic_parameters.iter().map(|p| p.name.clone()).collect();
    let local_map = map_from_type_arguments(&parameter_names, &named.type_arguments);
    let composed = clrbind_model::substitution::compose(&local_map, outer);

    for grandparent in &ancestor.interfaces {
        collect_ancestors(graph, grandparent, &composed, out);
    }
    out.push((ancestor_id, composed));
}

pub fn run(graph: &mut SymbolGraph) {
    let interface_ids: Vec<TypeStableId> = graph
        .types()
        .filter(|t| t.kind == TypeKind::Interface)
        .map(|t| t.stable_id.clone())
        .collect();

    for id in interface_ids {
        let interfaces = graph.type_by_stable_id(&id).unwrap().interfaces.clone();
        if interfaces.is_empty() {
            continue;
        }

        let mut ancestors = Vec::new();
        let empty_map = SubstitutionMap::new();
        for iface_ref in &interfaces {
            collect_ancestors(graph, iface_ref, &empty_map, &mut ancestors);
        }

        let mut inlined_methods = Vec::new();
        let mut inlined_properties = Vec::new();
        let mut inlined_events = Vec::new();
        let mut seen_method_sigs = std::collections::HashSet::new();
        let mut seen_property_names = std::collections::HashSet::new();
        let mut seen_event_sigs = std::collections::HashSet::new();

        for (ancestor_id, map) in &ancestors {
            let Some(ancestor) = graph.type_by_stable_id(ancestor_id) else { continue };
            for m in &ancestor.members.methods {
                let substituted = substitute_method(m, map);
                if seen_method_sigs.insert(substituted.signature.clone()) {
                    inlined_methods.push(substituted);
                }
            }
            for p in &ancestor.members.properties {
                let substituted = substitute_property(p, map);
                if seen_property_names.insert(substituted.common.clr_name.clone()) {
                    inlined_properties.push(substituted);
                }
            }
            for e in &ancestor.members.events {
                let substituted = substitute_event(e, map);
                if seen_event_sigs.insert(substituted.signature.clone()) {
                    inlined_events.push(substituted);
                }
            }
        }

        let ty = graph.type_by_stable_id_mut(&id).unwrap();
        for m in &ty.members.methods {
            seen_method_sigs.insert(m.signature.clone());
        }
        for p in &ty.members.properties {
            seen_property_names.insert(p.common.clr_name.clone());
        }
        ty.members.methods.extend(inlined_methods.into_iter());
        ty.members.properties.extend(
            inlined_properties
                .into_iter()
                .filter(|p| !seen_property_names.contains(&p.common.clr_name)),
        );
        ty.members.events.extend(inlined_events.into_iter());
        ty.interfaces.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clrbind_model::ids::MemberStableId;
    use clrbind_model::member::MemberCommon;
    use clrbind_model::signature::CanonicalSignature;
    use clrbind_model::type_ref::NamedTypeRef;
    use clrbind_model::{GenericParameterSymbol, ParameterSymbol, TypeSymbol};

    fn method_returning(name: &str, return_type: TypeRef) -> MethodSymbol {
        let sig = CanonicalSignature::for_method(&[], &return_type);
        MethodSymbol {
            common: MemberCommon::new(MemberStableId::new("asm", "I", name, &sig), name),
            generic_parameters: vec![],
            parameters: Vec::<ParameterSymbol>::new(),
            return_type,
            is_static: false,
            is_abstract: true,
            is_virtual: false,
            signature: sig,
        }
    }

    #[test]
    fn substitutes_and_flattens_a_generic_base() {
        let mut graph = SymbolGraph::new();
        let mut base = TypeSymbol::new(TypeStableId::new("asm", "IEnumerable`1"), TypeKind::Interface);
        base.generic_parameters.push(GenericParameterSymbol::new("T", 0));
        base.members.methods.push(method_returning(
            "GetEnumerator",
            TypeRef::GenericParameter { parameter_id: 0, name: "T".into() },
        ));
        graph.insert_type("System.Collections.Generic", base).unwrap();

        let mut derived = TypeSymbol::new(TypeStableId::new("asm", "IStringEnumerable"), TypeKind::Interface);
        derived.interfaces.push(TypeRef::Named(NamedTypeRef {
            assembly: "asm".into(),
            namespace: "System.Collections.Generic".into(),
            simple_name: "IEnumerable".into(),
            arity: 1,
            type_arguments: vec![TypeRef::named_simple("System.String")],
            interface_stable_id: Some(TypeStableId::new("asm", "IEnumerable`1")),
        }));
        graph.insert_type("App", derived).unwrap();

        run(&mut graph);

        let derived = graph.type_by_stable_id(&TypeStableId::new("asm", "IStringEnumerable")).unwrap();
        assert!(derived.interfaces.is_empty());
        assert_eq!(derived.members.methods.len(), 1);
        assert_eq!(derived.members.methods[0].return_type.canonical_name(), "System.String");
    }
}
