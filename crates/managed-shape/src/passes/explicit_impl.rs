//! 4.2.5 — Explicit implementation synthesiser. Runs after the interface
//! inliner has flattened every implemented interface to a single,
//! already-substituted level. Collects every member required by every
//! interface a type implements; anything absent from the type (by member
//! stable id identity) becomes a synthesised view-only clone inheriting
//! the interface member's stable id. Deduplicates by stable id, since
//! several interfaces can demand the same member.

use super::synthesis::{clone_event_as_view, clone_method_as_view, clone_property_as_view};
use clrbind_model::type_ref::TypeRef;
use clrbind_model::{SymbolGraph, TypeKind, TypeStableId};
use std::collections::HashSet;

pub fn run(graph: &mut SymbolGraph) {
    let class_ids: Vec<TypeStableId> = graph
        .types()
        .filter(|t| matches!(t.kind, TypeKind::Class | TypeKind::Struct))
        .map(|t| t.stable_id.clone())
        .collect();

    for class_id in class_ids {
        let ty = graph.type_by_stable_id(&class_id).unwrap();
        let present: HashSet<_> = ty.members.all_common().iter().map(|c| c.stable_id.clone()).collect();
        let interfaces = ty.interfaces.clone();

        let mut new_methods = Vec::new();
        let mut new_properties = Vec::new();
        let mut new_events = Vec::new();
        let mut synthesized: HashSet<clrbind_model::MemberStableId> = HashSet::new();

        for iface in &interfaces {
            let TypeRef::Named(named) = iface else { continue };
            let interface_id = named.stable_id();
            let Some(interface_ty) = graph.type_by_stable_id(&interface_id) else { continue };

            for m in &interface_ty.members.methods {
                if present.contains(&m.common.stable_id) || !synthesized.insert(m.common.stable_id.clone()) {
                    continue;
                }
                new_methods.push(clone_method_as_view(m, &interface_id));
            }
            for p in &interface_ty.members.properties {
                if present.contains(&p.common.stable_id) || !synthesized.insert(p.common.stable_id.clone()) {
                    continue;
                }
                new_properties.push(clone_property_as_view(p, &interface_id));
            }
            for e in &interface_ty.members.events {
                if present.contains(&e.common.stable_id) || !synthesized.insert(e.common.stable_id.clone()) {
                    continue;
                }
                new_events.push(clone_event_as_view(e, &interface_id));
            }
        }

        if new_methods.is_empty() && new_properties.is_empty() && new_events.is_empty() {
            continue;
        }
        let ty = graph.type_by_stable_id_mut(&class_id).unwrap();
        ty.members.methods.extend(new_methods);
        ty.members.properties.extend(new_properties);
        ty.members.events.extend(new_events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clrbind_model::ids::MemberStableId;
    use clrbind_model::member::{MemberCommon, ParameterSymbol};
    use clrbind_model::signature::CanonicalSignature;
    use clrbind_model::type_ref::NamedTypeRef;
    use clrbind_model::{EmitScope, MethodSymbol, TypeSymbol};

    fn abstract_method(declaring: &str, name: &str) -> MethodSymbol {
        let sig = CanonicalSignature::for_method(&[], &TypeRef::named_simple("System.Void"));
        let mut common = MemberCommon::new(MemberStableId::new("asm", declaring, name, &sig), name);
        common.emit_scope = EmitScope::ClassSurface;
        MethodSymbol {
            common,
            generic_parameters: vec![],
            parameters: Vec::<ParameterSymbol>::new(),
            return_type: TypeRef::named_simple("System.Void"),
            is_static: false,
            is_abstract: true,
            is_virtual: false,
            signature: sig,
        }
    }

    #[test]
    fn two_interfaces_demanding_the_same_member_synthesise_only_once() {
        let mut graph = SymbolGraph::new();
        let shared = abstract_method("IShared", "Dispose");

        let mut iface_a = TypeSymbol::new(TypeStableId::new("asm", "IA"), TypeKind::Interface);
        iface_a.members.methods.push(shared.clone());
        graph.insert_type("App", iface_a).unwrap();
        let mut iface_b = TypeSymbol::new(TypeStableId::new("asm", "IB"), TypeKind::Interface);
        iface_b.members.methods.push(shared);
        graph.insert_type("App", iface_b).unwrap();

        let mut class = TypeSymbol::new(TypeStableId::new("asm", "App.Widget"), TypeKind::Class);
        for name in ["IA", "IB"] {
            class.interfaces.push(TypeRef::Named(NamedTypeRef {
                assembly: "asm".into(),
                namespace: "".into(),
                simple_name: name.into(),
                arity: 0,
                type_arguments: vec![],
                interface_stable_id: Some(TypeStableId::new("asm", name)),
            }));
        }
        graph.insert_type("App", class).unwrap();

        run(&mut graph);

        let class = graph.type_by_stable_id(&TypeStableId::new("asm", "App.Widget")).unwrap();
        assert_eq!(class.members.methods.len(), 1);
    }
}
