//! 4.2.2 — Structural conformance. For each class/struct and each
//! interface it implements, compares the class's class-surface against
//! the interface's substituted surface (inherited and owned) through
//! target-level assignability, not raw signature text: erased parameter
//! types must match exactly, while method and readonly-property return
//! types may be covariant (clrbind_model::assignability). Anything the
//! class doesn't satisfy gets a synthesised view-only clone carrying the
//! **interface's** member stable id, so later passes see a single
//! identity for it regardless of which interface demanded it. Runs right
//! after the first index build, before the interface inliner flattens
//! the hierarchy this pass still needs to see.

use super::synthesis::{clone_event_as_view, clone_method_as_view, clone_property_as_view};
use clrbind_index::{Indexes, SignatureEntry};
use clrbind_model::assignability::{erased_equal, is_assignable_to};
use clrbind_model::type_ref::TypeRef;
use clrbind_model::{EventSymbol, MethodSymbol, PropertySymbol, SymbolGraph, TypeKind, TypeStableId};

/// Find the member on `interface_id` (or an ancestor, resolved through
/// `indexes`) whose (name, signature) matches `entry`, so the synthesised
/// clone can carry a real body instead of a stub.
fn find_source_method<'a>(graph: &'a SymbolGraph, declaring: &TypeStableId, entry: &SignatureEntry) -> Option<&'a clrbind_model::MethodSymbol> {
    graph
        .type_by_stable_id(declaring)?
        .members
        .methods
        .iter()
        .find(|m| m.common.clr_name == entry.name && m.signature == entry.signature)
}

fn find_source_property<'a>(graph: &'a SymbolGraph, declaring: &TypeStableId, entry: &SignatureEntry) -> Option<&'a clrbind_model::PropertySymbol> {
    graph
        .type_by_stable_id(declaring)?
        .members
        .properties
        .iter()
        .find(|p| p.common.clr_name == entry.name && p.signature == entry.signature)
}

fn find_source_event<'a>(graph: &'a SymbolGraph, declaring: &TypeStableId, entry: &SignatureEntry) -> Option<&'a clrbind_model::EventSymbol> {
    graph
        .type_by_stable_id(declaring)?
        .members
        .events
        .iter()
        .find(|e| e.common.clr_name == entry.name && e.signature == entry.signature)
}

/// Parameters are always invariant (erased types must match exactly, in
/// order, with the same by-ref/in/out/params modifier); the return type
/// may be covariant since `candidate` is what actually gets called.
fn method_satisfies(candidate: &MethodSymbol, required: &MethodSymbol, graph: &SymbolGraph) -> bool {
    candidate.common.clr_name == required.common.clr_name
        && candidate.generic_parameters.len() == required.generic_parameters.len()
        && candidate.parameters.len() == required.parameters.len()
        && candidate
            .parameters
            .iter()
            .zip(&required.parameters)
            .all(|(c, r)| c.modifier == r.modifier && erased_equal(&c.ty, &r.ty))
        && is_assignable_to(&candidate.return_type, &required.return_type, graph)
}

/// Index parameters are invariant. The property type itself is covariant
/// only when the interface declares the property readonly (no setter to
/// smuggle a narrower value through); a writable property must match
/// exactly in both directions.
fn property_satisfies(candidate: &PropertySymbol, required: &PropertySymbol, graph: &SymbolGraph) -> bool {
    if candidate.common.clr_name != required.common.clr_name || candidate.index_parameters.len() != required.index_parameters.len() {
        return false;
    }
    let params_match = candidate
        .index_parameters
        .iter()
        .zip(&required.index_parameters)
        .all(|(c, r)| erased_equal(&c.ty, &r.ty));
    if !params_match {
        return false;
    }
    if required.is_readonly_surface {
        is_assignable_to(&candidate.property_type, &required.property_type, graph)
    } else {
        erased_equal(&candidate.property_type, &required.property_type)
    }
}

/// Events carry no variance allowance: the handler delegate type must
/// match exactly.
fn event_satisfies(candidate: &EventSymbol, required: &EventSymbol) -> bool {
    candidate.common.clr_name == required.common.clr_name && erased_equal(&candidate.handler_type, &required.handler_type)
}

pub fn run(graph: &mut SymbolGraph, indexes: &Indexes) {
    let class_ids: Vec<TypeStableId> = graph
        .types()
        .filter(|t| matches!(t.kind, TypeKind::Class | TypeKind::Struct))
        .map(|t| t.stable_id.clone())
        .collect();

    for class_id in class_ids {
        let ty = graph.type_by_stable_id(&class_id).unwrap();
        let interfaces = ty.interfaces.clone();
        let mut new_methods = Vec::new();
        let mut new_properties = Vec::new();
        let mut new_events = Vec::new();

        for iface in &interfaces {
            let TypeRef::Named(named) = iface else { continue };
            let interface_id = named.stable_id();
            let Some(surface) = indexes.interface_surface(&interface_id) else { continue };

            for entry in surface {
                let declaring = indexes
                    .resolve_declaring_interface(graph, &interface_id, entry)
                    .unwrap_or_else(|| interface_id.clone());
                let ty = graph.type_by_stable_id(&class_id).unwrap();

                if let Some(required) = find_source_method(graph, &declaring, entry) {
                    let satisfied = ty.members.methods.iter().any(|m| method_satisfies(m, required, graph));
                    if !satisfied {
                        new_methods.push(clone_method_as_view(required, &interface_id));
                    }
                } else if let Some(required) = find_source_property(graph, &declaring, entry) {
                    let satisfied = ty.members.properties.iter().any(|p| property_satisfies(p, required, graph));
                    if !satisfied {
                        new_properties.push(clone_property_as_view(required, &interface_id));
                    }
                } else if let Some(required) = find_source_event(graph, &declaring, entry) {
                    let satisfied = ty.members.events.iter().any(|e| event_satisfies(e, required));
                    if !satisfied {
                        new_events.push(clone_event_as_view(required, &interface_id));
                    }
                }
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

    fn abstract_method_returning(declaring: &str, name: &str, return_type: &TypeRef) -> MethodSymbol {
        let sig = CanonicalSignature::for_method(&[], return_type);
        let mut common = MemberCommon::new(MemberStableId::new("asm", declaring, name, &sig), name);
        common.emit_scope = EmitScope::ClassSurface;
        MethodSymbol {
            common,
            generic_parameters: vec![],
            parameters: Vec::<ParameterSymbol>::new(),
            return_type: return_type.clone(),
            is_static: false,
            is_abstract: true,
            is_virtual: false,
            signature: sig,
        }
    }

    fn named_ref(namespace: &str, simple_name: &str) -> TypeRef {
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
    fn synthesises_a_view_only_clone_for_an_unsatisfied_interface_member() {
        let mut graph = SymbolGraph::new();
        let mut iface = TypeSymbol::new(TypeStableId::new("asm", "IRunner"), TypeKind::Interface);
        iface.members.methods.push(abstract_method("IRunner", "Run"));
        graph.insert_type("App", iface).unwrap();

        let mut class = TypeSymbol::new(TypeStableId::new("asm", "App.Widget"), TypeKind::Class);
        class.interfaces.push(TypeRef::Named(NamedTypeRef {
            assembly: "asm".into(),
            namespace: "".into(),
            simple_name: "IRunner".into(),
            arity: 0,
            type_arguments: vec![],
            interface_stable_id: Some(TypeStableId::new("asm", "IRunner")),
        }));
        graph.insert_type("App", class).unwrap();

        let indexes = Indexes::build(&graph);
        run(&mut graph, &indexes);

        let class = graph.type_by_stable_id(&TypeStableId::new("asm", "App.Widget")).unwrap();
        assert_eq!(class.members.methods.len(), 1);
        assert_eq!(class.members.methods[0].common.emit_scope, EmitScope::ViewOnly);
        assert_eq!(class.members.methods[0].common.source_interface, Some(TypeStableId::new("asm", "IRunner")));
    }

    /// A class method whose return type is a strict subtype of what the
    /// interface declares already satisfies it (covariant return); no
    /// duplicate view-only clone should be synthesised for it.
    #[test]
    fn covariant_return_type_satisfies_without_a_duplicate_view() {
        let mut graph = SymbolGraph::new();
        graph.insert_type("App", TypeSymbol::new(TypeStableId::new("asm", "App.Base"), TypeKind::Class)).unwrap();

        let mut derived_ty = TypeSymbol::new(TypeStableId::new("asm", "App.Derived"), TypeKind::Class);
        derived_ty.base_type = Some(named_ref("App", "Base"));
        graph.insert_type("App", derived_ty).unwrap();

        let mut iface = TypeSymbol::new(TypeStableId::new("asm", "IFactory"), TypeKind::Interface);
        iface
            .members
            .methods
            .push(abstract_method_returning("IFactory", "Create", &named_ref("App", "Base")));
        graph.insert_type("App", iface).unwrap();

        let mut class = TypeSymbol::new(TypeStableId::new("asm", "App.Widget"), TypeKind::Class);
        class.interfaces.push(TypeRef::Named(NamedTypeRef {
            assembly: "asm".into(),
            namespace: "".into(),
            simple_name: "IFactory".into(),
            arity: 0,
            type_arguments: vec![],
            interface_stable_id: Some(TypeStableId::new("asm", "IFactory")),
        }));
        class
            .members
            .methods
            .push(abstract_method_returning("App.Widget", "Create", &named_ref("App", "Derived")));
        graph.insert_type("App", class).unwrap();

        let indexes = Indexes::build(&graph);
        run(&mut graph, &indexes);

        let class = graph.type_by_stable_id(&TypeStableId::new("asm", "App.Widget")).unwrap();
        assert_eq!(class.members.methods.len(), 1);
        assert_eq!(class.members.methods[0].common.emit_scope, EmitScope::ClassSurface);
    }
}
