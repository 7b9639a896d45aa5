//! 4.2.11 — View planner. Collects all view-only members grouped by
//! source-interface stable id, validates no id appears twice in the same
//! group, and attaches each group as an explicit view to its owning
//! type. Must run after every source of view-only members (structural
//! conformance, explicit-implementation synthesis) and before the
//! class-surface deduplicator, which demotes rivals into views that must
//! already exist to receive them.

use clrbind_common::diagnostics::{codes, DiagnosticBag};
use clrbind_model::view::derive_view_property_name;
use clrbind_model::{EmitScope, ExplicitView, SymbolGraph, TypeStableId};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Per-type lookup from interface short name/arity/closed-argument names,
/// supplied by the caller since the interface symbol itself may already
/// have been flattened away by the time this pass runs.
pub struct InterfaceDescriptor {
    pub short_name: String,
    pub arity: u8,
    pub closed_type_argument_names: Vec<String>,
}

pub fn run(
    graph: &mut SymbolGraph,
    interface_descriptors: &IndexMap<TypeStableId, InterfaceDescriptor>,
    diagnostics: &mut DiagnosticBag,
) {
    for ty in graph.types_mut() {
        let mut groups: IndexMap<TypeStableId, Vec<&clrbind_model::MemberStableId>> = IndexMap::new();

        for common in ty.members.all_common() {
            if common.emit_scope != EmitScope::ViewOnly {
                continue;
            }
            let Some(source) = &common.source_interface else {
                diagnostics.error(
                    codes::VIEW_003_MISSING_SOURCE_INTERFACE,
                    format!("view-only member {} has no source interface", common.stable_id),
                );
                continue;
            };
            groups.entry(source.clone()).or_default().push(&common.stable_id);
        }

        let mut new_views = Vec::new();
        for (interface_id, member_ids) in groups {
            let mut seen = HashSet::new();
            let mut deduped = Vec::new();
            for id in member_ids {
                if seen.insert(id.clone()) {
                    deduped.push(id.clone());
                } else {
                    diagnostics.error(
                        codes::VIEW_002_MEMBER_IN_MULTIPLE_VIEWS,
                        format!("{id} appears twice in the view group for {interface_id}"),
                    );
                }
            }
            if deduped.is_empty() {
                diagnostics.error(codes::VIEW_001_EMPTY_VIEW, format!("empty view group for {interface_id}"));
                continue;
            }

            let property_name = match interface_descriptors.get(&interface_id) {
                Some(d) => derive_view_property_name(&d.short_name, d.arity, &d.closed_type_argument_names),
                None => derive_view_property_name(interface_id.clr_full_name(), 0, &[]),
            };

            let mut view = ExplicitView::new(interface_id, property_name);
            view.members = deduped;
            new_views.push(view);
        }

        ty.explicit_views = new_views;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clrbind_common::diagnostics::DiagnosticCategory;
    use clrbind_model::ids::MemberStableId;
    use clrbind_model::member::MethodSymbol;
    use clrbind_model::signature::CanonicalSignature;
    use clrbind_model::type_ref::TypeRef;
    use clrbind_model::type_symbol::TypeKind;
    use clrbind_model::TypeSymbol;

    fn view_only_method(type_full_name: &str, name: &str, source_interface: &TypeStableId) -> MethodSymbol {
        let sig = CanonicalSignature::for_method(&[], &TypeRef::named_simple("System.Void"));
        let mut common = clrbind_model::member::MemberCommon::new(MemberStableId::new("asm", type_full_name, name, &sig), name);
        common.emit_scope = EmitScope::ViewOnly;
        common.source_interface = Some(source_interface.clone());
        MethodSymbol {
            common,
            generic_parameters: vec![],
            parameters: Vec::new(),
            return_type: TypeRef::named_simple("System.Void"),
            is_static: false,
            is_abstract: false,
            is_virtual: false,
            signature: sig,
        }
    }

    #[test]
    fn view_only_members_sharing_a_source_interface_become_one_explicit_view() {
        let mut graph = SymbolGraph::new();
        let iface_id = TypeStableId::new("asm", "IWidget");
        let mut widget = TypeSymbol::new(TypeStableId::new("asm", "Widget"), TypeKind::Class);
        widget.members.methods.push(view_only_method("Widget", "Go", &iface_id));
        widget.members.methods.push(view_only_method("Widget", "Stop", &iface_id));
        graph.insert_type("Ns", widget).unwrap();

        let mut descriptors = IndexMap::new();
        descriptors.insert(
            iface_id.clone(),
            InterfaceDescriptor { short_name: "IWidget".to_string(), arity: 0, closed_type_argument_names: vec![] },
        );

        let mut diagnostics = DiagnosticBag::new();
        run(&mut graph, &descriptors, &mut diagnostics);

        assert!(diagnostics.entries().is_empty());
        let widget = graph.type_by_stable_id(&TypeStableId::new("asm", "Widget")).unwrap();
        assert_eq!(widget.explicit_views.len(), 1);
        assert_eq!(widget.explicit_views[0].view_property_name, "As_IWidget");
        assert_eq!(widget.explicit_views[0].members.len(), 2);
    }

    #[test]
    fn missing_interface_descriptor_falls_back_to_the_full_stable_id() {
        let mut graph = SymbolGraph::new();
        let iface_id = TypeStableId::new("asm", "Ns.IWidget");
        let mut widget = TypeSymbol::new(TypeStableId::new("asm", "Widget"), TypeKind::Class);
        widget.members.methods.push(view_only_method("Widget", "Go", &iface_id));
        graph.insert_type("Ns", widget).unwrap();

        let mut diagnostics = DiagnosticBag::new();
        run(&mut graph, &IndexMap::new(), &mut diagnostics);

        let widget = graph.type_by_stable_id(&TypeStableId::new("asm", "Widget")).unwrap();
        assert_eq!(widget.explicit_views.len(), 1);
        assert!(widget.explicit_views[0].view_property_name.contains("IWidget"));
    }

    #[test]
    fn view_only_member_without_a_source_interface_is_fatal() {
        let mut graph = SymbolGraph::new();
        let mut widget = TypeSymbol::new(TypeStableId::new("asm", "Widget"), TypeKind::Class);
        let sig = CanonicalSignature::for_method(&[], &TypeRef::named_simple("System.Void"));
        let mut common = clrbind_model::member::MemberCommon::new(MemberStableId::new("asm", "Widget", "Go", &sig), "Go");
        common.emit_scope = EmitScope::ViewOnly;
        widget.members.methods.push(MethodSymbol {
            common,
            generic_parameters: vec![],
            parameters: Vec::new(),
            return_type: TypeRef::named_simple("System.Void"),
            is_static: false,
            is_abstract: false,
            is_virtual: false,
            signature: sig,
        });
        graph.insert_type("Ns", widget).unwrap();

        let mut diagnostics = DiagnosticBag::new();
        run(&mut graph, &IndexMap::new(), &mut diagnostics);

        let entries = diagnostics.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].code, codes::VIEW_003_MISSING_SOURCE_INTERFACE);
        assert_eq!(entries[0].category, DiagnosticCategory::Error);
    }
}
