//! View integrity rule family (spec.md §4.7 / graph-wide invariants in
//! §3): every view non-empty, every view-only member in exactly one
//! view, view property names well-formed.

use clrbind_common::diagnostics::{codes, DiagnosticBag};
use clrbind_model::member::EmitScope;
use clrbind_model::ids::MemberStableId;
use clrbind_model::SymbolGraph;
use indexmap::IndexMap;

pub fn run(graph: &SymbolGraph, diagnostics: &mut DiagnosticBag) {
    for ty in graph.types() {
        let mut owner_of: IndexMap<&MemberStableId, &str> = IndexMap::new();

        for view in &ty.explicit_views {
            if view.is_empty() {
                diagnostics.error(
                    codes::VIEW_001_EMPTY_VIEW,
                    format!("{} has an explicit view for {} with no members", ty.stable_id, view.source_interface),
                );
            }
            if view.view_property_name.trim().is_empty() {
                diagnostics.error(codes::VIEW_001_EMPTY_VIEW, format!("{} has an explicit view with a blank property name", ty.stable_id));
            }

            for member in &view.members {
                if let Some(prior) = owner_of.insert(member, view.view_property_name.as_str()) {
                    diagnostics.error(
                        codes::VIEW_002_MEMBER_IN_MULTIPLE_VIEWS,
                        format!("{member} appears in both view '{prior}' and view '{}'", view.view_property_name),
                    );
                }
            }
        }

        for common in ty.members.all_common() {
            if common.emit_scope == EmitScope::ViewOnly && common.source_interface.is_none() {
                diagnostics.error(codes::VIEW_003_MISSING_SOURCE_INTERFACE, format!("{} is view-only but has no source interface", common.stable_id));
            }
            if common.emit_scope != EmitScope::ViewOnly && common.source_interface.is_some() {
                diagnostics.error(
                    codes::INT_003_CLASS_SURFACE_HAS_SOURCE_INTERFACE,
                    format!("{} carries a source interface outside view-only scope", common.stable_id),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clrbind_model::ids::TypeStableId;
    use clrbind_model::member::{MemberCommon, Provenance};
    use clrbind_model::view::ExplicitView;
    use clrbind_model::{TypeKind, TypeSymbol};

    #[test]
    fn empty_view_is_an_error() {
        let mut graph = SymbolGraph::new();
        let mut ty = TypeSymbol::new(TypeStableId::new("asm", "App.Widget"), TypeKind::Class);
        ty.explicit_views.push(ExplicitView::new(TypeStableId::new("asm", "App.IFoo"), "As_IFoo"));
        graph.insert_type("App", ty).unwrap();

        let mut diagnostics = DiagnosticBag::new();
        run(&graph, &mut diagnostics);
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn view_only_without_source_interface_is_an_error() {
        let mut graph = SymbolGraph::new();
        let mut ty = TypeSymbol::new(TypeStableId::new("asm", "App.Widget"), TypeKind::Class);
        let mut common = MemberCommon::new(
            MemberStableId::new("asm", "App.IFoo", "Bar", &clrbind_model::signature::CanonicalSignature::for_field_or_event(&clrbind_model::type_ref::TypeRef::named_simple("System.Int32"))),
            "Bar",
        );
        common.emit_scope = EmitScope::ViewOnly;
        common.provenance = Provenance::ExplicitView;
        let mut field = clrbind_model::member::FieldSymbol {
            common,
            field_type: clrbind_model::type_ref::TypeRef::named_simple("System.Int32"),
            is_static: false,
            is_readonly: false,
            signature: clrbind_model::signature::CanonicalSignature::for_field_or_event(&clrbind_model::type_ref::TypeRef::named_simple("System.Int32")),
        };
        field.common.source_interface = None;
        ty.members.fields.push(field);
        graph.insert_type("App", ty).unwrap();

        let mut diagnostics = DiagnosticBag::new();
        run(&graph, &mut diagnostics);
        assert!(diagnostics.has_errors());
    }
}
