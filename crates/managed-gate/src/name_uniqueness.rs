//! Name uniqueness rule family (spec.md §4.7). Cross-checks that the
//! Renamer never actually let two different stable ids share one emitted
//! name within the same surface scope -- the Renamer's own collision
//! resolution is supposed to prevent this; this family is the audit that
//! catches a bug in that resolution rather than trusting it blindly.

use clrbind_common::diagnostics::{codes, DiagnosticBag};
use clrbind_model::type_symbol::TypeSymbol;
use clrbind_model::SymbolGraph;
use clrbind_rename::scope::{NamespaceVisibility, ScopeKey, Staticness};
use clrbind_rename::Renamer;
use indexmap::IndexMap;

pub fn run(graph: &SymbolGraph, renamer: &Renamer, diagnostics: &mut DiagnosticBag) {
    check_type_names(graph, renamer, diagnostics);
    for ty in graph.types() {
        check_surface(ty, Staticness::Instance, renamer, diagnostics);
        check_surface(ty, Staticness::Static, renamer, diagnostics);
    }
}

fn check_type_names(graph: &SymbolGraph, renamer: &Renamer, diagnostics: &mut DiagnosticBag) {
    for ns in graph.namespaces_sorted() {
        for visibility in [NamespaceVisibility::Public, NamespaceVisibility::Internal] {
            let scope = ScopeKey::namespace(&ns.name, visibility);
            let mut by_name: IndexMap<&str, &str> = IndexMap::new();
            for decision in renamer.decisions_in_scope(&scope) {
                if let Some(prior) = by_name.insert(&decision.emitted_name, &decision.clr_name) {
                    if prior != decision.clr_name {
                        diagnostics.error(
                            codes::NAME_005_SURFACE_NAME_COLLISION,
                            format!("namespace {} has two type names resolving to '{}'", ns.name, decision.emitted_name),
                        );
                    }
                }
            }
        }
    }
}

fn check_surface(ty: &TypeSymbol, staticness: Staticness, renamer: &Renamer, diagnostics: &mut DiagnosticBag) {
    let scope = ScopeKey::class_surface(ty.stable_id.clr_full_name(), staticness);
    let mut by_name: IndexMap<&str, &str> = IndexMap::new();
    for decision in renamer.decisions_in_scope(&scope) {
        if let Some(prior) = by_name.insert(&decision.emitted_name, &decision.clr_name) {
            if prior != decision.clr_name {
                diagnostics.error(
                    codes::NAME_005_SURFACE_NAME_COLLISION,
                    format!("{} has two class-surface members resolving to '{}'", ty.stable_id, decision.emitted_name),
                );
            }
        }
    }

    // NAME_004: a view-scope name must never shadow this same type's
    // class surface -- the $view suffixing in Name Reservation is the
    // mechanism; this checks its output held.
    for view in &ty.explicit_views {
        let view_scope = ScopeKey::view_surface_for(&ty.stable_id, &view.source_interface, staticness);
        for decision in renamer.decisions_in_scope(&view_scope) {
            if by_name.contains_key(decision.emitted_name.as_str()) {
                diagnostics.error(
                    codes::NAME_004_VIEW_SHADOWS_SURFACE,
                    format!("{} view member '{}' shadows a class-surface name", ty.stable_id, decision.emitted_name),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clrbind_common::policy::Policy;
    use clrbind_model::ids::TypeStableId;
    use clrbind_model::TypeKind;
    use clrbind_rename::renamer::{Kind, ReservationRequest};

    #[test]
    fn renamer_collision_resolution_leaves_no_audit_failure() {
        // Two distinct CLR names that would both style-transform to the
        // same override candidate are exactly what the Renamer's own
        // collision resolution (§4.3 step 4) exists to prevent; this
        // audit should find nothing wrong with its output.
        let mut graph = SymbolGraph::new();
        let ty = TypeSymbol::new(TypeStableId::new("asm", "App.Widget"), TypeKind::Class);
        graph.insert_type("App", ty).unwrap();

        let mut renamer = Renamer::new();
        let mut diagnostics = DiagnosticBag::new();
        let policy = Policy::default();
        let scope = ScopeKey::class_surface("App.Widget", Staticness::Instance);
        let first = renamer.reserve(
            ReservationRequest { scope: scope.clone(), clr_name: "Run", kind: Kind::Member, override_name: Some("go"), interface_qualifier: None },
            &policy,
            &mut diagnostics,
        );
        let second = renamer.reserve(
            ReservationRequest { scope, clr_name: "Execute", kind: Kind::Member, override_name: Some("go"), interface_qualifier: None },
            &policy,
            &mut diagnostics,
        );
        assert_ne!(first, second);

        let graph_ty = graph.types().next().unwrap().clone();
        check_surface(&graph_ty, Staticness::Instance, &renamer, &mut diagnostics);
        assert!(!diagnostics.has_errors());
    }
}
