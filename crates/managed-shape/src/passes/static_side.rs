//! 4.2.15 — Static-side analyser. Identifies static members whose simple
//! names collide with those on an ancestor's static side: policy decides
//! whether to rename through the Renamer, warn only, or fail the build.

use clrbind_common::diagnostics::{codes, DiagnosticBag};
use clrbind_common::policy::{Policy, StaticSideAction};
use clrbind_model::type_ref::TypeRef;
use clrbind_model::SymbolGraph;
use clrbind_rename::{Kind, Renamer, ReservationRequest, ScopeKey, Staticness};
use std::collections::HashSet;

fn base_static_names(graph: &SymbolGraph, base: &TypeRef) -> Vec<String> {
    let TypeRef::Named(named) = base else { return Vec::new() };
    let Some(ancestor) = graph.type_by_stable_id(&named.stable_id()) else {
        return Vec::new();
    };
    let mut names: Vec<String> = ancestor
        .members
        .all_common()
        .iter()
        .filter(|c| c.emit_scope.is_static())
        .map(|c| c.clr_name.clone())
        .collect();
    if let Some(grandparent) = &ancestor.base_type {
        names.extend(base_static_names(graph, grandparent));
    }
    names
}

pub fn run(graph: &SymbolGraph, renamer: &mut Renamer, policy: &Policy, diagnostics: &mut DiagnosticBag) {
    for ty in graph.types() {
        let Some(base) = &ty.base_type else { continue };
        let ancestor_names: std::collections::HashSet<String> = base_static_names(graph, base).into_iter().collect();
        if ancestor_names.is_empty() {
            continue;
        }

        let type_full_name = ty.stable_id.clr_full_name();
        let mut own_static: HashSet<&str> = HashSet::new();
        for common in ty.members.all_common() {
            if common.emit_scope.is_static() {
                own_static.insert(&common.clr_name);
            }
        }

        for name in own_static {
            if !ancestor_names.contains(name) {
                continue;
            }
            match policy.static_side.action {
                StaticSideAction::AutoRename => {
                    let scope = ScopeKey::class_surface(type_full_name, Staticness::Static);
                    // Keyed by the plain CLR name so Name Reservation's
                    // later, unconditional per-member reservation for this
                    // same (scope, clr_name) pair hits `Renamer::reserve`'s
                    // idempotent short-circuit and returns this suffixed
                    // name instead of silently reserving a fresh,
                    // unsuffixed one (see hidden_member.rs for the same
                    // fix and the fuller explanation).
                    renamer.reserve(
                        ReservationRequest {
                            scope,
                            clr_name: name,
                            kind: Kind::Member,
                            override_name: Some(&format!("{name}_static")),
                            interface_qualifier: None,
                        },
                        policy,
                        diagnostics,
                    );
                    diagnostics.info(
                        codes::STATIC_001_SHADOW_RENAMED,
                        format!("{} static member '{name}' shadows an ancestor, renamed", ty.stable_id),
                    );
                }
                StaticSideAction::Analyse => {
                    diagnostics.info(
                        codes::STATIC_001_SHADOW_RENAMED,
                        format!("{} static member '{name}' shadows an ancestor", ty.stable_id),
                    );
                }
                StaticSideAction::Error => {
                    diagnostics.error(
                        codes::STATIC_002_SHADOW_FAILS_BUILD,
                        format!("{} static member '{name}' shadows an ancestor's static member", ty.stable_id),
                    );
                }
            }
        }
    }
}
