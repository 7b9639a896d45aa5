//! Scope integrity rule family (spec.md §4.7): scope keys are
//! well-formed, and a member's recorded scope key always agrees with its
//! emit scope (a class-surface member must carry a `type:` key, a
//! view-only member a `view:` key, and so on).

use clrbind_common::diagnostics::{codes, DiagnosticBag};
use clrbind_model::member::EmitScope;
use clrbind_model::SymbolGraph;
use clrbind_rename::scope::ScopeKey;
use clrbind_rename::Renamer;

fn key_matches_emit_scope(key: &ScopeKey, emit_scope: EmitScope) -> bool {
    match emit_scope {
        EmitScope::ClassSurface | EmitScope::StaticSurface => key.is_class_scope(),
        EmitScope::ViewOnly => key.is_view_scope(),
        EmitScope::Unspecified | EmitScope::Omitted => true,
    }
}

pub fn run(graph: &SymbolGraph, renamer: &Renamer, diagnostics: &mut DiagnosticBag) {
    for ty in graph.types() {
        for common in ty.members.all_common() {
            if matches!(common.emit_scope, EmitScope::Unspecified | EmitScope::Omitted) {
                continue;
            }

            let candidate_scopes: Vec<ScopeKey> = match common.emit_scope {
                EmitScope::ClassSurface => vec![
                    ScopeKey::class_surface(ty.stable_id.clr_full_name(), clrbind_rename::scope::Staticness::Instance),
                ],
                EmitScope::StaticSurface => vec![
                    ScopeKey::class_surface(ty.stable_id.clr_full_name(), clrbind_rename::scope::Staticness::Static),
                ],
                EmitScope::ViewOnly => match &common.source_interface {
                    Some(iface) => vec![
                        ScopeKey::view_surface_for(&ty.stable_id, iface, clrbind_rename::scope::Staticness::Instance),
                        ScopeKey::view_surface_for(&ty.stable_id, iface, clrbind_rename::scope::Staticness::Static),
                    ],
                    None => continue,
                },
                EmitScope::Unspecified | EmitScope::Omitted => unreachable!(),
            };

            let found = candidate_scopes
                .iter()
                .any(|scope| renamer.lookup(scope, &common.clr_name).is_some() && key_matches_emit_scope(scope, common.emit_scope));

            if !found {
                diagnostics.error(
                    codes::SCOPE_002_SCOPE_EMIT_MISMATCH,
                    format!("{} has emit scope {:?} but no matching scope-key reservation", common.stable_id, common.emit_scope),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_surface_scope_key_is_recognised() {
        let key = ScopeKey::class_surface("App.Widget", clrbind_rename::scope::Staticness::Instance);
        assert!(key_matches_emit_scope(&key, EmitScope::ClassSurface));
        assert!(!key_matches_emit_scope(&key, EmitScope::ViewOnly));
    }
}
