//! Policy compliance rule family (spec.md §4.7): configured skips and
//! overrides actually took effect -- a skipped namespace contributes no
//! types to the emitted graph, a skipped member never reached a surface
//! scope, and a `typeRenames` override is reflected in the type's final
//! name.

use clrbind_common::diagnostics::{codes, DiagnosticBag};
use clrbind_common::policy::Policy;
use clrbind_model::member::EmitScope;
use clrbind_model::SymbolGraph;

pub fn run(graph: &SymbolGraph, policy: &Policy, diagnostics: &mut DiagnosticBag) {
    for ns in graph.namespaces_sorted() {
        if policy.is_namespace_skipped(&ns.name) && !ns.types.is_empty() {
            diagnostics.error(
                codes::API_001_INTERNAL_LEAK,
                format!("namespace {} is configured skipped but still contributes {} type(s)", ns.name, ns.types.len()),
            );
        }
    }

    for ty in graph.types() {
        for common in ty.members.all_common() {
            if policy.is_member_skipped(common.stable_id.as_str()) && common.emit_scope != EmitScope::Omitted {
                diagnostics.error(
                    codes::API_001_INTERNAL_LEAK,
                    format!("{} is configured skipped but emit scope is {:?}", common.stable_id, common.emit_scope),
                );
            }
        }

        if let Some(override_name) = policy.type_rename(ty.stable_id.clr_full_name()) {
            if ty.target_emit_name.as_deref() != Some(override_name) {
                diagnostics.error(
                    codes::PRINT_001_NAME_MISMATCH,
                    format!("{} has a typeRenames override to '{override_name}' that was not applied", ty.stable_id),
                );
            }
        }
    }
}
