//! Import/export rule family (spec.md §4.7): the public API surface does
//! not leak internal types, every cross-namespace reference the import
//! graph found resolves to a real type in the graph, and every import a
//! namespace needs is represented in its alias table (re-exported).

use clrbind_common::diagnostics::{codes, DiagnosticBag};
use clrbind_model::ids::TypeStableId;
use clrbind_model::type_symbol::TypeAccessibility;
use clrbind_model::SymbolGraph;
use clrbind_plan::import_graph::CrossNamespaceReference;
use indexmap::{IndexMap, IndexSet};

pub fn run(
    graph: &SymbolGraph,
    references: &[CrossNamespaceReference],
    aliases: &IndexMap<(String, TypeStableId), String>,
    diagnostics: &mut DiagnosticBag,
) {
    for reference in references {
        let Some(target) = graph.type_by_stable_id(&reference.target_type) else {
            diagnostics.error(
                codes::IMPORT_001_UNRESOLVED_KEY,
                format!("{} references {} which does not resolve to any type in the graph", reference.source_type, reference.target_type),
            );
            continue;
        };

        if target.accessibility != TypeAccessibility::Public {
            diagnostics.error(
                codes::API_001_INTERNAL_LEAK,
                format!("{} is an internal type referenced from the public surface of {}", target.stable_id, reference.source_type),
            );
        }
    }

    check_reexport_collisions(graph, references, aliases, diagnostics);
}

/// EXPORT_001: when two distinct targets imported into the same namespace
/// resolve to the same simple emitted name, one of them must carry an
/// alias from `assign_aliases`; a collision with no alias on file means
/// Emit would silently shadow one import with the other.
fn check_reexport_collisions(
    graph: &SymbolGraph,
    references: &[CrossNamespaceReference],
    aliases: &IndexMap<(String, TypeStableId), String>,
    diagnostics: &mut DiagnosticBag,
) {
    let mut per_namespace: IndexMap<String, IndexSet<&TypeStableId>> = IndexMap::new();
    for reference in references {
        let importing_namespace = reference.source_type.open_generic_full_name();
        let importing_namespace = importing_namespace.rsplit_once('.').map(|(ns, _)| ns.to_string()).unwrap_or_default();
        per_namespace.entry(importing_namespace).or_default().insert(&reference.target_type);
    }

    for (importing_namespace, targets) in per_namespace {
        let mut by_simple_name: IndexMap<String, &TypeStableId> = IndexMap::new();
        for target in targets {
            let simple_name = match graph.type_by_stable_id(target).and_then(|t| t.target_emit_name.clone()) {
                Some(name) => name,
                None => continue,
            };
            if let Some(prior) = by_simple_name.insert(simple_name.clone(), target) {
                if prior != target && !aliases.contains_key(&(importing_namespace.clone(), target.clone())) {
                    diagnostics.error(
                        codes::EXPORT_001_MISSING_REEXPORT,
                        format!("namespace {importing_namespace} imports both {prior} and {target} as '{simple_name}' with no alias on file"),
                    );
                }
            }
        }
    }
}
