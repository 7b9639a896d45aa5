//! Plan (spec.md §4.4-§4.6): Name Reservation, the overload unifier, and
//! the import graph / emit-order / constraint-auditor planner. Everything
//! here runs after Shape and before Phase Gate.

pub mod constraint_auditor;
pub mod import_graph;
pub mod overload_unifier;
pub mod reservation;

use clrbind_common::diagnostics::DiagnosticBag;
use clrbind_common::policy::Policy;
use clrbind_model::SymbolGraph;
use clrbind_rename::Renamer;
use indexmap::IndexMap;

pub struct PlanResult {
    pub import_graph: Vec<import_graph::CrossNamespaceReference>,
    pub import_aliases: IndexMap<(String, clrbind_model::ids::TypeStableId), String>,
    pub constraint_losses: Vec<constraint_auditor::ConstructorConstraintLoss>,
}

/// Run the three Plan stages in the only order the spec allows: names
/// must exist before the overload unifier's erasure key can be built,
/// and both must settle before the import graph resolves target emit
/// names for alias assignment.
pub fn run_plan_pipeline(graph: &mut SymbolGraph, renamer: &mut Renamer, policy: &Policy, diagnostics: &mut DiagnosticBag) -> PlanResult {
    tracing::info_span!("plan.reservation").in_scope(|| {
        reservation::run(graph, renamer, policy, diagnostics);
    });

    tracing::info_span!("plan.overload_unifier").in_scope(|| {
        overload_unifier::run(graph);
    });

    let import_graph = tracing::info_span!("plan.import_graph").in_scope(|| import_graph::build(graph, diagnostics));
    let import_aliases = import_graph::assign_aliases(graph, &import_graph);
    let constraint_losses = tracing::info_span!("plan.constraint_auditor").in_scope(|| constraint_auditor::run(graph, diagnostics));

    PlanResult { import_graph, import_aliases, constraint_losses }
}
