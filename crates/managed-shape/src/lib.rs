//! Shape: the sixteen structural rewrite passes between Normalize and
//! Name Reservation (spec.md §4.2). Two of the sixteen — the global
//! interface index/declared-only index (4.2.1) and the interface
//! resolver (4.2.6) — live in `clrbind-index` since every later pass
//! consults them as read-only lookups rather than running once in
//! sequence; the other fourteen are ordered passes in [`passes`].

pub mod passes;

use clrbind_common::diagnostics::DiagnosticBag;
use clrbind_common::policy::Policy;
use clrbind_index::Indexes;
use clrbind_model::SymbolGraph;
use clrbind_rename::Renamer;
use indexmap::IndexMap;
use passes::view_planner::InterfaceDescriptor;

/// The outcome of a full Shape run: the rewritten graph plus the
/// diamond-conflict findings the caller may want to fold into Phase
/// Gate's summary.
pub struct ShapeResult {
    pub diamond_conflicts: Vec<passes::diamond::DiamondConflict>,
}

/// Run all fourteen ordered Shape passes plus the two index-backed
/// lookups, mutating `graph` and `renamer` in place.
///
/// Ordering follows spec.md §4.2's dependency notes with one resolved
/// ambiguity: the spec says view planning (4.2.11) must run "before"
/// surface dedup (4.2.12) since dedup needs an existing view to demote
/// members into, but our [`passes::view_planner::run`] rebuilds every
/// type's view set from scratch on each call (it groups whatever
/// view-only members currently exist, it never incrementally appends).
/// Given that, running it once — after dedup has finished demoting
/// rivals — produces the same final views without needing a second
/// pass, so that's the order used here (recorded as an Open Question
/// resolution in `DESIGN.md`).
pub fn run_shape_pipeline(
    graph: &mut SymbolGraph,
    renamer: &mut Renamer,
    policy: &Policy,
    interface_descriptors: &IndexMap<clrbind_model::TypeStableId, InterfaceDescriptor>,
    diagnostics: &mut DiagnosticBag,
) -> ShapeResult {
    // 4.2.1: first index build, over the still-hierarchical interfaces.
    let pre_flatten_indexes = Indexes::build(graph);

    // 4.2.2: structural conformance, needs the hierarchy intact.
    tracing::info_span!("shape.conformance").in_scope(|| {
        passes::conformance::run(graph, &pre_flatten_indexes);
    });

    // 4.2.7: diamond detection, also needs the hierarchy intact — it
    // inspects each type's direct interface list, which 4.2.3 clears.
    let diamond_conflicts = tracing::info_span!("shape.diamond")
        .in_scope(|| passes::diamond::run(graph, &pre_flatten_indexes, policy.interfaces.diamond_resolution, diagnostics));

    // 4.2.4: strip runtime-internal interfaces before they get flattened
    // or synthesised against.
    tracing::info_span!("shape.internal_filter").in_scope(|| {
        passes::internal_filter::run(graph);
    });

    // 4.2.3: flatten. From here on, `ty.interfaces` is empty for every
    // interface type; class/struct interface lists still list direct
    // interfaces, each now representing a fully flattened contract.
    tracing::info_span!("shape.inliner").in_scope(|| {
        passes::inliner::run(graph);
    });

    // 4.2.5: explicit-implementation synthesis against the flattened
    // interfaces.
    tracing::info_span!("shape.explicit_impl").in_scope(|| {
        passes::explicit_impl::run(graph);
    });

    // 4.2.8: base-overload completion.
    tracing::info_span!("shape.base_overload").in_scope(|| {
        passes::base_overload::run(graph);
    });

    // 4.2.9: read-only finding, no graph mutation.
    tracing::info_span!("shape.overload_conflict").in_scope(|| {
        passes::overload_conflict::run(graph, diagnostics);
    });

    // 4.2.10: safety-net dedup before view planning groups members.
    tracing::info_span!("shape.dedup").in_scope(|| {
        passes::dedup::run(graph);
    });

    // 4.2.12: class-surface dedup, demoting rivals to view-only.
    let member_style = |name: &str| clrbind_rename::style::apply_member_style(name, policy.naming.member_style);
    tracing::info_span!("shape.class_surface_dedup").in_scope(|| {
        passes::class_surface_dedup::run(graph, member_style);
    });

    // 4.2.11: view planning, run once now that every view-only member
    // (from conformance, explicit-impl synthesis, and surface dedup
    // demotion) already exists on the graph.
    tracing::info_span!("shape.view_planner").in_scope(|| {
        passes::view_planner::run(graph, interface_descriptors, diagnostics);
    });

    // 4.2.13: hidden-member name reservations.
    tracing::info_span!("shape.hidden_member").in_scope(|| {
        passes::hidden_member::run(graph, renamer, policy, diagnostics);
    });

    // 4.2.14: indexer planning + final sweep, in one pass per type.
    tracing::info_span!("shape.indexer").in_scope(|| {
        passes::indexer::run(graph, policy, diagnostics);
    });

    // 4.2.15: static-side shadow analysis.
    tracing::info_span!("shape.static_side").in_scope(|| {
        passes::static_side::run(graph, renamer, policy, diagnostics);
    });

    // 4.2.16: constraint closing.
    tracing::info_span!("shape.constraint_closer").in_scope(|| {
        passes::constraint_closer::run(graph, policy, diagnostics);
    });

    ShapeResult { diamond_conflicts }
}
