//! Wires Load through Emit into one run (SPEC_FULL.md §6, "CLI surface").
//! `clrbind-cli` is the only crate that calls every phase in sequence;
//! every other crate only knows its own neighbours.

use crate::args::CliArgs;
use crate::fixture_source::{seed_path_strings, FixtureSource};
use clrbind_common::diagnostics::DiagnosticBag;
use clrbind_common::error::{BuildError, BuildResult};
use clrbind_common::policy::Policy;
use clrbind_model::{TypeKind, TypeStableId};
use clrbind_rename::Renamer;
use clrbind_shape::passes::view_planner::InterfaceDescriptor;
use indexmap::IndexMap;

#[derive(Debug)]
pub struct RunOutcome {
    pub error_count: usize,
    pub diagnostics_path: std::path::PathBuf,
    pub summary_path: std::path::PathBuf,
    pub emitted_files: usize,
}

pub fn run(args: &CliArgs) -> BuildResult<RunOutcome> {
    let policy = load_policy(args.policy.as_deref())?;
    let source = FixtureSource::new(args.reference_paths.clone());
    let seeds = seed_path_strings(&args.seeds);

    let mut diagnostics = DiagnosticBag::new();

    let load_result = tracing::info_span!("load")
        .in_scope(|| clrbind_reflect::load_graph(&source, &seeds, args.strict_versions, &mut diagnostics))?;
    let mut graph = load_result.graph;

    let mut renamer = Renamer::new();
    let interface_descriptors = interface_descriptor_map(&graph);
    let shape_result =
        clrbind_shape::run_shape_pipeline(&mut graph, &mut renamer, &policy, &interface_descriptors, &mut diagnostics);
    tracing::info!(diamond_conflicts = shape_result.diamond_conflicts.len(), "shape complete");

    let plan = clrbind_plan::run_plan_pipeline(&mut graph, &mut renamer, &policy, &mut diagnostics);

    std::fs::create_dir_all(&args.out_dir)
        .map_err(|source| BuildError::OutputWrite { path: args.out_dir.display().to_string(), source })?;

    let gate_outcome =
        clrbind_gate::run_phase_gate(&graph, &renamer, &policy, &plan, &mut diagnostics, &args.out_dir)?;

    let emitted_files = if gate_outcome.error_count == 0 {
        clrbind_emit::run_emit(&graph, &plan, &args.out_dir)?.files_written.len()
    } else {
        tracing::warn!(error_count = gate_outcome.error_count, "skipping emit");
        0
    };

    Ok(RunOutcome {
        error_count: gate_outcome.error_count,
        diagnostics_path: gate_outcome.diagnostics_path,
        summary_path: gate_outcome.summary_path,
        emitted_files,
    })
}

fn load_policy(path: Option<&std::path::Path>) -> BuildResult<Policy> {
    let Some(path) = path else {
        return Ok(Policy::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|source| BuildError::PolicyRead { path: path.display().to_string(), source })?;
    serde_json::from_str(&text).map_err(|source| BuildError::PolicyParse { path: path.display().to_string(), source })
}

/// Builds the lookup Shape's view planner (4.2.11) needs to name
/// interface-derived views, from whatever interfaces Load has already put
/// in the graph.
///
/// `closed_type_argument_names` is always empty here: `TypeStableId`
/// carries an interface's open-generic arity but never the closed type
/// arguments a particular implementation closes it over (see ids.rs), and
/// nothing upstream of Shape records that association. The practical
/// effect is that `derive_view_property_name` always produces the
/// non-generic `As_InterfaceName` form, even for closed generic
/// interfaces that could in principle disambiguate further -- recorded as
/// a known limitation in DESIGN.md rather than worked around with a guess.
fn interface_descriptor_map(graph: &clrbind_model::SymbolGraph) -> IndexMap<TypeStableId, InterfaceDescriptor> {
    let mut map = IndexMap::new();
    for ty in graph.types() {
        if ty.kind != TypeKind::Interface {
            continue;
        }
        map.insert(
            ty.stable_id.clone(),
            InterfaceDescriptor {
                short_name: simple_name(ty.stable_id.clr_full_name()),
                arity: ty.arity(),
                closed_type_argument_names: Vec::new(),
            },
        );
    }
    map
}

/// `"App.Collections.IMap\`2"` -> `"IMap"`. Mirrors the namespace/arity
/// split `clrbind_reflect::extract::parse_type_ref` already does for
/// `TypeRef`s, applied here to a type's own full name instead of one it
/// refers to.
fn simple_name(clr_full_name: &str) -> String {
    let simple = clr_full_name.rsplit_once('.').map_or(clr_full_name, |(_, name)| name);
    simple.split_once('`').map_or(simple, |(base, _)| base).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_name_strips_namespace_and_generic_arity() {
        assert_eq!(simple_name("App.Collections.IMap`2"), "IMap");
        assert_eq!(simple_name("App.Widget"), "Widget");
        assert_eq!(simple_name("Widget"), "Widget");
    }
}
