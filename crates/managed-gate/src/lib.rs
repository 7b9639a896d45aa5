//! Phase Gate (spec.md §4.7): the single cut-point before Emit. Runs
//! every rule family against the fully-named, post-Plan graph, then
//! writes the deterministic diagnostic file and the machine-readable
//! summary (spec.md §6) regardless of outcome.

pub mod constraints;
pub mod finalisation;
pub mod import_export;
pub mod name_uniqueness;
pub mod overload_collisions;
pub mod policy_compliance;
pub mod scope_integrity;
pub mod type_references;
pub mod view_integrity;

use clrbind_common::diagnostics::DiagnosticBag;
use clrbind_common::error::{BuildError, BuildResult};
use clrbind_common::policy::Policy;
use clrbind_model::SymbolGraph;
use clrbind_plan::PlanResult;
use clrbind_rename::Renamer;
use std::path::Path;

pub struct GateOutcome {
    pub diagnostics_path: std::path::PathBuf,
    pub summary_path: std::path::PathBuf,
    pub error_count: usize,
}

/// Run every rule family in §4.7's listed order, then write the two
/// output files. Returns `Ok` even when errors were found -- the caller
/// decides whether to skip Emit by checking `diagnostics.has_errors()`
/// (or the returned `error_count`), matching "Emit never runs in that
/// case" without Phase Gate itself needing to know about Emit.
pub fn run_phase_gate(
    graph: &SymbolGraph,
    renamer: &Renamer,
    policy: &Policy,
    plan: &PlanResult,
    diagnostics: &mut DiagnosticBag,
    out_dir: &Path,
) -> BuildResult<GateOutcome> {
    tracing::info_span!("phase_gate").in_scope(|| {
        finalisation::run(graph, diagnostics);
        name_uniqueness::run(graph, renamer, diagnostics);
        view_integrity::run(graph, diagnostics);
        scope_integrity::run(graph, renamer, diagnostics);
        type_references::run(graph, renamer, diagnostics);
        import_export::run(graph, &plan.import_graph, &plan.import_aliases, diagnostics);
        constraints::run(&plan.constraint_losses, diagnostics);
        overload_collisions::run(graph, diagnostics);
        policy_compliance::run(graph, policy, diagnostics);
    });

    let snapshot = diagnostics.snapshot();
    let error_count = snapshot.iter().filter(|d| d.category.is_blocking()).count();

    let diagnostics_path = out_dir.join(".phasegate-diagnostics.txt");
    let summary_path = out_dir.join(".phasegate-summary.json");

    write_diagnostics_file(&diagnostics_path, &snapshot)?;
    write_summary_file(&summary_path, diagnostics)?;

    if error_count > 0 {
        tracing::warn!(error_count, "phase gate recorded blocking diagnostics; emit will be skipped");
    } else {
        tracing::info!("phase gate passed with no blocking diagnostics");
    }

    Ok(GateOutcome { diagnostics_path, summary_path, error_count })
}

fn write_diagnostics_file(path: &Path, snapshot: &[clrbind_common::diagnostics::Diagnostic]) -> BuildResult<()> {
    let mut body = String::new();
    for d in snapshot {
        let location = match (&d.location.type_stable_id, &d.location.member_stable_id) {
            (Some(ty), Some(member)) => format!(" [{ty} :: {member}]"),
            (Some(ty), None) => format!(" [{ty}]"),
            _ => String::new(),
        };
        body.push_str(&format!("{:?}\t{}\t{}{}\n", d.category, d.code, d.message, location));
    }
    std::fs::write(path, body).map_err(|source| BuildError::OutputWrite { path: path.display().to_string(), source })
}

fn write_summary_file(path: &Path, diagnostics: &DiagnosticBag) -> BuildResult<()> {
    let counts = diagnostics.counts_by_code();
    let summary: Vec<serde_json::Value> = counts
        .into_iter()
        .map(|(code, count)| serde_json::json!({ "code": code, "count": count }))
        .collect();
    let text = serde_json::to_string_pretty(&serde_json::json!({ "counts": summary, "errorCount": diagnostics.entries().iter().filter(|d| d.category.is_blocking()).count() }))
        .expect("summary JSON is always serializable");
    std::fs::write(path, text).map_err(|source| BuildError::OutputWrite { path: path.display().to_string(), source })
}
