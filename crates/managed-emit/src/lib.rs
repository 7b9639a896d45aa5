//! Emit (spec.md §4.8-§5, final stage): deterministic textual rendering of
//! the validated, post-Gate graph into the on-disk layout spec.md §6
//! fixes -- a declaration file and a façade per namespace, a runtime stub,
//! two JSON sidecars, and one global support module. Never runs unless the
//! caller has already confirmed Phase Gate recorded no blocking diagnostic
//! (`clrbind-gate::GateOutcome::error_count == 0`); Emit itself does not
//! re-check that, matching Phase Gate's own "single cut-point" design.

pub mod bindings_sidecar;
pub mod declarations;
pub mod facade;
pub mod js_stub;
pub mod metadata_sidecar;
pub mod primitives;
pub mod support;
pub mod type_printer;
pub mod writer;

use clrbind_common::error::{BuildError, BuildResult};
use clrbind_model::SymbolGraph;
use clrbind_plan::import_graph::namespace_dir;
use clrbind_plan::PlanResult;
use std::path::{Path, PathBuf};

/// Declaration-file extension. The spec leaves `<decl>` abstract; this
/// crate's target surface is TypeScript-shaped ambient declarations, so it
/// resolves to `.d.ts` the way the rest of the toolchain already expects.
const DECL_EXT: &str = "d.ts";
const JS_EXT: &str = "js";

#[derive(Debug)]
pub struct EmitOutcome {
    pub files_written: Vec<PathBuf>,
}

/// How many directory levels a namespace's own files sit below `out_dir`,
/// for computing `_support`'s relative path the same way
/// `clrbind_plan::import_graph::relative_import_path` computes a sibling
/// namespace's.
pub(crate) fn support_depth(namespace: &str) -> usize {
    namespace_dir(namespace).split('/').count()
}

pub fn run_emit(graph: &SymbolGraph, plan: &PlanResult, out_dir: &Path) -> BuildResult<EmitOutcome> {
    tracing::info_span!("emit").in_scope(|| run_emit_inner(graph, plan, out_dir))
}

fn run_emit_inner(graph: &SymbolGraph, plan: &PlanResult, out_dir: &Path) -> BuildResult<EmitOutcome> {
    let mut files = Vec::new();

    let support_dir = out_dir.join("_support");
    let support_path = support_dir.join(format!("types.{DECL_EXT}"));
    write_file(&support_dir, &support_path, &support::render())?;
    files.push(support_path);

    for ns in graph.namespaces_sorted() {
        let dir = out_dir.join(namespace_dir(&ns.name));
        let internal_dir = dir.join("internal");

        let decls = declarations::render_namespace(graph, &ns.name, &plan.import_aliases)?;
        let internal_path = internal_dir.join(format!("index.{DECL_EXT}"));
        write_file(&internal_dir, &internal_path, &decls.content)?;
        files.push(internal_path);

        let facade_path = dir.join(format!("index.{DECL_EXT}"));
        write_file(&dir, &facade_path, &facade::render_namespace(graph, &ns.name))?;
        files.push(facade_path);

        let js_path = dir.join(format!("index.{JS_EXT}"));
        write_file(&dir, &js_path, &js_stub::render_namespace(&ns.name))?;
        files.push(js_path);

        let metadata_path = dir.join("metadata.json");
        write_file(&dir, &metadata_path, &metadata_sidecar::render_namespace(graph, &ns.name))?;
        files.push(metadata_path);

        let bindings_path = dir.join("bindings.json");
        write_file(&dir, &bindings_path, &bindings_sidecar::render_namespace(graph, &ns.name))?;
        files.push(bindings_path);
    }

    tracing::info!(file_count = files.len(), "emit complete");
    Ok(EmitOutcome { files_written: files })
}

fn write_file(dir: &Path, path: &Path, contents: &str) -> BuildResult<()> {
    std::fs::create_dir_all(dir).map_err(|source| BuildError::OutputWrite { path: dir.display().to_string(), source })?;
    std::fs::write(path, contents).map_err(|source| BuildError::OutputWrite { path: path.display().to_string(), source })
}
