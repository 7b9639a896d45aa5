//! The concrete [`MetadataSource`] this binary runs against.
//!
//! spec.md §1 treats "the physical reading of assembly bytes" as an
//! external collaborator the CLI does not implement -- a production build
//! wires `clrbind-reflect`'s trait to a real metadata reader (see
//! `clrbind-reflect::metadata`'s note on the `dotscope`/`cilium` family).
//! What this crate provides instead is a metadata *fixture* format: each
//! `--seed`/`--reference-path` entry is a JSON document deserializing
//! straight into `RawAssembly`, so the pipeline is runnable end to end
//! against hand-authored or tooling-exported fixtures without a real
//! reflection facility on hand.

use clrbind_model::AssemblyKey;
use clrbind_reflect::{MetadataSource, RawAssembly};
use std::path::PathBuf;

/// Resolves `--seed` paths directly; resolves referenced assembly names by
/// looking for `<name>.json` under each `--reference-path` directory, in
/// the order they were given.
pub struct FixtureSource {
    reference_dirs: Vec<PathBuf>,
}

impl FixtureSource {
    pub fn new(reference_dirs: Vec<PathBuf>) -> Self {
        Self { reference_dirs }
    }

    fn read(&self, path: &str) -> Option<RawAssembly> {
        let text = std::fs::read_to_string(path).ok()?;
        serde_json::from_str(&text).ok()
    }
}

impl MetadataSource for FixtureSource {
    fn scan_references(&self, path: &str) -> Option<(AssemblyKey, Vec<String>)> {
        self.read(path).map(|a| (a.key, a.referenced_assembly_names))
    }

    fn load_assembly(&self, path: &str) -> Option<RawAssembly> {
        self.read(path)
    }

    fn resolve_path(&self, assembly_name: &str) -> Option<String> {
        self.reference_dirs.iter().find_map(|dir| {
            let candidate = dir.join(format!("{assembly_name}.json"));
            candidate.is_file().then(|| candidate.display().to_string())
        })
    }
}

/// `--seed` paths are used verbatim as the closure walk's starting queue;
/// this just normalises them to owned strings for `clrbind_reflect::load_graph`.
pub fn seed_path_strings(seeds: &[PathBuf]) -> Vec<String> {
    seeds.iter().map(|p| p.display().to_string()).collect()
}
