//! 4.2.10 — Member deduplicator (general). A safety net: several
//! preceding passes may synthesise the same member twice, so this pass
//! removes exact duplicates by member stable id.

use clrbind_model::SymbolGraph;
use std::collections::HashSet;

pub fn run(graph: &mut SymbolGraph) {
    for ty in graph.types_mut() {
        let mut seen = HashSet::new();
        ty.members.methods.retain(|m| seen.insert(m.common.stable_id.clone()));
        let mut seen = HashSet::new();
        ty.members.properties.retain(|p| seen.insert(p.common.stable_id.clone()));
        let mut seen = HashSet::new();
        ty.members.fields.retain(|f| seen.insert(f.common.stable_id.clone()));
        let mut seen = HashSet::new();
        ty.members.events.retain(|e| seen.insert(e.common.stable_id.clone()));
        let mut seen = HashSet::new();
        ty.members.constructors.retain(|c| seen.insert(c.common.stable_id.clone()));
    }
}
