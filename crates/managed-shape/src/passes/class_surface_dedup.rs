//! 4.2.12 — Class-surface deduplicator. After view planning, groups
//! class-surface properties by their post-style-transform name. In any
//! group larger than one, picks a winner and demotes the rest to
//! view-only, attaching them to the interface they came from.

use clrbind_model::member::Provenance;
use clrbind_model::type_ref::TypeRef;
use clrbind_model::{EmitScope, PropertySymbol, SymbolGraph, TypeStableId};
use std::cmp::Ordering;

/// Rank a property for winner selection (§4.2.12): non-synthesised beats
/// synthesised, generic-parameterised beats concrete, a narrower type
/// beats `System.Object`, then a lexicographically stable tie-break on
/// stable id.
fn winner_rank(p: &PropertySymbol) -> (u8, u8, u8, &str) {
    let synthesis_rank = if p.common.provenance == Provenance::Original { 0 } else { 1 };
    let generic_rank = if matches!(p.property_type, TypeRef::GenericParameter { .. }) { 0 } else { 1 };
    let object_rank = if p.property_type.canonical_name() == "System.Object" { 1 } else { 0 };
    (synthesis_rank, generic_rank, object_rank, p.common.stable_id.as_str())
}

fn is_better(a: &PropertySymbol, b: &PropertySymbol) -> bool {
    winner_rank(a).cmp(&winner_rank(b)) == Ordering::Less
}

pub fn run(graph: &mut SymbolGraph, style: impl Fn(&str) -> String) {
    for ty in graph.types_mut() {
        let class_surface_indices: Vec<usize> = ty
            .members
            .properties
            .iter()
            .enumerate()
            .filter(|(_, p)| p.common.emit_scope == EmitScope::ClassSurface)
            .map(|(i, _)| i)
            .collect();

        let mut groups: std::collections::HashMap<String, Vec<usize>> = std::collections::HashMap::new();
        for &idx in &class_surface_indices {
            let styled = style(&ty.members.properties[idx].common.clr_name);
            groups.entry(styled).or_default().push(idx);
        }

        for (_name, indices) in groups {
            if indices.len() < 2 {
                continue;
            }
            let winner_idx = *indices
                .iter()
                .reduce(|best, candidate| {
                    if is_better(&ty.members.properties[*candidate], &ty.members.properties[*best]) {
                        candidate
                    } else {
                        best
                    }
                })
                .unwrap();

            for &idx in &indices {
                if idx == winner_idx {
                    continue;
                }
                let property = &mut ty.members.properties[idx];
                property.common.emit_scope = EmitScope::ViewOnly;
                let source = property
                    .common
                    .source_interface
                    .clone()
                    .unwrap_or_else(|| ty.stable_id.clone());
                property.common.source_interface = Some(source);
            }
        }
    }
}
