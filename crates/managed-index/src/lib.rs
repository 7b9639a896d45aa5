//! Normalize: namespace/type lookup tables and the global interface
//! signature indexes Shape consults (spec.md §4.2.1).
//!
//! Indexes are rebuilt whenever a pass mutates types structurally
//! (spec.md §4.2): callers should treat an `Indexes` value as valid only
//! until the next structural mutation, then call [`Indexes::build`] again.

use clrbind_model::ids::TypeStableId;
use clrbind_model::signature::CanonicalSignature;
use clrbind_model::type_ref::TypeRef;
use clrbind_model::{SymbolGraph, TypeSymbol};
use indexmap::{IndexMap, IndexSet};

/// A member signature paired with the member's simple name, the unit the
/// interface index tracks (properties dedupe by name only elsewhere, but
/// the index itself tracks full (name, signature) pairs so both the
/// inliner and the conformance checker can use it).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SignatureEntry {
    pub name: String,
    pub signature: CanonicalSignature,
}

#[derive(Default)]
pub struct Indexes {
    namespace_by_name: IndexMap<String, Vec<TypeStableId>>,
    /// All signatures an interface exposes, inherited and owned.
    interface_all_signatures: IndexMap<TypeStableId, IndexSet<SignatureEntry>>,
    /// Signatures an interface itself declares (all minus ancestors').
    interface_declared_signatures: IndexMap<TypeStableId, IndexSet<SignatureEntry>>,
}

impl Indexes {
    pub fn build(graph: &SymbolGraph) -> Self {
        let mut namespace_by_name: IndexMap<String, Vec<TypeStableId>> = IndexMap::new();
        for ns in graph.namespaces() {
            namespace_by_name.insert(ns.name.clone(), ns.types.clone());
        }

        let mut all = IndexMap::new();
        let mut declared = IndexMap::new();
        for ty in graph.types() {
            if ty.kind != clrbind_model::type_symbol::TypeKind::Interface {
                continue;
            }
            let owned = owned_signatures(ty);
            let inherited = inherited_signatures(graph, ty);
            let mut combined = owned.clone();
            combined.extend(inherited.iter().cloned());
            declared.insert(ty.stable_id.clone(), owned);
            all.insert(ty.stable_id.clone(), combined);
        }

        Self {
            namespace_by_name,
            interface_all_signatures: all,
            interface_declared_signatures: declared,
        }
    }

    pub fn types_in_namespace(&self, namespace: &str) -> &[TypeStableId] {
        self.namespace_by_name.get(namespace).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn interface_surface(&self, interface_id: &TypeStableId) -> Option<&IndexSet<SignatureEntry>> {
        self.interface_all_signatures.get(interface_id)
    }

    pub fn interface_declared_surface(&self, interface_id: &TypeStableId) -> Option<&IndexSet<SignatureEntry>> {
        self.interface_declared_signatures.get(interface_id)
    }

    /// Which interface along the chain starting at `start` first declared
    /// `(name, signature)`, picking the most ancestral when several
    /// qualify (§4.2.6, interface resolver).
    pub fn resolve_declaring_interface(
        &self,
        graph: &SymbolGraph,
        start: &TypeStableId,
        entry: &SignatureEntry,
    ) -> Option<TypeStableId> {
        let mut candidates = Vec::new();
        collect_declaring_chain(graph, start, entry, &mut candidates);
        // Most ancestral = appears earliest in a root-first walk; since
        // `collect_declaring_chain` recurses into ancestors before
        // checking self, the first match it finds is already the most
        // ancestral.
        candidates.into_iter().next()
    }
}

fn collect_declaring_chain(
    graph: &SymbolGraph,
    current: &TypeStableId,
    entry: &SignatureEntry,
    out: &mut Vec<TypeStableId>,
) {
    let Some(ty) = graph.type_by_stable_id(current) else {
        return;
    };
    for iface_ref in &ty.interfaces {
        if let TypeRef::Named(named) = iface_ref {
            let ancestor_id = named.stable_id();
            collect_declaring_chain(graph, &ancestor_id, entry, out);
        }
    }
    if out.is_empty() && owned_signatures(ty).contains(entry) {
        out.push(current.clone());
    }
}

fn owned_signatures(ty: &TypeSymbol) -> IndexSet<SignatureEntry> {
    let mut out = IndexSet::new();
    for m in &ty.members.methods {
        out.insert(SignatureEntry {
            name: m.common.clr_name.clone(),
            signature: m.signature.clone(),
        });
    }
    for p in &ty.members.properties {
        out.insert(SignatureEntry {
            name: p.common.clr_name.clone(),
            signature: p.signature.clone(),
        });
    }
    for e in &ty.members.events {
        out.insert(SignatureEntry {
            name: e.common.clr_name.clone(),
            signature: e.signature.clone(),
        });
    }
    out
}

/// Signatures inherited through the `implements`/`extends` chain. This
/// index only needs to know *which* (name, signature) pairs exist
/// somewhere in the chain, not their generic-argument-substituted form --
/// actual substitution (replacing the ancestor's own parameters with the
/// closed type arguments a derived interface supplies) happens in
/// `clrbind-shape`'s interface inliner (§4.2.3), which owns the member
/// clones that substitution rewrites.
fn inherited_signatures(graph: &SymbolGraph, ty: &TypeSymbol) -> IndexSet<SignatureEntry> {
    let mut out = IndexSet::new();
    for iface_ref in &ty.interfaces {
        let TypeRef::Named(named) = iface_ref else { continue };
        let Some(ancestor) = graph.type_by_stable_id(&named.stable_id()) else {
            continue;
        };
        out.extend(owned_signatures(ancestor));
        out.extend(inherited_signatures(graph, ancestor));
    }
    out
}
