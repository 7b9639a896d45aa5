//! Namespace symbols (spec.md §3). Names are flat dotted strings; there is
//! no nested-namespace relation.

use crate::assembly::AssemblyKey;
use crate::ids::TypeStableId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NamespaceSymbol {
    /// Empty for the global namespace.
    pub name: String,
    pub types: Vec<TypeStableId>,
    pub contributing_assemblies: BTreeSet<AssemblyKey>,
}

impl NamespaceSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
            contributing_assemblies: BTreeSet::new(),
        }
    }

    pub fn is_global(&self) -> bool {
        self.name.is_empty()
    }
}
