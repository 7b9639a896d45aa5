//! The external-collaborator boundary (SPEC_FULL.md §1): a lightweight
//! metadata-only view of a compiled assembly. A production build gets
//! these from a real reflection facility (the `dotscope`/`cilium` family
//! of crates read raw CLI metadata tables); this crate depends only on
//! the trait, never on a concrete reader, so it stays testable with
//! hand-built fixtures.

use clrbind_model::AssemblyKey;
use serde::{Deserialize, Serialize};

/// A metadata-only view of one loaded assembly: just names, signatures,
/// and tokens, never executable code (spec.md §4.1).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawAssembly {
    pub key: AssemblyKey,
    pub referenced_assembly_names: Vec<String>,
    pub types: Vec<RawType>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawType {
    pub namespace: String,
    pub simple_name: String,
    pub clr_full_name: String,
    pub is_public: bool,
    pub enclosing_type: Option<String>,
    pub kind: RawTypeKind,
    pub is_abstract: bool,
    pub is_sealed: bool,
    pub is_value_type: bool,
    pub is_static: bool,
    pub base_type: Option<String>,
    pub interfaces: Vec<String>,
    pub generic_parameter_names: Vec<String>,
    pub members: Vec<RawMember>,
    pub metadata_token: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawTypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawMember {
    pub name: String,
    pub kind: RawMemberKind,
    pub is_static: bool,
    pub is_public: bool,
    pub metadata_token: u32,
    pub parameter_types: Vec<String>,
    pub return_type: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawMemberKind {
    Method,
    Property,
    Field,
    Event,
    Constructor,
}

/// The reflection facility the Load phase consumes. A real implementation
/// reads metadata tables directly (see `cilium`/`dotscope` for the
/// low-level table format); tests and this repository's fixtures
/// implement it in-memory.
pub trait MetadataSource {
    /// Lightweight reference scan: assembly name plus the names it
    /// references, without materializing types. Used for the transitive
    /// closure walk (§4.1) so resolving references doesn't require a
    /// full load.
    fn scan_references(&self, path: &str) -> Option<(AssemblyKey, Vec<String>)>;

    /// Full metadata read for an assembly already selected by the closure
    /// walk.
    fn load_assembly(&self, path: &str) -> Option<RawAssembly>;

    /// Resolve an assembly name to a candidate path, searching seeds then
    /// reference paths in order.
    fn resolve_path(&self, assembly_name: &str) -> Option<String>;
}

/// An in-memory `MetadataSource` built directly from `RawAssembly`
/// values, indexed by assembly name. Used by tests and by any caller that
/// has already materialized metadata some other way.
#[derive(Default)]
pub struct InMemorySource {
    by_name: rustc_hash::FxHashMap<String, RawAssembly>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assembly(mut self, assembly: RawAssembly) -> Self {
        self.by_name.insert(assembly.key.name.clone(), assembly);
        self
    }
}

impl MetadataSource for InMemorySource {
    fn scan_references(&self, path: &str) -> Option<(AssemblyKey, Vec<String>)> {
        self.by_name
            .get(path)
            .map(|a| (a.key.clone(), a.referenced_assembly_names.clone()))
    }

    fn load_assembly(&self, path: &str) -> Option<RawAssembly> {
        self.by_name.get(path).cloned()
    }

    fn resolve_path(&self, assembly_name: &str) -> Option<String> {
        self.by_name.contains_key(assembly_name).then(|| assembly_name.to_string())
    }
}
