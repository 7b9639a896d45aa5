//! Load: builds the initial [`SymbolGraph`](clrbind_model::SymbolGraph)
//! from assembly metadata (spec.md §4.1).
//!
//! The actual reading of assembly bytes is delegated to a reflection
//! facility the host provides (spec.md §1, out of scope); this crate
//! consumes that facility through the [`metadata::MetadataSource`] trait
//! and owns everything downstream of it: transitive closure, identity
//! validation, type extraction, and the memoising type-reference factory
//! that breaks self-referential generic constraint cycles.

pub mod closure;
pub mod extract;
pub mod metadata;
pub mod type_ref_factory;

pub use closure::{resolve_transitive_closure, ClosureResult};
pub use extract::{load_graph, LoadResult};
pub use metadata::{MetadataSource, RawAssembly, RawMember, RawType};
pub use type_ref_factory::TypeRefFactory;
