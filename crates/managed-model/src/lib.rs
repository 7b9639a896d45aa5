//! The symbol graph: the one data structure every pipeline phase
//! transforms (spec.md §3).
//!
//! Every phase except Emit consumes a [`SymbolGraph`] and returns a new
//! one; no phase mutates process-global state (SPEC_FULL.md §9). The graph
//! itself owns its namespaces; everything else refers to types and members
//! by stable id.

pub mod assembly;
pub mod assignability;
pub mod generics;
pub mod graph;
pub mod ids;
pub mod member;
pub mod namespace;
pub mod signature;
pub mod substitution;
pub mod type_ref;
pub mod type_symbol;
pub mod view;

pub use assembly::AssemblyKey;
pub use assignability::{erased_equal, is_assignable_to};
pub use generics::{GenericConstraintKind, GenericParameterSymbol, SpecialConstraints, Variance};
pub use graph::SymbolGraph;
pub use ids::{MemberStableId, TypeStableId};
pub use member::{
    ConstructorSymbol, EmitScope, EventSymbol, FieldSymbol, MemberBundle, MethodSymbol,
    ParameterModifier, ParameterSymbol, Provenance, PropertySymbol,
};
pub use namespace::NamespaceSymbol;
pub use signature::CanonicalSignature;
pub use type_ref::TypeRef;
pub use type_symbol::{TypeAccessibility, TypeFlags, TypeKind, TypeSymbol};
pub use view::ExplicitView;
