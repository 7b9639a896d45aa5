//! Generic parameter symbols (spec.md §3).

use crate::type_ref::TypeRef;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variance {
    None,
    Covariant,
    Contravariant,
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SpecialConstraints: u8 {
        const REFERENCE_TYPE    = 0b0001;
        const VALUE_TYPE        = 0b0010;
        const DEFAULT_CTOR      = 0b0100;
        const NOT_NULLABLE      = 0b1000;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenericConstraintKind {
    Intersection,
    Union,
}

/// A generic type parameter. `raw_constraints` carries unresolved
/// constraint types captured at Load time; `resolved_constraints` is
/// populated only after the Constraint Closer pass (§4.2.16) runs,
/// preventing infinite recursion on self-referential constraints
/// (`T where T : IComparable<T>`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenericParameterSymbol {
    pub name: String,
    pub position: u8,
    pub variance: Variance,
    pub special_constraints: SpecialConstraints,
    pub resolved_constraints: Vec<TypeRef>,
    /// Raw constraint type refs, captured at Load, not yet resolved.
    /// Kept separate so the Constraint Closer can detect the
    /// self-referential case without unbounded recursion.
    pub raw_constraints: Vec<TypeRef>,
    pub merge_kind: Option<GenericConstraintKind>,
}

impl GenericParameterSymbol {
    pub fn new(name: impl Into<String>, position: u8) -> Self {
        Self {
            name: name.into(),
            position,
            variance: Variance::None,
            special_constraints: SpecialConstraints::empty(),
            resolved_constraints: Vec::new(),
            raw_constraints: Vec::new(),
            merge_kind: None,
        }
    }

    pub fn has_default_constructor_constraint(&self) -> bool {
        self.special_constraints.contains(SpecialConstraints::DEFAULT_CTOR)
    }

    pub fn is_closed(&self) -> bool {
        self.raw_constraints.is_empty() || !self.resolved_constraints.is_empty()
    }
}
