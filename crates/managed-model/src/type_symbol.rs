//! Type symbols (spec.md §3).

use crate::generics::GenericParameterSymbol;
use crate::ids::TypeStableId;
use crate::member::MemberBundle;
use crate::type_ref::TypeRef;
use crate::view::ExplicitView;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    StaticNamespace,
}

impl TypeKind {
    /// Emission order bucket (§4.6): enums, delegates, interfaces,
    /// structs, classes, static namespaces -- forward-reference-safe.
    pub const fn emit_order_rank(self) -> u8 {
        match self {
            TypeKind::Enum => 0,
            TypeKind::Delegate => 1,
            TypeKind::Interface => 2,
            TypeKind::Struct => 3,
            TypeKind::Class => 4,
            TypeKind::StaticNamespace => 5,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeAccessibility {
    Public,
    Internal,
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TypeFlags: u8 {
        const IS_ABSTRACT   = 0b0001;
        const IS_SEALED     = 0b0010;
        const IS_VALUE_TYPE = 0b0100;
        const IS_STATIC     = 0b1000;
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeSymbol {
    pub stable_id: TypeStableId,
    pub kind: TypeKind,
    pub accessibility: TypeAccessibility,
    pub generic_parameters: Vec<GenericParameterSymbol>,
    pub base_type: Option<TypeRef>,
    pub interfaces: Vec<TypeRef>,
    pub members: MemberBundle,
    pub nested_types: Vec<TypeStableId>,
    pub flags: TypeFlags,
    /// Set only in Name Reservation.
    pub target_emit_name: Option<String>,
    /// Set only by Shape's view planner (§4.2.11).
    pub explicit_views: Vec<ExplicitView>,
    /// Source runtime metadata token, carried from Load for the binding
    /// sidecar (spec.md §6); excluded from `stable_id` equality on purpose
    /// (see ids.rs) since it is reader-specific, not identity.
    pub metadata_token: u32,
}

impl TypeSymbol {
    pub fn new(stable_id: TypeStableId, kind: TypeKind) -> Self {
        Self {
            stable_id,
            kind,
            accessibility: TypeAccessibility::Public,
            generic_parameters: Vec::new(),
            base_type: None,
            interfaces: Vec::new(),
            members: MemberBundle::default(),
            nested_types: Vec::new(),
            flags: TypeFlags::empty(),
            target_emit_name: None,
            explicit_views: Vec::new(),
            metadata_token: 0,
        }
    }

    pub fn is_generic(&self) -> bool {
        !self.generic_parameters.is_empty()
    }

    pub fn arity(&self) -> u8 {
        self.generic_parameters.len() as u8
    }
}
