//! Member symbols (spec.md §3): methods, properties, fields, events,
//! constructors, plus the two classification fields central to Shape.

use crate::ids::{MemberStableId, TypeStableId};
use crate::signature::CanonicalSignature;
use crate::type_ref::TypeRef;
use serde::{Deserialize, Serialize};

/// Why a member exists in its current form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    Original,
    FromInterface,
    Synthesized,
    HiddenNew,
    BaseOverload,
    DiamondResolved,
    IndexerNormalized,
    ExplicitView,
    OverloadReturnConflict,
}

/// The placement decision for a member (spec.md §3 / glossary).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmitScope {
    Unspecified,
    ClassSurface,
    StaticSurface,
    ViewOnly,
    Omitted,
}

impl EmitScope {
    pub const fn is_static(self) -> bool {
        matches!(self, EmitScope::StaticSurface)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterModifier {
    None,
    In,
    Out,
    Ref,
    Params,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterSymbol {
    pub name: String,
    pub ty: TypeRef,
    pub modifier: ParameterModifier,
    pub has_default: bool,
}

/// Fields shared by every member kind. Kept as a plain struct (rather than
/// a trait) because the symbol model favors closed tagged sums over
/// inheritance (SPEC_FULL.md §9).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MemberCommon {
    pub stable_id: MemberStableId,
    pub clr_name: String,
    /// Populated only during Name Reservation; absent before then.
    pub target_emit_name: Option<String>,
    pub is_public: bool,
    pub provenance: Provenance,
    pub emit_scope: EmitScope,
    /// Set only when `emit_scope == ViewOnly`.
    pub source_interface: Option<TypeStableId>,
    /// Source runtime metadata token, carried from Load for the binding
    /// sidecar (spec.md §6); excluded from `stable_id` equality on purpose
    /// (see ids.rs) since it is reader-specific, not identity.
    pub metadata_token: u32,
}

impl MemberCommon {
    pub fn new(stable_id: MemberStableId, clr_name: impl Into<String>) -> Self {
        Self {
            stable_id,
            clr_name: clr_name.into(),
            target_emit_name: None,
            is_public: true,
            provenance: Provenance::Original,
            emit_scope: EmitScope::Unspecified,
            source_interface: None,
            metadata_token: 0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MethodSymbol {
    pub common: MemberCommon,
    pub generic_parameters: Vec<crate::generics::GenericParameterSymbol>,
    pub parameters: Vec<ParameterSymbol>,
    pub return_type: TypeRef,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_virtual: bool,
    pub signature: CanonicalSignature,
}

impl MethodSymbol {
    pub fn erasure_key(&self) -> (String, u8, usize) {
        (
            self.common.clr_name.clone(),
            self.generic_parameters.len() as u8,
            self.parameters.len(),
        )
    }

    pub fn byref_parameter_count(&self) -> usize {
        self.parameters
            .iter()
            .filter(|p| matches!(p.modifier, ParameterModifier::Ref | ParameterModifier::Out))
            .count()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PropertySymbol {
    pub common: MemberCommon,
    pub index_parameters: Vec<ParameterSymbol>,
    pub property_type: TypeRef,
    pub is_static: bool,
    pub has_getter: bool,
    pub has_setter: bool,
    pub is_readonly_surface: bool,
    pub signature: CanonicalSignature,
}

impl PropertySymbol {
    pub fn is_indexer(&self) -> bool {
        !self.index_parameters.is_empty()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldSymbol {
    pub common: MemberCommon,
    pub field_type: TypeRef,
    pub is_static: bool,
    pub is_readonly: bool,
    pub signature: CanonicalSignature,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventSymbol {
    pub common: MemberCommon,
    pub handler_type: TypeRef,
    pub is_static: bool,
    pub signature: CanonicalSignature,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConstructorSymbol {
    pub common: MemberCommon,
    pub parameters: Vec<ParameterSymbol>,
    pub signature: CanonicalSignature,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemberBundle {
    pub methods: Vec<MethodSymbol>,
    pub properties: Vec<PropertySymbol>,
    pub fields: Vec<FieldSymbol>,
    pub events: Vec<EventSymbol>,
    pub constructors: Vec<ConstructorSymbol>,
}

impl MemberBundle {
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
            && self.properties.is_empty()
            && self.fields.is_empty()
            && self.events.is_empty()
            && self.constructors.is_empty()
    }

    /// Every member's `MemberCommon`, for passes that only care about
    /// scope/provenance/stable id bookkeeping.
    pub fn all_common(&self) -> Vec<&MemberCommon> {
        let mut out = Vec::new();
        out.extend(self.methods.iter().map(|m| &m.common));
        out.extend(self.properties.iter().map(|m| &m.common));
        out.extend(self.fields.iter().map(|m| &m.common));
        out.extend(self.events.iter().map(|m| &m.common));
        out.extend(self.constructors.iter().map(|m| &m.common));
        out
    }

    pub fn all_common_mut(&mut self) -> Vec<&mut MemberCommon> {
        let mut out = Vec::new();
        out.extend(self.methods.iter_mut().map(|m| &mut m.common));
        out.extend(self.properties.iter_mut().map(|m| &mut m.common));
        out.extend(self.fields.iter_mut().map(|m| &mut m.common));
        out.extend(self.events.iter_mut().map(|m| &mut m.common));
        out.extend(self.constructors.iter_mut().map(|m| &mut m.common));
        out
    }
}
