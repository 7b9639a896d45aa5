//! Shared clone-as-view helpers used by structural conformance (4.2.2)
//! and the explicit-implementation synthesiser (4.2.5): both turn an
//! interface member into a view-only copy that keeps the **interface's**
//! member stable id, not the implementing type's, so later deduplication
//! sees one copy regardless of which interface demanded it.

use clrbind_model::member::Provenance;
use clrbind_model::{EventSymbol, MethodSymbol, PropertySymbol, TypeStableId};

pub fn clone_method_as_view(source: &MethodSymbol, source_interface: &TypeStableId) -> MethodSymbol {
    let mut clone = source.clone();
    clone.common.provenance = Provenance::ExplicitView;
    clone.common.emit_scope = clrbind_model::EmitScope::ViewOnly;
    clone.common.source_interface = Some(source_interface.clone());
    clone
}

pub fn clone_property_as_view(source: &PropertySymbol, source_interface: &TypeStableId) -> PropertySymbol {
    let mut clone = source.clone();
    clone.common.provenance = Provenance::ExplicitView;
    clone.common.emit_scope = clrbind_model::EmitScope::ViewOnly;
    clone.common.source_interface = Some(source_interface.clone());
    clone
}

pub fn clone_event_as_view(source: &EventSymbol, source_interface: &TypeStableId) -> EventSymbol {
    let mut clone = source.clone();
    clone.common.provenance = Provenance::ExplicitView;
    clone.common.emit_scope = clrbind_model::EmitScope::ViewOnly;
    clone.common.source_interface = Some(source_interface.clone());
    clone
}
