//! Renders `metadata.json` (spec.md §6): one JSON document per namespace
//! describing every emitted type and member -- source name, target name,
//! shape, and provenance -- for tooling that needs to relate the emitted
//! surface back to the CLR model without re-parsing declarations.

use clrbind_model::member::{EmitScope, MemberCommon, Provenance};
use clrbind_model::type_symbol::{TypeAccessibility, TypeFlags};
use clrbind_model::{SymbolGraph, TypeKind, TypeSymbol};
use serde_json::{json, Value};

pub(crate) fn type_kind_str(kind: TypeKind) -> &'static str {
    match kind {
        TypeKind::Class => "class",
        TypeKind::Struct => "struct",
        TypeKind::Interface => "interface",
        TypeKind::Enum => "enum",
        TypeKind::Delegate => "delegate",
        TypeKind::StaticNamespace => "staticNamespace",
    }
}

pub(crate) fn accessibility_str(accessibility: TypeAccessibility) -> &'static str {
    match accessibility {
        TypeAccessibility::Public => "public",
        TypeAccessibility::Internal => "internal",
    }
}

pub(crate) fn modifiers_array(flags: TypeFlags) -> Vec<&'static str> {
    let mut out = Vec::new();
    if flags.contains(TypeFlags::IS_ABSTRACT) {
        out.push("abstract");
    }
    if flags.contains(TypeFlags::IS_SEALED) {
        out.push("sealed");
    }
    if flags.contains(TypeFlags::IS_VALUE_TYPE) {
        out.push("valueType");
    }
    if flags.contains(TypeFlags::IS_STATIC) {
        out.push("static");
    }
    out
}

pub(crate) fn provenance_str(provenance: Provenance) -> &'static str {
    match provenance {
        Provenance::Original => "original",
        Provenance::FromInterface => "fromInterface",
        Provenance::Synthesized => "synthesized",
        Provenance::HiddenNew => "hiddenNew",
        Provenance::BaseOverload => "baseOverload",
        Provenance::DiamondResolved => "diamondResolved",
        Provenance::IndexerNormalized => "indexerNormalized",
        Provenance::ExplicitView => "explicitView",
        Provenance::OverloadReturnConflict => "overloadReturnConflict",
    }
}

pub(crate) fn emit_scope_str(scope: EmitScope) -> &'static str {
    match scope {
        EmitScope::Unspecified => "unspecified",
        EmitScope::ClassSurface => "classSurface",
        EmitScope::StaticSurface => "staticSurface",
        EmitScope::ViewOnly => "viewOnly",
        EmitScope::Omitted => "omitted",
    }
}

/// One member's metadata entry. `canonical_signature`/`is_static` are
/// passed in since they live on the concrete member kind, not `MemberCommon`.
pub(crate) fn member_json(
    common: &MemberCommon,
    canonical_signature: &str,
    is_static: bool,
    graph: &SymbolGraph,
) -> Value {
    let source_interface_full_name = common
        .source_interface
        .as_ref()
        .and_then(|id| graph.type_by_stable_id(id))
        .map(|t| t.stable_id.clr_full_name().to_string());

    json!({
        "metadataToken": common.metadata_token,
        "runtimeName": common.clr_name,
        "targetName": common.target_emit_name,
        "canonicalSignature": canonical_signature,
        "provenance": provenance_str(common.provenance),
        "emitScope": emit_scope_str(common.emit_scope),
        "isStatic": is_static,
        "sourceInterfaceFullName": source_interface_full_name,
    })
}

pub(crate) fn type_json(ty: &TypeSymbol, graph: &SymbolGraph) -> Value {
    let mut members = Vec::new();
    for m in &ty.members.methods {
        members.push(member_json(&m.common, m.signature.as_str(), m.is_static, graph));
    }
    for m in &ty.members.properties {
        members.push(member_json(&m.common, m.signature.as_str(), m.is_static, graph));
    }
    for m in &ty.members.fields {
        members.push(member_json(&m.common, m.signature.as_str(), m.is_static, graph));
    }
    for m in &ty.members.events {
        members.push(member_json(&m.common, m.signature.as_str(), m.is_static, graph));
    }
    for m in &ty.members.constructors {
        members.push(member_json(&m.common, m.signature.as_str(), false, graph));
    }

    json!({
        "metadataToken": ty.metadata_token,
        "sourceRuntimeFullName": ty.stable_id.clr_full_name(),
        "targetName": ty.target_emit_name,
        "kind": type_kind_str(ty.kind),
        "accessibility": accessibility_str(ty.accessibility),
        "modifiers": modifiers_array(ty.flags),
        "arity": ty.arity(),
        "members": members,
    })
}

pub fn render_namespace(graph: &SymbolGraph, namespace: &str) -> String {
    let types: Vec<Value> = graph
        .types_in_namespace_emit_order(namespace)
        .into_iter()
        .map(|t| type_json(t, graph))
        .collect();
    let doc = json!({ "namespace": namespace, "types": types });
    serde_json::to_string_pretty(&doc).expect("metadata JSON is always serializable")
}
