//! Renders `bindings.json` (spec.md §6): the same type/member coverage as
//! `metadata.json`, but indexed by the source runtime's metadata token so a
//! downstream binding generator can look an emitted symbol up by the token
//! it already has from the CLR reader, without re-deriving a stable id.

use crate::metadata_sidecar::type_json;
use clrbind_model::SymbolGraph;
use serde_json::{json, Map, Value};

pub fn render_namespace(graph: &SymbolGraph, namespace: &str) -> String {
    let mut by_token = Map::new();
    for ty in graph.types_in_namespace_emit_order(namespace) {
        let entry = type_json(ty, graph);
        by_token.insert(ty.metadata_token.to_string(), entry);

        for m in &ty.members.methods {
            by_token.insert(m.common.metadata_token.to_string(), member_entry(&m.common.clr_name, m.common.target_emit_name.as_deref()));
        }
        for m in &ty.members.properties {
            by_token.insert(m.common.metadata_token.to_string(), member_entry(&m.common.clr_name, m.common.target_emit_name.as_deref()));
        }
        for m in &ty.members.fields {
            by_token.insert(m.common.metadata_token.to_string(), member_entry(&m.common.clr_name, m.common.target_emit_name.as_deref()));
        }
        for m in &ty.members.events {
            by_token.insert(m.common.metadata_token.to_string(), member_entry(&m.common.clr_name, m.common.target_emit_name.as_deref()));
        }
        for m in &ty.members.constructors {
            by_token.insert(m.common.metadata_token.to_string(), member_entry(&m.common.clr_name, m.common.target_emit_name.as_deref()));
        }
    }

    let doc = json!({ "namespace": namespace, "byMetadataToken": Value::Object(by_token) });
    serde_json::to_string_pretty(&doc).expect("bindings JSON is always serializable")
}

fn member_entry(runtime_name: &str, target_name: Option<&str>) -> Value {
    json!({ "runtimeName": runtime_name, "targetName": target_name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clrbind_model::ids::TypeStableId;
    use clrbind_model::{TypeKind, TypeSymbol};

    #[test]
    fn a_member_is_indexed_by_its_own_metadata_token() {
        use clrbind_model::member::{MemberCommon, MethodSymbol};
        use clrbind_model::signature::CanonicalSignature;
        use clrbind_model::type_ref::TypeRef;

        let mut graph = SymbolGraph::new();
        let mut ty = TypeSymbol::new(TypeStableId::new("asm", "App.Widget"), TypeKind::Class);
        ty.target_emit_name = Some("Widget".into());
        ty.metadata_token = 1;

        let signature = CanonicalSignature::for_method(&[], &TypeRef::named_simple("System.Void"));
        let mut common = MemberCommon::new(
            clrbind_model::ids::MemberStableId::new("asm", "App.Widget", "Toggle", &signature),
            "Toggle",
        );
        common.metadata_token = 99;
        common.target_emit_name = Some("toggle".into());
        ty.members.methods.push(MethodSymbol {
            common,
            generic_parameters: vec![],
            parameters: vec![],
            return_type: TypeRef::named_simple("System.Void"),
            is_static: false,
            is_abstract: false,
            is_virtual: false,
            signature,
        });
        graph.insert_type("App", ty).unwrap();

        let rendered = render_namespace(&graph, "App");
        assert!(rendered.contains("\"99\""));
        assert!(rendered.contains("\"toggle\""));
    }
}
