//! Renders `index.<decl>` (spec.md §6): the public façade for a namespace.
//! Re-exports only `Public`, non-omitted types from the namespace's own
//! `internal/index`, so importers never see internal or omitted surface.

use clrbind_model::type_symbol::TypeAccessibility;
use clrbind_model::SymbolGraph;

pub fn render_namespace(graph: &SymbolGraph, namespace: &str) -> String {
    let mut names: Vec<&str> = graph
        .types_in_namespace_emit_order(namespace)
        .into_iter()
        .filter(|t| t.accessibility == TypeAccessibility::Public)
        .map(|t| t.target_emit_name.as_deref().unwrap_or_else(|| t.stable_id.clr_full_name()))
        .collect();
    names.sort_unstable();
    names.dedup();

    if names.is_empty() {
        return "export {};\n".to_string();
    }
    format!("export {{ {} }} from \"./internal/index\";\n", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clrbind_model::ids::TypeStableId;
    use clrbind_model::{TypeKind, TypeSymbol};

    #[test]
    fn only_public_types_are_reexported() {
        let mut graph = SymbolGraph::new();
        let mut pub_ty = TypeSymbol::new(TypeStableId::new("asm", "App.Widget"), TypeKind::Class);
        pub_ty.target_emit_name = Some("Widget".into());
        graph.insert_type("App", pub_ty).unwrap();

        let mut internal_ty = TypeSymbol::new(TypeStableId::new("asm", "App.Internal"), TypeKind::Class);
        internal_ty.target_emit_name = Some("Internal".into());
        internal_ty.accessibility = TypeAccessibility::Internal;
        graph.insert_type("App", internal_ty).unwrap();

        let rendered = render_namespace(&graph, "App");
        assert!(rendered.contains("Widget"));
        assert!(!rendered.contains("Internal"));
    }
}
