//! 4.2.4 — Internal-interface filter. Strips well-known runtime-internal
//! interfaces from every type's interface list before the index is
//! rebuilt, so they never reach an emitted `implements` clause.

use clrbind_model::type_ref::TypeRef;
use clrbind_model::SymbolGraph;

/// Name-pattern and explicit-list rules for "runtime internal" interfaces:
/// compiler/runtime plumbing a target-language consumer never implements
/// against directly.
const INTERNAL_INTERFACE_NAMES: &[&str] = &[
    "System.Runtime.Serialization.ISerializable",
    "System.Runtime.InteropServices._Type",
    "System.Runtime.InteropServices.ICustomQueryInterface",
    "System.Runtime.CompilerServices.ICriticalNotifyCompletion",
];

fn is_internal(name: &str) -> bool {
    name.starts_with("System.Runtime.CompilerServices.")
        || name.starts_with("System.Runtime.Remoting.")
        || INTERNAL_INTERFACE_NAMES.contains(&name)
}

pub fn run(graph: &mut SymbolGraph) {
    for ty in graph.types_mut() {
        ty.interfaces.retain(|iface| match iface {
            TypeRef::Named(named) => !is_internal(&named.clr_full_name()),
            _ => true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clrbind_model::type_ref::NamedTypeRef;
    use clrbind_model::{TypeKind, TypeStableId, TypeSymbol};

    #[test]
    fn strips_runtime_internal_interfaces() {
        let mut graph = SymbolGraph::new();
        let mut ty = TypeSymbol::new(TypeStableId::new("asm", "App.Widget"), TypeKind::Class);
        ty.interfaces.push(TypeRef::Named(NamedTypeRef {
            assembly: "mscorlib".into(),
            namespace: "System.Runtime.Serialization".into(),
            simple_name: "ISerializable".into(),
            arity: 0,
            type_arguments: vec![],
            interface_stable_id: None,
        }));
        ty.interfaces.push(TypeRef::named_simple("System.IDisposable"));
        graph.insert_type("App", ty).unwrap();

        run(&mut graph);

        let ty = graph.type_by_stable_id(&TypeStableId::new("asm", "App.Widget")).unwrap();
        assert_eq!(ty.interfaces.len(), 1);
    }
}
