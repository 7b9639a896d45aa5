//! 4.2.9 — Overload-return-conflict detector. Groups methods by
//! "signature without return type" within a scope; two members sharing
//! that group with different return types get a finding, since the
//! target cannot overload on return type alone.

use clrbind_common::diagnostics::{codes, DiagnosticBag};
use clrbind_model::SymbolGraph;
use std::collections::HashMap;

pub fn run(graph: &SymbolGraph, diagnostics: &mut DiagnosticBag) {
    for ty in graph.types() {
        let mut by_shape: HashMap<&str, Vec<String>> = HashMap::new();
        for method in &ty.members.methods {
            by_shape
                .entry(method.signature.without_return())
                .or_default()
                .push(method.return_type.canonical_name());
        }

        for (shape, returns) in by_shape {
            if returns.len() < 2 {
                continue;
            }
            let distinct_returns: std::collections::HashSet<&String> = returns.iter().collect();
            if distinct_returns.len() > 1 {
                diagnostics.warning(
                    codes::OV_001_RETURN_ONLY_CONFLICT,
                    format!(
                        "{} has methods overloaded only by return type for shape {shape}",
                        ty.stable_id
                    ),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clrbind_common::DiagnosticBag;
    use clrbind_model::ids::MemberStableId;
    use clrbind_model::member::{MemberCommon, ParameterSymbol};
    use clrbind_model::signature::CanonicalSignature;
    use clrbind_model::{MethodSymbol, TypeKind, TypeRef, TypeStableId, TypeSymbol};

    fn method(name: &str, return_type: &str) -> MethodSymbol {
        let sig = CanonicalSignature::for_method(&[], &TypeRef::named_simple(return_type));
        MethodSymbol {
            common: MemberCommon::new(MemberStableId::new("asm", "App.Widget", name, &sig), name),
            generic_parameters: vec![],
            parameters: Vec::<ParameterSymbol>::new(),
            return_type: TypeRef::named_simple(return_type),
            is_static: false,
            is_abstract: false,
            is_virtual: false,
            signature: sig,
        }
    }

    #[test]
    fn flags_return_only_overloads() {
        let mut graph = SymbolGraph::new();
        let mut ty = TypeSymbol::new(TypeStableId::new("asm", "App.Widget"), TypeKind::Class);
        ty.members.methods.push(method("Parse", "System.Int32"));
        ty.members.methods.push(method("Parse", "System.String"));
        graph.insert_type("App", ty).unwrap();

        let mut diagnostics = DiagnosticBag::new();
        run(&graph, &mut diagnostics);
        assert!(diagnostics.has_errors() == false);
        assert_eq!(diagnostics.entries().len(), 1);
        assert_eq!(diagnostics.entries()[0].code, codes::OV_001_RETURN_ONLY_CONFLICT);
    }
}
