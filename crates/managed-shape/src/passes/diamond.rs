//! 4.2.7 — Diamond resolver. Detects two parent interfaces supplying the
//! same simple name with different signatures. Records findings only;
//! it never restructures scopes itself.

use clrbind_common::diagnostics::{codes, DiagnosticBag};
use clrbind_common::policy::DiamondResolution;
use clrbind_index::Indexes;
use clrbind_model::{SymbolGraph, TypeKind, TypeStableId, TypeSymbol};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiamondConflict {
    pub type_id: TypeStableId,
    pub member_name: String,
}

/// Inspect every class/struct's direct interfaces for a same-name,
/// different-signature clash, per `policy.interfaces.diamond_resolution`.
pub fn run(
    graph: &SymbolGraph,
    indexes: &Indexes,
    resolution: DiamondResolution,
    diagnostics: &mut DiagnosticBag,
) -> Vec<DiamondConflict> {
    let mut conflicts = Vec::new();

    for ty in graph.types() {
        if !matches!(ty.kind, TypeKind::Class | TypeKind::Struct) {
            continue;
        }

        let mut by_name: HashMap<&str, Vec<&clrbind_index::SignatureEntry>> = HashMap::new();
        for iface in &ty.interfaces {
            let clrbind_model::TypeRef::Named(named) = iface else { continue };
            let Some(surface) = indexes.interface_surface(&named.stable_id()) else { continue };
            for entry in surface {
                by_name.entry(entry.name.as_str()).or_default().push(entry);
            }
        }

        for (name, entries) in by_name {
            let distinct_signatures: std::collections::HashSet<_> = entries.iter().map(|e| e.signature.as_str()).collect();
            if distinct_signatures.len() <= 1 {
                continue;
            }

            let conflict = DiamondConflict {
                type_id: ty.stable_id.clone(),
                member_name: name.to_string(),
            };

            match resolution {
                DiamondResolution::OverloadAll => {
                    diagnostics.warning(
                        codes::DIAMOND_001_CONFLICT_DETECTED,
                        format!("{} has diamond conflict on '{name}', keeping all overloads", ty.stable_id),
                    );
                }
                DiamondResolution::PreferDerived => {
                    diagnostics.warning(
                        codes::DIAMOND_001_CONFLICT_DETECTED,
                        format!("{} has diamond conflict on '{name}', preferring derived signature", ty.stable_id),
                    );
                }
                DiamondResolution::Error => {
                    diagnostics.error(
                        codes::DIAMOND_002_CONFLICT_FAILS_BUILD,
                        format!("{} has diamond conflict on '{name}'", ty.stable_id),
                    );
                }
            }

            conflicts.push(conflict);
        }
    }

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use clrbind_common::diagnostics::DiagnosticCategory;
    use clrbind_model::ids::MemberStableId;
    use clrbind_model::member::{MemberCommon, MethodSymbol, ParameterSymbol};
    use clrbind_model::signature::CanonicalSignature;
    use clrbind_model::type_ref::{NamedTypeRef, TypeRef};
    use clrbind_model::type_symbol::TypeKind;

    fn method_returning(name: &str, return_type_name: &str) -> MethodSymbol {
        let sig = CanonicalSignature::for_method(&[], &TypeRef::named_simple(return_type_name));
        let common = MemberCommon::new(MemberStableId::new("asm", "I", name, &sig), name);
        MethodSymbol {
            common,
            generic_parameters: vec![],
            parameters: Vec::<ParameterSymbol>::new(),
            return_type: TypeRef::named_simple(return_type_name),
            is_static: false,
            is_abstract: true,
            is_virtual: false,
            signature: sig,
        }
    }

    fn iface_ref(name: &str) -> TypeRef {
        TypeRef::Named(NamedTypeRef {
            assembly: "asm".to_string(),
            namespace: "Ns".to_string(),
            simple_name: name.to_string(),
            arity: 0,
            type_arguments: vec![],
            interface_stable_id: Some(TypeStableId::new("asm", name)),
        })
    }

    /// A class implementing `IA`/`IB`, which both declare a `Go` method with
    /// different return types -- a diamond on the same simple name.
    fn graph_with_conflicting_diamond() -> SymbolGraph {
        let mut graph = SymbolGraph::new();

        let mut ia = TypeSymbol::new(TypeStableId::new("asm", "IA"), TypeKind::Interface);
        ia.members.methods.push(method_returning("Go", "System.Int32"));
        graph.insert_type("Ns", ia).unwrap();

        let mut ib = TypeSymbol::new(TypeStableId::new("asm", "IB"), TypeKind::Interface);
        ib.members.methods.push(method_returning("Go", "System.String"));
        graph.insert_type("Ns", ib).unwrap();

        let mut widget = TypeSymbol::new(TypeStableId::new("asm", "Widget"), TypeKind::Class);
        widget.interfaces.push(iface_ref("IA"));
        widget.interfaces.push(iface_ref("IB"));
        graph.insert_type("Ns", widget).unwrap();

        graph
    }

    #[test]
    fn overload_all_records_a_warning_and_keeps_the_conflict() {
        let graph = graph_with_conflicting_diamond();
        let indexes = Indexes::build(&graph);
        let mut diagnostics = DiagnosticBag::new();

        let conflicts = run(&graph, &indexes, DiamondResolution::OverloadAll, &mut diagnostics);

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].member_name, "Go");
        let entries = diagnostics.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].code, codes::DIAMOND_001_CONFLICT_DETECTED);
        assert_eq!(entries[0].category, DiagnosticCategory::Warning);
    }

    #[test]
    fn prefer_derived_also_records_a_warning() {
        let graph = graph_with_conflicting_diamond();
        let indexes = Indexes::build(&graph);
        let mut diagnostics = DiagnosticBag::new();

        run(&graph, &indexes, DiamondResolution::PreferDerived, &mut diagnostics);

        let entries = diagnostics.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].code, codes::DIAMOND_001_CONFLICT_DETECTED);
        assert_eq!(entries[0].category, DiagnosticCategory::Warning);
    }

    #[test]
    fn error_policy_fails_the_build_instead_of_warning() {
        let graph = graph_with_conflicting_diamond();
        let indexes = Indexes::build(&graph);
        let mut diagnostics = DiagnosticBag::new();

        let conflicts = run(&graph, &indexes, DiamondResolution::Error, &mut diagnostics);

        assert_eq!(conflicts.len(), 1);
        let entries = diagnostics.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].code, codes::DIAMOND_002_CONFLICT_FAILS_BUILD);
        assert_eq!(entries[0].category, DiagnosticCategory::Error);
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn identical_signatures_across_interfaces_are_not_a_conflict() {
        let mut graph = SymbolGraph::new();

        let mut ia = TypeSymbol::new(TypeStableId::new("asm", "IA"), TypeKind::Interface);
        ia.members.methods.push(method_returning("Go", "System.Int32"));
        graph.insert_type("Ns", ia).unwrap();

        let mut ib = TypeSymbol::new(TypeStableId::new("asm", "IB"), TypeKind::Interface);
        ib.members.methods.push(method_returning("Go", "System.Int32"));
        graph.insert_type("Ns", ib).unwrap();

        let mut widget = TypeSymbol::new(TypeStableId::new("asm", "Widget"), TypeKind::Class);
        widget.interfaces.push(iface_ref("IA"));
        widget.interfaces.push(iface_ref("IB"));
        graph.insert_type("Ns", widget).unwrap();

        let indexes = Indexes::build(&graph);
        let mut diagnostics = DiagnosticBag::new();
        let conflicts = run(&graph, &indexes, DiamondResolution::OverloadAll, &mut diagnostics);

        assert!(conflicts.is_empty());
        assert!(diagnostics.entries().is_empty());
    }
}
