//! Constraint auditor (spec.md §4.6, final paragraph). For every
//! (implementing-type, implemented-interface) pair, records a finding
//! whenever the interface carries a generic parameter with the
//! default-constructor special constraint -- the target cannot encode
//! "has a parameterless constructor" structurally, so the binding
//! sidecar must preserve the fact for the runtime consumer.

use clrbind_common::diagnostics::{codes, DiagnosticBag};
use clrbind_model::ids::TypeStableId;
use clrbind_model::type_ref::TypeRef;
use clrbind_model::SymbolGraph;

#[derive(Clone, Debug)]
pub struct ConstructorConstraintLoss {
    pub implementing_type: TypeStableId,
    pub interface: TypeStableId,
    pub parameter_name: String,
}

pub fn run(graph: &SymbolGraph, diagnostics: &mut DiagnosticBag) -> Vec<ConstructorConstraintLoss> {
    let mut findings = Vec::new();

    for ty in graph.types() {
        for iface_ref in &ty.interfaces {
            let TypeRef::Named(named) = iface_ref else { continue };
            let interface_id = named.stable_id();
            let Some(interface) = graph.type_by_stable_id(&interface_id) else { continue };

            for gp in &interface.generic_parameters {
                if gp.has_default_constructor_constraint() {
                    diagnostics.warning(
                        codes::CT_001_CONSTRUCTOR_CONSTRAINT_LOST,
                        format!(
                            "{} implements {} whose parameter {} requires a parameterless constructor, unrepresentable on the target surface",
                            ty.stable_id, interface_id, gp.name
                        ),
                    );
                    findings.push(ConstructorConstraintLoss {
                        implementing_type: ty.stable_id.clone(),
                        interface: interface_id.clone(),
                        parameter_name: gp.name.clone(),
                    });
                }
            }
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use clrbind_model::generics::{GenericParameterSymbol, SpecialConstraints};
    use clrbind_model::type_ref::NamedTypeRef;
    use clrbind_model::{TypeKind, TypeSymbol};

    #[test]
    fn flags_interface_with_default_ctor_constraint() {
        let mut graph = SymbolGraph::new();
        let mut iface = TypeSymbol::new(TypeStableId::new("asm", "App.IFactory"), TypeKind::Interface);
        let mut gp = GenericParameterSymbol::new("T", 0);
        gp.special_constraints = SpecialConstraints::DEFAULT_CTOR;
        iface.generic_parameters.push(gp);
        graph.insert_type("App", iface).unwrap();

        let mut ty = TypeSymbol::new(TypeStableId::new("asm", "App.Widget"), TypeKind::Class);
        ty.interfaces.push(TypeRef::Named(NamedTypeRef {
            assembly: "asm".into(),
            namespace: "App".into(),
            simple_name: "IFactory".into(),
            arity: 1,
            type_arguments: vec![],
            interface_stable_id: Some(TypeStableId::new("asm", "App.IFactory")),
        }));
        graph.insert_type("App", ty).unwrap();

        let mut diagnostics = DiagnosticBag::new();
        let findings = run(&graph, &mut diagnostics);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].parameter_name, "T");
        assert!(!diagnostics.has_errors());
    }
}
