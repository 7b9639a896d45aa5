//! 4.2.8 — Base-overload adder. For each class deriving from another
//! class, adds synthetic class-surface members for every base overload
//! of any method name the derived class also overloads — the target
//! requires every overload of an overridden method to appear on the
//! derived type. The synthetic copy is owned by the derived type's
//! stable id via [`clrbind_model::MemberStableId::retarget`].

use clrbind_model::member::Provenance;
use clrbind_model::type_ref::TypeRef;
use clrbind_model::{EmitScope, MethodSymbol, SymbolGraph, TypeStableId};
use std::collections::HashSet;

fn base_methods(graph: &SymbolGraph, base: &TypeRef) -> Vec<MethodSymbol> {
    let TypeRef::Named(named) = base else { return Vec::new() };
    let Some(ancestor) = graph.type_by_stable_id(&named.stable_id()) else {
        return Vec::new();
    };
    let mut methods = ancestor.members.methods.clone();
    if let Some(grandparent) = &ancestor.base_type {
        methods.extend(base_methods(graph, grandparent));
    }
    methods
}

pub fn run(graph: &mut SymbolGraph) {
    let class_ids: Vec<TypeStableId> = graph.types().map(|t| t.stable_id.clone()).collect();

    for class_id in class_ids {
        let ty = graph.type_by_stable_id(&class_id).unwrap();
        let Some(base) = ty.base_type.clone() else { continue };

        let own_names: HashSet<String> = ty.members.methods.iter().map(|m| m.common.clr_name.clone()).collect();
        let own_signatures: HashSet<_> = ty.members.methods.iter().map(|m| m.signature.clone()).collect();

        let ancestor_methods = base_methods(graph, &base);
        let declaring_name = class_id.clr_full_name().to_string();
        let assembly = class_id.assembly_name().to_string();

        let mut additions = Vec::new();
        for ancestor_method in &ancestor_methods {
            if !own_names.contains(&ancestor_method.common.clr_name) {
                continue;
            }
            if own_signatures.contains(&ancestor_method.signature) {
                continue;
            }
            let mut synthetic = ancestor_method.clone();
            synthetic.common.stable_id = ancestor_method.common.stable_id.retarget(&declaring_name, &assembly);
            synthetic.common.provenance = Provenance::BaseOverload;
            synthetic.common.emit_scope = EmitScope::ClassSurface;
            additions.push(synthetic);
        }

        if additions.is_empty() {
            continue;
        }
        let ty = graph.type_by_stable_id_mut(&class_id).unwrap();
        ty.members.methods.extend(additions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clrbind_model::ids::MemberStableId;
    use clrbind_model::member::{MemberCommon, ParameterSymbol};
    use clrbind_model::signature::CanonicalSignature;
    use clrbind_model::type_ref::NamedTypeRef;
    use clrbind_model::{TypeKind, TypeSymbol};

    fn method(declaring: &str, name: &str, param_ty: Option<&str>) -> MethodSymbol {
        let params: Vec<_> = param_ty
            .map(|t| vec![(TypeRef::named_simple(t), clrbind_model::signature::ParamModifierTag::None)])
            .unwrap_or_default();
        let sig = CanonicalSignature::for_method(&params, &TypeRef::named_simple("System.Void"));
        MethodSymbol {
            common: MemberCommon::new(MemberStableId::new("asm", declaring, name, &sig), name),
            generic_parameters: vec![],
            parameters: params
                .iter()
                .map(|(ty, _)| ParameterSymbol {
                    name: "p".to_string(),
                    ty: ty.clone(),
                    modifier: clrbind_model::ParameterModifier::None,
                    has_default: false,
                })
                .collect(),
            return_type: TypeRef::named_simple("System.Void"),
            is_static: false,
            is_abstract: false,
            is_virtual: true,
            signature: sig,
        }
    }

    #[test]
    fn adds_missing_base_overload_to_derived_surface() {
        let mut graph = SymbolGraph::new();
        let mut base = TypeSymbol::new(TypeStableId::new("asm", "App.Base"), TypeKind::Class);
        base.members.methods.push(method("App.Base", "Write", None));
        base.members.methods.push(method("App.Base", "Write", Some("System.String")));
        graph.insert_type("App", base).unwrap();

        let mut derived = TypeSymbol::new(TypeStableId::new("asm", "App.Derived"), TypeKind::Class);
        derived.base_type = Some(TypeRef::Named(NamedTypeRef {
            assembly: "asm".into(),
            namespace: "App".into(),
            simple_name: "Base".into(),
            arity: 0,
            type_arguments: vec![],
            interface_stable_id: None,
        }));
        derived.members.methods.push(method("App.Derived", "Write", None));
        graph.insert_type("App", derived).unwrap();

        run(&mut graph);

        let derived = graph.type_by_stable_id(&TypeStableId::new("asm", "App.Derived")).unwrap();
        assert_eq!(derived.members.methods.len(), 2);
        let synthetic = derived.members.methods.iter().find(|m| m.common.provenance == Provenance::BaseOverload).unwrap();
        assert_eq!(synthetic.common.stable_id.assembly_name(), "asm");
        assert_eq!(synthetic.common.stable_id.declaring_clr_full_name(), "App.Derived");
    }
}
