//! 4.2.14 — Indexer planner + final indexer sweep. Policy-driven: a type
//! with exactly one indexer keeps it as a property when policy allows;
//! otherwise every indexer becomes a pair of synthetic `get_Item`/
//! `set_Item` methods with provenance *indexer-normalized*, and the
//! original property is omitted. The final sweep enforces "no indexer
//! property remains unless the single-property policy applies".

use clrbind_common::diagnostics::{codes, DiagnosticBag};
use clrbind_common::policy::Policy;
use clrbind_model::member::{MemberCommon, Provenance};
use clrbind_model::signature::CanonicalSignature;
use clrbind_model::{EmitScope, MethodSymbol, SymbolGraph};

fn make_accessor(
    indexer: &clrbind_model::PropertySymbol,
    method_name: &str,
    is_setter: bool,
) -> MethodSymbol {
    let mut parameters = indexer.index_parameters.clone();
    let return_type = if is_setter {
        parameters.push(clrbind_model::ParameterSymbol {
            name: "value".to_string(),
            ty: indexer.property_type.clone(),
            modifier: clrbind_model::ParameterModifier::None,
            has_default: false,
        });
        clrbind_model::type_ref::TypeRef::named_simple("System.Void")
    } else {
        indexer.property_type.clone()
    };

    let param_types: Vec<_> = parameters
        .iter()
        .map(|p| (p.ty.clone(), clrbind_model::signature::ParamModifierTag::None))
        .collect();
    let signature = CanonicalSignature::for_method(&param_types, &return_type);

    let mut common = MemberCommon::new(
        clrbind_model::ids::MemberStableId::new(
            indexer.common.stable_id.assembly_name(),
            indexer.common.stable_id.declaring_clr_full_name(),
            method_name,
            &signature,
        ),
        method_name,
    );
    common.is_public = indexer.common.is_public;
    common.provenance = Provenance::IndexerNormalized;
    common.emit_scope = indexer.common.emit_scope;

    MethodSymbol {
        common,
        generic_parameters: vec![],
        parameters,
        return_type,
        is_static: indexer.is_static,
        is_abstract: false,
        is_virtual: false,
        signature,
    }
}

pub fn run(graph: &mut SymbolGraph, policy: &Policy, diagnostics: &mut DiagnosticBag) {
    for ty in graph.types_mut() {
        let indexer_positions: Vec<usize> = ty
            .members
            .properties
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_indexer() && p.common.emit_scope != EmitScope::Omitted)
            .map(|(i, _)| i)
            .collect();

        let keep_as_property = indexer_positions.len() == 1 && policy.indexers.emit_property_when_single;

        if keep_as_property {
            continue;
        }

        let method_name = &policy.indexers.method_name;
        let mut new_methods = Vec::new();
        for &idx in &indexer_positions {
            let indexer = &ty.members.properties[idx];
            if indexer.has_getter {
                new_methods.push(make_accessor(indexer, &format!("get_{method_name}"), false));
            }
            if indexer.has_setter {
                new_methods.push(make_accessor(indexer, &format!("set_{method_name}"), true));
            }
        }
        for &idx in &indexer_positions {
            ty.members.properties[idx].common.emit_scope = EmitScope::Omitted;
        }
        if !new_methods.is_empty() {
            diagnostics.info(
                codes::INDEXER_001_MULTIPLE_CONVERTED,
                format!("{} converted {} indexer(s) to get_/set_ methods", ty.stable_id, indexer_positions.len()),
            );
        }
        ty.members.methods.extend(new_methods);
    }
}
