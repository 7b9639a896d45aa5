//! Overload unifier (spec.md §4.5). Runs after Name Reservation, because
//! its erasure key is built from *target* names: a structurally-typed
//! surface cannot distinguish two members by parameter type alone, only
//! by name and shape, so CLR overloads that erase to the same key must
//! collapse to the single widest member. Deliberately separate from
//! Shape so it never races against a name that hasn't been assigned yet.

use clrbind_model::member::EmitScope;
use clrbind_model::SymbolGraph;
use std::collections::HashMap;

/// `(target name, generic arity, parameter count)`, restricted to
/// surface scopes -- view-only and omitted members never participate.
type ErasureKey = (String, u8, usize);

fn erasure_key(method: &clrbind_model::MethodSymbol) -> Option<ErasureKey> {
    let name = method.common.target_emit_name.clone()?;
    Some((name, method.generic_parameters.len() as u8, method.parameters.len()))
}

fn constraint_count(method: &clrbind_model::MethodSymbol) -> usize {
    method.generic_parameters.iter().map(|p| p.resolved_constraints.len()).sum()
}

/// Within a group of colliding overloads, the widest one wins: fewer
/// by-reference parameters, then fewer generic constraints, then the
/// lexicographically earliest stable id.
fn is_wider(candidate: &clrbind_model::MethodSymbol, current_best: &clrbind_model::MethodSymbol) -> bool {
    let a = (candidate.byref_parameter_count(), constraint_count(candidate), candidate.common.stable_id.as_str());
    let b = (current_best.byref_parameter_count(), constraint_count(current_best), current_best.common.stable_id.as_str());
    a < b
}

pub fn run(graph: &mut SymbolGraph) {
    for ty in graph.types_mut() {
        let mut groups: HashMap<ErasureKey, Vec<usize>> = HashMap::new();
        for (idx, method) in ty.members.methods.iter().enumerate() {
            if !matches!(method.common.emit_scope, EmitScope::ClassSurface | EmitScope::StaticSurface) {
                continue;
            }
            if let Some(key) = erasure_key(method) {
                groups.entry(key).or_default().push(idx);
            }
        }

        for (_, indices) in groups {
            if indices.len() < 2 {
                continue;
            }
            let winner_idx = *indices
                .iter()
                .reduce(|best, candidate| if is_wider(&ty.members.methods[*candidate], &ty.members.methods[*best]) { candidate } else { best })
                .unwrap();
            for idx in indices {
                if idx != winner_idx {
                    ty.members.methods[idx].common.emit_scope = EmitScope::Omitted;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clrbind_model::ids::MemberStableId;
    use clrbind_model::member::{MemberCommon, ParameterModifier, ParameterSymbol};
    use clrbind_model::signature::{CanonicalSignature, ParamModifierTag};
    use clrbind_model::type_ref::TypeRef;
    use clrbind_model::{MethodSymbol, TypeKind, TypeStableId, TypeSymbol};

    fn method(declaring: &str, name: &str, param_ty: Option<&str>, target_name: &str, byref: bool) -> MethodSymbol {
        let modifier = if byref { ParamModifierTag::Ref } else { ParamModifierTag::None };
        let params: Vec<_> = param_ty.map(|t| vec![(TypeRef::named_simple(t), modifier)]).unwrap_or_default();
        let sig = CanonicalSignature::for_method(&params, &TypeRef::named_simple("System.Void"));
        let mut common = MemberCommon::new(MemberStableId::new("asm", declaring, name, &sig), name);
        common.target_emit_name = Some(target_name.to_string());
        common.emit_scope = EmitScope::ClassSurface;
        MethodSymbol {
            common,
            generic_parameters: vec![],
            parameters: params
                .iter()
                .map(|(ty, modifier)| ParameterSymbol {
                    name: "p".into(),
                    ty: ty.clone(),
                    modifier: match modifier {
                        ParamModifierTag::Ref => ParameterModifier::Ref,
                        _ => ParameterModifier::None,
                    },
                    has_default: false,
                })
                .collect(),
            return_type: TypeRef::named_simple("System.Void"),
            is_static: false,
            is_abstract: false,
            is_virtual: false,
            signature: sig,
        }
    }

    #[test]
    fn collapses_overloads_sharing_an_erasure_key_keeping_the_widest() {
        let mut graph = SymbolGraph::new();
        let mut ty = TypeSymbol::new(TypeStableId::new("asm", "App.Widget"), TypeKind::Class);
        ty.members.methods.push(method("App.Widget", "Write", Some("System.String"), "write", false));
        ty.members.methods.push(method("App.Widget", "Write", Some("System.Int32"), "write", true));
        graph.insert_type("App", ty).unwrap();

        run(&mut graph);

        let ty = graph.type_by_stable_id(&TypeStableId::new("asm", "App.Widget")).unwrap();
        let surviving: Vec<_> = ty.members.methods.iter().filter(|m| m.common.emit_scope == EmitScope::ClassSurface).collect();
        assert_eq!(surviving.len(), 1);
        assert_eq!(surviving[0].byref_parameter_count(), 0);
        assert_eq!(surviving[0].parameters[0].modifier, ParameterModifier::None);
    }

    #[test]
    fn distinct_arities_are_not_grouped() {
        let mut graph = SymbolGraph::new();
        let mut ty = TypeSymbol::new(TypeStableId::new("asm", "App.Widget"), TypeKind::Class);
        ty.members.methods.push(method("App.Widget", "Write", None, "write", false));
        ty.members.methods.push(method("App.Widget", "Write", Some("System.String"), "write", false));
        graph.insert_type("App", ty).unwrap();

        run(&mut graph);

        let ty = graph.type_by_stable_id(&TypeStableId::new("asm", "App.Widget")).unwrap();
        assert!(ty.members.methods.iter().all(|m| m.common.emit_scope == EmitScope::ClassSurface));
    }
}
