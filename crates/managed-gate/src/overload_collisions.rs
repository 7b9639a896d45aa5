//! Overload collisions rule family (spec.md §4.7): after the overload
//! unifier has run, no two surviving surface-scope methods on the same
//! type may share an erased signature -- the unifier is supposed to
//! guarantee this; this is the audit that confirms it held.

use clrbind_common::diagnostics::{codes, DiagnosticBag};
use clrbind_model::member::EmitScope;
use clrbind_model::SymbolGraph;
use std::collections::HashMap;

pub fn run(graph: &SymbolGraph, diagnostics: &mut DiagnosticBag) {
    for ty in graph.types() {
        let mut seen: HashMap<(String, u8, usize), &str> = HashMap::new();
        for m in &ty.members.methods {
            if !matches!(m.common.emit_scope, EmitScope::ClassSurface | EmitScope::StaticSurface) {
                continue;
            }
            let Some(name) = &m.common.target_emit_name else { continue };
            let key = (name.clone(), m.generic_parameters.len() as u8, m.parameters.len());
            if let Some(prior) = seen.insert(key, m.common.stable_id.as_str()) {
                if prior != m.common.stable_id.as_str() {
                    diagnostics.error(
                        codes::OV_002_EROSION_COLLISION,
                        format!("{} and {} erase to the same overload on {}", prior, m.common.stable_id, ty.stable_id),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clrbind_model::ids::{MemberStableId, TypeStableId};
    use clrbind_model::member::MemberCommon;
    use clrbind_model::signature::CanonicalSignature;
    use clrbind_model::type_ref::TypeRef;
    use clrbind_model::{MethodSymbol, TypeKind, TypeSymbol};

    fn method(name: &str, target: &str) -> MethodSymbol {
        let signature = CanonicalSignature::for_method(&[], &TypeRef::named_simple("System.Void"));
        let mut common = MemberCommon::new(MemberStableId::new("asm", "App.Widget", name, &signature), name);
        common.emit_scope = EmitScope::ClassSurface;
        common.target_emit_name = Some(target.into());
        MethodSymbol { common, generic_parameters: vec![], parameters: vec![], return_type: TypeRef::named_simple("System.Void"), is_static: false, is_abstract: false, is_virtual: false, signature }
    }

    #[test]
    fn two_members_erasing_to_the_same_name_is_an_error() {
        let mut graph = SymbolGraph::new();
        let mut ty = TypeSymbol::new(TypeStableId::new("asm", "App.Widget"), TypeKind::Class);
        ty.members.methods.push(method("Run", "run"));
        ty.members.methods.push(method("run", "run"));
        graph.insert_type("App", ty).unwrap();

        let mut diagnostics = DiagnosticBag::new();
        run(&graph, &mut diagnostics);
        assert!(diagnostics.has_errors());
    }
}
