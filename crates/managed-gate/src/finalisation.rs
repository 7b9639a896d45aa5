//! Finalisation rule family (spec.md §4.7): every symbol has an explicit
//! emit scope and a final name in the correct scope. This is the family
//! that would fail loudest if Name Reservation's step 0 default (see
//! DESIGN.md, clrbind-plan::reservation) were ever skipped.

use clrbind_common::diagnostics::{codes, DiagnosticBag};
use clrbind_model::member::EmitScope;
use clrbind_model::SymbolGraph;

pub fn run(graph: &SymbolGraph, diagnostics: &mut DiagnosticBag) {
    for ty in graph.types() {
        for common in ty.members.all_common() {
            match common.emit_scope {
                EmitScope::Unspecified => {
                    diagnostics.error(
                        codes::FIN_001_UNSPECIFIED_EMIT_SCOPE,
                        format!("{} reached Phase Gate with an unspecified emit scope", common.stable_id),
                    );
                }
                EmitScope::Omitted => {
                    if common.target_emit_name.is_none() {
                        diagnostics.warning(
                            codes::FIN_002_OMITTED_WITH_NO_BINDING,
                            format!("{} is omitted and carries no target name for the binding sidecar", common.stable_id),
                        );
                    }
                }
                EmitScope::ClassSurface | EmitScope::StaticSurface | EmitScope::ViewOnly => {
                    if common.target_emit_name.is_none() {
                        diagnostics.error(codes::FIN_003_MISSING_RENAME_DECISION, format!("{} has no rename decision in its scope", common.stable_id));
                    }
                }
            }
        }

        if ty.target_emit_name.is_none() {
            diagnostics.error(codes::FIN_003_MISSING_RENAME_DECISION, format!("{} has no assigned type name", ty.stable_id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clrbind_model::ids::{MemberStableId, TypeStableId};
    use clrbind_model::member::{MemberCommon, MethodSymbol, Provenance};
    use clrbind_model::signature::CanonicalSignature;
    use clrbind_model::type_ref::TypeRef;
    use clrbind_model::{TypeKind, TypeSymbol};

    fn method(name: &str) -> MethodSymbol {
        let signature = CanonicalSignature::for_method(&[], &TypeRef::named_simple("System.Void"));
        let stable_id = MemberStableId::new("asm", "App.Widget", name, &signature);
        MethodSymbol {
            common: MemberCommon::new(stable_id, name),
            generic_parameters: vec![],
            parameters: vec![],
            return_type: TypeRef::named_simple("System.Void"),
            is_static: false,
            is_abstract: false,
            is_virtual: false,
            signature,
        }
    }

    #[test]
    fn unspecified_scope_is_an_error() {
        let mut graph = SymbolGraph::new();
        let mut ty = TypeSymbol::new(TypeStableId::new("asm", "App.Widget"), TypeKind::Class);
        ty.target_emit_name = Some("Widget".into());
        ty.members.methods.push(method("DoWork"));
        graph.insert_type("App", ty).unwrap();

        let mut diagnostics = DiagnosticBag::new();
        run(&graph, &mut diagnostics);
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn fully_named_class_surface_member_passes() {
        let mut graph = SymbolGraph::new();
        let mut ty = TypeSymbol::new(TypeStableId::new("asm", "App.Widget"), TypeKind::Class);
        ty.target_emit_name = Some("Widget".into());
        let mut m = method("DoWork");
        m.common.emit_scope = EmitScope::ClassSurface;
        m.common.target_emit_name = Some("doWork".into());
        m.common.provenance = Provenance::Original;
        ty.members.methods.push(m);
        graph.insert_type("App", ty).unwrap();

        let mut diagnostics = DiagnosticBag::new();
        run(&graph, &mut diagnostics);
        assert!(!diagnostics.has_errors());
    }
}
