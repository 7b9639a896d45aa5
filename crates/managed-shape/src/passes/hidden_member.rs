//! 4.2.13 — Hidden-member planner. For members that shadow a base member
//! under the source language's explicit `new` keyword, asks the Renamer
//! to reserve an alternative name under the class's instance or static
//! scope. Does not modify the graph's member list itself.

use clrbind_common::policy::Policy;
use clrbind_common::DiagnosticBag;
use clrbind_model::member::Provenance;
use clrbind_model::SymbolGraph;
use clrbind_rename::style::apply_member_style;
use clrbind_rename::{Kind, Renamer, ReservationRequest, ScopeKey, Staticness};

/// A member is treated as hidden-new if Load marked its provenance
/// `HiddenNew` (spec.md §3, populated when the reflection reader detects
/// a derived member with the same signature as a non-virtual base
/// member).
pub fn run(
    graph: &SymbolGraph,
    renamer: &mut Renamer,
    policy: &Policy,
    diagnostics: &mut DiagnosticBag,
) {
    for ty in graph.types() {
        let type_full_name = ty.stable_id.clr_full_name();
        for common in ty.members.all_common() {
            if common.provenance != Provenance::HiddenNew {
                continue;
            }
            let staticness = Staticness::from_bool(common.emit_scope.is_static());
            let scope = ScopeKey::class_surface(type_full_name, staticness);
            let styled = apply_member_style(&common.clr_name, policy.naming.member_style);
            let override_name = format!("{styled}{}", policy.classes.hidden_member_suffix);
            // Keyed by the plain CLR name, not the stable id: Name
            // Reservation's per-member loop will reserve this same
            // (scope, clr_name) pair again with no override once Plan
            // runs, and `Renamer::reserve` is idempotent on that pair --
            // whichever reservation happens first wins. Keying this
            // override by the stable id instead would put it under an
            // entry the later, unconditional reservation never looks up,
            // silently dropping the suffix.
            renamer.reserve(
                ReservationRequest {
                    scope,
                    clr_name: &common.clr_name,
                    kind: Kind::Member,
                    override_name: Some(&override_name),
                    interface_qualifier: None,
                },
                policy,
                diagnostics,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clrbind_model::ids::MemberStableId;
    use clrbind_model::member::{MemberCommon, MethodSymbol, ParameterSymbol};
    use clrbind_model::signature::CanonicalSignature;
    use clrbind_model::{EmitScope, TypeKind, TypeRef, TypeStableId, TypeSymbol};

    #[test]
    fn reserves_a_suffixed_name_for_hidden_members() {
        let mut graph = SymbolGraph::new();
        let mut ty = TypeSymbol::new(TypeStableId::new("asm", "App.Derived"), TypeKind::Class);
        let sig = CanonicalSignature::for_method(&[], &TypeRef::named_simple("System.Void"));
        let mut common = MemberCommon::new(MemberStableId::new("asm", "App.Derived", "Run", &sig), "Run");
        common.provenance = Provenance::HiddenNew;
        common.emit_scope = EmitScope::ClassSurface;
        ty.members.methods.push(MethodSymbol {
            common,
            generic_parameters: vec![],
            parameters: Vec::<ParameterSymbol>::new(),
            return_type: TypeRef::named_simple("System.Void"),
            is_static: false,
            is_abstract: false,
            is_virtual: false,
            signature: sig,
        });
        graph.insert_type("App", ty).unwrap();

        let mut renamer = Renamer::new();
        let policy = clrbind_common::policy::Policy::default();
        let mut diagnostics = DiagnosticBag::new();
        run(&graph, &mut renamer, &policy, &mut diagnostics);

        let scope = ScopeKey::class_surface("App.Derived", Staticness::Instance);
        let resolved = renamer.lookup(&scope, "Run").unwrap();
        assert_eq!(resolved, "run_new");
    }

    /// Proves the override actually reaches Emit: Name Reservation's
    /// per-member loop (`clrbind_plan::reservation::
    /// reserve_type_and_class_surface_names`) later reserves every
    /// class-surface member again, unconditionally, with no override --
    /// this reproduces that call against the same (scope, clr_name) pair
    /// and checks the suffixed name wins rather than being silently
    /// replaced.
    #[test]
    fn hidden_member_override_survives_the_later_unconditional_reservation() {
        let mut graph = SymbolGraph::new();
        let mut ty = TypeSymbol::new(TypeStableId::new("asm", "App.Derived"), TypeKind::Class);
        let sig = CanonicalSignature::for_method(&[], &TypeRef::named_simple("System.Void"));
        let mut common = MemberCommon::new(MemberStableId::new("asm", "App.Derived", "Run", &sig), "Run");
        common.provenance = Provenance::HiddenNew;
        common.emit_scope = EmitScope::ClassSurface;
        ty.members.methods.push(MethodSymbol {
            common,
            generic_parameters: vec![],
            parameters: Vec::<ParameterSymbol>::new(),
            return_type: TypeRef::named_simple("System.Void"),
            is_static: false,
            is_abstract: false,
            is_virtual: false,
            signature: sig,
        });
        graph.insert_type("App", ty).unwrap();

        let mut renamer = Renamer::new();
        let policy = clrbind_common::policy::Policy::default();
        let mut diagnostics = DiagnosticBag::new();
        run(&graph, &mut renamer, &policy, &mut diagnostics);

        let scope = ScopeKey::class_surface("App.Derived", Staticness::Instance);
        let resolved = renamer.reserve(
            ReservationRequest { scope, clr_name: "Run", kind: Kind::Member, override_name: None, interface_qualifier: None },
            &policy,
            &mut diagnostics,
        );
        assert_eq!(resolved, "run_new");
    }
}
