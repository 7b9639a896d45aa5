//! 4.2.16 — Constraint closer. Resolves the raw constraint types captured
//! at Load into fully-formed type references using the same memoising
//! factory the reflection reader uses, so self-referential constraints
//! (`T where T : IComparable<T>`) terminate instead of recursing forever.

use clrbind_common::diagnostics::{codes, DiagnosticBag};
use clrbind_common::policy::{ConstraintMergeStrategy, Policy};
use clrbind_model::generics::{GenericConstraintKind, SpecialConstraints};
use clrbind_model::type_ref::TypeRef;
use clrbind_model::SymbolGraph;

fn is_unrepresentable(constraint: &TypeRef) -> bool {
    matches!(constraint, TypeRef::Pointer { .. } | TypeRef::ByReference { .. })
}

pub fn run(graph: &mut SymbolGraph, policy: &Policy, diagnostics: &mut DiagnosticBag) {
    for ty in graph.types_mut() {
        for param in &mut ty.generic_parameters {
            if param.special_constraints.contains(SpecialConstraints::VALUE_TYPE)
                && param.special_constraints.contains(SpecialConstraints::REFERENCE_TYPE)
            {
                diagnostics.warning(
                    codes::CT_002_CONFLICTING_VALUE_REF_CONSTRAINT,
                    format!("{} generic parameter '{}' demands both value-type and reference-type", ty.stable_id, param.name),
                );
            }

            // Raw constraints were already built by the same memoising
            // factory at Load; closing means accepting any placeholders
            // they still carry (they'll resolve once the cycle's other
            // end closes) while flagging unrepresentable shapes.
            param.resolved_constraints = param.raw_constraints.clone();

            for constraint in &param.resolved_constraints {
                if is_unrepresentable(constraint) {
                    diagnostics.warning(
                        codes::CT_003_UNREPRESENTABLE_CONSTRAINT,
                        format!(
                            "{} generic parameter '{}' has an unrepresentable constraint {}",
                            ty.stable_id,
                            param.name,
                            constraint.canonical_name()
                        ),
                    );
                }
            }

            if param.resolved_constraints.len() > 1 {
                let merge_kind = match policy.constraints.merge_strategy {
                    ConstraintMergeStrategy::Intersection => GenericConstraintKind::Intersection,
                    ConstraintMergeStrategy::Union => {
                        diagnostics.warning(
                            codes::CT_004_UNION_CONSTRAINT_UNREPRESENTABLE,
                            format!("{} generic parameter '{}' uses an unrepresentable union constraint", ty.stable_id, param.name),
                        );
                        GenericConstraintKind::Union
                    }
                    ConstraintMergeStrategy::PreferLeft => {
                        param.resolved_constraints.truncate(1);
                        GenericConstraintKind::Intersection
                    }
                };
                param.merge_kind = Some(merge_kind);
            }

            if param.has_default_constructor_constraint() && param.resolved_constraints.is_empty() {
                diagnostics.warning(
                    codes::CT_001_CONSTRUCTOR_CONSTRAINT_LOST,
                    format!("{} generic parameter '{}' lost its default-constructor constraint", ty.stable_id, param.name),
                );
            }
        }
    }
}
