//! Constraints rule family (spec.md §4.7): every constructor-constraint
//! loss the auditor (`clrbind-plan::constraint_auditor`) found was
//! actually recorded as a diagnostic -- catches a call site that
//! collected the finding but forgot to push it to the bag.

use clrbind_common::diagnostics::{codes, DiagnosticBag};
use clrbind_plan::constraint_auditor::ConstructorConstraintLoss;

pub fn run(findings: &[ConstructorConstraintLoss], diagnostics: &mut DiagnosticBag) {
    let recorded = diagnostics.entries().iter().filter(|d| d.code == codes::CT_001_CONSTRUCTOR_CONSTRAINT_LOST).count();
    if recorded < findings.len() {
        diagnostics.error(
            codes::CT_001_CONSTRUCTOR_CONSTRAINT_LOST,
            format!("constraint auditor found {} loss(es) but only {recorded} were recorded as diagnostics", findings.len()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clrbind_model::ids::TypeStableId;

    #[test]
    fn unrecorded_finding_is_flagged() {
        let findings = vec![ConstructorConstraintLoss {
            implementing_type: TypeStableId::new("asm", "App.Widget"),
            interface: TypeStableId::new("asm", "App.IFactory"),
            parameter_name: "T".into(),
        }];
        let mut diagnostics = DiagnosticBag::new();
        run(&findings, &mut diagnostics);
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn recorded_finding_passes() {
        let findings = vec![ConstructorConstraintLoss {
            implementing_type: TypeStableId::new("asm", "App.Widget"),
            interface: TypeStableId::new("asm", "App.IFactory"),
            parameter_name: "T".into(),
        }];
        let mut diagnostics = DiagnosticBag::new();
        diagnostics.warning(codes::CT_001_CONSTRUCTOR_CONSTRAINT_LOST, "App.Widget implements App.IFactory whose parameter T requires a parameterless constructor");
        run(&findings, &mut diagnostics);
        assert!(!diagnostics.has_errors());
    }
}
