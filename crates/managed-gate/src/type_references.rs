//! Type references rule family (spec.md §4.7): no placeholder reference
//! escapes to a non-omitted member (INT_002), pointers/by-reference forms
//! in an emitted signature are flagged for the printer's erasure
//! (TYPEMAP_*), and the target emit name stamped on a member always
//! matches what the Renamer itself would return for that scope/name pair
//! (PRINT_001 -- a printer-vs-renamer mismatch would mean Emit renders a
//! name nobody reserved).

use clrbind_common::diagnostics::{codes, DiagnosticBag};
use clrbind_model::member::EmitScope;
use clrbind_model::type_ref::TypeRef;
use clrbind_model::SymbolGraph;
use clrbind_rename::scope::{ScopeKey, Staticness};
use clrbind_rename::Renamer;

fn contains_placeholder(ty: &TypeRef) -> bool {
    match ty {
        TypeRef::Placeholder { .. } => true,
        TypeRef::Array { element, .. } | TypeRef::Pointer { pointee: element, .. } => contains_placeholder(element),
        TypeRef::ByReference { referent } => contains_placeholder(referent),
        TypeRef::Nested { full, .. } => contains_placeholder(full),
        TypeRef::Named(named) => named.type_arguments.iter().any(contains_placeholder),
        TypeRef::GenericParameter { .. } => false,
    }
}

fn flag_unrepresentable(ty: &TypeRef, owner: &str, diagnostics: &mut DiagnosticBag) {
    match ty {
        TypeRef::Pointer { .. } => {
            diagnostics.warning(codes::TYPEMAP_001_POINTER_ERASED, format!("{owner} has a pointer type erased on the emitted surface"));
        }
        TypeRef::ByReference { .. } => {
            diagnostics.warning(codes::TYPEMAP_002_BYREF_ERASED, format!("{owner} has a by-reference type erased on the emitted surface"));
        }
        TypeRef::Array { element, .. } => flag_unrepresentable(element, owner, diagnostics),
        TypeRef::Named(named) => {
            for arg in &named.type_arguments {
                flag_unrepresentable(arg, owner, diagnostics);
            }
        }
        TypeRef::Nested { full, .. } => flag_unrepresentable(full, owner, diagnostics),
        TypeRef::GenericParameter { .. } | TypeRef::Placeholder { .. } => {}
    }
}

pub fn run(graph: &SymbolGraph, renamer: &Renamer, diagnostics: &mut DiagnosticBag) {
    for ty in graph.types() {
        for m in &ty.members.methods {
            if m.common.emit_scope == EmitScope::Omitted {
                continue;
            }
            for p in &m.parameters {
                if contains_placeholder(&p.ty) {
                    diagnostics.error(codes::INT_002_PLACEHOLDER_ESCAPED, format!("{} has a placeholder in a parameter type", m.common.stable_id));
                }
                flag_unrepresentable(&p.ty, m.common.stable_id.as_str(), diagnostics);
            }
            if contains_placeholder(&m.return_type) {
                diagnostics.error(codes::INT_002_PLACEHOLDER_ESCAPED, format!("{} has a placeholder in its return type", m.common.stable_id));
            }
        }
        for p in &ty.members.properties {
            if p.common.emit_scope == EmitScope::Omitted {
                continue;
            }
            if contains_placeholder(&p.property_type) {
                diagnostics.error(codes::INT_002_PLACEHOLDER_ESCAPED, format!("{} has a placeholder property type", p.common.stable_id));
            }
        }

        check_printer_consistency(ty, renamer, diagnostics);
    }
}

fn check_printer_consistency(ty: &clrbind_model::TypeSymbol, renamer: &Renamer, diagnostics: &mut DiagnosticBag) {
    for common in ty.members.all_common() {
        let Some(target_name) = &common.target_emit_name else { continue };
        let scope = match common.emit_scope {
            EmitScope::ClassSurface => ScopeKey::class_surface(ty.stable_id.clr_full_name(), Staticness::Instance),
            EmitScope::StaticSurface => ScopeKey::class_surface(ty.stable_id.clr_full_name(), Staticness::Static),
            EmitScope::ViewOnly => {
                let Some(iface) = &common.source_interface else { continue };
                ScopeKey::view_surface_for(&ty.stable_id, iface, Staticness::Instance)
            }
            EmitScope::Unspecified | EmitScope::Omitted => continue,
        };

        match renamer.lookup(&scope, &common.clr_name) {
            Some(authoritative) if authoritative == target_name => {}
            _ => {
                diagnostics.error(
                    codes::PRINT_001_NAME_MISMATCH,
                    format!("{} carries target name '{target_name}' that does not match the Renamer's record", common.stable_id),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_placeholder_is_detected() {
        let nested = TypeRef::Array { element: Box::new(TypeRef::Placeholder { reason: "cycle".into() }), rank: 1 };
        assert!(contains_placeholder(&nested));
    }

    #[test]
    fn ordinary_named_type_has_no_placeholder() {
        assert!(!contains_placeholder(&TypeRef::named_simple("System.String")));
    }
}
