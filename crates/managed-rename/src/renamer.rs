//! The Renamer: the single naming authority every phase after Shape
//! consults (spec.md §4.3). Reservation is a five-step algorithm:
//! override, style transform, reserved-word sanitization, collision
//! resolution, and recording the decision.

use crate::reserved::sanitize;
use crate::scope::ScopeKey;
use crate::style::{apply_member_style, apply_type_style};
use clrbind_common::diagnostics::{codes, DiagnosticBag};
use clrbind_common::policy::{MemberStyle, Policy, TypeStyle};
use indexmap::IndexMap;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Kind {
    Type,
    Member,
}

/// What a caller is asking the Renamer to reserve a name for: the CLR
/// name, an optional explicit override (from `policy.typeRenames` or a
/// future per-member equivalent), and a qualifier used only when a
/// collision needs an interface-qualified suffix (§4.3 step 4).
pub struct ReservationRequest<'a> {
    pub scope: ScopeKey,
    pub clr_name: &'a str,
    pub kind: Kind,
    pub override_name: Option<&'a str>,
    /// Short name of the declaring interface, used to break a collision
    /// with `{name}_{interface}` before falling back to a numeric suffix.
    pub interface_qualifier: Option<&'a str>,
}

/// The recorded outcome of a single reservation: the scope it was
/// reserved under and the final emitted name, kept so Plan and Emit
/// never have to re-derive a name (§4.3: "every phase after Shape reads
/// names from the Renamer, never recomputes them").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenameDecision {
    pub scope: ScopeKey,
    pub clr_name: String,
    pub emitted_name: String,
    /// True if the final name differs from the direct style-transformed
    /// candidate, because of a collision or reserved-word sanitization.
    pub was_adjusted: bool,
}

/// A scope-keyed naming authority. Each [`ScopeKey`] owns an independent
/// namespace of already-reserved names; the same CLR name can resolve to
/// different emitted names in different scopes without conflict (§4.3:
/// "names are scoped, not global").
#[derive(Default)]
pub struct Renamer {
    reserved: IndexMap<ScopeKey, IndexMap<String, RenameDecision>>,
}

impl Renamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a name within `request.scope`, returning the final
    /// emitted name. Idempotent: re-reserving the same (scope, clr_name)
    /// pair returns the previously recorded decision rather than
    /// reprocessing it, since Shape passes may revisit a member more
    /// than once before Plan finalises anything.
    pub fn reserve(
        &mut self,
        request: ReservationRequest<'_>,
        policy: &Policy,
        diagnostics: &mut DiagnosticBag,
    ) -> String {
        let scope_table = self.reserved.entry(request.scope.clone()).or_default();
        if let Some(existing) = scope_table.get(request.clr_name) {
            return existing.emitted_name.clone();
        }

        // Step 1: explicit override from policy, if present.
        let base_candidate = match request.override_name {
            Some(name) => name.to_string(),
            None => match request.kind {
                Kind::Type => apply_type_style(request.clr_name, policy.naming.type_style),
                Kind::Member => apply_member_style(request.clr_name, policy.naming.member_style),
            },
        };

        // Step 2/3: style was applied above (skipped when an override
        // supplies the name verbatim); now sanitize against reserved
        // words.
        let sanitized = sanitize(&base_candidate);

        // Step 4: collision resolution. Interface-qualified suffix
        // first, then a numeric suffix, appended until the scope table
        // no longer has this candidate under a different CLR name.
        let already_taken = |table: &IndexMap<String, RenameDecision>, candidate: &str| {
            table.values().any(|d| d.emitted_name == candidate && d.clr_name != request.clr_name)
        };

        let mut final_name = sanitized.clone();
        let mut was_adjusted = sanitized != base_candidate;

        if already_taken(scope_table, &final_name) {
            was_adjusted = true;
            if let Some(qualifier) = request.interface_qualifier {
                let qualified = sanitize(&format!("{sanitized}_{qualifier}"));
                if !already_taken(scope_table, &qualified) {
                    final_name = qualified;
                }
            }
        }

        if already_taken(scope_table, &final_name) {
            let mut attempt = 2u32;
            loop {
                let candidate = sanitize(&format!("{sanitized}{attempt}"));
                if !already_taken(scope_table, &candidate) {
                    final_name = candidate;
                    break;
                }
                attempt += 1;
            }
        }

        if was_adjusted {
            diagnostics.info(
                codes::NAME_002_COLLISION_RESOLVED,
                format!(
                    "{} collided in scope {}; resolved to {}",
                    request.clr_name, request.scope, final_name
                ),
            );
        }

        scope_table.insert(
            request.clr_name.to_string(),
            RenameDecision {
                scope: request.scope.clone(),
                clr_name: request.clr_name.to_string(),
                emitted_name: final_name.clone(),
                was_adjusted,
            },
        );

        final_name
    }

    /// Look up a previously reserved name. Requires a surface scope
    /// (§4.3: "lookup requires a surface scope"; namespace scopes exist
    /// only to seed type-name reservation, not for member lookup).
    pub fn lookup(&self, scope: &ScopeKey, clr_name: &str) -> Option<&str> {
        if !scope.is_surface_scope() && !scope.is_namespace_scope() {
            return None;
        }
        self.reserved.get(scope)?.get(clr_name).map(|d| d.emitted_name.as_str())
    }

    pub fn decisions_in_scope(&self, scope: &ScopeKey) -> impl Iterator<Item = &RenameDecision> {
        self.reserved.get(scope).into_iter().flat_map(|t| t.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::{NamespaceVisibility, Staticness};
    use clrbind_common::DiagnosticBag;

    fn request<'a>(scope: ScopeKey, clr_name: &'a str) -> ReservationRequest<'a> {
        ReservationRequest {
            scope,
            clr_name,
            kind: Kind::Member,
            override_name: None,
            interface_qualifier: None,
        }
    }

    #[test]
    fn reservation_is_idempotent() {
        let mut renamer = Renamer::new();
        let mut diags = DiagnosticBag::new();
        let policy = Policy::default();
        let scope = ScopeKey::class_surface("App.Widget", Staticness::Instance);
        let first = renamer.reserve(request(scope.clone(), "GetValue"), &policy, &mut diags);
        let second = renamer.reserve(request(scope.clone(), "GetValue"), &policy, &mut diags);
        assert_eq!(first, second);
        assert_eq!(first, "getValue");
    }

    #[test]
    fn collision_falls_back_to_interface_qualifier_then_numeric_suffix() {
        let mut renamer = Renamer::new();
        let mut diags = DiagnosticBag::new();
        let policy = Policy::default();
        let scope = ScopeKey::class_surface("App.Widget", Staticness::Instance);

        let first = renamer.reserve(
            ReservationRequest { kind: Kind::Member, ..request(scope.clone(), "run") },
            &policy,
            &mut diags,
        );
        assert_eq!(first, "run");

        let second = renamer.reserve(
            ReservationRequest {
                interface_qualifier: Some("IRunner"),
                kind: Kind::Member,
                ..request(scope.clone(), "Run")
            },
            &policy,
            &mut diags,
        );
        assert_eq!(second, "run_IRunner");
        assert!(diags.has_errors() == false);
    }

    #[test]
    fn reserved_word_candidates_get_sanitized() {
        let mut renamer = Renamer::new();
        let mut diags = DiagnosticBag::new();
        let policy = Policy::default();
        let scope = ScopeKey::class_surface("App.Widget", Staticness::Static);
        let name = renamer.reserve(request(scope, "New"), &policy, &mut diags);
        assert_eq!(name, "new_");
    }

    #[test]
    fn lookup_requires_a_surface_scope() {
        let mut renamer = Renamer::new();
        let mut diags = DiagnosticBag::new();
        let policy = Policy::default();
        let scope = ScopeKey::namespace("App", NamespaceVisibility::Public);
        renamer.reserve(request(scope.clone(), "Widget"), &policy, &mut diags);
        assert!(renamer.lookup(&scope, "Widget").is_some());
    }
}
