//! Name Reservation (spec.md §4.4): the single orchestrated pass that
//! drives the Renamer over every namespace, type, and member in a
//! deterministic order, then walks the graph back and stamps each
//! symbol's `target_emit_name`.
//!
//! Shape leaves most ordinary members at `EmitScope::Unspecified` --
//! only the passes that have an opinion (conformance, explicit-impl,
//! indexer, base-overload, ...) set a scope explicitly. Step 0 below
//! defaults every remaining `Unspecified` member to the surface its
//! `is_static` flag implies, the way the spec's Phase Gate invariant
//! ("every symbol has an explicit emit scope") expects by the time Gate
//! runs.

use clrbind_common::diagnostics::{codes, DiagnosticBag};
use clrbind_common::policy::Policy;
use clrbind_model::ids::TypeStableId;
use clrbind_model::member::EmitScope;
use clrbind_model::type_symbol::{TypeAccessibility, TypeSymbol};
use clrbind_model::SymbolGraph;
use clrbind_rename::scope::{NamespaceVisibility, ScopeKey, Staticness};
use clrbind_rename::style::apply_member_style;
use clrbind_rename::{Kind, RenameDecision, Renamer, ReservationRequest};
use indexmap::IndexSet;

fn visibility_of(accessibility: TypeAccessibility) -> NamespaceVisibility {
    match accessibility {
        TypeAccessibility::Public => NamespaceVisibility::Public,
        TypeAccessibility::Internal => NamespaceVisibility::Internal,
    }
}

/// The CLR name used for type-name reservation: the full name with any
/// owning-namespace prefix stripped and the backtick arity marker
/// dropped (`List\`1` -> `List`), since arity is encoded structurally by
/// the target's generic parameter list, not the identifier.
fn simple_type_name(ty: &TypeSymbol, namespace: &str) -> String {
    let full = ty.stable_id.clr_full_name();
    let without_namespace = if namespace.is_empty() {
        full
    } else {
        full.strip_prefix(namespace).and_then(|s| s.strip_prefix('.')).unwrap_or(full)
    };
    without_namespace.split('`').next().unwrap_or(without_namespace).to_string()
}

fn default_emit_scopes(ty: &mut TypeSymbol) {
    for m in &mut ty.members.methods {
        if m.common.emit_scope == EmitScope::Unspecified {
            m.common.emit_scope = if m.is_static { EmitScope::StaticSurface } else { EmitScope::ClassSurface };
        }
    }
    for p in &mut ty.members.properties {
        if p.common.emit_scope == EmitScope::Unspecified {
            p.common.emit_scope = if p.is_static { EmitScope::StaticSurface } else { EmitScope::ClassSurface };
        }
    }
    for f in &mut ty.members.fields {
        if f.common.emit_scope == EmitScope::Unspecified {
            f.common.emit_scope = if f.is_static { EmitScope::StaticSurface } else { EmitScope::ClassSurface };
        }
    }
    for e in &mut ty.members.events {
        if e.common.emit_scope == EmitScope::Unspecified {
            e.common.emit_scope = if e.is_static { EmitScope::StaticSurface } else { EmitScope::ClassSurface };
        }
    }
    for c in &mut ty.members.constructors {
        if c.common.emit_scope == EmitScope::Unspecified {
            c.common.emit_scope = EmitScope::ClassSurface;
        }
    }
}

fn class_scope_for(type_full_name: &str, emit_scope: EmitScope) -> ScopeKey {
    let staticness = Staticness::from_bool(emit_scope == EmitScope::StaticSurface);
    ScopeKey::class_surface(type_full_name, staticness)
}

/// Sort key giving deterministic reservation order within a type: by CLR
/// name then by canonical signature, so reservation order (and therefore
/// any numeric-suffix collision resolution) never depends on extraction
/// order.
fn member_sort_key<'a>(clr_name: &'a str, signature: &'a str) -> (&'a str, &'a str) {
    (clr_name, signature)
}

/// Step 1 & 2: reserve every type name, then every class-surface member.
fn reserve_type_and_class_surface_names(graph: &mut SymbolGraph, renamer: &mut Renamer, policy: &Policy, diagnostics: &mut DiagnosticBag) {
    let namespaces: Vec<String> = graph.namespaces_sorted().into_iter().map(|ns| ns.name.clone()).collect();

    for namespace in &namespaces {
        let mut type_ids: Vec<TypeStableId> = graph.namespace_by_name(namespace).map(|ns| ns.types.clone()).unwrap_or_default();
        type_ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));

        for type_id in &type_ids {
            let ty = graph.type_by_stable_id_mut(type_id).unwrap();
            default_emit_scopes(ty);
        }

        for type_id in &type_ids {
            let ty = graph.type_by_stable_id(type_id).unwrap();
            let visibility = visibility_of(ty.accessibility);
            let simple_name = simple_type_name(ty, namespace);
            let override_name = policy.type_rename(ty.stable_id.clr_full_name()).map(str::to_string);

            renamer.reserve(
                ReservationRequest {
                    scope: ScopeKey::namespace(namespace, visibility),
                    clr_name: &simple_name,
                    kind: Kind::Type,
                    override_name: override_name.as_deref(),
                    interface_qualifier: None,
                },
                policy,
                diagnostics,
            );
        }

        for type_id in type_ids {
            let type_full_name = type_id.clr_full_name().to_string();
            let ty = graph.type_by_stable_id(&type_id).unwrap();

            let mut entries: Vec<(String, String, EmitScope)> = Vec::new();
            for m in &ty.members.methods {
                if matches!(m.common.emit_scope, EmitScope::ClassSurface | EmitScope::StaticSurface) {
                    entries.push((m.common.clr_name.clone(), m.signature.as_str().to_string(), m.common.emit_scope));
                }
            }
            for p in &ty.members.properties {
                if matches!(p.common.emit_scope, EmitScope::ClassSurface | EmitScope::StaticSurface) {
                    entries.push((p.common.clr_name.clone(), p.signature.as_str().to_string(), p.common.emit_scope));
                }
            }
            for f in &ty.members.fields {
                if matches!(f.common.emit_scope, EmitScope::ClassSurface | EmitScope::StaticSurface) {
                    entries.push((f.common.clr_name.clone(), f.signature.as_str().to_string(), f.common.emit_scope));
                }
            }
            for e in &ty.members.events {
                if matches!(e.common.emit_scope, EmitScope::ClassSurface | EmitScope::StaticSurface) {
                    entries.push((e.common.clr_name.clone(), e.signature.as_str().to_string(), e.common.emit_scope));
                }
            }
            for c in &ty.members.constructors {
                if matches!(c.common.emit_scope, EmitScope::ClassSurface | EmitScope::StaticSurface) {
                    entries.push((c.common.clr_name.clone(), c.signature.as_str().to_string(), c.common.emit_scope));
                }
            }
            entries.sort_by(|a, b| member_sort_key(&a.0, &a.1).cmp(&member_sort_key(&b.0, &b.1)));

            for (clr_name, _sig, emit_scope) in entries {
                renamer.reserve(
                    ReservationRequest {
                        scope: class_scope_for(&type_full_name, emit_scope),
                        clr_name: &clr_name,
                        kind: Kind::Member,
                        override_name: None,
                        interface_qualifier: None,
                    },
                    policy,
                    diagnostics,
                );
            }
        }
    }
}

/// Step 3: the union of reserved class-surface names (instance + static)
/// per type, the shadow set view reservations must avoid.
fn class_surface_shadow(renamer: &Renamer, type_full_name: &str) -> IndexSet<String> {
    let mut shadow = IndexSet::new();
    for staticness in [Staticness::Instance, Staticness::Static] {
        let scope = ScopeKey::class_surface(type_full_name, staticness);
        shadow.extend(renamer.decisions_in_scope(&scope).map(|d: &RenameDecision| d.emitted_name.clone()));
    }
    shadow
}

/// Step 4: reserve every view-only member, routing around the
/// class-surface shadow with a `$view` suffix sequence.
fn reserve_view_only_names(graph: &SymbolGraph, renamer: &mut Renamer, policy: &Policy, diagnostics: &mut DiagnosticBag) {
    for ty in graph.types() {
        let type_full_name = ty.stable_id.clr_full_name();
        let shadow = class_surface_shadow(renamer, type_full_name);

        let mut entries: Vec<(String, String, TypeStableId, bool)> = Vec::new();
        let mut collect = |clr_name: &str, sig: &str, source: Option<&TypeStableId>, is_static: bool, scope: EmitScope| {
            if scope == EmitScope::ViewOnly {
                if let Some(source) = source {
                    entries.push((clr_name.to_string(), sig.to_string(), source.clone(), is_static));
                }
            }
        };
        for m in &ty.members.methods {
            collect(&m.common.clr_name, m.signature.as_str(), m.common.source_interface.as_ref(), m.is_static, m.common.emit_scope);
        }
        for p in &ty.members.properties {
            collect(&p.common.clr_name, p.signature.as_str(), p.common.source_interface.as_ref(), p.is_static, p.common.emit_scope);
        }
        for e in &ty.members.events {
            collect(&e.common.clr_name, e.signature.as_str(), e.common.source_interface.as_ref(), e.is_static, e.common.emit_scope);
        }
        drop(collect);
        entries.sort_by(|a, b| member_sort_key(&a.0, &a.1).cmp(&member_sort_key(&b.0, &b.1)));

        for (clr_name, _sig, source_interface, is_static) in entries {
            let view_scope = ScopeKey::view_surface_for(&ty.stable_id, &source_interface, Staticness::from_bool(is_static));
            let style_candidate = clrbind_rename::reserved::sanitize(&apply_member_style(&clr_name, policy.naming.member_style));

            let final_candidate = if shadow.contains(&style_candidate) {
                let mut suffix = 1u32;
                loop {
                    let attempt = if suffix == 1 { format!("{style_candidate}$view") } else { format!("{style_candidate}$view{suffix}") };
                    if !shadow.contains(&attempt) {
                        break attempt;
                    }
                    suffix += 1;
                }
            } else {
                style_candidate
            };

            renamer.reserve(
                ReservationRequest {
                    scope: view_scope,
                    clr_name: &clr_name,
                    kind: Kind::Member,
                    override_name: Some(&final_candidate),
                    interface_qualifier: None,
                },
                policy,
                diagnostics,
            );
        }
    }
}

/// Step 5: every non-omitted member in the graph must have a rename
/// decision in the scope its emit scope implies. Absence is a hard
/// error -- it blocks Emit via Phase Gate, but Name Reservation itself
/// records the finding so it shows up as early as possible.
fn audit_rename_decisions(graph: &SymbolGraph, renamer: &Renamer, diagnostics: &mut DiagnosticBag) {
    for ty in graph.types() {
        let type_full_name = ty.stable_id.clr_full_name();
        let mut check = |clr_name: &str, source: Option<&TypeStableId>, is_static: bool, scope: EmitScope| {
            if scope == EmitScope::Omitted || scope == EmitScope::Unspecified {
                return;
            }
            let staticness = Staticness::from_bool(is_static);
            let key = match (scope, source) {
                (EmitScope::ViewOnly, Some(interface_id)) => ScopeKey::view_surface_for(&ty.stable_id, interface_id, staticness),
                _ => ScopeKey::class_surface(type_full_name, staticness),
            };
            if renamer.lookup(&key, clr_name).is_none() {
                diagnostics.error(
                    codes::FIN_003_MISSING_RENAME_DECISION,
                    format!("{type_full_name}::{clr_name} has no rename decision in scope {key}"),
                );
            }
        };
        for m in &ty.members.methods {
            check(&m.common.clr_name, m.common.source_interface.as_ref(), m.is_static, m.common.emit_scope);
        }
        for p in &ty.members.properties {
            check(&p.common.clr_name, p.common.source_interface.as_ref(), p.is_static, p.common.emit_scope);
        }
        for f in &ty.members.fields {
            check(&f.common.clr_name, f.common.source_interface.as_ref(), f.is_static, f.common.emit_scope);
        }
        for e in &ty.members.events {
            check(&e.common.clr_name, e.common.source_interface.as_ref(), e.is_static, e.common.emit_scope);
        }
        for c in &ty.members.constructors {
            check(&c.common.clr_name, None, false, c.common.emit_scope);
        }
    }
}

/// Step 6: walk the graph, stamping every type and member's
/// `target_emit_name` from the scope its emit scope (and, for types, its
/// owning namespace) implies.
fn apply_target_names(graph: &mut SymbolGraph, renamer: &Renamer) {
    let namespaces: Vec<(String, Vec<TypeStableId>)> =
        graph.namespaces().map(|ns| (ns.name.clone(), ns.types.clone())).collect();

    for (namespace, type_ids) in namespaces {
        for type_id in type_ids {
            let ty = graph.type_by_stable_id(&type_id).unwrap();
            let visibility = visibility_of(ty.accessibility);
            let simple_name = simple_type_name(ty, &namespace);
            let scope = ScopeKey::namespace(&namespace, visibility);
            let resolved = renamer.lookup(&scope, &simple_name).map(str::to_string);

            let ty = graph.type_by_stable_id_mut(&type_id).unwrap();
            ty.target_emit_name = resolved;
            let type_full_name = ty.stable_id.clr_full_name().to_string();
            let owner_id = ty.stable_id.clone();

            for m in &mut ty.members.methods {
                m.common.target_emit_name = resolve_member_name(renamer, &type_full_name, &owner_id, &m.common.clr_name, m.common.source_interface.as_ref(), m.is_static, m.common.emit_scope);
            }
            for p in &mut ty.members.properties {
                p.common.target_emit_name = resolve_member_name(renamer, &type_full_name, &owner_id, &p.common.clr_name, p.common.source_interface.as_ref(), p.is_static, p.common.emit_scope);
            }
            for f in &mut ty.members.fields {
                f.common.target_emit_name = resolve_member_name(renamer, &type_full_name, &owner_id, &f.common.clr_name, f.common.source_interface.as_ref(), f.is_static, f.common.emit_scope);
            }
            for e in &mut ty.members.events {
                e.common.target_emit_name = resolve_member_name(renamer, &type_full_name, &owner_id, &e.common.clr_name, e.common.source_interface.as_ref(), e.is_static, e.common.emit_scope);
            }
            for c in &mut ty.members.constructors {
                c.common.target_emit_name = resolve_member_name(renamer, &type_full_name, &owner_id, &c.common.clr_name, None, false, c.common.emit_scope);
            }
        }
    }
}

fn resolve_member_name(
    renamer: &Renamer,
    type_full_name: &str,
    type_id: &TypeStableId,
    clr_name: &str,
    source_interface: Option<&TypeStableId>,
    is_static: bool,
    emit_scope: EmitScope,
) -> Option<String> {
    if emit_scope == EmitScope::Omitted || emit_scope == EmitScope::Unspecified {
        return None;
    }
    let staticness = Staticness::from_bool(is_static);
    let scope = match (emit_scope, source_interface) {
        (EmitScope::ViewOnly, Some(interface_id)) => ScopeKey::view_surface_for(type_id, interface_id, staticness),
        _ => ScopeKey::class_surface(type_full_name, staticness),
    };
    renamer.lookup(&scope, clr_name).map(str::to_string)
}

/// Run the full six-step Name Reservation orchestration (§4.4).
pub fn run(graph: &mut SymbolGraph, renamer: &mut Renamer, policy: &Policy, diagnostics: &mut DiagnosticBag) {
    reserve_type_and_class_surface_names(graph, renamer, policy, diagnostics);
    reserve_view_only_names(graph, renamer, policy, diagnostics);
    audit_rename_decisions(graph, renamer, diagnostics);
    apply_target_names(graph, renamer);
}
