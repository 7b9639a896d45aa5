//! Import graph & path planner (spec.md §4.6, first two-thirds). Builds,
//! for every namespace, the set of cross-namespace references its public
//! types' signatures demand; assigns aliases where two imports would
//! collide on simple name; and plans each namespace's on-disk directory
//! and the relative import path between any two of them.

use clrbind_common::diagnostics::{codes, DiagnosticBag};
use clrbind_model::ids::TypeStableId;
use clrbind_model::type_ref::{NamedTypeRef, TypeRef};
use clrbind_model::type_symbol::{TypeAccessibility, TypeSymbol};
use clrbind_model::SymbolGraph;
use indexmap::{IndexMap, IndexSet};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReferenceReason {
    BaseClass,
    Interface,
    Constraint,
    MethodParameter,
    MethodReturn,
    PropertyType,
    FieldType,
    EventHandler,
    ConstructorParameter,
}

#[derive(Clone, Debug)]
pub struct CrossNamespaceReference {
    pub source_type: TypeStableId,
    pub target_type: TypeStableId,
    pub reason: ReferenceReason,
}

/// The global namespace (empty name) is rooted at a fixed directory name
/// rather than an empty path segment.
pub fn namespace_dir(namespace: &str) -> String {
    if namespace.is_empty() {
        "_root".to_string()
    } else {
        namespace.replace('.', "/")
    }
}

/// Every import targets the namespace's internal declaration file, never
/// its public façade, because imports need full definitions (§4.6).
/// Relative direction follows source-vs-target directory depth.
pub fn relative_import_path(from_namespace: &str, to_namespace: &str) -> String {
    let from_dir = namespace_dir(from_namespace);
    let to_dir = namespace_dir(to_namespace);
    let up = "../".repeat(from_dir.split('/').count());
    format!("{up}{to_dir}/internal/index")
}

fn walk_type_refs(ty: &TypeSymbol, push: &mut dyn FnMut(&NamedTypeRef, ReferenceReason)) {
    if let Some(base) = &ty.base_type {
        let mut named = Vec::new();
        base.walk_named(&mut named);
        for n in named {
            push(n, ReferenceReason::BaseClass);
        }
    }
    for iface in &ty.interfaces {
        let mut named = Vec::new();
        iface.walk_named(&mut named);
        for n in named {
            push(n, ReferenceReason::Interface);
        }
    }
    for gp in &ty.generic_parameters {
        for constraint in &gp.resolved_constraints {
            let mut named = Vec::new();
            constraint.walk_named(&mut named);
            for n in named {
                push(n, ReferenceReason::Constraint);
            }
        }
    }
    for m in &ty.members.methods {
        if m.common.emit_scope == clrbind_model::member::EmitScope::Omitted {
            continue;
        }
        for (_, param) in m.parameters.iter().enumerate() {
            let mut named = Vec::new();
            param.ty.walk_named(&mut named);
            for n in named {
                push(n, ReferenceReason::MethodParameter);
            }
        }
        let mut named = Vec::new();
        m.return_type.walk_named(&mut named);
        for n in named {
            push(n, ReferenceReason::MethodReturn);
        }
    }
    for p in &ty.members.properties {
        if p.common.emit_scope == clrbind_model::member::EmitScope::Omitted {
            continue;
        }
        let mut named = Vec::new();
        p.property_type.walk_named(&mut named);
        for n in named {
            push(n, ReferenceReason::PropertyType);
        }
        for idx_param in &p.index_parameters {
            let mut named = Vec::new();
            idx_param.ty.walk_named(&mut named);
            for n in named {
                push(n, ReferenceReason::MethodParameter);
            }
        }
    }
    for f in &ty.members.fields {
        if f.common.emit_scope == clrbind_model::member::EmitScope::Omitted {
            continue;
        }
        let mut named = Vec::new();
        f.field_type.walk_named(&mut named);
        for n in named {
            push(n, ReferenceReason::FieldType);
        }
    }
    for e in &ty.members.events {
        if e.common.emit_scope == clrbind_model::member::EmitScope::Omitted {
            continue;
        }
        let mut named = Vec::new();
        e.handler_type.walk_named(&mut named);
        for n in named {
            push(n, ReferenceReason::EventHandler);
        }
    }
    // Constructor parameters are a distinct reference kind that must be
    // scanned: a class compiles without them imported, but its
    // constructors cannot be bound (§4.6).
    for c in &ty.members.constructors {
        if c.common.emit_scope == clrbind_model::member::EmitScope::Omitted {
            continue;
        }
        for param in &c.parameters {
            let mut named = Vec::new();
            param.ty.walk_named(&mut named);
            for n in named {
                push(n, ReferenceReason::ConstructorParameter);
            }
        }
    }
}

/// Build every cross-namespace reference demanded by the public types of
/// each namespace. The lookup key is always the open-generic full name
/// (`Ns.Name\`arity`) -- the defensive invariant below catches a
/// constructed-form key before it reaches an import statement, the
/// single most destructive regression this planner guards against.
pub fn build(graph: &SymbolGraph, diagnostics: &mut DiagnosticBag) -> Vec<CrossNamespaceReference> {
    let mut references = Vec::new();

    for ns in graph.namespaces_sorted() {
        for type_id in &ns.types {
            let Some(ty) = graph.type_by_stable_id(type_id) else { continue };
            if ty.accessibility != TypeAccessibility::Public {
                continue;
            }

            let mut found: Vec<(NamedTypeRef, ReferenceReason)> = Vec::new();
            walk_type_refs(ty, &mut |named, reason| found.push((named.clone(), reason)));

            for (named, reason) in found {
                if named.namespace == ns.name {
                    continue;
                }
                let key = named.stable_id().open_generic_full_name();
                if key.contains('[') || key.contains(',') || key.contains("Culture=") {
                    diagnostics.error(
                        codes::IMPORT_002_CONSTRUCTED_KEY,
                        format!("import planner received a constructed-form key '{key}' for a reference from {}", ty.stable_id),
                    );
                    continue;
                }
                references.push(CrossNamespaceReference {
                    source_type: ty.stable_id.clone(),
                    target_type: named.stable_id(),
                    reason,
                });
            }
        }
    }

    references
}

/// Alias assignment (§4.6): when two imports into the same importing
/// namespace would produce the same simple target name, the second (and
/// any subsequent) import is given an alias `{TypeName}_{TargetNamespaceShort}`.
/// Keyed by `(importing_namespace, target_type)` so every reference from
/// that namespace to that type shares one alias decision.
pub fn assign_aliases(graph: &SymbolGraph, references: &[CrossNamespaceReference]) -> IndexMap<(String, TypeStableId), String> {
    let mut per_namespace: IndexMap<String, Vec<&TypeStableId>> = IndexMap::new();
    for reference in references {
        let importing_namespace = reference.source_type.open_generic_full_name();
        let importing_namespace = importing_namespace.rsplit_once('.').map(|(ns, _)| ns.to_string()).unwrap_or_default();
        per_namespace.entry(importing_namespace).or_default().push(&reference.target_type);
    }

    let mut aliases = IndexMap::new();
    for (importing_namespace, targets) in per_namespace {
        let mut unique_targets: Vec<&TypeStableId> = targets.into_iter().collect::<IndexSet<_>>().into_iter().collect();
        unique_targets.sort_by(|a, b| a.as_str().cmp(b.as_str()));

        let mut seen_names: IndexMap<String, TypeStableId> = IndexMap::new();
        for target in unique_targets {
            let target_ty = graph.type_by_stable_id(target);
            let simple_name = target_ty
                .and_then(|t| t.target_emit_name.clone())
                .unwrap_or_else(|| target.open_generic_full_name().rsplit_once('.').map(|(_, n)| n.to_string()).unwrap_or_else(|| target.open_generic_full_name()));

            match seen_names.get(&simple_name) {
                None => {
                    seen_names.insert(simple_name, target.clone());
                }
                Some(first_owner) if first_owner != target => {
                    let target_namespace_short = target
                        .open_generic_full_name()
                        .rsplit_once('.')
                        .map(|(ns, _)| ns.rsplit('.').next().unwrap_or(ns).to_string())
                        .unwrap_or_default();
                    aliases.insert((importing_namespace.clone(), target.clone()), format!("{simple_name}_{target_namespace_short}"));
                }
                _ => {}
            }
        }
    }
    aliases
}
