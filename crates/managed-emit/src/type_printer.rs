//! Type reference rendering (spec.md §4.8). Consumes only `target_emit_name`
//! and the primitive-widening table -- it never re-derives a name the
//! Renamer already settled. Grounded on the teacher's own `emit_type`
//! dispatch (`declaration_emitter/helpers.rs`): one function, one match
//! over the reference's shape, recursing into nested type arguments.

use crate::primitives;
use clrbind_common::error::{BuildError, BuildResult};
use clrbind_model::ids::TypeStableId;
use clrbind_model::type_ref::{NamedTypeRef, TypeRef};
use clrbind_model::SymbolGraph;
use indexmap::IndexMap;

/// Per-namespace printing state: which namespace is currently being
/// rendered (so same-namespace references skip the import machinery),
/// the import aliases Plan already decided, and the imports this
/// particular file ends up needing, discovered as printing proceeds.
pub struct NamespacePrinter<'a> {
    pub graph: &'a SymbolGraph,
    pub namespace: &'a str,
    pub aliases: &'a IndexMap<(String, TypeStableId), String>,
    pub imports_used: IndexMap<TypeStableId, String>,
    pub support_used: bool,
}

impl<'a> NamespacePrinter<'a> {
    pub fn new(graph: &'a SymbolGraph, namespace: &'a str, aliases: &'a IndexMap<(String, TypeStableId), String>) -> Self {
        Self { graph, namespace, aliases, imports_used: IndexMap::new(), support_used: false }
    }

    pub fn print(&mut self, ty: &TypeRef) -> BuildResult<String> {
        match ty {
            TypeRef::Named(named) => self.print_named(named),
            TypeRef::GenericParameter { name, .. } => Ok(name.clone()),
            TypeRef::Array { element, .. } => Ok(format!("{}[]", self.print(element)?)),
            TypeRef::Pointer { pointee, depth } => {
                self.support_used = true;
                let mut inner = self.print(pointee)?;
                for _ in 0..(*depth).max(1) {
                    inner = format!("Ptr<{inner}>");
                }
                Ok(inner)
            }
            TypeRef::ByReference { referent } => {
                self.support_used = true;
                Ok(format!("ByRef<{}>", self.print(referent)?))
            }
            TypeRef::Nested { full, .. } => self.print(full),
            TypeRef::Placeholder { reason } => {
                Err(BuildError::PlaceholderEscaped { phase: "emit", detail: reason.clone() })
            }
        }
    }

    fn print_named(&mut self, named: &NamedTypeRef) -> BuildResult<String> {
        let clr_name = named.full_name();

        if let Some(alias) = primitives::branded_numeric(&clr_name) {
            self.support_used = true;
            return Ok(alias.to_string());
        }
        if primitives::is_char(&clr_name) {
            self.support_used = true;
            return Ok(primitives::CHAR_SUPPORT_ALIAS.to_string());
        }
        if let Some(direct) = primitives::direct_primitive(&clr_name) {
            return Ok(direct.to_string());
        }

        let stable_id = named.stable_id();
        let base_name = if named.namespace == self.namespace {
            self.graph
                .type_by_stable_id(&stable_id)
                .and_then(|t| t.target_emit_name.clone())
                .unwrap_or_else(|| named.simple_name.clone())
        } else {
            let alias = self.aliases.get(&(self.namespace.to_string(), stable_id.clone())).cloned();
            let local_name = alias.unwrap_or_else(|| {
                self.graph
                    .type_by_stable_id(&stable_id)
                    .and_then(|t| t.target_emit_name.clone())
                    .unwrap_or_else(|| named.simple_name.clone())
            });
            self.imports_used.entry(stable_id).or_insert_with(|| local_name.clone());
            local_name
        };

        if named.type_arguments.is_empty() {
            Ok(base_name)
        } else {
            let mut args = Vec::with_capacity(named.type_arguments.len());
            for arg in &named.type_arguments {
                args.push(self.print(arg)?);
            }
            Ok(format!("{base_name}<{}>", args.join(", ")))
        }
    }
}
