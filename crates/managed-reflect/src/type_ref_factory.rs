//! The memoising type-reference factory (spec.md §4.1, §9): converts a
//! raw CLR type name into a [`TypeRef`], with memoisation and cycle
//! detection. A type currently being constructed yields a
//! [`TypeRef::Placeholder`]; the caller is responsible for rewriting the
//! placeholder once the recursion unwinds (the Constraint Closer pass
//! does this for generic constraints, §4.2.16).

use clrbind_model::type_ref::{NamedTypeRef, TypeRef};
use rustc_hash::FxHashMap;
use std::collections::HashSet;

pub struct TypeRefFactory {
    assembly: String,
    /// Stable ids currently being constructed -- an explicit work-list
    /// set, per SPEC_FULL.md §9's "prefer an explicit work list with a
    /// 'currently constructing' set over recursive closures."
    constructing: HashSet<String>,
    memo: FxHashMap<String, TypeRef>,
}

impl TypeRefFactory {
    pub fn new(assembly: impl Into<String>) -> Self {
        Self {
            assembly: assembly.into(),
            constructing: HashSet::new(),
            memo: FxHashMap::default(),
        }
    }

    /// Build a `TypeRef` for a named CLR type. `arity` and
    /// `type_arguments` describe a possibly-generic reference.
    pub fn make_named(&mut self, namespace: &str, simple_name: &str, arity: u8, type_arguments: Vec<TypeRef>) -> TypeRef {
        let clr_full_name = if arity > 0 {
            format!("{namespace}.{simple_name}`{arity}")
        } else {
            format!("{namespace}.{simple_name}")
        };

        if let Some(cached) = self.memo.get(&clr_full_name) {
            if type_arguments.is_empty() {
                return cached.clone();
            }
        }

        if self.constructing.contains(&clr_full_name) {
            return TypeRef::Placeholder {
                reason: format!("cycle constructing {clr_full_name}"),
            };
        }

        self.constructing.insert(clr_full_name.clone());
        let type_ref = TypeRef::Named(NamedTypeRef {
            assembly: self.assembly.clone(),
            namespace: namespace.to_string(),
            simple_name: simple_name.to_string(),
            arity,
            type_arguments,
            interface_stable_id: None,
        });
        self.constructing.remove(&clr_full_name);
        self.memo.insert(clr_full_name, type_ref.clone());
        type_ref
    }

    /// Replace every placeholder matching `reason_contains` with the now
    /// fully-constructed reference, used once recursion unwinds.
    pub fn close_placeholder(&mut self, type_ref: TypeRef, resolved: &TypeRef, needle: &str) -> TypeRef {
        match &type_ref {
            TypeRef::Placeholder { reason } if reason.contains(needle) => resolved.clone(),
            TypeRef::Named(named) => TypeRef::Named(NamedTypeRef {
                type_arguments: named
                    .type_arguments
                    .iter()
                    .map(|t| self.close_placeholder(t.clone(), resolved, needle))
                    .collect(),
                ..named.clone()
            }),
            TypeRef::Array { element, rank } => TypeRef::Array {
                element: Box::new(self.close_placeholder((**element).clone(), resolved, needle)),
                rank: *rank,
            },
            TypeRef::Pointer { pointee, depth } => TypeRef::Pointer {
                pointee: Box::new(self.close_placeholder((**pointee).clone(), resolved, needle)),
                depth: *depth,
            },
            TypeRef::ByReference { referent } => TypeRef::ByReference {
                referent: Box::new(self.close_placeholder((**referent).clone(), resolved, needle)),
            },
            other => other.clone(),
        }
    }
}
