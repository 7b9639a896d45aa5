//! Type references (spec.md §3): the sum type used wherever a type is
//! *named in a signature*, as opposed to *defined*.

use crate::ids::TypeStableId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedTypeRef {
    pub assembly: String,
    pub namespace: String,
    pub simple_name: String,
    pub arity: u8,
    pub type_arguments: Vec<TypeRef>,
    /// Pre-stamped when the referent is known to be an interface; lets
    /// later passes skip a graph lookup to answer "is this an interface?".
    pub interface_stable_id: Option<TypeStableId>,
}

impl NamedTypeRef {
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.simple_name.clone()
        } else {
            format!("{}.{}", self.namespace, self.simple_name)
        }
    }

    pub fn clr_full_name(&self) -> String {
        if self.arity > 0 {
            format!("{}`{}", self.full_name(), self.arity)
        } else {
            self.full_name()
        }
    }

    pub fn stable_id(&self) -> TypeStableId {
        TypeStableId::new(&self.assembly, &self.clr_full_name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeRef {
    Named(NamedTypeRef),
    GenericParameter {
        parameter_id: u32,
        name: String,
    },
    Array {
        element: Box<TypeRef>,
        rank: u8,
    },
    Pointer {
        pointee: Box<TypeRef>,
        depth: u8,
    },
    ByReference {
        referent: Box<TypeRef>,
    },
    Nested {
        declaring: Box<TypeRef>,
        nested_name: String,
        full: Box<TypeRef>,
    },
    /// A cycle-breaker that must never reach the emit stage (INT_002).
    Placeholder {
        reason: String,
    },
}

impl TypeRef {
    pub fn named_simple(full_name: &str) -> Self {
        let (namespace, simple_name) = match full_name.rsplit_once('.') {
            Some((ns, name)) => (ns.to_string(), name.to_string()),
            None => (String::new(), full_name.to_string()),
        };
        TypeRef::Named(NamedTypeRef {
            assembly: "mscorlib".to_string(),
            namespace,
            simple_name,
            arity: 0,
            type_arguments: Vec::new(),
            interface_stable_id: None,
        })
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, TypeRef::Placeholder { .. })
    }

    /// A deterministic name used inside canonical signatures. Strips
    /// assembly-qualification noise and normalises generic backticks, per
    /// spec.md §3.
    pub fn canonical_name(&self) -> String {
        match self {
            TypeRef::Named(named) => {
                let mut name = named.clr_full_name();
                if !named.type_arguments.is_empty() {
                    let args: Vec<String> = named.type_arguments.iter().map(|a| a.canonical_name()).collect();
                    name.push('<');
                    name.push_str(&args.join(","));
                    name.push('>');
                }
                name
            }
            TypeRef::GenericParameter { name, .. } => name.clone(),
            TypeRef::Array { element, rank } => format!("{}[{}]", element.canonical_name(), ",".repeat((*rank as usize).saturating_sub(1))),
            TypeRef::Pointer { pointee, depth } => format!("{}{}", pointee.canonical_name(), "*".repeat(*depth as usize)),
            TypeRef::ByReference { referent } => format!("&{}", referent.canonical_name()),
            TypeRef::Nested { full, .. } => full.canonical_name(),
            TypeRef::Placeholder { reason } => format!("<placeholder:{reason}>"),
        }
    }

    /// Erase pointers and by-reference modifiers, for target-level
    /// assignability checks (§4.2.2) which "operate on erased signatures".
    pub fn erased(&self) -> TypeRef {
        match self {
            TypeRef::Pointer { pointee, .. } => pointee.erased(),
            TypeRef::ByReference { referent } => referent.erased(),
            other => other.clone(),
        }
    }

    /// Walk every named type reachable from this reference (through
    /// generic arguments, array elements, pointer pointees, by-reference
    /// referents), skipping generic-parameter references. Used by the
    /// import graph builder (§4.6).
    pub fn walk_named<'a>(&'a self, out: &mut Vec<&'a NamedTypeRef>) {
        match self {
            TypeRef::Named(named) => {
                out.push(named);
                for arg in &named.type_arguments {
                    arg.walk_named(out);
                }
            }
            TypeRef::Array { element, .. } => element.walk_named(out),
            TypeRef::Pointer { pointee, .. } => pointee.walk_named(out),
            TypeRef::ByReference { referent } => referent.walk_named(out),
            TypeRef::Nested { full, .. } => full.walk_named(out),
            TypeRef::GenericParameter { .. } | TypeRef::Placeholder { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_name_normalises_generic_arity() {
        let list_of_string = TypeRef::Named(NamedTypeRef {
            assembly: "mscorlib".into(),
            namespace: "System.Collections.Generic".into(),
            simple_name: "List".into(),
            arity: 1,
            type_arguments: vec![TypeRef::named_simple("System.String")],
            interface_stable_id: None,
        });
        assert_eq!(
            list_of_string.canonical_name(),
            "System.Collections.Generic.List`1<System.String>"
        );
    }

    #[test]
    fn erased_strips_pointer_and_byref() {
        let ptr = TypeRef::Pointer {
            pointee: Box::new(TypeRef::ByReference {
                referent: Box::new(TypeRef::named_simple("System.Int32")),
            }),
            depth: 1,
        };
        assert_eq!(ptr.erased().canonical_name(), "System.Int32");
    }

    #[test]
    fn walk_named_skips_generic_parameters() {
        let generic = TypeRef::GenericParameter { parameter_id: 0, name: "T".into() };
        let mut out = Vec::new();
        generic.walk_named(&mut out);
        assert!(out.is_empty());
    }
}
