//! Canonical signatures (spec.md §3).
//!
//! A deterministic string encoding a member's distinguishing shape, used
//! whenever Shape needs to know "is this the same member?".

use crate::type_ref::TypeRef;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamModifierTag {
    None,
    In,
    Out,
    Ref,
    Params,
}

impl ParamModifierTag {
    fn suffix(self) -> &'static str {
        match self {
            ParamModifierTag::None => "",
            ParamModifierTag::In => ":in",
            ParamModifierTag::Out => ":out",
            ParamModifierTag::Ref => ":ref",
            ParamModifierTag::Params => ":params",
        }
    }
}

/// `(param_type_1{:in|out|ref|params},…)→return_type` for methods;
/// `(index_param_types)→property_type` for properties;
/// `→type` for fields/events.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CanonicalSignature(String);

impl CanonicalSignature {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn for_method(params: &[(TypeRef, ParamModifierTag)], return_type: &TypeRef) -> Self {
        let mut out = String::from("(");
        for (idx, (ty, modifier)) in params.iter().enumerate() {
            if idx > 0 {
                out.push(',');
            }
            out.push_str(&ty.canonical_name());
            out.push_str(modifier.suffix());
        }
        out.push_str(")→");
        out.push_str(&return_type.canonical_name());
        Self(out)
    }

    pub fn for_property(index_params: &[TypeRef], property_type: &TypeRef) -> Self {
        let mut out = String::from("(");
        for (idx, ty) in index_params.iter().enumerate() {
            if idx > 0 {
                out.push(',');
            }
            out.push_str(&ty.canonical_name());
        }
        out.push_str(")→");
        out.push_str(&property_type.canonical_name());
        Self(out)
    }

    pub fn for_field_or_event(ty: &TypeRef) -> Self {
        Self(format!("→{}", ty.canonical_name()))
    }

    /// The group key used by the overload-return-conflict detector
    /// (§4.2.9): everything except the return type.
    pub fn without_return(&self) -> &str {
        self.0.split("→").next().unwrap_or(&self.0)
    }

    /// The erasure key used by the overload unifier (§4.5): drops
    /// parameter types and modifiers, keeping only arity and byref count.
    pub fn erasure_arity(&self) -> usize {
        let body = self.0.trim_start_matches('(');
        let body = body.split(')').next().unwrap_or("");
        if body.is_empty() {
            0
        } else {
            body.split(',').count()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_ref::TypeRef;

    #[test]
    fn field_signature_is_just_arrow_type() {
        let sig = CanonicalSignature::for_field_or_event(&TypeRef::named_simple("System.String"));
        assert_eq!(sig.as_str(), "→System.String");
    }

    #[test]
    fn method_signature_encodes_modifiers() {
        let sig = CanonicalSignature::for_method(
            &[(TypeRef::named_simple("System.Int32"), ParamModifierTag::Out)],
            &TypeRef::named_simple("System.Void"),
        );
        assert_eq!(sig.as_str(), "(System.Int32:out)→System.Void");
        assert_eq!(sig.erasure_arity(), 1);
    }

    #[test]
    fn without_return_drops_the_return_type() {
        let sig = CanonicalSignature::for_method(
            &[(TypeRef::named_simple("System.Int32"), ParamModifierTag::None)],
            &TypeRef::named_simple("System.String"),
        );
        assert_eq!(sig.without_return(), "(System.Int32)");
    }
}
