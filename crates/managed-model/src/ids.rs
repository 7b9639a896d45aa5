//! Stable identity keys (spec.md §3).
//!
//! Stable ids are the keys used across every phase's maps; equality
//! deliberately excludes source metadata tokens (spec.md §3, "Equality on
//! the member stable id").

use crate::signature::CanonicalSignature;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `{assembly_name}:{clr_full_name}`, where `clr_full_name` uses the
/// runtime's backtick-arity convention (`List\`1`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct TypeStableId(String);

impl TypeStableId {
    pub fn new(assembly_name: &str, clr_full_name: &str) -> Self {
        Self(format!("{assembly_name}:{clr_full_name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The CLR full name part, after the `assembly:` prefix.
    pub fn clr_full_name(&self) -> &str {
        self.0.split_once(':').map(|(_, rest)| rest).unwrap_or(&self.0)
    }

    pub fn assembly_name(&self) -> &str {
        self.0.split_once(':').map(|(asm, _)| asm).unwrap_or(&self.0)
    }

    /// The open-generic full name (`Ns.Name\`arity`), stripped of any
    /// constructed-argument tail. This is the key the import planner
    /// (§4.6) must use -- never the assembly-qualified constructed form.
    pub fn open_generic_full_name(&self) -> String {
        let full = self.clr_full_name();
        match full.find('[') {
            Some(idx) => full[..idx].to_string(),
            None => full.to_string(),
        }
    }
}

impl fmt::Display for TypeStableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `{assembly}:{declaring_clr_full_name}::{member_name}{canonical_signature}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct MemberStableId(String);

impl MemberStableId {
    pub fn new(
        assembly_name: &str,
        declaring_clr_full_name: &str,
        member_name: &str,
        canonical_signature: &CanonicalSignature,
    ) -> Self {
        Self(format!(
            "{assembly_name}:{declaring_clr_full_name}::{member_name}{}",
            canonical_signature.as_str()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn assembly_name(&self) -> &str {
        self.0.split_once(':').map(|(asm, _)| asm).unwrap_or(&self.0)
    }

    pub fn declaring_clr_full_name(&self) -> &str {
        let after_assembly = self.0.split_once(':').map(|(_, rest)| rest).unwrap_or(&self.0);
        after_assembly.split("::").next().unwrap_or(after_assembly)
    }

    /// Rebuild a member stable id under a different declaring type, used
    /// by passes that own a synthesized copy (e.g. the base-overload
    /// adder, §4.2.8, which owns its synthetic copy under the derived
    /// type's stable id).
    pub fn retarget(&self, new_declaring_clr_full_name: &str, assembly_name: &str) -> Self {
        let after_declaring = self.0.splitn(3, ':').nth(2).unwrap_or_default();
        let member_part = after_declaring
            .strip_prefix(':')
            .unwrap_or(after_declaring);
        Self(format!("{assembly_name}:{new_declaring_clr_full_name}::{member_part}"))
    }
}

impl fmt::Display for MemberStableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_constructed_tail_for_open_generic_name() {
        let id = TypeStableId::new(
            "mscorlib",
            "System.Collections.Generic.IEnumerable`1[[System.String, mscorlib]]",
        );
        assert_eq!(id.open_generic_full_name(), "System.Collections.Generic.IEnumerable`1");
    }

    #[test]
    fn clr_full_name_round_trips() {
        let id = TypeStableId::new("mscorlib", "System.String");
        assert_eq!(id.clr_full_name(), "System.String");
        assert_eq!(id.assembly_name(), "mscorlib");
    }
}
