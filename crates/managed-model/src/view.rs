//! Explicit views (spec.md §3 / glossary): a companion interface attached
//! to a type for members that can only satisfy an interface structurally
//! inaccessible to the class surface.

use crate::ids::{MemberStableId, TypeStableId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExplicitView {
    pub source_interface: TypeStableId,
    /// Deterministic function of the interface's short name and closed
    /// type arguments, e.g. `IEnumerable<string>` -> `As_IEnumerable_1_of_string`.
    pub view_property_name: String,
    pub members: Vec<MemberStableId>,
}

impl ExplicitView {
    pub fn new(source_interface: TypeStableId, view_property_name: impl Into<String>) -> Self {
        Self {
            source_interface,
            view_property_name: view_property_name.into(),
            members: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, member: &MemberStableId) -> bool {
        self.members.contains(member)
    }
}

/// Deterministic view property name derivation (§4.2.11): the interface's
/// short name plus its closed type arguments, each sanitized for use in
/// an identifier.
pub fn derive_view_property_name(interface_short_name: &str, arity: u8, closed_args: &[String]) -> String {
    if closed_args.is_empty() {
        format!("As_{interface_short_name}")
    } else {
        let args = closed_args
            .iter()
            .map(|a| sanitize_for_identifier(a))
            .collect::<Vec<_>>()
            .join("_");
        format!("As_{interface_short_name}_{arity}_of_{args}")
    }
}

fn sanitize_for_identifier(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
