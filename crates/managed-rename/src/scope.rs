//! Scope keys (spec.md §4.3), always produced by this factory, never
//! formed by hand elsewhere.

use clrbind_model::ids::TypeStableId;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Staticness {
    Instance,
    Static,
}

impl Staticness {
    pub const fn from_bool(is_static: bool) -> Self {
        if is_static {
            Staticness::Static
        } else {
            Staticness::Instance
        }
    }

    const fn tag(self) -> &'static str {
        match self {
            Staticness::Instance => "instance",
            Staticness::Static => "static",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NamespaceVisibility {
    Public,
    Internal,
}

impl NamespaceVisibility {
    const fn tag(self) -> &'static str {
        match self {
            NamespaceVisibility::Public => "public",
            NamespaceVisibility::Internal => "internal",
        }
    }
}

/// A well-formed Renamer scope key. The three spec-mandated shapes:
/// `ns:{namespace}:{public|internal}`, `type:{type_full_name}#{instance|static}`,
/// `view:{type_stable_id}:{interface_stable_id}#{instance|static}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeKey(String);

impl ScopeKey {
    pub fn namespace(namespace: &str, visibility: NamespaceVisibility) -> Self {
        Self(format!("ns:{namespace}:{}", visibility.tag()))
    }

    pub fn class_surface(type_full_name: &str, staticness: Staticness) -> Self {
        Self(format!("type:{type_full_name}#{}", staticness.tag()))
    }

    pub fn view_surface(type_stable_id: &str, interface_stable_id: &str, staticness: Staticness) -> Self {
        Self(format!("view:{type_stable_id}:{interface_stable_id}#{}", staticness.tag()))
    }

    pub fn view_surface_for(type_id: &TypeStableId, interface_id: &TypeStableId, staticness: Staticness) -> Self {
        Self::view_surface(type_id.as_str(), interface_id.as_str(), staticness)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the key carries the `#instance`/`#static` surface suffix a
    /// lookup requires (§4.3: "Lookup requires a *surface* scope").
    pub fn is_surface_scope(&self) -> bool {
        self.0.ends_with("#instance") || self.0.ends_with("#static")
    }

    pub fn is_view_scope(&self) -> bool {
        self.0.starts_with("view:")
    }

    pub fn is_class_scope(&self) -> bool {
        self.0.starts_with("type:")
    }

    pub fn is_namespace_scope(&self) -> bool {
        self.0.starts_with("ns:")
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
