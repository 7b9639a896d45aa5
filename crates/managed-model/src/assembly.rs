//! Assembly identity (spec.md §3, "Assembly key").

use serde::{Deserialize, Serialize};
use std::fmt;

/// `(name, public_key_token, culture, version)`. Used to detect version
/// drift and mixed signing during Load (§4.1).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct AssemblyKey {
    pub name: String,
    pub public_key_token: Option<String>,
    pub culture: Option<String>,
    pub version: (u16, u16, u16, u16),
}

impl AssemblyKey {
    pub fn new(name: impl Into<String>, version: (u16, u16, u16, u16)) -> Self {
        Self {
            name: name.into(),
            public_key_token: None,
            culture: None,
            version,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.public_key_token = Some(token.into());
        self
    }

    /// Major-version drift relative to another key of the same name.
    pub fn major_version_drift(&self, other: &AssemblyKey) -> bool {
        self.name == other.name && self.version.0 != other.version.0
    }

    /// The normalised string form mentioned in spec.md §3.
    pub fn normalized(&self) -> String {
        format!(
            "{}, Version={}.{}.{}.{}, Culture={}, PublicKeyToken={}",
            self.name,
            self.version.0,
            self.version.1,
            self.version.2,
            self.version.3,
            self.culture.as_deref().unwrap_or("neutral"),
            self.public_key_token.as_deref().unwrap_or("null"),
        )
    }
}

impl fmt::Display for AssemblyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_major_version_drift() {
        let a = AssemblyKey::new("System.Private.CoreLib", (6, 0, 0, 0));
        let b = AssemblyKey::new("System.Private.CoreLib", (8, 0, 0, 0));
        assert!(a.major_version_drift(&b));
    }

    #[test]
    fn no_drift_when_only_minor_differs() {
        let a = AssemblyKey::new("Foo", (1, 0, 0, 0));
        let b = AssemblyKey::new("Foo", (1, 5, 0, 0));
        assert!(!a.major_version_drift(&b));
    }
}
