//! The build policy: a `serde`-deserializable mirror of the JSON config
//! shape in spec.md §6. Loading the file from disk is the CLI's job
//! (SPEC_FULL.md §4, "config loading"); this crate only owns the shape and
//! its defaults.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiamondResolution {
    OverloadAll,
    PreferDerived,
    Error,
}

impl Default for DiamondResolution {
    fn default() -> Self {
        DiamondResolution::OverloadAll
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaticSideAction {
    Analyse,
    AutoRename,
    Error,
}

impl Default for StaticSideAction {
    fn default() -> Self {
        StaticSideAction::AutoRename
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConstraintMergeStrategy {
    Intersection,
    Union,
    PreferLeft,
}

impl Default for ConstraintMergeStrategy {
    fn default() -> Self {
        ConstraintMergeStrategy::Intersection
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeStyle {
    Pascal,
    Preserve,
}

impl Default for TypeStyle {
    fn default() -> Self {
        TypeStyle::Pascal
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStyle {
    Camel,
    Preserve,
}

impl Default for MemberStyle {
    fn default() -> Self {
        MemberStyle::Camel
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterfacesPolicy {
    pub diamond_resolution: DiamondResolution,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexersPolicy {
    pub emit_property_when_single: bool,
    pub method_name: String,
}

impl Default for IndexersPolicy {
    fn default() -> Self {
        Self {
            emit_property_when_single: true,
            method_name: "Item".to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassesPolicy {
    pub hidden_member_suffix: String,
}

impl Default for ClassesPolicy {
    fn default() -> Self {
        Self {
            hidden_member_suffix: "_new".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaticSidePolicy {
    pub action: StaticSideAction,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConstraintsPolicy {
    pub merge_strategy: ConstraintMergeStrategy,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModulesPolicy {
    pub always_alias_imports: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SafetyPolicy {
    pub require_unsafe_markers: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationPolicy {
    pub strict_version_checks: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NamingPolicy {
    pub type_style: TypeStyle,
    pub member_style: MemberStyle,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Policy {
    pub skip_namespaces: Vec<String>,
    pub type_renames: HashMap<String, String>,
    pub skip_members: Vec<String>,
    pub interfaces: InterfacesPolicy,
    pub indexers: IndexersPolicy,
    pub classes: ClassesPolicy,
    pub static_side: StaticSidePolicy,
    pub constraints: ConstraintsPolicy,
    pub modules: ModulesPolicy,
    pub safety: SafetyPolicy,
    pub validation: ValidationPolicy,
    pub naming: NamingPolicy,
}

impl Policy {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn is_namespace_skipped(&self, namespace: &str) -> bool {
        self.skip_namespaces.iter().any(|n| n == namespace)
    }

    pub fn is_member_skipped(&self, member_stable_id: &str) -> bool {
        self.skip_members.iter().any(|m| m == member_stable_id)
    }

    pub fn type_rename(&self, clr_full_name: &str) -> Option<&str> {
        self.type_renames.get(clr_full_name).map(String::as_str)
    }
}
