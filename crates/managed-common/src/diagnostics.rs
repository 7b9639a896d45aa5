//! The diagnostic bag: an append-only collector of findings, keyed by a
//! stable short code (SPEC_FULL.md §7). Severity is fixed per code family
//! so a pass cannot accidentally misclassify a blocking condition.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticCategory {
    Error,
    Warning,
    Info,
}

impl DiagnosticCategory {
    pub const fn is_blocking(self) -> bool {
        matches!(self, DiagnosticCategory::Error)
    }
}

/// Where in the symbol graph a diagnostic applies. All fields optional:
/// some diagnostics (e.g. missing core library) have no graph location.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticLocation {
    pub type_stable_id: Option<String>,
    pub member_stable_id: Option<String>,
    pub scope_key: Option<String>,
}

impl DiagnosticLocation {
    pub fn for_type(type_stable_id: impl Into<String>) -> Self {
        Self {
            type_stable_id: Some(type_stable_id.into()),
            ..Default::default()
        }
    }

    pub fn for_member(type_stable_id: impl Into<String>, member_stable_id: impl Into<String>) -> Self {
        Self {
            type_stable_id: Some(type_stable_id.into()),
            member_stable_id: Some(member_stable_id.into()),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: &'static str,
    pub category: DiagnosticCategory,
    pub message: String,
    pub location: DiagnosticLocation,
}

impl Diagnostic {
    pub fn new(code: &'static str, category: DiagnosticCategory, message: impl Into<String>) -> Self {
        Self {
            code,
            category,
            message: message.into(),
            location: DiagnosticLocation::default(),
        }
    }

    pub fn with_location(mut self, location: DiagnosticLocation) -> Self {
        self.location = location;
        self
    }
}

/// Append-only collector of diagnostics, threaded explicitly through
/// `BuildContext` rather than reached through a global (SPEC_FULL.md §9).
#[derive(Default, Debug)]
pub struct DiagnosticBag {
    entries: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.category == DiagnosticCategory::Warning {
            tracing::warn!(code = diagnostic.code, message = %diagnostic.message, "diagnostic");
        }
        self.entries.push(diagnostic);
    }

    pub fn error(&mut self, code: &'static str, message: impl Into<String>) {
        self.push(Diagnostic::new(code, DiagnosticCategory::Error, message));
    }

    pub fn warning(&mut self, code: &'static str, message: impl Into<String>) {
        self.push(Diagnostic::new(code, DiagnosticCategory::Warning, message));
    }

    pub fn info(&mut self, code: &'static str, message: impl Into<String>) {
        self.push(Diagnostic::new(code, DiagnosticCategory::Info, message));
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.category.is_blocking())
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Folds another bag's entries into this one. Order between the two
    /// doesn't matter -- `snapshot()` re-sorts before anything reads it --
    /// so this is how parallel producers (e.g. per-assembly Load workers)
    /// fan their findings back into the caller's bag.
    pub fn extend(&mut self, other: DiagnosticBag) {
        self.entries.extend(other.entries);
    }

    /// A deterministic snapshot: diagnostics sorted by code then message,
    /// as consumers "always iterate the snapshot taken at Phase Gate exit"
    /// (spec §5).
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        let mut snapshot = self.entries.clone();
        snapshot.sort_by(|a, b| a.code.cmp(b.code).then_with(|| a.message.cmp(&b.message)));
        snapshot
    }

    /// Counts grouped by code, for `.phasegate-summary.json`.
    pub fn counts_by_code(&self) -> Vec<(&'static str, usize)> {
        let mut counts: indexmap::IndexMap<&'static str, usize> = indexmap::IndexMap::new();
        for entry in &self.entries {
            *counts.entry(entry.code).or_insert(0) += 1;
        }
        let mut counts: Vec<_> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        counts
    }
}

/// Diagnostic code catalog, grouped by family exactly as spec.md §7 lists
/// them. Each code's severity is fixed here, not at the call site.
pub mod codes {
    use super::DiagnosticCategory;

    macro_rules! code_catalog {
        ($($name:ident = ($code:literal, $category:expr)),* $(,)?) => {
            $(pub const $name: &str = $code;)*

            pub fn category_of(code: &str) -> Option<DiagnosticCategory> {
                match code {
                    $($code => Some($category),)*
                    _ => None,
                }
            }
        };
    }

    use DiagnosticCategory::{Error, Info, Warning};

    code_catalog! {
        LOAD_001_MISSING_CORE = ("LOAD_001", Error),
        LOAD_002_TOKEN_MISMATCH = ("LOAD_002", Error),
        LOAD_003_VERSION_DRIFT_STRICT = ("LOAD_003", Error),
        LOAD_004_VERSION_DRIFT_LAX = ("LOAD_004", Warning),
        LOAD_005_UNRESOLVED_REFERENCE = ("LOAD_005", Warning),
        LOAD_006_DUPLICATE_MEMBER = ("LOAD_006", Error),
        LOAD_007_CORRUPT_METADATA = ("LOAD_007", Warning),

        NAME_001_RESERVED_WORD = ("NAME_001", Info),
        NAME_002_COLLISION_RESOLVED = ("NAME_002", Info),
        NAME_003_VIEW_NAME_COLLISION = ("NAME_003", Error),
        NAME_004_VIEW_SHADOWS_SURFACE = ("NAME_004", Error),
        NAME_005_SURFACE_NAME_COLLISION = ("NAME_005", Error),

        IDENT_001_SANITIZED = ("IDENT_001", Info),

        OV_001_RETURN_ONLY_CONFLICT = ("OV_001", Warning),
        OV_002_EROSION_COLLISION = ("OV_002", Error),

        VIEW_001_EMPTY_VIEW = ("VIEW_001", Error),
        VIEW_002_MEMBER_IN_MULTIPLE_VIEWS = ("VIEW_002", Error),
        VIEW_003_MISSING_SOURCE_INTERFACE = ("VIEW_003", Error),

        INT_001_DUPLICATE_STABLE_ID = ("INT_001", Error),
        INT_002_PLACEHOLDER_ESCAPED = ("INT_002", Error),
        INT_003_CLASS_SURFACE_HAS_SOURCE_INTERFACE = ("INT_003", Error),
        INT_004_SYNTHESIS_NOT_IDEMPOTENT = ("INT_004", Error),

        SCOPE_001_MALFORMED_KEY = ("SCOPE_001", Error),
        SCOPE_002_SCOPE_EMIT_MISMATCH = ("SCOPE_002", Error),

        CT_001_CONSTRUCTOR_CONSTRAINT_LOST = ("CT_001", Warning),
        CT_002_CONFLICTING_VALUE_REF_CONSTRAINT = ("CT_002", Warning),
        CT_003_UNREPRESENTABLE_CONSTRAINT = ("CT_003", Warning),
        CT_004_UNION_CONSTRAINT_UNREPRESENTABLE = ("CT_004", Warning),

        FIN_001_UNSPECIFIED_EMIT_SCOPE = ("FIN_001", Error),
        FIN_002_OMITTED_WITH_NO_BINDING = ("FIN_002", Warning),
        FIN_003_MISSING_RENAME_DECISION = ("FIN_003", Error),
        FIN_004_WRONG_SCOPE_RENAME = ("FIN_004", Error),

        PRINT_001_NAME_MISMATCH = ("PRINT_001", Error),

        TYPEMAP_001_POINTER_ERASED = ("TYPEMAP_001", Warning),
        TYPEMAP_002_BYREF_ERASED = ("TYPEMAP_002", Warning),
        TYPEMAP_003_VALUE_TYPE_WIDENED = ("TYPEMAP_003", Info),

        API_001_INTERNAL_LEAK = ("API_001", Error),
        IMPORT_001_UNRESOLVED_KEY = ("IMPORT_001", Error),
        IMPORT_002_CONSTRUCTED_KEY = ("IMPORT_002", Error),
        EXPORT_001_MISSING_REEXPORT = ("EXPORT_001", Error),

        DIAMOND_001_CONFLICT_DETECTED = ("DIAMOND_001", Warning),
        DIAMOND_002_CONFLICT_FAILS_BUILD = ("DIAMOND_002", Error),

        INDEXER_001_MULTIPLE_CONVERTED = ("INDEXER_001", Info),

        STATIC_001_SHADOW_RENAMED = ("STATIC_001", Info),
        STATIC_002_SHADOW_FAILS_BUILD = ("STATIC_002", Error),
    }
}
