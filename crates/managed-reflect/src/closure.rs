//! Transitive closure and identity validation (spec.md §4.1).

use crate::metadata::MetadataSource;
use clrbind_common::diagnostics::{codes, DiagnosticBag};
use clrbind_common::error::{BuildError, BuildResult};
use clrbind_model::AssemblyKey;
use std::collections::{HashSet, VecDeque};

pub struct ClosureResult {
    pub ordered_paths: Vec<String>,
    pub unresolved: HashSet<String>,
}

/// Breadth-first transitive closure over assembly references, starting
/// from the seeds. For each encountered assembly name, picks the highest
/// version in the candidate set; records an upgrade when a lower version
/// was already enqueued. Unresolvable references are skipped with a
/// warning and recorded in `unresolved` for cross-assembly import
/// planning later.
pub fn resolve_transitive_closure(
    source: &dyn MetadataSource,
    seed_paths: &[String],
    strict_versions: bool,
    diagnostics: &mut DiagnosticBag,
) -> BuildResult<ClosureResult> {
    let mut selected: std::collections::HashMap<String, AssemblyKey> = std::collections::HashMap::new();
    let mut order: Vec<String> = Vec::new();
    let mut queue: VecDeque<String> = seed_paths.iter().cloned().collect();
    let mut unresolved = HashSet::new();
    let mut seen_tokens: std::collections::HashMap<String, Option<String>> = std::collections::HashMap::new();

    while let Some(path) = queue.pop_front() {
        let Some((key, refs)) = source.scan_references(&path) else {
            diagnostics.warning(
                codes::LOAD_007_CORRUPT_METADATA,
                format!("could not read metadata for candidate path '{path}'"),
            );
            continue;
        };

        if let Some(existing_token) = seen_tokens.get(&key.name) {
            if existing_token != &key.public_key_token {
                return Err(BuildError::MixedSigning { name: key.name.clone() });
            }
        } else {
            seen_tokens.insert(key.name.clone(), key.public_key_token.clone());
        }

        let should_replace = match selected.get(&key.name) {
            None => true,
            Some(existing) => {
                if existing.major_version_drift(&key) {
                    let code = if strict_versions {
                        codes::LOAD_003_VERSION_DRIFT_STRICT
                    } else {
                        codes::LOAD_004_VERSION_DRIFT_LAX
                    };
                    diagnostics.push(clrbind_common::diagnostics::Diagnostic::new(
                        code,
                        clrbind_common::diagnostics::codes::category_of(code).unwrap(),
                        format!(
                            "major version drift for assembly '{}': {} vs {}",
                            key.name, existing.normalized(), key.normalized()
                        ),
                    ));
                    if strict_versions && code == codes::LOAD_003_VERSION_DRIFT_STRICT {
                        return Err(BuildError::MixedSigning { name: key.name.clone() });
                    }
                }
                existing.version < key.version
            }
        };

        if should_replace {
            selected.insert(key.name.clone(), key.clone());
            if !order.contains(&path) {
                order.push(path.clone());
            }
        }

        for reference in refs {
            match source.resolve_path(&reference) {
                Some(ref_path) => queue.push_back(ref_path),
                None => {
                    unresolved.insert(reference);
                }
            }
        }
    }

    if !unresolved.is_empty() {
        for name in &unresolved {
            diagnostics.warning(
                codes::LOAD_005_UNRESOLVED_REFERENCE,
                format!("unresolved assembly reference '{name}'"),
            );
        }
    }

    if !selected.keys().any(|name| is_core_library(name)) {
        return Err(BuildError::MissingCoreLibrary(seed_paths.len()));
    }

    Ok(ClosureResult {
        ordered_paths: order,
        unresolved,
    })
}

fn is_core_library(name: &str) -> bool {
    matches!(
        name,
        "mscorlib" | "System.Private.CoreLib" | "System.Runtime" | "netstandard"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{InMemorySource, RawAssembly};

    fn core() -> RawAssembly {
        RawAssembly {
            key: AssemblyKey::new("mscorlib", (4, 0, 0, 0)),
            referenced_assembly_names: vec![],
            types: vec![],
        }
    }

    #[test]
    fn fails_without_core_library() {
        let source = InMemorySource::new();
        let mut bag = DiagnosticBag::new();
        let err = resolve_transitive_closure(&source, &["Seed".into()], false, &mut bag);
        assert!(matches!(err, Err(BuildError::MissingCoreLibrary(_))));
    }

    #[test]
    fn picks_highest_version_and_warns_on_unresolved() {
        let seed = RawAssembly {
            key: AssemblyKey::new("Seed", (1, 0, 0, 0)),
            referenced_assembly_names: vec!["mscorlib".into(), "Missing".into()],
            types: vec![],
        };
        let source = InMemorySource::new().with_assembly(seed).with_assembly(core());
        let mut bag = DiagnosticBag::new();
        let result = resolve_transitive_closure(&source, &["Seed".into()], false, &mut bag).unwrap();
        assert!(result.unresolved.contains("Missing"));
        assert!(bag.entries().iter().any(|d| d.code == codes::LOAD_005_UNRESOLVED_REFERENCE));
        assert!(result.ordered_paths.contains(&"Seed".to_string()));
    }
}
