//! E1-style end-to-end scenario (spec.md §8 / SPEC_FULL.md's note that,
//! absent a real reflection facility, fixtures play the role of "a loaded
//! graph"): two fixture assemblies on disk, run through the CLI
//! orchestrator exactly as `clrbind` would from the command line, asserting
//! the full declaration tree comes out the other side.

use clrbind_cli::{orchestrator, CliArgs};
use clrbind_model::AssemblyKey;
use clrbind_reflect::{RawAssembly, RawMember, RawType};
use clrbind_reflect::metadata::{RawMemberKind, RawTypeKind};
use std::path::PathBuf;

fn write_fixture(dir: &std::path::Path, file_name: &str, assembly: &RawAssembly) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, serde_json::to_string_pretty(assembly).unwrap()).unwrap();
    path
}

fn core_library() -> RawAssembly {
    RawAssembly {
        key: AssemblyKey::new("System.Runtime", (8, 0, 0, 0)),
        referenced_assembly_names: vec![],
        types: vec![],
    }
}

fn app_assembly() -> RawAssembly {
    RawAssembly {
        key: AssemblyKey::new("App", (1, 0, 0, 0)),
        referenced_assembly_names: vec!["System.Runtime".into()],
        types: vec![RawType {
            namespace: "App".into(),
            simple_name: "Widget".into(),
            clr_full_name: "App.Widget".into(),
            is_public: true,
            enclosing_type: None,
            kind: RawTypeKind::Class,
            is_abstract: false,
            is_sealed: false,
            is_value_type: false,
            is_static: false,
            base_type: None,
            interfaces: vec![],
            generic_parameter_names: vec![],
            members: vec![RawMember {
                name: "DoThing".into(),
                kind: RawMemberKind::Method,
                is_static: false,
                is_public: true,
                metadata_token: 10,
                parameter_types: vec![],
                return_type: "System.Void".into(),
            }],
            metadata_token: 1,
        }],
    }
}

#[test]
fn a_seed_and_one_reference_produce_a_full_declaration_tree() {
    let reference_dir = tempfile::tempdir().unwrap();
    write_fixture(reference_dir.path(), "System.Runtime.json", &core_library());

    let seed_dir = tempfile::tempdir().unwrap();
    let seed_path = write_fixture(seed_dir.path(), "app.json", &app_assembly());

    let out_dir = tempfile::tempdir().unwrap();

    let args = CliArgs {
        seeds: vec![seed_path],
        reference_paths: vec![reference_dir.path().to_path_buf()],
        policy: None,
        out_dir: out_dir.path().to_path_buf(),
        strict_versions: false,
        verbose: 0,
    };

    let outcome = orchestrator::run(&args).expect("the pipeline runs to completion");

    assert_eq!(outcome.error_count, 0);
    assert_eq!(outcome.emitted_files, 6);
    assert!(out_dir.path().join("_support").join("types.d.ts").exists());
    assert!(out_dir.path().join("App").join("internal").join("index.d.ts").exists());
    assert!(out_dir.path().join("App").join("metadata.json").exists());

    let metadata = std::fs::read_to_string(out_dir.path().join("App").join("metadata.json")).unwrap();
    assert!(metadata.contains("App.Widget"));
}

#[test]
fn a_seed_with_no_core_library_in_its_closure_fails_fast() {
    let seed_dir = tempfile::tempdir().unwrap();
    let mut orphan = app_assembly();
    orphan.referenced_assembly_names.clear();
    let seed_path = write_fixture(seed_dir.path(), "app.json", &orphan);

    let out_dir = tempfile::tempdir().unwrap();
    let args = CliArgs {
        seeds: vec![seed_path],
        reference_paths: vec![],
        policy: None,
        out_dir: out_dir.path().to_path_buf(),
        strict_versions: false,
        verbose: 0,
    };

    let err = orchestrator::run(&args).unwrap_err();
    assert!(matches!(err, clrbind_common::error::BuildError::MissingCoreLibrary(_)));
}
