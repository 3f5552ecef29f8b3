use super::resolve;
use crate::error::Error;
use crate::manifest::{AppKind, InputEntry, Manifest};
use crate::paths::RootPaths;
use serde_json::json;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

fn root_paths(root: &Path) -> RootPaths {
    let data_root = root.join("run");
    RootPaths {
        app: root.join("app"),
        data: data_root.join("data"),
        config: data_root.join("config"),
        output: data_root.join("output"),
        summary: data_root.join("summary"),
    }
}

fn manifest_with_inputs(keys: &[&str]) -> Manifest {
    let input: BTreeMap<String, InputEntry> = keys
        .iter()
        .map(|key| {
            (
                (*key).to_string(),
                InputEntry {
                    usage: "test input".to_string(),
                    file_type: "csv".to_string(),
                },
            )
        })
        .collect();
    Manifest {
        kind: AppKind::Calculation,
        input,
        output: BTreeMap::new(),
        parameters: BTreeMap::new(),
    }
}

fn write_mapping(paths: &RootPaths, mapping: &serde_json::Value) {
    fs::create_dir_all(&paths.config).expect("create config dir");
    fs::write(paths.input_file_mapping_file(), mapping.to_string()).expect("write mapping");
}

fn write_data_file(paths: &RootPaths, relative: &str) {
    let target = paths.data.join(relative);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).expect("create data parent");
    }
    fs::write(target, "1,2,3\n").expect("write data file");
}

#[test]
fn relative_entries_join_the_data_root() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let paths = root_paths(tmp.path());
    write_mapping(&paths, &json!({"some_input": "dir/file.csv"}));
    write_data_file(&paths, "dir/file.csv");

    let mapping =
        resolve(&paths, &manifest_with_inputs(&["some_input"]), true).expect("resolve mapping");
    assert_eq!(mapping["some_input"], paths.data.join("dir/file.csv"));
    assert!(mapping["some_input"].is_absolute());
    assert!(mapping["some_input"].exists());
}

#[test]
fn missing_mapping_file_is_not_found() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let paths = root_paths(tmp.path());

    let err = resolve(&paths, &manifest_with_inputs(&[]), true).expect_err("should fail");
    assert!(matches!(err, Error::MappingNotFound(_)), "got {err:?}");
}

#[test]
fn malformed_mapping_file_is_fatal() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let paths = root_paths(tmp.path());
    fs::create_dir_all(&paths.config).expect("create config dir");
    fs::write(paths.input_file_mapping_file(), "{oops").expect("write mapping");

    let err = resolve(&paths, &manifest_with_inputs(&[]), true).expect_err("should fail");
    assert!(matches!(err, Error::MappingSyntax { .. }), "got {err:?}");
}

#[test]
fn declared_key_missing_from_mapping_is_fatal() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let paths = root_paths(tmp.path());
    write_mapping(&paths, &json!({}));

    let err = resolve(&paths, &manifest_with_inputs(&["some_input"]), true)
        .expect_err("should fail");
    match err {
        Error::MissingInputKeys { keys } => assert_eq!(keys, vec!["some_input".to_string()]),
        other => panic!("got {other:?}"),
    }
}

#[test]
fn undeclared_mapping_key_is_retained_with_a_warning() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let paths = root_paths(tmp.path());
    write_mapping(
        &paths,
        &json!({"some_input": "a.csv", "surprise": "b.csv"}),
    );
    write_data_file(&paths, "a.csv");
    write_data_file(&paths, "b.csv");

    let mapping =
        resolve(&paths, &manifest_with_inputs(&["some_input"]), true).expect("resolve mapping");
    assert!(mapping.contains_key("surprise"));
}

#[test]
fn missing_target_file_is_fatal() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let paths = root_paths(tmp.path());
    write_mapping(&paths, &json!({"some_input": "gone.csv"}));

    let err = resolve(&paths, &manifest_with_inputs(&["some_input"]), true)
        .expect_err("should fail");
    assert!(matches!(err, Error::InputFileNotFound(_)), "got {err:?}");
}

#[test]
fn unchecked_resolution_skips_validation() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let paths = root_paths(tmp.path());
    write_mapping(&paths, &json!({"some_input": "gone.csv"}));

    let mapping = resolve(&paths, &manifest_with_inputs(&["some_input", "unmapped"]), false)
        .expect("resolve unchecked");
    assert_eq!(mapping["some_input"], paths.data.join("gone.csv"));
}
