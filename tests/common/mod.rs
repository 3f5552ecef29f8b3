//! Shared test infrastructure: a complete sample app and data root on disk.
#![allow(dead_code)]

use fgio::{AppContext, RootPaths};
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A sample application tree matching the container runtime layout.
pub struct SampleApp {
    // held for its Drop; the tree lives as long as the fixture
    _root: TempDir,
    pub app_dir: PathBuf,
    pub data_root: PathBuf,
}

/// Build a `Calculation` app with one input, one output, a full set of
/// parameter kinds, and runtime overrides for `StrValue` and `IntValue`.
pub fn sample_app() -> SampleApp {
    let app = sample_app_with_kind("Calculation");
    app.write_parameters(&json!({
        "StrValue": "hello from parameters.json",
        "IntValue": 150
    }));
    app
}

/// Build the same tree without any `parameters.json`.
pub fn sample_app_with_kind(kind: &str) -> SampleApp {
    let root = tempfile::tempdir().expect("create temp root");
    let app_dir = root.path().join("app");
    let data_root = root.path().join("run");
    fs::create_dir_all(&app_dir).expect("create app dir");
    for sub in ["data/dir", "config", "output", "summary"] {
        fs::create_dir_all(data_root.join(sub)).expect("create data subdir");
    }

    let manifest = json!({
        "FASTGenomicsApplication": {
            "Type": kind,
            "Input": {
                "some_input": {"Usage": "expression matrix", "Type": "csv"}
            },
            "Output": {
                "result": {"FileName": "result.csv", "Type": "csv"}
            },
            "Parameters": {
                "StrValue": {
                    "Type": "string", "Default": "hello from manifest",
                    "Description": "a string"
                },
                "IntValue": {"Type": "integer", "Default": 100, "Description": "an int"},
                "FloatValue": {"Type": "float", "Default": 100.5, "Description": "a float"},
                "BoolValue": {"Type": "bool", "Default": true, "Description": "a bool"},
                "ListValue": {"Type": "list", "Default": [1, 2, 3], "Description": "a list"},
                "DictValue": {
                    "Type": "dict",
                    "Default": {"foo": 42, "bar": "answer to everything"},
                    "Description": "a dict"
                },
                "OptionalValue": {
                    "Type": "string", "Default": null, "Optional": true,
                    "Description": "an optional string"
                },
                "EnumValue": {
                    "Type": "enum", "Default": "red", "Enum": ["red", "green"],
                    "Description": "an enum"
                }
            }
        }
    });
    fs::write(app_dir.join("manifest.json"), manifest.to_string()).expect("write manifest");
    fs::write(
        data_root.join("config/input_file_mapping.json"),
        json!({"some_input": "dir/file.csv"}).to_string(),
    )
    .expect("write mapping");
    fs::write(data_root.join("data/dir/file.csv"), "a,b\n1,2\n").expect("write input file");

    SampleApp {
        _root: root,
        app_dir,
        data_root,
    }
}

impl SampleApp {
    /// Resolve roots over this tree and build a fresh context.
    pub fn context(&self) -> AppContext {
        let paths = RootPaths::resolve(Some(&self.app_dir), Some(&self.data_root))
            .expect("resolve sample app paths");
        AppContext::new(paths)
    }

    pub fn write_parameters(&self, overrides: &Value) {
        fs::write(
            self.data_root.join("config/parameters.json"),
            overrides.to_string(),
        )
        .expect("write parameters.json");
    }

    pub fn write_mapping(&self, mapping: &Value) {
        fs::write(
            self.data_root.join("config/input_file_mapping.json"),
            mapping.to_string(),
        )
        .expect("write input_file_mapping.json");
    }

    pub fn write_data_file(&self, relative: &str) {
        let target = self.data_root.join("data").join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).expect("create data parent");
        }
        fs::write(target, "a,b\n").expect("write data file");
    }
}
