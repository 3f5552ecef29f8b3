//! Application manifest loading and validation.
//!
//! The manifest declares the application kind, its logical inputs and
//! outputs, and its parameters. Loading is fatal on a missing file, invalid
//! JSON, or a schema mismatch; declared defaults that disagree with their
//! declared type only warn.
use crate::error::{Error, Result};
use crate::paths::RootPaths;
use jsonschema::Draft;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// JSON Schema every manifest must validate against.
pub const MANIFEST_SCHEMA_JSON: &str = include_str!("../schemes/manifest_schema.json");

/// Top-level wrapper key of `manifest.json`.
pub const MANIFEST_WRAPPER_KEY: &str = "FASTGenomicsApplication";

/// Application kind; only `Calculation` apps may produce output and summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppKind {
    Calculation,
    Visualization,
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AppKind::Calculation => "Calculation",
            AppKind::Visualization => "Visualization",
        })
    }
}

/// A declared logical input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputEntry {
    /// Human-readable usage text shown to whoever wires the mapping.
    #[serde(rename = "Usage")]
    pub usage: String,
    /// Declared file type of the input.
    #[serde(rename = "Type")]
    pub file_type: String,
}

/// A declared output artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputEntry {
    /// File name of the artifact under the output root.
    #[serde(rename = "FileName")]
    pub file_name: String,
    /// Declared file type of the output.
    #[serde(rename = "Type")]
    pub file_type: String,
}

/// A declared parameter with its default and soft type contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Declared type tag; one of float/integer/bool/list/dict/string/enum.
    #[serde(rename = "Type")]
    pub type_tag: String,
    /// Default value used when no runtime override is present.
    #[serde(rename = "Default")]
    pub default: Value,
    /// Optional parameters accept a null value unconditionally.
    #[serde(rename = "Optional", default)]
    pub optional: bool,
    /// Valid choices; only meaningful when the type tag is `enum`.
    #[serde(rename = "Enum", default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Value>>,
    /// Human-readable description from the manifest.
    #[serde(rename = "Description")]
    pub description: String,
}

/// The parsed, schema-validated application descriptor.
///
/// `Input`, `Output` and `Parameters` may be JSON null in the file; they
/// normalize to empty maps here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "Type")]
    pub kind: AppKind,
    #[serde(rename = "Input", default, deserialize_with = "nullable_map")]
    pub input: BTreeMap<String, InputEntry>,
    #[serde(rename = "Output", default, deserialize_with = "nullable_map")]
    pub output: BTreeMap<String, OutputEntry>,
    #[serde(rename = "Parameters", default, deserialize_with = "nullable_map")]
    pub parameters: BTreeMap<String, ParameterDescriptor>,
}

fn nullable_map<'de, D, V>(deserializer: D) -> std::result::Result<BTreeMap<String, V>, D::Error>
where
    D: serde::Deserializer<'de>,
    V: Deserialize<'de>,
{
    let map = Option::<BTreeMap<String, V>>::deserialize(deserializer)?;
    Ok(map.unwrap_or_default())
}

/// Load and validate `manifest.json` from the app root.
pub(crate) fn load(paths: &RootPaths) -> Result<Manifest> {
    let file = paths.manifest_file();
    if !file.exists() {
        return Err(Error::ManifestNotFound(file));
    }
    let text = fs::read_to_string(&file).map_err(|source| Error::Io {
        path: file.clone(),
        source,
    })?;
    let raw: Value = serde_json::from_str(&text).map_err(|source| Error::ManifestSyntax {
        path: file.clone(),
        source,
    })?;
    assert_manifest_is_valid(&raw, &file)?;

    // The schema guarantees the wrapper key; a deserialization failure past
    // this point is still reported as a schema problem, not a panic.
    let app = raw
        .get(MANIFEST_WRAPPER_KEY)
        .cloned()
        .unwrap_or(Value::Null);
    let manifest: Manifest =
        serde_json::from_value(app).map_err(|err| Error::ManifestSchema {
            path: file.clone(),
            detail: err.to_string(),
        })?;

    for (name, descriptor) in &manifest.parameters {
        warn_on_type_mismatch(name, descriptor, &descriptor.default, true)?;
    }
    Ok(manifest)
}

/// Validate a raw manifest document against the embedded JSON Schema.
pub fn assert_manifest_is_valid(raw: &Value, path: &Path) -> Result<()> {
    let schema: Value =
        serde_json::from_str(MANIFEST_SCHEMA_JSON).map_err(|err| Error::ManifestSchema {
            path: path.to_path_buf(),
            detail: format!("embedded schema is not valid JSON: {err}"),
        })?;
    let validator = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .map_err(|err| Error::ManifestSchema {
            path: path.to_path_buf(),
            detail: format!("embedded schema did not compile: {err}"),
        })?;

    let messages: Vec<String> = validator
        .iter_errors(raw)
        .map(|err| err.to_string())
        .collect();
    if !messages.is_empty() {
        return Err(Error::ManifestSchema {
            path: path.to_path_buf(),
            detail: messages.join("; "),
        });
    }
    Ok(())
}

/// Test a value against a declared type tag.
///
/// Closed tag table: an unknown tag is a configuration error, never a silent
/// pass. `float` accepts any JSON number, `enum` checks membership in the
/// descriptor's choices, and optional descriptors accept null.
pub fn value_matches(name: &str, descriptor: &ParameterDescriptor, value: &Value) -> Result<bool> {
    if descriptor.choices.is_some() && descriptor.type_tag != "enum" {
        return Err(Error::EnumOnNonEnumType {
            name: name.to_string(),
            type_tag: descriptor.type_tag.clone(),
        });
    }

    let matched = match descriptor.type_tag.as_str() {
        "float" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "bool" => value.is_boolean(),
        "list" => value.is_array(),
        "dict" => value.is_object(),
        "string" => value.is_string(),
        "enum" => descriptor
            .choices
            .as_ref()
            .is_some_and(|choices| choices.contains(value)),
        other => return Err(Error::UnknownTypeTag(other.to_string())),
    };

    if descriptor.optional && value.is_null() {
        return Ok(true);
    }
    Ok(matched)
}

/// Warn (never fail) when a value disagrees with its declared type.
///
/// Multi-type parameters are common in downstream libraries, e.g. "red" or
/// 24342 for the same knob, so a mismatch keeps the value intact.
pub(crate) fn warn_on_type_mismatch(
    name: &str,
    descriptor: &ParameterDescriptor,
    value: &Value,
    is_default: bool,
) -> Result<()> {
    if value_matches(name, descriptor, value)? {
        return Ok(());
    }
    let role = if is_default { "default parameter" } else { "parameter" };
    match &descriptor.choices {
        Some(choices) => tracing::warn!(
            "the {role} {name} has a different value than expected. \
             it should be one of {choices:?} but is {value}. \
             the value is accessible but beware!"
        ),
        None => tracing::warn!(
            "the {role} {name} has a different value than expected. \
             it should be a {expected} but is a {actual}. \
             the value is accessible but beware!",
            expected = descriptor.type_tag,
            actual = json_type_name(value),
        ),
    }
    Ok(())
}

/// Runtime JSON type name, aligned with the declared tag vocabulary.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(number) => {
            if number.is_i64() || number.is_u64() {
                "integer"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
