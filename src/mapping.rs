//! Input file mapping resolution.
//!
//! The runtime injects the mapping from logical input keys to files either
//! through the `INPUT_FILE_MAPPING` environment variable or through
//! `config/input_file_mapping.json`. Relative entries are resolved against
//! the data root.
use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::paths::RootPaths;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Environment variable carrying the mapping as a JSON object.
pub const INPUT_FILE_MAPPING_ENV: &str = "INPUT_FILE_MAPPING";

/// Resolve the input file mapping to absolute paths.
///
/// With `check` set, manifest-declared keys missing from the mapping and
/// mapped files missing from disk are fatal; keys the manifest does not
/// declare are warned about and kept.
pub fn resolve(
    paths: &RootPaths,
    manifest: &Manifest,
    check: bool,
) -> Result<BTreeMap<String, PathBuf>> {
    let raw = load_raw(paths)?;
    let mapping: BTreeMap<String, PathBuf> = raw
        .into_iter()
        .map(|(key, relative)| (key, paths.data.join(relative)))
        .collect();
    if check {
        check_mapping(manifest, &mapping)?;
    }
    Ok(mapping)
}

/// Load the raw key-to-relative-path mapping, environment first.
///
/// An empty JSON object from the environment falls through to the file, so a
/// runtime can always override a baked-in mapping file.
fn load_raw(paths: &RootPaths) -> Result<BTreeMap<String, String>> {
    if let Ok(raw) = env::var(INPUT_FILE_MAPPING_ENV) {
        if !raw.is_empty() {
            let mapping: BTreeMap<String, String> =
                serde_json::from_str(&raw).map_err(|source| Error::MappingSyntax {
                    origin: format!("`{INPUT_FILE_MAPPING_ENV}` environment"),
                    source,
                })?;
            if !mapping.is_empty() {
                tracing::info!(
                    "input file mapping loaded from `{INPUT_FILE_MAPPING_ENV}` environment"
                );
                return Ok(mapping);
            }
        }
    }

    let file = paths.input_file_mapping_file();
    if !file.exists() {
        return Err(Error::MappingNotFound(file));
    }
    let text = fs::read_to_string(&file).map_err(|source| Error::Io {
        path: file.clone(),
        source,
    })?;
    let mapping = serde_json::from_str(&text).map_err(|source| Error::MappingSyntax {
        origin: file.display().to_string(),
        source,
    })?;
    tracing::info!("input file mapping loaded from {}", file.display());
    Ok(mapping)
}

fn check_mapping(manifest: &Manifest, mapping: &BTreeMap<String, PathBuf>) -> Result<()> {
    let extra: Vec<&str> = mapping
        .keys()
        .filter(|key| !manifest.input.contains_key(*key))
        .map(String::as_str)
        .collect();
    if !extra.is_empty() {
        tracing::warn!(
            "ignoring keys defined in the input file mapping but not in manifest.json: {extra:?}"
        );
    }

    let missing: Vec<String> = manifest
        .input
        .keys()
        .filter(|key| !mapping.contains_key(*key))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(Error::MissingInputKeys { keys: missing });
    }

    for path in mapping.values() {
        if !path.exists() {
            return Err(Error::InputFileNotFound(path.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "mapping_tests.rs"]
mod tests;
