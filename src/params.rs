//! Parameter resolution: manifest defaults merged with runtime overrides.
//!
//! Override loading is deliberately best effort. The manifest and the input
//! mapping are critical and fail hard, but a broken `parameters.json` only
//! logs and falls back to the declared defaults.
use crate::error::Result;
use crate::manifest::{self, Manifest};
use crate::paths::RootPaths;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;

/// Resolve the effective value of every declared parameter.
///
/// Every name declared in the manifest appears in the result; overrides win
/// over defaults, undeclared overrides are warned about and dropped, and
/// type mismatches warn without failing.
pub fn resolve(paths: &RootPaths, manifest: &Manifest) -> Result<BTreeMap<String, Value>> {
    let mut parameters: BTreeMap<String, Value> = manifest
        .parameters
        .iter()
        .map(|(name, descriptor)| (name.clone(), descriptor.default.clone()))
        .collect();

    for (name, value) in load_runtime_overrides(paths) {
        if !manifest.parameters.contains_key(&name) {
            tracing::warn!(
                "ignoring runtime parameter {name}, as it is not defined in manifest.json"
            );
            continue;
        }
        parameters.insert(name, value);
    }

    for (name, value) in &parameters {
        manifest::warn_on_type_mismatch(name, &manifest.parameters[name], value, false)?;
    }
    Ok(parameters)
}

/// Load `config/parameters.json`, treating any failure as "no overrides".
fn load_runtime_overrides(paths: &RootPaths) -> BTreeMap<String, Value> {
    let file = paths.parameters_file();
    if !file.exists() {
        tracing::info!(
            "no runtime parameters {} found - using defaults",
            file.display()
        );
        return BTreeMap::new();
    }

    let text = match fs::read_to_string(&file) {
        Ok(text) => text,
        Err(err) => {
            tracing::error!(
                "could not read {} due to an unexpected error ({err}) - using defaults",
                file.display()
            );
            return BTreeMap::new();
        }
    };
    match serde_json::from_str(&text) {
        Ok(overrides) => overrides,
        Err(err) => {
            tracing::error!(
                "could not parse {} due to an unexpected error ({err}) - using defaults",
                file.display()
            );
            BTreeMap::new()
        }
    }
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;
