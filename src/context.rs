//! Resolve-once application context.
//!
//! `AppContext` replaces process-wide globals with an explicit object that is
//! constructed once at startup and passed by reference. Manifest, parameters
//! and input mapping are loaded lazily on first access and cached for the
//! lifetime of the context; `reset` discards the caches for test scenarios.
//! The context is deliberately not `Sync`: initialization happens on a single
//! thread during batch startup.
use crate::error::{Error, Result};
use crate::manifest::{self, Manifest};
use crate::mapping;
use crate::output;
use crate::params;
use crate::paths::RootPaths;
use once_cell::unsync::OnceCell;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Typed access to everything the runtime contract provides an application.
#[derive(Debug)]
pub struct AppContext {
    paths: RootPaths,
    manifest: OnceCell<Manifest>,
    parameters: OnceCell<BTreeMap<String, Value>>,
    input_files: OnceCell<BTreeMap<String, PathBuf>>,
}

impl AppContext {
    /// Build a context over already resolved roots.
    pub fn new(paths: RootPaths) -> Self {
        Self {
            paths,
            manifest: OnceCell::new(),
            parameters: OnceCell::new(),
            input_files: OnceCell::new(),
        }
    }

    /// Resolve roots (argument > environment > default) and build a context.
    pub fn resolve(app_dir: Option<&Path>, data_root: Option<&Path>) -> Result<Self> {
        Ok(Self::new(RootPaths::resolve(app_dir, data_root)?))
    }

    /// The resolved root directories.
    pub fn paths(&self) -> &RootPaths {
        &self.paths
    }

    /// The application manifest, loaded and schema-validated on first access.
    ///
    /// Idempotent: after the first successful load the manifest file is never
    /// re-read.
    pub fn manifest(&self) -> Result<&Manifest> {
        self.manifest.get_or_try_init(|| manifest::load(&self.paths))
    }

    /// Effective values of every declared parameter.
    pub fn parameters(&self) -> Result<&BTreeMap<String, Value>> {
        let manifest = self.manifest()?;
        self.parameters
            .get_or_try_init(|| params::resolve(&self.paths, manifest))
    }

    /// Effective value of a single declared parameter.
    ///
    /// Lookup is key-based: a declared parameter whose resolved value is null
    /// returns `Value::Null`, only undeclared names fail.
    pub fn parameter(&self, param_key: &str) -> Result<&Value> {
        self.parameters()?
            .get(param_key)
            .ok_or_else(|| Error::UnknownParameter(param_key.to_string()))
    }

    /// The checked input file mapping (declared keys present, files exist).
    pub fn input_file_mapping(&self) -> Result<&BTreeMap<String, PathBuf>> {
        self.input_files
            .get_or_try_init(|| mapping::resolve(&self.paths, self.manifest()?, true))
    }

    /// Absolute, existence-checked location of a declared input.
    pub fn input_path(&self, input_key: &str) -> Result<&Path> {
        let manifest = self.manifest()?;
        if !manifest.input.contains_key(input_key) {
            return Err(Error::UnknownInputKey(input_key.to_string()));
        }
        self.input_file_mapping()?
            .get(input_key)
            .map(PathBuf::as_path)
            .ok_or_else(|| Error::MissingInputKeys {
                keys: vec![input_key.to_string()],
            })
    }

    /// Destination path for a declared output artifact.
    pub fn output_path(&self, output_key: &str) -> Result<PathBuf> {
        output::output_path(&self.paths, self.manifest()?, output_key)
    }

    /// Destination path for the summary artifact.
    pub fn summary_path(&self) -> Result<PathBuf> {
        output::summary_path(&self.paths, self.manifest()?)
    }

    /// Drop every cache so the next access re-reads the underlying files.
    pub fn reset(&mut self) {
        self.manifest = OnceCell::new();
        self.parameters = OnceCell::new();
        self.input_files = OnceCell::new();
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
