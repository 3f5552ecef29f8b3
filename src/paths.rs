//! Root path resolution for the container runtime contract.
//!
//! The runtime mounts a fixed layout: an application root carrying the
//! manifest and a data root carrying `data/`, `config/`, `output/` and
//! `summary/`. Resolution prefers explicit arguments over environment
//! variables over the fixed container defaults.
use crate::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Default application root inside the container.
pub const DEFAULT_APP_DIR: &str = "/app";
/// Default data root inside the container.
pub const DEFAULT_DATA_ROOT: &str = "/fastgenomics";
/// Environment override for the application root.
pub const APP_DIR_ENV: &str = "FG_APP_DIR";
/// Environment override for the data root.
pub const DATA_ROOT_ENV: &str = "FG_DATA_ROOT";

/// Sentinel file whose presence marks containerized execution.
const CONTAINER_SENTINEL: &str = "/.dockerenv";

pub(crate) const MANIFEST_FILE: &str = "manifest.json";
pub(crate) const INPUT_FILE_MAPPING_FILE: &str = "input_file_mapping.json";
pub(crate) const PARAMETERS_FILE: &str = "parameters.json";
pub(crate) const SUMMARY_FILE: &str = "summary.md";

/// The five resolved root directories of a running application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootPaths {
    /// Application root; must contain `manifest.json`.
    pub app: PathBuf,
    /// Input data directory under the data root.
    pub data: PathBuf,
    /// Runtime configuration directory under the data root.
    pub config: PathBuf,
    /// Output directory under the data root (created lazily by callers).
    pub output: PathBuf,
    /// Summary directory under the data root (created lazily by callers).
    pub summary: PathBuf,
}

impl RootPaths {
    /// Resolve all roots and validate their existence.
    ///
    /// Resolution order per root: explicit argument, then the
    /// `FG_APP_DIR`/`FG_DATA_ROOT` environment variables, then the fixed
    /// container defaults. Missing mandatory directories or files are fatal.
    pub fn resolve(app_dir: Option<&Path>, data_root: Option<&Path>) -> Result<Self> {
        Self::resolve_with(app_dir, data_root, true)
    }

    /// Like [`RootPaths::resolve`] but downgrades existence failures to
    /// warnings, for tooling that inspects partially assembled app trees.
    pub fn resolve_lenient(app_dir: Option<&Path>, data_root: Option<&Path>) -> Result<Self> {
        Self::resolve_with(app_dir, data_root, false)
    }

    fn resolve_with(
        app_dir: Option<&Path>,
        data_root: Option<&Path>,
        strict: bool,
    ) -> Result<Self> {
        if running_within_container()
            && (app_dir.is_some()
                || data_root.is_some()
                || env::var_os(APP_DIR_ENV).is_some()
                || env::var_os(DATA_ROOT_ENV).is_some())
        {
            tracing::warn!("running within the container - non-default paths may result in errors");
        }

        let app = match app_dir {
            Some(dir) => absolutize(dir),
            None => absolutize(Path::new(
                &env::var(APP_DIR_ENV).unwrap_or_else(|_| DEFAULT_APP_DIR.to_string()),
            )),
        };
        let data_root = match data_root {
            Some(dir) => absolutize(dir),
            None => absolutize(Path::new(
                &env::var(DATA_ROOT_ENV).unwrap_or_else(|_| DEFAULT_DATA_ROOT.to_string()),
            )),
        };

        tracing::info!("using {} as app directory", app.display());
        tracing::info!("using {} as data root", data_root.display());

        let paths = Self {
            app,
            data: data_root.join("data"),
            config: data_root.join("config"),
            output: data_root.join("output"),
            summary: data_root.join("summary"),
        };
        paths.check(strict)?;
        Ok(paths)
    }

    /// Path of the application manifest under the app root.
    pub fn manifest_file(&self) -> PathBuf {
        self.app.join(MANIFEST_FILE)
    }

    /// Path of the input file mapping under the config root.
    pub fn input_file_mapping_file(&self) -> PathBuf {
        self.config.join(INPUT_FILE_MAPPING_FILE)
    }

    /// Path of the runtime parameter overrides under the config root.
    pub fn parameters_file(&self) -> PathBuf {
        self.config.join(PARAMETERS_FILE)
    }

    /// Path of the summary artifact under the summary root.
    pub fn summary_file(&self) -> PathBuf {
        self.summary.join(SUMMARY_FILE)
    }

    /// Check that the mandatory directories and files exist.
    ///
    /// `output` and `summary` are created lazily by the caller and are not
    /// checked here.
    fn check(&self, strict: bool) -> Result<()> {
        for (label, path) in [
            ("app", &self.app),
            ("config", &self.config),
            ("data", &self.data),
        ] {
            if !path.exists() {
                let err = Error::RootMissing {
                    label,
                    path: path.clone(),
                };
                if strict {
                    return Err(err);
                }
                tracing::warn!("{err}");
            }
        }

        let manifest = self.manifest_file();
        if !manifest.exists() {
            let err = Error::ManifestNotFound(manifest);
            if strict {
                return Err(err);
            }
            tracing::warn!("{err}");
        }
        let mapping = self.input_file_mapping_file();
        if !mapping.exists() {
            let err = Error::MappingNotFound(mapping);
            if strict {
                return Err(err);
            }
            tracing::warn!("{err}");
        }
        Ok(())
    }
}

/// Detect containerized execution via the runtime's sentinel file.
pub fn running_within_container() -> bool {
    if Path::new(CONTAINER_SENTINEL).exists() {
        tracing::debug!("running within the container runtime");
        true
    } else {
        tracing::info!("running locally");
        false
    }
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
