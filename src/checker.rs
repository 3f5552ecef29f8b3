//! App-structure checker for application authors.
//!
//! Verifies the mandatory files of an app directory, the `sample_data/`
//! layout, the manifest, and the input mapping over the sample data, and
//! collects everything wrong into a report instead of stopping at the first
//! problem. Only an unreadable manifest aborts the check.
use crate::error::Result;
use crate::manifest::{self, AppKind};
use crate::mapping;
use crate::paths::RootPaths;
use serde::Serialize;
use serde_json::json;
use std::path::Path;

/// Files every app directory must carry.
const REQUIRED_FILES: [&str; 4] = ["manifest.json", "README.md", "LICENSE", "Dockerfile"];

/// Collected findings of a structure check.
#[derive(Debug, Default, Serialize)]
pub struct CheckReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl CheckReport {
    /// True when no error-level finding was recorded.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check the structure of an app directory and its sample data.
pub fn check_app_structure(app_dir: &Path) -> Result<CheckReport> {
    let mut report = CheckReport::default();

    tracing::info!("checking app structure in {}", app_dir.display());
    for entry in REQUIRED_FILES {
        let entry_path = app_dir.join(entry);
        if !entry_path.exists() {
            report.errors.push(format!("{} is missing", entry_path.display()));
        }
    }

    let sample_dir = app_dir.join("sample_data");
    let paths = RootPaths::resolve_lenient(Some(app_dir), Some(&sample_dir))?;
    let manifest = match manifest::load(&paths) {
        Ok(manifest) => manifest,
        Err(err) => {
            // nothing else is checkable without a manifest
            report.errors.push(err.to_string());
            return Ok(report);
        }
    };
    // round-trip the parsed manifest through the schema, as a guard against
    // model drift
    let wrapped = json!({ "FASTGenomicsApplication": &manifest });
    if let Err(err) = manifest::assert_manifest_is_valid(&wrapped, &paths.manifest_file()) {
        report.errors.push(err.to_string());
    }

    tracing::info!("checking for sample_data in {}", app_dir.display());
    if sample_dir.exists() {
        let mut required_sub_dirs = vec!["data", "config"];
        if manifest.kind == AppKind::Calculation {
            required_sub_dirs.extend(["output", "summary"]);
        }
        for sub_dir in required_sub_dirs {
            if !sample_dir.join(sub_dir).exists() {
                report
                    .errors
                    .push(format!("sample_data subdirectory {sub_dir} is missing"));
            }
        }

        if let Err(err) = mapping::resolve(&paths, &manifest, true) {
            report.errors.push(err.to_string());
        }
    } else {
        report
            .warnings
            .push("no sample_data found - please provide sample data".to_string());
    }

    Ok(report)
}
