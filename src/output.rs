//! Output and summary path providers.
//!
//! Only `Calculation` applications have output and summary directories; both
//! providers compute destinations without writing anything. A pre-existing
//! target warns and is still returned, since overwriting is the caller's
//! call.
use crate::error::{Error, Result};
use crate::manifest::{AppKind, Manifest};
use crate::paths::RootPaths;
use std::path::PathBuf;

/// Destination path for a declared output artifact.
pub fn output_path(paths: &RootPaths, manifest: &Manifest, output_key: &str) -> Result<PathBuf> {
    ensure_calculation(manifest)?;

    let entry = manifest
        .output
        .get(output_key)
        .ok_or_else(|| Error::UnknownOutputKey(output_key.to_string()))?;
    let output_file = paths.output.join(&entry.file_name);
    if output_file.exists() {
        tracing::warn!("output file {} already exists", output_file.display());
    }
    Ok(output_file)
}

/// Destination path for the summary artifact.
///
/// The summary is CommonMark-compatible Markdown by convention.
pub fn summary_path(paths: &RootPaths, manifest: &Manifest) -> Result<PathBuf> {
    ensure_calculation(manifest)?;

    let summary_file = paths.summary_file();
    if summary_file.exists() {
        tracing::warn!("summary file {} already exists", summary_file.display());
    }
    Ok(summary_file)
}

fn ensure_calculation(manifest: &Manifest) -> Result<()> {
    if manifest.kind != AppKind::Calculation {
        return Err(Error::NotSupported(manifest.kind));
    }
    Ok(())
}
