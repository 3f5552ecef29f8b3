//! Runtime IO and configuration access layer for containerized analysis
//! apps.
//!
//! The container runtime mounts an application root carrying `manifest.json`
//! and a data root carrying `data/`, `config/`, `output/` and `summary/`.
//! This crate resolves those roots, loads and schema-validates the manifest,
//! merges declared parameter defaults with runtime overrides, and hands out
//! typed paths for inputs, outputs and the summary artifact.
//!
//! To work without the container, set `FG_APP_DIR` and `FG_DATA_ROOT` or
//! pass explicit directories to [`AppContext::resolve`].

pub mod checker;
pub mod context;
pub mod error;
pub mod manifest;
pub mod mapping;
pub mod output;
pub mod params;
pub mod paths;

pub use context::AppContext;
pub use error::{Error, Result};
pub use manifest::{AppKind, InputEntry, Manifest, OutputEntry, ParameterDescriptor};
pub use paths::RootPaths;
