//! Error taxonomy for the runtime IO layer.
//!
//! Every fatal condition gets its own variant so callers can branch on the
//! cause instead of string-matching a generic error.
use crate::manifest::AppKind;
use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// All fatal conditions raised by the resolvers.
///
/// Soft conditions (type mismatches, extra keys, pre-existing output targets)
/// are logged as warnings and never surface here.
#[derive(Debug, Error)]
pub enum Error {
    /// A required root directory does not exist.
    #[error("path to {label} directory `{path}` not found! check paths")]
    RootMissing { label: &'static str, path: PathBuf },

    /// The application manifest file is absent.
    #[error(
        "app manifest `{0}` not found! please provide a manifest.json in the \
         application's root directory"
    )]
    ManifestNotFound(PathBuf),

    /// The manifest file is not valid JSON.
    #[error("app manifest `{path}` is not a valid JSON file - check syntax")]
    ManifestSyntax {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The manifest parsed but does not match the manifest schema.
    #[error("app manifest `{path}` failed schema validation: {detail}")]
    ManifestSchema { path: PathBuf, detail: String },

    /// No input file mapping was found in the environment or on disk.
    #[error("input file mapping `{0}` not found")]
    MappingNotFound(PathBuf),

    /// The input file mapping is not valid JSON (from env or file).
    #[error("input file mapping from {origin} is not valid JSON")]
    MappingSyntax {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// Input keys declared in the manifest are absent from the mapping.
    #[error("keys declared in manifest.json but not in the input file mapping: {}", .keys.join(", "))]
    MissingInputKeys { keys: Vec<String> },

    /// A mapped input file does not exist on disk.
    #[error("input file `{0}`, defined in the input file mapping, not found")]
    InputFileNotFound(PathBuf),

    /// The requested input key is not declared in the manifest.
    #[error("key '{0}' not defined in the manifest Input section")]
    UnknownInputKey(String),

    /// The requested output key is not declared in the manifest.
    #[error("key '{0}' not defined in the manifest Output section")]
    UnknownOutputKey(String),

    /// The requested parameter is not declared in the manifest.
    #[error("parameter '{0}' not defined in manifest.json")]
    UnknownParameter(String),

    /// Output/summary paths requested for an application kind without them.
    #[error("file output for '{0}' applications is not supported")]
    NotSupported(AppKind),

    /// A file existed but could not be read.
    #[error("could not read `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A declared type tag is not in the closed tag table.
    #[error("unknown parameter type to check: {0}")]
    UnknownTypeTag(String),

    /// An Enum list was declared on a parameter whose type is not `enum`.
    #[error("parameter '{name}' provides an Enum list but its type is '{type_tag}'")]
    EnumOnNonEnumType { name: String, type_tag: String },
}
