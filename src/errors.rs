use std::path::PathBuf;

use thiserror::Error;

use crate::fs_op::PathError;

/// Fatal errors raised while discovering candidates. Any of these aborts the
/// run before a single junction is touched.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The source root is unusable (missing, not a directory, or hidden).
    #[error("invalid source root: {0}")]
    Root(#[from] PathError),

    /// Enumerating the source tree failed.
    #[error("failed to walk the source tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// A project file could not be read.
    #[error("failed to read `{path}`: {source}")]
    ReadDescriptor {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while locating, reading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read settings `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings `{path}`: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid settings: {0}")]
    Invalid(String),
}
