use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while converging a single candidate directory onto its
/// junction target.
///
/// These never abort a run: the synchronizer records them in the report and
/// moves on to the next candidate.
#[derive(Error, Debug)]
pub enum LinkError {
    /// Wrapper for underlying IO errors (directory creation, removal, reads).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The candidate cannot be expressed relative to the source root, so no
    /// mirrored target exists for it.
    #[error("`{path}` is not below the source root and cannot be mirrored")]
    Unmappable { path: PathBuf },

    /// Inspecting an existing link failed.
    #[error("could not inspect `{path}`: {source}")]
    Inspect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The link primitive refused to create the junction.
    #[error("could not link `{link}` to `{target}`: {source}")]
    Create {
        link: PathBuf,
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
