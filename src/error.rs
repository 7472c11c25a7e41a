use std::path::PathBuf;

use thiserror::Error;

/// Library error type for album discovery and selection.
#[derive(Debug, Error)]
pub enum Error {
    /// `scan` was called without any root folder.
    #[error("nothing to load: no root folders given")]
    NothingToLoad,

    /// One or more root folders are missing or not readable directories.
    #[error("invalid root folder: {0}")]
    BadRoot(String),

    /// A single folder could not be listed or stat'ed during a scan.
    #[error("failed to read folder {}: {source}", path.display())]
    Folder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An album properties sidecar exists but is not valid JSON.
    #[error("malformed album properties in {}: {source}", path.display())]
    Props {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn folder(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Folder {
            path: path.into(),
            source,
        }
    }
}
