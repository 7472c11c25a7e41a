//! Filesystem collaborators consumed by the folder walker and the album builder.
//!
//! The engine only talks to the disk through these traits so that listing,
//! stat'ing and sidecar lookup can be swapped out (e.g. an in-memory tree in tests).

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use serde::Deserialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::Error;

/// One direct child of a listed folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub is_file: bool,
}

/// Point-in-time metadata for a single path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStatInfo {
    pub is_file: bool,
    pub created: SystemTime,
}

/// Optional per-folder sidecar metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AlbumProps {
    /// Cover image, relative to the album folder (usually a bare file name).
    #[serde(default)]
    pub cover: Option<String>,
}

/// Lists the direct children of a folder in enumeration order.
pub trait DirLister: Send + Sync {
    fn list(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>>;
}

pub trait FileStat: Send + Sync {
    fn stat(&self, path: &Path) -> io::Result<FileStatInfo>;
}

/// Reads the optional album properties stored alongside a folder.
pub trait AlbumPropsReader: Send + Sync {
    /// `Ok(None)` when the folder carries no properties.
    fn read_props(&self, folder: &Path) -> Result<Option<AlbumProps>, Error>;
}

/// Local disk implementation of [`DirLister`] and [`FileStat`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl DirLister for LocalFs {
    fn list(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>> {
        if !std::fs::metadata(dir)?.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("{} is not a directory", dir.display()),
            ));
        }
        let mut out = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                // The folder itself could not be opened.
                Err(err) if err.path().is_none_or(|p| p == dir) => return Err(err.into()),
                Err(err) => {
                    debug!(dir = %dir.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            let file_type = entry.file_type();
            out.push(DirEntryInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path().to_path_buf(),
                is_dir: file_type.is_dir(),
                is_file: file_type.is_file(),
            });
        }
        Ok(out)
    }
}

impl FileStat for LocalFs {
    fn stat(&self, path: &Path) -> io::Result<FileStatInfo> {
        let meta = std::fs::metadata(path)?;
        // Not every filesystem records a birth time.
        let created = meta.created().or_else(|_| meta.modified())?;
        Ok(FileStatInfo {
            is_file: meta.is_file(),
            created,
        })
    }
}

/// Reads album properties from a JSON sidecar file inside each folder.
#[derive(Debug, Clone)]
pub struct JsonAlbumProps {
    file_name: String,
}

impl JsonAlbumProps {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

impl AlbumPropsReader for JsonAlbumProps {
    fn read_props(&self, folder: &Path) -> Result<Option<AlbumProps>, Error> {
        let path = folder.join(&self.file_name);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(Error::folder(path, err)),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| Error::Props { path, source })
    }
}

/// The set of collaborators an engine reads the disk through.
#[derive(Clone)]
pub struct Collaborators {
    pub lister: Arc<dyn DirLister>,
    pub stat: Arc<dyn FileStat>,
    pub props: Arc<dyn AlbumPropsReader>,
}

impl Collaborators {
    /// Local disk listing and stat'ing, JSON sidecars named `props_file`.
    pub fn local(props_file: impl Into<String>) -> Self {
        Self {
            lister: Arc::new(LocalFs),
            stat: Arc::new(LocalFs),
            props: Arc::new(JsonAlbumProps::new(props_file)),
        }
    }
}
