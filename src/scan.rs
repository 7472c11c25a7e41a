//! Breadth-first folder discovery under a set of roots.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Error;
use crate::fs::{DirEntryInfo, DirLister};

/// Extensions recognised as images when nothing else is configured.
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["jpg", "png", "gif"];

/// Return `true` if `path` has one of the allowed extensions (lowercase, without dot).
#[must_use]
pub fn is_supported_image(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| *e == ext)
        })
}

/// A visited folder together with its direct children.
#[derive(Debug, Clone)]
pub struct Folder {
    pub path: PathBuf,
    pub entries: Vec<DirEntryInfo>,
}

impl Folder {
    fn sub_folders(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.entries
            .iter()
            .filter(|e| e.is_dir)
            .map(|e| e.path.clone())
    }
}

enum Queued {
    Listed(Folder),
    Pending(PathBuf),
}

/// Lazily walks every folder reachable from the roots, roots included.
///
/// Folders are visited from a FIFO queue: each visited folder appends its
/// direct sub-folders at the tail. Symbolic-link loops are not detected and
/// will keep the walk going forever.
pub struct FolderWalker<'a> {
    lister: &'a dyn DirLister,
    queue: VecDeque<Queued>,
}

impl<'a> FolderWalker<'a> {
    /// List every root up front and prepare the walk.
    ///
    /// # Errors
    /// Returns [`Error::BadRoot`] naming every root that could not be listed.
    pub fn start(lister: &'a dyn DirLister, roots: &[PathBuf]) -> Result<Self, Error> {
        let mut queue = VecDeque::with_capacity(roots.len());
        let mut bad = Vec::new();
        for root in roots {
            match lister.list(root) {
                Ok(entries) => queue.push_back(Queued::Listed(Folder {
                    path: root.clone(),
                    entries,
                })),
                Err(err) => {
                    debug!(root = %root.display(), error = %err, "root not readable");
                    bad.push(root.to_string_lossy().into_owned());
                }
            }
        }
        if !bad.is_empty() {
            return Err(Error::BadRoot(bad.join(", ")));
        }
        Ok(Self { lister, queue })
    }
}

impl Iterator for FolderWalker<'_> {
    /// A folder that fails to list is yielded as an error; the walk goes on
    /// with the rest of the queue.
    type Item = Result<Folder, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let folder = match self.queue.pop_front()? {
            Queued::Listed(folder) => folder,
            Queued::Pending(path) => match self.lister.list(&path) {
                Ok(entries) => Folder { path, entries },
                Err(err) => return Some(Err(Error::folder(path, err))),
            },
        };
        self.queue
            .extend(folder.sub_folders().map(Queued::Pending));
        Some(Ok(folder))
    }
}
