//! Album records and the per-folder album builder.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Error;
use crate::fs::{AlbumProps, AlbumPropsReader, DirEntryInfo, DirLister, FileStat};
use crate::scan::{Folder, is_supported_image};

/// A folder holding at least one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Album {
    /// Display label, the folder's base name.
    pub name: String,
    /// Absolute folder path; identifies the album within one scan.
    pub folder: PathBuf,
    /// Representative image.
    pub cover: PathBuf,
    /// Number of images directly inside the folder.
    pub count: usize,
    /// Folder creation time, snapshotted when the album was built.
    pub created: DateTime<Utc>,
}

/// Which image becomes the cover when no override applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoverFallback {
    /// First image in filesystem enumeration order.
    #[default]
    ListingOrder,
    /// First image in natural (numeric-aware, case-insensitive) name order.
    NaturalName,
}

/// Turns visited folders into [`Album`] records.
#[derive(Clone)]
pub struct AlbumBuilder {
    stat: Arc<dyn FileStat>,
    props: Arc<dyn AlbumPropsReader>,
    extensions: Vec<String>,
    cover_fallback: CoverFallback,
}

impl AlbumBuilder {
    pub fn new(
        stat: Arc<dyn FileStat>,
        props: Arc<dyn AlbumPropsReader>,
        extensions: Vec<String>,
        cover_fallback: CoverFallback,
    ) -> Self {
        Self {
            stat,
            props,
            extensions,
            cover_fallback,
        }
    }

    /// Build the album for `folder`, or `None` if it holds no images.
    ///
    /// # Errors
    /// Returns [`Error::Folder`] if the folder cannot be stat'ed.
    pub fn build(&self, folder: &Folder) -> Result<Option<Album>, Error> {
        let images: Vec<&DirEntryInfo> = folder
            .entries
            .iter()
            .filter(|e| e.is_file && is_supported_image(&e.path, &self.extensions))
            .collect();
        if images.is_empty() {
            return Ok(None);
        }

        let stat = self
            .stat
            .stat(&folder.path)
            .map_err(|err| Error::folder(&folder.path, err))?;
        let cover = self.resolve_cover(&folder.path, &images);

        Ok(Some(Album {
            name: album_name(&folder.path),
            folder: folder.path.clone(),
            cover,
            count: images.len(),
            created: DateTime::<Utc>::from(stat.created),
        }))
    }

    fn resolve_cover(&self, dir: &Path, images: &[&DirEntryInfo]) -> PathBuf {
        match self.props.read_props(dir) {
            Ok(Some(AlbumProps {
                cover: Some(cover),
            })) => {
                let wanted = dir.join(&cover);
                if let Some(found) = images.iter().find(|e| e.path == wanted) {
                    return found.path.clone();
                }
                warn!(folder = %dir.display(), cover = %cover, "cover override is not an image in this folder");
            }
            Ok(_) => {}
            Err(err) => warn!(folder = %dir.display(), error = %err, "ignoring album properties"),
        }
        self.first_image(images)
    }

    fn first_image(&self, images: &[&DirEntryInfo]) -> PathBuf {
        let first = match self.cover_fallback {
            CoverFallback::ListingOrder => images.first(),
            CoverFallback::NaturalName => images.iter().min_by(|a, b| natural_cmp(&a.name, &b.name)),
        };
        // `images` is never empty here.
        first.map(|e| e.path.clone()).unwrap_or_default()
    }
}

fn album_name(folder: &Path) -> String {
    folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| folder.display().to_string())
}

/// The images directly inside `folder`, in slideshow (natural name) order.
///
/// # Errors
/// Returns [`Error::Folder`] if the folder cannot be listed.
pub fn album_images(
    lister: &dyn DirLister,
    folder: &Path,
    extensions: &[String],
) -> Result<Vec<PathBuf>, Error> {
    let mut images: Vec<DirEntryInfo> = lister
        .list(folder)
        .map_err(|err| Error::folder(folder, err))?
        .into_iter()
        .filter(|e| e.is_file && is_supported_image(&e.path, extensions))
        .collect();
    images.sort_by(|a, b| natural_cmp(&a.name, &b.name));
    debug!(folder = %folder.display(), images = images.len(), "opened album");
    Ok(images.into_iter().map(|e| e.path).collect())
}

/// Compare names so that digit runs order numerically and letters ignore case.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();
    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let ord = cmp_digits(&take_digits(&mut left), &take_digits(&mut right));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                let ord = l.to_lowercase().cmp(r.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(it: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(&c) = it.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        it.next();
    }
    digits
}

fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
