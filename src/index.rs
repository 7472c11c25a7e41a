//! The in-memory album index with its sort orders and filters.

use std::cmp::Ordering;
use std::fmt;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::album::Album;

/// Named album orderings. Every `*Desc` is its `*Asc` with the operands swapped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    PathAsc,
    PathDesc,
    NameAsc,
    NameDesc,
    DateAsc,
    DateDesc,
    SizeAsc,
    SizeDesc,
}

impl SortOrder {
    pub const ALL: &'static [Self] = &[
        Self::PathAsc,
        Self::PathDesc,
        Self::NameAsc,
        Self::NameDesc,
        Self::DateAsc,
        Self::DateDesc,
        Self::SizeAsc,
        Self::SizeDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PathAsc => "path-asc",
            Self::PathDesc => "path-desc",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::DateAsc => "date-asc",
            Self::DateDesc => "date-desc",
            Self::SizeAsc => "size-asc",
            Self::SizeDesc => "size-desc",
        }
    }

    /// Resolve a sort key; unknown keys fall back to [`SortOrder::PathAsc`].
    ///
    /// `_` is accepted in place of `-`.
    pub fn from_key(raw: &str) -> Self {
        let key = raw.trim().replace('_', "-");
        match Self::ALL.iter().find(|order| order.as_str() == key) {
            Some(order) => *order,
            None => {
                warn!(key = raw, "unknown sort key; using default order");
                Self::default()
            }
        }
    }

    pub fn compare(self, a: &Album, b: &Album) -> Ordering {
        match self {
            Self::PathAsc => by_folder(a, b),
            Self::PathDesc => by_folder(b, a),
            Self::NameAsc => by_name(a, b),
            Self::NameDesc => by_name(b, a),
            Self::DateAsc => by_created(a, b),
            Self::DateDesc => by_created(b, a),
            Self::SizeAsc => by_count(a, b),
            Self::SizeDesc => by_count(b, a),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn by_folder(a: &Album, b: &Album) -> Ordering {
    a.folder.as_os_str().cmp(b.folder.as_os_str())
}

fn by_name(a: &Album, b: &Album) -> Ordering {
    a.name.cmp(&b.name)
}

fn by_created(a: &Album, b: &Album) -> Ordering {
    a.created.cmp(&b.created)
}

fn by_count(a: &Album, b: &Album) -> Ordering {
    a.count.cmp(&b.count)
}

/// Filter criteria, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AlbumFilter {
    /// Case-sensitive substring match on the album name; empty matches all.
    Name { value: String },
    /// Any filter type this engine does not know.
    #[serde(other)]
    Unsupported,
}

impl AlbumFilter {
    pub fn name(value: impl Into<String>) -> Self {
        Self::Name {
            value: value.into(),
        }
    }
}

/// Every album of the last scan plus the subset passing the active filter.
///
/// `filtered` is always a subsequence of `all` in `all`'s order.
#[derive(Debug, Clone, Default)]
pub struct AlbumIndex {
    all: Vec<Album>,
    filtered: Vec<Album>,
}

impl AlbumIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents and drop any active filter.
    ///
    /// Bulk-load entry point for callers building an index outside the engine;
    /// `scan` fills the index incrementally instead.
    pub fn replace_all(&mut self, albums: Vec<Album>) {
        self.filtered = albums.clone();
        self.all = albums;
    }

    pub fn clear(&mut self) {
        self.all.clear();
        self.filtered.clear();
    }

    /// Append a freshly discovered album to both views.
    ///
    /// Only valid while no filter is active, i.e. during a scan.
    pub(crate) fn push(&mut self, album: Album) {
        self.filtered.push(album.clone());
        self.all.push(album);
    }

    /// Recompute the filtered view. Returns `false` for unsupported filters,
    /// which leave the index untouched.
    pub fn apply_filter(&mut self, filter: &AlbumFilter) -> bool {
        match filter {
            AlbumFilter::Name { value } if value.is_empty() => {
                self.filtered = self.all.clone();
            }
            AlbumFilter::Name { value } => {
                self.filtered = self
                    .all
                    .iter()
                    .filter(|album| album.name.contains(value.as_str()))
                    .cloned()
                    .collect();
            }
            AlbumFilter::Unsupported => return false,
        }
        true
    }

    /// Stable sort of both views with the same comparator.
    pub fn apply_sort(&mut self, order: SortOrder) {
        self.all.sort_by(|a, b| order.compare(a, b));
        self.filtered.sort_by(|a, b| order.compare(a, b));
    }

    pub fn page_count(&self, page_size: NonZeroUsize) -> usize {
        self.filtered.len().div_ceil(page_size.get())
    }

    pub fn all(&self) -> &[Album] {
        &self.all
    }

    pub fn filtered(&self) -> &[Album] {
        &self.filtered
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
