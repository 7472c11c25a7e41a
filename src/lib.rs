//! Album discovery and pagination for a photo-album slideshow viewer.
//!
//! Root folders are walked breadth-first; every folder holding images becomes
//! an [`album::Album`]. The [`selector::AlbumSelectionEngine`] keeps the
//! discovered albums in an index that can be filtered, sorted and paged, and
//! announces visible albums to a listener as they are found.

pub mod album;
pub mod config;
pub mod error;
pub mod events;
pub mod fs;
pub mod index;
pub mod scan;
pub mod selector;
pub mod window;
pub mod tasks {
    pub mod selector;
}

pub use error::Error;
