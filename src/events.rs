//! Messages exchanged with the selector task.

use std::path::PathBuf;

use serde::Serialize;
use tokio::sync::oneshot;

use crate::album::Album;
use crate::index::{AlbumFilter, SortOrder};
use crate::selector::{PageInfo, ScanSummary};

/// Requests from the presentation layer to the selector task.
#[derive(Debug)]
pub enum SelectorCommand {
    Scan(Vec<PathBuf>),
    Filter(AlbumFilter),
    Sort(SortOrder),
    LoadPage(usize),
    PageInfo(oneshot::Sender<PageInfo>),
}

/// Notifications from the selector task to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum SelectorEvent {
    Album(Album),
    PageInfo(PageInfo),
    /// A scan ran to completion.
    Loaded(ScanSummary),
    ScanFailed { message: String },
}
