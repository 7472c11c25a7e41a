//! Album selection engine: scan, filter, sort and page through albums while
//! announcing what becomes visible to a listener.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::album::{Album, AlbumBuilder};
use crate::config::Configuration;
use crate::error::Error;
use crate::fs::{Collaborators, DirLister};
use crate::index::{AlbumFilter, AlbumIndex, SortOrder};
use crate::scan::FolderWalker;
use crate::window::PaginationWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub count: usize,
}

/// What a finished scan did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub folders_visited: usize,
    pub albums: usize,
    /// Folders that failed to list or stat and were left out.
    pub skipped: usize,
}

/// Receives engine notifications.
pub trait AlbumListener {
    /// An album became visible in the current page window.
    fn on_album(&mut self, album: &Album);
    /// The page count may have changed.
    fn on_page_info(&mut self, info: PageInfo);
}

impl<A, P> AlbumListener for (A, P)
where
    A: FnMut(&Album),
    P: FnMut(PageInfo),
{
    fn on_album(&mut self, album: &Album) {
        (self.0)(album);
    }

    fn on_page_info(&mut self, info: PageInfo) {
        (self.1)(info);
    }
}

/// Owns one album index and one page window and drives `L` with notifications.
///
/// Every operation runs to completion before returning, so two scans can never
/// interleave their results.
pub struct AlbumSelectionEngine<L> {
    lister: Arc<dyn DirLister>,
    builder: AlbumBuilder,
    index: AlbumIndex,
    window: PaginationWindow,
    listener: L,
}

impl<L: AlbumListener> AlbumSelectionEngine<L> {
    pub fn new(
        page_size: NonZeroUsize,
        lister: Arc<dyn DirLister>,
        builder: AlbumBuilder,
        listener: L,
    ) -> Self {
        Self {
            lister,
            builder,
            index: AlbumIndex::new(),
            window: PaginationWindow::new(page_size),
            listener,
        }
    }

    /// Engine reading the local disk with the configured options.
    pub fn from_config(cfg: &Configuration, listener: L) -> Self {
        let io = Collaborators::local(cfg.album_properties_file.clone());
        Self::with_collaborators(cfg, io, listener)
    }

    pub fn with_collaborators(cfg: &Configuration, io: Collaborators, listener: L) -> Self {
        let builder = AlbumBuilder::new(
            io.stat,
            io.props,
            cfg.image_extensions.clone(),
            cfg.cover_fallback,
        );
        Self::new(cfg.page_size, io.lister, builder, listener)
    }

    /// Replace the index with the albums found under `roots`.
    ///
    /// Albums that land in the first page are announced as they are found;
    /// one page-info notification follows once the walk is exhausted.
    ///
    /// # Errors
    /// - [`Error::NothingToLoad`] if `roots` is empty.
    /// - [`Error::BadRoot`] if any root cannot be listed.
    ///
    /// In both cases the previous index is left as it was and nothing is
    /// announced. Failures below the roots only skip the affected folder.
    #[instrument(skip_all, fields(roots = roots.len()))]
    pub fn scan(&mut self, roots: &[PathBuf]) -> Result<ScanSummary, Error> {
        if roots.is_empty() {
            info!("no root folders selected; nothing to load");
            return Err(Error::NothingToLoad);
        }
        let lister = Arc::clone(&self.lister);
        let walker = FolderWalker::start(lister.as_ref(), roots)?;

        self.index.clear();
        self.window.set_page(0);

        let mut summary = ScanSummary::default();
        for folder in walker {
            let folder = match folder {
                Ok(folder) => folder,
                Err(err) => {
                    warn!(error = %err, "skipping folder");
                    summary.skipped += 1;
                    continue;
                }
            };
            summary.folders_visited += 1;
            match self.builder.build(&folder) {
                Ok(Some(album)) => {
                    debug!(folder = %album.folder.display(), count = album.count, "album found");
                    if self.window.contains(self.index.len()) {
                        self.listener.on_album(&album);
                    }
                    self.index.push(album);
                }
                Ok(None) => debug!(folder = %folder.path.display(), "no images; not an album"),
                Err(err) => {
                    warn!(error = %err, "skipping folder");
                    summary.skipped += 1;
                }
            }
        }
        summary.albums = self.index.len();
        info!(
            folders = summary.folders_visited,
            albums = summary.albums,
            skipped = summary.skipped,
            "scan complete"
        );
        self.notify_page_info();
        Ok(summary)
    }

    /// Apply `filter`, then announce the page count and the new first page.
    /// Unsupported filter types are ignored.
    pub fn filter(&mut self, filter: &AlbumFilter) {
        if !self.index.apply_filter(filter) {
            warn!(?filter, "unsupported filter type; ignoring");
            return;
        }
        debug!(?filter, matches = self.index.filtered().len(), "filter applied");
        self.reset_to_first_page();
    }

    /// Reorder the albums, then announce the page count and the new first page.
    pub fn sort(&mut self, order: SortOrder) {
        self.index.apply_sort(order);
        debug!(%order, "sort applied");
        self.reset_to_first_page();
    }

    /// Like [`Self::sort`], resolving `key` with [`SortOrder::from_key`].
    pub fn sort_by_key(&mut self, key: &str) {
        self.sort(SortOrder::from_key(key));
    }

    /// Move the window to `page` and announce every album it shows.
    pub fn load_page(&mut self, page: usize) {
        self.window.set_page(page);
        self.notify_window();
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            count: self.index.page_count(self.window.page_size()),
        }
    }

    pub fn index(&self) -> &AlbumIndex {
        &self.index
    }

    pub fn window(&self) -> &PaginationWindow {
        &self.window
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    fn reset_to_first_page(&mut self) {
        self.window.set_page(0);
        self.notify_page_info();
        self.notify_window();
    }

    fn notify_page_info(&mut self) {
        let info = self.page_info();
        self.listener.on_page_info(info);
    }

    fn notify_window(&mut self) {
        for album in self.window.albums_in_window(self.index.filtered()) {
            self.listener.on_album(album);
        }
    }
}
