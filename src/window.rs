//! Page window over the filtered album view.

use std::num::NonZeroUsize;

/// The half-open range `[start, end)` of the filtered view that is visible.
///
/// `start` is always a multiple of the page size; the range may run past the
/// end of the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationWindow {
    page_size: NonZeroUsize,
    start: usize,
}

impl PaginationWindow {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            page_size,
            start: 0,
        }
    }

    /// Move to page `page`. Pages past the data are allowed and simply empty.
    pub fn set_page(&mut self, page: usize) {
        self.start = page.saturating_mul(self.page_size.get());
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn page(&self) -> usize {
        self.start / self.page_size.get()
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.start.saturating_add(self.page_size.get())
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end()).contains(&index)
    }

    /// The items whose indices fall inside the window, clipped to `items`.
    pub fn albums_in_window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.start.min(items.len());
        let end = self.end().min(items.len());
        &items[start..end]
    }
}
