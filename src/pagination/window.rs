//! Page window arithmetic
//!
//! A [`PageWindow`] is the `offset/limit/total` triple behind a visible page.
//! `offset` only ever moves by whole pages, so it stays a multiple of `limit`.

use serde::Serialize;
use std::ops::Range;

/// Offset, limit and total describing the visible page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    offset: usize,
    limit: usize,
    total: usize,
}

impl PageWindow {
    /// Create a window on the first page; a zero limit is bumped to one
    pub fn new(limit: usize) -> Self {
        Self {
            offset: 0,
            limit: limit.max(1),
            total: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Record a new total
    ///
    /// If the current page no longer exists the window moves back to the last
    /// non-empty page (or the first page when the total is zero).
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        if total == 0 {
            self.offset = 0;
        } else if self.offset >= total {
            self.offset = ((total - 1) / self.limit) * self.limit;
        }
    }

    pub fn has_next(&self) -> bool {
        self.offset + self.limit < self.total
    }

    pub fn has_prev(&self) -> bool {
        self.offset > 0
    }

    /// Move one page forward; returns false (and changes nothing) on the last page
    pub fn advance(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.offset += self.limit;
        true
    }

    /// Move one page back; returns false (and changes nothing) on the first page
    pub fn retreat(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.offset = self.offset.saturating_sub(self.limit);
        true
    }

    /// Jump to a 1-based page number, clamped to the pages that exist
    pub fn go_to_page(&mut self, page: usize) {
        let last = self.page_count().max(1);
        self.offset = (page.clamp(1, last) - 1) * self.limit;
    }

    /// Back to the first page with an unknown total
    pub fn reset(&mut self) {
        self.offset = 0;
        self.total = 0;
    }

    /// Index range of the visible page: `[offset, min(offset + limit, total))`
    pub fn range(&self) -> Range<usize> {
        let start = self.offset.min(self.total);
        let end = (self.offset + self.limit).min(self.total);
        start..end
    }

    /// Number of items on the visible page
    pub fn visible_len(&self) -> usize {
        self.range().len()
    }

    /// The visible page of a fully-loaded collection
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        &items[start..end]
    }

    /// 1-based number of the visible page
    pub fn page_number(&self) -> usize {
        self.offset / self.limit + 1
    }

    /// Number of pages for the current total
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.limit)
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(20)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(offset: usize, limit: usize, total: usize) -> PageWindow {
        let mut w = PageWindow::new(limit);
        w.set_total(total);
        w.offset = offset;
        w
    }

    #[test]
    fn test_advance_and_retreat() {
        let mut w = window(0, 20, 30);
        assert!(w.advance());
        assert_eq!(w.offset(), 20);
        assert_eq!(w.visible_len(), 10);

        assert!(!w.advance());
        assert_eq!(w.offset(), 20);

        assert!(w.retreat());
        assert_eq!(w.offset(), 0);
        assert_eq!(w.visible_len(), 20);

        assert!(!w.retreat());
        assert_eq!(w.offset(), 0);
    }

    #[test]
    fn test_unknown_total_blocks_advance() {
        let mut w = PageWindow::new(20);
        assert!(!w.advance());
        assert_eq!(w.range(), 0..0);
    }

    #[test]
    fn test_set_total_clamps_offset() {
        let mut w = window(20, 20, 21);
        w.set_total(20);
        assert_eq!(w.offset(), 0);

        let mut w = window(40, 20, 60);
        w.set_total(45);
        assert_eq!(w.offset(), 40);

        w.set_total(0);
        assert_eq!(w.offset(), 0);
    }

    #[test]
    fn test_slice() {
        let items: Vec<u32> = (1..=30).collect();
        let w = window(20, 20, 30);
        assert_eq!(w.slice(&items), &items[20..30]);

        // total larger than what is actually loaded
        let w = window(20, 20, 100);
        assert_eq!(w.slice(&items), &items[20..30]);
    }

    #[test]
    fn test_page_numbers() {
        let mut w = window(0, 20, 45);
        assert_eq!(w.page_count(), 3);
        assert_eq!(w.page_number(), 1);

        w.go_to_page(3);
        assert_eq!(w.offset(), 40);
        assert_eq!(w.page_number(), 3);

        w.go_to_page(10);
        assert_eq!(w.offset(), 40);

        w.go_to_page(0);
        assert_eq!(w.offset(), 0);
    }

    #[test]
    fn test_zero_limit_is_bumped() {
        assert_eq!(PageWindow::new(0).limit(), 1);
    }

    #[test]
    fn test_reset() {
        let mut w = window(40, 20, 60);
        w.reset();
        assert_eq!(w.offset(), 0);
        assert_eq!(w.total(), 0);
    }
}
