//! # Scroll Surface
//!
//! The scroll container the transcript is drawn into.
//!
//! ## Design
//!
//! - One row per transcript entry, then one row for the input line anchor
//! - `scroll_top` counts rows hidden above the viewport
//! - New content does not move the viewport; the console schedules
//!   [`ScrollSurface::scroll_to_bottom`] after each dispatch

use crate::Transcript;
use core::ops::Range;

/// Scrollable projection of a transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollSurface {
    /// Height of the visible viewport in rows
    viewport_rows: usize,
    /// Entries plus the input line
    content_rows: usize,
    /// Rows scrolled out above the viewport
    scroll_top: usize,
}

impl ScrollSurface {
    /// Creates a surface for an empty transcript
    pub fn new(viewport_rows: usize) -> Self {
        Self {
            viewport_rows: viewport_rows.max(1),
            content_rows: 1,
            scroll_top: 0,
        }
    }

    /// Re-measures content after the transcript changed
    pub fn sync(&mut self, transcript: &Transcript) {
        self.content_rows = transcript.len() + 1;
        self.scroll_top = self.scroll_top.min(self.max_scroll_top());
    }

    pub fn viewport_rows(&self) -> usize {
        self.viewport_rows
    }

    pub fn content_rows(&self) -> usize {
        self.content_rows
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Largest valid `scroll_top`
    pub fn max_scroll_top(&self) -> usize {
        self.content_rows.saturating_sub(self.viewport_rows)
    }

    /// Scrolls so the input line is visible.
    ///
    /// Returns true if the offset changed.
    pub fn scroll_to_bottom(&mut self) -> bool {
        let max = self.max_scroll_top();
        let moved = self.scroll_top != max;
        self.scroll_top = max;
        moved
    }

    /// Scrolls towards older content
    pub fn scroll_up(&mut self, rows: usize) -> bool {
        let before = self.scroll_top;
        self.scroll_top = self.scroll_top.saturating_sub(rows);
        before != self.scroll_top
    }

    /// Scrolls towards newer content
    pub fn scroll_down(&mut self, rows: usize) -> bool {
        let before = self.scroll_top;
        self.scroll_top = (self.scroll_top + rows).min(self.max_scroll_top());
        before != self.scroll_top
    }

    pub fn at_bottom(&self) -> bool {
        self.scroll_top >= self.max_scroll_top()
    }

    /// Row indices currently visible. Row `transcript.len()` is the input line.
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.scroll_top + self.viewport_rows).min(self.content_rows);
        self.scroll_top..end
    }
}
