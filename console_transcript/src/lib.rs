//! # Console Transcript
//!
//! The ordered record of everything the console has printed, and the pieces
//! a renderer needs to show it.
//!
//! ## Design
//!
//! - The transcript starts with a [`Banner`], an explicit named prefix that
//!   survives `clear`
//! - Everything after the banner is append-only; the only removal is
//!   [`Transcript::truncate_to_banner`]
//! - The input line is not an entry. Renderers draw it after the last entry
//! - Markup in output lines is opaque: stored verbatim, projected by [`render`]

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod banner;
pub mod entry;
pub mod markup;
pub mod render;
pub mod surface;

pub use banner::Banner;
pub use entry::{EntryKind, TranscriptEntry};
pub use render::OutputFormat;
pub use surface::ScrollSurface;

use alloc::vec::Vec;

/// Transcript store
#[derive(Debug, Clone)]
pub struct Transcript {
    /// Banner entries followed by dispatch output
    entries: Vec<TranscriptEntry>,
    /// Number of leading entries that belong to the banner
    banner_len: usize,
    /// Bumped on every mutation
    revision: u64,
}

impl Transcript {
    /// Creates a transcript holding only `banner`
    pub fn with_banner(banner: &Banner) -> Self {
        let entries = banner.entries().to_vec();
        Self {
            banner_len: entries.len(),
            entries,
            revision: 0,
        }
    }

    /// Creates a transcript with no banner
    pub fn new() -> Self {
        Self::with_banner(&Banner::new())
    }

    /// All entries, banner first
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// The preserved banner prefix
    pub fn banner(&self) -> &[TranscriptEntry] {
        &self.entries[..self.banner_len]
    }

    /// Entries produced by dispatches since the last clear
    pub fn body(&self) -> &[TranscriptEntry] {
        &self.entries[self.banner_len..]
    }

    pub fn banner_len(&self) -> usize {
        self.banner_len
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Monotonic mutation counter
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Appends one entry
    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
        self.revision += 1;
    }

    /// Appends entries in order
    pub fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = TranscriptEntry>,
    {
        let before = self.entries.len();
        self.entries.extend(entries);
        if self.entries.len() != before {
            self.revision += 1;
        }
    }

    /// Drops everything after the banner and returns how many entries went.
    ///
    /// Idempotent: a second call removes nothing and leaves the revision alone.
    pub fn truncate_to_banner(&mut self) -> usize {
        let removed = self.entries.len() - self.banner_len;
        if removed > 0 {
            self.entries.truncate(self.banner_len);
            self.revision += 1;
        }
        removed
    }

    /// Action buttons from top to bottom
    pub fn buttons(&self) -> impl Iterator<Item = &TranscriptEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.kind() == EntryKind::ActionButton)
    }

    /// The `index`-th action button, counting from the top
    pub fn button(&self, index: usize) -> Option<&TranscriptEntry> {
        self.buttons().nth(index)
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
