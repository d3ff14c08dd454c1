//! Incremental transcript rendering
//!
//! The host prints each entry once. A transcript that got shorter (after
//! `clear`) or a format switch forces a full redraw.

use console_transcript::render::{render_entry, render_visible};
use console_transcript::{OutputFormat, ScrollSurface, Transcript, TranscriptEntry};

/// Lines to print after a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Nothing changed
    Unchanged,
    /// New entries, to print after what is already shown
    Append(Vec<String>),
    /// The whole transcript, replacing what is shown
    Redraw(Vec<String>),
}

impl Frame {
    pub fn lines(&self) -> &[String] {
        match self {
            Frame::Unchanged => &[],
            Frame::Append(lines) | Frame::Redraw(lines) => lines,
        }
    }
}

/// Tracks what has been printed
#[derive(Debug, Clone)]
pub struct TranscriptRenderer {
    format: OutputFormat,
    /// Entries already printed
    printed: usize,
    needs_redraw: bool,
}

impl TranscriptRenderer {
    /// Creates a renderer that has printed nothing
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            printed: 0,
            needs_redraw: false,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Switches format; a change forces a redraw
    pub fn set_format(&mut self, format: OutputFormat) -> bool {
        if self.format == format {
            return false;
        }
        self.format = format;
        self.needs_redraw = true;
        true
    }

    /// Forces the next update to redraw
    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Lines needed to bring the output up to date with `transcript`
    pub fn update(&mut self, transcript: &Transcript) -> Frame {
        let entries = transcript.entries();

        let frame = if self.needs_redraw || entries.len() < self.printed {
            Frame::Redraw(self.render_all(entries))
        } else if entries.len() > self.printed {
            Frame::Append(self.render_all(&entries[self.printed..]))
        } else {
            Frame::Unchanged
        };

        self.printed = entries.len();
        self.needs_redraw = false;
        frame
    }

    /// The rows currently inside the scroll viewport
    pub fn viewport(&self, transcript: &Transcript, surface: &ScrollSurface, buffer: &str) -> Vec<String> {
        render_visible(transcript, surface, buffer, self.format)
    }

    fn render_all(&self, entries: &[TranscriptEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|entry| render_entry(entry, self.format))
            .collect()
    }
}
