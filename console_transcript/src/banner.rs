//! Console banner
//!
//! The entries shown before any command has run. A transcript records how
//! long its banner is, and `clear` cuts back to exactly that prefix.

use crate::entry::TranscriptEntry;
use alloc::string::String;
use alloc::vec::Vec;

/// Banner entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    entries: Vec<TranscriptEntry>,
}

impl Banner {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds a banner of output lines
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut banner = Self::new();
        for line in lines {
            banner.add_line(line);
        }
        banner
    }

    pub fn add_line(&mut self, markup: impl Into<String>) -> &mut Self {
        self.entries.push(TranscriptEntry::output(markup));
        self
    }

    pub fn add_spacer(&mut self) -> &mut Self {
        self.entries.push(TranscriptEntry::Spacer);
        self
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The portfolio site's welcome banner
    pub fn portfolio() -> Self {
        let mut banner = Self::new();
        banner
            .add_line(r#"<span class="terminal-success">Welcome to Avanindra's portfolio terminal</span>"#)
            .add_line(r#"Type <span class="terminal-info">help</span> to see available commands."#)
            .add_spacer();
        banner
    }
}

impl Default for Banner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_creation() {
        let mut banner = Banner::new();
        banner.add_line("Line 1").add_line("Line 2");

        assert_eq!(banner.len(), 2);
        assert_eq!(banner.entries()[0], TranscriptEntry::output("Line 1"));
    }

    #[test]
    fn test_from_lines() {
        let banner = Banner::from_lines(["a", "b", "c"]);
        assert_eq!(banner.len(), 3);
        assert!(banner
            .entries()
            .iter()
            .all(|e| matches!(e, TranscriptEntry::OutputLine { .. })));
    }

    #[test]
    fn test_portfolio_banner() {
        let banner = Banner::portfolio();
        assert_eq!(banner.len(), 3);
        assert_eq!(banner.entries()[2], TranscriptEntry::Spacer);
        match &banner.entries()[1] {
            TranscriptEntry::OutputLine { markup } => assert!(markup.contains("help")),
            other => panic!("unexpected banner entry: {:?}", other),
        }
    }
}
