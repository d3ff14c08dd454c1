//! Transcript entries

use alloc::string::String;
use serde::{Deserialize, Serialize};

/// One rendered unit of the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranscriptEntry {
    /// The command as submitted, drawn after a prompt
    EchoedCommand { text: String },
    /// A markup line from a command definition or an error message
    OutputLine { markup: String },
    /// A button that navigates to a site path
    ActionButton { label: String, target_link: String },
    /// Blank separator closing a dispatch cycle
    Spacer,
}

/// Entry discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    EchoedCommand,
    OutputLine,
    ActionButton,
    Spacer,
}

impl TranscriptEntry {
    pub fn echo(text: impl Into<String>) -> Self {
        Self::EchoedCommand { text: text.into() }
    }

    pub fn output(markup: impl Into<String>) -> Self {
        Self::OutputLine {
            markup: markup.into(),
        }
    }

    pub fn button(label: impl Into<String>, target_link: impl Into<String>) -> Self {
        Self::ActionButton {
            label: label.into(),
            target_link: target_link.into(),
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Self::EchoedCommand { .. } => EntryKind::EchoedCommand,
            Self::OutputLine { .. } => EntryKind::OutputLine,
            Self::ActionButton { .. } => EntryKind::ActionButton,
            Self::Spacer => EntryKind::Spacer,
        }
    }

    /// Navigation target, for action buttons
    pub fn target_link(&self) -> Option<&str> {
        match self {
            Self::ActionButton { target_link, .. } => Some(target_link.as_str()),
            _ => None,
        }
    }
}
