//! # Focus Manager Service
//!
//! Decides what a click inside the console does to input focus.
//!
//! ## Philosophy
//!
//! - **Explicit focus**: focus moves only through [`FocusManager`] calls
//! - **Predicate-driven**: click routing is a pure function of the click target
//! - **Buttons navigate**: an action button never steals focus back to the input
//! - **Auditable**: all focus changes are logged for audit
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A page-wide focus tracker (clicks outside the console are ignored)
//! - A navigation engine (navigation is reported, the host performs it)

use input_types::{ClickTarget, PointerButton, PointerEvent};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Focus manager error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FocusError {
    #[error("Input is not focused")]
    NotFocused,

    #[error("No action button at index {index}")]
    UnknownButton { index: usize },
}

/// Focus event for audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusEvent {
    /// The input field gained focus
    Granted { timestamp_ns: u64 },
    /// The input field lost focus
    Released { timestamp_ns: u64 },
    /// An action button was activated
    NavigationRequested {
        target_link: String,
        timestamp_ns: u64,
    },
}

/// What a click resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The input field should hold focus
    FocusInput,
    /// Follow an action button's link
    Navigate { target_link: String },
    /// Nothing happens
    Ignored,
}

/// Returns true if a click on `target` moves focus to the input.
///
/// The console background, a transcript line, an output span and the input
/// itself all do. Action buttons and anything outside the console do not.
pub fn should_focus_input(target: &ClickTarget) -> bool {
    matches!(
        target,
        ClickTarget::Background
            | ClickTarget::TranscriptLine
            | ClickTarget::OutputText
            | ClickTarget::InputField
    )
}

/// Focus manager
///
/// Tracks whether the console input holds focus and resolves clicks.
pub struct FocusManager {
    input_focused: bool,
    /// Audit trail of focus events
    audit_trail: Vec<FocusEvent>,
    /// Next timestamp (for simulation)
    next_timestamp: u64,
}

impl FocusManager {
    /// Creates a focus manager with the input unfocused
    pub fn new() -> Self {
        Self {
            input_focused: false,
            audit_trail: Vec::new(),
            next_timestamp: 0,
        }
    }

    /// Resolves a click.
    ///
    /// `button_link` maps an action button index to its target link.
    pub fn handle_click<F>(
        &mut self,
        click: &PointerEvent,
        button_link: F,
    ) -> Result<ClickOutcome, FocusError>
    where
        F: FnOnce(usize) -> Option<String>,
    {
        if click.button != PointerButton::Primary {
            return Ok(ClickOutcome::Ignored);
        }

        if should_focus_input(&click.target) {
            self.focus_input();
            return Ok(ClickOutcome::FocusInput);
        }

        match click.target {
            ClickTarget::ActionButton { index } => {
                let target_link = button_link(index).ok_or(FocusError::UnknownButton { index })?;
                let timestamp = self.next_timestamp();
                debug!(index, target_link = %target_link, "navigation requested");
                self.audit_trail.push(FocusEvent::NavigationRequested {
                    target_link: target_link.clone(),
                    timestamp_ns: timestamp,
                });
                Ok(ClickOutcome::Navigate { target_link })
            }
            _ => {
                debug!(target = %click.target, "click ignored");
                Ok(ClickOutcome::Ignored)
            }
        }
    }

    /// Gives the input focus.
    ///
    /// Returns false if it already had it.
    pub fn focus_input(&mut self) -> bool {
        if self.input_focused {
            return false;
        }

        let timestamp = self.next_timestamp();
        self.input_focused = true;
        self.audit_trail.push(FocusEvent::Granted {
            timestamp_ns: timestamp,
        });
        debug!("input focused");
        true
    }

    /// Takes focus away from the input
    pub fn blur(&mut self) -> Result<(), FocusError> {
        if !self.input_focused {
            return Err(FocusError::NotFocused);
        }

        let timestamp = self.next_timestamp();
        self.input_focused = false;
        self.audit_trail.push(FocusEvent::Released {
            timestamp_ns: timestamp,
        });
        debug!("input blurred");
        Ok(())
    }

    pub fn has_input_focus(&self) -> bool {
        self.input_focused
    }

    /// Returns the audit trail
    pub fn audit_trail(&self) -> &[FocusEvent] {
        &self.audit_trail
    }

    /// Gets next timestamp and increments counter
    fn next_timestamp(&mut self) -> u64 {
        let ts = self.next_timestamp;
        self.next_timestamp += 1;
        ts
    }
}

impl Default for FocusManager {
    fn default() -> Self {
        Self::new()
    }
}
