//! # CLI Console
//!
//! The portfolio site's embedded command console.
//!
//! ## Philosophy
//!
//! - **One owner**: [`ConsoleState`] lives inside [`InteractiveConsole`] and
//!   nothing else writes to it
//! - **Closed vocabulary**: commands come from a frozen registry
//! - **Inline errors**: an unknown command is transcript output, not a `Result`
//! - **Explicit time**: the deferred scroll runs when the host advances time
//!
//! This is NOT a shell. There is no argument parsing, no history recall and
//! no multi-line input.

pub mod dispatcher;
pub mod interactive;
pub mod state;

pub use dispatcher::{DispatchOutcome, Dispatcher, TranscriptMutation};
pub use interactive::{ConsoleResponse, ConsoleTask, InteractiveConsole, DEFAULT_SCROLL_DELAY};
pub use state::ConsoleState;

use services_focus_manager::FocusError;
use thiserror::Error;

/// Console error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("Focus error: {0}")]
    Focus(#[from] FocusError),
}
