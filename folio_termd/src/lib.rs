//! # Folio Terminal Host
//!
//! This crate mounts the portfolio console in a terminal.
//!
//! ## Philosophy
//!
//! - **Host owns I/O**: The console never prints
//! - **Output is transcript rendering**: Each entry printed once, redrawn on clear
//! - **Input is explicit events**: Stdin lines become key presses
//! - **Deterministic mode is first-class**: Scripts drive the same loop tests use
//!
//! ## Responsibilities
//!
//! The host runtime:
//! - Mounts the console with the portfolio vocabulary and focuses its input
//! - Runs the event loop (input → console → advance time → render)
//! - Reports navigation requests from action buttons
//! - Provides a few `:` control commands that never reach the transcript
//!
//! ## Non-Responsibilities
//!
//! The host does NOT:
//! - Follow navigation links
//! - Emulate a terminal (no ANSI/VT codes)
//! - Extend the console's command vocabulary

pub mod commands;
pub mod config;
pub mod input_script;
pub mod render;
pub mod runtime;

pub use commands::{HostCommand, HostCommandError, HostCommandParser};
pub use config::{CliOverrides, ConfigError, ConfigFile};
pub use input_script::{InputScript, InputScriptError, ScriptedInput};
pub use render::{Frame, TranscriptRenderer};
pub use runtime::{HostMode, HostRuntime, HostRuntimeConfig, HostRuntimeError};
