//! # Host Control Commands
//!
//! Lines that start with `:` talk to the host instead of the console.
//!
//! ## Command Set
//!
//! - `:quit` - Exit the host
//! - `:click <target>` - Click inside (or outside) the console
//! - `:blur` - Move focus away from the console input
//! - `:html` / `:plain` - Switch output format and redraw
//! - `:view` - Print the rows inside the scroll viewport
//! - `:redraw` - Print the whole transcript again
//! - `:commands` - List the console's commands
//! - `:help` - List host commands
//!
//! ## Philosophy
//!
//! - Host commands never reach the console's transcript
//! - The console vocabulary stays closed; these are host controls only

use crate::input_script::parse_click_target;
use console_transcript::OutputFormat;
use input_types::ClickTarget;
use thiserror::Error;

/// Host command error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostCommandError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

/// Host commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// Quit the host
    Quit,
    /// Deliver a click to the console
    Click(ClickTarget),
    /// Take focus from the console input
    Blur,
    /// Switch to HTML output
    Html,
    /// Switch to plain output
    Plain,
    /// Print the visible viewport
    View,
    /// Print the whole transcript
    Redraw,
    /// List console commands
    Commands,
    /// List host commands
    Help,
}

impl HostCommand {
    /// Output format this command switches to, if any
    pub fn format(&self) -> Option<OutputFormat> {
        match self {
            HostCommand::Html => Some(OutputFormat::Html),
            HostCommand::Plain => Some(OutputFormat::Plain),
            _ => None,
        }
    }
}

/// One line per host command, for `:help`
pub const HOST_HELP: &[&str] = &[
    ":quit             Exit",
    ":click <target>   Click background|line|output|input|outside|button <n>",
    ":blur             Move focus away from the input",
    ":html             Render as HTML",
    ":plain            Render as plain text",
    ":view             Show the scroll viewport",
    ":redraw           Print the transcript again",
    ":commands         List console commands",
    ":help             Show this list",
];

/// Host command parser
pub struct HostCommandParser;

impl HostCommandParser {
    /// Returns true if `line` is addressed to the host
    pub fn is_host_command(line: &str) -> bool {
        line.trim_start().starts_with(':')
    }

    /// Parses a command string, with or without the leading `:`
    pub fn parse(input: &str) -> Result<HostCommand, HostCommandError> {
        let input = input.trim();
        let input = input.strip_prefix(':').unwrap_or(input).trim();

        if input.is_empty() {
            return Err(HostCommandError::InvalidCommand(
                "Empty command".to_string(),
            ));
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();
        let args = &parts[1..];

        let command = match cmd.as_str() {
            "quit" | "q" | "exit" => HostCommand::Quit,
            "click" => return Self::parse_click(args),
            "blur" => HostCommand::Blur,
            "html" => HostCommand::Html,
            "plain" | "text" => HostCommand::Plain,
            "view" => HostCommand::View,
            "redraw" => HostCommand::Redraw,
            "commands" => HostCommand::Commands,
            "help" | "?" => HostCommand::Help,
            _ => return Err(HostCommandError::UnknownCommand(cmd)),
        };

        if !args.is_empty() {
            return Err(HostCommandError::InvalidCommand(format!(
                "{} takes no arguments",
                cmd
            )));
        }

        Ok(command)
    }

    /// Parses the "click" command
    fn parse_click(args: &[&str]) -> Result<HostCommand, HostCommandError> {
        if args.is_empty() {
            return Err(HostCommandError::MissingArgument(
                "click target".to_string(),
            ));
        }

        parse_click_target(&args.join(" "))
            .map(HostCommand::Click)
            .map_err(|e| HostCommandError::InvalidCommand(e.to_string()))
    }
}
