//! # Command Registry Service
//!
//! The closed command vocabulary of the portfolio console.
//!
//! ## Philosophy
//!
//! - **Closed**: the table is built once and frozen; there is no way to add a
//!   command after [`RegistryBuilder::build`]
//! - **Data, not handlers**: a command is what it prints, the button it
//!   offers, and whether it clears the transcript
//! - **Normalized names**: lookup ignores case and surrounding whitespace
//!
//! ## Example
//!
//! ```
//! use services_command_registry::{CommandName, CommandRegistry};
//!
//! let registry = CommandRegistry::portfolio();
//! let whoami = registry.resolve(&CommandName::new("  WhoAmI ")).unwrap();
//! assert_eq!(whoami.output_lines.len(), 1);
//! ```

pub mod catalog;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;

/// Registry construction errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Duplicate command: {0}")]
    DuplicateCommand(CommandName),

    #[error("Command name is empty")]
    EmptyName,

    #[error("Command {0} clears the transcript and cannot produce output")]
    ClearWithOutput(CommandName),
}

/// Normalized command name
///
/// Stored trimmed and lower-cased, so two names are equal exactly when the
/// typed text matches ignoring case and surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommandName(String);

impl CommandName {
    /// Normalizes raw input into a command name
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_lowercase())
    }

    /// Returns the normalized text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the name is empty after normalization
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CommandName {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// What a command does besides printing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandAction {
    /// Print output lines only
    None,
    /// Reset the transcript to its banner
    ClearTranscript,
}

/// A navigable button appended after a command's output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonSpec {
    /// Button label, markup allowed
    pub label: String,
    /// Same-site path the button navigates to
    pub target_link: String,
}

impl ButtonSpec {
    pub fn new(label: impl Into<String>, target_link: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target_link: target_link.into(),
        }
    }
}

/// Command definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDefinition {
    /// Command name
    pub name: CommandName,
    /// One-line description of the command
    pub summary: String,
    /// Markup lines printed in order
    pub output_lines: Vec<String>,
    /// Extra action
    pub action: CommandAction,
    /// Optional trailing button
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<ButtonSpec>,
}

impl CommandDefinition {
    /// Creates a command that prints `output_lines`
    pub fn output(
        name: impl AsRef<str>,
        summary: impl Into<String>,
        output_lines: &[&str],
    ) -> Self {
        Self {
            name: CommandName::new(name),
            summary: summary.into(),
            output_lines: output_lines.iter().map(|line| line.to_string()).collect(),
            action: CommandAction::None,
            button: None,
        }
    }

    /// Creates a command that clears the transcript
    pub fn clear(name: impl AsRef<str>, summary: impl Into<String>) -> Self {
        Self {
            name: CommandName::new(name),
            summary: summary.into(),
            output_lines: Vec::new(),
            action: CommandAction::ClearTranscript,
            button: None,
        }
    }

    /// Adds a trailing button
    pub fn with_button(mut self, label: impl Into<String>, target_link: impl Into<String>) -> Self {
        self.button = Some(ButtonSpec::new(label, target_link));
        self
    }

    /// Returns true if running this command clears the transcript
    pub fn clears_transcript(&self) -> bool {
        self.action == CommandAction::ClearTranscript
    }
}

/// Collects definitions before the registry is frozen
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    commands: Vec<CommandDefinition>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition
    pub fn command(mut self, definition: CommandDefinition) -> Self {
        self.commands.push(definition);
        self
    }

    /// Validates and freezes the table
    pub fn build(self) -> Result<CommandRegistry, RegistryError> {
        let mut seen = HashSet::with_capacity(self.commands.len());

        for definition in &self.commands {
            if definition.name.is_empty() {
                return Err(RegistryError::EmptyName);
            }
            if definition.clears_transcript() && !definition.output_lines.is_empty() {
                return Err(RegistryError::ClearWithOutput(definition.name.clone()));
            }
            if !seen.insert(&definition.name) {
                return Err(RegistryError::DuplicateCommand(definition.name.clone()));
            }
        }

        Ok(CommandRegistry::from_definitions(self.commands))
    }
}

/// Frozen command table
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    /// Definitions in declaration order
    commands: Vec<CommandDefinition>,
    /// Name -> position in `commands`
    index: HashMap<CommandName, usize>,
}

impl CommandRegistry {
    /// Indexes definitions without validating them.
    ///
    /// On a duplicate name the later definition wins.
    pub(crate) fn from_definitions(commands: Vec<CommandDefinition>) -> Self {
        let index = commands
            .iter()
            .enumerate()
            .map(|(pos, definition)| (definition.name.clone(), pos))
            .collect();
        Self { commands, index }
    }

    /// Starts a new table
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Looks up a command; `None` is the not-found branch
    pub fn resolve(&self, name: &CommandName) -> Option<&CommandDefinition> {
        self.index.get(name).map(|&pos| &self.commands[pos])
    }

    /// Returns true if `name` is part of the vocabulary
    pub fn contains(&self, name: &CommandName) -> bool {
        self.index.contains_key(name)
    }

    /// Command names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &CommandName> {
        self.commands.iter().map(|cmd| &cmd.name)
    }

    /// All definitions in declaration order
    pub fn definitions(&self) -> &[CommandDefinition] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
