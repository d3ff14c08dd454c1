//! Command dispatch
//!
//! One submitted line becomes one dispatch cycle: echo, output, optional
//! button, spacer. `clear` cuts the transcript back to the banner instead.

use console_transcript::{markup, Transcript, TranscriptEntry};
use serde::{Deserialize, Serialize};
use services_command_registry::{CommandName, CommandRegistry};
use tracing::debug;

/// How a non-empty submission resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchOutcome {
    /// A registered command ran
    Resolved { name: CommandName },
    /// Nothing matched; error lines were appended
    Unresolved { key: String },
}

/// What a dispatch did to the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranscriptMutation {
    /// Blank submission
    Unchanged,
    /// Entries were appended
    Appended {
        outcome: DispatchOutcome,
        added: usize,
    },
    /// The transcript was cut back to the banner
    Cleared { removed: usize },
}

impl TranscriptMutation {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, TranscriptMutation::Unchanged)
    }
}

/// Builds the two lines shown for an unrecognized command
pub fn not_found_lines(key: &str) -> [String; 2] {
    [
        format!(
            r#"<span class="terminal-error">Command not found: {}</span>"#,
            markup::escape(key)
        ),
        r#"Type <span class="terminal-info">help</span> to see available commands."#.to_string(),
    ]
}

/// Resolves submissions against a closed registry
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: CommandRegistry,
}

impl Dispatcher {
    pub fn new(registry: CommandRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Runs one dispatch cycle against `transcript`
    pub fn dispatch(&self, transcript: &mut Transcript, raw_input: &str) -> TranscriptMutation {
        let name = CommandName::new(raw_input);
        if name.is_empty() {
            return TranscriptMutation::Unchanged;
        }

        let before = transcript.len();
        transcript.push(TranscriptEntry::echo(raw_input));

        let definition = self.registry.resolve(&name);

        if definition.is_some_and(|def| def.clears_transcript()) {
            let removed = transcript.truncate_to_banner();
            debug!(command = %name, removed, "transcript cleared");
            return TranscriptMutation::Cleared { removed };
        }

        let outcome = match definition {
            Some(def) => {
                transcript.extend(def.output_lines.iter().map(TranscriptEntry::output));
                if let Some(button) = &def.button {
                    transcript.push(TranscriptEntry::button(
                        button.label.as_str(),
                        button.target_link.as_str(),
                    ));
                }
                DispatchOutcome::Resolved { name }
            }
            None => {
                transcript.extend(not_found_lines(name.as_str()).map(TranscriptEntry::output));
                DispatchOutcome::Unresolved {
                    key: name.as_str().to_string(),
                }
            }
        };

        transcript.push(TranscriptEntry::Spacer);

        let added = transcript.len() - before;
        debug!(outcome = ?outcome, added, "dispatch complete");
        TranscriptMutation::Appended { outcome, added }
    }
}
