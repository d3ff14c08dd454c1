//! Console state
//!
//! The transcript and the input buffer live together in one owned value.
//! Only the console widget and the dispatcher touch it.

use console_transcript::{Banner, Transcript};

/// State owned by a mounted console
#[derive(Debug, Clone)]
pub struct ConsoleState {
    transcript: Transcript,
    input: String,
}

impl ConsoleState {
    /// Creates the state at mount: banner only, empty buffer
    pub fn new(banner: &Banner) -> Self {
        Self {
            transcript: Transcript::with_banner(banner),
            input: String::new(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub(crate) fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    /// Current input buffer
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Inserts text at the end of the buffer
    pub fn insert(&mut self, text: &str) {
        self.input.push_str(text);
    }

    /// Removes the last character. Returns false on an empty buffer.
    pub fn backspace(&mut self) -> bool {
        self.input.pop().is_some()
    }

    /// Takes the buffer, leaving it empty
    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self::new(&Banner::portfolio())
    }
}
