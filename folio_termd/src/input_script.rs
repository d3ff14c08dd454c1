//! # Input Script Parser
//!
//! A line-based script format for deterministic console sessions.
//!
//! ## Format
//!
//! Each line is one input action:
//! - Key names: `Enter`, `Escape`, `Backspace`, `Tab`, `Space`
//! - Arrow keys: `Up`, `Down`, `Left`, `Right`
//! - Single characters: `a`, `A`, `7`, `/`
//! - Modifiers: `Ctrl+c`, `Alt+x`, `Shift+a`
//! - Text strings: `"about"` (typed one character at a time)
//! - Delays: `wait 10ms`, `wait 1s`
//! - Clicks: `click background`, `click line`, `click output`,
//!   `click input`, `click outside`, `click button 0`
//! - Host commands: `:html`, `:plain`, `:view`, `:quit`, ...
//! - Comments: `# This is a comment`
//!
//! ## Example
//!
//! ```text
//! click background     # focus the input
//! "about"
//! Enter
//! wait 10ms            # let the scroll settle
//! click button 0
//! ```

use crate::commands::{HostCommand, HostCommandParser};
use input_types::{ClickTarget, InputEvent, KeyCode, KeyEvent, Modifiers};
use std::collections::VecDeque;
use std::time::Duration;
use thiserror::Error;

/// Input script error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputScriptError {
    #[error("Invalid key name: {0}")]
    InvalidKeyName(String),

    #[error("Invalid modifier: {0}")]
    InvalidModifier(String),

    #[error("Invalid click target: {0}")]
    InvalidClickTarget(String),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Empty script")]
    EmptyScript,

    #[error("Invalid delay format: {0}")]
    InvalidDelay(String),
}

/// A single scripted input action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedInput {
    /// A single key press
    Key(KeyEvent),
    /// Advance console time
    Wait(Duration),
    /// A primary click
    Click(ClickTarget),
    /// A host command
    Host(HostCommand),
}

/// Input script
///
/// Parses and provides scripted input events for deterministic sessions.
#[derive(Debug, Clone)]
pub struct InputScript {
    inputs: VecDeque<ScriptedInput>,
}

impl InputScript {
    /// Creates a new empty input script
    pub fn new() -> Self {
        Self {
            inputs: VecDeque::new(),
        }
    }

    /// Parses a script from text
    pub fn from_text(text: &str) -> Result<Self, InputScriptError> {
        let mut inputs = VecDeque::new();

        for (line_num, line) in text.lines().enumerate() {
            let line = strip_comment(line).trim();

            if line.is_empty() {
                continue;
            }

            inputs.extend(Self::parse_line(line, line_num + 1)?);
        }

        if inputs.is_empty() {
            return Err(InputScriptError::EmptyScript);
        }

        Ok(Self { inputs })
    }

    /// Parses a single line of script
    fn parse_line(line: &str, line_num: usize) -> Result<Vec<ScriptedInput>, InputScriptError> {
        let at_line = |message: String| InputScriptError::ParseError {
            line: line_num,
            message,
        };

        if let Some(duration_str) = line.strip_prefix("wait ") {
            let duration = parse_duration(duration_str).map_err(|e| at_line(e.to_string()))?;
            return Ok(vec![ScriptedInput::Wait(duration)]);
        }

        if let Some(target) = line.strip_prefix("click ") {
            let target = parse_click_target(target).map_err(|e| at_line(e.to_string()))?;
            return Ok(vec![ScriptedInput::Click(target)]);
        }

        if line.starts_with(':') {
            let command = HostCommandParser::parse(line).map_err(|e| at_line(e.to_string()))?;
            return Ok(vec![ScriptedInput::Host(command)]);
        }

        if line.len() >= 2 && line.starts_with('"') && line.ends_with('"') {
            let text = &line[1..line.len() - 1];
            return Ok(text
                .chars()
                .map(|c| ScriptedInput::Key(KeyEvent::typed(c)))
                .collect());
        }

        let (modifiers, key_name) = parse_modifiers(line)?;
        let event = parse_key(key_name, modifiers).map_err(|e| at_line(e.to_string()))?;

        Ok(vec![ScriptedInput::Key(event)])
    }

    /// Returns the next input event, if any
    pub fn next_input(&mut self) -> Option<ScriptedInput> {
        self.inputs.pop_front()
    }

    /// Returns true if the script has more inputs
    pub fn has_more(&self) -> bool {
        !self.inputs.is_empty()
    }

    /// Returns the number of remaining inputs
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }

    /// Converts a scripted input to an InputEvent
    pub fn to_input_event(input: &ScriptedInput) -> Option<InputEvent> {
        match input {
            ScriptedInput::Key(event) => Some(InputEvent::key(event.clone())),
            ScriptedInput::Click(target) => Some(InputEvent::click(target.clone())),
            // Handled by host
            ScriptedInput::Wait(_) | ScriptedInput::Host(_) => None,
        }
    }
}

impl Default for InputScript {
    fn default() -> Self {
        Self::new()
    }
}

/// Drops a trailing `# comment`, leaving quoted text alone
fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (i, ch) in line.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parses modifiers from a key string (e.g., "Ctrl+c" → (Modifiers::CTRL, "c"))
fn parse_modifiers(input: &str) -> Result<(Modifiers, &str), InputScriptError> {
    let mut modifiers = Modifiers::none();

    // A lone "+" is a key, not a separator
    let Some((prefix, key)) = input.rsplit_once('+').filter(|(prefix, _)| !prefix.is_empty())
    else {
        return Ok((modifiers, input));
    };

    for modifier_str in prefix.split('+') {
        modifiers = match modifier_str.trim().to_lowercase().as_str() {
            "ctrl" | "control" => modifiers.with(Modifiers::CTRL),
            "alt" => modifiers.with(Modifiers::ALT),
            "shift" => modifiers.with(Modifiers::SHIFT),
            "super" | "meta" => modifiers.with(Modifiers::META),
            other => return Err(InputScriptError::InvalidModifier(other.to_string())),
        };
    }

    let key = key.trim();
    if key.is_empty() {
        return Err(InputScriptError::InvalidKeyName(input.to_string()));
    }
    Ok((modifiers, key))
}

/// Parses a key name into a pressed key event
fn parse_key(name: &str, modifiers: Modifiers) -> Result<KeyEvent, InputScriptError> {
    let code = match name.to_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "escape" | "esc" => KeyCode::Escape,
        "backspace" | "back" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Space,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,

        "up" | "arrowup" => KeyCode::Up,
        "down" | "arrowdown" => KeyCode::Down,
        "left" | "arrowleft" => KeyCode::Left,
        "right" | "arrowright" => KeyCode::Right,

        "f1" => KeyCode::F1,
        "f2" => KeyCode::F2,
        "f3" => KeyCode::F3,
        "f4" => KeyCode::F4,
        "f5" => KeyCode::F5,
        "f6" => KeyCode::F6,
        "f7" => KeyCode::F7,
        "f8" => KeyCode::F8,
        "f9" => KeyCode::F9,
        "f10" => KeyCode::F10,
        "f11" => KeyCode::F11,
        "f12" => KeyCode::F12,

        _ => {
            let mut chars = name.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) if modifiers.is_empty() => Ok(KeyEvent::typed(c)),
                (Some(c), None) => Ok(KeyEvent::pressed(KeyCode::from_char(c), modifiers)),
                _ => Err(InputScriptError::InvalidKeyName(name.to_string())),
            };
        }
    };

    Ok(KeyEvent::pressed(code, modifiers))
}

/// Parses a click target name
///
/// Accepts `background`, `line`, `output`, `input`, `outside` and
/// `button <index>`.
pub fn parse_click_target(s: &str) -> Result<ClickTarget, InputScriptError> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    let invalid = || InputScriptError::InvalidClickTarget(s.trim().to_string());

    let target = match parts.as_slice() {
        [name] => match name.to_lowercase().as_str() {
            "background" | "bg" => ClickTarget::Background,
            "line" => ClickTarget::TranscriptLine,
            "output" => ClickTarget::OutputText,
            "input" => ClickTarget::InputField,
            "outside" => ClickTarget::Outside,
            _ => return Err(invalid()),
        },
        [name, index] if name.eq_ignore_ascii_case("button") => ClickTarget::ActionButton {
            index: index.parse().map_err(|_| invalid())?,
        },
        _ => return Err(invalid()),
    };

    Ok(target)
}

/// Parses a duration string (e.g., "100ms", "1s")
pub fn parse_duration(s: &str) -> Result<Duration, InputScriptError> {
    let s = s.trim().to_lowercase();
    let invalid = || InputScriptError::InvalidDelay(s.to_string());

    if let Some(ms_str) = s.strip_suffix("ms") {
        ms_str
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| invalid())
    } else if let Some(s_str) = s.strip_suffix('s') {
        s_str
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| invalid())
    } else {
        Err(invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> ScriptedInput {
        ScriptedInput::Key(KeyEvent::pressed(code, Modifiers::none()))
    }

    #[test]
    fn test_parse_single_key() {
        let mut script = InputScript::from_text("a").unwrap();
        assert_eq!(script.remaining(), 1);
        assert_eq!(
            script.next_input().unwrap(),
            ScriptedInput::Key(KeyEvent::typed('a'))
        );
    }

    #[test]
    fn test_parse_special_keys() {
        let mut script = InputScript::from_text("Enter\nEscape\nBackspace").unwrap();
        assert_eq!(script.remaining(), 3);
        assert_eq!(script.next_input().unwrap(), key(KeyCode::Enter));
        assert_eq!(script.next_input().unwrap(), key(KeyCode::Escape));
        assert_eq!(script.next_input().unwrap(), key(KeyCode::Backspace));
    }

    #[test]
    fn test_parse_modifiers() {
        let mut script = InputScript::from_text("Ctrl+c\nAlt+x\nShift+a").unwrap();
        assert_eq!(
            script.next_input().unwrap(),
            ScriptedInput::Key(KeyEvent::pressed(KeyCode::C, Modifiers::CTRL))
        );
        assert_eq!(
            script.next_input().unwrap(),
            ScriptedInput::Key(KeyEvent::pressed(KeyCode::X, Modifiers::ALT))
        );
        let ScriptedInput::Key(shifted) = script.next_input().unwrap() else {
            panic!("expected key");
        };
        assert_eq!(shifted.inserted_text().as_deref(), Some("A"));
    }

    #[test]
    fn test_lone_plus_is_a_key() {
        let mut script = InputScript::from_text("+").unwrap();
        assert_eq!(
            script.next_input().unwrap(),
            ScriptedInput::Key(KeyEvent::typed('+'))
        );
    }

    #[test]
    fn test_parse_quoted_string() {
        let mut script = InputScript::from_text(r#""Hi &""#).unwrap();
        assert_eq!(script.remaining(), 4);
        assert_eq!(
            script.next_input().unwrap(),
            ScriptedInput::Key(KeyEvent::typed('H'))
        );
        script.next_input();
        script.next_input();
        let ScriptedInput::Key(amp) = script.next_input().unwrap() else {
            panic!("expected key");
        };
        assert_eq!(amp.inserted_text().as_deref(), Some("&"));
    }

    #[test]
    fn test_parse_wait() {
        let mut script = InputScript::from_text("wait 10ms\nwait 2s").unwrap();
        assert_eq!(
            script.next_input().unwrap(),
            ScriptedInput::Wait(Duration::from_millis(10))
        );
        assert_eq!(
            script.next_input().unwrap(),
            ScriptedInput::Wait(Duration::from_secs(2))
        );
    }

    #[test]
    fn test_parse_clicks() {
        let mut script =
            InputScript::from_text("click background\nclick line\nclick button 2\nclick outside")
                .unwrap();
        assert_eq!(
            script.next_input().unwrap(),
            ScriptedInput::Click(ClickTarget::Background)
        );
        assert_eq!(
            script.next_input().unwrap(),
            ScriptedInput::Click(ClickTarget::TranscriptLine)
        );
        assert_eq!(
            script.next_input().unwrap(),
            ScriptedInput::Click(ClickTarget::ActionButton { index: 2 })
        );
        assert_eq!(
            script.next_input().unwrap(),
            ScriptedInput::Click(ClickTarget::Outside)
        );
    }

    #[test]
    fn test_invalid_click_target() {
        let result = InputScript::from_text("click button x");
        assert!(matches!(result, Err(InputScriptError::ParseError { line: 1, .. })));
        assert_eq!(
            parse_click_target("nowhere"),
            Err(InputScriptError::InvalidClickTarget("nowhere".to_string()))
        );
    }

    #[test]
    fn test_parse_host_command() {
        let mut script = InputScript::from_text(":html\n:quit").unwrap();
        assert_eq!(
            script.next_input().unwrap(),
            ScriptedInput::Host(HostCommand::Html)
        );
        assert_eq!(
            script.next_input().unwrap(),
            ScriptedInput::Host(HostCommand::Quit)
        );
    }

    #[test]
    fn test_parse_comments() {
        let script =
            InputScript::from_text("# Comment\na\n# Another comment\nb  # trailing").unwrap();
        assert_eq!(script.remaining(), 2);
    }

    #[test]
    fn test_hash_inside_quotes_is_text() {
        let script = InputScript::from_text(r##""#1""##).unwrap();
        assert_eq!(script.remaining(), 2);
    }

    #[test]
    fn test_parse_empty_lines() {
        let script = InputScript::from_text("a\n\nb\n\n\nc").unwrap();
        assert_eq!(script.remaining(), 3);
    }

    #[test]
    fn test_empty_script_error() {
        assert_eq!(
            InputScript::from_text("").unwrap_err(),
            InputScriptError::EmptyScript
        );
        assert_eq!(
            InputScript::from_text("# Just comments\n# Nothing else").unwrap_err(),
            InputScriptError::EmptyScript
        );
    }

    #[test]
    fn test_invalid_key_name() {
        let result = InputScript::from_text("a\nInvalidKeyName");
        assert!(matches!(result, Err(InputScriptError::ParseError { line: 2, .. })));
    }

    #[test]
    fn test_invalid_modifier() {
        let result = InputScript::from_text("Invalid+a");
        assert!(matches!(result, Err(InputScriptError::InvalidModifier(_))));
    }

    #[test]
    fn test_invalid_delay() {
        let result = InputScript::from_text("wait abc");
        assert!(matches!(result, Err(InputScriptError::ParseError { .. })));
    }

    #[test]
    fn test_session_script() {
        let script = InputScript::from_text(
            r#"
            # Ask about the author
            click background
            "about"
            Enter
            wait 10ms
            click button 0
        "#,
        )
        .unwrap();

        // click + 5 chars + Enter + wait + click = 9
        assert_eq!(script.remaining(), 9);
    }

    #[test]
    fn test_to_input_event() {
        let event = InputScript::to_input_event(&key(KeyCode::A)).unwrap();
        assert!(matches!(event, InputEvent::Key(_)));

        let click = InputScript::to_input_event(&ScriptedInput::Click(ClickTarget::Background));
        assert!(matches!(click, Some(InputEvent::Pointer(_))));

        let wait = ScriptedInput::Wait(Duration::from_millis(100));
        assert!(InputScript::to_input_event(&wait).is_none());
    }
}
