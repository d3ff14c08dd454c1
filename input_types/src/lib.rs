#![no_std]

//! # Input Types
//!
//! Structured input events delivered to the console widget.
//!
//! ## Philosophy
//!
//! - **Events, not bytes**: input arrives as key and pointer events, never as a raw stream
//! - **Targets are explicit**: a pointer event names what it landed on, so focus
//!   routing is a pure function of the event
//! - **Testable**: events are serializable and can be injected from scripts

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Input event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Keyboard event
    Key(KeyEvent),
    /// Pointer click
    Pointer(PointerEvent),
}

impl InputEvent {
    /// Creates a key event
    pub fn key(event: KeyEvent) -> Self {
        Self::Key(event)
    }

    /// Creates a primary-button click on `target`
    pub fn click(target: ClickTarget) -> Self {
        Self::Pointer(PointerEvent::click(target))
    }

    /// Returns the key event if this is a key event
    pub fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            Self::Key(event) => Some(event),
            Self::Pointer(_) => None,
        }
    }

    /// Returns the pointer event if this is a pointer event
    pub fn as_pointer(&self) -> Option<&PointerEvent> {
        match self {
            Self::Pointer(event) => Some(event),
            Self::Key(_) => None,
        }
    }
}

/// Keyboard event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// The key that was pressed/released
    pub code: KeyCode,
    /// Modifier keys that were active
    pub modifiers: Modifiers,
    /// Event state (pressed, released, repeat)
    pub state: KeyState,
    /// Text produced by the key, when the source knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl KeyEvent {
    /// Creates a new key event
    pub fn new(code: KeyCode, modifiers: Modifiers, state: KeyState) -> Self {
        Self {
            code,
            modifiers,
            state,
            text: None,
        }
    }

    /// Creates a key pressed event
    pub fn pressed(code: KeyCode, modifiers: Modifiers) -> Self {
        Self::new(code, modifiers, KeyState::Pressed)
    }

    /// Creates a key released event
    pub fn released(code: KeyCode, modifiers: Modifiers) -> Self {
        Self::new(code, modifiers, KeyState::Released)
    }

    /// Creates a pressed event that types `ch` verbatim
    pub fn typed(ch: char) -> Self {
        let mut buf = [0u8; 4];
        let modifiers = if ch.is_ascii_uppercase() {
            Modifiers::SHIFT
        } else {
            Modifiers::none()
        };
        Self::pressed(KeyCode::from_char(ch), modifiers).with_text(&*ch.encode_utf8(&mut buf))
    }

    /// Attaches the text this key produced
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Returns true if this is a press event
    pub fn is_pressed(&self) -> bool {
        self.state == KeyState::Pressed
    }

    /// Returns true if this is a release event
    pub fn is_released(&self) -> bool {
        self.state == KeyState::Released
    }

    /// Returns true if this is an auto-repeat of a held key
    pub fn is_repeat(&self) -> bool {
        self.state == KeyState::Repeat
    }

    /// Text this key inserts into a text field, if any.
    ///
    /// Explicit `text` wins; otherwise printable key codes are mapped with
    /// Shift applied. Ctrl/Alt/Meta chords never insert text.
    pub fn inserted_text(&self) -> Option<String> {
        if self.modifiers.is_ctrl() || self.modifiers.is_alt() || self.modifiers.is_meta() {
            return None;
        }
        if let Some(text) = &self.text {
            return Some(text.clone());
        }
        self.code
            .to_char(self.modifiers.is_shift())
            .map(String::from)
    }
}

/// Key state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyState {
    /// Key was pressed down
    Pressed,
    /// Key was released
    Released,
    /// Key is auto-repeating
    Repeat,
}

impl fmt::Display for KeyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pressed => write!(f, "pressed"),
            Self::Released => write!(f, "released"),
            Self::Repeat => write!(f, "repeat"),
        }
    }
}

/// Logical key code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Numbers
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,

    // Editing and control
    Escape,
    Tab,
    Space,
    Enter,
    Backspace,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    // Arrow keys
    Up,
    Down,
    Left,
    Right,

    // Punctuation
    Minus,
    Equal,
    Semicolon,
    Quote,
    Comma,
    Period,
    Slash,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    /// Unknown/unmapped key
    Unknown,
}

impl KeyCode {
    const LETTERS: [KeyCode; 26] = [
        KeyCode::A,
        KeyCode::B,
        KeyCode::C,
        KeyCode::D,
        KeyCode::E,
        KeyCode::F,
        KeyCode::G,
        KeyCode::H,
        KeyCode::I,
        KeyCode::J,
        KeyCode::K,
        KeyCode::L,
        KeyCode::M,
        KeyCode::N,
        KeyCode::O,
        KeyCode::P,
        KeyCode::Q,
        KeyCode::R,
        KeyCode::S,
        KeyCode::T,
        KeyCode::U,
        KeyCode::V,
        KeyCode::W,
        KeyCode::X,
        KeyCode::Y,
        KeyCode::Z,
    ];

    const DIGITS: [KeyCode; 10] = [
        KeyCode::Num0,
        KeyCode::Num1,
        KeyCode::Num2,
        KeyCode::Num3,
        KeyCode::Num4,
        KeyCode::Num5,
        KeyCode::Num6,
        KeyCode::Num7,
        KeyCode::Num8,
        KeyCode::Num9,
    ];

    /// Maps a character to the key that usually produces it
    pub fn from_char(ch: char) -> Self {
        match ch {
            'a'..='z' => Self::LETTERS[(ch as u8 - b'a') as usize],
            'A'..='Z' => Self::LETTERS[(ch as u8 - b'A') as usize],
            '0'..='9' => Self::DIGITS[(ch as u8 - b'0') as usize],
            ' ' => KeyCode::Space,
            '-' | '_' => KeyCode::Minus,
            '=' | '+' => KeyCode::Equal,
            ';' | ':' => KeyCode::Semicolon,
            '\'' | '"' => KeyCode::Quote,
            ',' | '<' => KeyCode::Comma,
            '.' | '>' => KeyCode::Period,
            '/' | '?' => KeyCode::Slash,
            _ => KeyCode::Unknown,
        }
    }

    /// Character produced by this key on a US layout
    pub fn to_char(self, shift: bool) -> Option<char> {
        if let Some(idx) = Self::LETTERS.iter().position(|k| *k == self) {
            let base = if shift { b'A' } else { b'a' };
            return Some((base + idx as u8) as char);
        }
        if let Some(idx) = Self::DIGITS.iter().position(|k| *k == self) {
            return Some((b'0' + idx as u8) as char);
        }
        let (plain, shifted) = match self {
            KeyCode::Space => (' ', ' '),
            KeyCode::Minus => ('-', '_'),
            KeyCode::Equal => ('=', '+'),
            KeyCode::Semicolon => (';', ':'),
            KeyCode::Quote => ('\'', '"'),
            KeyCode::Comma => (',', '<'),
            KeyCode::Period => ('.', '>'),
            KeyCode::Slash => ('/', '?'),
            _ => return None,
        };
        Some(if shift { shifted } else { plain })
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Modifier keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self { bits: 0 };
    /// Control key
    pub const CTRL: Self = Self { bits: 1 << 0 };
    /// Alt key
    pub const ALT: Self = Self { bits: 1 << 1 };
    /// Shift key
    pub const SHIFT: Self = Self { bits: 1 << 2 };
    /// Meta/Super key
    pub const META: Self = Self { bits: 1 << 3 };

    /// Creates a new modifier set with no modifiers
    pub fn none() -> Self {
        Self::NONE
    }

    /// Adds a modifier
    pub fn with(mut self, other: Modifiers) -> Self {
        self.bits |= other.bits;
        self
    }

    /// Checks if a modifier is present
    pub fn contains(&self, other: Modifiers) -> bool {
        (self.bits & other.bits) == other.bits
    }

    pub fn is_ctrl(&self) -> bool {
        self.contains(Self::CTRL)
    }

    pub fn is_alt(&self) -> bool {
        self.contains(Self::ALT)
    }

    pub fn is_shift(&self) -> bool {
        self.contains(Self::SHIFT)
    }

    pub fn is_meta(&self) -> bool {
        self.contains(Self::META)
    }

    /// Returns true if no modifiers are pressed
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }

        let mut parts = Vec::new();
        if self.is_ctrl() {
            parts.push("Ctrl");
        }
        if self.is_alt() {
            parts.push("Alt");
        }
        if self.is_shift() {
            parts.push("Shift");
        }
        if self.is_meta() {
            parts.push("Meta");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// Pointer click
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Which button was used
    pub button: PointerButton,
    /// What the pointer landed on
    pub target: ClickTarget,
}

impl PointerEvent {
    /// Primary-button click on `target`
    pub fn click(target: ClickTarget) -> Self {
        Self {
            button: PointerButton::Primary,
            target,
        }
    }
}

/// Pointer button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Element a click landed on, relative to the console widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickTarget {
    /// The console's own scroll container
    Background,
    /// A transcript line container
    TranscriptLine,
    /// The output span inside a transcript line
    OutputText,
    /// An action button; `index` counts buttons from the top of the transcript
    ActionButton { index: usize },
    /// The input field itself
    InputField,
    /// Anywhere outside the console
    Outside,
}

impl fmt::Display for ClickTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Background => write!(f, "background"),
            Self::TranscriptLine => write!(f, "line"),
            Self::OutputText => write!(f, "output"),
            Self::ActionButton { index } => write!(f, "button {}", index),
            Self::InputField => write!(f, "input"),
            Self::Outside => write!(f, "outside"),
        }
    }
}
