//! Console Test Utilities
//!
//! This crate provides shared utilities for cross-crate console tests.
//!
//! ## Test Philosophy
//!
//! - **Structure holds after every step**: The banner survives, and every
//!   submission forms one well-shaped group
//! - **Deterministic time**: Scrolls only happen when a test advances the clock
//! - **Host and widget agree**: What the host prints is what the console holds

use cli_console::{ConsoleResponse, InteractiveConsole};
use console_transcript::{Banner, EntryKind, ScrollSurface, Transcript, TranscriptEntry};
use input_types::{InputEvent, KeyCode, KeyEvent, Modifiers};
use services_command_registry::CommandRegistry;

/// Viewport height used by mounted test consoles
pub const TEST_VIEWPORT_ROWS: usize = 8;

/// Mounts a portfolio console the way the host does
///
/// The surface is attached and the input already has focus.
pub fn mounted_console() -> InteractiveConsole {
    let mut console = InteractiveConsole::new(CommandRegistry::portfolio(), &Banner::portfolio());
    console.attach_surface(ScrollSurface::new(TEST_VIEWPORT_ROWS));
    console.focus_input();
    console
}

/// Types `text` one key at a time, then presses Enter
///
/// Returns the response to Enter.
pub fn type_line(console: &mut InteractiveConsole, text: &str) -> ConsoleResponse {
    for ch in text.chars() {
        console
            .process_event(&InputEvent::key(KeyEvent::typed(ch)))
            .unwrap();
    }
    console
        .process_event(&InputEvent::key(KeyEvent::pressed(
            KeyCode::Enter,
            Modifiers::none(),
        )))
        .unwrap()
}

/// Splits the body into one group per submission, each starting at its echo
pub fn submission_groups(transcript: &Transcript) -> Vec<&[TranscriptEntry]> {
    let body = transcript.body();
    let starts: Vec<usize> = body
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.kind() == EntryKind::EchoedCommand)
        .map(|(i, _)| i)
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(body.len());
            &body[start..end]
        })
        .collect()
}

/// Checks the shape every transcript must keep
///
/// - The banner is exactly `banner`
/// - The body is a run of groups: echo, output lines, at most one button, spacer
pub fn assert_well_formed(transcript: &Transcript, banner: &Banner) {
    assert_eq!(transcript.banner(), banner.entries(), "banner changed");

    if let Some(first) = transcript.body().first() {
        assert_eq!(first.kind(), EntryKind::EchoedCommand, "body must open with an echo");
    }

    for group in submission_groups(transcript) {
        let kinds: Vec<EntryKind> = group.iter().map(TranscriptEntry::kind).collect();
        assert!(kinds.len() >= 3, "group too short: {:?}", kinds);
        assert_eq!(kinds.last(), Some(&EntryKind::Spacer), "group must end with a spacer");

        let middle = &kinds[1..kinds.len() - 1];
        let buttons = middle
            .iter()
            .filter(|kind| **kind == EntryKind::ActionButton)
            .count();
        assert!(buttons <= 1, "more than one button: {:?}", kinds);
        if buttons == 1 {
            assert_eq!(middle.last(), Some(&EntryKind::ActionButton), "button must close the output");
        }
        assert!(
            middle[..middle.len() - buttons]
                .iter()
                .all(|kind| *kind == EntryKind::OutputLine),
            "unexpected entry in output: {:?}",
            kinds
        );
    }
}
