//! Dispatch behavior of the portfolio console, driven through the widget.

use cli_console::{DispatchOutcome, InteractiveConsole, TranscriptMutation};
use console_transcript::{Banner, EntryKind, TranscriptEntry};
use input_types::{InputEvent, KeyCode, KeyEvent, Modifiers};
use services_command_registry::{CommandName, CommandRegistry};

fn body_kinds(console: &InteractiveConsole) -> Vec<EntryKind> {
    console
        .transcript()
        .body()
        .iter()
        .map(|entry| entry.kind())
        .collect()
}

fn type_and_submit(console: &mut InteractiveConsole, text: &str) -> TranscriptMutation {
    for ch in text.chars() {
        console
            .process_event(&InputEvent::key(KeyEvent::typed(ch)))
            .unwrap();
    }
    match console
        .process_event(&InputEvent::key(KeyEvent::pressed(
            KeyCode::Enter,
            Modifiers::none(),
        )))
        .unwrap()
    {
        cli_console::ConsoleResponse::Dispatched(mutation) => mutation,
        other => panic!("expected dispatch, got {:?}", other),
    }
}

#[test]
fn test_help_scenario() {
    let mut console = InteractiveConsole::portfolio();
    console.submit("help");

    let registry = CommandRegistry::portfolio();
    let help = registry.resolve(&CommandName::new("help")).unwrap();
    let body = console.transcript().body();

    assert_eq!(body[0], TranscriptEntry::echo("help"));
    for (i, line) in help.output_lines.iter().enumerate() {
        assert_eq!(body[i + 1], TranscriptEntry::output(line.as_str()));
    }
    assert_eq!(body.len(), help.output_lines.len() + 2);
    assert_eq!(body.last(), Some(&TranscriptEntry::Spacer));
    assert_eq!(console.transcript().buttons().count(), 0);
}

#[test]
fn test_whoami_scenario() {
    let mut console = InteractiveConsole::portfolio();
    console.submit("whoami");

    assert_eq!(
        console.transcript().body(),
        &[
            TranscriptEntry::echo("whoami"),
            TranscriptEntry::output("Avanindra Vijay - Software Engineer & Data Scientist"),
            TranscriptEntry::Spacer,
        ]
    );
}

#[test]
fn test_about_scenario() {
    let mut console = InteractiveConsole::portfolio();
    console.submit("about");

    let body = console.transcript().body();
    assert_eq!(body[0], TranscriptEntry::echo("about"));
    assert_eq!(
        body[body.len() - 2],
        TranscriptEntry::ActionButton {
            label: "View Full Profile →".to_string(),
            target_link: "/about".to_string(),
        }
    );
    assert_eq!(body[body.len() - 1], TranscriptEntry::Spacer);
    assert!(body[1..body.len() - 2]
        .iter()
        .all(|entry| entry.kind() == EntryKind::OutputLine));
}

#[test]
fn test_empty_scenario() {
    let mut console = InteractiveConsole::portfolio();
    let before = console.transcript().entries().to_vec();

    assert_eq!(console.submit(""), TranscriptMutation::Unchanged);
    assert_eq!(console.submit("    "), TranscriptMutation::Unchanged);
    assert_eq!(console.transcript().entries(), before.as_slice());
    assert_eq!(console.pending_timers(), 0);
}

#[test]
fn test_unknown_scenario() {
    let mut console = InteractiveConsole::portfolio();
    let mutation = console.submit("xyz");

    assert_eq!(
        mutation,
        TranscriptMutation::Appended {
            outcome: DispatchOutcome::Unresolved {
                key: "xyz".to_string()
            },
            added: 4,
        }
    );
    let body = console.transcript().body();
    assert_eq!(
        body[1],
        TranscriptEntry::output(r#"<span class="terminal-error">Command not found: xyz</span>"#)
    );
    assert_eq!(
        body[2],
        TranscriptEntry::output(
            r#"Type <span class="terminal-info">help</span> to see available commands."#
        )
    );
    assert_eq!(body[3], TranscriptEntry::Spacer);
}

#[test]
fn test_about_then_clear_scenario() {
    let mut console = InteractiveConsole::portfolio();
    let banner_len = console.transcript().banner_len();

    console.submit("about");
    console.submit("clear");

    assert_eq!(console.transcript().len(), banner_len);
    assert_eq!(console.transcript().entries(), Banner::portfolio().entries());
    assert!(console
        .transcript()
        .entries()
        .iter()
        .all(|entry| entry.kind() != EntryKind::ActionButton));
}

#[test]
fn test_every_command_appends_in_order() {
    let registry = CommandRegistry::portfolio();

    for definition in registry.definitions() {
        if definition.clears_transcript() {
            continue;
        }
        let mut console = InteractiveConsole::portfolio();
        console.submit(definition.name.as_str());

        let mut expected = vec![EntryKind::EchoedCommand];
        expected.extend(definition.output_lines.iter().map(|_| EntryKind::OutputLine));
        if definition.button.is_some() {
            expected.push(EntryKind::ActionButton);
        }
        expected.push(EntryKind::Spacer);

        assert_eq!(body_kinds(&console), expected, "command {}", definition.name);
    }
}

#[test]
fn test_unknown_tokens_never_add_buttons() {
    for token in ["xyz", "sudo", "HELPME", "cd /", "ls -la", "clear all"] {
        let mut console = InteractiveConsole::portfolio();
        console.submit(token);

        let kinds = body_kinds(&console);
        assert_eq!(kinds.first(), Some(&EntryKind::EchoedCommand), "{}", token);
        assert_eq!(kinds.last(), Some(&EntryKind::Spacer), "{}", token);
        assert!(kinds[1..kinds.len() - 1]
            .iter()
            .all(|kind| *kind == EntryKind::OutputLine));
        assert!(kinds.len() >= 3);
    }
}

#[test]
fn test_clear_is_idempotent() {
    let mut console = InteractiveConsole::portfolio();
    let banner_len = console.transcript().banner_len();

    for cmd in ["help", "skills", "xyz", "projects"] {
        console.submit(cmd);
    }
    console.submit("clear");
    assert_eq!(console.transcript().len(), banner_len);
    console.submit("clear");
    assert_eq!(console.transcript().len(), banner_len);
}

#[test]
fn test_lookup_ignores_case_and_whitespace() {
    let mut plain = InteractiveConsole::portfolio();
    let mut noisy = InteractiveConsole::portfolio();

    let a = plain.submit("help");
    let b = noisy.submit("  HELP  ");

    assert_eq!(a, b);
    // Only the echo keeps the submitted text
    assert_eq!(noisy.transcript().body()[0], TranscriptEntry::echo("  HELP  "));
    assert_eq!(&plain.transcript().body()[1..], &noisy.transcript().body()[1..]);
}

#[test]
fn test_typed_submission_matches_submit() {
    let mut typed = InteractiveConsole::portfolio();
    typed.focus_input();
    let mut direct = InteractiveConsole::portfolio();

    assert_eq!(type_and_submit(&mut typed, "Pwd"), direct.submit("Pwd"));
    assert_eq!(typed.transcript().entries(), direct.transcript().entries());
    assert_eq!(typed.input(), "");
}

#[test]
fn test_mutation_serialization() {
    let mut console = InteractiveConsole::portfolio();
    let mutation = console.submit("ls");
    let json = serde_json::to_string(&mutation).unwrap();
    let back: TranscriptMutation = serde_json::from_str(&json).unwrap();
    assert_eq!(mutation, back);
}
