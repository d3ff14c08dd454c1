//! Transcript structure across long sessions

use cli_console::{ConsoleResponse, DispatchOutcome, TranscriptMutation};
use console_transcript::{Banner, EntryKind};
use services_command_registry::CommandRegistry;
use tests_console::{assert_well_formed, mounted_console, submission_groups, type_line};

const SESSION: &[&str] = &[
    "help",
    "about",
    "  SKILLS ",
    "sudo",
    "",
    "experience",
    "   ",
    "projects",
    "clear",
    "contact",
    "education",
    "whoami",
    "ls",
    "pwd",
    "cd ..",
    "Clear",
    "clear",
    "<script>",
];

#[test]
fn test_session_keeps_structure_after_every_step() {
    let banner = Banner::portfolio();
    let mut console = mounted_console();

    for line in SESSION {
        type_line(&mut console, line);
        assert_well_formed(console.transcript(), &banner);
        assert_eq!(console.input(), "", "buffer not cleared after {:?}", line);
    }
}

#[test]
fn test_groups_match_registry_definitions() {
    let registry = CommandRegistry::portfolio();
    let mut console = mounted_console();

    for definition in registry.definitions() {
        if definition.clears_transcript() {
            continue;
        }
        type_line(&mut console, definition.name.as_str());
    }

    let groups = submission_groups(console.transcript());
    let outputs: Vec<_> = registry
        .definitions()
        .iter()
        .filter(|definition| !definition.clears_transcript())
        .collect();
    assert_eq!(groups.len(), outputs.len());

    for (group, definition) in groups.iter().zip(outputs) {
        let button = usize::from(definition.button.is_some());
        assert_eq!(group.len(), 1 + definition.output_lines.len() + button + 1);
    }
}

#[test]
fn test_clear_only_leaves_banner() {
    let banner = Banner::portfolio();
    let mut console = mounted_console();
    type_line(&mut console, "about");
    type_line(&mut console, "projects");

    let response = type_line(&mut console, "CLEAR");
    assert!(matches!(
        response,
        ConsoleResponse::Dispatched(TranscriptMutation::Cleared { removed: 22 })
    ));
    assert_eq!(console.transcript().entries(), banner.entries());
    assert_eq!(console.transcript().buttons().count(), 0);
}

#[test]
fn test_blank_lines_never_touch_the_transcript() {
    let mut console = mounted_console();
    let revision = console.transcript().revision();

    for line in ["", " ", "\t", "    "] {
        let response = type_line(&mut console, line);
        assert_eq!(
            response,
            ConsoleResponse::Dispatched(TranscriptMutation::Unchanged)
        );
    }

    assert_eq!(console.transcript().revision(), revision);
    assert_eq!(console.pending_timers(), 0);
}

#[test]
fn test_unresolved_keys_are_normalized() {
    let mut console = mounted_console();
    let response = type_line(&mut console, "  Rm -RF ");

    match response {
        ConsoleResponse::Dispatched(TranscriptMutation::Appended { outcome, added }) => {
            assert_eq!(
                outcome,
                DispatchOutcome::Unresolved {
                    key: "rm -rf".to_string()
                }
            );
            assert_eq!(added, 4);
        }
        other => panic!("unexpected response: {:?}", other),
    }

    let body = console.transcript().body();
    assert_eq!(body[0].kind(), EntryKind::EchoedCommand);
    assert_eq!(
        body[1],
        console_transcript::TranscriptEntry::output(
            r#"<span class="terminal-error">Command not found: rm -rf</span>"#
        )
    );
}

#[test]
fn test_transcript_serializes_for_snapshots() {
    let mut console = mounted_console();
    type_line(&mut console, "whoami");

    let json = serde_json::to_string(console.transcript().body()).unwrap();
    assert!(json.contains("Avanindra Vijay - Software Engineer & Data Scientist"));
}
