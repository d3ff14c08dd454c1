//! Deferred scrolling and teardown

use cli_console::{InteractiveConsole, DEFAULT_SCROLL_DELAY};
use console_transcript::{Banner, ScrollSurface};
use services_command_registry::CommandRegistry;
use services_timer::Instant;
use std::time::Duration;
use tests_console::{mounted_console, type_line, TEST_VIEWPORT_ROWS};

#[test]
fn test_scroll_lands_after_delay() {
    let mut console = mounted_console();
    type_line(&mut console, "help");

    let surface = console.surface().unwrap();
    assert!(surface.content_rows() > TEST_VIEWPORT_ROWS);
    assert!(!surface.at_bottom());
    assert_eq!(console.pending_timers(), 1);

    assert_eq!(console.tick(DEFAULT_SCROLL_DELAY - Duration::from_millis(1)), 0);
    assert!(!console.surface().unwrap().at_bottom());

    assert_eq!(console.tick(Duration::from_millis(1)), 1);
    assert!(console.surface().unwrap().at_bottom());
    assert_eq!(console.now(), Instant::ZERO + DEFAULT_SCROLL_DELAY);
}

#[test]
fn test_burst_of_submissions_ends_at_bottom() {
    let mut console = mounted_console();
    for line in ["about", "skills", "nope", "experience"] {
        type_line(&mut console, line);
        console.tick(Duration::from_millis(3));
    }

    assert!(console.pending_timers() > 0);
    console.settle();
    assert_eq!(console.pending_timers(), 0);

    let surface = console.surface().unwrap();
    assert!(surface.at_bottom());
    assert_eq!(surface.content_rows(), console.transcript().len() + 1);
}

#[test]
fn test_user_scroll_is_overridden_by_next_dispatch() {
    let mut console = mounted_console();
    type_line(&mut console, "projects");
    console.settle();

    let surface = console.surface_mut().unwrap();
    surface.scroll_up(5);
    assert!(!surface.at_bottom());

    type_line(&mut console, "pwd");
    console.settle();
    assert!(console.surface().unwrap().at_bottom());
}

#[test]
fn test_clear_scrolls_back_to_top() {
    let mut console = mounted_console();
    type_line(&mut console, "help");
    console.settle();
    assert!(console.surface().unwrap().scroll_top() > 0);

    type_line(&mut console, "clear");
    console.settle();
    let surface = console.surface().unwrap();
    assert_eq!(surface.scroll_top(), 0);
    assert_eq!(surface.content_rows(), Banner::portfolio().len() + 1);
}

#[test]
fn test_detached_surface_absorbs_scroll() {
    let mut console = mounted_console();
    type_line(&mut console, "about");
    let surface = console.detach_surface();
    assert!(surface.is_some());

    assert_eq!(console.settle(), 1);
    assert!(console.surface().is_none());
}

#[test]
fn test_teardown_cancels_pending_scrolls() {
    let mut console = mounted_console();
    type_line(&mut console, "about");
    type_line(&mut console, "contact");
    assert_eq!(console.teardown(), 2);
}

#[test]
fn test_custom_delay() {
    let delay = Duration::from_millis(250);
    let mut console = InteractiveConsole::new(CommandRegistry::portfolio(), &Banner::portfolio())
        .with_scroll_delay(delay);
    console.attach_surface(ScrollSurface::new(4));
    console.focus_input();

    type_line(&mut console, "skills");
    assert_eq!(console.tick(DEFAULT_SCROLL_DELAY), 0);
    assert_eq!(console.tick(delay), 1);
    assert!(console.surface().unwrap().at_bottom());
}
