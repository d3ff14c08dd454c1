//! Interactive console
//!
//! The widget a host mounts: it owns the console state, routes key and
//! pointer events, and defers scroll-to-bottom through a timer queue.

use crate::dispatcher::{Dispatcher, TranscriptMutation};
use crate::state::ConsoleState;
use crate::ConsoleError;
use console_transcript::{Banner, ScrollSurface, Transcript};
use input_types::{InputEvent, KeyCode, KeyEvent, PointerEvent};
use services_command_registry::CommandRegistry;
use services_focus_manager::{ClickOutcome, FocusManager};
use services_timer::{Instant, TimerId, TimerQueue};
use std::time::Duration;
use tracing::debug;

/// Delay between a dispatch and the scroll that follows it
pub const DEFAULT_SCROLL_DELAY: Duration = Duration::from_millis(10);

/// Deferred work the console schedules for itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTask {
    ScrollToBottom,
}

/// What handling one event did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleResponse {
    /// The event had no effect
    Ignored,
    /// The input buffer changed
    BufferEdited,
    /// Enter was pressed
    Dispatched(TranscriptMutation),
    /// The input gained or kept focus
    Focused,
    /// An action button asked the host to navigate
    Navigate { target_link: String },
}

/// Interactive console
///
/// - Keys reach the buffer only while the input has focus
/// - Enter dispatches the buffer and clears it
/// - Every transcript mutation schedules one deferred scroll
pub struct InteractiveConsole {
    state: ConsoleState,
    dispatcher: Dispatcher,
    focus: FocusManager,
    timers: TimerQueue<ConsoleTask>,
    /// `None` once the surface is detached
    surface: Option<ScrollSurface>,
    scroll_delay: Duration,
}

impl InteractiveConsole {
    /// Mounts a console with `registry` and `banner`.
    ///
    /// The console starts without a surface and with the input unfocused.
    pub fn new(registry: CommandRegistry, banner: &Banner) -> Self {
        Self {
            state: ConsoleState::new(banner),
            dispatcher: Dispatcher::new(registry),
            focus: FocusManager::new(),
            timers: TimerQueue::new(),
            surface: None,
            scroll_delay: DEFAULT_SCROLL_DELAY,
        }
    }

    /// Mounts the portfolio console
    pub fn portfolio() -> Self {
        Self::new(CommandRegistry::portfolio(), &Banner::portfolio())
    }

    /// Sets the scroll delay
    pub fn with_scroll_delay(mut self, delay: Duration) -> Self {
        self.scroll_delay = delay;
        self
    }

    /// Attaches a scroll surface, replacing any previous one
    pub fn attach_surface(&mut self, mut surface: ScrollSurface) {
        surface.sync(self.state.transcript());
        self.surface = Some(surface);
    }

    /// Detaches the surface. Scrolls that fire afterwards do nothing.
    pub fn detach_surface(&mut self) -> Option<ScrollSurface> {
        self.surface.take()
    }

    pub fn surface(&self) -> Option<&ScrollSurface> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut ScrollSurface> {
        self.surface.as_mut()
    }

    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    pub fn transcript(&self) -> &Transcript {
        self.state.transcript()
    }

    pub fn input(&self) -> &str {
        self.state.input()
    }

    pub fn registry(&self) -> &CommandRegistry {
        self.dispatcher.registry()
    }

    pub fn focus(&self) -> &FocusManager {
        &self.focus
    }

    /// Gives the input focus, as a page script would at load
    pub fn focus_input(&mut self) -> bool {
        self.focus.focus_input()
    }

    /// Takes focus away from the input, as when the page focuses something else
    pub fn blur(&mut self) -> Result<(), ConsoleError> {
        Ok(self.focus.blur()?)
    }

    pub fn has_focus(&self) -> bool {
        self.focus.has_input_focus()
    }

    pub fn scroll_delay(&self) -> Duration {
        self.scroll_delay
    }

    /// Current console time
    pub fn now(&self) -> Instant {
        self.timers.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending_count()
    }

    /// Processes an input event
    pub fn process_event(&mut self, event: &InputEvent) -> Result<ConsoleResponse, ConsoleError> {
        match event {
            InputEvent::Key(key) => Ok(self.handle_key(key)),
            InputEvent::Pointer(click) => self.handle_click(click),
        }
    }

    /// Dispatches `raw_input` as if it had been typed and submitted.
    ///
    /// The buffer is left untouched.
    pub fn submit(&mut self, raw_input: &str) -> TranscriptMutation {
        let mutation = self
            .dispatcher
            .dispatch(self.state.transcript_mut(), raw_input);

        if !mutation.is_unchanged() {
            if let Some(surface) = self.surface.as_mut() {
                surface.sync(self.state.transcript());
            }
            self.schedule_scroll();
        }
        mutation
    }

    fn handle_key(&mut self, key: &KeyEvent) -> ConsoleResponse {
        if key.is_released() || !self.focus.has_input_focus() {
            return ConsoleResponse::Ignored;
        }

        match key.code {
            // A held Enter submits once
            KeyCode::Enter if key.is_repeat() => ConsoleResponse::Ignored,
            KeyCode::Enter => {
                let raw = self.state.take_input();
                ConsoleResponse::Dispatched(self.submit(&raw))
            }
            KeyCode::Backspace => {
                if self.state.backspace() {
                    ConsoleResponse::BufferEdited
                } else {
                    ConsoleResponse::Ignored
                }
            }
            _ => match key.inserted_text() {
                Some(text) if !text.is_empty() => {
                    self.state.insert(&text);
                    ConsoleResponse::BufferEdited
                }
                _ => ConsoleResponse::Ignored,
            },
        }
    }

    fn handle_click(&mut self, click: &PointerEvent) -> Result<ConsoleResponse, ConsoleError> {
        let transcript = self.state.transcript();
        let outcome = self.focus.handle_click(click, |index| {
            transcript
                .button(index)
                .and_then(|entry| entry.target_link())
                .map(str::to_string)
        })?;

        Ok(match outcome {
            ClickOutcome::FocusInput => ConsoleResponse::Focused,
            ClickOutcome::Navigate { target_link } => ConsoleResponse::Navigate { target_link },
            ClickOutcome::Ignored => ConsoleResponse::Ignored,
        })
    }

    fn schedule_scroll(&mut self) -> TimerId {
        self.timers
            .schedule("scroll-to-bottom", self.scroll_delay, ConsoleTask::ScrollToBottom)
    }

    /// Advances console time and runs the tasks that came due.
    ///
    /// Returns how many tasks ran.
    pub fn tick(&mut self, by: Duration) -> usize {
        let fired = self.timers.advance(by);
        let count = fired.len();
        for timer in fired {
            self.run_task(timer.task);
        }
        count
    }

    /// Runs every pending task
    pub fn settle(&mut self) -> usize {
        let fired = self.timers.run_until_idle();
        let count = fired.len();
        for timer in fired {
            self.run_task(timer.task);
        }
        count
    }

    fn run_task(&mut self, task: ConsoleTask) {
        match task {
            ConsoleTask::ScrollToBottom => match self.surface.as_mut() {
                Some(surface) => {
                    surface.sync(self.state.transcript());
                    let moved = surface.scroll_to_bottom();
                    debug!(scroll_top = surface.scroll_top(), moved, "scrolled to bottom");
                }
                None => debug!("scroll skipped: surface detached"),
            },
        }
    }

    /// Unmounts the console.
    ///
    /// Pending timers are cancelled and the surface is dropped. Returns the
    /// number of cancelled timers.
    pub fn teardown(mut self) -> usize {
        let cancelled = self.timers.cancel_all();
        self.surface = None;
        debug!(cancelled, "console torn down");
        cancelled
    }
}
