//! # Host Runtime
//!
//! The event loop that mounts the console and drives it.
//!
//! Each step takes one input (a scripted action or a stdin line), hands it
//! to the console, advances console time, and prints what changed.

use crate::commands::{HostCommand, HostCommandError, HostCommandParser, HOST_HELP};
use crate::config::ConfigError;
use crate::input_script::{InputScript, InputScriptError, ScriptedInput};
use crate::render::TranscriptRenderer;
use cli_console::{ConsoleError, ConsoleResponse, InteractiveConsole, DEFAULT_SCROLL_DELAY};
use console_transcript::{Banner, OutputFormat, ScrollSurface};
use input_types::{InputEvent, KeyCode, KeyEvent, Modifiers};
use serde::{Deserialize, Serialize};
use services_command_registry::CommandRegistry;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Host runtime error types
#[derive(Debug, Error)]
pub enum HostRuntimeError {
    #[error("Script error: {0}")]
    Script(#[from] InputScriptError),

    #[error("Command error: {0}")]
    Command(#[from] HostCommandError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Console error: {0}")]
    Console(#[from] ConsoleError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Host mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostMode {
    /// Simulation mode (deterministic, scripted input)
    Sim,
    /// Interactive mode (stdin lines)
    Interactive,
}

impl fmt::Display for HostMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostMode::Sim => write!(f, "sim"),
            HostMode::Interactive => write!(f, "interactive"),
        }
    }
}

/// Host runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRuntimeConfig {
    /// Host mode
    pub mode: HostMode,
    /// Optional input script (for sim mode)
    pub script: Option<String>,
    /// Maximum steps to run (0 = unlimited)
    pub max_steps: usize,
    /// Delay before the console scrolls after a dispatch
    pub scroll_delay: Duration,
    /// Height of the scroll viewport
    pub viewport_rows: usize,
    /// Output format
    pub format: OutputFormat,
    /// Banner lines replacing the portfolio welcome
    pub banner: Option<Vec<String>>,
}

impl Default for HostRuntimeConfig {
    fn default() -> Self {
        Self {
            mode: HostMode::Sim,
            script: None,
            max_steps: 0,
            scroll_delay: DEFAULT_SCROLL_DELAY,
            viewport_rows: 24,
            format: OutputFormat::Plain,
            banner: None,
        }
    }
}

impl HostRuntimeConfig {
    /// Banner the console is mounted with
    pub fn banner(&self) -> Banner {
        match &self.banner {
            Some(lines) => {
                let mut banner = Banner::from_lines(lines.iter().map(String::as_str));
                banner.add_spacer();
                banner
            }
            None => Banner::portfolio(),
        }
    }
}

/// Host runtime state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HostState {
    Running,
    Shutdown,
}

/// Host runtime
pub struct HostRuntime<W: Write = io::Stdout> {
    /// Configuration
    config: HostRuntimeConfig,
    /// The mounted console
    console: InteractiveConsole,
    /// Tracks what has been printed
    renderer: TranscriptRenderer,
    /// Input script (if in sim mode)
    script: Option<InputScript>,
    /// Current state
    state: HostState,
    /// Step counter
    steps: usize,
    /// Links requested by button clicks
    navigations: Vec<String>,
    /// Where frames are written
    out: W,
}

impl HostRuntime<io::Stdout> {
    /// Creates a runtime that prints to stdout
    pub fn new(config: HostRuntimeConfig) -> Result<Self, HostRuntimeError> {
        Self::with_writer(config, io::stdout())
    }
}

impl<W: Write> HostRuntime<W> {
    /// Creates a runtime that prints to `out`
    pub fn with_writer(config: HostRuntimeConfig, out: W) -> Result<Self, HostRuntimeError> {
        let mut console = InteractiveConsole::new(CommandRegistry::portfolio(), &config.banner())
            .with_scroll_delay(config.scroll_delay);
        console.attach_surface(ScrollSurface::new(config.viewport_rows));
        // The host's terminal is the console; typing goes straight to the input
        console.focus_input();

        let script = match &config.script {
            Some(text) => Some(InputScript::from_text(text)?),
            None => None,
        };

        info!(mode = %config.mode, format = ?config.format, "host runtime ready");

        Ok(Self {
            renderer: TranscriptRenderer::new(config.format),
            config,
            console,
            script,
            state: HostState::Running,
            steps: 0,
            navigations: Vec::new(),
            out,
        })
    }

    /// Runs the host event loop
    ///
    /// Returns when:
    /// - Quit command received
    /// - Max steps reached (if configured)
    /// - Script exhausted (sim mode) or stdin closed (interactive mode)
    pub fn run(&mut self) -> Result<(), HostRuntimeError> {
        match self.config.mode {
            HostMode::Sim => self.run_script(),
            HostMode::Interactive => {
                let stdin = io::stdin();
                self.run_interactive(stdin.lock())
            }
        }
    }

    /// Replays the input script
    pub fn run_script(&mut self) -> Result<(), HostRuntimeError> {
        self.render()?;

        while !self.should_stop() {
            let exhausted = self.script.as_ref().map_or(true, |script| !script.has_more());
            if exhausted {
                break;
            }

            self.step()?;
            self.steps += 1;
        }

        self.finish()
    }

    /// Reads lines from `input` until it closes or the host quits
    pub fn run_interactive<R: BufRead>(&mut self, input: R) -> Result<(), HostRuntimeError> {
        self.render()?;

        for line in input.lines() {
            if self.should_stop() {
                break;
            }

            self.handle_line(&line?)?;
            self.steps += 1;
        }

        self.finish()
    }

    fn should_stop(&self) -> bool {
        self.state == HostState::Shutdown
            || (self.config.max_steps > 0 && self.steps >= self.config.max_steps)
    }

    /// Executes one scripted input
    pub fn step(&mut self) -> Result<(), HostRuntimeError> {
        let Some(input) = self.script.as_mut().and_then(InputScript::next_input) else {
            return Ok(());
        };

        match input {
            ScriptedInput::Wait(duration) => {
                let ran = self.console.tick(duration);
                debug!(?duration, ran, "time advanced");
            }
            ScriptedInput::Host(command) => self.run_command(&command)?,
            other => {
                if let Some(event) = InputScript::to_input_event(&other) {
                    self.deliver(&event)?;
                }
            }
        }

        self.render()
    }

    /// Handles one interactive line: a host command, or text typed then Enter
    pub fn handle_line(&mut self, line: &str) -> Result<(), HostRuntimeError> {
        if HostCommandParser::is_host_command(line) {
            match HostCommandParser::parse(line) {
                Ok(command) => self.run_command(&command)?,
                Err(err) => self.report(&err)?,
            }
        } else {
            for ch in line.chars() {
                self.deliver(&InputEvent::key(KeyEvent::typed(ch)))?;
            }
            self.deliver(&InputEvent::key(KeyEvent::pressed(
                KeyCode::Enter,
                Modifiers::none(),
            )))?;
        }

        // A person at a terminal is slower than the scroll delay
        self.console.tick(self.config.scroll_delay);
        self.render()
    }

    /// Sends an event to the console
    pub fn send_event(&mut self, event: &InputEvent) -> Result<ConsoleResponse, HostRuntimeError> {
        let response = self.console.process_event(event)?;

        if let ConsoleResponse::Navigate { target_link } = &response {
            info!(target_link = %target_link, "navigation requested");
            writeln!(self.out, "→ navigate {}", target_link)?;
            self.navigations.push(target_link.clone());
        }

        Ok(response)
    }

    /// Sends an event, reporting console errors instead of failing
    fn deliver(&mut self, event: &InputEvent) -> Result<(), HostRuntimeError> {
        match self.send_event(event) {
            Ok(_) => Ok(()),
            Err(HostRuntimeError::Console(err)) => self.report(&err),
            Err(err) => Err(err),
        }
    }

    /// Parses and executes a host command
    pub fn execute_command(&mut self, command_text: &str) -> Result<(), HostRuntimeError> {
        let command = HostCommandParser::parse(command_text)?;
        self.run_command(&command)
    }

    fn run_command(&mut self, command: &HostCommand) -> Result<(), HostRuntimeError> {
        debug!(?command, "host command");

        match command {
            HostCommand::Quit => {
                self.state = HostState::Shutdown;
            }
            HostCommand::Click(target) => {
                self.deliver(&InputEvent::click(target.clone()))?;
            }
            HostCommand::Blur => {
                if let Err(err) = self.console.blur() {
                    self.report(&err)?;
                }
            }
            HostCommand::Html | HostCommand::Plain => {
                if let Some(format) = command.format() {
                    self.renderer.set_format(format);
                }
            }
            HostCommand::Redraw => {
                self.renderer.request_redraw();
            }
            HostCommand::View => {
                let rows = match self.console.surface() {
                    Some(surface) => {
                        self.renderer
                            .viewport(self.console.transcript(), surface, self.console.input())
                    }
                    None => Vec::new(),
                };
                for row in rows {
                    writeln!(self.out, "| {}", row)?;
                }
            }
            HostCommand::Commands => {
                for definition in self.console.registry().definitions() {
                    writeln!(
                        self.out,
                        "{:<12}{}",
                        definition.name.as_str(),
                        definition.summary
                    )?;
                }
            }
            HostCommand::Help => {
                for line in HOST_HELP {
                    writeln!(self.out, "{}", line)?;
                }
            }
        }

        Ok(())
    }

    fn report(&mut self, err: &dyn fmt::Display) -> Result<(), HostRuntimeError> {
        warn!(error = %err, "input rejected");
        writeln!(self.out, "! {}", err)?;
        Ok(())
    }

    /// Prints whatever changed since the last render
    fn render(&mut self) -> Result<(), HostRuntimeError> {
        let frame = self.renderer.update(self.console.transcript());
        for line in frame.lines() {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Lets pending scrolls run and prints the final frame
    fn finish(&mut self) -> Result<(), HostRuntimeError> {
        let ran = self.console.settle();
        debug!(ran, steps = self.steps, "host finished");
        self.render()
    }

    /// Returns the console (for testing)
    pub fn console(&self) -> &InteractiveConsole {
        &self.console
    }

    /// Returns the step count
    pub fn step_count(&self) -> usize {
        self.steps
    }

    /// Links requested so far
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    pub fn format(&self) -> OutputFormat {
        self.renderer.format()
    }

    pub fn is_shutdown(&self) -> bool {
        self.state == HostState::Shutdown
    }

    /// Returns the writer (for testing)
    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Unmounts the console and returns the writer
    pub fn into_writer(self) -> W {
        let cancelled = self.console.teardown();
        debug!(cancelled, "console unmounted");
        self.out
    }
}
