//! Event handling for the TUI
//!
//! Polls keyboard and terminal events, and owns terminal setup, teardown
//! and the suspend/resume used while a child process runs.

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use std::io::{stdout, Stdout};
use std::time::Duration;

/// Application events
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Key press event
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// No input within the tick interval
    Tick,
}

/// Event handler configuration
pub struct EventConfig {
    /// Tick rate in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 250 }
    }
}

/// Blocking event source.
///
/// Reads happen on the caller's thread only, so nothing competes with a
/// foreground child process for keystrokes.
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(config: EventConfig) -> Self {
        Self {
            tick_rate: Duration::from_millis(config.tick_rate_ms),
        }
    }

    /// Wait for the next event, yielding `Tick` on timeout
    pub fn next(&mut self) -> Result<AppEvent> {
        loop {
            if !event::poll(self.tick_rate)? {
                return Ok(AppEvent::Tick);
            }

            match event::read()? {
                // Ignore release and repeat reports
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(AppEvent::Key(key))
                }
                Event::Resize(w, h) => return Ok(AppEvent::Resize(w, h)),
                _ => {}
            }
        }
    }
}

/// Give the terminal back to the shell before running a child process
pub fn suspend() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Take the terminal back after a child process exited
pub fn resume() -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    Ok(())
}

/// Terminal management
pub struct Terminal {
    /// The terminal backend
    pub backend: ratatui::Terminal<ratatui::backend::CrosstermBackend<Stdout>>,
}

impl Terminal {
    /// Create and initialize a new terminal
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        stdout.execute(EnterAlternateScreen)?;

        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let terminal = ratatui::Terminal::new(backend)?;

        Ok(Self { backend: terminal })
    }

    /// Restore terminal to original state
    pub fn restore(&mut self) -> Result<()> {
        disable_raw_mode()?;
        self.backend.backend_mut().execute(LeaveAlternateScreen)?;
        self.backend.show_cursor()?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
