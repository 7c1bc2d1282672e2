//! Interactive terminal surface.
//!
//! Raw mode turns Ctrl+C, Ctrl+Z and Ctrl+\ into ordinary key events, so
//! they reach [`BlockScreen`] (which swallows them) instead of raising
//! signals. Mouse capture keeps clicks away from the emulator's context
//! menu.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::Show;
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use envguard_scorer::{Locale, Verdict};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::{BlockConfig, HoldPolicy};
use crate::screen::{BlockScreen, EventOutcome};
use crate::surface::{BlockSurface, StderrBlockSurface, SurfaceError};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy)]
pub struct TerminalBlockSurface {
    locale: Locale,
    hold: HoldPolicy,
    linger: Duration,
}

impl TerminalBlockSurface {
    pub fn new(locale: Locale, hold: HoldPolicy) -> Self {
        Self {
            locale,
            hold,
            linger: Duration::ZERO,
        }
    }

    pub fn from_config(locale: Locale, config: &BlockConfig) -> Self {
        Self::new(locale, config.hold).with_linger(config.linger())
    }

    /// How long [`HoldPolicy::Exit`] keeps the screen up.
    pub fn with_linger(mut self, linger: Duration) -> Self {
        self.linger = linger;
        self
    }

    fn deadline(&self) -> Option<Instant> {
        match self.hold {
            HoldPolicy::Forever => None,
            HoldPolicy::Exit => Some(Instant::now() + self.linger),
        }
    }

    fn run(&self, screen: &BlockScreen) -> Result<(), SurfaceError> {
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.hide_cursor()?;
        terminal.clear()?;
        terminal.draw(|frame| frame.render_widget(screen, frame.area()))?;

        let deadline = self.deadline();
        loop {
            let timeout = match deadline {
                None => POLL_INTERVAL,
                Some(deadline) => {
                    let left = deadline.saturating_duration_since(Instant::now());
                    if left.is_zero() {
                        return Ok(());
                    }
                    left.min(POLL_INTERVAL)
                }
            };
            if !event::poll(timeout)? {
                continue;
            }
            if screen.handle_event(&event::read()?) == EventOutcome::Redraw {
                terminal.draw(|frame| frame.render_widget(screen, frame.area()))?;
            }
        }
    }
}

impl BlockSurface for TerminalBlockSurface {
    fn block(&self, verdict: &Verdict) -> Result<(), SurfaceError> {
        let screen = BlockScreen::new(self.locale);
        {
            let _guard = RawTerminal::enter()?;
            tracing::debug!(hold = %self.hold, "blocking screen shown");
            self.run(&screen)?;
        }
        // Keep the message visible after the alternate screen is gone.
        StderrBlockSurface::new(self.locale).block(verdict)
    }
}

/// Raw mode plus alternate screen; restored on drop, including on error.
struct RawTerminal {
    stdout: Stdout,
}

impl RawTerminal {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        ) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        Ok(Self { stdout })
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen,
            Show
        );
        let _ = self.stdout.flush();
        let _ = disable_raw_mode();
    }
}
