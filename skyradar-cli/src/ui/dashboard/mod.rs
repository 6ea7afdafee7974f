//! Full-screen radar dashboard.
//!
//! # Module Structure
//!
//! - `render` - Layout of scope, info panel, status and help lines
//! - `utils` - Formatting shared with the text reports

mod render;
pub mod utils;

use std::io::{self, Stdout};
use std::time::Duration;

use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use skyradar::record::PositionRecord;
use skyradar::tracking::{Presenter, TrackerCommand, TrackingView};

/// Map a key press to a tracker command.
///
/// Raw mode swallows SIGINT, so Ctrl+C arrives here as a key event.
pub fn command_for_key(key: KeyEvent) -> Option<TrackerCommand> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Some(TrackerCommand::Quit)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(TrackerCommand::Quit),
        KeyCode::Char('i') | KeyCode::Char('I') => Some(TrackerCommand::ToggleInfoPanel),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(TrackerCommand::Refresh),
        _ => None,
    }
}

/// The interactive radar UI.
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Last frame, redrawn on terminal resize.
    last_view: Option<TrackingView>,
}

impl Dashboard {
    /// Switch the terminal to raw mode and the alternate screen.
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;

        Ok(Self {
            terminal,
            last_view: None,
        })
    }

    /// Restore terminal to normal state.
    pub fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn draw(&mut self) -> io::Result<()> {
        if let Some(view) = &self.last_view {
            let now = Local::now();
            self.terminal.draw(|frame| render::render_ui(frame, view, now))?;
        }
        Ok(())
    }
}

impl Presenter for Dashboard {
    fn render(&mut self, view: &TrackingView) -> io::Result<()> {
        self.last_view = Some(view.clone());
        self.draw()
    }

    fn show_arrivals(&mut self, _arrivals: &[PositionRecord]) -> io::Result<()> {
        // New contacts appear on the scope; details go to the log.
        Ok(())
    }

    fn next_command(&mut self, timeout: Duration) -> io::Result<Option<TrackerCommand>> {
        if !event::poll(timeout)? {
            // Keeps the status-line clock ticking between polls.
            self.draw()?;
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(command_for_key(key)),
            Event::Resize(_, _) => {
                self.draw()?;
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
