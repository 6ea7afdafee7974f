//! Line-oriented output for non-interactive runs.
//!
//! Used when stdout is not a terminal or `--non-interactive` is given.
//! Prints a block per batch of arrivals and one status line per poll.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use chrono::Local;
use skyradar::record::PositionRecord;
use skyradar::tracking::{Presenter, TrackerCommand, TrackingView};

use crate::ui::dashboard::utils::{format_clock, record_summary, status_line};

/// Presenter writing plain text to any writer.
pub struct ReportPresenter<W: Write> {
    out: W,
    /// Sleep in `next_command`; disabled in tests.
    wait: bool,
}

impl ReportPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ReportPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out, wait: true }
    }

    /// Return immediately from `next_command` instead of sleeping.
    #[cfg(test)]
    pub fn without_wait(mut self) -> Self {
        self.wait = false;
        self
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for ReportPresenter<W> {
    fn render(&mut self, view: &TrackingView) -> io::Result<()> {
        let mut line = status_line(view, Local::now());
        if let Some(error) = &view.last_error {
            line.push_str(&format!(" | Error: {}", error));
        }
        writeln!(self.out, "{}", line)?;
        self.out.flush()
    }

    fn show_arrivals(&mut self, arrivals: &[PositionRecord]) -> io::Result<()> {
        writeln!(
            self.out,
            "\n=== New aircraft detected at {} ===",
            format_clock(Local::now())
        )?;
        for record in arrivals {
            for line in record_summary(record) {
                writeln!(self.out, "{}", line)?;
            }
            writeln!(self.out, "{}", "-".repeat(40))?;
        }
        self.out.flush()
    }

    fn next_command(&mut self, timeout: Duration) -> io::Result<Option<TrackerCommand>> {
        if self.wait {
            thread::sleep(timeout);
        }
        Ok(None)
    }
}
