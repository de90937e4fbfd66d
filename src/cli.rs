/// CLI argument parsing and the non-interactive commands.
use std::{
    fmt,
    io::{BufRead, Write},
    path::PathBuf,
};

use anyhow::Result;
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use tracing::level_filters::LevelFilter;
use tracing::warn;

use crate::clock::Clock;
use crate::config::Config;
use crate::format::format_duration;
use crate::tracker::{
    Capabilities, ChartProjection, HistoryItem, NO_HISTORY, NoticeLevel, Surface, Tracker,
    TrackerSettings,
};

#[derive(Parser)]
#[command(
    name = "timetally",
    version,
    about = "timetally - time per category, in your terminal"
)]
pub struct Cli {
    /// Database file (defaults to the user's data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
    /// Config file (defaults to the user's config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Log level for the log file (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<LevelFilter>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print time per category and the full history
    Report,
    /// Delete one history entry by id
    Delete { id: String },
    /// Delete the whole history
    Clear {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
}

/// Execute a CLI command against the stored history.
pub fn run<C: Clock>(
    command: Command,
    conn: Connection,
    clock: C,
    config: &Config,
    input: impl BufRead,
    out: impl Write,
) -> Result<()> {
    let settings = TrackerSettings::from(config);
    match command {
        Command::Report => {
            let surface = ConsoleSurface::new(input, out, true, false);
            let mut tracker = Tracker::new(conn, clock, surface, settings)?;
            tracker.render();
        }
        Command::Delete { id } => {
            let surface = ConsoleSurface::new(input, out, false, false);
            let mut tracker = Tracker::new(conn, clock, surface, settings)?;
            if tracker.entries().iter().any(|entry| entry.id == id) {
                tracker.on_delete_entry(&id);
            } else {
                tracker
                    .surface_mut()
                    .emit(format_args!("No entry with id '{id}'."));
            }
        }
        Command::Clear { yes } => {
            let surface = ConsoleSurface::new(input, out, false, yes);
            let mut tracker = Tracker::new(conn, clock, surface, settings)?;
            tracker.on_clear_history();
        }
    }
    Ok(())
}

/// Plain-text surface for one-shot commands. Confirmation is read from `input`.
pub struct ConsoleSurface<R, W> {
    input: R,
    out: W,
    echo_views: bool,
    assume_yes: bool,
}

impl<R: BufRead, W: Write> ConsoleSurface<R, W> {
    pub fn new(input: R, out: W, echo_views: bool, assume_yes: bool) -> Self {
        Self {
            input,
            out,
            echo_views,
            assume_yes,
        }
    }

    fn emit(&mut self, line: fmt::Arguments<'_>) {
        if let Err(err) = writeln!(self.out, "{line}") {
            warn!(%err, "Failed to write to stdout");
        }
    }
}

impl<R: BufRead, W: Write> Surface for ConsoleSurface<R, W> {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            chart: true,
            history: true,
            live_display: false,
        }
    }

    fn render_chart(&mut self, chart: &ChartProjection) {
        if !self.echo_views {
            return;
        }
        match chart {
            ChartProjection::NoData => self.emit(format_args!("{}", crate::tracker::NO_CHART_DATA)),
            ChartProjection::Dataset(dataset) => {
                self.emit(format_args!("Time per category"));
                for ((label, total), hours) in dataset
                    .labels
                    .iter()
                    .zip(&dataset.totals)
                    .zip(&dataset.values)
                {
                    self.emit(format_args!(
                        "  {label:<20} {}  {hours:>7.2}h",
                        format_duration(*total as f64)
                    ));
                }
            }
        }
        self.emit(format_args!(""));
    }

    fn clear_chart(&mut self) {}

    fn render_history(&mut self, items: &[HistoryItem]) {
        if !self.echo_views {
            return;
        }
        if items.is_empty() {
            self.emit(format_args!("{NO_HISTORY}"));
            return;
        }
        self.emit(format_args!("History"));
        for item in items {
            self.emit(format_args!(
                "  {:<20} {}  {}  ({:.2}h)  {}",
                item.category, item.started_at, item.duration, item.hours, item.id
            ));
        }
    }

    fn notify(&mut self, message: &str, level: NoticeLevel) {
        let prefix = match level {
            NoticeLevel::Info => "",
            NoticeLevel::Success => "",
            NoticeLevel::Warning => "warning: ",
            NoticeLevel::Error => "error: ",
        };
        self.emit(format_args!("{prefix}{message}"));
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        if write!(self.out, "{message} [y/N] ")
            .and_then(|_| self.out.flush())
            .is_err()
        {
            return false;
        }
        let mut answer = String::new();
        if let Err(err) = self.input.read_line(&mut answer) {
            warn!(%err, "Failed to read confirmation");
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::db::{EntryStore, init_in_memory};
    use crate::types::TimeEntry;

    fn seeded_conn(config: &Config) -> Connection {
        let conn = init_in_memory().unwrap();
        let mut store = EntryStore::load(&config.storage_key, &conn);
        for (id, category, start, duration) in [
            ("entry_1", "Work", 1_700_000_000_000, 3_600_000),
            ("entry_2", "Play", 1_700_003_600_000, 1_800_000),
        ] {
            store
                .append(
                    TimeEntry {
                        id: id.to_string(),
                        category: category.to_string(),
                        start,
                        end: start + duration,
                        duration,
                    },
                    &conn,
                )
                .unwrap();
        }
        conn
    }

    fn run_with_input(command: Command, conn: Connection, input: &str) -> String {
        let mut out = Vec::new();
        run(
            command,
            conn,
            ManualClock::at(0),
            &Config::default(),
            input.as_bytes(),
            &mut out,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn report_prints_totals_and_history() {
        let config = Config::default();
        let output = run_with_input(Command::Report, seeded_conn(&config), "");
        assert!(output.contains("Time per category"));
        assert!(output.contains("01:00:00"));
        assert!(output.contains("1.00h"));
        assert!(output.contains("0.50h"));
        let work = output.find("  Work").unwrap();
        let play = output.find("  Play").unwrap();
        assert!(work < play, "chart keeps first-seen order");
        let history = output.find("History").unwrap();
        assert!(output[history..].find("entry_2").unwrap() < output[history..].find("entry_1").unwrap());
    }

    #[test]
    fn report_on_empty_history_prints_placeholders() {
        let output = run_with_input(Command::Report, init_in_memory().unwrap(), "");
        assert!(output.contains(crate::tracker::NO_CHART_DATA));
        assert!(output.contains(NO_HISTORY));
    }

    #[test]
    fn delete_reports_unknown_ids() {
        let config = Config::default();
        let output = run_with_input(
            Command::Delete {
                id: "entry_404".into(),
            },
            seeded_conn(&config),
            "",
        );
        assert!(output.contains("No entry with id 'entry_404'."));
    }

    #[test]
    fn delete_of_known_id_reports_success() {
        let config = Config::default();
        let output = run_with_input(
            Command::Delete {
                id: "entry_1".into(),
            },
            seeded_conn(&config),
            "",
        );
        assert_eq!(output.trim(), "Entry deleted.");
    }

    #[test]
    fn clear_declined_at_prompt_keeps_history() {
        let config = Config::default();
        let conn = seeded_conn(&config);
        let mut out = Vec::new();
        run(
            Command::Clear { yes: false },
            conn,
            ManualClock::at(0),
            &config,
            "n\n".as_bytes(),
            &mut out,
        )
        .unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("[y/N]"));
        assert!(!output.contains("History cleared."));
    }

    #[test]
    fn clear_with_yes_skips_prompt() {
        let config = Config::default();
        let mut out = Vec::new();
        run(
            Command::Clear { yes: true },
            seeded_conn(&config),
            ManualClock::at(0),
            &config,
            "".as_bytes(),
            &mut out,
        )
        .unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(!output.contains("[y/N]"));
        assert!(output.contains("History cleared."));
    }

    #[test]
    fn console_confirm_accepts_yes() {
        let mut out = Vec::new();
        let mut surface = ConsoleSurface::new("YES\n".as_bytes(), &mut out, false, false);
        assert!(surface.confirm("Sure?"));
        let mut surface = ConsoleSurface::new("".as_bytes(), Vec::new(), false, false);
        assert!(!surface.confirm("Sure?"));
    }
}
