/// The tracker core: owns the history, the running session and its ticker, and keeps the
/// surface in sync with them.
mod aggregate;
mod projection;
mod session;
mod surface;
mod ticker;

use anyhow::{Result, bail};
use tracing::{error, info, instrument, warn};

use crate::clock::Clock;
use crate::config::Config;
use crate::db::{EntryStore, KeyValueStore, build_entry};
use crate::format::format_duration;
use crate::types::{Millis, TimeEntry};

#[cfg(test)]
use aggregate::CategoryTotals;
use aggregate::aggregate;
pub use projection::{ChartDataset, ChartProjection, HistoryItem, NO_CHART_DATA, NO_HISTORY};
use projection::{RenderMode, project_chart, project_history};
use session::Session;
pub use surface::{Capabilities, NoticeLevel, Surface};
use ticker::Ticker;

pub const CLEAR_HISTORY_PROMPT: &str =
    "Are you sure you want to delete ALL history? This cannot be undone.";
const HISTORY_CLEARED: &str = "History cleared.";
const ENTRY_DELETED: &str = "Entry deleted.";
const SAVE_FAILED: &str = "Could not save history. Storage may be full or unavailable.";

#[derive(Clone, Debug)]
pub struct TrackerSettings {
    pub storage_key: String,
    pub palette: Vec<String>,
    pub tick_interval: Millis,
    pub chart_refresh_interval: Millis,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for TrackerSettings {
    fn from(config: &Config) -> Self {
        Self {
            storage_key: config.storage_key.clone(),
            palette: config.palette.clone(),
            tick_interval: config.tick_interval_ms,
            chart_refresh_interval: config.chart_refresh_ms,
        }
    }
}

pub struct Tracker<K, C, S> {
    store: K,
    clock: C,
    surface: S,
    entries: EntryStore,
    session: Session,
    ticker: Ticker,
    settings: TrackerSettings,
    live_display: bool,
}

impl<K: KeyValueStore, C: Clock, S: Surface> Tracker<K, C, S> {
    /// Loads the history. Fails when the surface lacks a chart or a history sink.
    #[instrument(skip_all, fields(key = %settings.storage_key))]
    pub fn new(store: K, clock: C, surface: S, settings: TrackerSettings) -> Result<Self> {
        let capabilities = surface.capabilities();
        if !capabilities.chart {
            bail!("Required chart surface is missing");
        }
        if !capabilities.history {
            bail!("Required history surface is missing");
        }
        if !capabilities.live_display {
            warn!("No live display surface, elapsed time will not be shown");
        }

        let entries = EntryStore::load(&settings.storage_key, &store);
        Ok(Self {
            store,
            clock,
            surface,
            entries,
            session: Session::default(),
            ticker: Ticker::new(settings.tick_interval),
            settings,
            live_display: capabilities.live_display,
        })
    }

    pub fn entries(&self) -> &[TimeEntry] {
        self.entries.entries()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    pub fn timer_active(&self) -> bool {
        self.ticker.is_active()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Totals over committed entries only.
    #[cfg(test)]
    pub fn settled_totals(&self) -> CategoryTotals {
        aggregate(self.entries.entries(), None)
    }

    /// Starts a session against `category` when idle, stops the running one otherwise.
    pub fn on_toggle_timer(&mut self, category: &str) {
        if self.session.is_running() {
            self.stop();
        } else {
            self.start(category);
        }
    }

    #[instrument(skip(self))]
    pub fn on_delete_entry(&mut self, id: &str) {
        match self.entries.remove_by_id(id, &self.store) {
            Ok(false) => return,
            Ok(true) => {
                info!("Entry deleted");
                self.surface.notify(ENTRY_DELETED, NoticeLevel::Info);
            }
            Err(err) => {
                error!(err = format!("{err:#}"), "Entry deleted but history not saved");
                self.surface.notify(SAVE_FAILED, NoticeLevel::Warning);
            }
        }
        self.render();
    }

    pub fn on_clear_history(&mut self) {
        if !self.surface.confirm(CLEAR_HISTORY_PROMPT) {
            info!("Clearing history cancelled");
            return;
        }
        if let Err(err) = self.entries.clear_all(&self.store) {
            error!(err = format!("{err:#}"), "Stored history could not be erased");
            self.surface.notify(SAVE_FAILED, NoticeLevel::Warning);
        }
        self.render();
        self.surface.notify(HISTORY_CLEARED, NoticeLevel::Success);
    }

    /// Event-loop hook: ticks when the running session's schedule is due.
    pub fn poll_timer(&mut self) {
        if self.ticker.poll(self.clock.now_ms()) {
            self.tick();
        }
    }

    /// Stops a running session so it is committed before the process exits.
    pub fn shutdown(&mut self) {
        if self.session.is_running() {
            info!("Stopping running session on shutdown");
            self.stop();
        }
    }

    /// Settled render of both the chart and the history list.
    pub fn render(&mut self) {
        let now = self.clock.now_ms();
        self.render_chart(RenderMode::Settled, now);
        let items = project_history(self.entries.entries());
        self.surface.render_history(&items);
    }

    fn start(&mut self, category: &str) {
        let now = self.clock.now_ms();
        if let Err(err) = self.session.start(category, now) {
            warn!(%err, "Timer not started");
            self.surface.notify(&err.to_string(), NoticeLevel::Error);
            return;
        }
        self.ticker.schedule(now);
        debug_assert!(self.ticker.is_active() && self.session.is_running());
        self.tick();
    }

    fn stop(&mut self) {
        self.ticker.cancel();
        let now = self.clock.now_ms();
        if let Some(ended) = self.session.stop(now) {
            if let Some(entry) = build_entry(&ended.category, ended.start, ended.end) {
                if let Err(err) = self.entries.append(entry, &self.store) {
                    error!(err = format!("{err:#}"), "Entry kept in memory but not saved");
                    self.surface.notify(SAVE_FAILED, NoticeLevel::Warning);
                }
            }
        }
        debug_assert!(!self.ticker.is_active() && !self.session.is_running());
        if self.live_display {
            self.surface.show_elapsed(&format_duration(0.0));
        }
        self.render();
    }

    fn tick(&mut self) {
        let now = self.clock.now_ms();
        let Some(elapsed) = self.session.elapsed(now) else {
            return;
        };
        if self.live_display {
            self.surface.show_elapsed(&format_duration(elapsed as f64));
        }
        if self
            .session
            .take_chart_refresh(now, self.settings.chart_refresh_interval)
        {
            self.render_chart(RenderMode::Live, now);
        }
    }

    fn render_chart(&mut self, mode: RenderMode, now: Millis) {
        let live = match mode {
            RenderMode::Live => self.session.live(now),
            RenderMode::Settled => None,
        };
        let totals = aggregate(self.entries.entries(), live.as_ref());
        let chart = project_chart(
            &totals,
            mode,
            !self.entries.is_empty(),
            &self.settings.palette,
        );
        self.surface.clear_chart();
        self.surface.render_chart(&chart);
    }
}
