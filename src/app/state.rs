use anyhow::Result;
use crossterm::event::KeyCode;
use rusqlite::Connection;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::tracker::{CLEAR_HISTORY_PROMPT, Tracker, TrackerSettings};

use super::{AppEvent, Focus, Screen};

/// The top-level terminal application state.
pub struct App<C = SystemClock> {
    pub running: bool,
    pub tracker: Tracker<Connection, C, Screen>,
    pub categories: Vec<String>,
    pub selected_category_index: usize,
    pub selected_entry_index: usize,
    pub focus: Focus,
    pub confirm_popup: Option<ConfirmPopup>,
}

#[derive(Clone, Debug)]
pub struct ConfirmPopup {
    pub message: String,
}

impl<C: Clock> App<C> {
    pub fn new(db: Connection, clock: C, config: &Config) -> Result<Self> {
        let mut tracker = Tracker::new(db, clock, Screen::default(), TrackerSettings::from(config))?;
        tracker.render();
        Ok(Self {
            running: true,
            tracker,
            categories: config.categories.clone(),
            selected_category_index: 0,
            selected_entry_index: 0,
            focus: Focus::Categories,
            confirm_popup: None,
        })
    }

    pub fn screen(&self) -> &Screen {
        self.tracker.surface()
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.categories
            .get(self.selected_category_index)
            .map(String::as_str)
    }

    /// Central update function - process an event and mutate state.
    pub fn update(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => {
                if self.tracker.timer_active() {
                    self.tracker.poll_timer();
                }
                self.tracker.surface_mut().advance_animation();
            }
            AppEvent::KeyPress(key) => {
                // Auto-repeating keys can starve the Tick path.
                self.tracker.poll_timer();
                self.handle_key(key);
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        if self.confirm_popup.is_some() {
            self.handle_confirm_key(key);
            return;
        }

        match key {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Categories => Focus::History,
                    Focus::History => Focus::Categories,
                };
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection_down(),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_timer(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected_entry(),
            KeyCode::Char('D') => {
                self.confirm_popup = Some(ConfirmPopup {
                    message: CLEAR_HISTORY_PROMPT.to_string(),
                });
            }
            KeyCode::Esc => self.tracker.surface_mut().clear_status(),
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyCode) {
        let confirmed = match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => true,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
            _ => return,
        };
        self.confirm_popup = None;
        self.tracker.surface_mut().answer(confirmed);
        self.tracker.on_clear_history();
        self.clamp_entry_selection();
    }

    fn toggle_timer(&mut self) {
        self.tracker.surface_mut().clear_status();
        let category = self.selected_category().unwrap_or_default().to_string();
        self.tracker.on_toggle_timer(&category);
        self.clamp_entry_selection();
    }

    fn delete_selected_entry(&mut self) {
        if self.focus != Focus::History {
            return;
        }
        let Some(item) = self.screen().history.get(self.selected_entry_index) else {
            return;
        };
        let id = item.id.clone();
        debug!(%id, "Deleting selected entry");
        self.tracker.surface_mut().clear_status();
        self.tracker.on_delete_entry(&id);
        self.clamp_entry_selection();
    }

    fn move_selection_up(&mut self) {
        match self.focus {
            Focus::Categories => {
                if self.categories.is_empty() {
                    return;
                }
                if self.selected_category_index == 0 {
                    self.selected_category_index = self.categories.len() - 1;
                } else {
                    self.selected_category_index -= 1;
                }
            }
            Focus::History => {
                self.selected_entry_index = self.selected_entry_index.saturating_sub(1);
            }
        }
    }

    fn move_selection_down(&mut self) {
        match self.focus {
            Focus::Categories => {
                if self.categories.is_empty() {
                    return;
                }
                self.selected_category_index =
                    (self.selected_category_index + 1) % self.categories.len();
            }
            Focus::History => {
                if self.selected_entry_index + 1 < self.screen().history.len() {
                    self.selected_entry_index += 1;
                }
            }
        }
    }

    fn clamp_entry_selection(&mut self) {
        let len = self.screen().history.len();
        if self.selected_entry_index >= len {
            self.selected_entry_index = len.saturating_sub(1);
        }
    }

    fn quit(&mut self) {
        self.tracker.shutdown();
        self.running = false;
    }
}
