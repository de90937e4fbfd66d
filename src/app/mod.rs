mod screen;
mod state;

use crossterm::event::KeyCode;

pub use screen::{ChartView, Screen};
pub use state::{App, ConfirmPopup};

/// Possible input events the app reacts to.
pub enum AppEvent {
    Tick,
    KeyPress(KeyCode),
}

/// Which pane Up/Down and delete act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Categories,
    History,
}
