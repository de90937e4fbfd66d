use super::projection::{ChartProjection, HistoryItem};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Which sinks a surface actually provides. Chart and history are required.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub chart: bool,
    pub history: bool,
    pub live_display: bool,
}

/// Everything the tracker renders into or asks of the user.
pub trait Surface {
    fn capabilities(&self) -> Capabilities;

    /// Draws the chart, replacing whatever was drawn before.
    fn render_chart(&mut self, chart: &ChartProjection);

    /// Tears the current chart down before a redraw.
    fn clear_chart(&mut self);

    fn render_history(&mut self, items: &[HistoryItem]);

    /// Live elapsed-time display. Only called when `capabilities().live_display` is set.
    fn show_elapsed(&mut self, _elapsed: &str) {}

    fn notify(&mut self, message: &str, level: NoticeLevel);

    fn confirm(&mut self, message: &str) -> bool;
}
