use tracing::debug;

use crate::tracker::{
    Capabilities, ChartDataset, ChartProjection, HistoryItem, NO_CHART_DATA, NoticeLevel, Surface,
};

/// Frames a settled chart takes to grow to full height.
pub const CHART_ANIMATION_FRAMES: u8 = 4;

#[derive(Clone, Debug, PartialEq)]
pub enum ChartView {
    Cleared,
    Placeholder(String),
    Dataset(ChartDataset),
}

/// What the terminal shows, as last rendered by the tracker. `ui::draw` reads it every frame.
#[derive(Debug)]
pub struct Screen {
    pub chart: ChartView,
    pub chart_frame: u8,
    pub history: Vec<HistoryItem>,
    pub elapsed: String,
    pub status: Option<(String, NoticeLevel)>,
    answer: Option<bool>,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            chart: ChartView::Cleared,
            chart_frame: CHART_ANIMATION_FRAMES,
            history: Vec::new(),
            elapsed: "00:00:00".to_string(),
            status: None,
            answer: None,
        }
    }
}

impl Screen {
    /// Records the user's answer from the confirmation popup for the next `confirm` call.
    pub fn answer(&mut self, confirmed: bool) {
        self.answer = Some(confirmed);
    }

    pub fn advance_animation(&mut self) {
        if self.chart_frame < CHART_ANIMATION_FRAMES {
            self.chart_frame += 1;
        }
    }

    /// Fraction of the chart's final height to draw, in `0.0..=1.0`.
    pub fn chart_progress(&self) -> f64 {
        f64::from(self.chart_frame) / f64::from(CHART_ANIMATION_FRAMES)
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

impl Surface for Screen {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            chart: true,
            history: true,
            live_display: true,
        }
    }

    fn render_chart(&mut self, chart: &ChartProjection) {
        match chart {
            ChartProjection::NoData => {
                self.chart = ChartView::Placeholder(NO_CHART_DATA.to_string());
                self.chart_frame = CHART_ANIMATION_FRAMES;
            }
            ChartProjection::Dataset(dataset) => {
                self.chart_frame = if dataset.animate {
                    0
                } else {
                    CHART_ANIMATION_FRAMES
                };
                self.chart = ChartView::Dataset(dataset.clone());
            }
        }
    }

    fn clear_chart(&mut self) {
        self.chart = ChartView::Cleared;
    }

    fn render_history(&mut self, items: &[HistoryItem]) {
        self.history = items.to_vec();
    }

    fn show_elapsed(&mut self, elapsed: &str) {
        self.elapsed = elapsed.to_string();
    }

    fn notify(&mut self, message: &str, level: NoticeLevel) {
        self.status = Some((message.to_string(), level));
    }

    fn confirm(&mut self, message: &str) -> bool {
        let confirmed = self.answer.take().unwrap_or(false);
        debug!(message, confirmed, "Confirmation answered");
        confirmed
    }
}
