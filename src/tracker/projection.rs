/// Renderable views derived from the history and the category totals.
use chrono::{DateTime, Local, TimeZone};

use super::aggregate::CategoryTotals;
use crate::color::palette_color;
use crate::format::{format_duration, format_hours};
use crate::types::{EntryId, Millis, TimeEntry};

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const NO_CHART_DATA: &str = "No data to display yet.";
pub const NO_HISTORY: &str = "No activities recorded yet.";

/// Live renders happen on the running session's tick and skip animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    Live,
    Settled,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartDataset {
    pub labels: Vec<String>,
    /// Hours per category, two decimals.
    pub values: Vec<f64>,
    pub colors: Vec<String>,
    pub totals: Vec<Millis>,
    pub animate: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChartProjection {
    NoData,
    Dataset(ChartDataset),
}

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryItem {
    pub id: EntryId,
    pub category: String,
    pub started_at: String,
    pub started_at_iso: String,
    pub duration: String,
    pub hours: f64,
}

/// Builds the chart dataset, or `NoData` when there is nothing worth drawing.
///
/// Zero totals only produce a dataset on a live render with committed history behind it.
pub fn project_chart(
    totals: &CategoryTotals,
    mode: RenderMode,
    has_history: bool,
    palette: &[String],
) -> ChartProjection {
    let nothing_to_show = totals.is_empty() || totals.is_all_zero();
    if nothing_to_show && (mode == RenderMode::Settled || !has_history) {
        return ChartProjection::NoData;
    }

    let mut dataset = ChartDataset {
        labels: Vec::with_capacity(totals.len()),
        values: Vec::with_capacity(totals.len()),
        colors: Vec::with_capacity(totals.len()),
        totals: Vec::with_capacity(totals.len()),
        animate: mode == RenderMode::Settled,
    };
    for (index, total) in totals.iter().enumerate() {
        dataset.labels.push(total.category.clone());
        dataset.values.push(format_hours(total.duration as f64));
        dataset.colors.push(palette_color(palette, index).to_string());
        dataset.totals.push(total.duration);
    }
    ChartProjection::Dataset(dataset)
}

/// History items, most recent first.
pub fn project_history(entries: &[TimeEntry]) -> Vec<HistoryItem> {
    entries
        .iter()
        .rev()
        .map(|entry| {
            let started = local_time(entry.start);
            HistoryItem {
                id: entry.id.clone(),
                category: if entry.category.is_empty() {
                    UNCATEGORIZED.to_string()
                } else {
                    entry.category.clone()
                },
                started_at: started
                    .map(|dt| dt.format("%b %e, %Y - %H:%M").to_string())
                    .unwrap_or_else(|| "Unknown date".to_string()),
                started_at_iso: started.map(|dt| dt.to_rfc3339()).unwrap_or_default(),
                duration: format_duration(entry.duration as f64),
                hours: format_hours(entry.duration as f64),
            }
        })
        .collect()
}

fn local_time(ms: Millis) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(ms).single()
}
