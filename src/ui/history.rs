use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::{clamp_name, hours_label};
use super::theme::Theme;
use crate::app::{App, Focus};
use crate::clock::Clock;
use crate::tracker::NO_HISTORY;

const CATEGORY_WIDTH: usize = 16;

/// History lines, most recent first, keeping the highlighted entry in view.
pub fn build_history_text<C: Clock>(app: &App<C>, height: usize) -> Text<'_> {
    let history = &app.screen().history;
    if history.is_empty() {
        return Text::from(Line::from(Span::styled(
            format!("  {NO_HISTORY}"),
            Style::default().fg(Theme::dim()),
        )));
    }

    let focused = app.focus == Focus::History;
    let visible = height.max(1);
    let first = app.selected_entry_index.saturating_sub(visible - 1);

    let lines = history
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .map(|(index, item)| {
            let selected = focused && index == app.selected_entry_index;
            let marker_style = if selected {
                Style::default()
                    .fg(Theme::highlight())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Theme::dim())
            };
            Line::from(vec![
                Span::styled(if selected { "> " } else { "  " }, marker_style),
                Span::styled(
                    clamp_name(&item.category, CATEGORY_WIDTH),
                    Style::default()
                        .fg(Theme::text())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(item.started_at.as_str(), Style::default().fg(Theme::dim())),
                Span::raw("  "),
                Span::styled(item.duration.as_str(), Style::default().fg(Theme::accent())),
                Span::styled(
                    format!("  ({})", hours_label(item.hours)),
                    Style::default().fg(Theme::dim()),
                ),
            ])
        })
        .collect::<Vec<_>>();

    Text::from(lines)
}
