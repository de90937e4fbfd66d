use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    prelude::Alignment,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Paragraph},
};

use super::helpers::{clamp_name, hex_to_color, hours_label};
use super::theme::Theme;
use crate::app::{ChartView, Screen};
use crate::format::format_duration;
use crate::tracker::ChartDataset;

const LABEL_WIDTH: usize = 12;

/// Time per category as horizontal bars, with a `HH:MM:SS (x.xxh)` legend underneath.
pub fn render_chart(frame: &mut Frame, area: Rect, screen: &Screen) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Theme::secondary()))
        .title(" Time per category ");

    let dataset = match &screen.chart {
        ChartView::Dataset(dataset) => dataset,
        ChartView::Placeholder(message) => {
            let placeholder = Paragraph::new(Text::from(vec![
                Line::from(""),
                Line::from(Span::styled(
                    message.as_str(),
                    Style::default().fg(Theme::dim()),
                )),
            ]))
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(placeholder, area);
            return;
        }
        ChartView::Cleared => {
            frame.render_widget(block, area);
            return;
        }
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let legend_height = (dataset.labels.len() as u16).min(inner.height / 2);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(legend_height)])
        .split(inner);

    let bars = build_bars(dataset, screen.chart_progress());
    let max = dataset.totals.iter().copied().max().unwrap_or(0).max(1) as u64;
    let chart = BarChart::default()
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .max(max)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, layout[0]);

    frame.render_widget(Paragraph::new(legend_lines(dataset)), layout[1]);
}

fn build_bars(dataset: &ChartDataset, progress: f64) -> Vec<Bar<'_>> {
    dataset
        .labels
        .iter()
        .zip(&dataset.totals)
        .zip(&dataset.values)
        .zip(&dataset.colors)
        .map(|(((label, total), hours), color)| {
            let color = hex_to_color(color).unwrap_or(Theme::text());
            Bar::default()
                .value(((*total).max(0) as f64 * progress).round() as u64)
                .label(Line::from(clamp_name(label, LABEL_WIDTH)))
                .text_value(hours_label(*hours))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Theme::text()).bg(color))
        })
        .collect()
}

fn legend_lines(dataset: &ChartDataset) -> Text<'_> {
    let lines = dataset
        .labels
        .iter()
        .zip(&dataset.totals)
        .zip(&dataset.values)
        .zip(&dataset.colors)
        .map(|(((label, total), hours), color)| {
            let color = hex_to_color(color).unwrap_or(Theme::text());
            Line::from(vec![
                Span::styled(" ■ ", Style::default().fg(color)),
                Span::styled(
                    clamp_name(label, LABEL_WIDTH),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    format_duration(*total as f64),
                    Style::default().fg(Theme::accent()),
                ),
                Span::styled(
                    format!(" ({})", hours_label(*hours)),
                    Style::default().fg(Theme::dim()),
                ),
            ])
        })
        .collect::<Vec<_>>();
    Text::from(lines)
}
