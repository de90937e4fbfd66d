use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::theme::Theme;
use crate::app::{App, Focus};
use crate::clock::Clock;

/// Category picker plus the running timer readout.
pub fn build_timer_text<C: Clock>(app: &App<C>) -> Text<'_> {
    let screen = app.screen();
    let running = app.tracker.session().category();

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                if running.is_some() { "  ● " } else { "  ○ " },
                Style::default().fg(if running.is_some() {
                    Theme::active()
                } else {
                    Theme::dim()
                }),
            ),
            Span::styled(
                screen.elapsed.as_str(),
                Style::default()
                    .fg(Theme::accent())
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            match running {
                Some(category) => format!("    Tracking {category}"),
                None => "    Idle".to_string(),
            },
            Style::default().fg(Theme::dim()),
        )),
        Line::from(""),
    ];

    if app.categories.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No categories configured.",
            Style::default().fg(Theme::warn()),
        )));
        return Text::from(lines);
    }

    let focused = app.focus == Focus::Categories;
    lines.extend(app.categories.iter().enumerate().map(|(index, category)| {
        let selected = index == app.selected_category_index;
        let marker_style = if selected && focused {
            Style::default()
                .fg(Theme::highlight())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::dim())
        };
        let name_style = if running == Some(category.as_str()) {
            Style::default()
                .fg(Theme::active())
                .add_modifier(Modifier::BOLD)
        } else if selected {
            Style::default()
                .fg(Theme::text())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::text())
        };
        Line::from(vec![
            Span::styled(if selected { "  > " } else { "    " }, marker_style),
            Span::styled(category.as_str(), name_style),
        ])
    }));

    Text::from(lines)
}
