mod categories;
mod chart;
mod helpers;
mod history;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    prelude::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{App, ConfirmPopup, Focus};
use crate::clock::Clock;
use theme::Theme;

use helpers::notice_color;

/// Renders the entire UI for a single frame.
pub fn draw<C: Clock>(frame: &mut Frame, app: &App<C>) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    frame.render_widget(header(app), layout[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(layout[1]);
    let timer = Paragraph::new(categories::build_timer_text(app))
        .style(Style::default().fg(Theme::text()))
        .block(pane(" Timer ", app.focus == Focus::Categories));
    frame.render_widget(timer, middle[0]);
    chart::render_chart(frame, middle[1], app.screen());

    let history_block = pane(" History ", app.focus == Focus::History);
    let history_height = history_block.inner(layout[2]).height as usize;
    let history = Paragraph::new(history::build_history_text(app, history_height))
        .style(Style::default().fg(Theme::text()))
        .block(history_block);
    frame.render_widget(history, layout[2]);

    let footer = Paragraph::new(Text::from(footer_line(app)))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Theme::secondary())),
        );
    frame.render_widget(footer, layout[3]);

    if let Some(popup) = &app.confirm_popup {
        render_confirm_popup(frame, popup);
    }
}

fn pane(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(if focused {
            Theme::focused()
        } else {
            Theme::secondary()
        }))
        .title(title)
}

fn header<C: Clock>(app: &App<C>) -> Paragraph<'_> {
    let mut spans = vec![
        Span::styled(
            "  timetally  ",
            Style::default().fg(Color::Black).bg(Theme::primary()),
        ),
        Span::raw(" "),
        Span::styled(
            "time per category",
            Style::default()
                .fg(Theme::secondary())
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(category) = app.tracker.session().category() {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("● {category} {}", app.screen().elapsed),
            Style::default()
                .fg(Theme::active())
                .add_modifier(Modifier::BOLD),
        ));
    }
    Paragraph::new(Text::from(Line::from(spans)))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Theme::secondary())),
        )
}

fn footer_line<C: Clock>(app: &App<C>) -> Line<'_> {
    if let Some((message, level)) = &app.screen().status {
        return Line::from(Span::styled(
            format!("  {message}"),
            Style::default()
                .fg(notice_color(*level))
                .add_modifier(Modifier::BOLD),
        ));
    }
    let toggle = if app.tracker.is_running() {
        "space: stop"
    } else {
        "space: start"
    };
    Line::from(Span::styled(
        format!("  {toggle}   ↑/↓: select   tab: switch pane   d: delete entry   D: clear history   q: quit"),
        Style::default().fg(Theme::dim()),
    ))
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn render_confirm_popup(frame: &mut Frame, popup: &ConfirmPopup) {
    let area = centered_rect(60, 30, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            "Clear history",
            Style::default()
                .fg(Theme::warn())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            popup.message.as_str(),
            Style::default().fg(Theme::text()),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Theme::dim())),
            Span::styled(
                "Y",
                Style::default()
                    .fg(Theme::highlight())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to confirm or ", Style::default().fg(Theme::dim())),
            Span::styled(
                "N",
                Style::default()
                    .fg(Theme::highlight())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("/", Style::default().fg(Theme::dim())),
            Span::styled(
                "ESC",
                Style::default()
                    .fg(Theme::highlight())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to cancel", Style::default().fg(Theme::dim())),
        ]),
    ];

    let popup_widget = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Theme::secondary()))
                .title(" Confirm "),
        );
    frame.render_widget(popup_widget, area);
}
