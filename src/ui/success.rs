//! Confirmation view shown while a registration is submitted

use crate::app::App;
use crate::state::FieldName;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let record = app.wizard.record();

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(14),
            Constraint::Min(0),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(64),
            Constraint::Min(0),
        ])
        .split(vertical[1]);
    let card = horizontal[1];

    let mut lines = vec![
        Line::from(Span::styled(
            "✓ Registration Successful!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Your registration for Islamic Studies has been received."),
        Line::from("You will receive a confirmation email within 24 hours."),
        Line::from(""),
    ];
    if let Some(course) = record.choice_label(FieldName::CourseType) {
        lines.push(Line::from(vec![
            Span::styled("Course: ", Style::default().fg(Color::DarkGray)),
            Span::raw(course),
        ]));
    }
    lines.push(Line::from(Span::styled(
        format!(
            "For any questions, please call us at {}.",
            record.identity.phone
        ),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    if let Some(timer) = app.wizard.pending_reset() {
        let remaining = timer.remaining(Instant::now());
        // Round up so the countdown never shows 0 while still waiting
        let secs = remaining.as_millis().div_ceil(1000);
        lines.push(Line::from(Span::styled(
            format!("A new form opens in {secs}s"),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(vec![
        Span::styled("n", Style::default().fg(Color::Cyan)),
        Span::raw(": register another student"),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        card,
    );
}
