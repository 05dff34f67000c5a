//! Wizard step rendering: field panel, review summary and action panel

use super::field_renderer::{draw_field, field_height, FieldView};
use crate::app::App;
use crate::platform::{BACK_SHORTCUT, NEXT_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{FieldName, FormRecord, Step};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows of the review summary, borders included
const SUMMARY_HEIGHT: u16 = 15;

/// Draw the active step with the action panel on the right
pub fn draw_step(frame: &mut Frame, area: Rect, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(22), // Action panel
        ])
        .split(area);

    draw_form(frame, main_chunks[0], app);
    draw_action_panel(frame, main_chunks[1], app);
}

fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let snapshot = app.wizard.snapshot();
    let step = snapshot.active_step;
    let focus = app.state.focus;

    let border_color = if focus.is_buttons_row(step) {
        Color::DarkGray
    } else {
        Color::Cyan
    };
    let block = Block::default()
        .title(format!(
            " Step {} of {}: {} ",
            step.index() + 1,
            Step::COUNT,
            step.label()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = Vec::new();
    if step == Step::Review {
        constraints.push(Constraint::Length(SUMMARY_HEIGHT));
    }
    constraints.extend(
        step.fields()
            .iter()
            .map(|f| Constraint::Length(field_height(*f))),
    );
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(inner);

    let mut slots = chunks.iter();
    if step == Step::Review {
        if let Some(summary_area) = slots.next() {
            draw_summary(frame, *summary_area, snapshot.record);
        }
    }

    for (idx, (field, slot)) in step.fields().iter().zip(slots).enumerate() {
        let view = FieldView {
            field: *field,
            record: snapshot.record,
            error: snapshot.errors.get(*field),
            is_active: focus.field_index == idx,
            day_cursor: focus.day_cursor,
        };
        draw_field(frame, *slot, &view);
    }
}

/// Read-only summary of the first two steps shown before submitting
fn draw_summary(frame: &mut Frame, area: Rect, record: &FormRecord) {
    let heading = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);
    let days = record
        .course
        .preferred_days
        .selected()
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let lines = vec![
        Line::from(Span::styled("Personal Information", heading)),
        summary_line("Name", &record.identity.full_name),
        summary_line("Email", &record.identity.email),
        summary_line("Phone", &record.identity.phone),
        summary_line("Date of Birth", &record.identity.date_of_birth),
        summary_line(
            "Gender",
            &record.choice_label(FieldName::Gender).unwrap_or_default(),
        ),
        Line::from(""),
        Line::from(Span::styled("Course Details", heading)),
        summary_line(
            "Course",
            &record
                .choice_label(FieldName::CourseType)
                .unwrap_or_default(),
        ),
        summary_line(
            "Study Mode",
            &record.choice_label(FieldName::StudyMode).unwrap_or_default(),
        ),
        summary_line("Days", &days),
        summary_line(
            "Time",
            &record
                .choice_label(FieldName::PreferredTime)
                .unwrap_or_default(),
        ),
        summary_line(
            "Knowledge",
            &record
                .choice_label(FieldName::PreviousKnowledge)
                .unwrap_or_default(),
        ),
    ];

    let block = Block::default()
        .title(" Registration Summary ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn summary_line(label: &str, value: &str) -> Line<'static> {
    let value = if value.is_empty() { "-" } else { value };
    Line::from(vec![
        Span::styled(format!("{label:>14}: "), Style::default().fg(Color::DarkGray)),
        Span::raw(value.to_string()),
    ])
}

fn draw_action_panel(frame: &mut Frame, area: Rect, app: &App) {
    let step = app.wizard.active_step();
    let is_focused = app.state.focus.is_buttons_row(step);

    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Next / Submit
            Constraint::Length(BUTTON_HEIGHT), // Back
            Constraint::Length(1),
            Constraint::Min(0), // Shortcut hints
        ])
        .split(inner_area);

    let (primary_label, primary_shortcut) = if step.is_last() {
        ("Submit", SUBMIT_SHORTCUT)
    } else {
        ("Next", NEXT_SHORTCUT)
    };
    render_action_button(frame, chunks[0], primary_label, is_focused, true);
    render_action_button(frame, chunks[1], "Back", false, !step.is_first());

    let key_style = Style::default().fg(Color::Cyan);
    let mut hints = vec![Line::from(vec![
        Span::styled(primary_shortcut, key_style),
        Span::raw(format!(" {}", primary_label.to_lowercase())),
    ])];
    if !step.is_first() {
        hints.push(Line::from(vec![
            Span::styled(BACK_SHORTCUT, key_style),
            Span::raw(" back"),
        ]));
    }
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );
}
