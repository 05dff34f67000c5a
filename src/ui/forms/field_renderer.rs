//! Field rendering utilities for forms

use crate::state::{FieldKind, FieldName, FormRecord, PreferredDays};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const CURSOR: &str = "▌";

/// Everything needed to draw one field
pub struct FieldView<'a> {
    pub field: FieldName,
    pub record: &'a FormRecord,
    pub error: Option<&'a str>,
    pub is_active: bool,
    /// Highlighted weekday, only used by the preferred days field
    pub day_cursor: usize,
}

/// Rows a field occupies, borders included
pub fn field_height(field: FieldName) -> u16 {
    match field.kind() {
        FieldKind::Multiline => 5,
        _ => 3,
    }
}

/// Draw a bordered field. A validation error turns the border red and is
/// shown on the bottom border.
pub fn draw_field(frame: &mut Frame, area: Rect, view: &FieldView) {
    let border_style = if view.error.is_some() {
        Style::default().fg(Color::Red)
    } else if view.is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let content = match view.field.kind() {
        FieldKind::Text => text_content(view, false),
        FieldKind::Multiline => text_content(view, true),
        FieldKind::Choice => choice_content(view),
        FieldKind::Days => days_content(view),
        FieldKind::Flag => flag_content(view),
    };

    let title = match view.field.kind() {
        FieldKind::Flag => " Terms ".to_string(),
        _ => format!(" {} ", view.field.label()),
    };
    let mut block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);
    if let Some(error) = view.error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {error} "),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

fn value_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn text_content<'a>(view: &FieldView<'a>, multiline: bool) -> Paragraph<'a> {
    let value = view.record.text(view.field).unwrap_or_default();
    let display = if value.is_empty() && !view.is_active {
        "(empty)"
    } else {
        value
    };
    let style = value_style(view.is_active);

    if !multiline {
        let mut spans = vec![Span::styled(display, style)];
        if view.is_active {
            spans.push(Span::styled(CURSOR, Style::default().fg(Color::Cyan)));
        }
        return Paragraph::new(Line::from(spans));
    }

    // `lines()` drops a trailing empty line, which is where the cursor sits
    // right after Enter
    let mut lines: Vec<Line> = display
        .split('\n')
        .map(|l| Line::from(Span::styled(l, style)))
        .collect();
    if view.is_active {
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled(CURSOR, Style::default().fg(Color::Cyan)));
        }
    }
    Paragraph::new(lines)
}

fn choice_content<'a>(view: &FieldView<'a>) -> Paragraph<'a> {
    let label = view
        .record
        .choice_label(view.field)
        .unwrap_or_else(|| "(not selected)".to_string());
    let line = if view.is_active {
        Line::from(vec![
            Span::styled("◀ ", Style::default().fg(Color::Cyan)),
            Span::styled(label, Style::default().fg(Color::Cyan)),
            Span::styled(" ▶", Style::default().fg(Color::Cyan)),
        ])
    } else {
        Line::from(Span::styled(label, value_style(false)))
    };
    Paragraph::new(line)
}

fn days_content<'a>(view: &FieldView<'a>) -> Paragraph<'a> {
    let days = view.record.course.preferred_days;
    let mut spans = Vec::with_capacity(PreferredDays::WEEKDAYS.len() * 2);

    for (idx, day) in PreferredDays::WEEKDAYS.iter().enumerate() {
        let mark = if days.is_selected(*day) { "x" } else { " " };
        let mut style = if days.is_selected(*day) {
            Style::default().fg(Color::Green)
        } else {
            value_style(view.is_active)
        };
        if view.is_active && idx == view.day_cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(format!("[{mark}] {day}"), style));
        spans.push(Span::raw("  "));
    }

    Paragraph::new(Line::from(spans))
}

fn flag_content<'a>(view: &FieldView<'a>) -> Paragraph<'a> {
    let checked = view.record.consent.agree_to_terms;
    let mark = if checked { "[x]" } else { "[ ]" };
    let style = if checked {
        Style::default().fg(Color::Green)
    } else {
        value_style(view.is_active)
    };
    Paragraph::new(Line::from(vec![
        Span::styled(format!("{mark} "), style),
        Span::styled(view.field.label(), value_style(view.is_active)),
    ]))
}
