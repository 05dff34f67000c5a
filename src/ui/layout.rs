//! Layout components (header, stepper, status bar)

use crate::app::App;
use crate::platform::{BACK_SHORTCUT, NEXT_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{FieldKind, Step, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const TITLE: &str = "Islamic Studies Registration";
const SUBTITLE: &str = "Learn Quran, Hadith, and Islamic Law";

/// Split the screen into header and main content, reserving the bottom
/// line for the status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the program title and the step indicator
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let snapshot = app.wizard.snapshot();
    let (submitted, active) = (snapshot.submitted, snapshot.active_step);

    let mut stepper = Vec::new();
    for step in Step::ALL {
        if step.index() > 0 {
            stepper.push(Span::styled(" ── ", Style::default().fg(Color::DarkGray)));
        }
        let (marker, style) = if submitted || step.index() < active.index() {
            ("✓".to_string(), Style::default().fg(Color::Green))
        } else if step == active {
            (
                (step.index() + 1).to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                (step.index() + 1).to_string(),
                Style::default().fg(Color::DarkGray),
            )
        };
        stepper.push(Span::styled(format!("({marker}) {}", step.label()), style));
    }

    let lines = vec![
        Line::from(Span::styled(
            TITLE,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::DarkGray))),
        Line::from(stepper),
    ];

    let header = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(header, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::raw(" ")];
    spans.push(Span::styled(
        get_view_hints(app),
        Style::default().fg(Color::Black),
    ));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view and focused field
fn get_view_hints(app: &App) -> String {
    if app.state.current_view == View::Success {
        return "n/Enter:register another student".to_string();
    }

    let step = app.wizard.active_step();
    let field_hint = match app.state.focus.field(step).map(|f| f.kind()) {
        Some(FieldKind::Text) => "type to edit",
        Some(FieldKind::Multiline) => "type to edit  Enter:newline",
        Some(FieldKind::Choice) => "←/→:choose  Bksp:clear",
        Some(FieldKind::Days) => "←/→:day  Space:toggle",
        Some(FieldKind::Flag) => "Space:check",
        None => "Enter:confirm  ←:back",
    };

    let step_hint = if step.is_last() {
        format!("{SUBMIT_SHORTCUT}:submit  {BACK_SHORTCUT}:back")
    } else if step.is_first() {
        format!("{NEXT_SHORTCUT}:next")
    } else {
        format!("{NEXT_SHORTCUT}:next  {BACK_SHORTCUT}:back")
    };

    format!("Tab:next field  {field_hint}  {step_hint}")
}
