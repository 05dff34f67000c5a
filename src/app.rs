//! Application state and core logic

use crate::config::TuiConfig;
use crate::platform::COMMAND_MODIFIER;
use crate::state::{
    choice_options, AppState, FieldKind, FieldName, FieldValue, FormRecord, View, Wizard,
};
use crate::submission::{JsonLinesSink, Registration, RegistrationSink};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

/// Main application struct
pub struct App {
    /// UI state (view, focus, dialogs)
    pub state: AppState,
    /// Registration wizard owning the form data
    pub wizard: Wizard,
    /// Destination for submitted registrations
    sink: Box<dyn RegistrationSink>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App writing registrations to the configured file
    pub fn new(config: &TuiConfig) -> Self {
        let sink = JsonLinesSink::new(config.submissions_path());
        tracing::debug!(path = %sink.path().display(), "registration sink ready");
        Self::with_sink(config.reset_delay(), Box::new(sink))
    }

    pub fn with_sink(reset_delay: Duration, sink: Box<dyn RegistrationSink>) -> Self {
        Self {
            state: AppState::default(),
            wizard: Wizard::new(reset_delay),
            sink,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Advance timers. Called on every loop iteration.
    pub fn tick(&mut self, now: Instant) {
        if self.wizard.tick(now) {
            self.state.current_view = View::Wizard;
            self.state.reset_focus();
            self.state.status_message = None;
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Global quit: Ctrl+C
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return Ok(());
        }

        // Error dialog is modal
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Wizard => self.handle_wizard_key(key).await?,
            View::Success => self.handle_success_key(key),
        }

        Ok(())
    }

    /// Ctrl/Cmd shortcuts. AltGr arrives as Ctrl+Alt on Windows and is text.
    fn is_command(key: &KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::ALT) {
            return false;
        }
        key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(COMMAND_MODIFIER)
    }

    async fn handle_wizard_key(&mut self, key: KeyEvent) -> Result<()> {
        let step = self.wizard.active_step();

        if Self::is_command(&key) {
            match key.code {
                KeyCode::Char('n') => self.next_step(),
                KeyCode::Char('b') => self.previous_step(),
                KeyCode::Char('s') => self.submit().await,
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.state.focus.next_field(step);
                return Ok(());
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.state.focus.prev_field(step);
                return Ok(());
            }
            KeyCode::Esc => {
                self.previous_step();
                return Ok(());
            }
            _ => {}
        }

        let Some(field) = self.state.focus.field(step) else {
            return self.handle_buttons_key(key).await;
        };

        match field.kind() {
            FieldKind::Text => match key.code {
                KeyCode::Enter => self.primary_action().await,
                _ => self.edit_text(field, key.code),
            },
            FieldKind::Multiline => match key.code {
                KeyCode::Enter => self.edit_text(field, KeyCode::Char('\n')),
                _ => self.edit_text(field, key.code),
            },
            FieldKind::Choice => match key.code {
                KeyCode::Right | KeyCode::Char(' ') => self.cycle_choice(field, true),
                KeyCode::Left => self.cycle_choice(field, false),
                KeyCode::Backspace | KeyCode::Delete => self.clear_choice(field),
                KeyCode::Enter => self.primary_action().await,
                _ => {}
            },
            FieldKind::Days => match key.code {
                KeyCode::Right => self.state.focus.next_day(),
                KeyCode::Left => self.state.focus.prev_day(),
                KeyCode::Char(' ') => self.wizard.toggle_day(self.state.focus.day()),
                KeyCode::Enter => self.primary_action().await,
                _ => {}
            },
            FieldKind::Flag => match key.code {
                KeyCode::Char(' ') => {
                    let checked = self.wizard.record().consent.agree_to_terms;
                    self.set_field(field, FieldValue::Flag(!checked));
                }
                KeyCode::Enter => self.primary_action().await,
                _ => {}
            },
        }

        Ok(())
    }

    /// Buttons row: Left selects Back, Right/Enter triggers the primary action
    async fn handle_buttons_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter | KeyCode::Right => self.primary_action().await,
            KeyCode::Left | KeyCode::Backspace => self.previous_step(),
            _ => {}
        }
        Ok(())
    }

    fn handle_success_key(&mut self, key: KeyEvent) {
        // Edits are suppressed until the form resets
        if matches!(key.code, KeyCode::Char('n') | KeyCode::Enter) {
            self.start_over();
        }
    }

    /// Next on steps before the last, Submit on the last
    async fn primary_action(&mut self) {
        if self.wizard.active_step().is_last() {
            self.submit().await;
        } else {
            self.next_step();
        }
    }

    fn edit_text(&mut self, field: FieldName, code: KeyCode) {
        let mut text = self
            .wizard
            .record()
            .text(field)
            .unwrap_or_default()
            .to_string();
        match code {
            KeyCode::Char(c) => text.push(c),
            KeyCode::Backspace => {
                text.pop();
            }
            _ => return,
        }
        self.set_field(field, FieldValue::Text(text));
    }

    fn cycle_choice(&mut self, field: FieldName, forward: bool) {
        let options = choice_options(field);
        if options.is_empty() {
            return;
        }
        let current = self
            .wizard
            .record()
            .choice_code(field)
            .and_then(|code| options.iter().position(|o| o.code == code));
        let len = options.len();
        let idx = match (current, forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        self.set_field(field, FieldValue::choice(options[idx].code));
    }

    fn clear_choice(&mut self, field: FieldName) {
        // Only optional selections can go back to "nothing selected"
        if matches!(field, FieldName::Gender | FieldName::CourseType) {
            self.set_field(field, FieldValue::choice(""));
        }
    }

    fn set_field(&mut self, field: FieldName, value: FieldValue) {
        if let Err(e) = self.wizard.set_field(field, value) {
            // Values come from the catalog, so this is a programming error
            tracing::error!(error = %e, "rejected field update");
            self.push_error(e.to_string());
        }
    }

    fn next_step(&mut self) {
        let step = self.wizard.active_step();
        if step.is_last() {
            return;
        }
        if self.wizard.advance() {
            self.state.reset_focus();
        } else if let Some(first) = self.wizard.errors().fields().next() {
            self.state.focus.focus_field(step, first);
            self.state.status_message = Some("Please fix the highlighted fields".to_string());
        }
    }

    fn previous_step(&mut self) {
        if self.wizard.active_step().is_first() {
            return;
        }
        self.wizard.retreat();
        self.state.reset_focus();
        self.state.status_message = None;
    }

    async fn submit(&mut self) {
        if !self.wizard.active_step().is_last() {
            return;
        }
        if !self.wizard.submit() {
            // The wizard may have sent us back to an earlier step
            let step = self.wizard.active_step();
            if !step.is_last() {
                self.state.reset_focus();
                self.state.status_message = Some("Please fix the highlighted fields".to_string());
            }
            if let Some(first) = self.wizard.errors().fields().next() {
                self.state.focus.focus_field(step, first);
            }
            return;
        }

        self.state.current_view = View::Success;
        self.state.status_message = None;

        let record: FormRecord = match self.wizard.submitted_record() {
            Some(record) => record.clone(),
            None => return,
        };
        let registration = Registration::new(record);
        if let Err(e) = self.sink.deliver(&registration).await {
            tracing::warn!(error = %e, id = %registration.id, "failed to save registration");
            self.push_error(format!("Registration could not be saved:\n{e}"));
        }
    }

    fn start_over(&mut self) {
        self.wizard.start_over();
        self.state.current_view = View::Wizard;
        self.state.reset_focus();
        self.state.status_message = None;
    }
}
