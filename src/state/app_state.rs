//! Application state definitions

use super::forms::{FieldName, PreferredDays, Step};
use chrono::Weekday;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Wizard,
    /// Shown while the registration is submitted, until reset
    Success,
}

/// Which part of the step form has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormFocus {
    /// Index into the active step's fields; `fields().len()` is the buttons row
    pub field_index: usize,
    /// Highlighted weekday when the preferred days field is focused
    pub day_cursor: usize,
}

impl FormFocus {
    /// Focused field on `step`, or `None` when the buttons row is focused
    pub fn field(&self, step: Step) -> Option<FieldName> {
        step.fields().get(self.field_index).copied()
    }

    pub fn is_buttons_row(&self, step: Step) -> bool {
        self.field_index >= step.fields().len()
    }

    /// Move to the next field, wrapping through the buttons row
    pub fn next_field(&mut self, step: Step) {
        let count = step.fields().len() + 1;
        self.field_index = (self.field_index + 1) % count;
    }

    pub fn prev_field(&mut self, step: Step) {
        let count = step.fields().len() + 1;
        self.field_index = if self.field_index == 0 {
            count - 1
        } else {
            (self.field_index - 1).min(count - 1)
        };
    }

    pub fn focus_field(&mut self, step: Step, field: FieldName) {
        if let Some(idx) = step.fields().iter().position(|f| *f == field) {
            self.field_index = idx;
        }
    }

    pub fn day(&self) -> Weekday {
        PreferredDays::WEEKDAYS[self.day_cursor % PreferredDays::WEEKDAYS.len()]
    }

    pub fn next_day(&mut self) {
        self.day_cursor = (self.day_cursor + 1) % PreferredDays::WEEKDAYS.len();
    }

    pub fn prev_day(&mut self) {
        let count = PreferredDays::WEEKDAYS.len();
        self.day_cursor = (self.day_cursor + count - 1) % count;
    }
}

/// Main application state, separate from the wizard's own data
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    pub focus: FormFocus,
    /// Messages shown one at a time in the error dialog
    error_queue: VecDeque<String>,
    /// Transient message in the status bar
    pub status_message: Option<String>,
}

impl AppState {
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    /// Reset focus when the step changes
    pub fn reset_focus(&mut self) {
        self.focus = FormFocus::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod form_focus {
        use super::*;

        #[test]
        fn test_default_focuses_first_field() {
            let focus = FormFocus::default();
            assert_eq!(focus.field(Step::Identity), Some(FieldName::FullName));
            assert!(!focus.is_buttons_row(Step::Identity));
        }

        #[test]
        fn test_next_field_cycles_through_buttons_row() {
            let mut focus = FormFocus::default();
            focus.next_field(Step::Review);
            assert_eq!(focus.field(Step::Review), Some(FieldName::AgreeToTerms));
            focus.next_field(Step::Review);
            assert!(focus.is_buttons_row(Step::Review));
            assert_eq!(focus.field(Step::Review), None);
            focus.next_field(Step::Review);
            assert_eq!(focus.field_index, 0);
        }

        #[test]
        fn test_prev_field_wraps_to_buttons_row() {
            let mut focus = FormFocus::default();
            focus.prev_field(Step::Course);
            assert!(focus.is_buttons_row(Step::Course));
        }

        #[test]
        fn test_focus_field_ignores_fields_from_other_steps() {
            let mut focus = FormFocus::default();
            focus.focus_field(Step::Identity, FieldName::Email);
            assert_eq!(focus.field_index, 1);
            focus.focus_field(Step::Identity, FieldName::CourseType);
            assert_eq!(focus.field_index, 1);
        }

        #[test]
        fn test_day_cursor_wraps() {
            let mut focus = FormFocus::default();
            assert_eq!(focus.day(), Weekday::Mon);
            focus.prev_day();
            assert_eq!(focus.day(), Weekday::Sun);
            focus.next_day();
            assert_eq!(focus.day(), Weekday::Mon);
        }
    }

    mod error_queue {
        use super::*;

        #[test]
        fn test_errors_are_shown_in_order() {
            let mut state = AppState::default();
            assert!(!state.has_errors());
            state.push_error("first".to_string());
            state.push_error("second".to_string());
            assert_eq!(state.current_error(), Some("first"));
            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert!(!state.has_errors());
        }
    }
}
