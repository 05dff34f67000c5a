//! Registration wizard controller
//!
//! Owns the form record, the active step, the error map and the pending
//! post-submission reset. Every forward transition runs the step validator
//! first; backward moves are never validated.

use super::forms::{
    validate, FieldError, FieldErrors, FieldName, FieldValue, FormRecord, Step,
};
use super::reset_timer::ResetTimer;
use chrono::Weekday;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Read-only view handed to the renderer after every operation
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot<'a> {
    pub record: &'a FormRecord,
    pub active_step: Step,
    pub errors: &'a FieldErrors,
    pub submitted: bool,
}

#[derive(Debug)]
pub struct Wizard {
    record: FormRecord,
    active_step: Step,
    errors: FieldErrors,
    submitted: bool,
    pending_reset: Option<ResetTimer>,
    reset_delay: Duration,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(ResetTimer::DEFAULT_DELAY)
    }
}

impl Wizard {
    pub fn new(reset_delay: Duration) -> Self {
        Self {
            record: FormRecord::default(),
            active_step: Step::default(),
            errors: FieldErrors::new(),
            submitted: false,
            pending_reset: None,
            reset_delay,
        }
    }

    pub fn snapshot(&self) -> WizardSnapshot<'_> {
        WizardSnapshot {
            record: &self.record,
            active_step: self.active_step,
            errors: &self.errors,
            submitted: self.submitted,
        }
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn active_step(&self) -> Step {
        self.active_step
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn pending_reset(&self) -> Option<&ResetTimer> {
        self.pending_reset.as_ref()
    }

    /// The record handed off at submission. Only available while submitted,
    /// so callers can never see an unvalidated record here.
    pub fn submitted_record(&self) -> Option<&FormRecord> {
        self.submitted.then_some(&self.record)
    }

    /// Write one field and drop that field's error, if any.
    ///
    /// Other errors stay until the next transition attempt.
    pub fn set_field(&mut self, name: FieldName, value: FieldValue) -> Result<(), FieldError> {
        self.record.apply(name, value)?;
        if self.errors.clear_field(name) {
            tracing::debug!(field = %name, "cleared field error on edit");
        }
        Ok(())
    }

    /// Flip one weekday in the preferred days. Not validated.
    pub fn toggle_day(&mut self, day: Weekday) {
        self.record.course.preferred_days.toggle(day);
    }

    /// Validate the active step and move forward if it passes.
    ///
    /// Returns whether the step changed. On the last step this is a no-op;
    /// use [`Wizard::submit`] there.
    pub fn advance(&mut self) -> bool {
        let Some(next) = self.active_step.next() else {
            tracing::warn!("advance requested on the last step");
            return false;
        };

        let errors = validate(self.active_step, &self.record);
        if errors.is_empty() {
            tracing::debug!(from = ?self.active_step, to = ?next, "advanced step");
            self.errors.clear();
            self.active_step = next;
            true
        } else {
            tracing::debug!(step = ?self.active_step, count = errors.len(), "step failed validation");
            self.errors = errors;
            false
        }
    }

    /// Move back one step without validation. No-op on the first step.
    pub fn retreat(&mut self) {
        if let Some(prev) = self.active_step.prev() {
            tracing::debug!(from = ?self.active_step, to = ?prev, "retreated step");
            self.active_step = prev;
        }
    }

    pub fn submit(&mut self) -> bool {
        self.submit_at(Instant::now())
    }

    /// Validate the review step and mark the record submitted, scheduling the
    /// reset `reset_delay` after `now`.
    ///
    /// Refused while already submitted or when not on the last step. If an
    /// earlier step no longer validates, the wizard moves back to it with
    /// that step's errors.
    pub fn submit_at(&mut self, now: Instant) -> bool {
        if self.submitted {
            tracing::warn!("submit ignored: registration already submitted");
            return false;
        }
        if !self.active_step.is_last() {
            tracing::warn!(step = ?self.active_step, "submit requested before the last step");
            return false;
        }

        let errors = validate(Step::Review, &self.record);
        if !errors.is_empty() {
            tracing::debug!(count = errors.len(), "submission failed validation");
            self.errors = errors;
            return false;
        }

        // Earlier steps may have been edited after they were passed
        if !self.record.is_submittable() {
            if let Some((step, errors)) = Step::ALL
                .into_iter()
                .map(|step| (step, validate(step, &self.record)))
                .find(|(_, errors)| !errors.is_empty())
            {
                tracing::warn!(step = ?step, count = errors.len(), "submission sent back to a failing step");
                self.active_step = step;
                self.errors = errors;
            }
            return false;
        }

        self.errors.clear();
        self.submitted = true;
        self.pending_reset = Some(ResetTimer::schedule(now, self.reset_delay));
        tracing::info!(delay_secs = self.reset_delay.as_secs(), "registration submitted");
        true
    }

    /// Fire the pending reset if it is due. Returns whether a reset happened.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending_reset {
            Some(timer) if timer.is_due(now) => {
                tracing::info!("auto-reset after submission");
                self.reset();
                true
            }
            _ => false,
        }
    }

    /// Cancel any pending reset and return to a blank first step now.
    pub fn start_over(&mut self) {
        if self.pending_reset.is_some() {
            tracing::debug!("cancelled pending reset");
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.record = FormRecord::default();
        self.active_step = Step::default();
        self.errors.clear();
        self.submitted = false;
        self.pending_reset = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{CourseCode, PreferredDays};

    fn fill_identity(wizard: &mut Wizard) {
        for (name, value) in [
            (FieldName::FullName, "Ali Khan"),
            (FieldName::Email, "ali@example.com"),
            (FieldName::Phone, "555-1234"),
            (FieldName::DateOfBirth, "2005-01-01"),
        ] {
            wizard.set_field(name, FieldValue::text(value)).unwrap();
        }
        wizard
            .set_field(FieldName::Gender, FieldValue::choice("male"))
            .unwrap();
    }

    fn wizard_on_review() -> Wizard {
        let mut wizard = Wizard::default();
        fill_identity(&mut wizard);
        assert!(wizard.advance());
        wizard
            .set_field(FieldName::CourseType, FieldValue::choice("tajweed"))
            .unwrap();
        assert!(wizard.advance());
        wizard
    }

    mod transitions {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_new_wizard_starts_blank() {
            let wizard = Wizard::default();
            assert_eq!(wizard.active_step(), Step::Identity);
            assert!(wizard.errors().is_empty());
            assert!(!wizard.is_submitted());
            assert_eq!(wizard.record(), &FormRecord::default());
        }

        #[test]
        fn test_advance_blocked_by_empty_email() {
            let mut wizard = Wizard::default();
            fill_identity(&mut wizard);
            wizard
                .set_field(FieldName::Email, FieldValue::text(""))
                .unwrap();

            assert!(!wizard.advance());
            assert_eq!(wizard.active_step(), Step::Identity);
            assert!(wizard.errors().contains(FieldName::Email));
            assert_eq!(wizard.errors().len(), 1);
        }

        #[test]
        fn test_any_single_missing_identity_field_blocks() {
            for missing in [
                FieldName::FullName,
                FieldName::Email,
                FieldName::Phone,
                FieldName::DateOfBirth,
                FieldName::Gender,
            ] {
                let mut wizard = Wizard::default();
                fill_identity(&mut wizard);
                let blank = match missing.kind() {
                    crate::state::forms::FieldKind::Choice => FieldValue::choice(""),
                    _ => FieldValue::text(""),
                };
                wizard.set_field(missing, blank).unwrap();

                assert!(!wizard.advance(), "{missing}");
                assert_eq!(wizard.active_step(), Step::Identity);
                assert!(wizard.errors().contains(missing), "{missing}");
            }
        }

        #[test]
        fn test_failed_advance_replaces_errors() {
            let mut wizard = Wizard::default();
            assert!(!wizard.advance());
            assert_eq!(wizard.errors().len(), 5);

            fill_identity(&mut wizard);
            wizard
                .set_field(FieldName::Email, FieldValue::text("not-an-email"))
                .unwrap();
            assert!(!wizard.advance());
            let fields: Vec<_> = wizard.errors().fields().collect();
            assert_eq!(fields, vec![FieldName::Email]);
            assert_eq!(wizard.errors().get(FieldName::Email), Some("Email is invalid"));
        }

        #[test]
        fn test_course_step_needs_only_course_type() {
            let mut wizard = Wizard::default();
            fill_identity(&mut wizard);
            assert!(wizard.advance());

            wizard
                .set_field(FieldName::StudyMode, FieldValue::choice("in-person"))
                .unwrap();
            wizard.toggle_day(Weekday::Sat);
            assert!(!wizard.advance());
            assert_eq!(wizard.active_step(), Step::Course);
            assert!(wizard.errors().contains(FieldName::CourseType));

            wizard
                .set_field(FieldName::CourseType, FieldValue::choice("hifz"))
                .unwrap();
            assert!(wizard.advance());
            assert_eq!(wizard.active_step(), Step::Review);
        }

        #[test]
        fn test_retreat_is_unvalidated_and_stops_at_zero() {
            let mut wizard = wizard_on_review();
            wizard
                .set_field(FieldName::FullName, FieldValue::text(""))
                .unwrap();

            wizard.retreat();
            assert_eq!(wizard.active_step(), Step::Course);
            wizard.retreat();
            assert_eq!(wizard.active_step(), Step::Identity);
            wizard.retreat();
            assert_eq!(wizard.active_step(), Step::Identity);
            assert!(wizard.errors().is_empty());
        }

        #[test]
        fn test_retreat_then_advance_round_trip() {
            let mut wizard = wizard_on_review();
            wizard.retreat();
            assert!(wizard.advance());
            assert_eq!(wizard.active_step(), Step::Review);
            assert!(wizard.errors().is_empty());
        }

        #[test]
        fn test_advance_on_last_step_is_noop() {
            let mut wizard = wizard_on_review();
            assert!(!wizard.advance());
            assert_eq!(wizard.active_step(), Step::Review);
            assert!(wizard.errors().is_empty());
        }

        #[test]
        fn test_data_survives_refused_transition() {
            let mut wizard = Wizard::default();
            wizard
                .set_field(FieldName::FullName, FieldValue::text("Ali Khan"))
                .unwrap();
            assert!(!wizard.advance());
            assert_eq!(wizard.record().identity.full_name, "Ali Khan");
        }
    }

    mod field_edits {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_edit_clears_exactly_that_error() {
            let mut wizard = Wizard::default();
            assert!(!wizard.advance());
            assert_eq!(wizard.errors().len(), 5);

            // Still invalid, but the error is cleared without re-validation
            wizard
                .set_field(FieldName::Email, FieldValue::text("bad"))
                .unwrap();
            assert!(!wizard.errors().contains(FieldName::Email));
            assert_eq!(wizard.errors().len(), 4);
            assert!(wizard.errors().contains(FieldName::FullName));
        }

        #[test]
        fn test_edit_without_error_leaves_errors_alone() {
            let mut wizard = Wizard::default();
            assert!(!wizard.advance());
            wizard
                .set_field(FieldName::Address, FieldValue::text("12 Main St"))
                .unwrap();
            assert_eq!(wizard.errors().len(), 5);
        }

        #[test]
        fn test_rejected_edit_keeps_error() {
            let mut wizard = wizard_on_review();
            wizard.retreat();
            wizard
                .set_field(FieldName::CourseType, FieldValue::choice(""))
                .unwrap();
            assert!(!wizard.advance());

            let err = wizard
                .set_field(FieldName::CourseType, FieldValue::choice("astrology"))
                .unwrap_err();
            assert!(matches!(err, FieldError::UnknownOption { .. }));
            assert!(wizard.errors().contains(FieldName::CourseType));
            assert!(wizard.record().course.course_type.is_none());
        }

        #[test]
        fn test_toggle_day_only_flips_one_day() {
            let mut wizard = Wizard::default();
            let before = wizard.record().course.preferred_days;
            wizard.toggle_day(Weekday::Tue);
            let after = wizard.record().course.preferred_days;

            for day in PreferredDays::WEEKDAYS {
                if day == Weekday::Tue {
                    assert_ne!(before.is_selected(day), after.is_selected(day));
                } else {
                    assert_eq!(before.is_selected(day), after.is_selected(day));
                }
            }
            wizard.toggle_day(Weekday::Tue);
            assert_eq!(wizard.record().course.preferred_days, before);
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_end_to_end_registration() {
            let start = Instant::now();
            let mut wizard = Wizard::default();

            fill_identity(&mut wizard);
            assert!(wizard.advance());
            assert_eq!(wizard.active_step(), Step::Course);
            assert!(wizard.errors().is_empty());

            wizard
                .set_field(FieldName::CourseType, FieldValue::choice("tajweed"))
                .unwrap();
            assert!(wizard.advance());
            assert_eq!(wizard.active_step(), Step::Review);

            assert!(!wizard.submit_at(start));
            assert!(!wizard.is_submitted());
            assert_eq!(
                wizard.errors().get(FieldName::AgreeToTerms),
                Some("You must agree to the terms")
            );
            assert_eq!(wizard.errors().len(), 1);
            assert_eq!(wizard.active_step(), Step::Review);

            wizard
                .set_field(FieldName::AgreeToTerms, FieldValue::Flag(true))
                .unwrap();
            assert!(wizard.submit_at(start));
            assert!(wizard.is_submitted());
            let record = wizard.submitted_record().unwrap();
            assert!(record.is_submittable());
            assert_eq!(record.course.course_type, Some(CourseCode::Tajweed));

            assert!(!wizard.tick(start + Duration::from_secs(4)));
            assert!(wizard.is_submitted());

            assert!(wizard.tick(start + Duration::from_secs(5)));
            assert!(!wizard.is_submitted());
            assert_eq!(wizard.active_step(), Step::Identity);
            assert_eq!(wizard.record(), &FormRecord::default());
            assert!(wizard.pending_reset().is_none());
        }

        #[test]
        fn test_unchecking_terms_blocks_resubmission() {
            let mut wizard = wizard_on_review();
            wizard
                .set_field(FieldName::AgreeToTerms, FieldValue::Flag(true))
                .unwrap();
            assert!(validate(Step::Review, wizard.record()).is_empty());

            wizard
                .set_field(FieldName::AgreeToTerms, FieldValue::Flag(false))
                .unwrap();
            assert!(!wizard.submit());
            assert!(wizard.errors().contains(FieldName::AgreeToTerms));
        }

        #[test]
        fn test_double_submit_is_refused() {
            let start = Instant::now();
            let mut wizard = wizard_on_review();
            wizard
                .set_field(FieldName::AgreeToTerms, FieldValue::Flag(true))
                .unwrap();
            assert!(wizard.submit_at(start));
            let deadline = wizard.pending_reset().unwrap().deadline();

            assert!(!wizard.submit_at(start + Duration::from_secs(3)));
            assert_eq!(wizard.pending_reset().unwrap().deadline(), deadline);
            assert!(wizard.is_submitted());
        }

        #[test]
        fn test_submit_rechecks_earlier_steps() {
            let mut wizard = wizard_on_review();
            wizard
                .set_field(FieldName::FullName, FieldValue::text(""))
                .unwrap();
            wizard
                .set_field(FieldName::CourseType, FieldValue::choice(""))
                .unwrap();
            wizard
                .set_field(FieldName::AgreeToTerms, FieldValue::Flag(true))
                .unwrap();

            assert!(!wizard.submit());
            assert!(!wizard.is_submitted());
            assert!(wizard.submitted_record().is_none());
            assert!(wizard.pending_reset().is_none());
            assert_eq!(wizard.active_step(), Step::Identity);
            assert_eq!(
                wizard.errors().get(FieldName::FullName),
                Some("Full name is required")
            );
            assert!(!wizard.errors().contains(FieldName::CourseType));
        }

        #[test]
        fn test_submitted_record_passes_every_step() {
            let mut wizard = wizard_on_review();
            wizard
                .set_field(FieldName::AgreeToTerms, FieldValue::Flag(true))
                .unwrap();
            assert!(wizard.submit());
            assert!(wizard.submitted_record().unwrap().is_submittable());
        }

        #[test]
        fn test_submit_before_last_step_is_refused() {
            let mut wizard = Wizard::default();
            wizard
                .set_field(FieldName::AgreeToTerms, FieldValue::Flag(true))
                .unwrap();
            assert!(!wizard.submit());
            assert!(!wizard.is_submitted());
            assert!(wizard.pending_reset().is_none());
        }

        #[test]
        fn test_start_over_cancels_pending_reset() {
            let start = Instant::now();
            let mut wizard = wizard_on_review();
            wizard
                .set_field(FieldName::AgreeToTerms, FieldValue::Flag(true))
                .unwrap();
            assert!(wizard.submit_at(start));

            wizard.start_over();
            assert!(wizard.pending_reset().is_none());
            assert_eq!(wizard.active_step(), Step::Identity);
            assert_eq!(wizard.record(), &FormRecord::default());

            // New progress is not wiped by the cancelled timer
            wizard
                .set_field(FieldName::FullName, FieldValue::text("Sara"))
                .unwrap();
            assert!(!wizard.tick(start + Duration::from_secs(10)));
            assert_eq!(wizard.record().identity.full_name, "Sara");
        }

        #[test]
        fn test_tick_without_pending_reset_is_noop() {
            let mut wizard = Wizard::default();
            wizard
                .set_field(FieldName::Phone, FieldValue::text("555"))
                .unwrap();
            assert!(!wizard.tick(Instant::now() + Duration::from_secs(60)));
            assert_eq!(wizard.record().identity.phone, "555");
        }

        #[test]
        fn test_custom_reset_delay() {
            let start = Instant::now();
            let mut wizard = Wizard::new(Duration::from_secs(1));
            fill_identity(&mut wizard);
            assert!(wizard.advance());
            wizard
                .set_field(FieldName::CourseType, FieldValue::choice("seerah"))
                .unwrap();
            assert!(wizard.advance());
            wizard
                .set_field(FieldName::AgreeToTerms, FieldValue::Flag(true))
                .unwrap();
            assert!(wizard.submit_at(start));
            assert!(wizard.tick(start + Duration::from_secs(1)));
        }

        #[test]
        fn test_submitted_record_hidden_until_submitted() {
            let wizard = wizard_on_review();
            assert!(wizard.submitted_record().is_none());
        }
    }

    #[test]
    fn test_snapshot_serializes_state() {
        let mut wizard = Wizard::default();
        assert!(!wizard.advance());
        let json = serde_json::to_value(wizard.snapshot()).unwrap();
        assert_eq!(json["activeStep"], 0);
        assert_eq!(json["submitted"], false);
        assert_eq!(json["errors"]["email"], "Email is required");
        assert_eq!(json["record"]["preferredDays"]["saturday"], true);
    }
}
