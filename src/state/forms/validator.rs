//! Per-step required-field rules
//!
//! Validation never fails with `Err`: a step is valid exactly when the
//! returned [`FieldErrors`] is empty.

use super::field::FieldName;
use super::record::FormRecord;
use super::step::Step;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());

/// Field name to message. An absent key means the field has no error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FieldName, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FieldName, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.0.contains_key(&field)
    }

    /// Remove one entry, returning whether it was present
    pub fn clear_field(&mut self, field: FieldName) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.0.keys().copied()
    }
}

/// Validate the step at `index`. Indices with no rules are always valid.
pub fn validate_step(index: usize, record: &FormRecord) -> FieldErrors {
    match Step::from_index(index) {
        Some(step) => validate(step, record),
        None => FieldErrors::new(),
    }
}

/// Validate one step's fields
pub fn validate(step: Step, record: &FormRecord) -> FieldErrors {
    let mut errors = FieldErrors::new();
    match step {
        Step::Identity => {
            let id = &record.identity;
            if id.full_name.trim().is_empty() {
                errors.insert(FieldName::FullName, "Full name is required");
            }
            if id.email.trim().is_empty() {
                errors.insert(FieldName::Email, "Email is required");
            } else if !EMAIL_RE.is_match(&id.email) {
                errors.insert(FieldName::Email, "Email is invalid");
            }
            if id.phone.trim().is_empty() {
                errors.insert(FieldName::Phone, "Phone number is required");
            }
            if id.date_of_birth.is_empty() {
                errors.insert(FieldName::DateOfBirth, "Date of birth is required");
            }
            if id.gender.is_none() {
                errors.insert(FieldName::Gender, "Gender is required");
            }
        }
        Step::Course => {
            if record.course.course_type.is_none() {
                errors.insert(FieldName::CourseType, "Please select a course");
            }
        }
        Step::Review => {
            if !record.consent.agree_to_terms {
                errors.insert(FieldName::AgreeToTerms, "You must agree to the terms");
            }
        }
    }
    errors
}
