//! The registration record and its per-step sub-records

use super::catalog::{Choice, CourseCode, Gender, KnowledgeLevel, StudyMode, TimeOfDay};
use super::field::{FieldError, FieldName, FieldValue};
use super::step::Step;
use super::validator::validate_step;
use chrono::Weekday;
use serde::Serialize;

/// Identity step answers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    /// Kept as typed; only presence is checked
    pub date_of_birth: String,
    pub gender: Option<Gender>,
    pub address: String,
    pub guardian_name: String,
    pub guardian_phone: String,
}

/// Weekday availability. One flag per weekday, Saturday on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreferredDays {
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
}

impl Default for PreferredDays {
    fn default() -> Self {
        Self {
            monday: false,
            tuesday: false,
            wednesday: false,
            thursday: false,
            friday: false,
            saturday: true,
            sunday: false,
        }
    }
}

impl PreferredDays {
    /// Display order
    pub const WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    fn slot(&mut self, day: Weekday) -> &mut bool {
        match day {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }

    pub fn is_selected(&self, day: Weekday) -> bool {
        match day {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    pub fn toggle(&mut self, day: Weekday) {
        let slot = self.slot(day);
        *slot = !*slot;
    }

    /// Selected weekdays in display order
    pub fn selected(&self) -> Vec<Weekday> {
        Self::WEEKDAYS
            .into_iter()
            .filter(|d| self.is_selected(*d))
            .collect()
    }
}

/// Course selection step answers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSelection {
    pub course_type: Option<CourseCode>,
    pub study_mode: StudyMode,
    pub preferred_days: PreferredDays,
    pub preferred_time: TimeOfDay,
    pub previous_knowledge: KnowledgeLevel,
}

/// Review step answers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentDetails {
    pub special_needs: String,
    pub agree_to_terms: bool,
}

/// The complete set of answers, created with defaults at wizard start
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormRecord {
    #[serde(flatten)]
    pub identity: IdentityDetails,
    #[serde(flatten)]
    pub course: CourseSelection,
    #[serde(flatten)]
    pub consent: ConsentDetails,
}

fn parse_choice<C: Choice>(field: FieldName, code: &str) -> Result<C, FieldError> {
    C::from_code(code).ok_or_else(|| FieldError::UnknownOption {
        field,
        code: code.to_string(),
    })
}

impl FormRecord {
    /// Write a single field. On error the record is unchanged.
    pub fn apply(&mut self, name: FieldName, value: FieldValue) -> Result<(), FieldError> {
        let wrong_kind = |value: &FieldValue| FieldError::WrongKind {
            field: name,
            given: value.kind_name(),
        };

        match (name, value) {
            (FieldName::PreferredDays, _) => return Err(FieldError::NotSettable(name)),
            (FieldName::AgreeToTerms, FieldValue::Flag(b)) => self.consent.agree_to_terms = b,
            (FieldName::AgreeToTerms, other) => return Err(wrong_kind(&other)),

            (FieldName::Gender, FieldValue::Choice(code)) => {
                // An empty code clears the selection
                self.identity.gender = if code.is_empty() {
                    None
                } else {
                    Some(parse_choice(name, &code)?)
                };
            }
            (FieldName::CourseType, FieldValue::Choice(code)) => {
                self.course.course_type = if code.is_empty() {
                    None
                } else {
                    Some(parse_choice(name, &code)?)
                };
            }
            (FieldName::StudyMode, FieldValue::Choice(code)) => {
                self.course.study_mode = parse_choice(name, &code)?
            }
            (FieldName::PreferredTime, FieldValue::Choice(code)) => {
                self.course.preferred_time = parse_choice(name, &code)?
            }
            (FieldName::PreviousKnowledge, FieldValue::Choice(code)) => {
                self.course.previous_knowledge = parse_choice(name, &code)?
            }
            (
                FieldName::Gender
                | FieldName::CourseType
                | FieldName::StudyMode
                | FieldName::PreferredTime
                | FieldName::PreviousKnowledge,
                other,
            ) => return Err(wrong_kind(&other)),

            (_, FieldValue::Text(text)) => match self.text_slot(name) {
                Some(slot) => *slot = text,
                None => return Err(FieldError::WrongKind { field: name, given: "text" }),
            },
            (_, other) => return Err(wrong_kind(&other)),
        }
        Ok(())
    }

    fn text_slot(&mut self, name: FieldName) -> Option<&mut String> {
        match name {
            FieldName::FullName => Some(&mut self.identity.full_name),
            FieldName::Email => Some(&mut self.identity.email),
            FieldName::Phone => Some(&mut self.identity.phone),
            FieldName::DateOfBirth => Some(&mut self.identity.date_of_birth),
            FieldName::Address => Some(&mut self.identity.address),
            FieldName::GuardianName => Some(&mut self.identity.guardian_name),
            FieldName::GuardianPhone => Some(&mut self.identity.guardian_phone),
            FieldName::SpecialNeeds => Some(&mut self.consent.special_needs),
            _ => None,
        }
    }

    /// Current value of a free-text field
    pub fn text(&self, name: FieldName) -> Option<&str> {
        let value = match name {
            FieldName::FullName => &self.identity.full_name,
            FieldName::Email => &self.identity.email,
            FieldName::Phone => &self.identity.phone,
            FieldName::DateOfBirth => &self.identity.date_of_birth,
            FieldName::Address => &self.identity.address,
            FieldName::GuardianName => &self.identity.guardian_name,
            FieldName::GuardianPhone => &self.identity.guardian_phone,
            FieldName::SpecialNeeds => &self.consent.special_needs,
            _ => return None,
        };
        Some(value)
    }

    /// Current option code of a choice field (`None` when nothing is selected)
    pub fn choice_code(&self, name: FieldName) -> Option<&'static str> {
        match name {
            FieldName::Gender => self.identity.gender.map(|g| g.code()),
            FieldName::CourseType => self.course.course_type.map(|c| c.code()),
            FieldName::StudyMode => Some(self.course.study_mode.code()),
            FieldName::PreferredTime => Some(self.course.preferred_time.code()),
            FieldName::PreviousKnowledge => Some(self.course.previous_knowledge.code()),
            _ => None,
        }
    }

    /// Display label of a choice field's current value
    pub fn choice_label(&self, name: FieldName) -> Option<String> {
        match name {
            FieldName::Gender => self.identity.gender.map(|g| g.label().to_string()),
            FieldName::CourseType => self.course.course_type.map(|c| c.display()),
            FieldName::StudyMode => Some(self.course.study_mode.label().to_string()),
            FieldName::PreferredTime => Some(self.course.preferred_time.label().to_string()),
            FieldName::PreviousKnowledge => {
                Some(self.course.previous_knowledge.label().to_string())
            }
            _ => None,
        }
    }

    /// True only when every step validates at the same time
    pub fn is_submittable(&self) -> bool {
        (0..Step::COUNT).all(|index| validate_step(index, self).is_empty())
    }
}
