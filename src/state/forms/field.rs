//! Form field value objects

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Every field the registration record carries.
///
/// The serialized form is the camelCase name used for error keys and for the
/// exported record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    FullName,
    Email,
    Phone,
    DateOfBirth,
    Gender,
    Address,
    GuardianName,
    GuardianPhone,
    CourseType,
    StudyMode,
    PreferredDays,
    PreferredTime,
    PreviousKnowledge,
    SpecialNeeds,
    AgreeToTerms,
}

/// How a field is edited and rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    /// Single selection from a fixed option list
    Choice,
    /// Seven weekday checkboxes
    Days,
    /// Single checkbox
    Flag,
}

impl FieldName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::DateOfBirth => "dateOfBirth",
            Self::Gender => "gender",
            Self::Address => "address",
            Self::GuardianName => "guardianName",
            Self::GuardianPhone => "guardianPhone",
            Self::CourseType => "courseType",
            Self::StudyMode => "studyMode",
            Self::PreferredDays => "preferredDays",
            Self::PreferredTime => "preferredTime",
            Self::PreviousKnowledge => "previousKnowledge",
            Self::SpecialNeeds => "specialNeeds",
            Self::AgreeToTerms => "agreeToTerms",
        }
    }

    /// Label shown next to the field
    pub fn label(&self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Email => "Email Address",
            Self::Phone => "Phone Number",
            Self::DateOfBirth => "Date of Birth (YYYY-MM-DD)",
            Self::Gender => "Gender",
            Self::Address => "Address",
            Self::GuardianName => "Guardian Name (if under 18)",
            Self::GuardianPhone => "Guardian Phone",
            Self::CourseType => "Select Course",
            Self::StudyMode => "Study Mode",
            Self::PreferredDays => "Preferred Days",
            Self::PreferredTime => "Preferred Time",
            Self::PreviousKnowledge => "Quran Knowledge Level",
            Self::SpecialNeeds => "Special Needs (if any)",
            Self::AgreeToTerms => "I agree to the terms and conditions",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Address | Self::SpecialNeeds => FieldKind::Multiline,
            Self::Gender
            | Self::CourseType
            | Self::StudyMode
            | Self::PreferredTime
            | Self::PreviousKnowledge => FieldKind::Choice,
            Self::PreferredDays => FieldKind::Days,
            Self::AgreeToTerms => FieldKind::Flag,
            _ => FieldKind::Text,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// Option code, e.g. `"tajweed"` or `"in-person"`
    Choice(String),
    Flag(bool),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn choice(code: impl Into<String>) -> Self {
        FieldValue::Choice(code.into())
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Choice(_) => "choice",
            FieldValue::Flag(_) => "flag",
        }
    }
}

/// Rejected field assignment. The record is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("field `{field}` does not accept {given} values")]
    WrongKind { field: FieldName, given: &'static str },

    #[error("`{code}` is not a valid option for `{field}`")]
    UnknownOption { field: FieldName, code: String },

    #[error("field `{0}` cannot be set directly")]
    NotSettable(FieldName),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_name_matches_as_str() {
        for name in [
            FieldName::FullName,
            FieldName::DateOfBirth,
            FieldName::GuardianPhone,
            FieldName::CourseType,
            FieldName::AgreeToTerms,
        ] {
            let json = serde_json::to_string(&name).unwrap();
            assert_eq!(json, format!("\"{}\"", name.as_str()));
        }
    }

    #[test]
    fn test_kinds() {
        assert_eq!(FieldName::Email.kind(), FieldKind::Text);
        assert_eq!(FieldName::Address.kind(), FieldKind::Multiline);
        assert_eq!(FieldName::CourseType.kind(), FieldKind::Choice);
        assert_eq!(FieldName::PreferredDays.kind(), FieldKind::Days);
        assert_eq!(FieldName::AgreeToTerms.kind(), FieldKind::Flag);
    }

    #[test]
    fn test_error_messages_name_the_field() {
        let err = FieldError::UnknownOption {
            field: FieldName::CourseType,
            code: "astrology".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "`astrology` is not a valid option for `courseType`"
        );
    }
}
