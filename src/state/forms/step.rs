//! Wizard steps

use super::field::FieldName;
use serde::Serialize;

/// The three sequential stages of registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(into = "usize")]
pub enum Step {
    #[default]
    Identity,
    Course,
    Review,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::Identity, Step::Course, Step::Review];
    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        match self {
            Self::Identity => 0,
            Self::Course => 1,
            Self::Review => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn is_first(self) -> bool {
        self == Self::Identity
    }

    pub fn is_last(self) -> bool {
        self == Self::Review
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Identity => "Personal Information",
            Self::Course => "Course Selection",
            Self::Review => "Review & Submit",
        }
    }

    /// Editable fields on this step, in focus order
    pub fn fields(self) -> &'static [FieldName] {
        match self {
            Self::Identity => &[
                FieldName::FullName,
                FieldName::Email,
                FieldName::Phone,
                FieldName::DateOfBirth,
                FieldName::Gender,
                FieldName::GuardianName,
                FieldName::GuardianPhone,
                FieldName::Address,
            ],
            Self::Course => &[
                FieldName::CourseType,
                FieldName::PreviousKnowledge,
                FieldName::StudyMode,
                FieldName::PreferredDays,
                FieldName::PreferredTime,
            ],
            Self::Review => &[FieldName::SpecialNeeds, FieldName::AgreeToTerms],
        }
    }
}

impl From<Step> for usize {
    fn from(step: Step) -> usize {
        step.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for step in Step::ALL {
            assert_eq!(Step::from_index(step.index()), Some(step));
        }
        assert_eq!(Step::from_index(3), None);
    }

    #[test]
    fn test_next_and_prev_are_linear() {
        assert_eq!(Step::Identity.next(), Some(Step::Course));
        assert_eq!(Step::Course.next(), Some(Step::Review));
        assert_eq!(Step::Review.next(), None);
        assert_eq!(Step::Review.prev(), Some(Step::Course));
        assert_eq!(Step::Identity.prev(), None);
    }

    #[test]
    fn test_every_field_belongs_to_one_step() {
        let total: usize = Step::ALL.iter().map(|s| s.fields().len()).sum();
        assert_eq!(total, 15);
    }

    #[test]
    fn test_serializes_as_index() {
        assert_eq!(serde_json::to_string(&Step::Review).unwrap(), "2");
    }
}
