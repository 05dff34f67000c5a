//! Static reference data: course offerings and choice option lists
//!
//! Nothing here is user-editable. The renderer reads these lists to populate
//! choices; the record stores the typed value.

use super::field::FieldName;
use serde::Serialize;

/// A selectable option with a stable code and a display label
pub trait Choice: Copy + Eq + 'static {
    /// All options in display order
    const ALL: &'static [Self];

    fn code(&self) -> &'static str;
    fn label(&self) -> &'static str;

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Choice for Gender {
    const ALL: &'static [Self] = &[Self::Male, Self::Female];

    fn code(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StudyMode {
    #[default]
    Online,
    InPerson,
    Both,
}

impl Choice for StudyMode {
    const ALL: &'static [Self] = &[Self::Online, Self::InPerson, Self::Both];

    fn code(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::InPerson => "in-person",
            Self::Both => "both",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::InPerson => "Face-to-face",
            Self::Both => "Both",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    #[default]
    Morning,
    Afternoon,
    Evening,
}

impl Choice for TimeOfDay {
    const ALL: &'static [Self] = &[Self::Morning, Self::Afternoon, Self::Evening];

    fn code(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Morning => "Morning (8:00-12:00)",
            Self::Afternoon => "Afternoon (1:00-4:00)",
            Self::Evening => "Evening (5:00-8:00)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeLevel {
    #[default]
    None,
    Basic,
    Intermediate,
    Advanced,
}

impl Choice for KnowledgeLevel {
    const ALL: &'static [Self] = &[Self::None, Self::Basic, Self::Intermediate, Self::Advanced];

    fn code(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic => "basic",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::None => "No previous knowledge",
            Self::Basic => "Can read Quran without Tajweed",
            Self::Intermediate => "Know basic Tajweed rules",
            Self::Advanced => "Memorized some Surahs",
        }
    }
}

/// Course codes offered by the program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseCode {
    QuranBasics,
    Tajweed,
    Hifz,
    IslamicHistory,
    Fiqh,
    Arabic,
    Seerah,
}

/// One row of the course catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseOffering {
    pub code: CourseCode,
    pub label: &'static str,
    pub duration: &'static str,
}

impl CourseOffering {
    /// Label with duration, e.g. "Tajweed Rules (6 months)"
    pub fn display(&self) -> String {
        format!("{} ({})", self.label, self.duration)
    }
}

impl CourseCode {
    /// Catalog row for this code
    pub fn offering(self) -> CourseOffering {
        let (label, duration) = match self {
            Self::QuranBasics => ("Quran Reading Basics", "3 months"),
            Self::Tajweed => ("Tajweed Rules", "6 months"),
            Self::Hifz => ("Quran Memorization (Hifz)", "2-3 years"),
            Self::IslamicHistory => ("Islamic History", "4 months"),
            Self::Fiqh => ("Basic Fiqh", "5 months"),
            Self::Arabic => ("Arabic Language", "8 months"),
            Self::Seerah => ("Seerah of Prophet (PBUH)", "3 months"),
        };
        CourseOffering {
            code: self,
            label,
            duration,
        }
    }

    pub fn display(self) -> String {
        self.offering().display()
    }
}

/// The course catalog in display order
pub fn courses() -> impl Iterator<Item = CourseOffering> {
    CourseCode::ALL.iter().map(|code| code.offering())
}

impl Choice for CourseCode {
    const ALL: &'static [Self] = &[
        Self::QuranBasics,
        Self::Tajweed,
        Self::Hifz,
        Self::IslamicHistory,
        Self::Fiqh,
        Self::Arabic,
        Self::Seerah,
    ];

    fn code(&self) -> &'static str {
        match self {
            Self::QuranBasics => "quran_basics",
            Self::Tajweed => "tajweed",
            Self::Hifz => "hifz",
            Self::IslamicHistory => "islamic_history",
            Self::Fiqh => "fiqh",
            Self::Arabic => "arabic",
            Self::Seerah => "seerah",
        }
    }

    fn label(&self) -> &'static str {
        self.offering().label
    }
}

/// A labeled option as presented to the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub code: &'static str,
    pub label: String,
}

fn options_of<C: Choice>() -> Vec<ChoiceOption> {
    C::ALL
        .iter()
        .map(|c| ChoiceOption {
            code: c.code(),
            label: c.label().to_string(),
        })
        .collect()
}

/// Ordered options for a choice field; empty for every other field
pub fn choice_options(field: FieldName) -> Vec<ChoiceOption> {
    match field {
        FieldName::Gender => options_of::<Gender>(),
        FieldName::StudyMode => options_of::<StudyMode>(),
        FieldName::PreferredTime => options_of::<TimeOfDay>(),
        FieldName::PreviousKnowledge => options_of::<KnowledgeLevel>(),
        FieldName::CourseType => courses()
            .map(|o| ChoiceOption {
                code: o.code.code(),
                label: o.display(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_matches_codes() {
        let codes: Vec<_> = courses().map(|o| o.code).collect();
        assert_eq!(codes, CourseCode::ALL.to_vec());
    }

    #[test]
    fn test_offerings_are_keyed_by_their_own_code() {
        for code in CourseCode::ALL {
            assert_eq!(code.offering().code, *code);
            assert_eq!(code.label(), code.offering().label);
        }
        assert_eq!(CourseCode::Fiqh.offering().label, "Basic Fiqh");
        assert_eq!(CourseCode::Arabic.offering().duration, "8 months");
    }

    #[test]
    fn test_from_code() {
        assert_eq!(CourseCode::from_code("tajweed"), Some(CourseCode::Tajweed));
        assert_eq!(StudyMode::from_code("in-person"), Some(StudyMode::InPerson));
        assert_eq!(KnowledgeLevel::from_code("none"), Some(KnowledgeLevel::None));
        assert_eq!(CourseCode::from_code("astrology"), None);
        assert_eq!(Gender::from_code(""), None);
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(
            serde_json::to_string(&StudyMode::InPerson).unwrap(),
            "\"in-person\""
        );
        assert_eq!(
            serde_json::to_string(&CourseCode::IslamicHistory).unwrap(),
            "\"islamic_history\""
        );
    }

    #[test]
    fn test_choice_options_follow_display_order() {
        let modes: Vec<_> = choice_options(FieldName::StudyMode)
            .into_iter()
            .map(|o| o.label)
            .collect();
        assert_eq!(modes, vec!["Online", "Face-to-face", "Both"]);

        let courses = choice_options(FieldName::CourseType);
        assert_eq!(courses.len(), 7);
        assert_eq!(courses[1].code, "tajweed");
        assert_eq!(courses[1].label, "Tajweed Rules (6 months)");
    }

    #[test]
    fn test_non_choice_fields_have_no_options() {
        assert!(choice_options(FieldName::Email).is_empty());
        assert!(choice_options(FieldName::PreferredDays).is_empty());
    }

    #[test]
    fn test_course_display() {
        assert_eq!(CourseCode::Hifz.display(), "Quran Memorization (Hifz) (2-3 years)");
    }
}
