//! Form domain layer
//!
//! Registration record, per-step validation rules and the static catalog.

mod catalog;
mod field;
mod record;
mod step;
mod validator;

pub use catalog::choice_options;
pub use field::{FieldError, FieldKind, FieldName, FieldValue};
pub use record::{FormRecord, PreferredDays};
pub use step::Step;
pub use validator::{validate, FieldErrors};

#[cfg(test)]
pub use catalog::{CourseCode, Gender};
