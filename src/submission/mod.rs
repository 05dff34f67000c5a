//! Hand-off of validated registrations to their destination

mod sink;
mod traits;

pub use sink::{JsonLinesSink, Registration, SubmissionError};
pub use traits::RegistrationSink;

#[cfg(test)]
pub use traits::MockRegistrationSink;
