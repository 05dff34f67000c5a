//! Trait abstraction for the registration sink to enable mocking in tests

use super::sink::{Registration, SubmissionError};
use async_trait::async_trait;

/// Receives registrations that have already passed every step's validation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationSink: Send + Sync {
    /// Deliver one registration
    async fn deliver(&mut self, registration: &Registration) -> Result<(), SubmissionError>;
}
