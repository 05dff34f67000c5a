//! JSON Lines registration sink
//!
//! Appends one JSON object per submitted registration to a local file.

use super::traits::RegistrationSink;
use crate::state::FormRecord;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// A submitted registration as delivered to the sink
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub record: FormRecord,
}

impl Registration {
    pub fn new(record: FormRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            record,
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("failed to write registration to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode registration: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Appends registrations to a `.jsonl` file, creating it on first use
#[derive(Debug, Clone)]
pub struct JsonLinesSink {
    path: PathBuf,
}

impl JsonLinesSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SubmissionError {
        SubmissionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl RegistrationSink for JsonLinesSink {
    async fn deliver(&mut self, registration: &Registration) -> Result<(), SubmissionError> {
        let mut line = serde_json::to_string(registration)?;
        line.push('\n');

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.io_error(e))?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| self.io_error(e))?;
        file.flush().await.map_err(|e| self.io_error(e))?;

        tracing::info!(id = %registration.id, path = %self.path.display(), "registration saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CourseCode, Gender};
    use pretty_assertions::assert_eq;

    fn sample_record() -> FormRecord {
        let mut record = FormRecord::default();
        record.identity.full_name = "Ali Khan".to_string();
        record.identity.email = "ali@example.com".to_string();
        record.identity.phone = "555-1234".to_string();
        record.identity.date_of_birth = "2005-01-01".to_string();
        record.identity.gender = Some(Gender::Male);
        record.course.course_type = Some(CourseCode::Tajweed);
        record.consent.agree_to_terms = true;
        record
    }

    #[tokio::test]
    async fn test_deliver_appends_one_line_per_registration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("registrations.jsonl");
        let mut sink = JsonLinesSink::new(&path);

        let first = Registration::new(sample_record());
        let second = Registration::new(sample_record());
        sink.deliver(&first).await.unwrap();
        sink.deliver(&second).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["id"], first.id.to_string());
        assert_eq!(parsed["record"]["fullName"], "Ali Khan");
        assert_eq!(parsed["record"]["courseType"], "tajweed");
        assert_eq!(parsed["record"]["preferredDays"]["saturday"], true);
    }

    #[tokio::test]
    async fn test_deliver_reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending
        let mut sink = JsonLinesSink::new(dir.path());

        let err = sink
            .deliver(&Registration::new(sample_record()))
            .await
            .unwrap_err();
        assert!(matches!(err, SubmissionError::Io { .. }));
        assert!(err.to_string().contains("failed to write registration"));
    }

    #[test]
    fn test_registration_ids_are_unique() {
        let a = Registration::new(FormRecord::default());
        let b = Registration::new(FormRecord::default());
        assert_ne!(a.id, b.id);
    }
}
