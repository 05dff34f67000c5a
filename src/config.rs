//! Configuration handling for the TUI

use crate::state::ResetTimer;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default tracing filter when neither `RUST_LOG` nor the config sets one
pub const DEFAULT_LOG_FILTER: &str = "enrollment_tui=info";

const SUBMISSIONS_FILE: &str = "registrations.jsonl";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Seconds the success view stays up before the form resets
    pub reset_delay_secs: Option<u64>,
    /// Where submitted registrations are appended
    pub submissions_path: Option<PathBuf>,
    /// Tracing filter directive
    pub log_filter: Option<String>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("org", "enrollment", "enrollment-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    pub fn reset_delay(&self) -> Duration {
        self.reset_delay_secs
            .map(Duration::from_secs)
            .unwrap_or(ResetTimer::DEFAULT_DELAY)
    }

    /// Configured path, else the platform data dir, else the working directory
    pub fn submissions_path(&self) -> PathBuf {
        if let Some(path) = &self.submissions_path {
            return path.clone();
        }
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().join(SUBMISSIONS_FILE))
            .unwrap_or_else(|| PathBuf::from(SUBMISSIONS_FILE))
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}
