#[cfg(feature = "cli")]
pub mod cli;

pub mod catalog;
pub mod env;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_url, Validate,
};

pub const DEFAULT_API_URL: &str =
    "https://overview-elastic-cloud-com.es.us-east-1.aws.found.io:443";
pub const DEFAULT_QUERY_INTERVAL: f64 = 60.0;
pub const DEFAULT_REQUEST_TIMEOUT: f64 = 120.0;
pub const DEFAULT_WORKSPACE: &str = "./esprober-data";

pub const CSV_FILENAME: &str = "esprober.csv";
pub const LOG_FILENAME: &str = "esprober.log";

/// Fully resolved configuration: flags > ESPROBER_* variables > defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProberConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    /// Seconds slept after every probe.
    pub query_interval: f64,
    /// Total run length in seconds; `None` runs until interrupted.
    pub test_duration: Option<f64>,
    /// Per-request timeout in seconds.
    pub request_timeout: f64,
    pub workspace: PathBuf,
    pub csv_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub queries_file: Option<PathBuf>,
    pub verbose: bool,
    pub monitor: bool,
}

impl ProberConfig {
    pub fn csv_path(&self) -> PathBuf {
        self.csv_file
            .clone()
            .unwrap_or_else(|| self.workspace.join(CSV_FILENAME))
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.workspace.join(LOG_FILENAME))
    }
}

impl Validate for ProberConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_url", &self.api_url)?;

        if let Some(key) = &self.api_key {
            validate_non_empty_string("api_key", key)?;
        }

        validate_range("query_interval", self.query_interval, 1.0, 86_400.0)?;
        validate_range("request_timeout", self.request_timeout, 1.0, 3_600.0)?;

        if let Some(duration) = self.test_duration {
            validate_range("test_duration", duration, 1.0, 30.0 * 86_400.0)?;
        }

        validate_path("workspace", &self.workspace.to_string_lossy())?;

        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}
