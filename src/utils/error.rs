use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProberError {
    #[error("Search request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Query '{query}' rejected by Elasticsearch (HTTP {status})")]
    SearchError { query: String, status: u16 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Query catalog is not valid TOML: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Query catalog error: {message}")]
    CatalogError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Workspace error at {path}: {message}")]
    WorkspaceError { path: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Storage,
    Data,
}

impl ProberError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::SearchError { .. } => ErrorCategory::Network,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::CatalogError { .. }
            | Self::TomlError(_) => ErrorCategory::Configuration,
            Self::IoError(_) | Self::WorkspaceError { .. } => ErrorCategory::Storage,
            Self::CsvError(_) | Self::SerializationError(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路錯誤通常是暫時性的，探測迴圈會繼續
            Self::ApiError(_) | Self::SearchError { .. } => ErrorSeverity::Medium,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::CatalogError { .. }
            | Self::TomlError(_) => ErrorSeverity::High,
            Self::IoError(_) | Self::WorkspaceError { .. } => ErrorSeverity::Critical,
            Self::CsvError(_) | Self::SerializationError(_) => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(e) if e.is_timeout() => {
                "Elasticsearch did not answer before the request timeout".to_string()
            }
            Self::ApiError(e) if e.is_connect() => {
                "Could not connect to the Elasticsearch endpoint".to_string()
            }
            Self::ApiError(_) => "The search request failed".to_string(),
            Self::SearchError { query, status } => {
                format!("Elasticsearch answered query '{}' with HTTP {}", query, status)
            }
            Self::WorkspaceError { path, .. } => {
                format!("The workspace at {} is not usable", path)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::ApiError(e) if e.is_timeout() => {
                "Raise ESPROBER_REQUEST_TIMEOUT or lighten the query catalog".to_string()
            }
            Self::ApiError(_) => {
                "Check ESPROBER_API_URL and network access to the cluster, then run `esprober doctor`"
                    .to_string()
            }
            Self::SearchError { .. } => {
                "Verify the index pattern and ESPROBER_API_KEY permissions for this query".to_string()
            }
            Self::CatalogError { .. } | Self::TomlError(_) => {
                "Fix the --queries TOML file; every [[query]] needs a unique name, a path and a body"
                    .to_string()
            }
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Adjust the flag or ESPROBER_* variable named above and retry".to_string()
            }
            Self::WorkspaceError { .. } | Self::IoError(_) => {
                "Check permissions on the workspace directory, or point --workspace elsewhere"
                    .to_string()
            }
            Self::CsvError(_) | Self::SerializationError(_) => {
                "Remove the damaged output file and rerun `esprober init`".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ProberError>;
