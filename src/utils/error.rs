use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Rate limit hit for {team}")]
    RateLimited { team: String, retry_after_secs: u64 },

    #[error("NHL API returned {status} for {team}")]
    HttpStatus { team: String, status: u16 },

    #[error("Cannot write output file '{path}': it is locked or read-only")]
    OutputLocked { path: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScrapeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScrapeError::ApiError(_)
            | ScrapeError::RateLimited { .. }
            | ScrapeError::HttpStatus { .. } => ErrorCategory::Network,
            ScrapeError::CsvError(_)
            | ScrapeError::SerializationError(_)
            | ScrapeError::ProcessingError { .. } => ErrorCategory::Data,
            ScrapeError::TomlError(_)
            | ScrapeError::ConfigValidationError { .. }
            | ScrapeError::InvalidConfigValueError { .. }
            | ScrapeError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ScrapeError::IoError(_) | ScrapeError::OutputLocked { .. } => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ScrapeError::RateLimited { .. } => ErrorSeverity::Low,
            ScrapeError::ApiError(_)
            | ScrapeError::HttpStatus { .. }
            | ScrapeError::OutputLocked { .. } => ErrorSeverity::Medium,
            ScrapeError::CsvError(_)
            | ScrapeError::SerializationError(_)
            | ScrapeError::ProcessingError { .. } => ErrorSeverity::High,
            ScrapeError::IoError(_)
            | ScrapeError::TomlError(_)
            | ScrapeError::ConfigValidationError { .. }
            | ScrapeError::InvalidConfigValueError { .. }
            | ScrapeError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Whether the next refresh cycle has a reasonable chance of succeeding.
    pub fn is_transient(&self) -> bool {
        matches!(self.category(), ErrorCategory::Network)
            || matches!(self, ScrapeError::OutputLocked { .. })
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ScrapeError::ApiError(_) => {
                "Check your network connection and that the NHL API base URL is reachable".to_string()
            }
            ScrapeError::RateLimited {
                retry_after_secs, ..
            } => format!(
                "Wait {}s or raise --rate-limit-wait-seconds / lower --concurrent-requests",
                retry_after_secs
            ),
            ScrapeError::HttpStatus { status, .. } if *status == 404 => {
                "Check that the team abbreviation is a current NHL club".to_string()
            }
            ScrapeError::HttpStatus { .. } => {
                "The NHL API may be temporarily unavailable; the next refresh will retry".to_string()
            }
            ScrapeError::OutputLocked { .. } => {
                "Close the CSV file (e.g. in a spreadsheet application) so it can be overwritten"
                    .to_string()
            }
            ScrapeError::CsvError(_) | ScrapeError::SerializationError(_) => {
                "The API response format may have changed; run with --verbose for details"
                    .to_string()
            }
            ScrapeError::ProcessingError { .. } => {
                "Run with --verbose to inspect the rows being processed".to_string()
            }
            ScrapeError::IoError(_) => {
                "Check that the output directory exists and is writable".to_string()
            }
            ScrapeError::TomlError(_) => "Check the configuration file for TOML syntax errors".to_string(),
            ScrapeError::ConfigValidationError { field, .. }
            | ScrapeError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in your flags or config file", field)
            }
            ScrapeError::MissingConfigError { field } => {
                format!("Provide a value for '{}'", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not fetch NHL data: {}", self),
            ErrorCategory::Data => format!("Could not process NHL data: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Storage => format!("Could not save the leaderboard: {}", self),
        }
    }

    /// Process exit code for a failure of this severity.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
