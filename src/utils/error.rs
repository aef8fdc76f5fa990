use thiserror::Error;

/// Failures of the external record source. Propagated unchanged inside
/// [`LeaderboardError::Fetch`].
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Record source request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Record source answered with HTTP {status}")]
    Status { status: u16 },

    #[error("Malformed record payload: {message}")]
    MalformedPayload { message: String },

    #[error("Record source IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum LeaderboardError {
    #[error("Invalid record for team '{team_id}': {reason}")]
    InvalidRecord { team_id: String, reason: String },

    #[error("Duplicate team id '{team_id}' in record set")]
    DuplicateTeamId { team_id: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Refresh failed: {cause}")]
    RefreshFailed {
        #[source]
        cause: Box<LeaderboardError>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration field '{field}' is invalid: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Data,
    Source,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl LeaderboardError {
    pub fn refresh_failed(cause: LeaderboardError) -> Self {
        LeaderboardError::RefreshFailed {
            cause: Box::new(cause),
        }
    }

    /// The innermost error, looking through `RefreshFailed` wrappers.
    pub fn root_cause(&self) -> &LeaderboardError {
        match self {
            LeaderboardError::RefreshFailed { cause } => cause.root_cause(),
            other => other,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.root_cause() {
            LeaderboardError::InvalidRecord { .. } | LeaderboardError::DuplicateTeamId { .. } => {
                ErrorCategory::Data
            }
            LeaderboardError::Fetch(_) => ErrorCategory::Source,
            LeaderboardError::ConfigError { .. }
            | LeaderboardError::ConfigValidationError { .. }
            | LeaderboardError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            _ => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // the next refresh may well succeed
            ErrorCategory::Source => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.root_cause() {
            LeaderboardError::InvalidRecord { .. } => {
                "Fix the offending team record in the store; points must be non-negative integers"
            }
            LeaderboardError::DuplicateTeamId { .. } => {
                "Remove or merge the duplicated team record in the store"
            }
            LeaderboardError::Fetch(FetchError::Http(_)) => {
                "Check that the leaderboard backend is running and reachable"
            }
            LeaderboardError::Fetch(FetchError::Status { .. }) => {
                "Check the endpoint path and the backend logs"
            }
            LeaderboardError::Fetch(FetchError::MalformedPayload { .. }) => {
                "Make sure the source returns {\"teams\": [...]} with an _id and team_name per team"
            }
            LeaderboardError::Fetch(FetchError::Io(_)) => {
                "Check that the records file exists and is readable"
            }
            LeaderboardError::ConfigError { .. }
            | LeaderboardError::ConfigValidationError { .. }
            | LeaderboardError::InvalidConfigValueError { .. } => {
                "Review the command-line flags and the TOML configuration file"
            }
            _ => "Retry the operation; if it keeps failing, run with --verbose and inspect the logs",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.root_cause() {
            LeaderboardError::InvalidRecord { team_id, reason } => {
                format!("Standings not updated: team '{}' has bad data ({})", team_id, reason)
            }
            LeaderboardError::DuplicateTeamId { team_id } => {
                format!("Standings not updated: team id '{}' appears twice", team_id)
            }
            LeaderboardError::Fetch(e) => {
                format!("Could not load the latest scores: {}", e)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LeaderboardError>;
