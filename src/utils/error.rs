use thiserror::Error;

#[derive(Error, Debug)]
pub enum TitanicError {
    #[error("Backing store unavailable ({location}): {message}")]
    StoreUnavailable { location: String, message: String },

    #[error("Passenger not found: {id}")]
    NotFound { id: i64 },

    #[error("Malformed record at row {row}: {reason}")]
    MalformedRecord { row: u64, reason: String },

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl TitanicError {
    pub fn store_unavailable(location: impl Into<String>, message: impl ToString) -> Self {
        Self::StoreUnavailable {
            location: location.into(),
            message: message.to_string(),
        }
    }

    pub fn malformed(row: u64, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            row,
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Short message suitable for end users and HTTP error bodies.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::StoreUnavailable { .. } => "The passenger data store is unavailable".to_string(),
            Self::NotFound { id } => format!("Passenger {} not found", id),
            Self::MalformedRecord { row, .. } => format!("Record at row {} could not be read", row),
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => format!("Invalid configuration: {}", self),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::StoreUnavailable { .. } => {
                "Check that the data file exists and is readable, or run titanic-seed to build the database"
            }
            Self::NotFound { .. } => "Use an identity that exists in the dataset",
            Self::MalformedRecord { .. } => {
                "Check the CSV file for rows that do not follow the 12-column layout"
            }
            Self::DatabaseError(_) => "Rebuild the database with titanic-seed",
            Self::IoError(_) => "Check file permissions and paths",
            Self::SerializationError(_) => "Report this as a bug",
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Fix the configuration file or command-line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, TitanicError>;
