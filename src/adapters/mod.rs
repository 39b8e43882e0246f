// Adapters layer: concrete passenger stores behind the repository port, plus the seeding tool.

pub mod csv_repo;
pub mod seed;
pub mod sqlite_repo;

pub use csv_repo::CsvRepository;
pub use sqlite_repo::SqliteRepository;

use crate::domain::ports::PassengerRepository;
use crate::utils::error::{Result, TitanicError};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Storage backend selected by the `data.source` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Csv,
    Sqlite,
}

impl FromStr for Backend {
    type Err = TitanicError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(TitanicError::InvalidConfigValueError {
                field: "data.source".to_string(),
                value: s.to_string(),
                reason: "Unsupported data source. Valid sources: csv, sqlite".to_string(),
            }),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => f.write_str("csv"),
            Self::Sqlite => f.write_str("sqlite"),
        }
    }
}

/// Opens the repository for `backend` at `location` (file path or database path).
///
/// Both variants check that their resource is reachable before returning.
pub fn open_repository(backend: Backend, location: &str) -> Result<Arc<dyn PassengerRepository>> {
    let repo: Arc<dyn PassengerRepository> = match backend {
        Backend::Csv => Arc::new(CsvRepository::new(location)?),
        Backend::Sqlite => Arc::new(SqliteRepository::open(location)?),
    };
    Ok(repo)
}
