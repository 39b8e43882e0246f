pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{open_repository, Backend, CsvRepository, SqliteRepository};
pub use config::TomlConfig;
pub use crate::core::histogram::fare_histogram;
pub use domain::model::{FareHistogram, Passenger};
pub use domain::ports::PassengerRepository;
pub use utils::error::{Result, TitanicError};
