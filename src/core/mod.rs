pub mod attributes;
pub mod histogram;

pub use crate::domain::model::{FareHistogram, Passenger};
pub use crate::domain::ports::PassengerRepository;
pub use crate::utils::error::Result;
