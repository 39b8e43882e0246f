use crate::domain::model::Passenger;
use crate::utils::error::Result;

/// Read-only query access to a passenger dataset, independent of where it is stored.
///
/// Implementations skip rows they cannot parse (logging them) instead of
/// failing the whole call, and report `StoreUnavailable` when the backing
/// resource itself cannot be read.
pub trait PassengerRepository: Send + Sync {
    fn list_all(&self) -> Result<Vec<Passenger>>;

    /// Fails with `NotFound` when no record carries `id`.
    fn get_by_id(&self, id: i64) -> Result<Passenger>;

    /// Present fares only; absent fares are omitted, never reported as zero.
    fn list_fare_values(&self) -> Result<Vec<f64>>;
}
