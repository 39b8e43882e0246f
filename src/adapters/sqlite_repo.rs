use crate::domain::model::Passenger;
use crate::domain::ports::PassengerRepository;
use crate::utils::error::{Result, TitanicError};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use std::sync::{Mutex, MutexGuard};

pub const PASSENGERS_TABLE: &str = "passengers";

const SELECT_PASSENGERS: &str = "SELECT PassengerId, Survived, Pclass, Name, Sex, Age, SibSp, \
     Parch, Ticket, Fare, Cabin, Embarked FROM passengers";

/// Rows `passenger_from_row` can convert. Aggregates filter on this so a row
/// skipped by `list_all` never contributes to them.
const WELL_FORMED_ROW: &str = "typeof(Survived) = 'integer' AND Survived BETWEEN 0 AND 255 \
     AND typeof(Pclass) = 'integer' AND Pclass BETWEEN 0 AND 255 \
     AND typeof(Name) = 'text' AND typeof(Sex) = 'text' AND typeof(Ticket) = 'text' \
     AND typeof(SibSp) = 'integer' AND SibSp BETWEEN 0 AND 4294967295 \
     AND typeof(Parch) = 'integer' AND Parch BETWEEN 0 AND 4294967295 \
     AND typeof(Age) IN ('null', 'integer', 'real') \
     AND typeof(Cabin) IN ('null', 'text') \
     AND typeof(Embarked) IN ('null', 'text')";

/// Passenger repository backed by the `passengers` table of a SQLite database.
///
/// One read-only connection is opened at construction and kept for the
/// lifetime of the repository.
pub struct SqliteRepository {
    location: String,
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for SqliteRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteRepository")
            .field("location", &self.location)
            .finish()
    }
}

impl SqliteRepository {
    pub fn open(db_path: &str) -> Result<Self> {
        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| TitanicError::store_unavailable(db_path, e))?;
        Self::from_connection(conn, db_path)
    }

    /// Wraps an existing connection, checking that the `passengers` table is reachable.
    pub fn from_connection(conn: Connection, location: &str) -> Result<Self> {
        ping(&conn).map_err(|e| TitanicError::store_unavailable(location, e))?;
        tracing::info!("Using SQLite data source at {}", location);
        Ok(Self {
            location: location.to_string(),
            conn: Mutex::new(conn),
        })
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| TitanicError::store_unavailable(&self.location, "connection lock poisoned"))
    }

    fn unavailable(&self, e: rusqlite::Error) -> TitanicError {
        TitanicError::store_unavailable(&self.location, e)
    }
}

fn ping(conn: &Connection) -> std::result::Result<(), String> {
    let exists = conn
        .query_row(
            "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![PASSENGERS_TABLE],
            |row| row.get::<_, i64>(0),
        )
        .map_err(|e| e.to_string())?;
    if exists == 0 {
        return Err(format!("table '{}' does not exist", PASSENGERS_TABLE));
    }
    Ok(())
}

fn passenger_from_row(row: &Row<'_>) -> rusqlite::Result<Passenger> {
    Ok(Passenger {
        passenger_id: row.get(0)?,
        survived: row.get(1)?,
        pclass: row.get(2)?,
        name: row.get(3)?,
        sex: row.get(4)?,
        age: row.get(5)?,
        sib_sp: row.get(6)?,
        parch: row.get(7)?,
        ticket: row.get(8)?,
        fare: row.get(9)?,
        cabin: row.get(10)?,
        embarked: row.get(11)?,
    })
}

/// Errors caused by the contents of one row rather than by the store.
fn is_row_error(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::IntegralValueOutOfRange(..)
    )
}

impl PassengerRepository for SqliteRepository {
    fn list_all(&self) -> Result<Vec<Passenger>> {
        let conn = self.connection()?;
        let mut stmt = conn
            .prepare(&format!("{SELECT_PASSENGERS} ORDER BY PassengerId"))
            .map_err(|e| self.unavailable(e))?;
        let rows = stmt
            .query_map([], passenger_from_row)
            .map_err(|e| self.unavailable(e))?;

        let mut passengers = Vec::new();
        for row in rows {
            match row {
                Ok(passenger) => passengers.push(passenger),
                Err(e) if is_row_error(&e) => {
                    tracing::warn!("Skipping malformed passenger row in {}: {}", self.location, e);
                }
                Err(e) => return Err(self.unavailable(e)),
            }
        }
        tracing::debug!("Loaded {} passengers from {}", passengers.len(), self.location);
        Ok(passengers)
    }

    fn get_by_id(&self, id: i64) -> Result<Passenger> {
        let conn = self.connection()?;
        let found = conn
            .query_row(
                &format!("{SELECT_PASSENGERS} WHERE PassengerId = ?1"),
                params![id],
                passenger_from_row,
            )
            .optional();

        match found {
            Ok(Some(passenger)) => Ok(passenger),
            Ok(None) => Err(TitanicError::NotFound { id }),
            Err(e) if is_row_error(&e) => {
                tracing::warn!("Passenger {} exists but is malformed: {}", id, e);
                Err(TitanicError::NotFound { id })
            }
            Err(e) => Err(self.unavailable(e)),
        }
    }

    fn list_fare_values(&self) -> Result<Vec<f64>> {
        let conn = self.connection()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT Fare FROM passengers WHERE Fare IS NOT NULL \
                 AND typeof(Fare) IN ('integer', 'real') AND {WELL_FORMED_ROW}"
            ))
            .map_err(|e| self.unavailable(e))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, f64>(0))
            .map_err(|e| self.unavailable(e))?;

        let mut fares = Vec::new();
        for fare in rows {
            match fare {
                Ok(fare) => fares.push(fare),
                Err(e) if is_row_error(&e) => {
                    tracing::warn!("Skipping unreadable fare in {}: {}", self.location, e);
                }
                Err(e) => return Err(self.unavailable(e)),
            }
        }
        Ok(fares)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::seed::CREATE_PASSENGERS_TABLE;

    fn memory_repo(rows: &str) -> SqliteRepository {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(CREATE_PASSENGERS_TABLE).unwrap();
        conn.execute_batch(rows).unwrap();
        SqliteRepository::from_connection(conn, ":memory:").unwrap()
    }

    #[test]
    fn test_open_missing_database_fails_fast() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing.db");
        let err = SqliteRepository::open(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, TitanicError::StoreUnavailable { .. }));
        assert!(!path.exists(), "read-only open must not create the file");
    }

    #[test]
    fn test_missing_table_is_unavailable() {
        let conn = Connection::open_in_memory().unwrap();
        let err = SqliteRepository::from_connection(conn, ":memory:").unwrap_err();
        assert!(err.to_string().contains("passengers"));
    }

    #[test]
    fn test_get_by_id() {
        let repo = memory_repo(
            "INSERT INTO passengers VALUES (1, 1, 1, 'John Doe', 'male', 30, 0, 0, '12345', 100.0, 'C123', 'S');",
        );
        let p = repo.get_by_id(1).unwrap();
        assert_eq!(p.name, "John Doe");
        assert_eq!(p.age, Some(30.0));
        assert!(repo.get_by_id(2).unwrap_err().is_not_found());
    }

    #[test]
    fn test_nulls_are_absent() {
        let repo = memory_repo(
            "INSERT INTO passengers VALUES (5, 0, 3, 'Jane', 'female', NULL, 0, 0, 'T', NULL, NULL, NULL);\
             INSERT INTO passengers VALUES (6, 0, 3, 'Free', 'male', 40, 0, 0, 'LINE', 0.0, NULL, 'S');",
        );
        let p = repo.get_by_id(5).unwrap();
        assert_eq!((p.age, p.fare, p.cabin, p.embarked), (None, None, None, None));
        assert_eq!(repo.list_fare_values().unwrap(), vec![0.0]);
    }

    #[test]
    fn test_malformed_row_is_skipped() {
        let repo = memory_repo(
            "INSERT INTO passengers VALUES (1, 1, 1, 'Ok', 'male', 30, 0, 0, 'T', 5.0, NULL, 'S');\
             INSERT INTO passengers VALUES (2, 1, 1, NULL, 'male', 30, 0, 0, 'T', 6.0, NULL, 'S');",
        );
        let ids: Vec<i64> = repo.list_all().unwrap().iter().map(|p| p.passenger_id).collect();
        assert_eq!(ids, vec![1]);
        assert!(repo.get_by_id(2).unwrap_err().is_not_found());
    }

    #[test]
    fn test_malformed_rows_do_not_contribute_fares() {
        let repo = memory_repo(
            "INSERT INTO passengers VALUES (1, 1, 1, 'Ok', 'male', 30, 0, 0, 'T', 5.0, NULL, 'S');\
             INSERT INTO passengers VALUES (2, 1, 1, NULL, 'male', 30, 0, 0, 'T', 6.0, NULL, 'S');\
             INSERT INTO passengers VALUES (3, 1, 999, 'Bad Class', 'male', 30, 0, 0, 'T', 7.0, NULL, 'S');\
             INSERT INTO passengers VALUES (4, 1, 1, 'Bad Age', 'male', 'old', 0, 0, 'T', 8.0, NULL, 'S');\
             INSERT INTO passengers VALUES (5, 1, 1, 'Bad Fare', 'male', 30, 0, 0, 'T', 'n/a', NULL, 'S');",
        );

        let passengers = repo.list_all().unwrap();
        let with_fare = passengers.iter().filter(|p| p.fare.is_some()).count();
        let fares = repo.list_fare_values().unwrap();

        assert_eq!(passengers.len(), 1);
        assert_eq!(fares.len(), with_fare);
        assert_eq!(fares, vec![5.0]);
    }
}
