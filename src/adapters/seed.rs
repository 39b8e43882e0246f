use crate::adapters::csv_repo::scan_csv;
use crate::utils::error::{Result, TitanicError};
use rusqlite::{params, Connection};
use std::path::Path;

pub const CREATE_PASSENGERS_TABLE: &str = "
    DROP TABLE IF EXISTS passengers;
    CREATE TABLE passengers (
        PassengerId INTEGER PRIMARY KEY,
        Survived INTEGER,
        Pclass INTEGER,
        Name TEXT,
        Sex TEXT,
        Age REAL,
        SibSp INTEGER,
        Parch INTEGER,
        Ticket TEXT,
        Fare REAL,
        Cabin TEXT,
        Embarked TEXT
    );";

const INSERT_PASSENGER: &str = "INSERT INTO passengers (PassengerId, Survived, Pclass, Name, Sex, \
     Age, SibSp, Parch, Ticket, Fare, Cabin, Embarked) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Rebuilds the `passengers` table of `db_path` from the CSV file at `csv_path`.
///
/// Rows are parsed exactly as `CsvRepository` parses them, so both backends
/// expose the same records afterwards. Unparsable rows and duplicate
/// identities are skipped and counted.
pub fn seed_sqlite(csv_path: impl AsRef<Path>, db_path: impl AsRef<Path>) -> Result<SeedReport> {
    let csv_path = csv_path.as_ref();
    let db_path = db_path.as_ref();

    if !csv_path.is_file() {
        return Err(TitanicError::store_unavailable(
            csv_path.display().to_string(),
            "CSV file does not exist at the provided path",
        ));
    }
    let scan = scan_csv(csv_path)?;
    let mut report = SeedReport {
        inserted: 0,
        skipped: scan.skipped,
    };

    let mut conn = Connection::open(db_path)?;
    conn.execute_batch(CREATE_PASSENGERS_TABLE)?;

    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(INSERT_PASSENGER)?;
        for p in &scan.passengers {
            let inserted = stmt.execute(params![
                p.passenger_id,
                p.survived,
                p.pclass,
                p.name,
                p.sex,
                p.age,
                p.sib_sp,
                p.parch,
                p.ticket,
                p.fare,
                p.cabin,
                p.embarked,
            ]);
            match inserted {
                Ok(_) => report.inserted += 1,
                Err(e) => {
                    tracing::warn!("Failed to insert passenger {}: {}", p.passenger_id, e);
                    report.skipped += 1;
                }
            }
        }
    }
    tx.commit()?;

    tracing::info!(
        "Seeded {} passengers into {} ({} skipped)",
        report.inserted,
        db_path.display(),
        report.skipped
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_seed_counts_inserted_and_skipped() {
        let mut csv = NamedTempFile::new().unwrap();
        csv.write_all(
            b"PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked\n\
              1,1,1,A,male,30,0,0,T1,10.0,C1,S\n\
              1,0,3,Duplicate,male,31,0,0,T1b,11.0,,S\n\
              oops,0,3,Broken,male,,0,0,T2,,,\n\
              3,0,2,C,female,,1,2,T3,,,Q\n",
        )
        .unwrap();
        csv.flush().unwrap();

        let dir = TempDir::new().unwrap();
        let db = dir.path().join("titanic.db");
        let report = seed_sqlite(csv.path(), &db).unwrap();
        assert_eq!(report, SeedReport { inserted: 2, skipped: 2 });

        let conn = Connection::open(&db).unwrap();
        let null_fares: i64 = conn
            .query_row("SELECT count(*) FROM passengers WHERE Fare IS NULL", [], |r| r.get(0))
            .unwrap();
        assert_eq!(null_fares, 1);
    }

    #[test]
    fn test_seed_replaces_existing_table() {
        let mut csv = NamedTempFile::new().unwrap();
        csv.write_all(b"PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked\n5,1,1,A,male,30,0,0,T,1.0,,S\n")
            .unwrap();
        csv.flush().unwrap();

        let dir = TempDir::new().unwrap();
        let db = dir.path().join("titanic.db");
        seed_sqlite(csv.path(), &db).unwrap();
        let report = seed_sqlite(csv.path(), &db).unwrap();
        assert_eq!(report.inserted, 1);
        assert_eq!(report.skipped, 0);
    }
}
