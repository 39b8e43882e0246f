use crate::domain::model::Passenger;
use crate::domain::ports::PassengerRepository;
use crate::utils::error::{Result, TitanicError};
use csv::StringRecord;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Column order of the flat file; the header row itself is never interpreted.
pub const CSV_COLUMNS: [&str; 12] = [
    "PassengerId",
    "Survived",
    "Pclass",
    "Name",
    "Sex",
    "Age",
    "SibSp",
    "Parch",
    "Ticket",
    "Fare",
    "Cabin",
    "Embarked",
];

/// Passenger repository backed by a delimited text file.
///
/// Holds nothing but the path: every call re-opens and re-parses the whole
/// file, so results always reflect the file's current contents.
#[derive(Debug, Clone)]
pub struct CsvRepository {
    path: PathBuf,
}

/// Outcome of one full pass over the file.
#[derive(Debug, Default)]
pub(crate) struct CsvScan {
    pub passengers: Vec<Passenger>,
    pub skipped: usize,
}

impl CsvRepository {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(TitanicError::store_unavailable(
                path.display().to_string(),
                "CSV file does not exist at the provided path",
            ));
        }
        tracing::info!("Using CSV data source at {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn scan(&self) -> Result<CsvScan> {
        let scan = scan_csv(&self.path)?;
        tracing::debug!(
            "Parsed {} passengers from {} ({} skipped)",
            scan.passengers.len(),
            self.path.display(),
            scan.skipped
        );
        Ok(scan)
    }
}

impl PassengerRepository for CsvRepository {
    fn list_all(&self) -> Result<Vec<Passenger>> {
        Ok(self.scan()?.passengers)
    }

    fn get_by_id(&self, id: i64) -> Result<Passenger> {
        // A row whose identity cannot be parsed is indistinguishable from a
        // missing row here, so both surface as NotFound.
        self.scan()?
            .passengers
            .into_iter()
            .find(|p| p.passenger_id == id)
            .ok_or(TitanicError::NotFound { id })
    }

    fn list_fare_values(&self) -> Result<Vec<f64>> {
        Ok(self
            .scan()?
            .passengers
            .into_iter()
            .filter_map(|p| p.fare)
            .collect())
    }
}

/// Reads every data row of `path`, skipping (and logging) rows that fail to parse.
pub(crate) fn scan_csv(path: &Path) -> Result<CsvScan> {
    let location = path.display().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| TitanicError::store_unavailable(location.clone(), e))?;

    let mut scan = CsvScan::default();
    for (index, result) in reader.records().enumerate() {
        // header is line 1
        let row = index as u64 + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => {
                return Err(TitanicError::store_unavailable(location, e));
            }
            Err(e) => {
                tracing::warn!("Skipping unreadable row {} in {}: {}", row, location, e);
                scan.skipped += 1;
                continue;
            }
        };

        match parse_passenger_row(&record, row) {
            Ok(passenger) => scan.passengers.push(passenger),
            Err(e) => {
                tracing::warn!("Skipping row in {}: {}", location, e);
                scan.skipped += 1;
            }
        }
    }
    Ok(scan)
}

/// Maps one positional CSV record onto a passenger.
///
/// Required cells that do not parse make the whole row malformed; counts and
/// flags are never defaulted to 0 to keep the row. Optional
/// cells are absent when empty; an unparsable optional number is also
/// treated as absent.
pub fn parse_passenger_row(record: &StringRecord, row: u64) -> Result<Passenger> {
    if record.len() != CSV_COLUMNS.len() {
        return Err(TitanicError::malformed(
            row,
            format!(
                "expected {} columns, found {}",
                CSV_COLUMNS.len(),
                record.len()
            ),
        ));
    }

    Ok(Passenger {
        passenger_id: required(record, 0, row)?,
        survived: required(record, 1, row)?,
        pclass: required(record, 2, row)?,
        name: record[3].to_string(),
        sex: record[4].to_string(),
        age: optional_number(record, 5, row),
        sib_sp: required(record, 6, row)?,
        parch: required(record, 7, row)?,
        ticket: record[8].to_string(),
        fare: optional_number(record, 9, row),
        cabin: optional_text(record, 10),
        embarked: optional_text(record, 11),
    })
}

fn required<T: FromStr>(record: &StringRecord, index: usize, row: u64) -> Result<T> {
    let cell = &record[index];
    cell.parse().map_err(|_| {
        TitanicError::malformed(row, format!("invalid {}: '{}'", CSV_COLUMNS[index], cell))
    })
}

fn optional_number(record: &StringRecord, index: usize, row: u64) -> Option<f64> {
    let cell = &record[index];
    if cell.is_empty() {
        return None;
    }
    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            tracing::warn!(
                "Row {}: treating unparsable {} '{}' as absent",
                row,
                CSV_COLUMNS[index],
                cell
            );
            None
        }
    }
}

fn optional_text(record: &StringRecord, index: usize) -> Option<String> {
    let cell = &record[index];
    (!cell.is_empty()).then(|| cell.to_string())
}
