#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;
use titanic_api::adapters::seed::seed_sqlite;

pub const HEADER: &str =
    "PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked\n";

/// Rows with every combination the parsers care about: quoted commas, missing
/// age, zero fare, missing fare, missing embarkation port.
pub const ROWS: &str = "\
1,0,3,\"Braund, Mr. Owen Harris\",male,22,1,0,A/5 21171,7.25,,S
2,1,1,\"Cumings, Mrs. John Bradley (Florence Briggs Thayer)\",female,38,1,0,PC 17599,71.2833,C85,C
3,1,3,\"Heikkinen, Miss. Laina\",female,26,0,0,STON/O2. 3101282,7.925,,S
4,1,1,\"Futrelle, Mrs. Jacques Heath (Lily May Peel)\",female,35,1,0,113803,53.1,C123,S
6,0,3,\"Moran, Mr. James\",male,,0,0,330877,8.4583,,Q
62,1,1,\"Icard, Miss. Amelie\",female,38,0,0,113572,80,B28,
180,0,3,\"Leonard, Mr. Lionel\",male,36,0,0,LINE,0,,S
1044,0,3,\"Storey, Mr. Thomas\",male,60.5,0,0,3701,,,S
";

pub const ROW_COUNT: usize = 8;
pub const PRESENT_FARES: usize = 7;

/// A CSV file and the SQLite database seeded from it, living in one temp dir.
pub struct Fixture {
    pub dir: TempDir,
    pub csv: PathBuf,
    pub db: PathBuf,
}

impl Fixture {
    pub fn new(rows: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let csv = dir.path().join("titanic.csv");
        let db = dir.path().join("titanic.db");
        std::fs::write(&csv, format!("{HEADER}{rows}")).unwrap();
        seed_sqlite(&csv, &db).unwrap();
        Self { dir, csv, db }
    }

    pub fn standard() -> Self {
        Self::new(ROWS)
    }

    pub fn csv_path(&self) -> &str {
        self.csv.to_str().unwrap()
    }

    pub fn db_path(&self) -> &str {
        self.db.to_str().unwrap()
    }
}
