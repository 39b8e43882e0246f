use serde::{Deserialize, Serialize};

/// One passenger row. Optional attributes are `None` when the source cell is
/// empty (CSV) or NULL (SQLite); zero is a present value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    #[serde(rename = "passengerId")]
    pub passenger_id: i64,
    pub survived: u8,
    #[serde(rename = "pClass")]
    pub pclass: u8,
    pub name: String,
    pub sex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    #[serde(rename = "sibSp")]
    pub sib_sp: u32,
    pub parch: u32,
    pub ticket: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fare: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cabin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embarked: Option<String>,
}

/// Decile histogram of fares: `percentiles[i]` labels the bin whose size is `counts[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FareHistogram {
    pub percentiles: Vec<String>,
    pub counts: Vec<usize>,
}

impl FareHistogram {
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Passenger {
        Passenger {
            passenger_id: 1,
            survived: 0,
            pclass: 3,
            name: "Braund, Mr. Owen Harris".to_string(),
            sex: "male".to_string(),
            age: Some(22.0),
            sib_sp: 1,
            parch: 0,
            ticket: "A/5 21171".to_string(),
            fare: Some(7.25),
            cabin: None,
            embarked: Some("S".to_string()),
        }
    }

    #[test]
    fn test_passenger_json_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["passengerId"], 1);
        assert_eq!(value["pClass"], 3);
        assert_eq!(value["sibSp"], 1);
        assert_eq!(value["fare"], 7.25);
        assert!(value.get("cabin").is_none(), "absent cabin is omitted");
    }

    #[test]
    fn test_passenger_json_keeps_zero_fare() {
        let mut passenger = sample();
        passenger.fare = Some(0.0);
        let value = serde_json::to_value(&passenger).unwrap();
        assert_eq!(value["fare"], 0.0);

        let back: Passenger = serde_json::from_value(value).unwrap();
        assert_eq!(back, passenger);
    }
}
