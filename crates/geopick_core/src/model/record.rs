//! Directory record model.
//!
//! # Responsibility
//! - Mirror the upstream `/users` record shape with typed access to the
//!   fields the app reads (`id`, `name`, `address.geo`).
//! - Carry every other upstream field through as opaque JSON.
//!
//! # Invariants
//! - `id` is assigned upstream and never rewritten locally.
//! - Coordinates keep their wire representation (string or number).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Upstream-assigned record identifier.
pub type RecordId = i64;

/// One person entry from the external directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub address: Address,
    /// Remaining upstream fields (`username`, `email`, `company`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Postal address; only `geo` is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub geo: Geo,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Geographic position as published upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: Coordinate,
    pub lng: Coordinate,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Geo {
    pub fn new(lat: impl Into<Coordinate>, lng: impl Into<Coordinate>) -> Self {
        Self {
            lat: lat.into(),
            lng: lng.into(),
            extra: Map::new(),
        }
    }
}

/// A coordinate that upstream may publish as a decimal string or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    /// Returns the numeric value, or `None` when a text value is not a decimal.
    ///
    /// Surrounding whitespace is ignored; an empty string has no value.
    /// Only the exact spellings `Infinity`, `+Infinity` and `-Infinity` name
    /// an infinite value; `inf`, `nan` and other keywords have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => parse_decimal(text),
        }
    }
}

fn parse_decimal(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    match trimmed {
        "" => None,
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ if trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E')) =>
        {
            trimmed.parse::<f64>().ok()
        }
        _ => None,
    }
}

impl From<f64> for Coordinate {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Coordinate {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl Record {
    /// Builds a record with only the fields the app interprets.
    ///
    /// Used by tests and by callers that synthesize records locally.
    pub fn new(
        id: RecordId,
        name: impl Into<String>,
        lat: impl Into<Coordinate>,
        lng: impl Into<Coordinate>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            address: Address {
                geo: Geo::new(lat, lng),
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    /// Shortcut to the record coordinates.
    pub fn geo(&self) -> &Geo {
        &self.address.geo
    }

    /// Header label shown for a selected record, e.g. `Leanne Graham (id: 1)`.
    pub fn display_label(&self) -> String {
        format!("{} (id: {})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::{Coordinate, Record};
    use serde_json::json;

    #[test]
    fn coordinate_parses_trimmed_decimal_text() {
        assert_eq!(Coordinate::from(" -37.3159 ").as_f64(), Some(-37.3159));
        assert_eq!(Coordinate::from(81.1496).as_f64(), Some(81.1496));
    }

    #[test]
    fn coordinate_without_numeric_value_is_none() {
        assert_eq!(Coordinate::from("").as_f64(), None);
        assert_eq!(Coordinate::from("north").as_f64(), None);
    }

    #[test]
    fn float_keywords_other_than_infinity_have_no_value() {
        for text in ["inf", "INF", "-inf", "infinity", "INFINITY", "nan", "NaN", "+nan"] {
            assert_eq!(Coordinate::from(text).as_f64(), None, "`{text}`");
        }
        assert_eq!(Coordinate::from("Infinity").as_f64(), Some(f64::INFINITY));
        assert_eq!(Coordinate::from(" +Infinity").as_f64(), Some(f64::INFINITY));
        assert_eq!(
            Coordinate::from("-Infinity").as_f64(),
            Some(f64::NEG_INFINITY)
        );
        assert_eq!(Coordinate::from("1e3").as_f64(), Some(1000.0));
    }

    #[test]
    fn unknown_fields_survive_round_trip_at_every_level() {
        let wire = json!({
            "id": 3,
            "name": "Clementine Bauch",
            "phone": "1-463-123-4447",
            "address": {
                "city": "McKenziehaven",
                "geo": { "lat": "-68.6102", "lng": "-47.0653", "alt": "9" }
            }
        });

        let record: Record = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(record.geo().extra["alt"], "9");

        let encoded = serde_json::to_value(&record).unwrap();
        assert_eq!(encoded, wire);
    }

    #[test]
    fn display_label_includes_name_and_id() {
        let record = Record::new(1, "Leanne Graham", "-37.3159", "81.1496");
        assert_eq!(record.display_label(), "Leanne Graham (id: 1)");
    }
}
