//! The fixed 96-well microplate grid.
//!
//! Rows are `A`..`H`, columns are `1`..`12`. Everything here is immutable
//! and shared by the whole process.

use crate::error::PlateMapError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const ROW_LABELS: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];
pub const COLUMN_COUNT: usize = 12;
pub const WELL_COUNT: usize = ROW_LABELS.len() * COLUMN_COUNT;

lazy_static! {
    static ref WELL_ID: Regex =
        Regex::new(r"^([A-Ha-h])(1[0-2]|[1-9])$").expect("valid well id regex");
}

/// A single well position on the plate. Serialized as its well ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    row: usize,
    column: usize,
}

impl Coordinate {
    /// `row_index` is zero based (`0` is row `A`), `column` is one based.
    pub fn new(row_index: usize, column: usize) -> Option<Self> {
        if row_index < ROW_LABELS.len() && (1..=COLUMN_COUNT).contains(&column) {
            Some(Self {
                row: row_index,
                column,
            })
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn row_index(&self) -> usize {
        self.row
    }

    #[inline(always)]
    pub fn row_label(&self) -> char {
        ROW_LABELS[self.row]
    }

    #[inline(always)]
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn well_id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_label(), self.column)
    }
}

impl FromStr for Coordinate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = WELL_ID
            .captures(s.trim())
            .ok_or_else(|| format!("'{s}' is not a well on a 96-well plate"))?;
        let row = caps[1]
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .and_then(|c| ROW_LABELS.iter().position(|&r| r == c))
            .ok_or_else(|| format!("'{s}' has an unknown row"))?;
        let column = caps[2]
            .parse::<usize>()
            .map_err(|e| format!("'{s}' has an invalid column: {e}"))?;
        Coordinate::new(row, column).ok_or_else(|| format!("'{s}' lies outside the plate"))
    }
}

impl Serialize for Coordinate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Returns the zero based index of a row label.
pub fn row_index(label: char) -> Option<usize> {
    ROW_LABELS
        .iter()
        .position(|&r| r == label.to_ascii_uppercase())
}

/// Direction in which replicate groups run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Some(Self::Horizontal),
            "vertical" => Some(Self::Vertical),
            _ => None,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of wells that always receive the same label together.
///
/// Always within `1..=12`; a replicate group can never be wider than a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Replicates(usize);

impl Replicates {
    pub const MAX: usize = COLUMN_COUNT;

    pub fn new(value: i64) -> Result<Self, PlateMapError> {
        if value < 1 || value > Self::MAX as i64 {
            return Err(PlateMapError::InvalidReplicateCount(value));
        }
        Ok(Self(value as usize))
    }

    #[inline(always)]
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for Replicates {
    fn default() -> Self {
        Self(2)
    }
}

impl<'de> Deserialize<'de> for Replicates {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        Replicates::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_bounds() {
        assert!(Coordinate::new(0, 1).is_some());
        assert!(Coordinate::new(7, 12).is_some());
        assert!(Coordinate::new(8, 1).is_none());
        assert!(Coordinate::new(0, 0).is_none());
        assert!(Coordinate::new(0, 13).is_none());
    }

    #[test]
    fn test_well_id_parse_and_display() {
        let well: Coordinate = "h12".parse().unwrap();
        assert_eq!(well.row_label(), 'H');
        assert_eq!(well.column(), 12);
        assert_eq!(well.well_id(), "H12");
        assert_eq!("A1".parse::<Coordinate>().unwrap(), Coordinate::new(0, 1).unwrap());
        assert!("I1".parse::<Coordinate>().is_err());
        assert!("A13".parse::<Coordinate>().is_err());
        assert!("A0".parse::<Coordinate>().is_err());
    }

    #[test]
    fn test_coordinate_serde_uses_well_id() {
        let well = Coordinate::new(7, 12).unwrap();
        assert_eq!(serde_json::to_value(well).unwrap(), serde_json::json!("H12"));
        let back: Coordinate = serde_json::from_value(serde_json::json!("b3")).unwrap();
        assert_eq!(back, Coordinate::new(1, 3).unwrap());
        assert!(serde_json::from_value::<Coordinate>(serde_json::json!("I1")).is_err());
        let raw = serde_json::json!({"row": 9, "column": 1});
        assert!(serde_json::from_value::<Coordinate>(raw).is_err());
    }

    #[test]
    fn test_replicates_range() {
        assert_eq!(Replicates::new(0), Err(PlateMapError::InvalidReplicateCount(0)));
        assert_eq!(Replicates::new(-3), Err(PlateMapError::InvalidReplicateCount(-3)));
        assert_eq!(Replicates::new(13), Err(PlateMapError::InvalidReplicateCount(13)));
        assert_eq!(Replicates::new(12).unwrap().get(), 12);
        assert_eq!(Replicates::default().get(), 2);
    }

    #[test]
    fn test_orientation_parse() {
        assert_eq!(Orientation::parse(" Vertical "), Some(Orientation::Vertical));
        assert_eq!(Orientation::parse("diagonal"), None);
        let json = serde_json::to_string(&Orientation::Horizontal).unwrap();
        assert_eq!(json, "\"horizontal\"");
    }
}
