use crate::grid::{Coordinate, Replicates, row_index};
use serde::{Deserialize, Serialize};

pub type CellLine = String;
pub type Timepoint = f64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Well {
    pub well_id: String,
    pub row: char,
    pub column: usize,
    pub test_article: String,
    pub cell_line: CellLine,
    pub timepoint: Timepoint,
}

impl Well {
    pub fn new(at: Coordinate, label: &str, cell_line: &str, timepoint: Timepoint) -> Self {
        Self {
            well_id: at.well_id(),
            row: at.row_label(),
            column: at.column(),
            test_article: label.to_string(),
            cell_line: cell_line.to_string(),
            timepoint,
        }
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::new(row_index(self.row)?, self.column)
    }

    fn sort_key(&self) -> (usize, usize) {
        (row_index(self.row).unwrap_or(usize::MAX), self.column)
    }
}

/// Which cell lines share a plate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlateCellLines {
    Single { cell_line: CellLine },
    Condensed { cell_lines: Vec<CellLine> },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plate {
    #[serde(flatten)]
    pub cell_lines: PlateCellLines,
    pub timepoint: Timepoint,
    pub replicates: Replicates,
    pub wells: Vec<Well>,
}

impl Plate {
    /// Builds a plate with its wells in reading order (row, then column).
    pub fn new(
        cell_lines: PlateCellLines,
        timepoint: Timepoint,
        replicates: Replicates,
        mut wells: Vec<Well>,
    ) -> Self {
        wells.sort_by_key(Well::sort_key);
        Self {
            cell_lines,
            timepoint,
            replicates,
            wells,
        }
    }

    pub fn cell_line_names(&self) -> Vec<&str> {
        match &self.cell_lines {
            PlateCellLines::Single { cell_line } => vec![cell_line.as_str()],
            PlateCellLines::Condensed { cell_lines } => {
                cell_lines.iter().map(String::as_str).collect()
            }
        }
    }

    pub fn is_condensed(&self) -> bool {
        matches!(self.cell_lines, PlateCellLines::Condensed { .. })
    }

    /// Human-readable plate title, e.g. `CL1 | 24 h`.
    pub fn title(&self) -> String {
        format!("{} | {} h", self.cell_line_names().join(" + "), self.timepoint)
    }

    pub fn well_at(&self, at: Coordinate) -> Option<&Well> {
        self.wells
            .iter()
            .find(|w| w.row == at.row_label() && w.column == at.column())
    }
}
