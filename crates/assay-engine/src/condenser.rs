//! Packing several cell lines onto one physical plate.
//!
//! Each cell line on a condensed plate gets its own block of `replicates`
//! negative-control columns in row `A`, laid out left to right, and draws
//! its replicate groups from a cursor shared with the other cell lines of
//! the batch.

use crate::assigner::{CellLineAssignment, assign_wells};
use crate::controls::ControlSet;
use crate::error::PlateMapError;
use crate::grid::{COLUMN_COUNT, Orientation, Replicates};
use crate::groups::{Group, plan_groups_reserving};
use crate::model::{CellLine, Plate, PlateCellLines, Timepoint};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CondensationPlan {
    pub cell_lines_per_plate: usize,
    /// Groups left once every batch member's negative controls are reserved.
    pub groups: Arc<[Group]>,
}

impl CondensationPlan {
    pub fn batches<'a>(&self, cell_lines: &'a [CellLine]) -> Vec<&'a [CellLine]> {
        cell_lines.chunks(self.cell_lines_per_plate).collect()
    }
}

/// Finds the largest number of cell lines that fit on one plate.
///
/// The bound is the smaller of the row-`A` budget (`12 / replicates`
/// negative-control blocks) and the group budget (`groups / items`), where
/// the group count is taken with that many control blocks reserved.
pub fn plan_condensation(
    orientation: Orientation,
    replicates: Replicates,
    items_per_cell_line: usize,
) -> Result<CondensationPlan, PlateMapError> {
    let max_by_controls = COLUMN_COUNT / replicates.get();
    for cell_lines_per_plate in (1..=max_by_controls).rev() {
        let groups = match plan_groups_reserving(orientation, replicates, cell_lines_per_plate) {
            Ok(groups) => groups,
            Err(PlateMapError::LayoutUnavailable { .. }) => continue,
            Err(e) => return Err(e),
        };
        let max_by_groups = groups
            .len()
            .checked_div(items_per_cell_line)
            .unwrap_or(max_by_controls);
        if max_by_groups.min(max_by_controls) >= cell_lines_per_plate {
            return Ok(CondensationPlan {
                cell_lines_per_plate,
                groups,
            });
        }
    }
    Err(PlateMapError::CondensationInfeasible)
}

/// Lays out one batch of cell lines on a single plate.
pub fn condense_batch(
    batch: &[CellLine],
    timepoint: Timepoint,
    test_articles: &[String],
    replicates: Replicates,
    controls: ControlSet,
    groups: &[Group],
) -> Result<Plate, PlateMapError> {
    let mut wells = vec![];
    let mut cursor = 0;
    let mut negative_control_column = 1;
    for cell_line in batch {
        let job = CellLineAssignment {
            cell_line,
            timepoint,
            test_articles,
            replicates,
            controls,
            negative_control_start_column: negative_control_column,
        };
        let (cell_wells, next) = assign_wells(&job, groups, cursor)?;
        wells.extend(cell_wells);
        cursor = next;
        negative_control_column += replicates.get();
    }
    Ok(Plate::new(
        PlateCellLines::Condensed {
            cell_lines: batch.to_vec(),
        },
        timepoint,
        replicates,
        wells,
    ))
}
