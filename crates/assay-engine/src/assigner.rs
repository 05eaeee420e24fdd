//! Binds labels to wells for one cell line at one timepoint.
//!
//! Groups are consumed through an explicit cursor: the caller passes the
//! first unused group index and gets the next unused one back, so several
//! cell lines can share one plate without hidden iterator state.

use crate::controls::{ControlSet, NEGATIVE_CONTROL};
use crate::error::PlateMapError;
use crate::grid::{Coordinate, Replicates};
use crate::groups::Group;
use crate::model::{Timepoint, Well};

#[derive(Clone, Debug)]
pub struct CellLineAssignment<'a> {
    pub cell_line: &'a str,
    pub timepoint: Timepoint,
    pub test_articles: &'a [String],
    pub replicates: Replicates,
    pub controls: ControlSet,
    /// First row-`A` column (one based) of this cell line's negative controls.
    pub negative_control_start_column: usize,
}

impl CellLineAssignment<'_> {
    /// Replicate groups this assignment consumes.
    pub fn groups_needed(&self) -> usize {
        self.test_articles.len() + self.controls.count()
    }
}

/// Places negative controls, test articles and optional controls, in that
/// order, starting at group `start_group_index`.
///
/// Returns the wells and the index of the first group left unused.
pub fn assign_wells(
    job: &CellLineAssignment<'_>,
    groups: &[Group],
    start_group_index: usize,
) -> Result<(Vec<Well>, usize), PlateMapError> {
    let replicates = job.replicates.get();
    let mut wells = Vec::with_capacity(replicates * (job.groups_needed() + 1));

    let first_column = job.negative_control_start_column;
    for column in first_column..first_column + replicates {
        let at = Coordinate::new(0, column).ok_or(PlateMapError::InsufficientRowACapacity {
            start_column: job.negative_control_start_column,
            replicates,
        })?;
        wells.push(Well::new(at, NEGATIVE_CONTROL, job.cell_line, job.timepoint));
    }

    let mut cursor = start_group_index;
    let mut place = |label: &str, placing: &str, wells: &mut Vec<Well>| {
        let group = groups
            .get(cursor)
            .ok_or_else(|| PlateMapError::InsufficientGroupCapacity {
                placing: placing.to_string(),
                group_index: cursor,
                available: groups.len(),
            })?;
        wells.extend(
            group
                .wells()
                .iter()
                .map(|at| Well::new(*at, label, job.cell_line, job.timepoint)),
        );
        cursor += 1;
        Ok::<(), PlateMapError>(())
    };

    for article in job.test_articles {
        place(article, "test articles", &mut wells)?;
    }
    for label in job.controls.labels() {
        place(label, "control wells", &mut wells)?;
    }

    Ok((wells, cursor))
}
