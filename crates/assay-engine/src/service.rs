//! Plate-map generation across cell lines and timepoints.

use crate::assigner::{CellLineAssignment, assign_wells};
use crate::capacity::validate_capacity;
use crate::condenser::{condense_batch, plan_condensation};
use crate::controls::ControlSet;
use crate::error::PlateMapError;
use crate::grid::{Orientation, Replicates};
use crate::groups::plan_groups;
use crate::model::{CellLine, Plate, PlateCellLines, Timepoint};
use itertools::iproduct;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Everything needed to lay out an experiment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExperimentDesign {
    pub test_articles: Vec<String>,
    pub cell_lines: Vec<CellLine>,
    pub timepoints: Vec<Timepoint>,
    pub orientation: Orientation,
    pub replicates: Replicates,
    pub controls: ControlSet,
    pub condense_cell_lines: bool,
}

impl ExperimentDesign {
    /// One horizontal duplicate layout per cell line, all controls on.
    pub fn new(
        test_articles: Vec<String>,
        cell_lines: Vec<CellLine>,
        timepoints: Vec<Timepoint>,
    ) -> Self {
        Self {
            test_articles,
            cell_lines,
            timepoints,
            orientation: Orientation::default(),
            replicates: Replicates::default(),
            controls: ControlSet::default(),
            condense_cell_lines: false,
        }
    }

    fn items_per_cell_line(&self) -> usize {
        self.test_articles.len() + self.controls.count()
    }

    fn condenses(&self) -> bool {
        self.condense_cell_lines && self.cell_lines.len() > 1
    }
}

/// Generates every plate of an experiment.
///
/// Default mode yields one plate per (cell line, timepoint), cell line
/// outermost. Condensed mode yields one plate per (timepoint, batch of cell
/// lines), timepoint outermost. Either the whole experiment fits or an
/// error is returned; partial results are never produced.
pub fn generate_plate_maps(design: &ExperimentDesign) -> Result<Vec<Plate>, PlateMapError> {
    validate_capacity(
        design.test_articles.len(),
        design.orientation,
        design.replicates,
        design.controls.count(),
    )?;

    let plates = if design.condenses() {
        condensed_plates(design)?
    } else {
        single_cell_line_plates(design)?
    };
    debug!(
        plates = plates.len(),
        orientation = %design.orientation,
        replicates = design.replicates.get(),
        condensed = design.condenses(),
        "generated plate maps"
    );
    Ok(plates)
}

fn single_cell_line_plates(design: &ExperimentDesign) -> Result<Vec<Plate>, PlateMapError> {
    let groups = plan_groups(design.orientation, design.replicates)?;
    let pairs = iproduct!(design.cell_lines.iter(), design.timepoints.iter().copied())
        .collect::<Vec<_>>();
    pairs
        .into_par_iter()
        .map(|(cell_line, timepoint)| -> Result<Plate, PlateMapError> {
            let job = CellLineAssignment {
                cell_line,
                timepoint,
                test_articles: &design.test_articles,
                replicates: design.replicates,
                controls: design.controls,
                negative_control_start_column: 1,
            };
            let (wells, _) = assign_wells(&job, &groups, 0)?;
            Ok(Plate::new(
                PlateCellLines::Single {
                    cell_line: cell_line.clone(),
                },
                timepoint,
                design.replicates,
                wells,
            ))
        })
        .collect()
}

fn condensed_plates(design: &ExperimentDesign) -> Result<Vec<Plate>, PlateMapError> {
    let plan = plan_condensation(
        design.orientation,
        design.replicates,
        design.items_per_cell_line(),
    )?;
    debug!(
        cell_lines_per_plate = plan.cell_lines_per_plate,
        groups = plan.groups.len(),
        "condensing cell lines"
    );
    let batches = plan.batches(&design.cell_lines);
    let jobs = iproduct!(design.timepoints.iter().copied(), batches.iter()).collect::<Vec<_>>();
    jobs.into_par_iter()
        .map(|(timepoint, batch)| {
            condense_batch(
                batch,
                timepoint,
                &design.test_articles,
                design.replicates,
                design.controls,
                &plan.groups,
            )
        })
        .collect()
}
