//! Deterministic plate-map engine for antibody assays on 96-well plates,
//! plus the dilution and reagent volume calculators used alongside it.

pub mod assigner;
pub mod capacity;
pub mod condenser;
pub mod controls;
pub mod dilution;
pub mod error;
pub mod grid;
pub mod groups;
pub mod model;
pub mod reagent;
pub mod service;

pub use controls::{ControlSet, LIVE_DEAD_CONTROL, NEGATIVE_CONTROL, UNSTAINED_CONTROL, WellKind};
pub use dilution::{DilutionItem, DilutionResult, calculate_dilutions};
pub use error::{CalculationError, PlateMapError};
pub use grid::{COLUMN_COUNT, Coordinate, Orientation, ROW_LABELS, Replicates, WELL_COUNT};
pub use model::{Plate, PlateCellLines, Well};
pub use reagent::{ReagentBatch, ReagentRequirements, calculate_reagent_requirements};
pub use service::{ExperimentDesign, generate_plate_maps};

/// Rounds a volume to two decimals for display.
pub(crate) fn round_volume(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
