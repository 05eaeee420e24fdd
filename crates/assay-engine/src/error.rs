use crate::grid::Orientation;
use thiserror::Error;

/// Reasons a plate map cannot be generated.
///
/// All of them are deterministic given the same request; none is worth
/// retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlateMapError {
    #[error("Replicates must be between 1 and 12 (got {0}).")]
    InvalidReplicateCount(i64),

    #[error(
        "A {orientation} layout with {replicates} replicates leaves {groups} usable group(s); at least 2 are needed."
    )]
    LayoutUnavailable {
        orientation: Orientation,
        replicates: usize,
        groups: usize,
    },

    #[error("The selected number of test articles exceeds the capacity of a 96-well plate.")]
    CapacityExceeded { requested: usize, available: usize },

    #[error("Insufficient space for negative controls in row A.")]
    InsufficientRowACapacity { start_column: usize, replicates: usize },

    #[error("Insufficient space for {placing} (group {group_index} of {available}).")]
    InsufficientGroupCapacity {
        placing: String,
        group_index: usize,
        available: usize,
    },

    #[error(
        "Cannot condense cell lines: insufficient space on plate. Each cell line requires more groups or negative control columns than available."
    )]
    CondensationInfeasible,
}

/// Invalid inputs to the dilution or reagent calculators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    #[error("Final concentration and total volume must be positive values.")]
    NonPositiveDilutionTarget,

    #[error("Stock concentration must be greater than zero.")]
    NonPositiveStock { test_article: String },

    #[error("Final concentration ({final_um} µM) cannot exceed stock concentration ({stock_um} µM).")]
    FinalExceedsStock {
        test_article: String,
        final_um: f64,
        stock_um: f64,
    },

    #[error("'{field}' must be a positive number")]
    NonPositive { field: &'static str },
}
