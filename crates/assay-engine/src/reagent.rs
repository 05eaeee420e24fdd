use crate::error::CalculationError;
use crate::round_volume;
use serde::{Deserialize, Serialize};

/// Overage applied when a request does not name one.
pub const DEFAULT_OVERAGE_PERCENT: f64 = 10.0;
/// Reagent B is used at 1:40.
pub const REAGENT_B_DILUTION_FACTOR: f64 = 40.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReagentBatch {
    pub number_of_timepoints: u32,
    pub number_of_test_articles: u32,
    pub number_of_cell_lines: u32,
    pub replicates_per_condition: u32,
    #[serde(rename = "volume_per_replicate_uL")]
    pub volume_per_replicate_ul: f64,
    pub overage_percent: f64,
}

impl ReagentBatch {
    pub fn total_conditions(&self) -> u64 {
        [
            self.number_of_timepoints,
            self.number_of_test_articles,
            self.number_of_cell_lines,
            self.replicates_per_condition,
        ]
        .iter()
        .map(|&n| u64::from(n))
        .product()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReagentRequirements {
    pub total_conditions: u64,
    #[serde(rename = "total_volume_uL")]
    pub total_volume_ul: f64,
    #[serde(rename = "reagent_b_volume_uL")]
    pub reagent_b_volume_ul: f64,
    #[serde(rename = "diluent_volume_uL")]
    pub diluent_volume_ul: f64,
}

/// Bulk reagent B and diluent needed for a batch of conditions, with
/// overage for pipetting loss.
pub fn calculate_reagent_requirements(
    batch: &ReagentBatch,
) -> Result<ReagentRequirements, CalculationError> {
    let counts = [
        ("number_of_timepoints", batch.number_of_timepoints),
        ("number_of_test_articles", batch.number_of_test_articles),
        ("number_of_cell_lines", batch.number_of_cell_lines),
        ("replicates_per_condition", batch.replicates_per_condition),
    ];
    if let Some((field, _)) = counts.iter().find(|(_, n)| *n == 0) {
        return Err(CalculationError::NonPositive { field: *field });
    }
    if batch.volume_per_replicate_ul <= 0.0 {
        return Err(CalculationError::NonPositive {
            field: "volume_per_replicate_uL",
        });
    }
    if batch.overage_percent < 0.0 {
        return Err(CalculationError::NonPositive {
            field: "overage_percent",
        });
    }

    let total_conditions = batch.total_conditions();
    let multiplier = 1.0 + batch.overage_percent / 100.0;
    let total_volume = total_conditions as f64 * batch.volume_per_replicate_ul * multiplier;
    let reagent_volume = total_volume / REAGENT_B_DILUTION_FACTOR;
    Ok(ReagentRequirements {
        total_conditions,
        total_volume_ul: round_volume(total_volume),
        reagent_b_volume_ul: round_volume(reagent_volume),
        diluent_volume_ul: round_volume(total_volume - reagent_volume),
    })
}
