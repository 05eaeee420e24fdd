use crate::error::PlateMapError;
use crate::grid::{Orientation, Replicates};
use crate::groups::plan_groups;

/// Checks that `test_article_count` articles plus `controls_needed`
/// optional controls fit into the plate's replicate groups.
///
/// Negative controls are not counted; they sit in the reserved row-`A`
/// columns. Returns the number of available groups.
pub fn validate_capacity(
    test_article_count: usize,
    orientation: Orientation,
    replicates: Replicates,
    controls_needed: usize,
) -> Result<usize, PlateMapError> {
    let available = plan_groups(orientation, replicates)?.len();
    let requested = test_article_count + controls_needed;
    if requested > available {
        return Err(PlateMapError::CapacityExceeded {
            requested,
            available,
        });
    }
    Ok(available)
}
