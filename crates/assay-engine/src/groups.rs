//! Replicate-group planning.
//!
//! A group is a run of `replicates` adjacent wells that always share a
//! label. Row `A` holds the negative controls: in horizontal layouts the
//! reserved row-`A` columns are skipped, in vertical layouts row `A` is left
//! out of group formation entirely.
//!
//! Group lists depend only on `(orientation, replicates, control_blocks)`,
//! so every possible list is computed once into a read-only catalog.

use crate::error::PlateMapError;
use crate::grid::{COLUMN_COUNT, Coordinate, Orientation, ROW_LABELS, Replicates};
use itertools::iproduct;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Arc;

/// Fewer groups than this cannot host even the viability controls.
pub const MIN_GROUPS: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Group {
    wells: Vec<Coordinate>,
}

impl Group {
    pub fn wells(&self) -> &[Coordinate] {
        &self.wells
    }

    pub fn len(&self) -> usize {
        self.wells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct LayoutKey {
    orientation: Orientation,
    replicates: usize,
    control_blocks: usize,
}

lazy_static! {
    static ref GROUP_CATALOG: HashMap<LayoutKey, Arc<[Group]>> = build_catalog();
}

fn build_catalog() -> HashMap<LayoutKey, Arc<[Group]>> {
    iproduct!(Orientation::ALL, 1..=COLUMN_COUNT)
        .flat_map(|(orientation, replicates)| {
            (1..=COLUMN_COUNT / replicates).map(move |control_blocks| LayoutKey {
                orientation,
                replicates,
                control_blocks,
            })
        })
        .map(|key| (key, Arc::from(compute_groups(key))))
        .collect()
}

fn compute_groups(key: LayoutKey) -> Vec<Group> {
    match key.orientation {
        Orientation::Horizontal => {
            horizontal_groups(key.replicates, key.replicates * key.control_blocks)
        }
        Orientation::Vertical => vertical_groups(key.replicates),
    }
}

fn horizontal_groups(replicates: usize, reserved_columns: usize) -> Vec<Group> {
    let mut groups = vec![];
    for row in 0..ROW_LABELS.len() {
        let first_column = if row == 0 { reserved_columns + 1 } else { 1 };
        for start in (first_column..=COLUMN_COUNT).step_by(replicates) {
            // Trailing partial windows are dropped.
            if start + replicates - 1 > COLUMN_COUNT {
                break;
            }
            let wells = (start..start + replicates)
                .filter_map(|column| Coordinate::new(row, column))
                .collect();
            groups.push(Group { wells });
        }
    }
    groups
}

fn vertical_groups(replicates: usize) -> Vec<Group> {
    let mut groups = vec![];
    for column in 1..=COLUMN_COUNT {
        for start in (1..ROW_LABELS.len()).step_by(replicates) {
            if start + replicates > ROW_LABELS.len() {
                break;
            }
            let wells = (start..start + replicates)
                .filter_map(|row| Coordinate::new(row, column))
                .collect();
            groups.push(Group { wells });
        }
    }
    groups
}

/// Usable groups for a plate with one negative-control block in row `A`.
pub fn plan_groups(
    orientation: Orientation,
    replicates: Replicates,
) -> Result<Arc<[Group]>, PlateMapError> {
    plan_groups_reserving(orientation, replicates, 1)
}

/// Usable groups when `control_blocks` negative-control blocks of
/// `replicates` columns each are reserved at the start of row `A`.
pub fn plan_groups_reserving(
    orientation: Orientation,
    replicates: Replicates,
    control_blocks: usize,
) -> Result<Arc<[Group]>, PlateMapError> {
    let control_blocks = control_blocks.max(1);
    let unavailable = |groups: usize| PlateMapError::LayoutUnavailable {
        orientation,
        replicates: replicates.get(),
        groups,
    };
    if replicates.get() * control_blocks > COLUMN_COUNT {
        return Err(unavailable(0));
    }
    let key = LayoutKey {
        orientation,
        replicates: replicates.get(),
        control_blocks,
    };
    let groups = GROUP_CATALOG
        .get(&key)
        .cloned()
        .unwrap_or_else(|| Arc::from(compute_groups(key)));
    if groups.len() < MIN_GROUPS {
        return Err(unavailable(groups.len()));
    }
    Ok(groups)
}
