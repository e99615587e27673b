use crate::core::snapshot::RaceStateSnapshot;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PositionDelta {
    Improved,
    Worsened,
    Unchanged,
}

/// classify compares the current position of a driver with its previous position. A smaller
/// position number is an improvement. A driver without a previous position is unchanged.
pub fn classify(
    prev_positions: &HashMap<u32, u32>,
    driver_number: u32,
    cur_position: u32,
) -> PositionDelta {
    match prev_positions.get(&driver_number) {
        Some(&prev_position) if cur_position < prev_position => PositionDelta::Improved,
        Some(&prev_position) if cur_position > prev_position => PositionDelta::Worsened,
        _ => PositionDelta::Unchanged,
    }
}

/// classify_snapshot returns the position delta of every driver in the running order of the
/// snapshot.
pub fn classify_snapshot(
    prev_positions: &HashMap<u32, u32>,
    snapshot: &RaceStateSnapshot,
) -> Vec<(u32, PositionDelta)> {
    snapshot
        .positions
        .iter()
        .map(|x| {
            (
                x.driver_number,
                classify(prev_positions, x.driver_number, x.position),
            )
        })
        .collect()
}
