//! Partitioning a level's controls by revision membership.

use stig_model::{ControlId, Level, LevelPartition};

use crate::revision::WithdrawnSet;

/// Splits a level's controls into current-revision and legacy-only
/// sequences.
///
/// Every raw identifier is normalized and lands in exactly one of the two
/// outputs, each preserving the level's original order. Nothing is dropped:
/// concatenating the partition in source order reconstructs the normalized
/// input exactly. An empty withdrawn set sends everything to `current`.
pub fn reconcile(level: &Level, withdrawn: &WithdrawnSet) -> LevelPartition {
    let mut partition = LevelPartition::default();
    for raw in &level.controls {
        let id = ControlId::normalize(raw);
        if withdrawn.contains(&id) {
            partition.legacy.push(id);
        } else {
            partition.current.push(id);
        }
    }
    partition
}
