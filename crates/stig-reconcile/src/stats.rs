//! Per-level statistics aggregation.

use stig_model::{ControlId, LevelStatistics, UNKNOWN_FAMILY};
use tracing::debug;

use crate::lookup::{CciLookup, ControlsLookup};

/// Aggregates coverage statistics over a level's current-revision controls.
///
/// Counts every identifier it is given. Missing catalog entries and empty
/// requirement sequences are recorded, not errors: the identifier still
/// counts toward its family totals and lands in `not_in_catalog` or simply
/// contributes zero requirements. The `unknown_family_controls` and
/// `not_in_catalog` lists preserve encounter order.
pub fn aggregate(
    current: &[ControlId],
    controls: &ControlsLookup,
    ccis: &CciLookup,
) -> LevelStatistics {
    let mut stats = LevelStatistics::default();

    for id in current {
        let requirements = ccis.get(id).len();
        let family = id.family_code().to_string();

        stats.total_controls += 1;
        stats.total_requirements += requirements;
        *stats.family_counts.entry(family.clone()).or_insert(0) += 1;
        *stats
            .family_requirement_counts
            .entry(family.clone())
            .or_insert(0) += requirements;

        if family == UNKNOWN_FAMILY {
            stats.unknown_family_controls.push(id.clone());
        }
        if !controls.contains(id) {
            stats.not_in_catalog.push(id.clone());
        }
    }

    debug!(
        controls = stats.total_controls,
        requirements = stats.total_requirements,
        families = stats.family_counts.len(),
        unknown = stats.unknown_family_controls.len(),
        uncataloged = stats.not_in_catalog.len(),
        "aggregated level statistics"
    );
    stats
}
