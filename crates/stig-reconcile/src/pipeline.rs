//! One-shot reconciliation over immutable inputs.
//!
//! The pipeline is a finite, deterministic pass: build both lookups, derive
//! the withdrawn set, partition each level, aggregate statistics, roll up
//! the family breakdown. No stage performs I/O and no stage can fail;
//! per-record problems are accumulated in the build stats and statistics.

use stig_model::{
    FamilyBreakdown, LevelMap, LevelReport, RawCciRecord, RawComparison, RawControlRecord,
};
use tracing::{info, info_span};

use crate::lookup::{
    CciLookup, ControlsLookup, LookupBuildStats, build_cci_lookup, build_controls_lookup,
};
use crate::partition::reconcile;
use crate::revision::{RevisionComparison, WithdrawnSet};
use crate::stats::aggregate;

/// Everything a reconciliation run produces before rendering.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub controls: ControlsLookup,
    pub ccis: CciLookup,
    pub controls_build: LookupBuildStats,
    pub cci_build: LookupBuildStats,
    pub comparison: RevisionComparison,
    pub withdrawn: WithdrawnSet,
    pub levels: Vec<LevelReport>,
    pub breakdown: FamilyBreakdown,
}

/// Runs the full reconciliation pass.
pub fn reconcile_run(
    levels: &LevelMap,
    control_records: &[RawControlRecord],
    cci_records: &[RawCciRecord],
    comparison: Option<&RawComparison>,
) -> RunOutcome {
    let run_span = info_span!("reconcile_run", levels = levels.len());
    let _run_guard = run_span.enter();

    let (controls, controls_build) =
        info_span!("build_controls_lookup").in_scope(|| build_controls_lookup(control_records));
    let (ccis, cci_build) =
        info_span!("build_cci_lookup").in_scope(|| build_cci_lookup(cci_records));

    let comparison = RevisionComparison::from_raw(comparison);
    let withdrawn = comparison.withdrawn_set();

    let level_reports: Vec<LevelReport> = info_span!("reconcile_levels").in_scope(|| {
        levels
            .iter()
            .map(|level| {
                let partition = reconcile(level, &withdrawn);
                let stats = aggregate(&partition.current, &controls, &ccis);
                info!(
                    level = %level.name,
                    current = partition.current.len(),
                    legacy = partition.legacy.len(),
                    requirements = stats.total_requirements,
                    "reconciled level"
                );
                LevelReport {
                    name: level.name.clone(),
                    partition,
                    stats,
                }
            })
            .collect()
    });

    let breakdown = FamilyBreakdown::from_reports(&level_reports);

    RunOutcome {
        controls,
        ccis,
        controls_build,
        cci_build,
        comparison,
        withdrawn,
        levels: level_reports,
        breakdown,
    }
}
