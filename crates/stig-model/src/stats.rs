//! Coverage statistics aggregated per level and rolled up per family.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::control_id::ControlId;
use crate::family;
use crate::report::LevelReport;

/// Coverage statistics for one level's current-revision controls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelStatistics {
    /// Number of current-revision controls in the level.
    pub total_controls: usize,
    /// Sum of mapped requirement counts across those controls.
    pub total_requirements: usize,
    /// Controls per family code.
    pub family_counts: BTreeMap<String, usize>,
    /// Mapped requirements per family code.
    pub family_requirement_counts: BTreeMap<String, usize>,
    /// Controls whose identifier has no recognizable family prefix.
    pub unknown_family_controls: Vec<ControlId>,
    /// Controls with no entry in the current-revision catalog.
    pub not_in_catalog: Vec<ControlId>,
}

impl LevelStatistics {
    /// Control count for a family, zero when the family is absent.
    pub fn family_count(&self, code: &str) -> usize {
        self.family_counts.get(code).copied().unwrap_or(0)
    }

    /// Requirement count for a family, zero when the family is absent.
    pub fn family_requirement_count(&self, code: &str) -> usize {
        self.family_requirement_counts.get(code).copied().unwrap_or(0)
    }

    /// Mean requirements per control, rounded to two decimal places.
    /// Zero when the level has no controls.
    pub fn average_requirements(&self) -> f64 {
        if self.total_controls == 0 {
            return 0.0;
        }
        let average = self.total_requirements as f64 / self.total_controls as f64;
        (average * 100.0).round() / 100.0
    }
}

/// One family's counts across every level, plus totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilyRow {
    pub code: String,
    pub display_name: String,
    /// Control counts parallel to the breakdown's level order.
    pub control_counts: Vec<usize>,
    /// Requirement counts parallel to the breakdown's level order.
    pub requirement_counts: Vec<usize>,
    pub total_controls: usize,
    pub total_requirements: usize,
}

/// Cross-level family rollup driving the summary tables. Rows are sorted by
/// family code; count vectors are parallel to `level_names`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilyBreakdown {
    pub level_names: Vec<String>,
    pub rows: Vec<FamilyRow>,
}

impl FamilyBreakdown {
    /// Rolls per-level statistics up into one row per family code seen in
    /// any level.
    pub fn from_reports(reports: &[LevelReport]) -> Self {
        let mut codes: BTreeSet<String> = BTreeSet::new();
        for report in reports {
            codes.extend(report.stats.family_counts.keys().cloned());
            codes.extend(report.stats.family_requirement_counts.keys().cloned());
        }

        let level_names = reports
            .iter()
            .map(|report| report.name.clone())
            .collect();
        let rows = codes
            .into_iter()
            .map(|code| {
                let control_counts: Vec<usize> = reports
                    .iter()
                    .map(|report| report.stats.family_count(&code))
                    .collect();
                let requirement_counts: Vec<usize> = reports
                    .iter()
                    .map(|report| report.stats.family_requirement_count(&code))
                    .collect();
                FamilyRow {
                    display_name: family::family_display_name(&code).to_string(),
                    total_controls: control_counts.iter().sum(),
                    total_requirements: requirement_counts.iter().sum(),
                    code,
                    control_counts,
                    requirement_counts,
                }
            })
            .collect();

        Self { level_names, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
