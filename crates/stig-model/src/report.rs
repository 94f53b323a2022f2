//! Reconciliation run outputs handed to the rendering stage.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::control_id::ControlId;
use crate::stats::{FamilyBreakdown, LevelStatistics};

/// One level's controls split by catalog revision, both halves in the
/// level's original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelPartition {
    /// Controls still present in the current revision.
    pub current: Vec<ControlId>,
    /// Controls withdrawn after the legacy revision.
    pub legacy: Vec<ControlId>,
}

impl LevelPartition {
    pub fn total(&self) -> usize {
        self.current.len() + self.legacy.len()
    }
}

/// Everything computed for one level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelReport {
    pub name: String,
    pub partition: LevelPartition,
    pub stats: LevelStatistics,
}

/// What a resolved source dataset was used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceRole {
    Controls,
    Cci,
    Levels,
    Comparison,
}

impl SourceRole {
    pub fn label(self) -> &'static str {
        match self {
            SourceRole::Controls => "controls",
            SourceRole::Cci => "cci",
            SourceRole::Levels => "levels",
            SourceRole::Comparison => "comparison",
        }
    }
}

impl fmt::Display for SourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Provenance for one resolved input dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceProvenance {
    pub role: SourceRole,
    pub path: PathBuf,
    /// Catalog generation the dataset belongs to, when revisioned.
    pub revision: Option<String>,
    /// SHA-256 of the file contents, lowercase hex.
    pub sha256: String,
    /// Number of records read from the source.
    pub records: usize,
}

/// Full output of a reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// RFC 3339 timestamp of the run.
    pub generated_at: String,
    /// Current catalog revision label (e.g., "rev5").
    pub revision: String,
    /// Number of entries in the current-revision controls lookup.
    pub catalog_entries: usize,
    /// Number of controls with at least one mapped requirement.
    pub mapped_controls: usize,
    /// Identifiers withdrawn after the legacy revision, sorted.
    pub withdrawn: Vec<ControlId>,
    pub levels: Vec<LevelReport>,
    pub family_breakdown: FamilyBreakdown,
    pub sources: Vec<SourceProvenance>,
}

impl RunReport {
    /// Sum of current-revision controls across levels.
    pub fn total_current_controls(&self) -> usize {
        self.levels
            .iter()
            .map(|level| level.stats.total_controls)
            .sum()
    }

    /// Sum of legacy-only controls across levels.
    pub fn total_legacy_controls(&self) -> usize {
        self.levels
            .iter()
            .map(|level| level.partition.legacy.len())
            .sum()
    }
}
