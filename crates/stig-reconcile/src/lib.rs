//! Control identifier reconciliation.
//!
//! The reconciliation core joins three datasets that disagree about how to
//! spell a control identifier: hand-maintained level lists, the controls
//! catalog export, and the CCI requirement mapping. Everything is keyed by
//! the canonical form from [`stig_model::ControlId::normalize`]; the
//! pipeline builds the two lookup tables, partitions each level's controls
//! into current and withdrawn subsets, and aggregates per-level and
//! per-family coverage statistics.
//!
//! All operations here are pure transforms over in-memory inputs. File
//! loading lives in `stig-ingest`, rendering in `stig-report`.

pub mod lookup;
pub mod partition;
pub mod pipeline;
pub mod revision;
pub mod stats;

pub use crate::lookup::{
    CciLookup, ControlsLookup, LookupBuildStats, build_cci_lookup, build_controls_lookup,
};
pub use crate::partition::reconcile;
pub use crate::pipeline::{RunOutcome, reconcile_run};
pub use crate::revision::{RevisionComparison, WithdrawnSet};
pub use crate::stats::aggregate;
