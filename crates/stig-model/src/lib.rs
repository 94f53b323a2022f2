pub mod catalog;
pub mod control_id;
pub mod family;
pub mod level;
pub mod report;
pub mod stats;

pub use catalog::{
    CatalogEntry, CciEntry, RawCciRecord, RawComparison, RawControlRecord, Revision,
};
pub use control_id::ControlId;
pub use family::{UNKNOWN_FAMILY, family_code, family_display_name, known_families};
pub use level::{Level, LevelMap};
pub use report::{LevelPartition, LevelReport, RunReport, SourceProvenance, SourceRole};
pub use stats::{FamilyBreakdown, FamilyRow, LevelStatistics};
