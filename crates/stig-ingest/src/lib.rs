//! Input dataset loading for control level reconciliation.
//!
//! This crate finds and reads the raw inputs of a run: level lists (JSON or
//! CSV), the controls catalog and CCI mapping exports for a revision, and
//! the optional revision comparison dataset. It also fingerprints every
//! resolved file for run provenance. Parsing stays at the published-schema
//! level; identifier normalization and reconciliation happen downstream.

pub mod catalogs;
pub mod discovery;
pub mod error;
pub mod fingerprint;
pub mod levels;

pub use crate::catalogs::{load_cci_records, load_comparison, load_control_records};
pub use crate::discovery::{
    COMPARISON_FILE, ResolvedSources, cci_file, controls_file, resolve_sources,
};
pub use crate::error::{IngestError, Result};
pub use crate::fingerprint::{provenance, sha256_file, sha256_hex};
pub use crate::levels::{builtin_level_map, load_level_map};
