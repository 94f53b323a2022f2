//! Catalog, requirement-mapping, and comparison dataset loaders.
//!
//! All three datasets are JSON exports: the controls and CCI files are bare
//! arrays of records, the comparison file a single object. Loaders read the
//! published schemas verbatim; normalization happens later, in the lookup
//! builders.

use std::path::Path;

use stig_model::{RawCciRecord, RawComparison, RawControlRecord};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Reads a controls catalog export.
pub fn load_control_records(path: &Path) -> Result<Vec<RawControlRecord>> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::io(path, e))?;
    let records: Vec<RawControlRecord> =
        serde_json::from_slice(&bytes).map_err(|e| IngestError::json(path, e))?;
    debug!(path = %path.display(), records = records.len(), "loaded control records");
    Ok(records)
}

/// Reads a CCI requirement-mapping export.
pub fn load_cci_records(path: &Path) -> Result<Vec<RawCciRecord>> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::io(path, e))?;
    let records: Vec<RawCciRecord> =
        serde_json::from_slice(&bytes).map_err(|e| IngestError::json(path, e))?;
    debug!(path = %path.display(), records = records.len(), "loaded cci records");
    Ok(records)
}

/// Reads a revision comparison dataset.
pub fn load_comparison(path: &Path) -> Result<RawComparison> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::io(path, e))?;
    let comparison: RawComparison =
        serde_json::from_slice(&bytes).map_err(|e| IngestError::json(path, e))?;
    debug!(
        path = %path.display(),
        withdrawn = comparison.withdrawn_rev4_only.len(),
        introduced = comparison.new_rev5_only.len(),
        "loaded revision comparison"
    );
    Ok(comparison)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).expect("write fixture");
        path
    }

    #[test]
    fn loads_control_records_from_array() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(
            &dir,
            "controls.json",
            r#"[
                {"Control Identifier": "AC-1", "Control (or Control Enhancement) Name": "Policy"},
                {"Control Identifier": "AC-2", "Control Text": "The organization..."}
            ]"#,
        );
        let records = load_control_records(&path).expect("load controls");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].identifier, "AC-1");
        assert_eq!(records[1].text, "The organization...");
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_control_records(&dir.path().join("absent.json"))
            .expect_err("missing file should fail");
        assert!(matches!(err, IngestError::Io { .. }));
    }

    #[test]
    fn load_reports_schema_mismatch() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(&dir, "controls.json", r#"{"not": "an array"}"#);
        let err = load_control_records(&path).expect_err("object should fail");
        assert!(matches!(err, IngestError::Json { .. }));
    }

    #[test]
    fn loads_comparison_with_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(
            &dir,
            "comparison.json",
            r#"{"withdrawn_rev4_only": ["AC-4", "SA-7"]}"#,
        );
        let comparison = load_comparison(&path).expect("load comparison");
        assert_eq!(comparison.withdrawn_rev4_only, vec!["AC-4", "SA-7"]);
        assert!(comparison.new_rev5_only.is_empty());
    }
}
