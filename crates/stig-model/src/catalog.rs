//! Catalog and requirement-mapping record types.
//!
//! The `Raw*` types mirror the published dataset schemas field for field and
//! exist only at the ingest boundary. Everything past lookup construction
//! works with the cooked [`CatalogEntry`] and [`CciEntry`] types keyed by
//! canonical identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Catalog generation a dataset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Revision {
    Rev4,
    Rev5,
}

impl Revision {
    pub fn label(self) -> &'static str {
        match self {
            Revision::Rev4 => "rev4",
            Revision::Rev5 => "rev5",
        }
    }

    /// The generation this one supersedes, if any.
    pub fn legacy(self) -> Option<Revision> {
        match self {
            Revision::Rev4 => None,
            Revision::Rev5 => Some(Revision::Rev4),
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One control's catalog content for a single revision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Control (or control enhancement) name.
    pub name: String,
    /// Full control text.
    pub text: String,
    /// Supplemental discussion.
    pub discussion: String,
    /// Comma-separated related control identifiers, as published.
    pub related_controls: String,
}

/// One derived compliance requirement mapped to a control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CciEntry {
    /// Requirement number (e.g., "CCI-000015").
    pub number: String,
    pub description: String,
    /// Source index locating the requirement within the control text.
    pub index: String,
}

/// Raw catalog record as published in the catalog export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawControlRecord {
    #[serde(rename = "Control Identifier", default)]
    pub identifier: String,
    #[serde(rename = "Control (or Control Enhancement) Name", default)]
    pub name: String,
    #[serde(rename = "Control Text", default)]
    pub text: String,
    #[serde(rename = "Discussion", default)]
    pub discussion: String,
    #[serde(rename = "Related Controls", default)]
    pub related_controls: String,
}

/// Raw requirement-mapping record as published in the CCI export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCciRecord {
    #[serde(rename = "Control", default)]
    pub control: String,
    #[serde(rename = "CCI Number", default)]
    pub number: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Index", default)]
    pub index: String,
}

/// Raw revision comparison dataset. Optional input; both lists hold raw
/// identifier strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawComparison {
    #[serde(default)]
    pub withdrawn_rev4_only: Vec<String>,
    #[serde(default)]
    pub new_rev5_only: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revision_labels() {
        assert_eq!(Revision::Rev5.label(), "rev5");
        assert_eq!(Revision::Rev5.to_string(), "rev5");
        assert_eq!(Revision::Rev5.legacy(), Some(Revision::Rev4));
        assert_eq!(Revision::Rev4.legacy(), None);
    }

    #[test]
    fn raw_control_record_reads_published_field_names() {
        let json = r#"{
            "Control Identifier": "AC-1",
            "Control (or Control Enhancement) Name": "Policy and Procedures",
            "Control Text": "a. Develop...",
            "Discussion": "Access control policy...",
            "Related Controls": "IA-1, PM-9"
        }"#;
        let record: RawControlRecord = serde_json::from_str(json).expect("parse control record");
        assert_eq!(record.identifier, "AC-1");
        assert_eq!(record.name, "Policy and Procedures");
        assert_eq!(record.related_controls, "IA-1, PM-9");
    }

    #[test]
    fn raw_control_record_defaults_missing_fields() {
        let record: RawControlRecord =
            serde_json::from_str(r#"{"Control Identifier": "AC-1"}"#).expect("parse sparse record");
        assert_eq!(record.identifier, "AC-1");
        assert_eq!(record.text, "");
        assert_eq!(record.discussion, "");
    }

    #[test]
    fn raw_cci_record_reads_published_field_names() {
        let json = r#"{
            "Control": "AC-2 (4)",
            "CCI Number": "CCI-000018",
            "Description": "The information system...",
            "Index": "AC-2 (4)"
        }"#;
        let record: RawCciRecord = serde_json::from_str(json).expect("parse cci record");
        assert_eq!(record.control, "AC-2 (4)");
        assert_eq!(record.number, "CCI-000018");
    }

    #[test]
    fn raw_comparison_defaults_to_empty_lists() {
        let comparison: RawComparison = serde_json::from_str("{}").expect("parse comparison");
        assert!(comparison.withdrawn_rev4_only.is_empty());
        assert!(comparison.new_rev5_only.is_empty());
    }
}
