//! Revision comparison and withdrawn-control tracking.

use std::collections::BTreeSet;

use stig_model::{ControlId, RawComparison};
use tracing::debug;

use crate::lookup::ControlsLookup;

/// Canonical identifiers present only in the legacy catalog revision.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WithdrawnSet(BTreeSet<ControlId>);

impl WithdrawnSet {
    pub fn contains(&self, id: &ControlId) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Identifiers in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &ControlId> {
        self.0.iter()
    }
}

impl FromIterator<ControlId> for WithdrawnSet {
    fn from_iter<I: IntoIterator<Item = ControlId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Two-way control set difference between catalog revisions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevisionComparison {
    /// Present in the legacy catalog only; sorted, deduplicated.
    pub withdrawn_legacy_only: Vec<ControlId>,
    /// Present in the current catalog only; sorted, deduplicated.
    pub introduced_current_only: Vec<ControlId>,
}

impl RevisionComparison {
    /// Normalizes a raw comparison dataset. Absent data yields an empty
    /// comparison, which in turn yields an empty withdrawn set.
    pub fn from_raw(raw: Option<&RawComparison>) -> Self {
        let comparison = match raw {
            Some(raw) => Self {
                withdrawn_legacy_only: normalize_list(&raw.withdrawn_rev4_only),
                introduced_current_only: normalize_list(&raw.new_rev5_only),
            },
            None => Self::default(),
        };
        debug!(
            withdrawn = comparison.withdrawn_legacy_only.len(),
            introduced = comparison.introduced_current_only.len(),
            "normalized revision comparison"
        );
        comparison
    }

    /// Computes the comparison directly from two catalog lookups.
    pub fn between(legacy: &ControlsLookup, current: &ControlsLookup) -> Self {
        let withdrawn_legacy_only = legacy
            .ids()
            .filter(|id| !current.contains(id))
            .cloned()
            .collect();
        let introduced_current_only = current
            .ids()
            .filter(|id| !legacy.contains(id))
            .cloned()
            .collect();
        Self {
            withdrawn_legacy_only,
            introduced_current_only,
        }
    }

    pub fn withdrawn_set(&self) -> WithdrawnSet {
        self.withdrawn_legacy_only.iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.withdrawn_legacy_only.is_empty() && self.introduced_current_only.is_empty()
    }
}

fn normalize_list(raw: &[String]) -> Vec<ControlId> {
    let ids: BTreeSet<ControlId> = raw
        .iter()
        .map(|value| ControlId::normalize(value))
        .filter(|id| !id.is_empty())
        .collect();
    ids.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use stig_model::{RawComparison, RawControlRecord};

    use super::*;
    use crate::lookup::build_controls_lookup;

    fn records(ids: &[&str]) -> Vec<RawControlRecord> {
        ids.iter()
            .map(|id| RawControlRecord {
                identifier: (*id).to_string(),
                ..RawControlRecord::default()
            })
            .collect()
    }

    #[test]
    fn from_raw_normalizes_sorts_and_dedupes() {
        let raw = RawComparison {
            withdrawn_rev4_only: vec![
                "sa-7".to_string(),
                "AC-4".to_string(),
                "AC-04".to_string(),
                String::new(),
            ],
            new_rev5_only: vec!["PT-1".to_string()],
        };
        let comparison = RevisionComparison::from_raw(Some(&raw));

        assert_eq!(
            comparison.withdrawn_legacy_only,
            vec![ControlId::normalize("AC-4"), ControlId::normalize("SA-7")]
        );
        assert_eq!(
            comparison.introduced_current_only,
            vec![ControlId::normalize("PT-1")]
        );
        assert!(comparison.withdrawn_set().contains(&ControlId::normalize("AC-04")));
    }

    #[test]
    fn absent_comparison_yields_empty_set() {
        let comparison = RevisionComparison::from_raw(None);
        assert!(comparison.is_empty());
        assert!(comparison.withdrawn_set().is_empty());
    }

    #[test]
    fn between_diffs_catalogs_both_ways() {
        let (legacy, _) = build_controls_lookup(&records(&["AC-1", "AC-4", "SA-7"]));
        let (current, _) = build_controls_lookup(&records(&["AC-1", "PT-1"]));

        let comparison = RevisionComparison::between(&legacy, &current);
        assert_eq!(
            comparison.withdrawn_legacy_only,
            vec![ControlId::normalize("AC-4"), ControlId::normalize("SA-7")]
        );
        assert_eq!(
            comparison.introduced_current_only,
            vec![ControlId::normalize("PT-1")]
        );
    }
}
