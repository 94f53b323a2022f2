//! Catalog lookup construction.
//!
//! Raw catalog and CCI records are keyed by whatever spelling their source
//! used. The builders here normalize every identifier once and build the two
//! lookup tables the rest of the pipeline joins against. Builds never fail:
//! bad records are skipped or flagged, counted, and reported after the pass.

use std::collections::BTreeMap;

use stig_model::{CatalogEntry, CciEntry, ControlId, RawCciRecord, RawControlRecord};
use tracing::{debug, warn};

/// Catalog entries keyed by canonical identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlsLookup {
    entries: BTreeMap<ControlId, CatalogEntry>,
}

impl ControlsLookup {
    pub fn get(&self, id: &ControlId) -> Option<&CatalogEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &ControlId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identifiers in canonical order.
    pub fn ids(&self) -> impl Iterator<Item = &ControlId> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ControlId, &CatalogEntry)> {
        self.entries.iter()
    }
}

/// Requirement sequences keyed by canonical identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CciLookup {
    entries: BTreeMap<ControlId, Vec<CciEntry>>,
}

impl CciLookup {
    /// Requirements mapped to an identifier, in source order. Identifiers
    /// with no mapping yield an empty slice.
    pub fn get(&self, id: &ControlId) -> &[CciEntry] {
        self.entries.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of controls with at least one mapped requirement.
    pub fn mapped_controls(&self) -> usize {
        self.entries.len()
    }

    pub fn total_requirements(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ControlId, &[CciEntry])> {
        self.entries
            .iter()
            .map(|(id, entries)| (id, entries.as_slice()))
    }
}

/// Tallies from one lookup build pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupBuildStats {
    /// Records seen in the raw input.
    pub records: usize,
    /// Records dropped because their identifier normalized to empty.
    pub skipped_empty: usize,
    /// Entries replaced by a later record with the same identifier.
    /// Append-mode builds never overwrite, so this stays zero for CCIs.
    pub overwritten: usize,
    /// Normalized identifiers that still fail the format check, first
    /// occurrence only, in encounter order.
    pub suspect: Vec<ControlId>,
}

impl LookupBuildStats {
    fn note(&mut self, id: &ControlId) {
        if !id.is_wellformed() && !self.suspect.contains(id) {
            warn!(
                id = %id,
                family = id.family_code(),
                "identifier did not normalize to a recognized control format"
            );
            self.suspect.push(id.clone());
        }
    }
}

/// Builds the controls lookup from raw catalog records.
///
/// Records with an empty identifier are skipped; on duplicate identifiers
/// the last record wins.
pub fn build_controls_lookup(records: &[RawControlRecord]) -> (ControlsLookup, LookupBuildStats) {
    let mut lookup = ControlsLookup::default();
    let mut stats = LookupBuildStats::default();

    for record in records {
        stats.records += 1;
        let id = ControlId::normalize(&record.identifier);
        if id.is_empty() {
            stats.skipped_empty += 1;
            continue;
        }
        stats.note(&id);
        let entry = CatalogEntry {
            name: record.name.clone(),
            text: record.text.clone(),
            discussion: record.discussion.clone(),
            related_controls: record.related_controls.clone(),
        };
        if lookup.entries.insert(id.clone(), entry).is_some() {
            stats.overwritten += 1;
            debug!(id = %id, "duplicate catalog identifier, keeping the later record");
        }
    }

    debug!(
        records = stats.records,
        entries = lookup.len(),
        skipped = stats.skipped_empty,
        overwritten = stats.overwritten,
        "built controls lookup"
    );
    (lookup, stats)
}

/// Builds the requirement lookup from raw CCI records.
///
/// Records with an empty control identifier are skipped; every surviving
/// record appends to its identifier's sequence in input order.
pub fn build_cci_lookup(records: &[RawCciRecord]) -> (CciLookup, LookupBuildStats) {
    let mut lookup = CciLookup::default();
    let mut stats = LookupBuildStats::default();

    for record in records {
        stats.records += 1;
        let id = ControlId::normalize(&record.control);
        if id.is_empty() {
            stats.skipped_empty += 1;
            continue;
        }
        stats.note(&id);
        lookup.entries.entry(id).or_default().push(CciEntry {
            number: record.number.clone(),
            description: record.description.clone(),
            index: record.index.clone(),
        });
    }

    debug!(
        records = stats.records,
        controls = lookup.mapped_controls(),
        requirements = lookup.total_requirements(),
        skipped = stats.skipped_empty,
        "built requirement lookup"
    );
    (lookup, stats)
}
