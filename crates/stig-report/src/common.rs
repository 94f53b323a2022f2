//! Shared row shaping for workbook and CSV rendering.

use std::collections::BTreeSet;

use stig_model::{ControlId, LevelReport};
use stig_reconcile::{CciLookup, ControlsLookup};

/// Column headers shared by the workbook level sheets and the CSV export.
pub(crate) const LEVEL_HEADERS: [&str; 6] = [
    "Control ID",
    "Control Name",
    "Control Text",
    "CCI Numbers",
    "CCI Count",
    "Family",
];

/// Column headers for the per-level CCI detail sheets.
pub(crate) const DETAIL_HEADERS: [&str; 4] =
    ["Control ID", "Control Name", "CCI Number", "CCI Description"];

/// Column headers for the summary overview table.
pub(crate) const OVERVIEW_HEADERS: [&str; 4] =
    ["Level", "Total Controls", "Total CCIs", "Avg CCIs/Control"];

/// Longest control text carried into a sheet cell.
pub(crate) const CONTROL_TEXT_LIMIT: usize = 1000;

/// Longest CCI description carried into a detail row.
pub(crate) const CCI_DESCRIPTION_LIMIT: usize = 500;

/// Excel caps worksheet names at 31 characters.
pub(crate) const SHEET_NAME_LIMIT: usize = 31;

/// Placeholder for catalog fields with no entry.
pub(crate) const MISSING: &str = "N/A";

/// Placeholder row text for a control with no mapped CCIs.
pub(crate) const NO_CCIS: &str = "No CCIs mapped";

/// First `max_chars` characters of `text`, on a char boundary.
pub(crate) fn clipped(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// Allocates worksheet names: strips path separators, clamps to the Excel
/// limit, and suffixes repeats so every claimed name is unique.
#[derive(Debug, Default)]
pub(crate) struct SheetNames {
    claimed: BTreeSet<String>,
}

impl SheetNames {
    pub(crate) fn claim(&mut self, raw: &str) -> String {
        let base: String = raw
            .chars()
            .map(|c| if c == '/' || c == '\\' { '-' } else { c })
            .take(SHEET_NAME_LIMIT)
            .collect();
        let mut name = base.clone();
        let mut serial = 2;
        while !self.claimed.insert(name.clone()) {
            let suffix = format!(" {serial}");
            let keep = SHEET_NAME_LIMIT.saturating_sub(suffix.chars().count());
            name = format!("{}{suffix}", clipped(&base, keep));
            serial += 1;
        }
        name
    }
}

/// One rendered control line on a level sheet.
#[derive(Debug)]
pub(crate) struct ControlRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub text: &'a str,
    pub cci_numbers: String,
    pub cci_count: usize,
    pub family: &'a str,
}

/// Rows for a level sheet, one per current-revision control.
pub(crate) fn control_rows<'a>(
    current: &'a [ControlId],
    controls: &'a ControlsLookup,
    ccis: &'a CciLookup,
) -> Vec<ControlRow<'a>> {
    current
        .iter()
        .map(|id| {
            let entry = controls.get(id);
            let mapped = ccis.get(id);
            let cci_numbers = if mapped.is_empty() {
                MISSING.to_string()
            } else {
                mapped
                    .iter()
                    .map(|cci| cci.number.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            ControlRow {
                id: id.as_str(),
                name: entry.map_or(MISSING, |e| e.name.as_str()),
                text: clipped(entry.map_or(MISSING, |e| e.text.as_str()), CONTROL_TEXT_LIMIT),
                cci_numbers,
                cci_count: mapped.len(),
                family: id.family_code(),
            }
        })
        .collect()
}

/// One control x CCI line on a detail sheet.
#[derive(Debug)]
pub(crate) struct CciDetailRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub number: &'a str,
    pub description: &'a str,
}

/// Detail rows for a level: one per mapped CCI, or a single placeholder row
/// when a control has none.
pub(crate) fn cci_detail_rows<'a>(
    current: &'a [ControlId],
    controls: &'a ControlsLookup,
    ccis: &'a CciLookup,
) -> Vec<CciDetailRow<'a>> {
    let mut rows = Vec::new();
    for id in current {
        let name = controls.get(id).map_or(MISSING, |e| e.name.as_str());
        let mapped = ccis.get(id);
        if mapped.is_empty() {
            rows.push(CciDetailRow {
                id: id.as_str(),
                name,
                number: MISSING,
                description: NO_CCIS,
            });
            continue;
        }
        for cci in mapped {
            rows.push(CciDetailRow {
                id: id.as_str(),
                name,
                number: cci.number.as_str(),
                description: clipped(&cci.description, CCI_DESCRIPTION_LIMIT),
            });
        }
    }
    rows
}

/// One line of the summary overview table.
#[derive(Debug)]
pub(crate) struct OverviewRow<'a> {
    pub level: &'a str,
    pub total_controls: usize,
    pub total_requirements: usize,
    pub average: f64,
}

pub(crate) fn overview_rows(levels: &[LevelReport]) -> Vec<OverviewRow<'_>> {
    levels
        .iter()
        .map(|level| OverviewRow {
            level: level.name.as_str(),
            total_controls: level.stats.total_controls,
            total_requirements: level.stats.total_requirements,
            average: level.stats.average_requirements(),
        })
        .collect()
}
