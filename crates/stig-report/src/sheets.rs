//! CSV sheet export.
//!
//! Writes `summary.csv` plus one CSV per level, with the same columns as the
//! corresponding workbook sheets.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use stig_model::LevelReport;
use stig_reconcile::RunOutcome;

use crate::common::{LEVEL_HEADERS, OVERVIEW_HEADERS, control_rows, overview_rows};

/// Write the CSV sheet set under `output_dir`, creating it if needed.
/// Returns the written paths, summary first.
pub fn write_csv_sheets(output_dir: &Path, outcome: &RunOutcome) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;
    let mut written = Vec::new();

    let summary_path = output_dir.join("summary.csv");
    write_summary_csv(&summary_path, outcome)?;
    written.push(summary_path);

    let mut stems = BTreeSet::new();
    for level in &outcome.levels {
        let path = output_dir.join(format!("{}.csv", file_stem(&level.name, &mut stems)));
        write_level_csv(&path, level, outcome)?;
        written.push(path);
    }
    Ok(written)
}

fn write_summary_csv(path: &Path, outcome: &RunOutcome) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    writer.write_record(OVERVIEW_HEADERS)?;
    for row in overview_rows(&outcome.levels) {
        writer.write_record([
            row.level,
            row.total_controls.to_string().as_str(),
            row.total_requirements.to_string().as_str(),
            row.average.to_string().as_str(),
        ])?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

fn write_level_csv(path: &Path, level: &LevelReport, outcome: &RunOutcome) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    writer.write_record(LEVEL_HEADERS)?;
    for row in control_rows(&level.partition.current, &outcome.controls, &outcome.ccis) {
        writer.write_record([
            row.id,
            row.name,
            row.text,
            row.cci_numbers.as_str(),
            row.cci_count.to_string().as_str(),
            row.family,
        ])?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

/// Filesystem-safe stem for a level's CSV: lowercased, whitespace collapsed
/// to underscores, path separators to dashes, repeats suffixed.
fn file_stem(level: &str, used: &mut BTreeSet<String>) -> String {
    let mut base: String = level
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' => '-',
            c if c.is_whitespace() => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect();
    if base.is_empty() {
        base = "level".to_string();
    }
    let mut stem = base.clone();
    let mut serial = 2;
    while !used.insert(stem.clone()) {
        stem = format!("{base}_{serial}");
        serial += 1;
    }
    stem
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stems_are_sanitized_and_unique() {
        let mut used = BTreeSet::new();
        assert_eq!(
            file_stem("DL-3 MITSC/IPN/ISN/Data Center", &mut used),
            "dl-3_mitsc-ipn-isn-data_center"
        );
        assert_eq!(file_stem("DL-1 DODIN", &mut used), "dl-1_dodin");
        assert_eq!(file_stem("DL-1 DODIN", &mut used), "dl-1_dodin_2");
        assert_eq!(file_stem("  ", &mut used), "level");
    }
}
