//! JSON run-report output.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use stig_model::RunReport;

/// Pretty-printed JSON for a run report.
pub fn run_report_json(report: &RunReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("serialize run report")
}

/// Write the run report as JSON, newline terminated.
pub fn write_run_report(output_path: &Path, report: &RunReport) -> Result<()> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let json = run_report_json(report)?;
    fs::write(output_path, json + "\n")
        .with_context(|| format!("write {}", output_path.display()))
}
