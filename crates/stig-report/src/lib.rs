//! Rendering for reconciliation runs.
//!
//! This crate turns a [`stig_reconcile::RunOutcome`] into files:
//!
//! - **Workbook**: single-file SpreadsheetML 2003 XML workbook with a
//!   Summary worksheet, one worksheet per level, and optional CCI detail
//!   worksheets
//! - **CSV sheets**: `summary.csv` plus one CSV per level
//! - **JSON**: the serialized run report with provenance

mod common;
mod json;
mod sheets;
mod workbook;

pub use json::{run_report_json, write_run_report};
pub use sheets::write_csv_sheets;
pub use workbook::{WorkbookOptions, write_workbook};
