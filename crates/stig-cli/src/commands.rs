//! Subcommand orchestration.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use comfy_table::Table;
use tracing::{info, info_span};

use stig_ingest::{
    ResolvedSources, builtin_level_map, load_cci_records, load_comparison, load_control_records,
    load_level_map, provenance, resolve_sources,
};
use stig_model::{
    ControlId, RawComparison, Revision, RunReport, SourceProvenance, SourceRole, known_families,
};
use stig_reconcile::{RunOutcome, reconcile_run};
use stig_report::{
    WorkbookOptions, run_report_json, write_csv_sheets, write_run_report, write_workbook,
};

use crate::cli::{GenerateArgs, OutputFormatArg, RevisionArg};
use crate::summary::apply_table_style;

/// Workbook file name inside the output directory.
const WORKBOOK_FILE: &str = "STIG_Control_Level_Reference.xml";

/// Run report file name inside the output directory.
const REPORT_FILE: &str = "report.json";

/// CSV sheet directory name inside the output directory.
const SHEETS_DIR: &str = "sheets";

/// Everything `generate` produced, for the console summary.
#[derive(Debug)]
pub struct GenerateResult {
    pub report: RunReport,
    pub output_dir: PathBuf,
    pub written: Vec<PathBuf>,
    /// Identifiers flagged while building the lookups, in discovery order.
    pub suspects: Vec<ControlId>,
}

pub fn run_generate(args: &GenerateArgs) -> Result<GenerateResult> {
    let run_span = info_span!("generate", data_dir = %args.data_dir.display());
    let _run_guard = run_span.enter();

    let requested = match args.revision {
        RevisionArg::Rev4 => Revision::Rev4,
        RevisionArg::Rev5 => Revision::Rev5,
    };
    let sources = resolve_sources(&args.data_dir, requested, !args.no_fallback)?;
    let control_records = load_control_records(&sources.controls)?;
    let cci_records = load_cci_records(&sources.ccis)?;
    let comparison = sources
        .comparison
        .as_deref()
        .map(load_comparison)
        .transpose()?;
    let levels = match &args.input {
        Some(path) => load_level_map(path)?,
        None => builtin_level_map(),
    };
    info!(
        revision = sources.revision.label(),
        levels = levels.len(),
        controls = control_records.len(),
        ccis = cci_records.len(),
        "sources loaded"
    );

    let outcome = reconcile_run(&levels, &control_records, &cci_records, comparison.as_ref());

    let sources_meta = collect_provenance(
        args,
        &sources,
        control_records.len(),
        cci_records.len(),
        comparison.as_ref(),
        levels.len(),
    )?;
    let report = RunReport {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        revision: sources.revision.label().to_string(),
        catalog_entries: outcome.controls.len(),
        mapped_controls: outcome.ccis.mapped_controls(),
        withdrawn: outcome.withdrawn.iter().cloned().collect(),
        levels: outcome.levels.clone(),
        family_breakdown: outcome.breakdown.clone(),
        sources: sources_meta,
    };

    let mut written = Vec::new();
    if matches!(
        args.format,
        OutputFormatArg::Workbook | OutputFormatArg::Both
    ) {
        let path = args.output_dir.join(WORKBOOK_FILE);
        let options = WorkbookOptions {
            detailed_cci: args.detailed_cci,
        };
        write_workbook(&path, &outcome, &options)?;
        info!(path = %path.display(), "workbook written");
        written.push(path);
    }
    if matches!(args.format, OutputFormatArg::Csv | OutputFormatArg::Both) {
        let dir = args.output_dir.join(SHEETS_DIR);
        let sheets = write_csv_sheets(&dir, &outcome)?;
        info!(count = sheets.len(), dir = %dir.display(), "csv sheets written");
        written.extend(sheets);
    }
    let report_path = args.output_dir.join(REPORT_FILE);
    write_run_report(&report_path, &report)?;
    written.push(report_path);

    if args.print_report {
        println!("{}", run_report_json(&report)?);
    }

    let suspects = collect_suspects(&outcome);
    Ok(GenerateResult {
        report,
        output_dir: args.output_dir.clone(),
        written,
        suspects,
    })
}

pub fn run_families() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Family", "Name"]);
    apply_table_style(&mut table);
    for (code, name) in known_families() {
        table.add_row(vec![code, name]);
    }
    println!("{table}");
    Ok(())
}

fn collect_provenance(
    args: &GenerateArgs,
    sources: &ResolvedSources,
    control_count: usize,
    cci_count: usize,
    comparison: Option<&RawComparison>,
    level_count: usize,
) -> Result<Vec<SourceProvenance>> {
    let revision = sources.revision.label();
    let mut collected = vec![
        provenance(
            SourceRole::Controls,
            &sources.controls,
            Some(revision),
            control_count,
        )?,
        provenance(SourceRole::Cci, &sources.ccis, Some(revision), cci_count)?,
    ];
    if let Some(path) = &args.input {
        collected.push(provenance(SourceRole::Levels, path, None, level_count)?);
    }
    if let (Some(path), Some(raw)) = (&sources.comparison, comparison) {
        let records = raw.withdrawn_rev4_only.len() + raw.new_rev5_only.len();
        collected.push(provenance(SourceRole::Comparison, path, None, records)?);
    }
    Ok(collected)
}

/// Suspect identifiers from both lookup builds, controls first, deduplicated.
fn collect_suspects(outcome: &RunOutcome) -> Vec<ControlId> {
    let mut suspects = outcome.controls_build.suspect.clone();
    for id in &outcome.cci_build.suspect {
        if !suspects.contains(id) {
            suspects.push(id.clone());
        }
    }
    suspects
}
