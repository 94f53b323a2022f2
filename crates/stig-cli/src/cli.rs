//! CLI argument definitions for the level reference generator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "stig-levels",
    version,
    about = "STIG Control Level Reference Generator - Reconcile control lists against a catalog revision",
    long_about = "Reconcile named control level lists against a NIST control catalog revision\n\
                  and its CCI mapping, then render reference sheets.\n\n\
                  Outputs a SpreadsheetML workbook Excel opens natively, per-level CSV\n\
                  sheets, and a JSON run report with source provenance."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reconcile level lists against the catalog and write reference sheets.
    Generate(GenerateArgs),

    /// List the known control families.
    Families,
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Directory holding the catalog, CCI, and comparison datasets.
    #[arg(long = "data-dir", value_name = "DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Level map file (.json or .csv). Defaults to the built-in DoD level map.
    #[arg(long = "input", short = 'i', value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output directory for generated files.
    #[arg(
        long = "output-dir",
        short = 'o',
        value_name = "DIR",
        default_value = "output"
    )]
    pub output_dir: PathBuf,

    /// Sheet output to generate.
    #[arg(long = "format", value_enum, default_value = "workbook")]
    pub format: OutputFormatArg,

    /// Catalog revision to reconcile against.
    #[arg(long = "revision", value_enum, default_value = "rev5")]
    pub revision: RevisionArg,

    /// Fail when the requested revision's datasets are missing instead of
    /// falling back to the legacy revision.
    #[arg(long = "no-fallback")]
    pub no_fallback: bool,

    /// Add a CCI detail worksheet per level to the workbook.
    #[arg(long = "detailed-cci")]
    pub detailed_cci: bool,

    /// Print the run report JSON to stdout after generation.
    #[arg(long = "print-report")]
    pub print_report: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Workbook,
    Csv,
    Both,
}

/// CLI catalog revision choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum RevisionArg {
    Rev4,
    Rev5,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_defaults_target_the_current_revision() {
        let cli = Cli::parse_from(["stig-levels", "generate"]);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate subcommand");
        };
        assert!(matches!(args.revision, RevisionArg::Rev5));
        assert!(matches!(args.format, OutputFormatArg::Workbook));
        assert_eq!(args.data_dir, PathBuf::from("."));
        assert_eq!(args.output_dir, PathBuf::from("output"));
        assert!(!args.no_fallback);
        assert!(!args.detailed_cci);
    }

    #[test]
    fn generate_accepts_explicit_sources() {
        let cli = Cli::parse_from([
            "stig-levels",
            "generate",
            "--data-dir",
            "data",
            "--input",
            "levels.csv",
            "--format",
            "both",
            "--revision",
            "rev4",
            "--detailed-cci",
        ]);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate subcommand");
        };
        assert!(matches!(args.revision, RevisionArg::Rev4));
        assert!(matches!(args.format, OutputFormatArg::Both));
        assert_eq!(args.input, Some(PathBuf::from("levels.csv")));
        assert!(args.detailed_cci);
    }
}
