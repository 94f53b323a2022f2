//! Integration tests for workbook, CSV, and JSON rendering.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use stig_model::{
    ControlId, FamilyBreakdown, FamilyRow, Level, LevelMap, LevelPartition, LevelReport,
    LevelStatistics, RawCciRecord, RawComparison, RawControlRecord, RunReport, SourceProvenance,
    SourceRole,
};
use stig_reconcile::{RunOutcome, reconcile_run};
use stig_report::{
    WorkbookOptions, run_report_json, write_csv_sheets, write_run_report, write_workbook,
};

fn control(identifier: &str, name: &str, text: &str) -> RawControlRecord {
    RawControlRecord {
        identifier: identifier.to_string(),
        name: name.to_string(),
        text: text.to_string(),
        ..RawControlRecord::default()
    }
}

fn cci(control: &str, number: &str, description: &str) -> RawCciRecord {
    RawCciRecord {
        control: control.to_string(),
        number: number.to_string(),
        description: description.to_string(),
        index: String::new(),
    }
}

/// Two levels over a three-control catalog; AC-4 is withdrawn and SA-99 has
/// no catalog entry.
fn sample_outcome() -> RunOutcome {
    let mut levels = LevelMap::new();
    levels.push(Level::new(
        "Zone/A",
        vec!["AC-1".to_string(), "ac-2".to_string(), "SA-99".to_string()],
    ));
    levels.push(Level::new(
        "Zone B",
        vec!["si-3".to_string(), "AC-4".to_string()],
    ));

    let controls = vec![
        control("AC-1", "Policy and Procedures", "Manage accounts."),
        control("AC-2", "Account Management", "Review accounts."),
        control("SI-3", "Malicious Code Protection", "Deploy protection."),
    ];
    let ccis = vec![
        cci("AC-1", "CCI-000001", "Document the access control policy."),
        cci("AC-1", "CCI-000002", "Disseminate the policy."),
        cci("SI-3", "CCI-000100", "Employ malicious code protection."),
    ];
    let comparison = RawComparison {
        withdrawn_rev4_only: vec!["AC-4".to_string()],
        new_rev5_only: vec![],
    };

    reconcile_run(&levels, &controls, &ccis, Some(&comparison))
}

#[test]
fn workbook_renders_summary_and_level_sheets() {
    let outcome = sample_outcome();
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("levels.xml");

    write_workbook(&path, &outcome, &WorkbookOptions::default()).expect("write workbook");
    let xml = fs::read_to_string(&path).expect("read workbook");

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<?mso-application progid=\"Excel.Sheet\"?>"));
    assert!(xml.contains("<Created>"));

    assert!(xml.contains("ss:Name=\"Summary\""));
    assert!(xml.contains("ss:Name=\"Zone-A\""));
    assert!(xml.contains("ss:Name=\"Zone B\""));
    assert!(xml.contains(">STIG Control Level Summary Report<"));
    assert!(xml.contains(">Level Overview<"));
    assert!(xml.contains(">Controls by Family Across Levels<"));
    assert!(xml.contains(">CCI Count by Family Across Levels<"));

    assert!(xml.contains("<Data ss:Type=\"String\">AC-01</Data>"));
    assert!(xml.contains("<Data ss:Type=\"String\">CCI-000001, CCI-000002</Data>"));
    assert!(xml.contains("<Data ss:Type=\"Number\">0.67</Data>"));
    assert!(xml.contains("<Data ss:Type=\"String\">N/A</Data>"));
    assert!(xml.contains("<FreezePanes/>"));

    // The withdrawn control never lands on a sheet.
    assert!(!xml.contains(">AC-04<"));
    // Detail sheets are opt-in.
    assert!(!xml.contains("No CCIs mapped"));
}

#[test]
fn workbook_detail_sheets_cover_unmapped_controls() {
    let outcome = sample_outcome();
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("levels.xml");

    let options = WorkbookOptions { detailed_cci: true };
    write_workbook(&path, &outcome, &options).expect("write workbook");
    let xml = fs::read_to_string(&path).expect("read workbook");

    assert!(xml.contains("ss:Name=\"Zone-A CCIs\""));
    assert!(xml.contains("ss:Name=\"Zone B CCIs\""));
    assert!(xml.contains(">CCI Description<"));
    assert!(xml.contains(">Document the access control policy.<"));
    assert!(xml.contains(">No CCIs mapped<"));
}

#[test]
fn csv_sheets_cover_summary_and_levels() {
    let outcome = sample_outcome();
    let dir = tempfile::tempdir().expect("create temp dir");

    let written = write_csv_sheets(dir.path(), &outcome).expect("write csv sheets");
    let names: Vec<_> = written
        .iter()
        .map(|path| path.file_name().and_then(|name| name.to_str()).unwrap())
        .collect();
    assert_eq!(names, vec!["summary.csv", "zone-a.csv", "zone_b.csv"]);

    let summary = fs::read_to_string(&written[0]).expect("read summary.csv");
    insta::assert_snapshot!("summary_csv", summary);

    let zone_a = fs::read_to_string(&written[1]).expect("read zone-a.csv");
    insta::assert_snapshot!("zone_a_csv", zone_a);

    let zone_b = fs::read_to_string(&written[2]).expect("read zone_b.csv");
    assert!(zone_b.contains("SI-03,Malicious Code Protection"));
    assert!(!zone_b.contains("AC-04"));
}

fn sample_report() -> RunReport {
    RunReport {
        generated_at: "2025-06-01T12:00:00Z".to_string(),
        revision: "rev5".to_string(),
        catalog_entries: 2,
        mapped_controls: 1,
        withdrawn: vec![ControlId::normalize("AC-4")],
        levels: vec![LevelReport {
            name: "DL-1 DODIN".to_string(),
            partition: LevelPartition {
                current: vec![ControlId::normalize("AC-1")],
                legacy: vec![ControlId::normalize("AC-4")],
            },
            stats: LevelStatistics {
                total_controls: 1,
                total_requirements: 2,
                family_counts: BTreeMap::from([("AC".to_string(), 1)]),
                family_requirement_counts: BTreeMap::from([("AC".to_string(), 2)]),
                unknown_family_controls: vec![],
                not_in_catalog: vec![],
            },
        }],
        family_breakdown: FamilyBreakdown {
            level_names: vec!["DL-1 DODIN".to_string()],
            rows: vec![FamilyRow {
                code: "AC".to_string(),
                display_name: "Access Control".to_string(),
                control_counts: vec![1],
                requirement_counts: vec![2],
                total_controls: 1,
                total_requirements: 2,
            }],
        },
        sources: vec![SourceProvenance {
            role: SourceRole::Controls,
            path: PathBuf::from("data/r5controls.json"),
            revision: Some("rev5".to_string()),
            sha256: "0".repeat(64),
            records: 2,
        }],
    }
}

#[test]
fn run_report_serializes_to_stable_json() {
    let json = run_report_json(&sample_report()).expect("render json");
    insta::assert_snapshot!("run_report_json", json);
}

#[test]
fn run_report_file_round_trips() {
    let report = sample_report();
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("report.json");

    write_run_report(&path, &report).expect("write report");
    let text = fs::read_to_string(&path).expect("read report");
    assert!(text.ends_with('\n'));

    let round: RunReport = serde_json::from_str(&text).expect("parse report");
    assert_eq!(round, report);
}
