//! Tests for stig-model types.

use stig_model::{
    ControlId, FamilyBreakdown, LevelPartition, LevelReport, LevelStatistics, family_code,
    family_display_name,
};

#[test]
fn normalize_canonicalizes_common_spellings() {
    let cases = [
        ("AC-1", "AC-01"),
        ("AC-01", "AC-01"),
        ("ac-1", "AC-01"),
        (" AC-1 ", "AC-01"),
        ("AC-2(1)", "AC-02(01)"),
        ("AC-02(01)", "AC-02(01)"),
        ("ac-2(13)", "AC-02(13)"),
        ("", ""),
        ("Appendix J", "APPENDIX J"),
    ];
    for (raw, expected) in cases {
        assert_eq!(ControlId::normalize(raw).as_str(), expected, "raw: {raw:?}");
    }
}

#[test]
fn wellformed_check_is_looser_than_the_normalizer() {
    assert!(ControlId::normalize("AC-01(01)").is_wellformed());
    assert!(ControlId::normalize("ABC-1").is_wellformed());
    assert!(!ControlId::normalize("XYZQ").is_wellformed());
    assert!(!ControlId::normalize("ABC-1").is_canonical());
}

#[test]
fn family_lookup_handles_unknowns() {
    assert_eq!(family_code("AC-01"), "AC");
    assert_eq!(family_code(""), "Unknown");
    assert_eq!(family_display_name("AC"), "Access Control");
    assert_eq!(family_display_name("QQ"), "QQ");
}

#[test]
fn breakdown_from_one_level() {
    let mut stats = LevelStatistics::default();
    stats.total_controls = 3;
    stats.total_requirements = 7;
    stats.family_counts.insert("AC".to_string(), 2);
    stats.family_counts.insert("SI".to_string(), 1);
    stats.family_requirement_counts.insert("AC".to_string(), 7);

    let report = LevelReport {
        name: "DL-6 Application".to_string(),
        partition: LevelPartition::default(),
        stats,
    };
    let breakdown = FamilyBreakdown::from_reports(std::slice::from_ref(&report));

    assert_eq!(breakdown.level_names, vec!["DL-6 Application"]);
    assert_eq!(breakdown.rows.len(), 2);
    assert_eq!(breakdown.rows[0].code, "AC");
    assert_eq!(breakdown.rows[0].total_requirements, 7);
    assert_eq!(breakdown.rows[1].code, "SI");
    assert_eq!(breakdown.rows[1].total_requirements, 0);
    assert_eq!(report.stats.average_requirements(), 2.33);
}
