//! Control family codes and display names.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Fallback family for identifiers with no recognizable family prefix.
pub const UNKNOWN_FAMILY: &str = "Unknown";

/// Leading family prefix of an identifier: two or three letters, then a
/// hyphen.
static FAMILY_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]{2,3})-").expect("Invalid family prefix regex"));

/// Display names for the control families that appear in the catalogs,
/// security families first, then the legacy privacy appendix families that
/// survive in older baselines.
static FAMILY_NAMES: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();

    // Security control families
    map.insert("AC", "Access Control");
    map.insert("AT", "Awareness and Training");
    map.insert("AU", "Audit and Accountability");
    map.insert("CA", "Assessment, Authorization, and Monitoring");
    map.insert("CM", "Configuration Management");
    map.insert("CP", "Contingency Planning");
    map.insert("IA", "Identification and Authentication");
    map.insert("IR", "Incident Response");
    map.insert("MA", "Maintenance");
    map.insert("MP", "Media Protection");
    map.insert("PE", "Physical and Environmental Protection");
    map.insert("PL", "Planning");
    map.insert("PM", "Program Management");
    map.insert("PS", "Personnel Security");
    map.insert(
        "PT",
        "Personally Identifiable Information Processing and Transparency",
    );
    map.insert("RA", "Risk Assessment");
    map.insert("SA", "System and Services Acquisition");
    map.insert("SC", "System and Communications Protection");
    map.insert("SI", "System and Information Integrity");
    map.insert("SR", "Supply Chain Risk Management");

    // Legacy privacy appendix families
    map.insert("AP", "Authority and Purpose");
    map.insert("AR", "Accountability, Audit, and Risk Management");
    map.insert("DI", "Data Quality and Integrity");
    map.insert("DM", "Data Minimization and Retention");
    map.insert("IP", "Individual Participation and Redress");
    map.insert("SE", "Security");
    map.insert("TR", "Transparency");
    map.insert("UL", "Use Limitation");

    map
});

/// Extracts the family code from an identifier string.
///
/// Returns [`UNKNOWN_FAMILY`] when the string is empty or does not start
/// with a letter-run-and-hyphen prefix.
pub fn family_code(identifier: &str) -> &str {
    match FAMILY_PREFIX_REGEX.captures(identifier) {
        Some(caps) => match caps.get(1) {
            Some(code) => code.as_str(),
            None => UNKNOWN_FAMILY,
        },
        None => UNKNOWN_FAMILY,
    }
}

/// Display name for a family code, falling back to the code itself for
/// families the table does not know.
pub fn family_display_name(code: &str) -> &str {
    match FAMILY_NAMES.get(code) {
        Some(name) => name,
        None => code,
    }
}

/// All known family codes with their display names, in code order.
pub fn known_families() -> impl Iterator<Item = (&'static str, &'static str)> {
    FAMILY_NAMES.iter().map(|(code, name)| (*code, *name))
}
