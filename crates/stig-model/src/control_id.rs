//! Canonical control identifiers.
//!
//! Catalog exports, requirement mappings, and hand-maintained level lists all
//! spell the same control differently: `AC-1`, `ac-01`, ` AC-1 `. Every
//! cross-dataset join in this workspace goes through [`ControlId::normalize`]
//! first so that a control is keyed by exactly one spelling: two-letter
//! family, two-digit zero-padded number, optional two-digit enhancement in
//! parentheses (`AC-01`, `AC-02(01)`).

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::family;

/// Identifiers the normalizer can rewrite into canonical form.
static CANONICALIZABLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]{2})-(\d+)(?:\((\d+)\))?$").expect("Invalid control id regex")
});

/// Shapes accepted as plausible control identifiers. Wider than the
/// normalizer on purpose: three-letter families pass here but are carried
/// through normalization unpadded.
static WELLFORMED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,3}-\d+(\(\d+\))?$").expect("Invalid format regex"));

/// The canonical spelling contract.
static CANONICAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}-\d{2}(\(\d{2}\))?$").expect("Invalid canonical regex"));

/// A control identifier as produced by [`ControlId::normalize`].
///
/// Ordering and equality are plain string comparison, which matches numeric
/// order for canonical spellings because numbers are zero-padded.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ControlId(String);

impl ControlId {
    /// Normalizes a raw identifier string.
    ///
    /// Trims, upper-cases, and zero-pads the control and enhancement numbers
    /// to two digits. Input that does not look like a two-letter-family
    /// identifier is passed through trimmed and upper-cased rather than
    /// rejected; `is_canonical` distinguishes the two outcomes. Normalizing
    /// an already-normalized value is a no-op.
    pub fn normalize(raw: &str) -> Self {
        let cleaned = raw.trim().to_uppercase();
        match canonical_spelling(&cleaned) {
            Some(spelled) => Self(spelled),
            None => Self(cleaned),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the identifier looks like a control identifier at all.
    ///
    /// Accepts two- or three-letter families and unpadded numbers, so this is
    /// deliberately looser than `is_canonical`.
    pub fn is_wellformed(&self) -> bool {
        WELLFORMED_REGEX.is_match(&self.0)
    }

    /// Whether the identifier is in canonical form.
    pub fn is_canonical(&self) -> bool {
        CANONICAL_REGEX.is_match(&self.0)
    }

    /// Family code prefix, or [`family::UNKNOWN_FAMILY`] when there is none.
    pub fn family_code(&self) -> &str {
        family::family_code(&self.0)
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ControlId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Rewrites a cleaned identifier into canonical form, or returns `None` when
/// the shape is not canonicalizable and the caller should keep the cleaned
/// text as-is. Numbers too large for `u64` fall into the pass-through case.
fn canonical_spelling(cleaned: &str) -> Option<String> {
    let caps = CANONICALIZABLE_REGEX.captures(cleaned)?;
    let family = caps.get(1)?.as_str();
    let number: u64 = caps.get(2)?.as_str().parse().ok()?;
    match caps.get(3) {
        Some(enhancement) => {
            let enhancement: u64 = enhancement.as_str().parse().ok()?;
            Some(format!("{family}-{number:02}({enhancement:02})"))
        }
        None => Some(format!("{family}-{number:02}")),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn normalize_pads_control_number() {
        assert_eq!(ControlId::normalize("AC-1").as_str(), "AC-01");
        assert_eq!(ControlId::normalize("AC-007").as_str(), "AC-07");
        assert_eq!(ControlId::normalize("SI-10").as_str(), "SI-10");
    }

    #[test]
    fn normalize_pads_enhancement_number() {
        assert_eq!(ControlId::normalize("AC-2(1)").as_str(), "AC-02(01)");
        assert_eq!(ControlId::normalize("AC-2(13)").as_str(), "AC-02(13)");
    }

    #[test]
    fn normalize_cleans_case_and_whitespace() {
        assert_eq!(ControlId::normalize("  ac-1 ").as_str(), "AC-01");
        assert_eq!(ControlId::normalize("au-12(3)").as_str(), "AU-12(03)");
    }

    #[test]
    fn normalize_keeps_numbers_above_two_digits() {
        assert_eq!(ControlId::normalize("AC-100").as_str(), "AC-100");
        assert_eq!(ControlId::normalize("AC-2(105)").as_str(), "AC-02(105)");
    }

    #[test]
    fn normalize_passes_through_unrecognized_shapes() {
        assert_eq!(ControlId::normalize("").as_str(), "");
        assert_eq!(ControlId::normalize("ZZ99").as_str(), "ZZ99");
        assert_eq!(ControlId::normalize(" appendix j ").as_str(), "APPENDIX J");
        // Three-letter families are cleaned but not re-padded.
        assert_eq!(ControlId::normalize("abc-1").as_str(), "ABC-1");
    }

    #[test]
    fn wellformed_is_wider_than_canonical() {
        let three_letter = ControlId::normalize("ABC-1");
        assert!(three_letter.is_wellformed());
        assert!(!three_letter.is_canonical());

        let canonical = ControlId::normalize("AC-1");
        assert!(canonical.is_wellformed());
        assert!(canonical.is_canonical());

        let junk = ControlId::normalize("XYZQ");
        assert!(!junk.is_wellformed());
        assert!(!junk.is_canonical());
    }

    #[test]
    fn canonical_accepts_enhancements() {
        assert!(ControlId::normalize("AC-01(01)").is_canonical());
        assert!(ControlId::normalize("AC-1(1)").is_canonical());
        assert!(!ControlId::normalize("AC-1(105)").is_canonical());
    }

    #[test]
    fn family_code_of_canonical_id() {
        assert_eq!(ControlId::normalize("AC-1").family_code(), "AC");
        assert_eq!(ControlId::normalize("garbage").family_code(), "Unknown");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = ControlId::normalize("AC-2(1)");
        let json = serde_json::to_string(&id).expect("serialize id");
        assert_eq!(json, "\"AC-02(01)\"");
        let round: ControlId = serde_json::from_str(&json).expect("deserialize id");
        assert_eq!(round, id);
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(raw in "[ a-zA-Z0-9()\\-]{0,16}") {
            let once = ControlId::normalize(&raw);
            let twice = ControlId::normalize(once.as_str());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn canonical_inputs_survive_unchanged(
            family in "[A-Z]{2}",
            number in 1u32..=25,
            enhancement in proptest::option::of(1u32..=30),
        ) {
            let spelled = match enhancement {
                Some(e) => format!("{family}-{number:02}({e:02})"),
                None => format!("{family}-{number:02}"),
            };
            let id = ControlId::normalize(&spelled);
            prop_assert_eq!(id.as_str(), spelled.as_str());
            prop_assert!(id.is_canonical());
        }
    }
}
