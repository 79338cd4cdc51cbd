//! Core domain types shared by the adapters, the rankers, and the index.

use serde::{Deserialize, Serialize};

use crate::error::{RegSumError, Result};

// ---------------------------------------------------------------------------
// SectionNumber
// ---------------------------------------------------------------------------

/// Number of a regulatory section, e.g. `101` for `§ 101.100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionNumber(pub u32);

impl SectionNumber {
    /// Derive a section number from a raw label as found in the source.
    ///
    /// Everything except digits, `-` and `.` is dropped, the remainder is cut
    /// at the first `.` so sub-sections collapse into their parent, and the
    /// first run of digits is the number. `"§ 101.100"` and `"§§ 101.2-101.5"`
    /// both yield `101`.
    pub fn from_label(label: &str) -> Result<Self> {
        let kept: String = label
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '.')
            .collect();

        let parent = kept.split('.').next().unwrap_or_default();

        let digits: String = parent
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(char::is_ascii_digit)
            .collect();

        if digits.is_empty() {
            return Err(RegSumError::malformed_label(label));
        }

        digits
            .parse::<u32>()
            .map(Self)
            .map_err(|_| RegSumError::malformed_label(label))
    }
}

impl std::fmt::Display for SectionNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SectionNumber {
    fn from(n: u32) -> Self {
        Self(n)
    }
}

// ---------------------------------------------------------------------------
// RawParagraph
// ---------------------------------------------------------------------------

/// One `(rawLabel, paragraphText)` pair emitted by a document adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParagraph {
    /// Section label before numeric normalization (e.g. `"§ 101.100"`).
    pub label: String,
    /// Paragraph text; may be empty when a section has no prose.
    pub text: String,
}

impl RawParagraph {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_with_subsection_collapses_to_parent() {
        let n = SectionNumber::from_label("§ 101.100").expect("parse label");
        assert_eq!(n, SectionNumber(101));
    }

    #[test]
    fn label_range_uses_first_number() {
        let n = SectionNumber::from_label("§§ 121.1001-121.1010").expect("parse label");
        assert_eq!(n.0, 121);
    }

    #[test]
    fn plain_number_label() {
        assert_eq!(SectionNumber::from_label("101").unwrap().0, 101);
        assert_eq!(SectionNumber::from_label("  § 7 ").unwrap().0, 7);
    }

    #[test]
    fn hyphenated_label_without_period() {
        assert_eq!(SectionNumber::from_label("120-1").unwrap().0, 120);
    }

    #[test]
    fn label_without_digits_is_malformed() {
        let err = SectionNumber::from_label("§").unwrap_err();
        assert!(matches!(err, RegSumError::MalformedSectionLabel { .. }));

        assert!(SectionNumber::from_label("").is_err());
        assert!(SectionNumber::from_label("Appendix A").is_err());
    }

    #[test]
    fn digits_only_after_first_period_are_malformed() {
        // ".5" is cut to "" at the first period.
        assert!(SectionNumber::from_label("Sec. 5").is_err());
    }

    #[test]
    fn overflowing_number_is_malformed() {
        assert!(SectionNumber::from_label("§ 99999999999999").is_err());
    }

    #[test]
    fn display_prints_bare_number() {
        assert_eq!(SectionNumber(301).to_string(), "301");
    }
}
