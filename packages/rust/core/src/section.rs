//! The `Section` entity.

use serde::Serialize;

use regsum_shared::SectionNumber;
use regsum_textrank::{RankOptions, summarize};

/// One numbered regulatory unit with its derived summary and keyword.
///
/// Sections are created by the builder and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    number: SectionNumber,
    raw_text: String,
    summary: String,
    keyword: String,
}

impl Section {
    pub(crate) fn new(
        number: SectionNumber,
        raw_text: String,
        summary: String,
        keyword: String,
    ) -> Self {
        Self {
            number,
            raw_text,
            summary,
            keyword,
        }
    }

    pub fn number(&self) -> SectionNumber {
        self.number
    }

    /// Paragraphs joined with single spaces, citation prefixes removed.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Lowercase keyword, possibly empty.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Case-insensitive exact match against the keyword, after trimming
    /// surrounding whitespace from `query`. Blank queries never match.
    pub fn matches_keyword(&self, query: &str) -> bool {
        let query = query.trim();
        !query.is_empty() && self.keyword.to_lowercase() == query.to_lowercase()
    }

    /// Recompute the summary at a different ratio without touching this section.
    pub fn summary_at(&self, ratio: f64, opts: &RankOptions) -> String {
        summarize(&self.raw_text, ratio, opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(keyword: &str) -> Section {
        Section::new(
            SectionNumber(7),
            "Lenders file reports. Reports reach the agency. Lenders keep copies of reports."
                .to_string(),
            "Lenders file reports.".to_string(),
            keyword.to_string(),
        )
    }

    #[test]
    fn keyword_match_ignores_case_and_padding() {
        let s = section("reports");
        assert!(s.matches_keyword("reports"));
        assert!(s.matches_keyword("REPORTS"));
        assert!(s.matches_keyword("  Reports "));
        assert!(!s.matches_keyword("report"));
    }

    #[test]
    fn blank_query_never_matches() {
        let s = section("");
        assert!(!s.matches_keyword(""));
        assert!(!s.matches_keyword("   "));
    }

    #[test]
    fn summary_at_full_ratio_keeps_every_sentence() {
        let s = section("reports");
        let full = s.summary_at(1.0, &RankOptions::default());
        assert_eq!(full, s.raw_text());
        assert_eq!(s.summary(), "Lenders file reports.");
    }

    #[test]
    fn serializes_public_fields() {
        let json = serde_json::to_value(section("reports")).expect("serialize");
        assert_eq!(json["number"], 7);
        assert_eq!(json["keyword"], "reports");
        assert!(json["raw_text"].as_str().is_some());
    }
}
