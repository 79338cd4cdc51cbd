//! Section Builder: group raw paragraphs by section number and rank each group.

use std::collections::HashMap;

use tracing::{debug, info, instrument};

use regsum_shared::{RawParagraph, Result, SectionNumber};
use regsum_textrank::{RankOptions, extract_keyword, sentence_count, strip_citation_prefix, summarize};

use crate::index::SectionIndex;
use crate::section::Section;

/// Paragraph texts collected for one section number, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDraft {
    pub number: SectionNumber,
    pub paragraphs: Vec<String>,
}

/// Parse every label and group paragraphs by number in first-appearance order.
///
/// Fails on the first label without a usable number; nothing is dropped silently.
pub fn group_paragraphs(pairs: &[RawParagraph]) -> Result<Vec<SectionDraft>> {
    let mut drafts: Vec<SectionDraft> = Vec::new();
    let mut slots: HashMap<SectionNumber, usize> = HashMap::new();

    for pair in pairs {
        let number = SectionNumber::from_label(&pair.label)?;
        let slot = *slots.entry(number).or_insert_with(|| {
            drafts.push(SectionDraft {
                number,
                paragraphs: Vec::new(),
            });
            drafts.len() - 1
        });
        drafts[slot].paragraphs.push(pair.text.clone());
    }

    Ok(drafts)
}

/// Join paragraphs into the section's raw text.
///
/// Each paragraph loses a leading digit-bearing parenthetical and surrounding
/// whitespace; empty paragraphs are skipped.
pub fn join_paragraphs(paragraphs: &[String]) -> String {
    paragraphs
        .iter()
        .map(|p| strip_citation_prefix(p))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build one section: summary at `summary_sentences / N`, plus the top keyword.
pub fn build_section(draft: &SectionDraft, opts: &RankOptions) -> Section {
    let raw_text = join_paragraphs(&draft.paragraphs);

    let n = sentence_count(&raw_text);
    let ratio = if n == 0 {
        1.0
    } else {
        opts.summary_sentences as f64 / n as f64
    };

    let summary = summarize(&raw_text, ratio, opts);
    let keyword = extract_keyword(&raw_text, opts);

    debug!(number = %draft.number, sentences = n, keyword = %keyword, "section built");
    Section::new(draft.number, raw_text, summary, keyword)
}

/// Build the whole index sequentially.
///
/// A malformed label fails the build and no index is produced.
#[instrument(skip_all, fields(paragraphs = pairs.len()))]
pub fn build_index(pairs: &[RawParagraph], opts: &RankOptions) -> Result<SectionIndex> {
    let drafts = group_paragraphs(pairs)?;
    let sections: Vec<Section> = drafts.iter().map(|d| build_section(d, opts)).collect();

    info!(sections = sections.len(), "index built");
    Ok(SectionIndex::new(sections))
}

#[cfg(test)]
mod tests {
    use super::*;
    use regsum_shared::RegSumError;

    fn pair(label: &str, text: &str) -> RawParagraph {
        RawParagraph::new(label, text)
    }

    #[test]
    fn groups_in_first_appearance_order() {
        let pairs = vec![
            pair("§ 102", "b1"),
            pair("§ 101.5", "a1"),
            pair("§ 102.3", "b2"),
            pair("§ 101", "a2"),
        ];
        let drafts = group_paragraphs(&pairs).expect("group");
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].number, SectionNumber(102));
        assert_eq!(drafts[0].paragraphs, vec!["b1", "b2"]);
        assert_eq!(drafts[1].number, SectionNumber(101));
        assert_eq!(drafts[1].paragraphs, vec!["a1", "a2"]);
    }

    #[test]
    fn join_strips_numeric_prefixes_and_skips_empty() {
        let paragraphs = vec![
            "(1) Lenders apply.".to_string(),
            String::new(),
            "  (a) Review follows. ".to_string(),
        ];
        assert_eq!(join_paragraphs(&paragraphs), "Lenders apply. (a) Review follows.");
    }

    #[test]
    fn malformed_label_fails_the_build() {
        let pairs = vec![pair("§ 101", "Fine."), pair("§", "Orphan.")];
        let err = build_index(&pairs, &RankOptions::default()).expect_err("should fail");
        assert!(matches!(err, RegSumError::MalformedSectionLabel { ref label } if label == "§"));
    }

    #[test]
    fn agency_review_scenario() {
        let pairs = vec![pair(
            "101",
            "(a) The agency shall review applications. (b) Review occurs within 30 days.",
        )];
        let index = build_index(&pairs, &RankOptions::default()).expect("build");
        assert_eq!(index.len(), 1);

        let section = index.find_by_number(SectionNumber(101)).expect("section 101");
        assert!(section.raw_text().contains("The agency shall review applications."));
        assert!(section.raw_text().contains("Review occurs within 30 days."));
        assert!(section.summary().contains("review applications"));
        assert_eq!(section.keyword(), "review");
    }

    #[test]
    fn single_sentence_summary_is_normalized_text() {
        let pairs = vec![pair("§ 7", "(a) Loans are\nmade to firms (see 13 CFR 120.2).")];
        let index = build_index(&pairs, &RankOptions::default()).expect("build");
        let section = index.find_by_number(SectionNumber(7)).expect("section 7");
        assert_eq!(section.summary(), "Loans are made to firms .");
    }

    #[test]
    fn empty_section_keeps_its_number() {
        let pairs = vec![pair("§§ 103-104", "")];
        let index = build_index(&pairs, &RankOptions::default()).expect("build");
        let section = index.find_by_number(SectionNumber(103)).expect("section 103");
        assert_eq!(section.raw_text(), "");
        assert_eq!(section.summary(), "");
        assert_eq!(section.keyword(), "");
    }

    #[test]
    fn long_section_summary_targets_configured_sentences() {
        let text = "Lenders make loans to firms. Firms repay loans to lenders. \
            Lenders report loans to the agency. The agency audits lenders and loans. \
            Firms keep loan records. Records support agency audits.";
        let draft = SectionDraft {
            number: SectionNumber(9),
            paragraphs: vec![text.to_string()],
        };
        let section = build_section(&draft, &RankOptions::default());
        assert_eq!(sentence_count(section.summary()), 2);
    }
}
