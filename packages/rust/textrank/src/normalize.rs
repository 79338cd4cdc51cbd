//! Text normalization applied before any ranking.
//!
//! Each pass is a function `&str -> String` applied in sequence. Index labels
//! and citations are removed to a fixpoint because removing an inner
//! parenthetical can expose an outer one, e.g. `"(a(1))"`.

use std::sync::LazyLock;

use regex::Regex;

/// Parenthesized index label of at most five word characters: `(a)`, `(12)`, `(iv)`.
static INDEX_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\w{0,5}\)").expect("index label regex"));

/// Innermost parenthetical that mentions a digit: `(see 13 CFR 301.2)`.
static CITATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^()]*\d[^()]*\)").expect("citation regex"));

/// A digit-bearing parenthetical at the very start of a paragraph.
static CITATION_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\([^()]*\d[^()]*\)").expect("citation prefix regex"));

static NEWLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n").expect("newline regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Run the full normalization pipeline. Pure, deterministic and idempotent.
pub fn normalize(text: &str) -> String {
    let mut result = text.to_string();

    loop {
        let stripped = strip_citations(&strip_index_labels(&result));
        if stripped == result {
            break;
        }
        result = stripped;
    }

    result = collapse_newlines(&result);
    result = collapse_whitespace(&result);

    result
}

/// Remove a leading digit-bearing parenthetical such as `"(1)"` or `"(12 CFR 5)"`.
///
/// Prefixes without a digit, like `"(a)"`, are left for [`normalize`] to deal with.
pub fn strip_citation_prefix(paragraph: &str) -> String {
    CITATION_PREFIX_RE.replace(paragraph, "").trim().to_string()
}

// ---------------------------------------------------------------------------
// Pass 1: Index labels
// ---------------------------------------------------------------------------

fn strip_index_labels(text: &str) -> String {
    INDEX_LABEL_RE.replace_all(text, "").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 2: Citations
// ---------------------------------------------------------------------------

fn strip_citations(text: &str) -> String {
    CITATION_RE.replace_all(text, "").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 3: Newlines
// ---------------------------------------------------------------------------

fn collapse_newlines(text: &str) -> String {
    NEWLINE_RE.replace_all(text, " ").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 4: Whitespace runs
// ---------------------------------------------------------------------------

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_index_labels_removes_short_markers() {
        let result = strip_index_labels("(a) The agency (1) shall (iv) act.");
        assert_eq!(result, " The agency  shall  act.");
    }

    #[test]
    fn strip_index_labels_keeps_long_parentheticals() {
        let input = "The Administrator (or designee) decides.";
        assert_eq!(strip_index_labels(input), input);
    }

    #[test]
    fn strip_citations_removes_digit_spans() {
        let result = strip_citations("Loans are made (see 13 CFR 120.2) promptly.");
        assert_eq!(result, "Loans are made  promptly.");
    }

    #[test]
    fn strip_citations_does_not_span_separate_parentheticals() {
        let result = strip_citations("A (first note) and B (part 121) end.");
        assert_eq!(result, "A (first note) and B  end.");
    }

    #[test]
    fn collapse_newlines_joins_lines() {
        assert_eq!(collapse_newlines("one\ntwo\r\nthree"), "one two three");
    }

    #[test]
    fn normalize_full_pipeline() {
        let input = "(a) The agency shall review\napplications (see 13 CFR 301.2).\n(b) Review occurs within 30 days.";
        assert_eq!(
            normalize(input),
            "The agency shall review applications . Review occurs within 30 days."
        );
    }

    #[test]
    fn normalize_nested_parentheticals_reach_fixpoint() {
        assert_eq!(normalize("Text (a(1)) here."), "Text here.");
        assert_eq!(normalize("Text (x (y 2) 3) here."), "Text here.");
        assert_eq!(normalize("Text (x (y 2) z) here."), "Text (x z) here.");
    }

    #[test]
    fn normalize_multiline_citation() {
        assert_eq!(normalize("Apply (under\n13 CFR 120) now."), "Apply now.");
    }

    #[test]
    fn normalize_empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  \n (a) \n"), "");
    }

    #[test]
    fn normalize_is_idempotent_on_sample() {
        let input = "((a)b) and (c\n(1)) with (note 5)\n\n text.";
        let once = normalize(input);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn strip_citation_prefix_only_strips_digit_prefixes() {
        assert_eq!(strip_citation_prefix("(1) Eligible lenders."), "Eligible lenders.");
        assert_eq!(
            strip_citation_prefix("(12 CFR 5) Eligible lenders."),
            "Eligible lenders."
        );
        // Known asymmetry: a non-digit prefix survives here.
        assert_eq!(strip_citation_prefix("(a) Eligible lenders."), "(a) Eligible lenders.");
        assert_eq!(
            strip_citation_prefix("Lenders (see 13 CFR 120) apply."),
            "Lenders (see 13 CFR 120) apply."
        );
    }
}
