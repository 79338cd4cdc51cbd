//! Deterministic, locale-independent sentence splitting.
//!
//! A boundary is a `.`, `?` or `!` (plus any closing quotes or brackets),
//! followed by whitespace and then an uppercase letter. A period that ends a
//! known abbreviation, a single-letter initial, or a dotted letter token such
//! as `U.S.` never ends a sentence. Dotted numbers (`120.10.`) and lettered
//! units (`Subpart B.`) do.

/// Abbreviations common in regulatory prose, lowercase and without the final period.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "no", "nos", "sec", "secs", "ch", "pt",
    "par", "para", "art", "fig", "vol", "cf", "etc", "seq", "approx", "dept", "govt", "inc",
    "ltd", "co", "corp", "vs", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept",
    "oct", "nov", "dec",
];

const CLOSERS: &[char] = &['"', '\'', ')', ']', '\u{201d}', '\u{2019}'];

/// Split `text` into trimmed, non-empty sentence slices in source order.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];
        if !matches!(c, '.' | '?' | '!') {
            i += 1;
            continue;
        }

        // Swallow closing punctuation that belongs to this sentence.
        let mut end_idx = i + 1;
        while end_idx < chars.len() && CLOSERS.contains(&chars[end_idx].1) {
            end_idx += 1;
        }

        // Require whitespace, then an uppercase letter.
        let mut next = end_idx;
        while next < chars.len() && chars[next].1.is_whitespace() {
            next += 1;
        }
        let has_gap = next > end_idx;
        let starts_upper = next < chars.len() && chars[next].1.is_uppercase();

        if has_gap && starts_upper && !(c == '.' && ends_abbreviation(&text[start..pos])) {
            let end_byte = chars.get(end_idx).map_or(text.len(), |&(b, _)| b);
            push_trimmed(&mut sentences, &text[start..end_byte]);
            start = chars[next].0;
            i = next;
        } else {
            i = end_idx;
        }
    }

    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, piece: &'a str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        out.push(trimmed);
    }
}

/// Words that name a lettered unit, so a single letter after them is a
/// designation ("Subpart B.") and not an initial.
const DESIGNATORS: &[&str] = &[
    "part", "subpart", "appendix", "exhibit", "schedule", "table", "annex", "title", "chapter",
    "subchapter", "section", "paragraph", "article", "form", "class", "tier", "category",
];

/// Whether the text right before a period is an abbreviation.
fn ends_abbreviation(before: &str) -> bool {
    if before.ends_with(char::is_whitespace) {
        return false;
    }

    let mut words = before
        .rsplit(char::is_whitespace)
        .filter(|w| !w.is_empty())
        .map(|w| w.trim_start_matches(|c: char| !c.is_alphanumeric()));
    let word = words.next().unwrap_or_default();

    if word.is_empty() {
        return false;
    }

    // Dotted forms ("U.S", "e.g", "i.e") but not numbers like "120.10".
    if word.contains('.') {
        return word
            .split('.')
            .filter(|part| !part.is_empty())
            .all(|part| part.chars().all(char::is_alphabetic));
    }

    let mut letters = word.chars();
    if let (Some(first), None) = (letters.next(), letters.next()) {
        let designated = words
            .next()
            .is_some_and(|prev| DESIGNATORS.contains(&prev.to_lowercase().as_str()));
        return first.is_alphabetic() && !designated;
    }

    ABBREVIATIONS.contains(&word.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminal_punctuation() {
        let sentences = split_sentences("The agency acts. Does it review? Yes! Done.");
        assert_eq!(
            sentences,
            vec!["The agency acts.", "Does it review?", "Yes!", "Done."]
        );
    }

    #[test]
    fn requires_capital_after_boundary() {
        let sentences = split_sentences("Amounts are in 1.5 percent increments. see below.");
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn abbreviations_do_not_split() {
        let sentences = split_sentences(
            "Apply to Dr. Smith at the U.S. Small Business Administration. Then wait.",
        );
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].ends_with("Administration."));
    }

    #[test]
    fn initials_do_not_split() {
        let sentences = split_sentences("Signed by J. Doe. Filed later.");
        assert_eq!(sentences, vec!["Signed by J. Doe.", "Filed later."]);
    }

    #[test]
    fn dotted_numbers_end_sentences() {
        let sentences = split_sentences(
            "Loans are defined in 13 CFR 120.10. The lender must apply. \
             Apply under Subpart B. Each lender files.",
        );
        assert_eq!(
            sentences,
            vec![
                "Loans are defined in 13 CFR 120.10.",
                "The lender must apply.",
                "Apply under Subpart B.",
                "Each lender files.",
            ]
        );
    }

    #[test]
    fn lettered_units_end_sentences_but_initials_do_not() {
        let sentences = split_sentences(
            "See Part A. Lenders sign with initial J. Doe countersigns. See appendix C. Done.",
        );
        assert_eq!(
            sentences,
            vec![
                "See Part A.",
                "Lenders sign with initial J. Doe countersigns.",
                "See appendix C.",
                "Done.",
            ]
        );
    }

    #[test]
    fn dotted_letter_forms_with_numbers_still_split() {
        let sentences = split_sentences("It follows e.g. Smith. Rates reach 5.25. Then stop.");
        assert_eq!(sentences, vec!["It follows e.g. Smith.", "Rates reach 5.25.", "Then stop."]);
    }

    #[test]
    fn closing_quotes_stay_with_sentence() {
        let sentences = split_sentences("It is called \"the program.\" The program runs.");
        assert_eq!(
            sentences,
            vec!["It is called \"the program.\"", "The program runs."]
        );
    }

    #[test]
    fn detached_period_still_splits() {
        let sentences = split_sentences("The agency shall review applications . Review occurs.");
        assert_eq!(
            sentences,
            vec!["The agency shall review applications .", "Review occurs."]
        );
    }

    #[test]
    fn empty_and_unterminated_text() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
        assert_eq!(split_sentences("no terminal punctuation"), vec!["no terminal punctuation"]);
    }
}
