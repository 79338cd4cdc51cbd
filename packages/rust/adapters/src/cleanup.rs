//! Noise-stripping passes run on raw markup before it is parsed.
//!
//! Each pass is a function `&str -> String` applied in sequence.

use std::sync::LazyLock;

use regex::Regex;

/// Run every markup cleanup pass.
pub(crate) fn strip_markup_noise(xml: &str) -> String {
    let mut result = xml.to_string();

    result = drop_tables(&result);
    result = strip_emphasis(&result);
    result = strip_page_breaks(&result);
    result = rename_raw_text_tags(&result);

    result
}

// ---------------------------------------------------------------------------
// Pass 1: Tables
// ---------------------------------------------------------------------------

/// Remove `<GPOTABLE>` blocks with everything inside them.
fn drop_tables(xml: &str) -> String {
    static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?s)<GPOTABLE\b[^>]*>.*?</GPOTABLE>").expect("valid regex")
    });

    TABLE_RE.replace_all(xml, "").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 2: Emphasis tags
// ---------------------------------------------------------------------------

/// Unwrap `<E T="..">` emphasis, keeping the emphasized text.
fn strip_emphasis(xml: &str) -> String {
    static EMPHASIS_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"<E\b[^>]*>|</E>").expect("valid regex"));

    EMPHASIS_RE.replace_all(xml, "").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 3: Page-break markers
// ---------------------------------------------------------------------------

fn strip_page_breaks(xml: &str) -> String {
    static PRTPAGE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"<PRTPAGE\b[^>]*/>").expect("valid regex"));

    PRTPAGE_RE.replace_all(xml, "").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 4: HTML raw-text element names
// ---------------------------------------------------------------------------

/// Prefix element names the HTML parser reads as raw text (`TITLE`, `STYLE`,
/// `TEXTAREA`, ...) with `X-` so their children are parsed as markup.
fn rename_raw_text_tags(xml: &str) -> String {
    static RAW_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(
            r"(?i)<(/?)(title|style|textarea|script|xmp|iframe|noembed|noframes|noscript|plaintext)\b",
        )
        .expect("valid regex")
    });

    RAW_TEXT_RE.replace_all(xml, "<${1}X-${2}").into_owned()
}
