//! Adapter for page-extracted plain text.
//!
//! Pages are separated by form feeds. Each page carries a running header on
//! its first line and a `VerDate` production footer, both of which are
//! dropped before the lines are grouped into sections and paragraphs.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument, trace};

use regsum_shared::{RawParagraph, Result};

use crate::DocumentAdapter;

const PAGE_BREAK: char = '\u{0c}';
const FOOTER_MARKER: &str = "VerDate";

/// A line opening a section: `§ 101 Programs.` or `§§ 103-104 [Reserved]`.
static SECTION_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^§{1,2}\s*\d").expect("valid regex"));

/// A line opening with a short index label such as `(a)` or `(12)`.
static INDEX_LABEL_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\w{1,5}\)").expect("valid regex"));

/// A word broken across a line end: `participat-\ning`.
static HYPHEN_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\p{L})-\r?\n(\p{Ll})").expect("valid regex"));

/// Reads form-feed separated pages of extracted text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageTextAdapter;

impl DocumentAdapter for PageTextAdapter {
    #[instrument(skip_all, fields(adapter = "page-text", bytes = content.len()))]
    fn paragraphs(&self, content: &str) -> Result<Vec<RawParagraph>> {
        let mut acc = Accumulator::default();
        let mut pages = 0usize;

        for page in content.split(PAGE_BREAK) {
            pages += 1;
            let body = clean_page(page);
            for line in body.lines() {
                acc.line(line);
            }
        }

        let out = acc.finish();
        debug!(pages, paragraphs = out.len(), "page text parsed");
        Ok(out)
    }

    fn name(&self) -> &str {
        "page-text"
    }
}

/// Drop the running header and footer, then re-join hyphenated words.
fn clean_page(page: &str) -> String {
    let body = page.split_once('\n').map_or("", |(_, rest)| rest);
    let body = match body.find(FOOTER_MARKER) {
        Some(at) => &body[..at],
        None => body,
    };
    HYPHEN_BREAK_RE.replace_all(body, "${1}${2}").into_owned()
}

// ---------------------------------------------------------------------------
// Line grouping
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Accumulator {
    out: Vec<RawParagraph>,
    label: Option<String>,
    current: String,
    emitted: usize,
}

impl Accumulator {
    fn line(&mut self, line: &str) {
        let line = line.trim();

        if SECTION_HEADING_RE.is_match(line) {
            self.finish_section();
            self.label = Some(line.to_string());
            return;
        }

        if self.label.is_none() {
            if !line.is_empty() {
                trace!(line, "skipping text before first section");
            }
            return;
        }

        if line.is_empty() {
            self.flush_paragraph();
            return;
        }

        if INDEX_LABEL_START_RE.is_match(line) {
            self.flush_paragraph();
        }

        if !self.current.is_empty() {
            self.current.push(' ');
        }
        self.current.push_str(line);
    }

    fn flush_paragraph(&mut self) {
        if self.current.is_empty() {
            return;
        }
        if let Some(label) = &self.label {
            let text = std::mem::take(&mut self.current);
            self.out.push(RawParagraph::new(label.clone(), text));
            self.emitted += 1;
        }
    }

    fn finish_section(&mut self) {
        self.flush_paragraph();
        if let Some(label) = self.label.take() {
            if self.emitted == 0 {
                self.out.push(RawParagraph::new(label, String::new()));
            }
        }
        self.emitted = 0;
    }

    fn finish(mut self) -> Vec<RawParagraph> {
        self.finish_section();
        self.out
    }
}
