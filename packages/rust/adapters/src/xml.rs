//! Adapter for tree-structured regulatory markup.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, warn};

use regsum_shared::{RawParagraph, Result};

use crate::DocumentAdapter;
use crate::cleanup::strip_markup_noise;

// The HTML parser lowercases element names, so selectors are lowercase.
static SECTION_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("section").expect("valid selector"));
static SECTNO_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("sectno").expect("valid selector"));
static P_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").expect("valid selector"));

/// Reads `SECTION` elements: the `SECTNO` text is the label and each `P` is a paragraph.
///
/// A section without paragraphs yields one empty paragraph so its number is
/// still registered.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlAdapter;

impl DocumentAdapter for XmlAdapter {
    #[instrument(skip_all, fields(adapter = "xml", bytes = content.len()))]
    fn paragraphs(&self, content: &str) -> Result<Vec<RawParagraph>> {
        let cleaned = strip_markup_noise(content);
        let doc = Html::parse_document(&cleaned);

        let mut out = Vec::new();
        let mut sections = 0usize;

        for section in doc.select(&SECTION_SEL) {
            sections += 1;
            let label = section
                .select(&SECTNO_SEL)
                .next()
                .map(|el| element_text(&el))
                .unwrap_or_default();
            if label.is_empty() {
                warn!(section = sections, "section has no SECTNO label");
            }

            let before = out.len();
            for p in section.select(&P_SEL) {
                out.push(RawParagraph::new(label.clone(), element_text(&p)));
            }
            if out.len() == before {
                out.push(RawParagraph::new(label, String::new()));
            }
        }

        debug!(sections, paragraphs = out.len(), "markup parsed");
        Ok(out)
    }

    fn name(&self) -> &str {
        "xml"
    }
}

fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}
