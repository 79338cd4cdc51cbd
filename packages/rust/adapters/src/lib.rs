//! Document adapters: turn a source document into ordered `(label, paragraph)` pairs.
//!
//! Two source formats are supported:
//! - structured markup (`SECTION` / `SECTNO` / `P`), via [`XmlAdapter`]
//! - page-extracted plain text with form-feed page breaks, via [`PageTextAdapter`]
//!
//! Adapters do not interpret labels; numeric parsing happens at index build time.

mod cleanup;
mod page_text;
mod xml;

use std::path::Path;

use regsum_shared::{RawParagraph, Result, SourceFormat};

pub use page_text::PageTextAdapter;
pub use xml::XmlAdapter;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Extracts raw paragraphs from one source format.
pub trait DocumentAdapter: Send + Sync {
    /// All paragraphs in document order, each tagged with its section label as found.
    fn paragraphs(&self, content: &str) -> Result<Vec<RawParagraph>>;

    /// Human-readable adapter name for tracing.
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Resolve `Auto` to a concrete format by sniffing the path and content.
///
/// Markup wins when the path ends in `.xml` or the content starts with `<`.
pub fn resolve_format(format: SourceFormat, path: Option<&Path>, content: &str) -> SourceFormat {
    match format {
        SourceFormat::Auto => {
            let xml_path = path
                .and_then(Path::extension)
                .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
            if xml_path || content.trim_start().starts_with('<') {
                SourceFormat::Xml
            } else {
                SourceFormat::PageText
            }
        }
        concrete => concrete,
    }
}

/// Pick the adapter for a document.
pub fn adapter_for(
    format: SourceFormat,
    path: Option<&Path>,
    content: &str,
) -> Box<dyn DocumentAdapter> {
    match resolve_format(format, path, content) {
        SourceFormat::Xml => Box::new(XmlAdapter),
        _ => Box::new(PageTextAdapter),
    }
}
