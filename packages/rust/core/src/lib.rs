//! Section building, the section index, and the document load pipeline for regsum.
//!
//! This crate ties the document adapters and the rankers together: raw
//! `(label, paragraph)` pairs become ranked [`Section`]s held in an immutable
//! [`SectionIndex`].

pub mod builder;
pub mod index;
pub mod pipeline;
pub mod section;

pub use builder::{SectionDraft, build_index, build_section, group_paragraphs};
pub use index::SectionIndex;
pub use pipeline::{LoadConfig, LoadStats, ProgressReporter, SilentProgress, load_index};
pub use section::Section;
