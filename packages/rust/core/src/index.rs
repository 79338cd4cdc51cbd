//! Section Index: immutable lookup by number and by keyword.

use std::collections::HashMap;

use regsum_shared::SectionNumber;

use crate::section::Section;

/// Ordered, read-only collection of sections.
///
/// Built once; lookups take `&self` so the index can be shared freely across
/// threads without locking.
#[derive(Debug, Clone, Default)]
pub struct SectionIndex {
    sections: Vec<Section>,
    by_number: HashMap<SectionNumber, usize>,
    by_keyword: HashMap<String, Vec<usize>>,
}

impl SectionIndex {
    /// Index `sections` in the given order. Callers guarantee unique numbers;
    /// on a duplicate the first section wins.
    pub(crate) fn new(sections: Vec<Section>) -> Self {
        let mut by_number = HashMap::with_capacity(sections.len());
        let mut by_keyword: HashMap<String, Vec<usize>> = HashMap::new();

        for (pos, section) in sections.iter().enumerate() {
            by_number.entry(section.number()).or_insert(pos);
            if !section.keyword().is_empty() {
                by_keyword
                    .entry(section.keyword().to_lowercase())
                    .or_default()
                    .push(pos);
            }
        }

        Self {
            sections,
            by_number,
            by_keyword,
        }
    }

    /// Exact number lookup.
    pub fn find_by_number(&self, number: SectionNumber) -> Option<&Section> {
        self.by_number.get(&number).map(|&pos| &self.sections[pos])
    }

    /// All sections whose keyword equals `keyword`, ignoring case, in index order.
    ///
    /// Surrounding whitespace in `keyword` is ignored, so `" Loans "` finds
    /// sections keyed `loans`. A blank query matches nothing.
    pub fn find_by_keyword(&self, keyword: &str) -> Vec<&Section> {
        let query = keyword.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.by_keyword
            .get(&query)
            .map(|positions| positions.iter().map(|&pos| &self.sections[pos]).collect())
            .unwrap_or_default()
    }

    /// Section numbers in index order.
    pub fn numbers(&self) -> Vec<SectionNumber> {
        self.sections.iter().map(Section::number).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl<'a> IntoIterator for &'a SectionIndex {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
