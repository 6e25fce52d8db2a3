//! Identity deduplication.
//!
//! Collapses the concatenated enumeration stream into a [`PageSet`]: one
//! record per slug, first-seen wins. Later records with a known slug are
//! dropped silently and only counted, so overlapping shapes shrink the page
//! count instead of producing conflicting pages.
//!
//! The seen-slug state lives inside the `PageSet` value that is passed into
//! and returned from [`deduplicate`]. Nothing is global, so two runs in one
//! process never see each other's slugs.

use crate::types::PageRecord;
use std::collections::HashMap;

/// Deduplicated, insertion-ordered mapping from slug to page record.
#[derive(Debug, Clone, Default)]
pub struct PageSet {
    records: Vec<PageRecord>,
    index: HashMap<String, usize>,
    duplicates: usize,
}

impl PageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record` unless its slug is already present.
    ///
    /// Returns `true` when the record was kept.
    pub fn insert(&mut self, record: PageRecord) -> bool {
        if self.index.contains_key(&record.slug) {
            self.duplicates += 1;
            return false;
        }
        self.index.insert(record.slug.clone(), self.records.len());
        self.records.push(record);
        true
    }

    pub fn get(&self, slug: &str) -> Option<&PageRecord> {
        self.index.get(slug).map(|&i| &self.records[i])
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.index.contains_key(slug)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records dropped because their slug was already taken.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Records in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, PageRecord> {
        self.records.iter()
    }

    /// Records in first-seen order, as a slice for parallel iteration.
    pub fn as_slice(&self) -> &[PageRecord] {
        &self.records
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.slug.as_str())
    }
}

/// Feed `records` into `pages`, keeping the first record per slug.
///
/// Consumption is strictly sequential: the order of `records` decides which
/// record survives a collision.
pub fn deduplicate<I>(records: I, mut pages: PageSet) -> PageSet
where
    I: IntoIterator<Item = PageRecord>,
{
    for record in records {
        pages.insert(record);
    }
    pages
}
