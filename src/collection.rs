//! The loaded, immutable collection of index records.

use std::collections::{BTreeMap, HashSet};
use std::slice;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::record::IndexRecord;

/// Ordered, immutable sequence of index records.
///
/// Order reflects documentation traversal order (page order, then in-page
/// section order). Cloning is cheap and clones share the same records, so a
/// collection can be handed to any number of readers without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexCollection {
    records: Arc<[IndexRecord]>,
}

impl IndexCollection {
    /// Build a collection from records in traversal order.
    pub fn new(records: Vec<IndexRecord>) -> Self {
        IndexCollection {
            records: records.into(),
        }
    }

    /// An empty collection.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&IndexRecord> {
        self.records.get(index)
    }

    /// All records as a slice, in stored order.
    pub fn records(&self) -> &[IndexRecord] {
        &self.records
    }

    /// Iterate over every record in stored order.
    ///
    /// The iterator is lazy and finite; calling `iter` again restarts from
    /// the first record.
    pub fn iter(&self) -> slice::Iter<'_, IndexRecord> {
        self.records.iter()
    }

    /// Records whose category tag equals `category`.
    pub fn with_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a IndexRecord> + 'a {
        self.iter().filter(move |r| r.category == category)
    }

    /// Records belonging to `page`.
    pub fn on_page<'a>(&'a self, page: &'a str) -> impl Iterator<Item = &'a IndexRecord> + 'a {
        self.iter().filter(move |r| r.page == page)
    }

    /// All records sharing `location`, in stored order.
    pub fn at_location<'a>(
        &'a self,
        location: &'a str,
    ) -> impl Iterator<Item = &'a IndexRecord> + 'a {
        self.iter().filter(move |r| r.location == location)
    }

    /// Distinct page names in first-seen order.
    pub fn pages(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.iter()
            .map(|r| r.page.as_str())
            .filter(|page| seen.insert(*page))
            .collect()
    }

    /// Summary counts over the collection.
    pub fn stats(&self) -> CollectionStats {
        let mut stats = CollectionStats {
            total_records: self.len(),
            ..Default::default()
        };

        for record in self.iter() {
            *stats
                .categories
                .entry(record.category.clone())
                .or_insert(0) += 1;
            *stats.pages.entry(record.page.clone()).or_insert(0) += 1;
            if record.is_structural() {
                stats.empty_text += 1;
            }
        }

        stats
    }
}

impl Default for IndexCollection {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<IndexRecord>> for IndexCollection {
    fn from(records: Vec<IndexRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<IndexRecord> for IndexCollection {
    fn from_iter<I: IntoIterator<Item = IndexRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a IndexCollection {
    type Item = &'a IndexRecord;
    type IntoIter = slice::Iter<'a, IndexRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Counts describing a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub total_records: usize,
    /// Record count per category tag.
    pub categories: BTreeMap<String, usize>,
    /// Record count per page.
    pub pages: BTreeMap<String, usize>,
    /// Records with an empty `text` field.
    pub empty_text: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> IndexCollection {
        IndexCollection::new(vec![
            IndexRecord::new("api/#API", "API", "API", "", "section"),
            IndexRecord::new("api/", "API", "API", "Pages = [\"api.md\"]", "page"),
            IndexRecord::new("api/", "API", "API", "CurrentModule = Supernovae", "page"),
            IndexRecord::new("#Install", "Supernovae", "Install", "", "section"),
            IndexRecord::new("api/#Supernovae.main-Tuple{}", "API", "Supernovae.main", "main()", "method"),
        ])
    }

    #[test]
    fn test_iteration_is_restartable() {
        let collection = sample();
        let first: Vec<_> = collection.iter().map(|r| r.location.as_str()).collect();
        let second: Vec<_> = collection.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
        assert_eq!(first[0], "api/#API");
    }

    #[test]
    fn test_empty_collection() {
        let collection = IndexCollection::empty();
        assert!(collection.is_empty());
        assert_eq!(collection.iter().count(), 0);
        assert_eq!(collection.stats().total_records, 0);
        assert!(collection.pages().is_empty());
    }

    #[test]
    fn test_views() {
        let collection = sample();
        assert_eq!(collection.with_category("section").count(), 2);
        assert_eq!(collection.on_page("Supernovae").count(), 1);

        let shared: Vec<_> = collection.at_location("api/").collect();
        assert_eq!(shared.len(), 2);
        assert_eq!(shared[0].text, "Pages = [\"api.md\"]");
        assert_eq!(shared[1].text, "CurrentModule = Supernovae");

        assert_eq!(collection.pages(), vec!["API", "Supernovae"]);
    }

    #[test]
    fn test_pages_keep_first_seen_order_when_interleaved() {
        let collection: IndexCollection = ["B", "A", "B", "C", "A", "C"]
            .iter()
            .map(|page| IndexRecord::new("", *page, *page, "", "page"))
            .collect();
        assert_eq!(collection.pages(), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_stats() {
        let stats = sample().stats();
        assert_eq!(stats.total_records, 5);
        assert_eq!(stats.categories.get("page"), Some(&2));
        assert_eq!(stats.categories.get("section"), Some(&2));
        assert_eq!(stats.categories.get("method"), Some(&1));
        assert_eq!(stats.pages.get("API"), Some(&4));
        assert_eq!(stats.empty_text, 2);
    }

    #[test]
    fn test_clones_share_records() {
        let collection = sample();
        let clone = collection.clone();
        assert!(std::ptr::eq(collection.records(), clone.records()));
        assert_eq!(collection, clone);
    }

    #[test]
    fn test_collection_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<IndexCollection>();
    }
}
