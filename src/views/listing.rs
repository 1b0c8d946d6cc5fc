//! Filterable list state shared by the blog, project and journal pages.

use crate::db::DataError;
use crate::filter::{CategoryFilter, ContentFilter, Searchable};

/// Records as fetched, the active filter, and the indices that pass it.
/// The visible set is recomputed whenever any of the three changes.
pub struct Listing<T: Searchable> {
    records: Vec<T>,
    filter: ContentFilter<T::Category>,
    visible: Vec<usize>,
    loading: bool,
}

impl<T: Searchable> Default for Listing<T> {
    fn default() -> Self {
        Self::new(ContentFilter::default())
    }
}

impl<T: Searchable> Listing<T> {
    pub fn new(filter: ContentFilter<T::Category>) -> Self {
        Self {
            records: Vec::new(),
            filter,
            visible: Vec::new(),
            loading: true,
        }
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn filter(&self) -> &ContentFilter<T::Category> {
        &self.filter
    }

    pub fn visible(&self) -> impl Iterator<Item = &T> + '_ {
        self.visible.iter().map(|&i| &self.records[i])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn set_category(&mut self, category: CategoryFilter<T::Category>) {
        self.filter = ContentFilter::new(category, self.filter.query());
        self.refresh();
    }

    pub fn set_query(&mut self, query: &str) {
        self.filter = ContentFilter::new(self.filter.category(), query);
        self.refresh();
    }

    pub fn set_records(&mut self, records: Vec<T>) {
        self.records = records;
        self.loading = false;
        self.refresh();
    }

    /// A failed fetch leaves the page empty; `what` names the records in the log line.
    pub fn receive_result(&mut self, what: &'static str, result: Result<Vec<T>, DataError>) {
        match result {
            Ok(records) => self.set_records(records),
            Err(e) => {
                tracing::error!(error = %e, "Error fetching {}", what);
                self.set_records(Vec::new());
            }
        }
    }

    fn refresh(&mut self) {
        self.visible = self.filter.positions(&self.records);
    }
}
