use tracing::debug;

use super::filter::{apply_filters, FilterSet, RecordFilter};
use super::page::{paginate, PageRequest};
use super::sort::{apply_sort, sort_items, SortKey, SortOrder};
use crate::parser::Record;
use crate::schema::{resolve, FieldPath};

/// Filter then sort. Both steps are independent of each other, so the
/// result is the same either way round; filtering first sorts less.
pub fn query<'a>(records: &'a [Record], filters: &FilterSet, order: &SortOrder) -> Vec<&'a Record> {
    apply_sort(apply_filters(records, filters), order)
}

/// One page of the current view.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPage<'a> {
    pub items: Vec<&'a Record>,
    pub total_pages: usize,
    /// Length of the whole filtered view
    pub total_filtered: usize,
}

/// Owns the loaded records plus the active filters and sort order.
///
/// The filtered+sorted view is kept as record indices and rebuilt whenever
/// records, filters or sort order change; paging only slices it.
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    records: Vec<Record>,
    filters: FilterSet,
    sort: SortOrder,
    view: Vec<usize>,
}

impl QueryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the collection. Filters and sort order are left as they are.
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.refresh();
    }

    pub fn clear(&mut self) {
        self.set_records(Vec::new());
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn has_records(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: FilterSet) {
        self.filters = filters;
        self.refresh();
    }

    pub fn set_filter(&mut self, column: impl Into<FieldPath>, pattern: impl Into<String>) {
        self.filters.set(column, pattern);
        self.refresh();
    }

    pub fn sort(&self) -> &SortOrder {
        &self.sort
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
        self.refresh();
    }

    /// Filters and sort order in one step, rebuilding the view once.
    pub fn set_query(&mut self, filters: FilterSet, sort: SortOrder) {
        self.filters = filters;
        self.sort = sort;
        self.refresh();
    }

    pub fn filtered_len(&self) -> usize {
        self.view.len()
    }

    /// The whole filtered+sorted view.
    pub fn view(&self) -> Vec<&Record> {
        self.view.iter().map(|&i| &self.records[i]).collect()
    }

    pub fn page(&self, request: PageRequest) -> QueryPage<'_> {
        let page = paginate(&self.view, request.page_number, request.page_size);
        QueryPage {
            items: page.items.iter().map(|&i| &self.records[i]).collect(),
            total_pages: page.total_pages,
            total_filtered: self.view.len(),
        }
    }

    fn refresh(&mut self) {
        let filter = RecordFilter::new(&self.filters);
        let matching: Vec<usize> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| filter.should_include(record))
            .map(|(i, _)| i)
            .collect();

        let records = &self.records;
        self.view = sort_items(matching, &self.sort, |&i, column| {
            SortKey::of(resolve(&records[i], column))
        });

        debug!(
            records = self.records.len(),
            filtered = self.view.len(),
            active_filters = self.filters.active_count(),
            sort_key = self.sort.key.as_deref().unwrap_or("-"),
            "Rebuilt query view"
        );
    }
}
