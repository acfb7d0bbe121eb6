//! Query module — filter, sort and paginate a record collection.
//!
//! The free functions are pure: the filtered+sorted view depends only on
//! (records, filters, sort order) and a page only on (view length, page
//! request). [`QueryEngine`] owns one collection plus its current filters
//! and sort order and caches the resulting view so page navigation does not
//! re-run filtering or sorting.

pub mod filter;
pub mod sort;
pub mod page;
pub mod engine;

pub use filter::{apply_filters, FilterSet, RecordFilter};
pub use sort::{apply_sort, SortDirection, SortKey, SortOrder};
pub use page::{paginate, total_pages, Page, PageRequest, DEFAULT_PAGE_SIZE};
pub use engine::{query, QueryEngine, QueryPage};
