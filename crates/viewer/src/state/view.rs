//! View — UI state keyed by discovered columns, and its reconciliation.

use std::collections::BTreeSet;

use tracing::debug;

use crate::query::{FilterSet, PageRequest, SortOrder};
use crate::schema::{FieldPath, SchemaInfo};

/// Filters, sort order, timestamp toggles and page position of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub filters: FilterSet,
    pub sort: SortOrder,
    /// Timestamp columns currently rendered human-readable
    pub timestamp_toggle: BTreeSet<FieldPath>,
    pub page: PageRequest,
}

/// Rebuild view state for a freshly inferred schema.
///
/// Filter keys become exactly the new columns, all patterns empty; every
/// detected timestamp column is toggled on; the sort order survives only if
/// its column still exists; paging restarts at page 1 with the old page
/// size.
pub fn reconcile(old: &ViewState, schema: &SchemaInfo) -> ViewState {
    let sort = match old.sort.key.as_deref() {
        Some(key) if schema.has_column(key) => old.sort.clone(),
        Some(key) => {
            debug!(column = %key, "Dropping sort on column missing from new schema");
            SortOrder::none()
        }
        None => SortOrder::none(),
    };

    ViewState {
        filters: FilterSet::for_columns(&schema.columns),
        sort,
        timestamp_toggle: schema.timestamp_columns.iter().cloned().collect(),
        page: PageRequest::first(old.page.page_size),
    }
}
