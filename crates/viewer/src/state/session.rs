//! Session — single owner of the loaded collection, its schema and the view
//! state built on top of it.
//!
//! Loading is replace-then-recompute: parse, infer, reconcile, in that
//! order, on the caller's thread.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use super::display::{DisplaySnapshot, PageView};
use super::view::{reconcile, ViewState};
use crate::conf::{InferenceConfig, Preferences};
use crate::parser::{parse_ndjson, string_form, LoadError, LoadStats, Record};
use crate::pattern::PatternError;
use crate::query::{total_pages, FilterSet, PageRequest, QueryEngine, SortOrder};
use crate::schema::{resolve, FieldPath, SchemaInferencer, SchemaInfo};
use crate::time::TimeParser;

pub struct Session {
    inferencer: SchemaInferencer,
    source_name: Option<String>,
    engine: QueryEngine,
    schema: SchemaInfo,
    timestamp_toggle: BTreeSet<FieldPath>,
    page: PageRequest,
    last_stats: Option<LoadStats>,
}

impl Session {
    pub fn new(inferencer: SchemaInferencer, page_size: usize) -> Self {
        Self {
            inferencer,
            source_name: None,
            engine: QueryEngine::new(),
            schema: SchemaInfo::empty(),
            timestamp_toggle: BTreeSet::new(),
            page: PageRequest::first(page_size),
            last_stats: None,
        }
    }

    pub fn from_config(config: InferenceConfig, page_size: usize) -> Result<Self, PatternError> {
        let inferencer = SchemaInferencer::new(config, TimeParser::new()?)?;
        Ok(Self::new(inferencer, page_size))
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Replace the collection with the records parsed from `raw`.
    ///
    /// On a parse failure the session ends up empty: no records, no columns,
    /// no source name.
    pub fn load_text(&mut self, raw: &str, source_name: &str) -> Result<&SchemaInfo, LoadError> {
        match parse_ndjson(raw, source_name) {
            Ok((records, stats)) => {
                info!(
                    source = %source_name,
                    records = stats.records,
                    blank_lines = stats.blank_lines,
                    bytes = stats.bytes,
                    "Loaded records"
                );
                let schema = self.inferencer.infer_structure(&records);
                self.engine.set_records(records);
                self.source_name = Some(source_name.to_string());
                self.last_stats = Some(stats);
                self.install_schema(schema);
                Ok(&self.schema)
            }
            Err(e) => {
                warn!(source = %source_name, "Load failed, clearing collection: {}", e);
                self.clear();
                Err(e)
            }
        }
    }

    /// Read a file and load it. A read failure leaves the current
    /// collection untouched.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&SchemaInfo, LoadError> {
        let path = path.as_ref();
        let source_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let raw = fs::read_to_string(path).map_err(|source| {
            warn!(path = %path.display(), "Failed to read input: {}", source);
            LoadError::ReadFailure {
                source_name: source_name.clone(),
                source,
            }
        })?;

        self.load_text(&raw, &source_name)
    }

    /// Drop the collection and everything derived from it.
    pub fn clear(&mut self) {
        self.engine.clear();
        self.source_name = None;
        self.last_stats = None;
        self.install_schema(SchemaInfo::empty());
    }

    fn install_schema(&mut self, schema: SchemaInfo) {
        let next = reconcile(&self.view_state(), &schema);
        debug!(
            columns = schema.columns.len(),
            timestamps = schema.timestamp_columns.len(),
            sort_kept = next.sort.is_active(),
            "Reconciled view with new schema"
        );
        self.schema = schema;
        self.apply_view(next);
    }

    fn apply_view(&mut self, view: ViewState) {
        self.engine.set_query(view.filters, view.sort);
        self.timestamp_toggle = view.timestamp_toggle;
        self.page = view.page;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    pub fn schema(&self) -> &SchemaInfo {
        &self.schema
    }

    pub fn records(&self) -> &[Record] {
        self.engine.records()
    }

    pub fn engine(&self) -> &QueryEngine {
        &self.engine
    }

    pub fn last_stats(&self) -> Option<&LoadStats> {
        self.last_stats.as_ref()
    }

    pub fn time_parser(&self) -> &TimeParser {
        self.inferencer.time_parser()
    }

    pub fn view_state(&self) -> ViewState {
        ViewState {
            filters: self.engine.filters().clone(),
            sort: self.engine.sort().clone(),
            timestamp_toggle: self.timestamp_toggle.clone(),
            page: self.page,
        }
    }

    pub fn timestamp_toggle(&self) -> &BTreeSet<FieldPath> {
        &self.timestamp_toggle
    }

    pub fn page_request(&self) -> PageRequest {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.engine.filtered_len(), self.page.page_size)
    }

    // ========================================================================
    // View operations
    // ========================================================================

    /// Set one column's filter pattern and go back to the first page.
    ///
    /// Filter keys stay exactly the schema's columns: a column that is not
    /// in the schema is ignored and `false` returned.
    pub fn set_filter(&mut self, column: &str, pattern: impl Into<String>) -> bool {
        if !self.schema.has_column(column) {
            warn!(column = %column, "Ignoring filter on unknown column");
            return false;
        }
        self.engine.set_filter(column, pattern);
        self.page.page_number = 1;
        true
    }

    pub fn clear_filters(&mut self) {
        let mut filters: FilterSet = self.engine.filters().clone();
        filters.clear_patterns();
        self.engine.set_filters(filters);
        self.page.page_number = 1;
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.engine.set_sort(sort);
    }

    /// Cycle the sort on `column` and return the resulting order.
    pub fn toggle_sort(&mut self, column: &str) -> &SortOrder {
        let next = self.engine.sort().toggled(column);
        self.engine.set_sort(next);
        self.engine.sort()
    }

    /// Move to `page_number`, clamped to the pages that exist (page 1 when
    /// the view is empty). Returns the page actually selected.
    pub fn set_page(&mut self, page_number: usize) -> usize {
        let last = self.total_pages().max(1);
        let clamped = page_number.clamp(1, last);
        if clamped != page_number {
            debug!(requested = page_number, selected = clamped, "Clamped page number");
        }
        self.page.page_number = clamped;
        clamped
    }

    pub fn next_page(&mut self) -> usize {
        self.set_page(self.page.page_number.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> usize {
        self.set_page(self.page.page_number.saturating_sub(1))
    }

    /// Change the page size and go back to the first page. Zero is ignored.
    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size == 0 {
            debug!("Ignoring zero page size");
            return;
        }
        self.page = PageRequest::first(page_size);
    }

    /// Flip human-readable rendering for one detected timestamp column.
    ///
    /// Returns the new state, or `None` if `column` is not a timestamp
    /// column.
    pub fn toggle_timestamp_column(&mut self, column: &str) -> Option<bool> {
        if !self.schema.is_timestamp(column) {
            return None;
        }
        if self.timestamp_toggle.remove(column) {
            Some(false)
        } else {
            self.timestamp_toggle.insert(column.to_string());
            Some(true)
        }
    }

    // ========================================================================
    // Display
    // ========================================================================

    pub fn display(&self) -> DisplaySnapshot<'_> {
        let page = self.engine.page(self.page);
        DisplaySnapshot {
            source_name: self.source_name(),
            ordered_columns: self.schema.ordered_columns(),
            page: PageView {
                items: page.items,
                total_pages: page.total_pages,
                page_number: self.page.page_number,
                page_size: self.page.page_size,
                total_filtered: page.total_filtered,
            },
            schema: &self.schema,
        }
    }

    /// Text for one cell.
    ///
    /// Detected timestamp columns that are toggled on go through the time
    /// formatter; everything else is the plain string form.
    pub fn cell(&self, record: &Record, column: &str, prefs: &Preferences) -> String {
        let value = resolve(record, column);
        if self.schema.is_timestamp(column) && self.timestamp_toggle.contains(column) {
            self.time_parser()
                .format(value, &prefs.timezone, prefs.human_readable)
        } else {
            string_form(value).into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortDirection;

    fn session() -> Session {
        Session::from_config(InferenceConfig::default(), 50).unwrap()
    }

    fn uids(snapshot: &DisplaySnapshot<'_>) -> Vec<String> {
        snapshot
            .page
            .items
            .iter()
            .map(|r| string_form(r.get("uid")).into_owned())
            .collect()
    }

    fn utc_prefs() -> Preferences {
        Preferences {
            timezone: "UTC".to_string(),
            human_readable: true,
            ..Preferences::default()
        }
    }

    // ========================================================================
    // Loading
    // ========================================================================

    #[test]
    fn test_ts_detected_and_sorted_descending() {
        let mut s = session();
        let raw = "{\"ts\":1700000000,\"uid\":\"a\"}\n{\"ts\":1700000100,\"uid\":\"b\"}\n";
        let schema = s.load_text(raw, "conn.log").unwrap();

        assert_eq!(schema.columns, vec!["ts", "uid"]);
        assert_eq!(schema.timestamp_columns, vec!["ts"]);

        s.set_sort(SortOrder::descending("ts"));
        let snapshot = s.display();
        assert_eq!(uids(&snapshot), vec!["b", "a"]);
        assert_eq!(snapshot.ordered_columns, vec!["ts", "uid"]);
        assert_eq!(snapshot.source_name, Some("conn.log"));
    }

    #[test]
    fn test_malformed_line_empties_session() {
        let mut s = session();
        s.load_text("{\"uid\":\"a\"}\n", "good.log").unwrap();
        assert_eq!(s.records().len(), 1);

        let err = s.load_text("{\"uid\":\"a\"}\nnot json\n", "bad.log").unwrap_err();
        assert!(matches!(err, LoadError::ParseFailure { line: 2, .. }));
        assert_eq!(err.source_name(), "bad.log");

        assert!(s.records().is_empty());
        assert!(s.schema().is_empty());
        assert!(s.source_name().is_none());
        assert!(s.view_state().filters.is_empty());
    }

    #[test]
    fn test_read_failure_keeps_collection() {
        let mut s = session();
        s.load_text("{\"uid\":\"a\"}\n", "good.log").unwrap();

        let missing = std::env::temp_dir().join("viewer-session-missing-input.log");
        let _ = std::fs::remove_file(&missing);
        let err = s.load_file(&missing).unwrap_err();

        assert!(matches!(err, LoadError::ReadFailure { .. }));
        assert_eq!(s.records().len(), 1);
        assert_eq!(s.source_name(), Some("good.log"));
    }

    #[test]
    fn test_load_file_uses_file_name() {
        let path = std::env::temp_dir().join("viewer-session-load.log");
        std::fs::write(&path, "{\"uid\":\"x\"}\n\n{\"uid\":\"y\"}\n").unwrap();

        let mut s = session();
        s.load_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(s.source_name(), Some("viewer-session-load.log"));
        assert_eq!(s.records().len(), 2);
        assert_eq!(s.last_stats().map(|st| st.blank_lines), Some(1));
    }

    #[test]
    fn test_reload_reconciles_view() {
        let mut s = session();
        s.load_text("{\"ts\":1700000000,\"uid\":\"a\"}\n", "one.log").unwrap();
        s.set_filter("uid", "a");
        s.set_sort(SortOrder::descending("ts"));
        s.toggle_timestamp_column("ts");

        s.load_text("{\"ts\":1700000000,\"host\":\"h\"}\n", "two.log").unwrap();
        let view = s.view_state();

        assert_eq!(view.filters.keys().collect::<Vec<_>>(), vec!["host", "ts"]);
        assert_eq!(view.filters.active_count(), 0);
        assert_eq!(view.sort, SortOrder::descending("ts"));
        assert!(view.timestamp_toggle.contains("ts"));
        assert_eq!(view.page.page_number, 1);
    }

    // ========================================================================
    // Filtering, sorting, paging
    // ========================================================================

    #[test]
    fn test_filter_is_case_insensitive() {
        let mut s = session();
        s.load_text("{\"uid\":\"CAbc123\"}\n{\"uid\":\"Zzz\"}\n", "conn.log").unwrap();

        s.set_filter("uid", "abc");
        assert_eq!(uids(&s.display()), vec!["CAbc123"]);

        s.clear_filters();
        assert_eq!(s.display().page.total_filtered, 2);
    }

    #[test]
    fn test_filter_on_unknown_column_ignored() {
        let mut s = session();
        s.load_text("{\"uid\":\"a\"}\n", "conn.log").unwrap();

        assert!(!s.set_filter("nope", "z"));
        assert_eq!(s.view_state().filters.keys().collect::<Vec<_>>(), vec!["uid"]);
        assert_eq!(s.display().page.total_filtered, 1);

        assert!(s.set_filter("uid", "A"));
        assert_eq!(s.display().page.total_filtered, 1);
    }

    #[test]
    fn test_toggle_sort_cycles() {
        let mut s = session();
        s.load_text("{\"n\":2}\n{\"n\":1}\n", "n.log").unwrap();

        assert_eq!(s.toggle_sort("n").direction, Some(SortDirection::Ascending));
        assert_eq!(s.toggle_sort("n").direction, Some(SortDirection::Descending));
        assert!(!s.toggle_sort("n").is_active());
    }

    #[test]
    fn test_set_page_clamps() {
        let mut s = session();
        let raw: String = (0..5).map(|i| format!("{{\"n\":{}}}\n", i)).collect();
        s.load_text(&raw, "n.log").unwrap();
        s.set_page_size(2);

        assert_eq!(s.total_pages(), 3);
        assert_eq!(s.set_page(0), 1);
        assert_eq!(s.set_page(9), 3);
        assert_eq!(s.display().page.items.len(), 1);
        assert_eq!(s.prev_page(), 2);
        assert_eq!(s.next_page(), 3);
        assert_eq!(s.next_page(), 3);
    }

    #[test]
    fn test_set_page_on_empty_view() {
        let mut s = session();
        assert_eq!(s.set_page(4), 1);
        assert_eq!(s.display().page.total_pages, 0);
    }

    #[test]
    fn test_set_page_size_resets_page() {
        let mut s = session();
        let raw: String = (0..10).map(|i| format!("{{\"n\":{}}}\n", i)).collect();
        s.load_text(&raw, "n.log").unwrap();
        s.set_page_size(3);
        s.set_page(3);

        s.set_page_size(4);
        assert_eq!(s.page_request(), PageRequest::new(1, 4));

        s.set_page_size(0);
        assert_eq!(s.page_request(), PageRequest::new(1, 4));
    }

    #[test]
    fn test_filter_resets_page() {
        let mut s = session();
        let raw: String = (0..10).map(|i| format!("{{\"n\":{}}}\n", i)).collect();
        s.load_text(&raw, "n.log").unwrap();
        s.set_page_size(2);
        s.set_page(4);

        s.set_filter("n", "1");
        assert_eq!(s.page_request().page_number, 1);
    }

    // ========================================================================
    // Cells
    // ========================================================================

    #[test]
    fn test_cell_formats_enabled_timestamp_column() {
        let mut s = session();
        s.load_text("{\"ts\":1700000000,\"uid\":\"a\"}\n", "conn.log").unwrap();
        let record = s.records()[0].clone();
        let prefs = utc_prefs();

        assert_eq!(s.cell(&record, "ts", &prefs), "2023-11-14 22:13:20 UTC");
        assert_eq!(s.cell(&record, "uid", &prefs), "a");

        assert_eq!(s.toggle_timestamp_column("ts"), Some(false));
        assert_eq!(s.cell(&record, "ts", &prefs), "1700000000");
        assert_eq!(s.toggle_timestamp_column("uid"), None);
    }

    #[test]
    fn test_cell_raw_when_not_human_readable() {
        let mut s = session();
        s.load_text("{\"ts\":1700000000}\n", "conn.log").unwrap();
        let record = s.records()[0].clone();
        let prefs = Preferences {
            human_readable: false,
            ..utc_prefs()
        };

        assert_eq!(s.cell(&record, "ts", &prefs), "1700000000");
        assert_eq!(s.cell(&record, "missing", &prefs), "");
    }
}
