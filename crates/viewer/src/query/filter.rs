use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::parser::value::string_form;
use crate::parser::Record;
use crate::schema::{resolve, FieldPath};

/// Per-column substring constraints, ANDed together. An empty pattern
/// imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    patterns: BTreeMap<FieldPath, String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// One empty entry per column.
    pub fn for_columns(columns: &[FieldPath]) -> Self {
        Self {
            patterns: columns.iter().map(|c| (c.clone(), String::new())).collect(),
        }
    }

    pub fn set(&mut self, column: impl Into<FieldPath>, pattern: impl Into<String>) {
        self.patterns.insert(column.into(), pattern.into());
    }

    pub fn with(mut self, column: impl Into<FieldPath>, pattern: impl Into<String>) -> Self {
        self.set(column, pattern);
        self
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.patterns.get(column).map(String::as_str)
    }

    /// Empty every pattern, keeping the keys.
    pub fn clear_patterns(&mut self) {
        for pattern in self.patterns.values_mut() {
            pattern.clear();
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    /// Entries with a non-empty pattern.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.patterns
            .iter()
            .filter(|(_, pattern)| !pattern.is_empty())
            .map(|(column, pattern)| (column.as_str(), pattern.as_str()))
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// A [`FilterSet`] compiled for matching: lowercased patterns, empty ones
/// dropped.
#[derive(Debug, Clone)]
pub struct RecordFilter {
    constraints: Vec<(FieldPath, String)>,
}

impl RecordFilter {
    pub fn new(filters: &FilterSet) -> Self {
        let constraints = filters
            .active()
            .map(|(column, pattern)| (column.to_string(), pattern.to_lowercase()))
            .collect();
        Self { constraints }
    }

    pub fn is_noop(&self) -> bool {
        self.constraints.is_empty()
    }

    /// A record passes when every constraint's lowercased pattern is a
    /// substring of the lowercased string form of its resolved value
    /// (missing values read as the empty string).
    #[inline]
    pub fn should_include(&self, record: &Record) -> bool {
        self.constraints.iter().all(|(column, pattern)| {
            string_form(resolve(record, column))
                .to_lowercase()
                .contains(pattern.as_str())
        })
    }
}

/// Records passing every active constraint, in input order.
pub fn apply_filters<'a, I>(records: I, filters: &FilterSet) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let filter = RecordFilter::new(filters);
    records
        .into_iter()
        .filter(|record| filter.should_include(record))
        .collect()
}
