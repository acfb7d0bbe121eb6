//! Schema module — column discovery over semi-structured records.
//!
//! - `path.rs`: dual-mode field path resolution (literal key, then nested)
//! - `rules.rs`: timestamp classification rule table
//! - `infer.rs`: column inference and timestamp detection
//! - `order.rs`: display ordering (timestamp columns first)
//! - `display.rs`: human-facing column names

pub mod path;
pub mod rules;
pub mod infer;
pub mod order;
pub mod display;

use serde::Serialize;

pub use path::resolve;
pub use rules::{TimestampRules, TimestampSignal};
pub use infer::SchemaInferencer;
pub use order::order_columns;
pub use display::display_name;

/// String identifier for a (possibly nested) column. Literal top-level keys
/// may themselves contain dots (`"id.orig_h"`).
pub type FieldPath = String;

/// Inferred column set plus the detected timestamp-column subset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaInfo {
    /// Sorted, unique
    pub columns: Vec<FieldPath>,
    /// Subset of `columns`, in `columns` order
    pub timestamp_columns: Vec<FieldPath>,
}

impl SchemaInfo {
    pub fn empty() -> Self {
        Self::default()
    }

    /// No columns were detected (every record empty or scalar-only).
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.binary_search_by(|c| c.as_str().cmp(column)).is_ok()
    }

    pub fn is_timestamp(&self, column: &str) -> bool {
        self.timestamp_columns.iter().any(|c| c == column)
    }

    /// Columns in display order.
    pub fn ordered_columns(&self) -> Vec<FieldPath> {
        order_columns(&self.columns, &self.timestamp_columns)
    }
}
