//! Display — the snapshot handed to the presentation boundary.

use serde::Serialize;

use crate::parser::Record;
use crate::schema::{display_name, FieldPath, SchemaInfo};

/// One page of rows plus the numbers a pager needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView<'a> {
    pub items: Vec<&'a Record>,
    pub total_pages: usize,
    pub page_number: usize,
    pub page_size: usize,
    pub total_filtered: usize,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplaySnapshot<'a> {
    pub source_name: Option<&'a str>,
    pub ordered_columns: Vec<FieldPath>,
    pub page: PageView<'a>,
    pub schema: &'a SchemaInfo,
}

impl DisplaySnapshot<'_> {
    /// Header labels, in `ordered_columns` order.
    pub fn headers(&self) -> Vec<String> {
        self.ordered_columns.iter().map(|c| display_name(c)).collect()
    }

    /// Load succeeded but no column was detected.
    pub fn has_no_columns(&self) -> bool {
        self.schema.is_empty()
    }
}
