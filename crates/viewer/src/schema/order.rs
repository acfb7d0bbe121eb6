use std::collections::HashSet;

use super::FieldPath;

/// Display order: timestamp columns first (in their given order), then the
/// remaining columns in `all_columns` order.
pub fn order_columns(all_columns: &[FieldPath], timestamp_columns: &[FieldPath]) -> Vec<FieldPath> {
    let timestamps: HashSet<&str> = timestamp_columns.iter().map(String::as_str).collect();

    timestamp_columns
        .iter()
        .chain(all_columns.iter().filter(|column| !timestamps.contains(column.as_str())))
        .cloned()
        .collect()
}
