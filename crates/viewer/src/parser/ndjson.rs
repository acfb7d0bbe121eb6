use serde_json::Value;
use tracing::debug;

use super::model::{LoadError, LoadStats, Record};
use super::UTF8_BOM;

/// Parse newline-delimited JSON text into records.
///
/// Blank lines (after trimming) are skipped. Every other line must be a
/// valid JSON value on its own; the first line that is not fails the whole
/// load and no records are returned.
pub fn parse_ndjson(raw: &str, source_name: &str) -> Result<(Vec<Record>, LoadStats), LoadError> {
    let raw = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);
    let mut stats = LoadStats {
        bytes: raw.len(),
        ..LoadStats::default()
    };
    let mut records = Vec::new();

    for (index, line) in raw.lines().enumerate() {
        stats.lines += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            stats.blank_lines += 1;
            continue;
        }

        let value: Value = serde_json::from_str(trimmed).map_err(|e| {
            debug!(source = %source_name, line = index + 1, "Rejecting malformed line: {}", e);
            LoadError::ParseFailure {
                source_name: source_name.to_string(),
                line: index + 1,
                message: e.to_string(),
            }
        })?;

        if value.is_object() {
            stats.object_records += 1;
        }
        records.push(value);
    }

    stats.records = records.len();
    Ok((records, stats))
}
