use std::collections::BTreeSet;

use serde_json::{Map, Value};
use tracing::debug;

use super::path::resolve;
use super::rules::TimestampRules;
use super::{FieldPath, SchemaInfo};
use crate::conf::InferenceConfig;
use crate::parser::Record;
use crate::pattern::PatternError;
use crate::time::TimeParser;

/// Discovers the column set of a record collection and flags timestamp
/// columns.
#[derive(Clone)]
pub struct SchemaInferencer {
    config: InferenceConfig,
    rules: TimestampRules,
}

impl SchemaInferencer {
    pub fn new(config: InferenceConfig, time: TimeParser) -> Result<Self, PatternError> {
        let rules = TimestampRules::new(time, config.inspected_values)?;
        Ok(Self { config, rules })
    }

    pub fn with_defaults() -> Result<Self, PatternError> {
        Self::new(InferenceConfig::default(), TimeParser::new()?)
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    pub fn rules(&self) -> &TimestampRules {
        &self.rules
    }

    pub fn time_parser(&self) -> &TimeParser {
        self.rules.time_parser()
    }

    /// Whether a column looks time-valued, by name or by its samples.
    pub fn classify(&self, column: &str, samples: &[&Value]) -> bool {
        self.rules.classify(column, samples)
    }

    /// Sorted, deduplicated set of paths carrying a meaningful value in at
    /// least one record.
    pub fn infer_columns(&self, records: &[Record]) -> Vec<FieldPath> {
        infer_columns(records, self.config.max_depth)
    }

    /// Sample values for a column: the present, non-null, non-empty values
    /// of the first `sample_records` records, at most `sample_values` of them.
    pub fn samples<'a>(&self, records: &'a [Record], column: &str) -> Vec<&'a Value> {
        records
            .iter()
            .take(self.config.sample_records)
            .filter_map(|record| resolve(record, column))
            .filter(|value| is_meaningful(value))
            .take(self.config.sample_values)
            .collect()
    }

    /// Full schema for a collection. An empty collection yields an empty
    /// schema.
    pub fn infer_structure(&self, records: &[Record]) -> SchemaInfo {
        if records.is_empty() {
            return SchemaInfo::empty();
        }

        let columns = self.infer_columns(records);
        let timestamp_columns: Vec<FieldPath> = columns
            .iter()
            .filter(|column| {
                let samples = self.samples(records, column);
                match self.rules.classify_detail(column, &samples) {
                    Some(signal) => {
                        debug!(
                            column = %column,
                            signal = signal.as_str(),
                            by_name = signal.is_name_signal(),
                            "Detected timestamp column"
                        );
                        true
                    }
                    None => false,
                }
            })
            .cloned()
            .collect();

        debug!(
            records = records.len(),
            columns = columns.len(),
            timestamp_columns = timestamp_columns.len(),
            "Inferred schema"
        );

        SchemaInfo {
            columns,
            timestamp_columns,
        }
    }
}

/// Null and the empty string carry no value; everything else does,
/// including nested objects and arrays.
pub fn is_meaningful(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Column paths across all records, with nested objects walked up to
/// `max_depth` path segments. Arrays are never walked.
///
/// A path is kept only if it resolves to a meaningful value in the record
/// it was found in. Joined paths that `resolve` cannot reach (nested keys
/// containing dots) or that a literal dotted key shadows are dropped.
pub fn infer_columns(records: &[Record], max_depth: usize) -> Vec<FieldPath> {
    let mut paths = BTreeSet::new();
    for record in records {
        if let Value::Object(object) = record {
            collect_paths(record, object, None, 1, max_depth, &mut paths);
        }
    }
    paths.into_iter().collect()
}

fn collect_paths(
    record: &Record,
    object: &Map<String, Value>,
    prefix: Option<&str>,
    depth: usize,
    max_depth: usize,
    paths: &mut BTreeSet<FieldPath>,
) {
    for (key, value) in object {
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key.clone(),
        };

        if let Value::Object(child) = value {
            // Dotted keys are leaves: nothing below them is addressable.
            if !key.contains('.') && depth < max_depth {
                collect_paths(record, child, Some(&path), depth + 1, max_depth, paths);
            }
        }

        if !paths.contains(&path) && resolve(record, &path).is_some_and(is_meaningful) {
            paths.insert(path);
        }
    }
}
