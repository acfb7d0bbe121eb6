//! Rules — timestamp classification heuristics as an explicit rule table.
//!
//! A column is timestamp-like when its name matches one of [`NAME_RULES`],
//! or when one of its first few sample values has a timestamp shape. Either
//! signal alone is enough.

use chrono::Datelike;
use serde_json::Value;

use crate::parser::value::value_text;
use crate::pattern::{PatternError, RuleTable};
use crate::time::{TimeParser, TimeShape};

/// Parsed dates must fall after this year to count as a value signal.
pub const MIN_PLAUSIBLE_YEAR: i32 = 1990;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampSignal {
    /// Name is a well-known timestamp key (`ts`, `@timestamp`, ...)
    ExactName,
    /// Name starts like a timestamp (`time*`, `created*`, ...)
    NamePrefix,
    /// Name ends like a timestamp (`*_time`, `*_at`, ...)
    NameSuffix,
    /// A sample is a 10-digit number
    UnixSeconds,
    /// A sample is a 13-digit number
    UnixMillis,
    /// A sample starts with an ISO-8601 date-time
    IsoDateTime,
    /// A sample parses to a date after [`MIN_PLAUSIBLE_YEAR`]
    ParsedDate,
}

impl TimestampSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimestampSignal::ExactName => "exact_name",
            TimestampSignal::NamePrefix => "name_prefix",
            TimestampSignal::NameSuffix => "name_suffix",
            TimestampSignal::UnixSeconds => "unix_seconds",
            TimestampSignal::UnixMillis => "unix_millis",
            TimestampSignal::IsoDateTime => "iso_date_time",
            TimestampSignal::ParsedDate => "parsed_date",
        }
    }

    pub fn is_name_signal(&self) -> bool {
        matches!(
            self,
            TimestampSignal::ExactName | TimestampSignal::NamePrefix | TimestampSignal::NameSuffix
        )
    }
}

/// Column-name rules, matched case-insensitively in this order.
pub const NAME_RULES: &[(TimestampSignal, &str)] = &[
    (
        TimestampSignal::ExactName,
        r"^(ts|time|timestamp|@timestamp|date|datetime|when|at)$",
    ),
    (
        TimestampSignal::NamePrefix,
        r"^(time|date|created|updated|modified|start|end|last_|first_)",
    ),
    (TimestampSignal::NameSuffix, r"(_time|_ts|_date|_at|timestamp)$"),
];

/// Compiled name rules plus the value-shape checks backed by [`TimeParser`].
#[derive(Clone)]
pub struct TimestampRules {
    names: RuleTable<TimestampSignal>,
    time: TimeParser,
    inspected_values: usize,
}

impl TimestampRules {
    pub fn new(time: TimeParser, inspected_values: usize) -> Result<Self, PatternError> {
        Ok(Self {
            names: RuleTable::compile(NAME_RULES, false)?,
            time,
            inspected_values,
        })
    }

    pub fn time_parser(&self) -> &TimeParser {
        &self.time
    }

    /// Name signal for a column. Nested paths are checked whole and by their
    /// last segment (`conn.start_time` matches through `start_time`).
    pub fn name_signal(&self, column: &str) -> Option<TimestampSignal> {
        self.names.first_match(column).or_else(|| {
            column
                .rsplit_once('.')
                .and_then(|(_, last)| self.names.first_match(last))
        })
    }

    /// Value signal for a single sample. Only strings and numbers qualify.
    pub fn value_signal(&self, value: &Value) -> Option<TimestampSignal> {
        if !(value.is_string() || value.is_number()) {
            return None;
        }
        let text = value_text(value);
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        match self.time.shape(text) {
            Some(TimeShape::UnixSeconds) => Some(TimestampSignal::UnixSeconds),
            Some(TimeShape::UnixMillis) => Some(TimestampSignal::UnixMillis),
            Some(TimeShape::IsoDateTime) => Some(TimestampSignal::IsoDateTime),
            Some(TimeShape::FractionalSeconds) | None => self
                .time
                .parse_str(text)
                .filter(|instant| instant.year() > MIN_PLAUSIBLE_YEAR)
                .map(|_| TimestampSignal::ParsedDate),
        }
    }

    /// The signal that makes a column timestamp-like, if any. Only the first
    /// `inspected_values` samples are looked at.
    pub fn classify_detail(&self, column: &str, samples: &[&Value]) -> Option<TimestampSignal> {
        self.name_signal(column).or_else(|| {
            samples
                .iter()
                .take(self.inspected_values)
                .find_map(|value| self.value_signal(value))
        })
    }

    pub fn classify(&self, column: &str, samples: &[&Value]) -> bool {
        self.classify_detail(column, samples).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rules() -> TimestampRules {
        let time = TimeParser::new().expect("Failed to build time parser");
        TimestampRules::new(time, 3).expect("Failed to compile rules")
    }

    // ─────────────────────────────────────────────────────────
    // Name rules
    // ─────────────────────────────────────────────────────────

    #[test]
    fn name_exact_matches() {
        let r = rules();
        for name in ["ts", "time", "timestamp", "@timestamp", "date", "when", "at", "TS"] {
            assert_eq!(r.name_signal(name), Some(TimestampSignal::ExactName), "{}", name);
        }
    }

    #[test]
    fn name_prefix_matches() {
        let r = rules();
        for name in ["time_local", "date_received", "created", "updatedAt", "start", "end_ts", "last_seen"] {
            assert!(r.name_signal(name).is_some(), "{}", name);
        }
        assert_eq!(r.name_signal("created_by"), Some(TimestampSignal::NamePrefix));
    }

    #[test]
    fn name_suffix_matches() {
        let r = rules();
        assert_eq!(r.name_signal("event_time"), Some(TimestampSignal::NameSuffix));
        assert_eq!(r.name_signal("seen_at"), Some(TimestampSignal::NameSuffix));
        assert_eq!(r.name_signal("birth_date"), Some(TimestampSignal::NameSuffix));
        assert_eq!(r.name_signal("log_timestamp"), Some(TimestampSignal::NameSuffix));
    }

    #[test]
    fn name_nested_last_segment() {
        let r = rules();
        assert!(r.name_signal("conn.ts").is_some());
        assert!(r.name_signal("http.request_time").is_some());
    }

    #[test]
    fn name_non_matches() {
        let r = rules();
        for name in ["uid", "id.orig_h", "proto", "duration", "uptime", "status", "path"] {
            assert_eq!(r.name_signal(name), None, "{}", name);
        }
    }

    // ─────────────────────────────────────────────────────────
    // Value rules
    // ─────────────────────────────────────────────────────────

    #[test]
    fn value_shapes() {
        let r = rules();
        assert_eq!(r.value_signal(&json!("1700000000")), Some(TimestampSignal::UnixSeconds));
        assert_eq!(r.value_signal(&json!(1700000000)), Some(TimestampSignal::UnixSeconds));
        assert_eq!(r.value_signal(&json!("1700000000000")), Some(TimestampSignal::UnixMillis));
        assert_eq!(r.value_signal(&json!("2023-01-01T00:00:00Z")), Some(TimestampSignal::IsoDateTime));
        assert_eq!(r.value_signal(&json!(1700000000.25)), Some(TimestampSignal::ParsedDate));
        assert_eq!(r.value_signal(&json!("2023-01-15 10:30:00")), Some(TimestampSignal::ParsedDate));
    }

    #[test]
    fn value_year_sanity_check() {
        let r = rules();
        assert_eq!(r.value_signal(&json!("1970-01-02")), None);
        assert_eq!(r.value_signal(&json!("1990-06-01")), None);
        assert_eq!(r.value_signal(&json!("1991-06-01")), Some(TimestampSignal::ParsedDate));
    }

    #[test]
    fn value_non_matches() {
        let r = rules();
        assert_eq!(r.value_signal(&json!("10.0.0.1")), None);
        assert_eq!(r.value_signal(&json!("tcp")), None);
        assert_eq!(r.value_signal(&json!(443)), None);
        assert_eq!(r.value_signal(&json!("")), None);
        assert_eq!(r.value_signal(&json!(true)), None);
        assert_eq!(r.value_signal(&Value::Null), None);
        assert_eq!(r.value_signal(&json!(["1700000000"])), None);
    }

    // ─────────────────────────────────────────────────────────
    // classify
    // ─────────────────────────────────────────────────────────

    #[test]
    fn classify_by_name_alone() {
        let r = rules();
        assert!(r.classify("ts", &[]));
        assert!(r.classify("ts", &[&json!("not a time")]));
    }

    #[test]
    fn classify_by_value_alone() {
        let r = rules();
        let v = json!("2023-01-01T00:00:00Z");
        assert!(r.classify("seen", &[&v]));
    }

    #[test]
    fn classify_any_sample_is_enough() {
        let r = rules();
        let a = json!("x");
        let b = json!("y");
        let c = json!("1700000000");
        assert!(r.classify("seen", &[&a, &b, &c]));
    }

    #[test]
    fn classify_inspects_only_first_three() {
        let r = rules();
        let a = json!("x");
        let ts = json!("1700000000");
        assert!(!r.classify("seen", &[&a, &a, &a, &ts]));
    }

    #[test]
    fn classify_negative() {
        let r = rules();
        let a = json!("CHhAvVGS1DHFjwGM9");
        let b = json!("tcp");
        assert!(!r.classify("uid", &[&a, &b]));
        assert_eq!(r.classify_detail("uid", &[&a, &b]), None);
    }

    #[test]
    fn signal_kind_name_or_value() {
        let r = rules();
        let v = json!(1700000000);

        let by_name = r.classify_detail("created_at", &[]).unwrap();
        assert!(by_name.is_name_signal());

        let by_value = r.classify_detail("x", &[&v]).unwrap();
        assert_eq!(by_value, TimestampSignal::UnixSeconds);
        assert!(!by_value.is_name_signal());
    }
}
