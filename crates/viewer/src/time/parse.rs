use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use super::shape::{compile_shapes, TimeShape};
use super::Instant;
use crate::parser::value::number_text;
use crate::pattern::{PatternError, RuleTable};

/// Layouts carrying an explicit UTC offset.
const OFFSET_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y/%m/%d %H:%M:%S%.f%z",
    "%d/%b/%Y:%H:%M:%S %z",
    "%a %b %e %H:%M:%S %z %Y",
];

/// Date-time layouts without an offset; read as UTC.
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f UTC",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%d/%b/%Y:%H:%M:%S",
    "%a %b %e %H:%M:%S %Y",
    "%b %e %Y %H:%M:%S",
];

/// Date-only layouts; read as midnight UTC.
const DATE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %e, %Y",
    "%b %e, %Y",
    "%e %B %Y",
];

/// Parses heterogeneous scalar values into a canonical [`Instant`].
#[derive(Clone)]
pub struct TimeParser {
    shapes: RuleTable<TimeShape>,
}

impl TimeParser {
    pub fn new() -> Result<Self, PatternError> {
        Ok(Self {
            shapes: compile_shapes()?,
        })
    }

    /// Which value-shape rule (if any) the text matches.
    pub fn shape(&self, text: &str) -> Option<TimeShape> {
        self.shapes.first_match(text)
    }

    /// Parse a JSON scalar. Strings and numbers are read through their
    /// string form; null, booleans, arrays and objects never parse.
    pub fn parse(&self, value: &Value) -> Option<Instant> {
        match value {
            Value::String(s) => self.parse_str(s),
            Value::Number(n) => self.parse_str(&number_text(n)),
            _ => None,
        }
    }

    /// Parse text. Rules are tried in order and the first matching shape
    /// decides: 10 digits (seconds), 13 digits (milliseconds), fractional
    /// seconds, ISO-8601 date-time, then the generic layouts.
    ///
    /// No year sanity check happens here; an already-classified column
    /// must format whatever it holds.
    pub fn parse_str(&self, text: &str) -> Option<Instant> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        match self.shape(text) {
            Some(TimeShape::UnixSeconds) => text
                .parse::<i64>()
                .ok()
                .and_then(|secs| DateTime::from_timestamp(secs, 0)),
            Some(TimeShape::UnixMillis) => text
                .parse::<i64>()
                .ok()
                .and_then(DateTime::from_timestamp_millis),
            Some(TimeShape::FractionalSeconds) => parse_fractional_seconds(text),
            Some(TimeShape::IsoDateTime) => parse_iso(text),
            None => parse_generic(text),
        }
    }
}

fn parse_fractional_seconds(text: &str) -> Option<Instant> {
    let (whole, fraction) = text.split_once('.')?;
    let secs = whole.parse::<i64>().ok()?;
    // Nanosecond precision; further digits are truncated
    let digits = &fraction[..fraction.len().min(9)];
    let nanos = format!("{:0<9}", digits).parse::<u32>().ok()?;
    DateTime::from_timestamp(secs, nanos)
}

fn parse_iso(text: &str) -> Option<Instant> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z")
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn parse_generic(text: &str) -> Option<Instant> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for layout in OFFSET_LAYOUTS {
        if let Ok(dt) = DateTime::parse_from_str(text, layout) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, layout) {
            return Some(naive.and_utc());
        }
    }

    for layout in DATE_LAYOUTS {
        if let Ok(date) = NaiveDate::parse_from_str(text, layout) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}
