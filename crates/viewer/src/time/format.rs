//! Format — render instants and raw timestamp cells.

use chrono::Local;
use chrono_tz::Tz;
use serde_json::Value;
use tracing::debug;

use super::{Instant, TimeParser, FALLBACK_FORMAT, HUMAN_FORMAT};
use crate::parser::value::string_form;

/// Render an instant in an IANA timezone as
/// `YYYY-MM-DD HH:MM:SS ZONE`.
///
/// An unknown timezone falls back to the process-local zone with a numeric
/// offset instead of failing.
pub fn format_instant(instant: &Instant, timezone: &str) -> String {
    match timezone.parse::<Tz>() {
        Ok(tz) => instant.with_timezone(&tz).format(HUMAN_FORMAT).to_string(),
        Err(e) => {
            debug!(timezone = %timezone, "Unknown timezone, using local rendering: {}", e);
            instant.with_timezone(&Local).format(FALLBACK_FORMAT).to_string()
        }
    }
}

impl TimeParser {
    /// Format a raw cell value.
    ///
    /// Formatting is opt-in: with `human_readable` off, or when the value
    /// does not parse, the raw value's string form is returned unchanged.
    pub fn format(&self, raw: Option<&Value>, timezone: &str, human_readable: bool) -> String {
        if !human_readable {
            return string_form(raw).into_owned();
        }

        match raw.and_then(|value| self.parse(value)) {
            Some(instant) => format_instant(&instant, timezone),
            None => string_form(raw).into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parser() -> TimeParser {
        TimeParser::new().expect("Failed to build time parser")
    }

    #[test]
    fn test_format_instant_utc() {
        let instant = parser().parse_str("2023-01-01T00:00:00Z").unwrap();
        assert_eq!(format_instant(&instant, "UTC"), "2023-01-01 00:00:00 UTC");
    }

    #[test]
    fn test_format_instant_named_zone() {
        let instant = parser().parse_str("2023-01-01T00:00:00Z").unwrap();
        assert_eq!(format_instant(&instant, "America/New_York"), "2022-12-31 19:00:00 EST");
        assert_eq!(format_instant(&instant, "Asia/Tokyo"), "2023-01-01 09:00:00 JST");
    }

    #[test]
    fn test_format_instant_invalid_zone_falls_back() {
        let instant = parser().parse_str("2023-01-01T00:00:00Z").unwrap();
        let rendered = format_instant(&instant, "Mars/Olympus_Mons");

        assert!(!rendered.is_empty());
        let expected = instant.with_timezone(&Local).format(FALLBACK_FORMAT).to_string();
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_format_raw_when_not_human_readable() {
        let p = parser();
        let raw = json!(1700000000);
        assert_eq!(p.format(Some(&raw), "UTC", false), "1700000000");
    }

    #[test]
    fn test_format_human_readable() {
        let p = parser();
        let raw = json!("1700000000");
        assert_eq!(p.format(Some(&raw), "UTC", true), "2023-11-14 22:13:20 UTC");
    }

    #[test]
    fn test_format_unparseable_falls_back_to_raw() {
        let p = parser();
        let raw = json!("not a time");
        assert_eq!(p.format(Some(&raw), "UTC", true), "not a time");
        assert_eq!(p.format(None, "UTC", true), "");
        assert_eq!(p.format(Some(&Value::Null), "UTC", true), "");
    }
}
