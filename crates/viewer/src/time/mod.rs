//! Time module — timestamp parsing, formatting and timezone listing.
//!
//! Values arrive in many shapes (Unix seconds, milliseconds, fractional
//! seconds, ISO-8601, assorted log date layouts). [`TimeParser`] turns any
//! of them into a canonical [`Instant`] and renders instants in an IANA
//! timezone.

pub mod shape;
pub mod parse;
pub mod format;
pub mod zones;

pub use shape::TimeShape;
pub use parse::TimeParser;
pub use zones::{list_timezones, local_timezone, COMMON_TIMEZONES};

/// An absolute point in time, independent of display timezone.
pub type Instant = chrono::DateTime<chrono::Utc>;

/// Display layout for human-readable timestamps.
pub const HUMAN_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// Display layout used when the requested timezone is unknown.
pub const FALLBACK_FORMAT: &str = "%Y-%m-%d %H:%M:%S %:z";
