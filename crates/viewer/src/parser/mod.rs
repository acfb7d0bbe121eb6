/// Record loading and normalization module
///
/// Turns raw newline-delimited JSON text into an in-memory record
/// collection and provides the scalar string forms shared by filtering,
/// sorting and cell display.
///
/// # Architecture
///
/// - `model.rs`: Record type, load errors and load statistics
/// - `ndjson.rs`: Line-oriented NDJSON loader (all-or-nothing)
/// - `value.rs`: String and numeric views of JSON values

pub mod model;
pub mod ndjson;
pub mod value;

// Re-export commonly used types
pub use model::{LoadError, LoadStats, Record};
pub use ndjson::parse_ndjson;
pub use value::{numeric_value, string_form, value_text};

// Constants
pub const UTF8_BOM: char = '\u{feff}';
