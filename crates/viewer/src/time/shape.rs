//! Shape — value-shape rules for timestamp-like strings.

use crate::pattern::{PatternError, RuleTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeShape {
    /// Exactly 10 digits
    UnixSeconds,
    /// Exactly 13 digits
    UnixMillis,
    /// 10 digits, a dot, and a fraction
    FractionalSeconds,
    /// Starts with `YYYY-MM-DDTHH:MM:SS`
    IsoDateTime,
}

/// Shape rules in evaluation order. `[0-9]` instead of `\d` keeps the rules
/// to ASCII digits.
pub const SHAPE_RULES: &[(TimeShape, &str)] = &[
    (TimeShape::UnixSeconds, r"^[0-9]{10}$"),
    (TimeShape::UnixMillis, r"^[0-9]{13}$"),
    (TimeShape::FractionalSeconds, r"^[0-9]{10}\.[0-9]+$"),
    (TimeShape::IsoDateTime, r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}"),
];

pub fn compile_shapes() -> Result<RuleTable<TimeShape>, PatternError> {
    RuleTable::compile(SHAPE_RULES, true)
}
