use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::parser::value::{numeric_value, string_form};
use crate::parser::Record;
use crate::schema::{resolve, FieldPath};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }
}

/// Single active sort column and direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub key: Option<FieldPath>,
    pub direction: Option<SortDirection>,
}

impl SortOrder {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ascending(key: impl Into<FieldPath>) -> Self {
        Self {
            key: Some(key.into()),
            direction: Some(SortDirection::Ascending),
        }
    }

    pub fn descending(key: impl Into<FieldPath>) -> Self {
        Self {
            key: Some(key.into()),
            direction: Some(SortDirection::Descending),
        }
    }

    pub fn is_active(&self) -> bool {
        self.key.is_some()
    }

    /// A key without a direction sorts ascending.
    pub fn effective_direction(&self) -> SortDirection {
        self.direction.unwrap_or(SortDirection::Ascending)
    }

    /// Order after selecting `column`: a different column starts ascending;
    /// the active column cycles ascending → descending → unsorted.
    pub fn toggled(&self, column: &str) -> SortOrder {
        if self.key.as_deref() != Some(column) {
            return SortOrder::ascending(column);
        }
        match self.effective_direction() {
            SortDirection::Ascending => SortOrder::descending(column),
            SortDirection::Descending => SortOrder::none(),
        }
    }
}

/// Comparison key of a resolved value.
///
/// Values that read as finite numbers compare numerically, everything else
/// compares by string form (missing reads as the empty string).
///
/// Mixed columns sort in three tiers: empty text (missing, null, `""`),
/// then numbers, then non-empty text. The empty string is below every
/// string, so gaps in a numeric column come first ascending.
#[derive(Debug, Clone)]
pub enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    pub fn of(value: Option<&Value>) -> Self {
        match numeric_value(value) {
            Some(n) => SortKey::Number(n),
            None => SortKey::Text(string_form(value).into_owned()),
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(_), SortKey::Text(t)) => {
                if t.is_empty() {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (SortKey::Text(_), SortKey::Number(_)) => other.cmp(self).reverse(),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

/// Stable sort of arbitrary items by the sort key `key_of` derives for the
/// active column. Ties keep their input order in both directions.
pub(crate) fn sort_items<T, F>(items: Vec<T>, order: &SortOrder, key_of: F) -> Vec<T>
where
    F: Fn(&T, &str) -> SortKey,
{
    let Some(column) = order.key.as_deref() else {
        return items;
    };
    let descending = order.effective_direction() == SortDirection::Descending;

    let mut keyed: Vec<(SortKey, T)> = items
        .into_iter()
        .map(|item| (key_of(&item, column), item))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = a.cmp(b);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
    keyed.into_iter().map(|(_, item)| item).collect()
}

/// Records sorted by the active column; no key means input order.
pub fn apply_sort<'a>(records: Vec<&'a Record>, order: &SortOrder) -> Vec<&'a Record> {
    sort_items(records, order, |record, column| SortKey::of(resolve(record, column)))
}
