//! List filters.
//!
//! Every query-string pair becomes one [`Criterion`]; an issue matches when it
//! satisfies all of them. `open` compares as a boolean (`"true"` is true,
//! anything else false). Every other key compares against the field as it was
//! written: text fields supplied as strings compare as exact text, fields
//! supplied as JSON numbers or booleans compare numerically (`"1.0"` matches
//! `1`, `"1"` matches `true`). `created_on` filters need the exact millisecond
//! rendering and unknown keys match nothing.

use crate::domain::{Issue, OPEN};
use crate::payload::{loose_number, ValueKind};

/// A single field comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    Open(bool),
    Text { field: String, value: String },
}

impl Criterion {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        let field = field.into();
        let value = value.into();
        if field == OPEN {
            Criterion::Open(value == "true")
        } else {
            Criterion::Text { field, value }
        }
    }

    pub fn matches(&self, issue: &Issue) -> bool {
        match self {
            Criterion::Open(open) => issue.open == *open,
            Criterion::Text { field, value } => {
                let Some(stored) = issue.field_text(field) else {
                    return false;
                };
                match issue.field_kind(field) {
                    ValueKind::Text => stored == *value,
                    ValueKind::Number => {
                        let stored = stored.parse::<f64>().ok();
                        stored.is_some() && stored == loose_number(value)
                    }
                    ValueKind::Bool => {
                        let stored = if stored == "true" { 1.0 } else { 0.0 };
                        loose_number(value) == Some(stored)
                    }
                }
            }
        }
    }
}

/// Conjunction of criteria. Empty matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    criteria: Vec<Criterion>,
}

impl IssueFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field comparison.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.criteria.push(Criterion::new(field, value));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn matches(&self, issue: &Issue) -> bool {
        self.criteria.iter().all(|criterion| criterion.matches(issue))
    }
}

impl<K, V> FromIterator<(K, V)> for IssueFilter
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            criteria: iter
                .into_iter()
                .map(|(field, value)| Criterion::new(field, value))
                .collect(),
        }
    }
}
