//! Core domain types for the issue tracker.
//!
//! An [`Issue`] lives inside a named project. The JSON representation uses the
//! snake_case keys existing clients expect (`_id`, `issue_title`, ...), so the
//! serde renames below are part of the public contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::payload::{self, Payload, ValueKind};

/// Wire key of the issue identifier.
pub const ID: &str = "_id";
pub const TITLE: &str = "issue_title";
pub const TEXT: &str = "issue_text";
pub const CREATED_BY: &str = "created_by";
pub const ASSIGNED_TO: &str = "assigned_to";
pub const STATUS_TEXT: &str = "status_text";
pub const CREATED_ON: &str = "created_on";
pub const UPDATED_ON: &str = "updated_on";
pub const OPEN: &str = "open";

const TEXT_FIELDS: [&str; 5] = [TITLE, TEXT, CREATED_BY, ASSIGNED_TO, STATUS_TEXT];

/// An issue reported against a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Opaque unique identifier, assigned at creation
    #[serde(rename = "_id")]
    pub id: String,
    /// Short summary
    #[serde(rename = "issue_title")]
    pub title: String,
    /// Full description of the problem
    #[serde(rename = "issue_text")]
    pub text: String,
    /// Reporter
    pub created_by: String,
    /// Assignee, empty when unassigned
    pub assigned_to: String,
    /// Free-form status note, empty when unset
    pub status_text: String,
    #[serde(with = "timestamp")]
    pub created_on: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_on: DateTime<Utc>,
    /// Whether the issue is still open
    pub open: bool,
    /// Text fields that were supplied as JSON numbers or booleans
    #[serde(skip)]
    pub kinds: BTreeMap<String, ValueKind>,
}

impl Issue {
    /// Create an open issue from validated input, stamped with the current time.
    pub fn new(fields: NewIssue) -> Self {
        let now = Utc::now();
        Self {
            id: Self::fresh_id(),
            title: fields.title,
            text: fields.text,
            created_by: fields.created_by,
            assigned_to: fields.assigned_to,
            status_text: fields.status_text,
            created_on: now,
            updated_on: now,
            open: true,
            kinds: BTreeMap::new(),
        }
    }

    /// Create an issue straight from a request body.
    ///
    /// Returns `None` when a required field is missing.
    pub fn from_payload(body: &Payload) -> Option<Self> {
        let mut issue = Self::new(NewIssue::from_payload(body)?);
        issue.record_kinds(&taken_kinds(body, payload::truthy_text));
        Some(issue)
    }

    /// Generate a new opaque identifier.
    pub fn fresh_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Textual value of a field by wire key, as it appears in JSON.
    ///
    /// Returns `None` for keys that are not issue fields.
    pub fn field_text(&self, key: &str) -> Option<String> {
        let value = match key {
            ID => self.id.clone(),
            TITLE => self.title.clone(),
            TEXT => self.text.clone(),
            CREATED_BY => self.created_by.clone(),
            ASSIGNED_TO => self.assigned_to.clone(),
            STATUS_TEXT => self.status_text.clone(),
            CREATED_ON => timestamp::format(&self.created_on),
            UPDATED_ON => timestamp::format(&self.updated_on),
            OPEN => self.open.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// JSON type the field was last written with. `Text` for non-text fields.
    pub fn field_kind(&self, key: &str) -> ValueKind {
        self.kinds.get(key).copied().unwrap_or_default()
    }

    fn record_kinds(&mut self, kinds: &BTreeMap<String, ValueKind>) {
        for (key, kind) in kinds {
            if *kind == ValueKind::Text {
                self.kinds.remove(key);
            } else {
                self.kinds.insert(key.clone(), *kind);
            }
        }
    }

    /// Apply a patch in place and refresh `updated_on`.
    pub fn apply(&mut self, patch: &IssuePatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        if let Some(created_by) = &patch.created_by {
            self.created_by = created_by.clone();
        }
        if let Some(assigned_to) = &patch.assigned_to {
            self.assigned_to = assigned_to.clone();
        }
        if let Some(status_text) = &patch.status_text {
            self.status_text = status_text.clone();
        }
        if let Some(open) = patch.open {
            self.open = open;
        }
        self.record_kinds(&patch.kinds);
        self.updated_on = Utc::now().max(self.created_on);
    }
}

/// Validated input for creating an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    pub title: String,
    pub text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
}

impl NewIssue {
    /// Extract creation fields from a request body.
    ///
    /// Returns `None` when any of title, text or reporter is absent or falsy.
    pub fn from_payload(body: &Payload) -> Option<Self> {
        let required = |key: &str| body.get(key).and_then(payload::truthy_text);
        let optional = |key: &str| required(key).unwrap_or_default();

        Some(Self {
            title: required(TITLE)?,
            text: required(TEXT)?,
            created_by: required(CREATED_BY)?,
            assigned_to: optional(ASSIGNED_TO),
            status_text: optional(STATUS_TEXT),
        })
    }
}

/// A partial update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssuePatch {
    pub title: Option<String>,
    pub text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<bool>,
    /// JSON types of the text fields taken
    pub kinds: BTreeMap<String, ValueKind>,
}

impl IssuePatch {
    /// Build a patch from the whitelisted keys of a request body.
    ///
    /// Any presence of `open` counts, whatever its value. Other fields are
    /// taken only when non-empty; empty strings are dropped silently.
    pub fn from_payload(body: &Payload) -> Self {
        let text = |key: &str| body.get(key).and_then(payload::patch_text);

        Self {
            title: text(TITLE),
            text: text(TEXT),
            created_by: text(CREATED_BY),
            assigned_to: text(ASSIGNED_TO),
            status_text: text(STATUS_TEXT),
            open: body.get(OPEN).map(payload::open_flag),
            kinds: taken_kinds(body, payload::patch_text),
        }
    }

    /// True when at least one field would change something.
    pub fn is_effective(&self) -> bool {
        self.title.is_some()
            || self.text.is_some()
            || self.created_by.is_some()
            || self.assigned_to.is_some()
            || self.status_text.is_some()
            || self.open.is_some()
    }
}

/// JSON types of the text fields `taken` accepts from `body`.
fn taken_kinds(body: &Payload, taken: fn(&Value) -> Option<String>) -> BTreeMap<String, ValueKind> {
    TEXT_FIELDS
        .iter()
        .filter_map(|key| {
            let value = body.get(*key)?;
            taken(value)?;
            Some((key.to_string(), ValueKind::of(value)))
        })
        .collect()
}

/// ISO-8601 UTC timestamps with millisecond precision (`2026-01-02T03:04:05.678Z`).
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn format(at: &DateTime<Utc>) -> String {
        at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(at))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|at| at.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}
