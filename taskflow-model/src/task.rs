//! Task record types for `TaskFlow`.
//!
//! Defines the single persisted entity ([`Task`]), its identifier and
//! priority, and the [`TaskPatch`] used for field-merge updates. The serde
//! layout here *is* the persisted blob format: camelCase keys, RFC 3339
//! timestamps, `YYYY-MM-DD` due dates, lowercase priorities.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Opaque unique identifier for a task.
///
/// Fresh ids are UUID v7 strings: a millisecond timestamp prefix followed by
/// random bits. Ids loaded from an existing blob are kept verbatim, whatever
/// their shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a new time-ordered task identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Wraps an existing identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Importance of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Lowest importance.
    Low,
    /// The default for new tasks.
    #[default]
    Medium,
    /// Highest importance.
    High,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Numeric weight used for ordering (`high` > `medium` > `low`).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Lowercase name, as stored in the blob.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Cycles to the next priority, wrapping from `High` to `Low`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown priority name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority: {0:?} (expected low, medium or high)")]
pub struct ParsePriorityError(pub String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

/// A single to-do record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique, immutable identifier.
    pub id: TaskId,
    /// Trimmed, non-empty title.
    pub title: String,
    /// Trimmed description; `None` when the task has none.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub description: Option<String>,
    /// Task priority.
    pub priority: Priority,
    /// Optional calendar due date.
    #[serde(default, deserialize_with = "optional_date")]
    pub due_date: Option<NaiveDate>,
    /// Whether the task is done.
    #[serde(default)]
    pub completed: bool,
    /// Creation time, set once.
    pub created_at: DateTime<Utc>,
    /// When the task was last marked complete; cleared when reopened.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Returns `true` if `query` (already lowercased) occurs in the title or
    /// description.
    #[must_use]
    pub fn matches_lowercase(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(query)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(query))
    }

    /// Merges the set fields of `patch` onto this task.
    ///
    /// `id`, `created_at`, `completed` and `completed_at` are never touched.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
    }
}

/// A shallow field update for an existing task.
///
/// `None` leaves the field as it is. For the optional fields the inner
/// `Option` is the new value, so `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement title (validated non-empty by the store).
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<Option<String>>,
    /// Replacement priority.
    pub priority: Option<Priority>,
    /// Replacement due date.
    pub due_date: Option<Option<NaiveDate>>,
}

impl TaskPatch {
    /// Returns `true` if the patch sets no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }
}

/// Reads an optional string, mapping `null`, a missing key, and blank text
/// to `None`.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Reads an optional `YYYY-MM-DD` date; blank text counts as absent.
fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, crate::DATE_FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
