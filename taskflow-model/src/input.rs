//! Form payloads and their validation.
//!
//! A [`TaskInput`] carries the raw strings a front end collects. Calling
//! [`TaskInput::validate`] produces a [`ValidTaskInput`] with trimmed text,
//! a parsed [`Priority`] and an optional parsed due date.

use chrono::NaiveDate;

use crate::DATE_FORMAT;
use crate::task::{Priority, Task, TaskPatch};

/// Reasons a task payload is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Title is empty after trimming.
    #[error("Please enter a task title")]
    EmptyTitle,
    /// Priority is not one of `low`, `medium`, `high`.
    #[error("invalid priority: {0:?}")]
    InvalidPriority(String),
    /// Due date is not a `YYYY-MM-DD` calendar date.
    #[error("invalid due date: {0:?} (expected YYYY-MM-DD)")]
    InvalidDueDate(String),
}

/// Raw task fields as entered in a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInput {
    /// Required title.
    pub title: String,
    /// Optional description; blank means none.
    pub description: String,
    /// Priority name.
    pub priority: String,
    /// Optional due date; blank means none.
    pub due_date: String,
}

/// A payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTaskInput {
    /// Trimmed, non-empty title.
    pub title: String,
    /// Trimmed description, if any.
    pub description: Option<String>,
    /// Parsed priority.
    pub priority: Priority,
    /// Parsed due date, if any.
    pub due_date: Option<NaiveDate>,
}

impl TaskInput {
    /// Creates an input with only a title and the default priority.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            priority: Priority::default().to_string(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority.to_string();
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = due_date.format(DATE_FORMAT).to_string();
        self
    }

    /// Fills an input from an existing task, for editing.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            priority: task.priority.to_string(),
            due_date: task
                .due_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }

    /// Validates and normalizes the payload.
    ///
    /// A blank priority falls back to [`Priority::default`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTitle`] for a blank title,
    /// [`ValidationError::InvalidPriority`] for an unknown priority name and
    /// [`ValidationError::InvalidDueDate`] for a malformed date.
    pub fn validate(&self) -> Result<ValidTaskInput, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        let priority = if self.priority.trim().is_empty() {
            Priority::default()
        } else {
            self.priority
                .parse()
                .map_err(|_| ValidationError::InvalidPriority(self.priority.clone()))?
        };

        let due_date = match self.due_date.trim() {
            "" => None,
            s => Some(
                NaiveDate::parse_from_str(s, DATE_FORMAT)
                    .map_err(|_| ValidationError::InvalidDueDate(self.due_date.clone()))?,
            ),
        };

        let description = Some(self.description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(ValidTaskInput {
            title: title.to_string(),
            description,
            priority,
            due_date,
        })
    }
}

impl From<ValidTaskInput> for TaskPatch {
    /// A form edit replaces every editable field.
    fn from(input: ValidTaskInput) -> Self {
        Self {
            title: Some(input.title),
            description: Some(input.description),
            priority: Some(input.priority),
            due_date: Some(input.due_date),
        }
    }
}

/// Validates a replacement title.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyTitle`] if `title` is blank.
pub fn normalize_title(title: &str) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyTitle)
    } else {
        Ok(trimmed.to_string())
    }
}
