//! Command dispatch between a front end and the task store.
//!
//! Front ends translate user events into [`Command`] values and hand them
//! to [`Session::dispatch`]. The session owns the [`TaskStore`] plus the
//! UI-independent view state (active filter, search query, edit target,
//! pending delete) and posts a [`Notification`](crate::notify::Notification)
//! for every user-visible outcome.

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use taskflow_model::{Task, TaskId, TaskInput};

use crate::notify::{NotificationKind, Notifier};
use crate::storage::KeyValueStorage;
use crate::tasks::view::{self, Filter, TaskCounts};
use crate::tasks::{TaskError, TaskStore};

/// A user intent, independent of how it was triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit the form: adds a task, or updates the task being edited.
    Submit(TaskInput),
    /// Start editing a task; the form should be refilled from the outcome.
    BeginEdit(TaskId),
    /// Leave edit mode without saving.
    CancelEdit,
    /// Flip completion of a task.
    Toggle(TaskId),
    /// Ask for confirmation before deleting a task.
    RequestDelete(TaskId),
    /// Delete the task awaiting confirmation.
    ConfirmDelete,
    /// Drop the pending delete.
    CancelDelete,
    /// Change the active filter.
    SetFilter(Filter),
    /// Change the live search query.
    SetSearch(String),
}

/// What a dispatched command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A task was created.
    Added(Task),
    /// The edited task was saved.
    Updated(Task),
    /// A task's completion flipped.
    Toggled(Task),
    /// A task was deleted.
    Removed(TaskId),
    /// Edit mode started; contains the task's current fields.
    EditStarted(TaskInput),
    /// Edit mode ended without saving.
    EditCancelled,
    /// A delete is awaiting confirmation.
    DeleteRequested(TaskId),
    /// The pending delete was dropped.
    DeleteCancelled,
    /// Filter or search changed.
    ViewChanged,
    /// The command was refused; the message was also posted as a notification.
    Rejected(String),
    /// Nothing to do (unknown id, nothing pending).
    Ignored,
}

/// Owns the store and the view state of one front end.
pub struct Session<S> {
    store: TaskStore<S>,
    filter: Filter,
    query: String,
    editing: Option<TaskId>,
    pending_delete: Option<TaskId>,
    notifier: Notifier,
}

impl<S: KeyValueStorage> Session<S> {
    /// Creates a session over an opened store.
    #[must_use]
    pub fn new(store: TaskStore<S>, notification_ttl: Duration) -> Self {
        Self {
            store,
            filter: Filter::default(),
            query: String::new(),
            editing: None,
            pending_delete: None,
            notifier: Notifier::new(notification_ttl),
        }
    }

    /// Sets the initial filter.
    #[must_use]
    pub const fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Routes a command to the store and updates view state.
    pub fn dispatch(&mut self, command: Command, now: Instant) -> Outcome {
        tracing::trace!(?command, "dispatch");
        match command {
            Command::Submit(input) => self.submit(&input, now),
            Command::BeginEdit(id) => self.begin_edit(id, now),
            Command::CancelEdit => {
                if self.editing.take().is_some() {
                    Outcome::EditCancelled
                } else {
                    Outcome::Ignored
                }
            }
            Command::Toggle(id) => self.toggle(&id, now),
            Command::RequestDelete(id) => {
                if self.store.get(&id).is_none() {
                    return Outcome::Ignored;
                }
                self.pending_delete = Some(id.clone());
                Outcome::DeleteRequested(id)
            }
            Command::ConfirmDelete => self.confirm_delete(now),
            Command::CancelDelete => {
                if self.pending_delete.take().is_some() {
                    Outcome::DeleteCancelled
                } else {
                    Outcome::Ignored
                }
            }
            Command::SetFilter(filter) => {
                self.filter = filter;
                Outcome::ViewChanged
            }
            Command::SetSearch(query) => {
                self.query = query;
                Outcome::ViewChanged
            }
        }
    }

    /// Dismisses an expired notification. Returns `true` if one was removed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.notifier.tick(now)
    }

    /// The list to render for the current filter and query.
    #[must_use]
    pub fn visible(&self, today: NaiveDate) -> Vec<&Task> {
        view::visible_tasks(self.store.tasks(), self.filter, &self.query, today)
    }

    /// Counters over the whole collection.
    #[must_use]
    pub fn counts(&self, today: NaiveDate) -> TaskCounts {
        view::aggregate_counts(self.store.tasks(), today)
    }

    /// Message to show when [`visible`](Self::visible) is empty.
    #[must_use]
    pub fn empty_message(&self) -> &'static str {
        view::empty_list_message(self.filter, &self.query)
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    /// Active filter.
    #[must_use]
    pub const fn filter(&self) -> Filter {
        self.filter
    }

    /// Current search query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// ID of the task being edited, if any.
    #[must_use]
    pub const fn editing(&self) -> Option<&TaskId> {
        self.editing.as_ref()
    }

    /// ID of the task awaiting delete confirmation, if any.
    #[must_use]
    pub const fn pending_delete(&self) -> Option<&TaskId> {
        self.pending_delete.as_ref()
    }

    /// Notification state.
    #[must_use]
    pub const fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    fn submit(&mut self, input: &TaskInput, now: Instant) -> Outcome {
        let result = match self.editing.clone() {
            Some(id) => self
                .store
                .update_from_input(&id, input)
                .map(|task| {
                    self.editing = None;
                    Outcome::Updated(task)
                })
                .inspect_err(|e| {
                    if matches!(e, TaskError::NotFound(_)) {
                        self.editing = None;
                    }
                }),
            None => self.store.add(input).map(Outcome::Added),
        };

        match result {
            Ok(outcome) => {
                let message = if matches!(outcome, Outcome::Updated(_)) {
                    "Task updated successfully!"
                } else {
                    "Task added successfully!"
                };
                self.notifier.show(message, NotificationKind::Success, now);
                outcome
            }
            Err(e) => self.reject(&e, now),
        }
    }

    fn begin_edit(&mut self, id: TaskId, now: Instant) -> Outcome {
        let Some(task) = self.store.get(&id) else {
            return Outcome::Ignored;
        };
        let input = TaskInput::from_task(task);
        self.editing = Some(id);
        self.notifier
            .show("Editing task...", NotificationKind::Info, now);
        Outcome::EditStarted(input)
    }

    fn toggle(&mut self, id: &TaskId, now: Instant) -> Outcome {
        match self.store.toggle_completion(id) {
            Ok(task) => {
                let message = if task.completed {
                    "Task completed! \u{1f389}"
                } else {
                    "Task marked as pending"
                };
                self.notifier.show(message, NotificationKind::Success, now);
                Outcome::Toggled(task)
            }
            Err(TaskError::NotFound(_)) => Outcome::Ignored,
            Err(e) => self.reject(&e, now),
        }
    }

    fn confirm_delete(&mut self, now: Instant) -> Outcome {
        let Some(id) = self.pending_delete.take() else {
            return Outcome::Ignored;
        };
        match self.store.remove(&id) {
            Ok(true) => {
                if self.editing.as_ref() == Some(&id) {
                    self.editing = None;
                }
                self.notifier
                    .show("Task deleted successfully!", NotificationKind::Info, now);
                Outcome::Removed(id)
            }
            Ok(false) => Outcome::Ignored,
            Err(e) => self.reject(&e, now),
        }
    }

    fn reject(&mut self, error: &TaskError, now: Instant) -> Outcome {
        let message = error.to_string();
        tracing::debug!(error = %message, "command rejected");
        self.notifier
            .show(message.clone(), NotificationKind::Error, now);
        Outcome::Rejected(message)
    }
}
