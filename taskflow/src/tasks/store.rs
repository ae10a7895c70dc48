//! Task store for task CRUD and persistence.
//!
//! `TaskStore` owns the ordered task collection. Every mutating call
//! builds the next collection, writes it as a single blob under one storage
//! key, and only then makes it current. A failed write therefore leaves
//! both memory and storage as they were.

use chrono::Utc;
use taskflow_model::codec;
use taskflow_model::input::normalize_title;
use taskflow_model::{Task, TaskId, TaskInput, TaskPatch, ValidTaskInput};

use super::TaskError;
use crate::storage::KeyValueStorage;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "tasks";

/// Reads the persisted collection under `key`.
///
/// Never fails: a missing key, an unreadable slot, an empty blob and a
/// malformed blob all yield an empty collection.
pub fn load<S: KeyValueStorage + ?Sized>(storage: &S, key: &str) -> Vec<Task> {
    let blob = match storage.get(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            tracing::debug!(key, "no persisted tasks");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "could not read persisted tasks; starting empty");
            return Vec::new();
        }
    };

    match codec::decode(&blob) {
        Ok(tasks) => {
            tracing::debug!(key, count = tasks.len(), "loaded persisted tasks");
            tasks
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding malformed task blob");
            Vec::new()
        }
    }
}

/// Owns the task collection and mirrors it to a storage slot.
pub struct TaskStore<S> {
    storage: S,
    key: String,
    tasks: Vec<Task>,
}

impl<S: KeyValueStorage> TaskStore<S> {
    /// Opens the store, loading whatever is persisted under `key`.
    #[must_use]
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let tasks = load(&storage, &key);
        tracing::info!(key = %key, count = tasks.len(), "task store opened");
        Self {
            storage,
            key,
            tasks,
        }
    }

    /// Creates a new task from a form payload.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Validation`] if the payload is invalid (blank
    /// title, unknown priority, malformed date), or [`TaskError::Storage`]
    /// if the collection cannot be written.
    pub fn add(&mut self, input: &TaskInput) -> Result<Task, TaskError> {
        let valid = input.validate()?;
        self.add_valid(valid)
    }

    /// Creates a new task from an already-validated payload.
    ///
    /// The title is re-checked here since this is the last guard before the
    /// collection changes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Validation`] for a blank title, or
    /// [`TaskError::Storage`] if the collection cannot be written.
    pub fn add_valid(&mut self, valid: ValidTaskInput) -> Result<Task, TaskError> {
        let title = normalize_title(&valid.title)?;
        let task = Task {
            id: self.fresh_id(),
            title,
            description: valid.description,
            priority: valid.priority,
            due_date: valid.due_date,
            completed: false,
            created_at: Utc::now(),
            completed_at: None,
        };

        let mut next = self.tasks.clone();
        next.push(task.clone());
        self.commit(next)?;

        tracing::debug!(id = %task.id, priority = %task.priority, "task added");
        Ok(task)
    }

    /// Merges `patch` onto the task with the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NotFound`] if no task has `id`,
    /// [`TaskError::Validation`] if the patch blanks the title, or
    /// [`TaskError::Storage`] if the collection cannot be written.
    pub fn update(&mut self, id: &TaskId, mut patch: TaskPatch) -> Result<Task, TaskError> {
        let index = self.position(id)?;
        if patch.is_empty() {
            return Ok(self.tasks[index].clone());
        }

        if let Some(title) = patch.title.take() {
            patch.title = Some(normalize_title(&title)?);
        }
        patch.description = patch.description.map(|d| {
            d.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        });

        let mut next = self.tasks.clone();
        next[index].apply(patch);
        let updated = next[index].clone();
        self.commit(next)?;

        tracing::debug!(id = %id, "task updated");
        Ok(updated)
    }

    /// Validates a form payload and applies every field of it to the task.
    ///
    /// # Errors
    ///
    /// Same as [`update`](Self::update), plus [`TaskError::Validation`] for
    /// an invalid priority or date.
    pub fn update_from_input(&mut self, id: &TaskId, input: &TaskInput) -> Result<Task, TaskError> {
        self.position(id)?;
        let valid = input.validate()?;
        self.update(id, valid.into())
    }

    /// Flips the completion state of a task.
    ///
    /// Completing stamps `completed_at` with the current time; reopening
    /// clears it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NotFound`] if no task has `id`, or
    /// [`TaskError::Storage`] if the collection cannot be written.
    pub fn toggle_completion(&mut self, id: &TaskId) -> Result<Task, TaskError> {
        let index = self.position(id)?;

        let mut next = self.tasks.clone();
        let task = &mut next[index];
        task.completed = !task.completed;
        task.completed_at = task.completed.then(Utc::now);
        let toggled = task.clone();
        self.commit(next)?;

        tracing::debug!(id = %id, completed = toggled.completed, "task toggled");
        Ok(toggled)
    }

    /// Deletes the task with the given ID.
    ///
    /// Returns `Ok(false)` and writes nothing if no task has `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Storage`] if the collection cannot be written.
    pub fn remove(&mut self, id: &TaskId) -> Result<bool, TaskError> {
        let Ok(index) = self.position(id) else {
            return Ok(false);
        };

        let mut next = self.tasks.clone();
        next.remove(index);
        self.commit(next)?;

        tracing::debug!(id = %id, "task removed");
        Ok(true)
    }

    /// Returns the task with the given ID, if any.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// All tasks, in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Read access to the backing storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Index of the task with `id`, or `NotFound`.
    fn position(&self, id: &TaskId) -> Result<usize, TaskError> {
        self.tasks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }

    /// Generates an ID that no task in the collection already has.
    fn fresh_id(&self) -> TaskId {
        loop {
            let id = TaskId::generate();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Writes `next` and, once stored, makes it the current collection.
    fn commit(&mut self, next: Vec<Task>) -> Result<(), TaskError> {
        let blob = codec::encode(&next)?;
        if let Err(e) = self.storage.set(&self.key, &blob) {
            tracing::warn!(key = %self.key, error = %e, "failed to persist tasks");
            return Err(e.into());
        }
        self.tasks = next;
        Ok(())
    }
}
