//! Task collection ownership and display projection.
//!
//! [`TaskStore`] is the authoritative holder of the task list and writes
//! the whole collection through a [`KeyValueStorage`](crate::storage::KeyValueStorage)
//! after every mutation. The [`view`] functions are pure: they borrow the
//! collection and derive what to show.

pub mod store;
pub mod view;

pub use store::{DEFAULT_STORAGE_KEY, TaskStore, load};
pub use view::{Filter, TaskCounts, aggregate_counts, filter, search, sort_for_display, visible_tasks};

use taskflow_model::ValidationError;
use taskflow_model::codec::CodecError;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during task operations.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The payload failed validation; nothing was changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Task with the given ID was not found.
    #[error("task not found: {0}")]
    NotFound(String),
    /// The collection could not be serialized.
    #[error("failed to encode tasks: {0}")]
    Encode(#[from] CodecError),
    /// The collection could not be written; nothing was changed.
    #[error("could not save tasks: {0}")]
    Storage(#[from] StorageError),
}
