//! Shared data model and persisted format for `TaskFlow`.

pub mod codec;
pub mod input;
pub mod task;

pub use input::{TaskInput, ValidTaskInput, ValidationError};
pub use task::{Priority, Task, TaskId, TaskPatch};

/// `chrono` format of a due date, in forms and in the persisted blob.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
