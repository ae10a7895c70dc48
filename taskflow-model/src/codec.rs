//! Encoding and decoding of the persisted task blob.
//!
//! The blob is a JSON array of [`Task`] objects. Decoding is strict here;
//! the store decides what to do with a blob that fails to decode.

use crate::task::Task;

/// Error type for codec encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Encodes a task collection into its persisted text form.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the collection cannot be serialized.
pub fn encode(tasks: &[Task]) -> Result<String, CodecError> {
    serde_json::to_string(tasks).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Decodes a task collection from its persisted text form.
///
/// A blank blob decodes to an empty collection.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the text is not a valid task array.
pub fn decode(blob: &str) -> Result<Vec<Task>, CodecError> {
    if blob.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(blob).map_err(|e| CodecError::Serialization(e.to_string()))
}
