//! Error types for the conversation controller.

use palaver_core::PalaverError;

/// Errors from the chat engine.
///
/// Backend and capture failures never appear here: the controller reconciles
/// both into transcript entries. What remains is the one genuinely
/// unexpected condition, a poisoned transcript lock.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("transcript lock poisoned: {0}")]
    LockPoisoned(String),
}

impl From<ChatError> for PalaverError {
    fn from(err: ChatError) -> Self {
        PalaverError::Chat(err.to_string())
    }
}
