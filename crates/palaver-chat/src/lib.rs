//! Palaver chat crate - transcript store and conversation controller.
//!
//! The controller is the only component with conversation-level policy: it
//! receives input events (typed submit, recognized speech, capture errors),
//! appends to the transcript, drives the backend exchange, and reconciles
//! success or failure into transcript updates. Every failure degrades to a
//! visible transcript entry; nothing here is fatal to the session.

pub mod controller;
pub mod error;
pub mod transcript;

pub use controller::{
    ConversationController, SubmitOutcome, CAPTURE_NOTE_PREFIX, CONNECTION_ERROR_FALLBACK,
};
pub use error::ChatError;
pub use transcript::Transcript;
