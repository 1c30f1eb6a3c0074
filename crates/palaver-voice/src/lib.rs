//! Palaver voice crate - speech capture state machine and adapter.
//!
//! Bridges a platform speech-recognition capability into discrete text
//! submission events. The capability itself is an external collaborator
//! behind the `SpeechRecognizer` trait; this crate owns the capture
//! lifecycle (Idle -> Listening -> Idle) and the normalization of final
//! transcripts into `CaptureEvent`s the conversation controller consumes.

pub mod capture;
pub mod state;

pub use capture::{
    CaptureEvent, CaptureSession, SpeechRecognizer, UnsupportedRecognizer, VoiceCapture,
};
pub use state::CaptureState;
