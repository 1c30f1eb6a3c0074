//! Voice capture adapter bridging a platform recognizer into text events.
//!
//! The adapter owns the capture lifecycle and normalizes recognizer output:
//! a final transcript becomes a `CaptureEvent::Recognized` (only when
//! non-empty after trimming), a recognizer error becomes a
//! `CaptureEvent::Failed`. The conversation controller consumes both.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use palaver_core::{PalaverError, Result, VoiceConfig};

use crate::state::{CaptureState, StateMachine};

/// Discrete output of the capture adapter, consumed by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// A final transcript was recognized; to be handled exactly like a
    /// manual submission. The text is already trimmed and non-empty.
    Recognized(String),
    /// The capture session errored (permission denied, no speech detected).
    /// The description is surfaced to the user as a bot-origin note.
    Failed(String),
}

/// Platform speech-to-text capability.
///
/// An external collaborator: the widget embedder supplies the real
/// implementation. The adapter only consumes start/stop controls; final
/// transcripts and errors are delivered back through
/// [`VoiceCapture::on_final_transcript`] and [`VoiceCapture::on_error`].
/// Interim results are never inspected.
pub trait SpeechRecognizer: Send + Sync {
    /// Whether the platform offers speech recognition at all. Queried once
    /// at adapter construction.
    fn is_available(&self) -> bool;

    /// Begin a recognition session.
    fn start(&self) -> Result<()>;

    /// Cancel an in-progress recognition session.
    fn stop(&self) -> Result<()>;
}

/// Recognizer for platforms without a speech capability.
///
/// `VoiceCapture` built on it reports disabled and never starts a session.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedRecognizer;

impl SpeechRecognizer for UnsupportedRecognizer {
    fn is_available(&self) -> bool {
        false
    }

    fn start(&self) -> Result<()> {
        Err(PalaverError::Capture(
            "speech recognition is not available on this platform".to_string(),
        ))
    }

    fn stop(&self) -> Result<()> {
        Ok(())
    }
}

/// Tracks the data associated with an active capture session.
///
/// Purely transient: created on start, dropped on every stop. The id exists
/// for tracing only and confers no external identity.
#[derive(Debug, Clone)]
pub struct CaptureSession {
    /// Unique identifier for this session.
    pub id: Uuid,
    /// When the session was started.
    pub started_at: DateTime<Utc>,
}

impl CaptureSession {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }

    /// Returns the elapsed duration of this session in seconds.
    pub fn elapsed_secs(&self) -> f32 {
        let elapsed = Utc::now() - self.started_at;
        elapsed.num_milliseconds() as f32 / 1000.0
    }
}

/// Adapter between the platform recognizer and the conversation controller.
///
/// The capability query happens once here; when the platform offers no
/// speech capability (or voice is disabled in config) the adapter reports
/// disabled so the rendering surface presents the capture control greyed
/// out, and `start` is a silent no-op rather than an error.
pub struct VoiceCapture {
    state_machine: StateMachine,
    session: Mutex<Option<CaptureSession>>,
    recognizer: Box<dyn SpeechRecognizer>,
    enabled: bool,
    max_duration_seconds: u32,
}

impl std::fmt::Debug for VoiceCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceCapture")
            .field("state_machine", &self.state_machine)
            .field("session", &self.session)
            .field("enabled", &self.enabled)
            .field("max_duration_seconds", &self.max_duration_seconds)
            .finish()
    }
}

impl VoiceCapture {
    /// Create an adapter over the given recognizer.
    ///
    /// Voice is enabled only when the config allows it and the platform
    /// capability is present.
    pub fn new(recognizer: Box<dyn SpeechRecognizer>, config: &VoiceConfig) -> Self {
        let enabled = config.enabled && recognizer.is_available();
        if !enabled {
            tracing::info!("Voice capture disabled (unsupported platform or config)");
        }
        Self {
            state_machine: StateMachine::new(),
            session: Mutex::new(None),
            recognizer,
            enabled,
            max_duration_seconds: config.max_duration_seconds,
        }
    }

    /// Whether the capture control should be offered at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the current capture state.
    pub fn state(&self) -> CaptureState {
        self.state_machine.current()
    }

    /// Maximum recording duration, enforced by the platform recognizer.
    pub fn max_duration_seconds(&self) -> u32 {
        self.max_duration_seconds
    }

    /// Id of the active capture session, if one is in progress.
    pub fn session_id(&self) -> Option<Uuid> {
        self.session
            .lock()
            .expect("session mutex poisoned")
            .as_ref()
            .map(|s| s.id)
    }

    /// Request capture.
    ///
    /// Silent no-op when voice is disabled. Fails if a session is already
    /// in progress or the recognizer refuses to start.
    pub fn start(&self) -> Result<()> {
        if !self.enabled {
            tracing::debug!("Voice capture disabled; start ignored");
            return Ok(());
        }
        self.state_machine.transition(CaptureState::Listening)?;
        if let Err(e) = self.recognizer.start() {
            self.state_machine.reset();
            return Err(e);
        }
        let session = CaptureSession::new();
        tracing::debug!(session_id = %session.id, "Capture session started");
        *self.session.lock().expect("session mutex poisoned") = Some(session);
        Ok(())
    }

    /// Cancel an in-progress capture session.
    ///
    /// Idempotent: calling it while `Idle` is a no-op.
    pub fn stop(&self) {
        if self.state_machine.current() == CaptureState::Idle {
            return;
        }
        if let Err(e) = self.recognizer.stop() {
            tracing::warn!(error = %e, "Recognizer stop failed");
        }
        self.state_machine.reset();
        self.clear_session();
    }

    /// Handle a final transcript from the recognizer.
    ///
    /// Returns to `Idle` and yields a `Recognized` event only when the text
    /// is non-empty after trimming.
    pub fn on_final_transcript(&self, text: &str) -> Option<CaptureEvent> {
        if self.state_machine.current() == CaptureState::Listening {
            let _ = self.state_machine.transition(CaptureState::Idle);
        }
        self.clear_session();

        let trimmed = text.trim();
        if trimmed.is_empty() {
            tracing::debug!("Final transcript empty after trimming; dropped");
            return None;
        }
        Some(CaptureEvent::Recognized(trimmed.to_string()))
    }

    /// Handle a capture error from the recognizer.
    ///
    /// Recovers locally: back to `Idle`, session dropped, and the
    /// description surfaced as a `Failed` event. Never aborts the
    /// conversation.
    pub fn on_error(&self, description: &str) -> CaptureEvent {
        tracing::warn!(description, "Capture session errored");
        self.state_machine.reset();
        self.clear_session();
        CaptureEvent::Failed(description.to_string())
    }

    fn clear_session(&self) {
        *self.session.lock().expect("session mutex poisoned") = None;
    }
}

// =============================================================================
// Tests
// =============================================================================
