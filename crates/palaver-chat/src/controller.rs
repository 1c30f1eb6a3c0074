//! Conversation controller: the one component with conversation policy.
//!
//! Receives input events, appends to the transcript, drives the backend
//! exchange, and reconciles the result. The user's message is always
//! appended synchronously before the exchange starts, so it is visible in
//! the transcript regardless of network latency.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use palaver_core::Message;
use palaver_gateway::ReplyBackend;
use palaver_voice::CaptureEvent;

use crate::error::ChatError;
use crate::transcript::Transcript;

/// Fixed bot message substituted when the backend exchange fails.
pub const CONNECTION_ERROR_FALLBACK: &str =
    "Connection error. Please check the backend and your network.";

/// Prefix of the bot-origin note appended when a capture session errors.
pub const CAPTURE_NOTE_PREFIX: &str = "Speech recognition error: ";

/// How a submission was reconciled into the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty or whitespace-only input; the transcript is unchanged.
    Ignored,
    /// The backend answered; its reply was appended.
    Answered,
    /// The backend was unavailable; the fixed fallback was appended.
    Fallback,
    /// A capture failure was recorded as an informational note.
    Noted,
}

/// Orchestrates one conversation session.
///
/// All methods take `&self`: the transcript sits behind a mutex that is
/// never held across an await point, and the awaiting flag is atomic.
/// Overlapping exchanges are permitted: nothing rejects or queues a new
/// submission while one is in flight. Each submission appends its user
/// message before its own await, so every user message precedes its
/// corresponding bot message.
pub struct ConversationController {
    backend: Arc<dyn ReplyBackend>,
    transcript: Mutex<Transcript>,
    awaiting_reply: AtomicBool,
}

impl ConversationController {
    /// Create a controller over the given backend with an empty transcript.
    pub fn new(backend: Arc<dyn ReplyBackend>) -> Self {
        Self {
            backend,
            transcript: Mutex::new(Transcript::new()),
            awaiting_reply: AtomicBool::new(false),
        }
    }

    /// Whether the most recent exchange is still awaiting its reply.
    ///
    /// Read-only, for the rendering surface (e.g. a typing indicator).
    pub fn awaiting_reply(&self) -> bool {
        self.awaiting_reply.load(Ordering::SeqCst)
    }

    /// Ordered snapshot of the transcript for rendering.
    pub fn messages(&self) -> Result<Vec<Message>, ChatError> {
        Ok(self.lock_transcript()?.all())
    }

    /// Number of messages in the transcript.
    pub fn message_count(&self) -> Result<usize, ChatError> {
        Ok(self.lock_transcript()?.len())
    }

    /// Handle a typed (or speech-normalized) submission.
    ///
    /// Trimmed-empty input is a no-op. Otherwise the user message is
    /// appended immediately, then one backend exchange runs to completion
    /// and its result (reply or fixed fallback) is appended as the
    /// corresponding bot message.
    pub async fn submit(&self, text: &str) -> Result<SubmitOutcome, ChatError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("Empty submission ignored");
            return Ok(SubmitOutcome::Ignored);
        }

        // Synchronous append, before the exchange starts: the user sees
        // their message regardless of how long the backend takes.
        self.append(Message::user(trimmed))?;
        self.awaiting_reply.store(true, Ordering::SeqCst);

        let outcome = match self.backend.send(trimmed).await {
            Ok(reply) => {
                self.append(Message::bot(reply))?;
                SubmitOutcome::Answered
            }
            Err(e) => {
                warn!(error = %e, "Backend exchange failed; appending fallback");
                self.append(Message::bot(CONNECTION_ERROR_FALLBACK))?;
                SubmitOutcome::Fallback
            }
        };
        self.awaiting_reply.store(false, Ordering::SeqCst);
        Ok(outcome)
    }

    /// Handle an event from the voice capture adapter.
    ///
    /// Recognized speech takes exactly the manual-submission path. A capture
    /// failure becomes an informational bot-origin note; the conversation
    /// continues.
    pub async fn on_capture_event(&self, event: CaptureEvent) -> Result<SubmitOutcome, ChatError> {
        match event {
            CaptureEvent::Recognized(text) => self.submit(&text).await,
            CaptureEvent::Failed(description) => {
                self.append(Message::bot(format!(
                    "{}{}",
                    CAPTURE_NOTE_PREFIX, description
                )))?;
                Ok(SubmitOutcome::Noted)
            }
        }
    }

    fn append(&self, message: Message) -> Result<(), ChatError> {
        self.lock_transcript()?.append(message);
        Ok(())
    }

    fn lock_transcript(&self) -> Result<std::sync::MutexGuard<'_, Transcript>, ChatError> {
        self.transcript
            .lock()
            .map_err(|e| ChatError::LockPoisoned(e.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use palaver_core::Sender;
    use palaver_gateway::GatewayError;

    enum Script {
        Reply(&'static str),
        Unavailable,
    }

    /// Backend double that answers from a fixed script.
    struct ScriptedBackend {
        script: Script,
        delay_ms: u64,
    }

    impl ScriptedBackend {
        fn replying(reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                script: Script::Reply(reply),
                delay_ms: 0,
            })
        }

        fn unavailable() -> Arc<Self> {
            Arc::new(Self {
                script: Script::Unavailable,
                delay_ms: 0,
            })
        }
    }

    #[async_trait::async_trait]
    impl ReplyBackend for ScriptedBackend {
        async fn send(&self, _text: &str) -> Result<String, GatewayError> {
            if self.delay_ms > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
            }
            match self.script {
                Script::Reply(reply) => Ok(reply.to_string()),
                Script::Unavailable => {
                    Err(GatewayError::Unavailable("connection refused".to_string()))
                }
            }
        }
    }

    #[tokio::test]
    async fn test_successful_exchange_appends_user_then_bot() {
        let controller = ConversationController::new(ScriptedBackend::replying("Hi there!"));

        let outcome = controller.submit("Hello").await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Answered);

        let messages = controller.messages().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[0].text, "Hello");
        assert_eq!(messages[1].sender, Sender::Bot);
        assert_eq!(messages[1].text, "Hi there!");
    }

    #[tokio::test]
    async fn test_failed_exchange_appends_fixed_fallback() {
        let controller = ConversationController::new(ScriptedBackend::unavailable());

        let outcome = controller.submit("Hello").await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Fallback);

        let messages = controller.messages().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].sender, Sender::Bot);
        assert_eq!(messages[1].text, CONNECTION_ERROR_FALLBACK);
    }

    #[tokio::test]
    async fn test_empty_submission_is_ignored() {
        let controller = ConversationController::new(ScriptedBackend::replying("unused"));

        assert_eq!(
            controller.submit("").await.unwrap(),
            SubmitOutcome::Ignored
        );
        assert_eq!(
            controller.submit("   \t\n").await.unwrap(),
            SubmitOutcome::Ignored
        );
        assert!(controller.messages().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submission_text_is_trimmed() {
        let controller = ConversationController::new(ScriptedBackend::replying("ok"));

        controller.submit("  Hello  ").await.unwrap();
        let messages = controller.messages().unwrap();
        assert_eq!(messages[0].text, "Hello");
    }

    #[tokio::test]
    async fn test_recognized_speech_takes_the_submit_path() {
        let controller = ConversationController::new(ScriptedBackend::replying("Booked."));

        let outcome = controller
            .on_capture_event(CaptureEvent::Recognized("Schedule demo".to_string()))
            .await
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Answered);

        let messages = controller.messages().unwrap();
        assert_eq!(messages[0].text, "Schedule demo");
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[1].text, "Booked.");
    }

    #[tokio::test]
    async fn test_capture_failure_becomes_bot_note() {
        let controller = ConversationController::new(ScriptedBackend::replying("unused"));

        let outcome = controller
            .on_capture_event(CaptureEvent::Failed("not-allowed".to_string()))
            .await
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Noted);

        let messages = controller.messages().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::Bot);
        assert_eq!(messages[0].text, "Speech recognition error: not-allowed");
    }

    #[tokio::test]
    async fn test_awaiting_reply_tracks_the_exchange() {
        let backend = Arc::new(ScriptedBackend {
            script: Script::Reply("slow"),
            delay_ms: 100,
        });
        let controller = Arc::new(ConversationController::new(backend));
        assert!(!controller.awaiting_reply());

        let task = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.submit("Hello").await })
        };

        // The user message lands synchronously; the reply is still pending.
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(controller.awaiting_reply());
        assert_eq!(controller.message_count().unwrap(), 1);

        task.await.unwrap().unwrap();
        assert!(!controller.awaiting_reply());
        assert_eq!(controller.message_count().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_timestamps_non_decreasing_in_append_order() {
        let controller = ConversationController::new(ScriptedBackend::replying("ok"));
        controller.submit("one").await.unwrap();
        controller.submit("two").await.unwrap();

        let messages = controller.messages().unwrap();
        for pair in messages.windows(2) {
            assert!(pair[1].sent_at >= pair[0].sent_at);
        }
    }
}
