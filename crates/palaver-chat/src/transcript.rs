//! Append-only ordered store of exchanged messages.

use palaver_core::Message;

/// The running transcript of one widget session.
///
/// Append-only for the lifetime of the session: no deletion, update, or
/// reordering operation exists, and the sequence length is monotonically
/// non-decreasing. The transcript lives only as long as the session and is
/// simply dropped with it.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. O(1) amortized; always succeeds.
    ///
    /// The controller is the only writer and never constructs empty
    /// messages, so emptiness is only debug-asserted.
    pub fn append(&mut self, message: Message) {
        debug_assert!(!message.text.is_empty(), "transcript messages carry text");
        self.messages.push(message);
    }

    /// Full ordered snapshot for rendering. The caller gets its own copy;
    /// nothing it does can mutate the transcript.
    pub fn all(&self) -> Vec<Message> {
        self.messages.clone()
    }

    /// Number of messages exchanged so far.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether nothing has been exchanged yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recently appended message.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

// =============================================================================
// Tests
// =============================================================================
