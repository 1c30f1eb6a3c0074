use chrono::{DateTime, Local, Timelike};
use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// Who authored a transcript message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The human operating the widget.
    User,
    /// The remote conversational service (or a locally generated note
    /// standing in for it, e.g. a fallback or capture-failure message).
    Bot,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

// =============================================================================
// Message
// =============================================================================

/// A single entry in the conversation transcript.
///
/// Messages are immutable once created. Ordering is the transcript's
/// insertion order; there is no per-message identity beyond position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// The message text, already trimmed by the controller.
    pub text: String,
    /// Who authored the message.
    pub sender: Sender,
    /// Local wall-clock time the message was appended.
    pub sent_at: DateTime<Local>,
}

impl Message {
    /// Create a user-authored message stamped with the current local time.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            sent_at: Local::now(),
        }
    }

    /// Create a bot-authored message stamped with the current local time.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            sent_at: Local::now(),
        }
    }

    /// Time-of-day display string for the rendering surface.
    ///
    /// Hour unpadded, minute zero-padded: `9:05`, `14:30`.
    pub fn display_time(&self) -> String {
        format!("{}:{:02}", self.sent_at.hour(), self.sent_at.minute())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sender_display() {
        assert_eq!(Sender::User.to_string(), "user");
        assert_eq!(Sender::Bot.to_string(), "bot");
    }

    #[test]
    fn test_sender_serde_snake_case() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Sender::Bot).unwrap(), "\"bot\"");
        let s: Sender = serde_json::from_str("\"bot\"").unwrap();
        assert_eq!(s, Sender::Bot);
    }

    #[test]
    fn test_message_constructors() {
        let m = Message::user("Hello");
        assert_eq!(m.text, "Hello");
        assert_eq!(m.sender, Sender::User);

        let m = Message::bot("Hi there!");
        assert_eq!(m.text, "Hi there!");
        assert_eq!(m.sender, Sender::Bot);
    }

    #[test]
    fn test_message_timestamps_non_decreasing() {
        let a = Message::user("first");
        let b = Message::bot("second");
        assert!(b.sent_at >= a.sent_at);
    }

    #[test]
    fn test_display_time_pads_minute_only() {
        let mut m = Message::user("x");
        m.sent_at = Local.with_ymd_and_hms(2025, 3, 4, 9, 5, 0).unwrap();
        assert_eq!(m.display_time(), "9:05");

        m.sent_at = Local.with_ymd_and_hms(2025, 3, 4, 14, 30, 59).unwrap();
        assert_eq!(m.display_time(), "14:30");
    }

    #[test]
    fn test_display_time_midnight() {
        let mut m = Message::bot("x");
        m.sent_at = Local.with_ymd_and_hms(2025, 3, 4, 0, 0, 0).unwrap();
        assert_eq!(m.display_time(), "0:00");
    }

    #[test]
    fn test_message_round_trips_through_json() {
        let m = Message::user("Schedule demo");
        let json = serde_json::to_string(&m).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
