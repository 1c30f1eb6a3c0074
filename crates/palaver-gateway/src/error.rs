//! Error type for backend exchanges.

use palaver_core::PalaverError;

/// Errors from the backend gateway.
///
/// Transport failures, non-success statuses, unreadable bodies, and
/// timeouts all collapse into the one unavailable condition; the widget
/// reacts to all of them with the same fixed connection-error entry.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl From<GatewayError> for PalaverError {
    fn from(err: GatewayError) -> Self {
        PalaverError::Backend(err.to_string())
    }
}
