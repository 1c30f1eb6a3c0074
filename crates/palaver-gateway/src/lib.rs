//! Palaver gateway crate - the one external request/response contract.
//!
//! Defines the `ReplyBackend` seam the conversation controller talks
//! through, and the `HttpGateway` implementation that performs the actual
//! HTTP exchange with the remote conversational service. Each call is
//! independent and at-most-once: no retries, no deduplication, no
//! cancellation of an in-flight request.

pub mod error;
pub mod http;

pub use error::GatewayError;
pub use http::{HttpGateway, NO_REPLY_FALLBACK};

/// Seam between the conversation controller and the remote service.
///
/// `send` resolves to the reply text on success. A response the service
/// marked successful but that carries no usable reply still resolves (with
/// substitute text); only transport-level failures and non-success statuses
/// are errors. Implementations must tolerate concurrent calls through a
/// shared reference.
#[async_trait::async_trait]
pub trait ReplyBackend: Send + Sync {
    /// Perform one backend exchange for the given user text.
    async fn send(&self, text: &str) -> Result<String, GatewayError>;
}
