//! HTTP implementation of the backend exchange.
//!
//! One POST per outbound message, JSON both ways. The only response field
//! consumed is `reply`; a successful response without it degrades to
//! substitute text instead of failing.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use palaver_core::BackendConfig;

use crate::error::GatewayError;
use crate::ReplyBackend;

/// Substitute reply text for a successful response that carries no `reply`.
pub const NO_REPLY_FALLBACK: &str = "No valid response from server.";

/// Wire format of one outbound message.
#[derive(Debug, Serialize)]
struct OutboundRequest<'a> {
    message: &'a str,
    user_phone: &'a str,
}

/// Wire format of the service's response. Anything beyond `reply` is ignored.
#[derive(Debug, Deserialize)]
struct InboundReply {
    #[serde(default)]
    reply: Option<String>,
}

/// Gateway to the remote conversational service over HTTP.
///
/// The client is built once with a bounded timeout; cloning the gateway (or
/// calling it concurrently through a shared reference) reuses the same
/// connection pool.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    endpoint_url: String,
    ping_url: String,
    user_phone: String,
    client: reqwest::Client,
}

impl HttpGateway {
    /// Create a gateway for the configured endpoint and user identifier.
    pub fn new(config: &BackendConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            endpoint_url: config.endpoint_url.clone(),
            ping_url: config.ping_url(),
            user_phone: config.user_phone.clone(),
            client,
        }
    }

    /// Probe the service's `/ping` route and report reachability.
    ///
    /// Never escalates: any transport failure or non-success status is
    /// reported as `false`.
    pub async fn ping(&self) -> bool {
        match self.client.get(&self.ping_url).send().await {
            Ok(res) => res.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Ping probe failed");
                false
            }
        }
    }
}

#[async_trait::async_trait]
impl ReplyBackend for HttpGateway {
    async fn send(&self, text: &str) -> Result<String, GatewayError> {
        let body = OutboundRequest {
            message: text,
            user_phone: &self.user_phone,
        };

        debug!(endpoint = %self.endpoint_url, "Dispatching backend exchange");
        let res = self
            .client
            .post(&self.endpoint_url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        if !res.status().is_success() {
            return Err(GatewayError::Unavailable(format!(
                "service returned status {}",
                res.status()
            )));
        }

        let parsed: InboundReply = res
            .json()
            .await
            .map_err(|e| GatewayError::Unavailable(format!("unreadable response body: {}", e)))?;

        Ok(parsed.reply.unwrap_or_else(|| {
            warn!("Backend response carried no reply field; substituting fallback text");
            NO_REPLY_FALLBACK.to_string()
        }))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbound_request_wire_shape() {
        let req = OutboundRequest {
            message: "Schedule demo",
            user_phone: "15550100000",
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"message": "Schedule demo", "user_phone": "15550100000"})
        );
    }

    #[test]
    fn test_inbound_reply_parses_reply() {
        let parsed: InboundReply = serde_json::from_str(r#"{"reply": "Hi there!"}"#).unwrap();
        assert_eq!(parsed.reply.as_deref(), Some("Hi there!"));
    }

    #[test]
    fn test_inbound_reply_tolerates_missing_field() {
        let parsed: InboundReply = serde_json::from_str("{}").unwrap();
        assert!(parsed.reply.is_none());
    }

    #[test]
    fn test_inbound_reply_tolerates_null_and_extra_fields() {
        let parsed: InboundReply =
            serde_json::from_str(r#"{"reply": null, "status": "ok", "lead_id": 7}"#).unwrap();
        assert!(parsed.reply.is_none());
    }

    #[test]
    fn test_gateway_new_uses_config_urls() {
        let config = BackendConfig::default();
        let gateway = HttpGateway::new(&config);
        assert_eq!(gateway.endpoint_url, "http://127.0.0.1:8000/app");
        assert_eq!(gateway.ping_url, "http://127.0.0.1:8000/ping");
        assert_eq!(gateway.user_phone, "15550100000");
    }
}
