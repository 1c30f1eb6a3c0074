use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Top-level configuration for the Palaver widget core.
///
/// Values are fixed for the lifetime of the process once constructed. The
/// defaults carry the widget's built-in endpoint and user identifier; an
/// embedder may override them by constructing the struct directly or by
/// loading a TOML file. Nothing in this crate reads ambient state (no CLI,
/// no environment variables).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PalaverConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
}

impl Default for PalaverConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            voice: VoiceConfig::default(),
        }
    }
}

impl PalaverConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: PalaverConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// Remote conversational service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Endpoint the widget posts outbound messages to.
    pub endpoint_url: String,
    /// Fixed identifier sent as `user_phone` with every message.
    pub user_phone: String,
    /// Bound on each backend exchange; a stalled request counts as
    /// backend-unavailable once this elapses.
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint_url: "http://127.0.0.1:8000/app".to_string(),
            user_phone: "15550100000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl BackendConfig {
    /// The request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// URL of the service's reachability probe, the sibling `/ping` route of
    /// the configured endpoint.
    pub fn ping_url(&self) -> String {
        match self.endpoint_url.trim_end_matches('/').rsplit_once('/') {
            Some((base, _)) => format!("{}/ping", base),
            None => format!("{}/ping", self.endpoint_url),
        }
    }
}

/// Voice capture settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Whether the voice capture control is offered at all.
    pub enabled: bool,
    /// Maximum recording duration in seconds, enforced by the platform
    /// recognizer.
    pub max_duration_seconds: u32,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_duration_seconds: 30,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
