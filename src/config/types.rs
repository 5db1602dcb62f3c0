use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqg_data_connector::ProfileBackend;

pub const DEFAULT_VISION_MODEL: &str = "google/gemini-2.0-flash-001";
pub const DEFAULT_TARGET_MODEL: &str = "accounts/fireworks/models/deepseek-r1";
pub const DEFAULT_CLIENT_PLATFORM: &str = "macOS Sequoia 15.4";

/// Main gateway configuration
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Maximum accepted request body size in bytes (screenshots are inlined as base64)
    pub max_payload_size: usize,
    /// Deadline for each individual upstream call
    pub request_timeout_secs: u64,
    /// Secret expected in `Authorization: Bearer <key>` on protected routes
    pub api_key: Option<String>,
    pub provider: ProviderConfig,
    pub models: ModelConfig,
    pub sampling: SamplingConfig,
    /// Free-text operating system hint embedded in both prompts
    pub client_platform: String,
    pub profile_backend: ProfileBackend,
    pub log_level: String,
    pub log_json: bool,
}

impl GatewayConfig {
    pub fn builder() -> super::GatewayConfigBuilder {
        super::GatewayConfigBuilder::new()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8787,
            max_payload_size: 32 * 1024 * 1024,
            request_timeout_secs: 120,
            api_key: None,
            provider: ProviderConfig::default(),
            models: ModelConfig::default(),
            sampling: SamplingConfig::default(),
            client_platform: DEFAULT_CLIENT_PLATFORM.to_string(),
            profile_backend: ProfileBackend::default(),
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("max_payload_size", &self.max_payload_size)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("provider", &self.provider)
            .field("models", &self.models)
            .field("sampling", &self.sampling)
            .field("client_platform", &self.client_platform)
            .field("profile_backend", &self.profile_backend)
            .finish()
    }
}

/// OpenAI-compatible completion endpoint shared by both stages.
///
/// Either field may be absent at startup; a request that needs the provider
/// then fails with a configuration error instead of the process refusing to
/// boot.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProviderConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
}

impl ProviderConfig {
    /// URL and key, only when both are present and non-empty.
    pub fn endpoint(&self) -> Option<(&str, &str)> {
        let url = self.url.as_deref().filter(|u| !u.trim().is_empty())?;
        let key = self.api_key.as_deref().filter(|k| !k.is_empty())?;
        Some((url, key))
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelConfig {
    /// Model that turns a screenshot into a JSON description
    pub vision_model: String,
    /// Model that produces the final answer
    pub target_model: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            target_model: DEFAULT_TARGET_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SamplingConfig {
    /// Low temperature: the description must be factual and well-formed JSON
    pub vision: SamplingParams,
    pub reasoning: SamplingParams,
    pub direct: SamplingParams,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            vision: SamplingParams {
                max_tokens: 2048,
                temperature: 0.2,
            },
            reasoning: SamplingParams {
                max_tokens: 3000,
                temperature: 0.6,
            },
            direct: SamplingParams {
                max_tokens: 3000,
                temperature: 0.7,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.models.vision_model, DEFAULT_VISION_MODEL);
        assert_eq!(config.models.target_model, DEFAULT_TARGET_MODEL);
        assert_eq!(config.sampling.vision.max_tokens, 2048);
        assert_eq!(config.sampling.direct.temperature, 0.7);
        assert_eq!(config.request_timeout(), Duration::from_secs(120));
        assert!(config.provider.endpoint().is_none());
    }

    #[test]
    fn test_endpoint_requires_url_and_key() {
        let mut provider = ProviderConfig {
            url: Some("http://localhost/v1/chat/completions".to_string()),
            api_key: None,
        };
        assert!(provider.endpoint().is_none());

        provider.api_key = Some(String::new());
        assert!(provider.endpoint().is_none());

        provider.api_key = Some("k".to_string());
        assert_eq!(
            provider.endpoint(),
            Some(("http://localhost/v1/chat/completions", "k"))
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = GatewayConfig {
            api_key: Some("inbound-secret".to_string()),
            provider: ProviderConfig {
                url: Some("http://p".to_string()),
                api_key: Some("upstream-secret".to_string()),
            },
            ..Default::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("inbound-secret"));
        assert!(!rendered.contains("upstream-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
