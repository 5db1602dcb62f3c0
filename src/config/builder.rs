use sqg_data_connector::ProfileBackend;

use super::{ConfigResult, GatewayConfig, ProviderConfig, SamplingParams};

/// Builder for [`GatewayConfig`] with a fluent API.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfigBuilder {
    config: GatewayConfig,
}

impl GatewayConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn max_payload_size(mut self, size: usize) -> Self {
        self.config.max_payload_size = size;
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    /// Inbound bearer secret for `/query` and `/sync-user`
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn maybe_api_key(mut self, key: Option<String>) -> Self {
        self.config.api_key = key;
        self
    }

    /// Upstream completion endpoint and its credential
    pub fn provider(mut self, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        self.config.provider = ProviderConfig {
            url: Some(url.into()),
            api_key: Some(api_key.into()),
        };
        self
    }

    pub fn maybe_provider(mut self, url: Option<String>, api_key: Option<String>) -> Self {
        self.config.provider = ProviderConfig { url, api_key };
        self
    }

    pub fn vision_model(mut self, model: impl Into<String>) -> Self {
        self.config.models.vision_model = model.into();
        self
    }

    pub fn target_model(mut self, model: impl Into<String>) -> Self {
        self.config.models.target_model = model.into();
        self
    }

    pub fn vision_sampling(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.config.sampling.vision = SamplingParams {
            max_tokens,
            temperature,
        };
        self
    }

    pub fn reasoning_sampling(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.config.sampling.reasoning = SamplingParams {
            max_tokens,
            temperature,
        };
        self
    }

    pub fn direct_sampling(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.config.sampling.direct = SamplingParams {
            max_tokens,
            temperature,
        };
        self
    }

    pub fn client_platform(mut self, platform: impl Into<String>) -> Self {
        self.config.client_platform = platform.into();
        self
    }

    pub fn profile_backend(mut self, backend: ProfileBackend) -> Self {
        self.config.profile_backend = backend;
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.log_level = level.into();
        self
    }

    pub fn log_json(mut self, enabled: bool) -> Self {
        self.config.log_json = enabled;
        self
    }

    /// Build and validate.
    pub fn build(self) -> ConfigResult<GatewayConfig> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Build without validation (tests construct deliberately broken configs).
    pub fn build_unchecked(self) -> GatewayConfig {
        self.config
    }
}
