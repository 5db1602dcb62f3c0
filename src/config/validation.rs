use url::Url;

use super::{ConfigError, ConfigResult, GatewayConfig, SamplingParams};

impl GatewayConfig {
    /// Validate static settings.
    ///
    /// A missing provider URL or key is not an error here: it surfaces per
    /// request as a configuration failure.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.port == 0 {
            return Err(invalid("port", "must be greater than 0"));
        }
        if self.request_timeout_secs == 0 {
            return Err(invalid("request_timeout_secs", "must be greater than 0"));
        }
        if self.max_payload_size == 0 {
            return Err(invalid("max_payload_size", "must be greater than 0"));
        }
        if self.models.vision_model.trim().is_empty() {
            return Err(invalid("models.vision_model", "cannot be empty"));
        }
        if self.models.target_model.trim().is_empty() {
            return Err(invalid("models.target_model", "cannot be empty"));
        }

        validate_sampling("sampling.vision", &self.sampling.vision)?;
        validate_sampling("sampling.reasoning", &self.sampling.reasoning)?;
        validate_sampling("sampling.direct", &self.sampling.direct)?;

        if let Some(raw) = self.provider.url.as_deref().filter(|u| !u.trim().is_empty()) {
            let url = Url::parse(raw).map_err(|e| invalid("provider.url", e.to_string()))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(invalid(
                    "provider.url",
                    format!("unsupported URL scheme: {}", url.scheme()),
                ));
            }
        }

        if self.provider.url.is_some() != self.provider.api_key.is_some() {
            tracing::warn!(
                "Only one of provider URL / provider key is set; /query will report a configuration error"
            );
        }

        Ok(())
    }
}

fn validate_sampling(field: &str, params: &SamplingParams) -> ConfigResult<()> {
    if params.max_tokens == 0 {
        return Err(invalid(
            &format!("{}.max_tokens", field),
            "must be greater than 0",
        ));
    }
    if !(0.0..=2.0).contains(&params.temperature) {
        return Err(invalid(
            &format!("{}.temperature", field),
            format!("must be between 0 and 2, got {}", params.temperature),
        ));
    }
    Ok(())
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GatewayConfig::default().validate().is_ok());
    }

    #[test]
    fn test_missing_provider_is_not_a_startup_error() {
        let config = GatewayConfig::builder()
            .maybe_provider(None, None)
            .build_unchecked();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_provider_url() {
        let config = GatewayConfig::builder()
            .provider("ftp://example.com/v1", "k")
            .build_unchecked();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "provider.url"
        ));

        let config = GatewayConfig::builder()
            .provider("not a url", "k")
            .build_unchecked();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_sampling() {
        let config = GatewayConfig::builder()
            .vision_sampling(2048, 2.5)
            .build_unchecked();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "sampling.vision.temperature"
        ));

        let config = GatewayConfig::builder()
            .direct_sampling(0, 0.7)
            .build_unchecked();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_models_and_zero_limits() {
        assert!(GatewayConfig::builder()
            .vision_model(" ")
            .build_unchecked()
            .validate()
            .is_err());
        assert!(GatewayConfig::builder()
            .request_timeout_secs(0)
            .build_unchecked()
            .validate()
            .is_err());
        assert!(GatewayConfig::builder()
            .max_payload_size(0)
            .build_unchecked()
            .validate()
            .is_err());
    }
}
