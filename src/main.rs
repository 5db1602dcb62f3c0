use clap::Parser;
use sqg::{
    config::{GatewayConfig, DEFAULT_CLIENT_PLATFORM, DEFAULT_TARGET_MODEL, DEFAULT_VISION_MODEL},
    logging, server,
};
use sqg_data_connector::ProfileBackend;

#[derive(Parser, Debug)]
#[command(name = "sqg", version, about = "Screen query gateway")]
struct CliArgs {
    #[arg(long, env = "SQG_HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(long, env = "PORT", default_value_t = 8787)]
    port: u16,

    /// Secret clients must send as `Authorization: Bearer <key>`
    #[arg(long, env = "WORKER_API_KEY", hide_env_values = true)]
    worker_api_key: Option<String>,

    /// OpenAI-compatible chat completions URL used for both stages
    #[arg(long, env = "CUSTOM_AI_API_URL")]
    ai_api_url: Option<String>,

    #[arg(long, env = "CUSTOM_AI_API_KEY", hide_env_values = true)]
    ai_api_key: Option<String>,

    #[arg(long, env = "VISION_MODEL_ID", default_value = DEFAULT_VISION_MODEL)]
    vision_model: String,

    #[arg(long, env = "TARGET_MODEL_ID", default_value = DEFAULT_TARGET_MODEL)]
    target_model: String,

    /// Deadline for each upstream call
    #[arg(long, env = "SQG_REQUEST_TIMEOUT_SECS", default_value_t = 120)]
    request_timeout_secs: u64,

    #[arg(long, env = "SQG_MAX_PAYLOAD_SIZE", default_value_t = 32 * 1024 * 1024)]
    max_payload_size: usize,

    /// Operating system named in the prompts
    #[arg(long, env = "SQG_CLIENT_PLATFORM", default_value = DEFAULT_CLIENT_PLATFORM)]
    client_platform: String,

    /// memory | none
    #[arg(long, env = "SQG_PROFILE_BACKEND", default_value = "memory")]
    profile_backend: ProfileBackend,

    #[arg(long, env = "SQG_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[arg(long, env = "SQG_LOG_JSON")]
    log_json: bool,
}

impl CliArgs {
    fn into_config(self) -> Result<GatewayConfig, sqg::config::ConfigError> {
        GatewayConfig::builder()
            .host(self.host)
            .port(self.port)
            .maybe_api_key(self.worker_api_key)
            .maybe_provider(self.ai_api_url, self.ai_api_key)
            .vision_model(self.vision_model)
            .target_model(self.target_model)
            .request_timeout_secs(self.request_timeout_secs)
            .max_payload_size(self.max_payload_size)
            .client_platform(self.client_platform)
            .profile_backend(self.profile_backend)
            .log_level(self.log_level)
            .log_json(self.log_json)
            .build()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliArgs::parse().into_config()?;
    logging::init_logging(&config.log_level, config.log_json);

    tracing::debug!(config = ?config, "Loaded configuration");

    server::startup(config).await
}
