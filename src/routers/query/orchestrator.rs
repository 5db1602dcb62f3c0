use std::sync::Arc;

use sqg_protocol::query::{QueryRequestBody, QueryResponse};

use super::{
    context::{RequestContext, SharedComponents},
    driver,
    error::QueryError,
};
use crate::{
    config::GatewayConfig,
    upstream::{CompletionClient, HttpCompletionClient},
};

/// Entry point for `/query` requests.
///
/// Holds only read-only state; every call to [`execute`](Self::execute)
/// builds a fresh request context, so nothing is cached between requests.
#[derive(Clone)]
pub struct QueryOrchestrator {
    components: Arc<SharedComponents>,
}

impl QueryOrchestrator {
    /// Production constructor: one HTTP client for the configured provider.
    pub fn new(config: Arc<GatewayConfig>, http_client: reqwest::Client) -> Self {
        let client = HttpCompletionClient::from_config(
            http_client,
            &config.provider,
            config.request_timeout(),
        )
        .map(|c| Arc::new(c) as Arc<dyn CompletionClient>);
        Self::with_client(config, client)
    }

    pub fn with_client(
        config: Arc<GatewayConfig>,
        completion_client: Option<Arc<dyn CompletionClient>>,
    ) -> Self {
        Self {
            components: Arc::new(SharedComponents {
                config,
                completion_client,
            }),
        }
    }

    pub fn is_provider_configured(&self) -> bool {
        self.components.completion_client.is_some()
    }

    pub async fn execute(&self, body: QueryRequestBody) -> Result<QueryResponse, QueryError> {
        let mut ctx = RequestContext::new(body, Arc::clone(&self.components));
        driver::execute(&mut ctx).await
    }
}
