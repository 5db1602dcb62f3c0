use std::{any::Any, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{DefaultBodyLimit, Request},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use sqg_auth::{api_key_auth_middleware, ApiKeyAuthState};
use sqg_data_connector::{create_profile_storage, ProfileStorage};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{error, info, info_span, warn};

use crate::{
    config::GatewayConfig,
    routers::{error as router_error, query, query::QueryOrchestrator, sync},
};

/// Process-wide state handed to every handler.
pub struct AppState {
    pub orchestrator: Arc<QueryOrchestrator>,
    pub profile_storage: Arc<dyn ProfileStorage>,
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    pub fn new(config: Arc<GatewayConfig>, http_client: reqwest::Client) -> Self {
        let orchestrator = Arc::new(QueryOrchestrator::new(Arc::clone(&config), http_client));
        let profile_storage = create_profile_storage(config.profile_backend);
        Self {
            orchestrator,
            profile_storage,
            config,
        }
    }
}

pub fn build_app(state: Arc<AppState>) -> Router {
    let auth_state = ApiKeyAuthState::new(state.config.api_key.clone());
    let max_payload_size = state.config.max_payload_size;

    let protected_routes = Router::new()
        .route("/query", post(query::query))
        .route("/sync-user", post(sync::sync_user))
        .route_layer(middleware::from_fn_with_state(
            auth_state,
            api_key_auth_middleware,
        ));

    let public_routes = Router::new().route("/health", get(health));

    let routes = Router::new().merge(protected_routes).merge(public_routes);
    with_middleware(routes, max_payload_size).with_state(state)
}

/// Fallbacks, body limit, request ids, tracing and panic recovery.
fn with_middleware<S>(router: Router<S>, max_payload_size: usize) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(DefaultBodyLimit::max(max_payload_size))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        request_id = %request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
}

async fn health() -> Response {
    Json(json!({"status": "ok"})).into_response()
}

async fn not_found() -> Response {
    router_error::not_found("not_found", "Not Found")
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    error!(panic = %detail, "Handler panicked");
    router_error::internal_error("internal_error", "Internal Server Error")
}

/// Bind, serve until Ctrl-C or SIGTERM, then drain in-flight requests.
pub async fn startup(config: GatewayConfig) -> anyhow::Result<()> {
    let config = Arc::new(config);

    let http_client = reqwest::Client::builder()
        .build()
        .context("failed to build HTTP client")?;

    let state = Arc::new(AppState::new(Arc::clone(&config), http_client));
    if !state.orchestrator.is_provider_configured() {
        warn!("AI provider URL or key not set; /query will return a configuration error");
    }
    if config.api_key.is_none() {
        warn!("Inbound API key not set; protected routes will reject every request");
    }

    let app = build_app(state);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(
        address = %addr,
        vision_model = %config.models.vision_model,
        target_model = %config.models.target_model,
        profile_backend = %config.profile_backend,
        "Gateway listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http, http::StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    async fn explode() -> Response {
        panic!("handler exploded")
    }

    #[tokio::test]
    async fn test_panicking_handler_returns_envelope() {
        let app = with_middleware(Router::new().route("/explode", get(explode)), 1024);

        let response = app
            .oneshot(
                http::Request::builder()
                    .uri("/explode")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().contains_key("x-request-id"));
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({"success": false, "message": "Internal Server Error"})
        );
    }

    #[test]
    fn test_handle_panic_accepts_any_payload() {
        let response = handle_panic(Box::new(42_u32));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
