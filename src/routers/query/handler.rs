use std::sync::Arc;

use axum::{
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use sqg_protocol::query::QueryRequestBody;
use tracing::warn;

use crate::{routers::json_body::parse_json_body, server::AppState};

/// `POST /query`
pub async fn query(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body: QueryRequestBody = match parse_json_body("/query", &headers, body) {
        Ok(body) => body,
        Err(e) => return e.into_response(),
    };

    match state.orchestrator.execute(body).await {
        Ok(answer) => (StatusCode::OK, Json(answer)).into_response(),
        Err(e) => {
            warn!(status = %e.status_code(), code = e.code(), error = %e, "Query failed");
            e.into_response()
        }
    }
}
