//! `/sync-user`: upsert the signed-in user's GitHub profile.

use std::sync::Arc;

use axum::{
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use sqg_data_connector::NewProfile;
use sqg_protocol::{envelope::Envelope, profile::SyncProfileRequest};
use tracing::{error, info, warn};

use super::{error as router_error, json_body::parse_json_body};
use crate::server::AppState;

pub const SYNC_SUCCESS_MESSAGE: &str = "User profile synced successfully.";
pub const MISSING_PROFILE_FIELDS: &str = "Bad Request: Missing profile fields (id, login)";

/// `POST /sync-user`
pub async fn sync_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let payload: SyncProfileRequest = match parse_json_body("/sync-user", &headers, body) {
        Ok(payload) => payload,
        Err(e) => return e.into_response(),
    };

    let Some(profile) = payload.profile.and_then(NewProfile::from_github) else {
        warn!("Sync payload missing required fields (id, login)");
        return router_error::bad_request("missing_profile_fields", MISSING_PROFILE_FIELDS);
    };

    let user_id = profile.id;
    info!(user_id = %user_id, "Received sync payload");

    match state.profile_storage.upsert_profile(profile).await {
        Ok(_) => {
            info!(user_id = %user_id, "Sync completed");
            (StatusCode::OK, Json(Envelope::ok(SYNC_SUCCESS_MESSAGE))).into_response()
        }
        Err(e) => {
            error!(user_id = %user_id, error = %e, "Profile sync failed");
            router_error::internal_error("profile_sync_failed", e.to_string())
        }
    }
}
