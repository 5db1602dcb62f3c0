use serde::{Deserialize, Serialize};

/// Body of `POST /query`.
///
/// Both fields are optional on the wire; whether the combination is usable
/// is decided by the gateway, not by deserialization.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct QueryRequestBody {
    #[serde(default)]
    pub text: Option<String>,

    /// Screenshot as a data URL (`data:image/png;base64,...`).
    #[serde(
        default,
        rename = "base64ImageDataUrl",
        alias = "image",
        skip_serializing_if = "Option::is_none"
    )]
    pub base64_image_data_url: Option<String>,
}

/// Successful `POST /query` response.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct QueryResponse {
    pub ai_text: String,
}
