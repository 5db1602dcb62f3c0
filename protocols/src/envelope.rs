use serde::{Deserialize, Serialize};

/// Uniform envelope for every error and for plain acknowledgments.
///
/// `success` is `false` on every error path; `/sync-user` reuses the same
/// shape with `success: true`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
}

impl Envelope {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_shape() {
        let value = serde_json::to_value(Envelope::error("Not Found")).unwrap();
        assert_eq!(value, serde_json::json!({"success": false, "message": "Not Found"}));
    }
}
