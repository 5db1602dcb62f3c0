use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Chat Completions API (v1/chat/completions) - request side
// ============================================================================

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ChatCompletionRequest {
    /// ID of the model to use
    pub model: String,

    /// The conversation so far
    pub messages: Vec<ChatMessage>,

    /// The maximum number of tokens to generate
    pub max_tokens: Option<u32>,

    /// What sampling temperature to use, between 0 and 2
    pub temperature: Option<f32>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Whether any message carries an image part.
    pub fn has_image(&self) -> bool {
        self.messages.iter().any(|m| match &m.content {
            MessageContent::Text(_) => false,
            MessageContent::Parts(parts) => parts
                .iter()
                .any(|p| matches!(p, ContentPart::ImageUrl { .. })),
        })
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Parts(parts),
        }
    }
}

/// Message content is either a plain string or a list of typed parts
/// (the multimodal form used for vision requests).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: url.into(),
                detail: None,
            },
        }
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ImageUrl {
    pub url: String,
    pub detail: Option<ImageDetail>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageDetail {
    Low,
    High,
    Auto,
}

// ============================================================================
// Chat Completions API - response side
// ============================================================================

/// Upstream completion body.
///
/// Every field is lenient: providers differ in what they omit, and a
/// `200 OK` body may carry a logical `error` value instead of choices.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,

    /// Entries may be `null`; a null first choice reads as no content.
    #[serde(default)]
    pub choices: Vec<Option<ChatChoice>>,

    #[serde(default)]
    pub usage: Option<Value>,

    #[serde(default)]
    pub error: Option<ProviderErrorField>,
}

impl ChatCompletionResponse {
    /// `choices[0].message.content`, if present.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(Option::as_ref)
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
    }

    /// The `error` field, when it holds a truthy value.
    pub fn provider_error(&self) -> Option<&ProviderErrorField> {
        self.error.as_ref().filter(|e| e.is_set())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,

    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub content: Option<String>,
}

/// Provider-reported error carried inside a successful HTTP response.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ProviderError {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default, rename = "type")]
    pub error_type: Option<String>,

    #[serde(default)]
    pub code: Option<Value>,
}

/// Providers disagree on the shape of `error`: most send an object, some a
/// bare string, a few a code or flag.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ProviderErrorField {
    Detail(ProviderError),
    Message(String),
    Other(Value),
}

impl ProviderErrorField {
    /// `false`, `0` and `""` count as no error.
    pub fn is_set(&self) -> bool {
        match self {
            ProviderErrorField::Detail(_) => true,
            ProviderErrorField::Message(m) => !m.is_empty(),
            ProviderErrorField::Other(v) => match v {
                Value::Null => false,
                Value::Bool(b) => *b,
                Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
                Value::String(s) => !s.is_empty(),
                Value::Array(_) | Value::Object(_) => true,
            },
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ProviderErrorField::Detail(e) => e.message.as_deref(),
            ProviderErrorField::Message(m) => Some(m.as_str()),
            ProviderErrorField::Other(_) => None,
        }
    }

    pub fn error_type(&self) -> Option<&str> {
        match self {
            ProviderErrorField::Detail(e) => e.error_type.as_deref(),
            _ => None,
        }
    }
}
