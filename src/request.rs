//! Request bodies for the chat endpoint.
//!
//! Every call to the tracker API wraps its payload in a schema-versioned
//! envelope. This module only builds bodies; sending them is up to the caller.

use crate::streaming::AccumulatedResponse;
use serde::{Deserialize, Serialize};

/// Schema version expected by the API
pub const SCHEMA_VERSION: &str = "4.0";

/// Path of the streaming chat endpoint
pub const AI_RESPOND_PATH: &str = "/codvid-ai/ai/respond";

/// Schema-versioned request body: `{"schema_version": "4.0", "data": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope<T> {
    /// Always [`SCHEMA_VERSION`] for requests built here
    pub schema_version: String,
    /// Endpoint-specific payload
    pub data: T,
}

impl<T> RequestEnvelope<T> {
    /// Wrap a payload with the current schema version
    pub fn new(data: T) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            data,
        }
    }
}

impl<T: Serialize> RequestEnvelope<T> {
    /// Serialize to a JSON body
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Speaker of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Human input
    User,
    /// Model reply
    Assistant,
}

impl MessageRole {
    /// Convert to string representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of a project conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    /// Content type; the API only knows `"text"`
    #[serde(rename = "type")]
    pub r#type: String,
    pub text: String,
}

impl ChatMessage {
    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            r#type: "text".to_string(),
            text: text.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            r#type: "text".to_string(),
            text: text.into(),
        }
    }

    /// Turn a finished streaming call into the assistant's reply.
    ///
    /// Returns `None` when the call produced no text.
    pub fn from_response(response: &AccumulatedResponse) -> Option<Self> {
        if response.text.is_empty() {
            None
        } else {
            Some(Self::assistant(response.text.clone()))
        }
    }
}

/// Payload of [`AI_RESPOND_PATH`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Project the conversation belongs to
    pub project_name: String,
    pub message: ChatMessage,
}

impl ChatRequest {
    /// Ask the assistant about `project_name`
    pub fn new(project_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            message: ChatMessage::user(text),
        }
    }

    /// Wrap in the schema-versioned envelope
    pub fn into_envelope(self) -> RequestEnvelope<Self> {
        RequestEnvelope::new(self)
    }
}
