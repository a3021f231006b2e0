use serde::{Deserialize, Serialize};

/// Wire-level chat frame exchanged with the server, both directions.
/// Exactly one of `message`/`image` is expected to carry payload; a field
/// that carries nothing is omitted from the serialized JSON entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Base64 image payload, without a data-URL prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub username: String,
}

impl ChatMessage {
    /// Build a text frame from raw composer input. Whitespace-only input
    /// produces no frame.
    pub fn from_text_input(input: &str, username: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            message: Some(trimmed.to_string()),
            image: None,
            username: username.to_string(),
        })
    }

    pub fn from_image_payload(payload: String, username: &str) -> Self {
        Self {
            message: None,
            image: Some(payload),
            username: username.to_string(),
        }
    }

    pub fn is_from(&self, username: &str) -> bool {
        self.username == username
    }
}
