//! OpenRouter chat completions wire types.
//!
//! Only the fields Folio sends or reads. Response fields are all optional so
//! that an unexpected shape degrades to an empty reply instead of an error.

use serde::{Deserialize, Serialize};

use folio_types::chat::ChatTurn;

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct OpenRouterRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatTurn],
    pub temperature: f64,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenRouterResponse {
    #[serde(default)]
    pub choices: Vec<OpenRouterChoice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenRouterChoice {
    #[serde(default)]
    pub message: Option<OpenRouterMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenRouterMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl OpenRouterResponse {
    /// Text of the first choice, or empty.
    pub fn first_text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default()
    }
}
