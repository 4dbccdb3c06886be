//! Single-turn assistant chat.

#[cfg(test)]
#[path = "ai_test.rs"]
mod ai_test;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::transport::ApiClient;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Where an answer came from: the local knowledge base or the model API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerSource {
    Knowledge,
    Api,
    #[serde(untagged)]
    Other(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    pub source: AnswerSource,
}

/// `POST /ai/chat`. No conversation state is kept between calls.
///
/// # Errors
///
/// Propagates the transport's [`ApiError`].
pub async fn chat(api: &ApiClient, message: &str) -> Result<ChatResponse, ApiError> {
    api.post("/ai/chat", &ChatRequest { message: message.to_owned() }).await
}
