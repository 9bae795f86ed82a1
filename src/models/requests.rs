use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request to submit a chat query
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1))]
    pub query: String,
    /// Session to continue; a new one is started when absent
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

impl ChatRequest {
    /// True if the query has no visible characters
    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }
}

/// Query string for the transcript endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptQuery {
    pub session_id: Uuid,
}
