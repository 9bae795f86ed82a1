use moka::future::{Cache, CacheBuilder};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::core::{classify, format};
use crate::models::{ChatMessage, Sender};
use crate::services::LocatorApiClient;

type Transcript = Arc<Mutex<VecDeque<ChatMessage>>>;

/// Bounds on the in-memory chat state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// Messages kept per transcript; the oldest are dropped first
    pub max_transcript_len: usize,
    /// Transcripts kept at once
    pub max_sessions: u64,
    /// A transcript is evicted after this long without activity
    pub idle_ttl: Duration,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_transcript_len: 200,
            max_sessions: 10_000,
            idle_ttl: Duration::from_secs(3600),
        }
    }
}

/// Result of one submission: the session it landed in and the two messages
/// it appended
#[derive(Debug, Clone)]
pub struct ChatExchange {
    pub session_id: Uuid,
    pub user: ChatMessage,
    pub reply: ChatMessage,
}

/// Chat transcripts keyed by session id.
///
/// Each session owns its transcript. The user's message is appended as soon
/// as it is submitted and the reply when it is ready, so replies to
/// overlapping submissions in one session land in completion order.
pub struct ChatSessions {
    client: LocatorApiClient,
    transcripts: Cache<Uuid, Transcript>,
    max_transcript_len: usize,
}

impl ChatSessions {
    pub fn new(client: LocatorApiClient, limits: SessionLimits) -> Self {
        let transcripts = CacheBuilder::new(limits.max_sessions)
            .time_to_idle(limits.idle_ttl)
            .build();

        Self {
            client,
            transcripts,
            max_transcript_len: limits.max_transcript_len.max(1),
        }
    }

    /// Submit a query to a session, starting a new one when `session_id` is `None`.
    ///
    /// Conversational queries get a canned reply without a backend call.
    /// Backend failures become an error message; the session stays usable.
    pub async fn submit(&self, session_id: Option<Uuid>, query: &str) -> ChatExchange {
        let session_id = session_id.unwrap_or_else(Uuid::new_v4);
        let transcript = self
            .transcripts
            .get_with(session_id, async { Arc::new(Mutex::new(VecDeque::new())) })
            .await;

        let user = ChatMessage::user(query);
        self.append(&transcript, user.clone()).await;

        let intent = classify(query);
        tracing::debug!("Chat query in session {} classified as {:?}", session_id, intent);

        let reply = match intent.canned_reply() {
            Some(text) => ChatMessage::bot_text(text),
            None => match self.client.ask_chatbot(query).await {
                Ok(reply) => ChatMessage::new(Sender::Bot, format::format_reply(&reply)),
                Err(e) => {
                    tracing::error!("Error fetching chatbot response: {}", e);
                    ChatMessage::new(Sender::Bot, format::error_content())
                }
            },
        };

        self.append(&transcript, reply.clone()).await;

        ChatExchange {
            session_id,
            user,
            reply,
        }
    }

    async fn append(&self, transcript: &Transcript, message: ChatMessage) {
        let mut messages = transcript.lock().await;
        messages.push_back(message);
        while messages.len() > self.max_transcript_len {
            messages.pop_front();
        }
    }

    /// Snapshot of one session's transcript in append order, `None` if the
    /// session is unknown or expired
    pub async fn transcript(&self, session_id: Uuid) -> Option<Vec<ChatMessage>> {
        let transcript = self.transcripts.get(&session_id).await?;
        let messages = transcript.lock().await;
        Some(messages.iter().cloned().collect())
    }
}
