//! Chat assistant session.
//!
//! Holds the transcript and the send discipline: empty input is ignored,
//! and a failed call never escapes -- the transcript gets a transient
//! apology chosen by failure kind and the session stays usable.

use serde::{Deserialize, Serialize};

use crate::ai::{ChatProvider, GroundingSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<GroundingSource>,
}

impl ChatMessage {
    fn assistant(text: impl Into<String>, sources: Vec<GroundingSource>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            sources,
        }
    }
}

/// What `send` did with the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was blank; nothing happened.
    Ignored,
    /// The assistant answered.
    Replied,
    /// The call failed; an apology was appended instead.
    FellBack,
}

const GREETING: &str = "Hi! I'm your study assistant. What can I help you with?";

#[derive(Debug)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    /// A fresh session, seeded with the assistant's greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING, Vec::new())],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Send one message and append the reply to the transcript.
    ///
    /// The `&mut self` receiver is the single-in-flight discipline: a
    /// second send cannot start until this one resolved.
    pub async fn send<C>(&mut self, client: &C, text: &str, use_search: bool) -> SendOutcome
    where
        C: ChatProvider + ?Sized,
    {
        let text = text.trim();
        if text.is_empty() {
            return SendOutcome::Ignored;
        }
        self.messages.push(ChatMessage {
            role: Role::User,
            text: text.to_string(),
            sources: Vec::new(),
        });
        match client.chat(text, use_search).await {
            Ok(reply) => {
                self.messages.push(ChatMessage::assistant(reply.text, reply.sources));
                SendOutcome::Replied
            }
            Err(err) => {
                self.messages
                    .push(ChatMessage::assistant(err.user_message(), Vec::new()));
                SendOutcome::FellBack
            }
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::ai::{AiError, ChatReply};

    struct StubChat {
        reply: Result<&'static str, u16>,
    }

    #[async_trait]
    impl ChatProvider for StubChat {
        async fn chat(&self, _message: &str, _use_search: bool) -> Result<ChatReply, AiError> {
            match self.reply {
                Ok(text) => Ok(ChatReply {
                    text: text.to_string(),
                    sources: vec![GroundingSource {
                        uri: Some("https://example.com".into()),
                        title: Some("Example".into()),
                    }],
                }),
                Err(status) => Err(AiError::from_status(status, "nope".into())),
            }
        }
    }

    #[tokio::test]
    async fn starts_with_a_greeting() {
        let session = ChatSession::new();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, Role::Assistant);
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let mut session = ChatSession::new();
        let client = StubChat { reply: Ok("hi") };
        assert_eq!(session.send(&client, "   ", false).await, SendOutcome::Ignored);
        assert_eq!(session.messages().len(), 1);
    }

    #[tokio::test]
    async fn reply_carries_sources() {
        let mut session = ChatSession::new();
        let client = StubChat { reply: Ok("an answer") };
        assert_eq!(session.send(&client, "question", true).await, SendOutcome::Replied);
        let last = session.last().unwrap();
        assert_eq!(last.text, "an answer");
        assert_eq!(last.sources.len(), 1);
    }

    #[tokio::test]
    async fn failure_appends_apology_and_session_stays_usable() {
        let mut session = ChatSession::new();
        let failing = StubChat { reply: Err(500) };
        assert_eq!(session.send(&failing, "question", false).await, SendOutcome::FellBack);
        // greeting + user message + apology
        assert_eq!(session.messages().len(), 3);
        let apology = session.last().unwrap();
        assert_eq!(apology.role, Role::Assistant);

        let working = StubChat { reply: Ok("recovered") };
        assert_eq!(session.send(&working, "again", false).await, SendOutcome::Replied);
        assert_eq!(session.last().unwrap().text, "recovered");
    }

    #[tokio::test]
    async fn rate_limit_apology_differs_from_generic() {
        let mut session = ChatSession::new();
        let limited = StubChat { reply: Err(429) };
        session.send(&limited, "question", false).await;
        let limited_text = session.last().unwrap().text.clone();

        let generic = StubChat { reply: Err(500) };
        session.send(&generic, "question", false).await;
        assert_ne!(session.last().unwrap().text, limited_text);
    }
}
