//! LLM agent abstraction
//!
//! The orchestrator only talks to a [`ChatAgent`]: one call, a list of chat
//! messages in, an [`AgentReply`] out. Replies come in several shapes
//! depending on the backend, so they are normalised into one type with a
//! single rule for finding the text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Result, WeatherBotError};

pub mod model_config;
pub mod openai;

pub use model_config::ModelEntry;
pub use openai::OpenAiChatAgent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One chat message sent to the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A message-like object inside a reply
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplyMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ReplyMessage {
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Some("assistant".to_string()),
            content: Some(content.into()),
        }
    }
}

/// Reply from an agent, in whatever shape the backend produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgentReply {
    Text(String),
    Messages(Vec<ReplyMessage>),
    Message(ReplyMessage),
}

impl AgentReply {
    /// Textual content of the reply.
    ///
    /// A sequence yields its first element's content, a single message its
    /// own content, plain text itself.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match self {
            AgentReply::Text(text) => Some(text),
            AgentReply::Messages(messages) => {
                messages.first().and_then(|m| m.content.as_deref())
            }
            AgentReply::Message(message) => message.content.as_deref(),
        }
    }

    /// Like [`AgentReply::content`], but a reply without text is an error
    pub fn into_text(self) -> Result<String> {
        self.content()
            .map(str::to_string)
            .ok_or_else(|| WeatherBotError::agent("Reply did not contain any text content"))
    }
}

#[async_trait]
pub trait ChatAgent: Send + Sync {
    /// Send the conversation to the model and return its reply
    async fn generate_reply(&self, messages: &[ChatMessage]) -> Result<AgentReply>;

    /// Single-turn convenience: one user message in, reply text out
    async fn ask(&self, prompt: &str) -> Result<String> {
        self.generate_reply(&[ChatMessage::user(prompt)])
            .await?
            .into_text()
    }
}
