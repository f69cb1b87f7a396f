//! Chat agent backed by an OpenAI-compatible `/chat/completions` endpoint

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use super::{AgentReply, ChatAgent, ChatMessage, ModelEntry, ReplyMessage};
use crate::config::AgentConfig;
use crate::{Result, WeatherBotError};

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

/// Assistant agent with a fixed system message
#[derive(Debug, Clone)]
pub struct OpenAiChatAgent {
    http: Client,
    model: ModelEntry,
    system_message: Option<String>,
    endpoint: String,
}

impl OpenAiChatAgent {
    pub fn new(model: ModelEntry, config: &AgentConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .build()
            .map_err(|e| WeatherBotError::config(format!("Failed to build HTTP client: {e}")))?;

        let system_message = Some(config.system_message.trim().to_string())
            .filter(|message| !message.is_empty());
        let endpoint = format!("{}/chat/completions", model.base_url());

        Ok(Self {
            http,
            model,
            system_message,
            endpoint,
        })
    }

    /// Build the agent from the model config list named in `config`
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        let model = super::model_config::load_primary(&config.model_config_path)?;
        Self::new(model, config)
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model.model
    }

    fn request_body(&self, messages: &[ChatMessage]) -> serde_json::Value {
        let mut all = Vec::with_capacity(messages.len() + 1);
        if let Some(system) = &self.system_message {
            all.push(ChatMessage::system(system.clone()));
        }
        all.extend_from_slice(messages);

        let mut body = json!({
            "model": self.model.model,
            "messages": all,
        });
        if let Some(temperature) = self.model.temperature {
            body["temperature"] = json!(temperature);
        }
        body
    }
}

#[async_trait]
impl ChatAgent for OpenAiChatAgent {
    #[instrument(skip_all, fields(model = %self.model.model, messages = messages.len()))]
    async fn generate_reply(&self, messages: &[ChatMessage]) -> Result<AgentReply> {
        debug!("POST {}", self.endpoint);

        let mut request = self.http.post(&self.endpoint).json(&self.request_body(messages));
        if let Some(key) = self.model.api_key() {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| WeatherBotError::agent(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(200).collect();
            return Err(WeatherBotError::agent(format!(
                "Model endpoint returned {status}: {snippet}"
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| WeatherBotError::agent(format!("Failed to parse completion: {e}")))?;

        Ok(AgentReply::Messages(
            completion.choices.into_iter().map(|c| c.message).collect(),
        ))
    }
}
