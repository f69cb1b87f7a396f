//! Query orchestration
//!
//! Ties the pieces together for one user query: extract a city, look up its
//! weather, fold the weather into the prompt and ask the agent for the answer.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::agent::{ChatAgent, OpenAiChatAgent};
use crate::city_extractor::extract_city;
use crate::config::AppConfig;
use crate::weather::{WeatherClient, WeatherLookup};

/// Reply for an empty query
pub const EMPTY_QUERY_RESPONSE: &str = "Please enter a question.";
/// Reply when the final agent call fails or yields no text
pub const FALLBACK_RESPONSE: &str = "I didn't understand that.";

/// Append the weather clause to the user's text when a summary is available
#[must_use]
pub fn build_augmented_prompt(text: &str, city: Option<&str>, weather: Option<&str>) -> String {
    match (city, weather) {
        (Some(city), Some(weather)) => {
            format!("{text} answer this if the weather in {city} is: {weather}")
        }
        _ => text.to_string(),
    }
}

/// Stateless request handler shared by all HTTP requests
#[derive(Clone)]
pub struct QueryOrchestrator {
    agent: Arc<dyn ChatAgent>,
    weather: Arc<dyn WeatherLookup>,
}

impl QueryOrchestrator {
    pub fn new(agent: Arc<dyn ChatAgent>, weather: Arc<dyn WeatherLookup>) -> Self {
        Self { agent, weather }
    }

    /// Wire up the production agent and weather client
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let agent = OpenAiChatAgent::from_config(&config.agent)?;
        info!("Using model {}", agent.model());
        let weather = WeatherClient::new(&config.weather)?;
        Ok(Self::new(Arc::new(agent), Arc::new(weather)))
    }

    /// Answer a raw user query. Always produces some text.
    ///
    /// A failed final call and a blank final answer both yield [`FALLBACK_RESPONSE`].
    #[instrument(skip(self))]
    pub async fn handle_query(&self, text: &str) -> String {
        let text = text.trim();
        if text.is_empty() {
            return EMPTY_QUERY_RESPONSE.to_string();
        }

        debug!("Received query: {text}");

        // An extraction failure only costs the weather context
        let city = match extract_city(self.agent.as_ref(), text).await {
            Ok(city) => city,
            Err(e) => {
                warn!("City extraction failed, answering without weather: {e}");
                None
            }
        };

        let weather = match &city {
            Some(city) => self.weather.get_weather(city).await,
            None => None,
        };
        if let (Some(city), None) = (&city, &weather) {
            info!("No weather available for {city}");
        }

        let prompt = build_augmented_prompt(text, city.as_deref(), weather.as_deref());
        debug!("Final prompt: {prompt}");

        let response = match self.agent.ask(&prompt).await {
            Ok(answer) if !answer.trim().is_empty() => answer,
            Ok(_) => {
                warn!("Agent returned an empty answer");
                FALLBACK_RESPONSE.to_string()
            }
            Err(e) => {
                warn!("Final agent call failed: {e}");
                FALLBACK_RESPONSE.to_string()
            }
        };

        debug!("Response: {response}");
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentReply, ChatMessage};
    use crate::WeatherBotError;
    use crate::city_extractor::extraction_prompt;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays queued results and records every user message it receives
    #[derive(Default)]
    struct ScriptedAgent {
        replies: Mutex<VecDeque<Result<AgentReply>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedAgent {
        fn new(replies: Vec<Result<AgentReply>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                prompts: Mutex::default(),
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatAgent for ScriptedAgent {
        async fn generate_reply(&self, messages: &[ChatMessage]) -> Result<AgentReply> {
            self.prompts
                .lock()
                .unwrap()
                .extend(messages.iter().map(|m| m.content.clone()));
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(WeatherBotError::agent("no scripted reply left")))
        }
    }

    #[derive(Default)]
    struct FakeWeather {
        summary: Option<String>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl WeatherLookup for FakeWeather {
        async fn get_weather(&self, city: &str) -> Option<String> {
            self.calls.lock().unwrap().push(city.to_string());
            self.summary.clone()
        }
    }

    fn text(s: &str) -> Result<AgentReply> {
        Ok(AgentReply::Text(s.to_string()))
    }

    const PARIS: &str = "The current weather in Paris is 15°C with 60% humidity, wind speed of 10 km/h, and clear skies (10% cloud cover).";

    #[tokio::test]
    async fn test_empty_query_short_circuits() {
        let agent = ScriptedAgent::new(vec![]);
        let weather = Arc::new(FakeWeather::default());
        let orchestrator = QueryOrchestrator::new(agent.clone(), weather.clone());

        assert_eq!(orchestrator.handle_query("   \t\n").await, EMPTY_QUERY_RESPONSE);
        assert!(agent.prompts().is_empty());
        assert!(weather.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_weather_clause_is_appended() {
        let agent = ScriptedAgent::new(vec![text("Paris"), text("Bring sunglasses.")]);
        let weather = Arc::new(FakeWeather {
            summary: Some(PARIS.to_string()),
            ..FakeWeather::default()
        });
        let orchestrator = QueryOrchestrator::new(agent.clone(), weather.clone());

        let answer = orchestrator.handle_query("  Do I need sunglasses in Paris?  ").await;
        assert_eq!(answer, "Bring sunglasses.");
        assert_eq!(*weather.calls.lock().unwrap(), vec!["Paris".to_string()]);

        let prompts = agent.prompts();
        assert_eq!(prompts[0], extraction_prompt("Do I need sunglasses in Paris?"));
        let final_prompt = &prompts[1];
        assert!(final_prompt.starts_with("Do I need sunglasses in Paris?"));
        assert_eq!(
            final_prompt,
            &format!("Do I need sunglasses in Paris? answer this if the weather in Paris is: {PARIS}")
        );
    }

    #[tokio::test]
    async fn test_no_city_skips_weather() {
        let agent = ScriptedAgent::new(vec![text("None"), text("42.")]);
        let weather = Arc::new(FakeWeather::default());
        let orchestrator = QueryOrchestrator::new(agent.clone(), weather.clone());

        assert_eq!(orchestrator.handle_query("What is six times seven?").await, "42.");
        assert!(weather.calls.lock().unwrap().is_empty());
        assert_eq!(agent.prompts()[1], "What is six times seven?");
    }

    #[tokio::test]
    async fn test_unknown_city_leaves_prompt_unchanged() {
        let agent = ScriptedAgent::new(vec![text("Atlantis"), text("Not sure.")]);
        let weather = Arc::new(FakeWeather::default());
        let orchestrator = QueryOrchestrator::new(agent.clone(), weather.clone());

        orchestrator.handle_query("Weather in Atlantis?").await;
        assert_eq!(*weather.calls.lock().unwrap(), vec!["Atlantis".to_string()]);
        assert_eq!(agent.prompts()[1], "Weather in Atlantis?");
    }

    #[tokio::test]
    async fn test_extraction_failure_is_treated_as_no_city() {
        let agent = ScriptedAgent::new(vec![
            Err(WeatherBotError::agent("timeout")),
            text("Hello!"),
        ]);
        let weather = Arc::new(FakeWeather {
            summary: Some(PARIS.to_string()),
            ..FakeWeather::default()
        });
        let orchestrator = QueryOrchestrator::new(agent.clone(), weather.clone());

        assert_eq!(orchestrator.handle_query("Hi there").await, "Hello!");
        assert!(weather.calls.lock().unwrap().is_empty());
        assert_eq!(agent.prompts()[1], "Hi there");
    }

    #[tokio::test]
    async fn test_final_call_failure_falls_back() {
        let agent = ScriptedAgent::new(vec![text("None"), Err(WeatherBotError::agent("boom"))]);
        let orchestrator = QueryOrchestrator::new(agent, Arc::new(FakeWeather::default()));

        assert_eq!(orchestrator.handle_query("Hello").await, FALLBACK_RESPONSE);
    }

    #[tokio::test]
    async fn test_blank_final_answer_falls_back() {
        let agent = ScriptedAgent::new(vec![text("None"), text("  \n")]);
        let orchestrator = QueryOrchestrator::new(agent, Arc::new(FakeWeather::default()));

        assert_eq!(orchestrator.handle_query("Hello").await, FALLBACK_RESPONSE);
    }

    #[tokio::test]
    async fn test_final_reply_without_text_falls_back() {
        let agent = ScriptedAgent::new(vec![text("None"), Ok(AgentReply::Messages(vec![]))]);
        let orchestrator = QueryOrchestrator::new(agent, Arc::new(FakeWeather::default()));

        assert_eq!(orchestrator.handle_query("Hello").await, FALLBACK_RESPONSE);
    }

    #[test]
    fn test_build_augmented_prompt() {
        assert_eq!(build_augmented_prompt("q", None, None), "q");
        assert_eq!(build_augmented_prompt("q", Some("Rome"), None), "q");
        assert_eq!(
            build_augmented_prompt("q", Some("Rome"), Some("sunny")),
            "q answer this if the weather in Rome is: sunny"
        );
    }
}
