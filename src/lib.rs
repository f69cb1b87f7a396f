//! `weatherbot` - chat assistant with live weather context
//!
//! A query goes through three steps: the LLM agent names the city the user
//! is asking about, the current weather for that city is fetched from
//! `OpenMeteo`, and the agent answers the query with the weather folded
//! into its prompt.

pub mod agent;
pub mod api;
pub mod city_extractor;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod telemetry;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use agent::{AgentReply, ChatAgent, ChatMessage, OpenAiChatAgent};
pub use city_extractor::extract_city;
pub use config::AppConfig;
pub use error::WeatherBotError;
pub use models::{GeoLocation, SkyCondition, WeatherSnapshot};
pub use orchestrator::QueryOrchestrator;
pub use weather::{WeatherClient, WeatherLookup};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherBotError>;
