//! City extraction
//!
//! Asks the agent which city a free-text query mentions.

use tracing::{debug, instrument};

use crate::Result;
use crate::agent::ChatAgent;

/// Marker the agent is told to answer with when no city is mentioned
pub const NO_CITY_MARKER: &str = "None";

/// Prompt asking the agent to name the city in `text`
#[must_use]
pub fn extraction_prompt(text: &str) -> String {
    format!(
        "Extract the city name from this sentence: '{text}'. If no city is found, return '{NO_CITY_MARKER}'."
    )
}

/// Normalise the agent's answer: trimmed city name, or `None` for "none"
#[must_use]
pub fn parse_city_reply(reply: &str) -> Option<String> {
    let city = reply.trim();
    if city.is_empty() || city.eq_ignore_ascii_case(NO_CITY_MARKER) {
        None
    } else {
        Some(city.to_string())
    }
}

/// Name of the city mentioned in `text`, if any.
///
/// Agent failures and replies without text are returned as errors.
#[instrument(skip(agent))]
pub async fn extract_city(agent: &dyn ChatAgent, text: &str) -> Result<Option<String>> {
    let reply = agent.ask(&extraction_prompt(text)).await?;
    let city = parse_city_reply(&reply);
    debug!("Extracted city: {city:?}");
    Ok(city)
}
