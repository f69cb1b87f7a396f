//! Model config list: a JSON array of model entries, the first one is used

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Result, WeatherBotError};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const GOOGLE_OPENAI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    /// Provider family, e.g. `openai` or `google`
    #[serde(default)]
    pub api_type: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl fmt::Debug for ModelEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelEntry")
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("api_type", &self.api_type)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl ModelEntry {
    /// Base URL of the OpenAI-compatible API serving this model
    #[must_use]
    pub fn base_url(&self) -> String {
        let base = match (&self.base_url, self.api_type.as_deref()) {
            (Some(url), _) if !url.trim().is_empty() => url.trim(),
            (_, Some(api_type)) if api_type.eq_ignore_ascii_case("google") => {
                GOOGLE_OPENAI_BASE_URL
            }
            _ => OPENAI_BASE_URL,
        };
        base.trim_end_matches('/').to_string()
    }

    /// API key, if one is set and non-empty
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }
}

/// Parse a config list from JSON text
pub fn parse_config_list(json: &str) -> Result<Vec<ModelEntry>> {
    let entries: Vec<ModelEntry> = serde_json::from_str(json)
        .map_err(|e| WeatherBotError::config(format!("Invalid model config list: {e}")))?;

    if entries.is_empty() {
        return Err(WeatherBotError::config("Model config list is empty"));
    }
    if let Some(index) = entries.iter().position(|e| e.model.trim().is_empty()) {
        return Err(WeatherBotError::config(format!(
            "Model config entry {index} has no model name"
        )));
    }
    Ok(entries)
}

/// Load a config list file and return its first entry
pub fn load_primary(path: &Path) -> Result<ModelEntry> {
    debug!("Loading model config from {}", path.display());
    let json = std::fs::read_to_string(path)?;

    let mut entries = parse_config_list(&json)?;
    Ok(entries.swap_remove(0))
}
