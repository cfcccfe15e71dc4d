//! Application settings loaded from config.toml and the environment.
//!
//! Non-secret settings (assistant model, API base, currency labels) live in
//! `config.toml`. Secrets come from the environment, usually via `.env`.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable holding the Gemini API key
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Legacy name accepted when [`API_KEY_VAR`] is not set
pub const LEGACY_API_KEY_VAR: &str = "API_KEY";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Remote assistant settings
    pub assistant: AssistantSettings,
    /// Display settings for the inventory
    pub inventory: InventorySettings,
}

/// Settings for the remote text-generation service
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssistantSettings {
    /// Model identifier passed to `generateContent`
    pub model: String,
    /// Base URL of the REST API, without a trailing slash
    pub api_base: String,
    /// Optional request timeout; requests are unbounded when absent
    pub timeout_secs: Option<u64>,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: None,
        }
    }
}

/// Currency labels used when displaying prices
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InventorySettings {
    /// ISO-style code, used where the symbol cannot be rendered (PDF built-in fonts)
    pub currency_code: String,
    /// Symbol shown in chat replies
    pub currency_symbol: String,
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            currency_code: "BDT".to_string(),
            currency_symbol: "৳".to_string(),
        }
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from `./config.toml`, falling back to defaults when the file
/// does not exist.
pub fn load_default_settings() -> Result<Settings> {
    let path = Path::new("config.toml");
    if !path.exists() {
        tracing::info!("No config.toml found, using default settings");
        return Ok(Settings::default());
    }
    load_settings(path)
}

/// Reads the assistant API key from the environment.
///
/// Returns `None` when neither variable is set or the value is blank; the
/// assistant then answers with placeholders instead of calling the service.
#[must_use]
pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_VAR)
        .or_else(|_| std::env::var(LEGACY_API_KEY_VAR))
        .ok()
        .filter(|key| !key.trim().is_empty())
}
