use std::env;

use reqwest::Client;
use tracing::warn;

use crate::core::config::Config;

/// Environment variables consulted for the bearer credential, in order.
pub const API_KEY_ENV_VARS: &[&str] = &["GENYX_API_KEY", "HF_TOKEN"];

/// Everything needed to address the chat-completion endpoint. Fixed for the
/// lifetime of an `App`.
#[derive(Debug, Clone)]
pub struct EndpointSettings {
    pub client: Client,
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub system_prompt: String,
}

/// Per-run overrides coming from the command line.
#[derive(Debug, Clone, Default)]
pub struct EndpointOverrides {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
}

impl EndpointSettings {
    pub fn resolve(config: &Config, overrides: EndpointOverrides) -> Self {
        let api_key = overrides
            .api_key
            .or_else(api_key_from_env)
            .unwrap_or_else(|| {
                warn!(
                    vars = ?API_KEY_ENV_VARS,
                    "no API credential configured; requests will be rejected upstream"
                );
                String::new()
            });

        Self {
            client: Client::new(),
            base_url: overrides
                .base_url
                .unwrap_or_else(|| config.effective_base_url().to_string()),
            api_key,
            model: overrides
                .model
                .unwrap_or_else(|| config.effective_model().to_string()),
            max_tokens: config.effective_max_tokens(),
            temperature: config.effective_temperature(),
            system_prompt: config.effective_system_prompt().to_string(),
        }
    }
}

fn api_key_from_env() -> Option<String> {
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}
