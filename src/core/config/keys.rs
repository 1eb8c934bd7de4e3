use crate::core::config::data::Config;

/// Keys accepted by `genyx set` / `genyx unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    BaseUrl,
    Model,
    MaxTokens,
    Temperature,
    SystemPrompt,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 5] = [
        ConfigKey::BaseUrl,
        ConfigKey::Model,
        ConfigKey::MaxTokens,
        ConfigKey::Temperature,
        ConfigKey::SystemPrompt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::BaseUrl => "base-url",
            ConfigKey::Model => "model",
            ConfigKey::MaxTokens => "max-tokens",
            ConfigKey::Temperature => "temperature",
            ConfigKey::SystemPrompt => "system-prompt",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(&name))
    }
}

impl Config {
    pub fn set_key(&mut self, key: ConfigKey, value: &str) -> Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("A value is required for {}", key.as_str()));
        }

        match key {
            ConfigKey::BaseUrl => self.base_url = Some(value.to_string()),
            ConfigKey::Model => self.model = Some(value.to_string()),
            ConfigKey::SystemPrompt => self.system_prompt = Some(value.to_string()),
            ConfigKey::MaxTokens => {
                let parsed = value
                    .parse::<u32>()
                    .ok()
                    .filter(|tokens| *tokens > 0)
                    .ok_or_else(|| format!("max-tokens must be a positive integer, got '{value}'"))?;
                self.max_tokens = Some(parsed);
            }
            ConfigKey::Temperature => {
                let parsed = value
                    .parse::<f32>()
                    .ok()
                    .filter(|t| t.is_finite() && (0.0..=2.0).contains(t))
                    .ok_or_else(|| {
                        format!("temperature must be a number between 0 and 2, got '{value}'")
                    })?;
                self.temperature = Some(parsed);
            }
        }
        Ok(())
    }

    pub fn unset_key(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::BaseUrl => self.base_url = None,
            ConfigKey::Model => self.model = None,
            ConfigKey::MaxTokens => self.max_tokens = None,
            ConfigKey::Temperature => self.temperature = None,
            ConfigKey::SystemPrompt => self.system_prompt = None,
        }
    }
}
