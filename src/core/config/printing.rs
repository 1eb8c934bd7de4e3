use crate::core::config::data::Config;
use crate::core::config::keys::ConfigKey;

impl Config {
    /// One `key: value` line per setting, marking values that come from defaults.
    pub fn describe(&self) -> Vec<String> {
        ConfigKey::ALL
            .into_iter()
            .map(|key| {
                let (value, explicit) = match key {
                    ConfigKey::BaseUrl => {
                        (self.effective_base_url().to_string(), self.base_url.is_some())
                    }
                    ConfigKey::Model => (self.effective_model().to_string(), self.model.is_some()),
                    ConfigKey::MaxTokens => (
                        self.effective_max_tokens().to_string(),
                        self.max_tokens.is_some(),
                    ),
                    ConfigKey::Temperature => (
                        self.effective_temperature().to_string(),
                        self.temperature.is_some(),
                    ),
                    ConfigKey::SystemPrompt => (
                        self.effective_system_prompt().to_string(),
                        self.system_prompt.is_some(),
                    ),
                };
                if explicit {
                    format!("{}: {}", key.as_str(), value)
                } else {
                    format!("{}: {} (default)", key.as_str(), value)
                }
            })
            .collect()
    }

    pub fn print_all(&self) {
        println!("Current configuration:");
        for line in self.describe() {
            println!("  {line}");
        }
    }
}
