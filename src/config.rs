use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::chat::provider::{AIConfig, AIProvider};

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub data_dir: PathBuf,
    pub default_provider: String,
    pub providers: HashMap<String, ProviderConfig>,
    #[serde(default)]
    pub decay: DecayConfig,
    /// Fixes motivational messages and canned chat replies when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub default_model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecayConfig {
    pub tick_secs: u64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        DecayConfig { tick_secs: crate::decay::DEFAULT_TICK.as_secs() }
    }
}

impl DecayConfig {
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.tick_secs)
    }
}

impl Config {
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("studywell")
        });

        std::fs::create_dir_all(&data_dir)
            .context("Failed to create data directory")?;

        let config_path = data_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config_str = std::fs::read_to_string(&config_path)
                .context("Failed to read config.json")?;

            if config_str.trim().is_empty() {
                tracing::warn!(path = %config_path.display(), "Config file is empty, recreating defaults");
            } else {
                let mut config: Config = serde_json::from_str(&config_str)
                    .context("Failed to parse config.json")?;
                config.data_dir = data_dir;
                config.fill_api_key_from_env();
                return Ok(config);
            }
        }

        let config = Self::default_config(data_dir);
        config.save()?;
        tracing::info!(path = %config_path.display(), "Default config written");
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = self.config_path();
        let json_str = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(&config_path, json_str)
            .context("Failed to write config.json")?;
        Ok(())
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    fn fill_api_key_from_env(&mut self) {
        if let Some(openai_config) = self.providers.get_mut("openai") {
            if openai_config.api_key.as_ref().map_or(true, |key| key.is_empty()) {
                openai_config.api_key = std::env::var("OPENAI_API_KEY").ok();
            }
        }
    }

    fn default_config(data_dir: PathBuf) -> Self {
        let mut providers = HashMap::new();

        providers.insert("openai".to_string(), ProviderConfig {
            default_model: "gpt-3.5-turbo".to_string(),
            host: None,
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            system_prompt: None,
            max_tokens: Some(150),
        });

        providers.insert("ollama".to_string(), ProviderConfig {
            default_model: "qwen2.5".to_string(),
            host: Some("http://localhost:11434".to_string()),
            api_key: None,
            system_prompt: None,
            max_tokens: None,
        });

        Config {
            data_dir,
            default_provider: "openai".to_string(),
            providers,
            decay: DecayConfig::default(),
            rng_seed: None,
        }
    }

    pub fn get_provider(&self, provider_name: &str) -> Option<&ProviderConfig> {
        self.providers.get(provider_name)
    }

    pub fn get_ai_config(&self, provider: Option<String>, model: Option<String>) -> Result<AIConfig> {
        let provider_name = provider.as_deref().unwrap_or(&self.default_provider);
        let provider_config = self.get_provider(provider_name)
            .ok_or_else(|| anyhow::anyhow!("Unknown provider: {}", provider_name))?;

        let ai_provider: AIProvider = provider_name.parse()?;
        let model_name = model.unwrap_or_else(|| provider_config.default_model.clone());

        Ok(AIConfig {
            provider: ai_provider,
            model: model_name,
            api_key: provider_config.api_key.clone(),
            base_url: provider_config.host.clone(),
            max_tokens: provider_config.max_tokens.or(Some(150)),
            temperature: Some(0.7),
        })
    }

    pub fn system_prompt(&self, provider: Option<&str>) -> Option<String> {
        let provider_name = provider.unwrap_or(&self.default_provider);
        self.get_provider(provider_name)
            .and_then(|p| p.system_prompt.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_written() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert!(dir.path().join("config.json").exists());
        assert_eq!(config.default_provider, "openai");
        assert_eq!(config.decay.period(), Duration::from_secs(60));
        assert!(config.get_provider("ollama").is_some());
    }

    #[test]
    fn test_round_trip_keeps_changes() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        config.decay.tick_secs = 5;
        config.rng_seed = Some(42);
        config.save().unwrap();

        let reloaded = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(reloaded.decay.tick_secs, 5);
        assert_eq!(reloaded.rng_seed, Some(42));
        assert_eq!(reloaded.data_dir, dir.path());
    }

    #[test]
    fn test_missing_decay_section_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.json"),
            r#"{"default_provider":"ollama","providers":{"ollama":{"default_model":"llama3","host":"http://localhost:11434"}}}"#,
        )
        .unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.decay, DecayConfig::default());

        let ai = config.get_ai_config(None, None).unwrap();
        assert_eq!(ai.model, "llama3");
        assert_eq!(ai.base_url.as_deref(), Some("http://localhost:11434"));
    }

    #[test]
    fn test_unknown_provider() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert!(config.get_ai_config(Some("bard".to_string()), None).is_err());
    }

    #[test]
    fn test_model_override() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        let ai = config
            .get_ai_config(Some("openai".to_string()), Some("gpt-4o-mini".to_string()))
            .unwrap();
        assert_eq!(ai.model, "gpt-4o-mini");
        assert_eq!(ai.max_tokens, Some(150));
    }
}
