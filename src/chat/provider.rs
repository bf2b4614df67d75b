use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AIProvider {
    OpenAI,
    Ollama,
}

impl std::fmt::Display for AIProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AIProvider::OpenAI => write!(f, "openai"),
            AIProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for AIProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" | "gpt" => Ok(AIProvider::OpenAI),
            "ollama" => Ok(AIProvider::Ollama),
            _ => Err(anyhow!("Unknown AI provider: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AIConfig {
    pub provider: AIProvider,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            provider: AIProvider::OpenAI,
            model: "gpt-3.5-turbo".to_string(),
            api_key: None,
            base_url: None,
            max_tokens: Some(150),
            temperature: Some(0.7),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "system".to_string(),
            content: content.into(),
        }
    }
}

/// Anything that turns an ordered conversation into one completion.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

pub struct AIProviderClient {
    config: AIConfig,
    http_client: reqwest::Client,
}

impl AIProviderClient {
    pub fn new(config: AIConfig) -> Self {
        AIProviderClient {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn request_messages(messages: &[ChatMessage]) -> Vec<serde_json::Value> {
        messages
            .iter()
            .map(|msg| serde_json::json!({
                "role": msg.role,
                "content": msg.content
            }))
            .collect()
    }

    async fn chat_openai(&self, messages: &[ChatMessage]) -> Result<String> {
        let api_key = self.config.api_key.as_ref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| anyhow!("OpenAI API key required"))?;

        let base_url = self.config.base_url.as_deref()
            .unwrap_or("https://api.openai.com");

        let request_body = serde_json::json!({
            "model": self.config.model,
            "messages": Self::request_messages(messages),
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature
        });

        let response = self.http_client
            .post(format!("{}/v1/chat/completions", base_url.trim_end_matches('/')))
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow!("OpenAI API error ({}): {}", status, error_text));
        }

        let response_json: serde_json::Value = response.json().await?;

        if let Some(tokens) = response_json["usage"]["total_tokens"].as_u64() {
            tracing::debug!(tokens, model = %self.config.model, "OpenAI completion");
        }

        response_json["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow!("Invalid OpenAI response format"))
    }

    async fn chat_ollama(&self, messages: &[ChatMessage]) -> Result<String> {
        let base_url = self.config.base_url.as_deref()
            .unwrap_or("http://localhost:11434");

        let request_body = serde_json::json!({
            "model": self.config.model,
            "messages": Self::request_messages(messages),
            "stream": false
        });

        let url = format!("{}/api/chat", base_url.trim_end_matches('/'));
        let response = self.http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(anyhow!("Ollama API error: {}", error_text));
        }

        let response_json: serde_json::Value = response.json().await?;

        response_json["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow!("Invalid Ollama response format"))
    }
}

#[async_trait]
impl CompletionBackend for AIProviderClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        match self.config.provider {
            AIProvider::OpenAI => self.chat_openai(messages).await,
            AIProvider::Ollama => self.chat_ollama(messages).await,
        }
    }
}
