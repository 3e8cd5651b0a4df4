use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration for the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub inference: InferenceConfig,
    pub translation: TranslationConfig,
    pub summarization: SummarizationConfig,
    #[serde(default)]
    pub models: ModelPoolConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Static page served on `GET /`
    #[serde(default = "default_index_page")]
    pub index_page: String,
}

fn default_index_page() -> String {
    "templates/index.html".to_string()
}

/// Where models are resolved and run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Model hub used to resolve model ids
    pub hub_url: String,
    /// Hosted inference endpoint, models are reached at `{inference_url}/models/{id}`
    pub inference_url: String,
    #[serde(default)]
    pub api_token: Option<String>,
}

impl InferenceConfig {
    /// Token to send as bearer auth, ignoring blank values left by unset variables
    pub fn bearer_token(&self) -> Option<&str> {
        self.api_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Model id pattern with `{source}` and `{target}` placeholders
    pub model_template: String,
    #[serde(default = "default_target_language")]
    pub default_target_language: String,
}

fn default_target_language() -> String {
    "en".to_string()
}

impl TranslationConfig {
    /// Build the model id for an ordered language pair
    pub fn model_id(&self, source: &str, target: &str) -> String {
        self.model_template
            .replace("{source}", source)
            .replace("{target}", target)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizationConfig {
    pub model: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelPoolConfig {
    /// Keep resolved models between requests instead of loading per request
    #[serde(default)]
    pub cache_models: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "article_digest=debug,tower_http=debug".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid(
                "server.port must be between 1 and 65535".to_string(),
            ));
        }
        if !self.translation.model_template.contains("{source}")
            || !self.translation.model_template.contains("{target}")
        {
            return Err(ConfigError::Invalid(format!(
                "translation.model_template must contain {{source}} and {{target}}: {}",
                self.translation.model_template
            )));
        }
        if self.translation.default_target_language.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "translation.default_target_language is empty".to_string(),
            ));
        }
        if self.summarization.model.trim().is_empty() {
            return Err(ConfigError::Invalid("summarization.model is empty".to_string()));
        }
        for (name, url) in [
            ("inference.hub_url", &self.inference.hub_url),
            ("inference.inference_url", &self.inference.inference_url),
        ] {
            if url.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{} is empty", name)));
            }
        }
        Ok(())
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
