use crate::config::Settings;
use crate::errors::ProviderError;

use super::factory::ProviderType;

pub const GROQ_HOST: &str = "https://api.groq.com/openai";
pub const OPENAI_HOST: &str = "https://api.openai.com";
pub const ANTHROPIC_HOST: &str = "https://api.anthropic.com";

/// Unified enum over the per-backend configurations. Selecting the backend
/// happens exactly once, when this value is built.
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    Groq(GroqProviderConfig),
    OpenAi(OpenAiProviderConfig),
    Anthropic(AnthropicProviderConfig),
    Ollama(OllamaProviderConfig),
}

#[derive(Debug, Clone)]
pub struct GroqProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct OpenAiProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct AnthropicProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct OllamaProviderConfig {
    pub host: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
}

impl ProviderConfig {
    /// Build the configuration for the backend named in `settings`,
    /// validating eagerly: an unrecognized backend identifier or a missing
    /// credential fails here, before any request is made.
    pub fn from_settings(settings: &Settings) -> Result<Self, ProviderError> {
        let provider: ProviderType = settings.provider.parse().map_err(|_| {
            ProviderError::Configuration(format!("Unsupported provider: {}", settings.provider))
        })?;

        match provider {
            ProviderType::Groq => Ok(ProviderConfig::Groq(GroqProviderConfig {
                host: GROQ_HOST.to_string(),
                api_key: require_key(&settings.groq_api_key, "GROQ_API_KEY")?,
                model: settings.model.clone(),
                temperature: settings.temperature,
                max_tokens: settings.max_tokens,
            })),
            ProviderType::OpenAi => Ok(ProviderConfig::OpenAi(OpenAiProviderConfig {
                host: OPENAI_HOST.to_string(),
                api_key: require_key(&settings.openai_api_key, "OPENAI_API_KEY")?,
                model: settings.model.clone(),
                temperature: settings.temperature,
                max_tokens: settings.max_tokens,
            })),
            ProviderType::Anthropic => Ok(ProviderConfig::Anthropic(AnthropicProviderConfig {
                host: ANTHROPIC_HOST.to_string(),
                api_key: require_key(&settings.anthropic_api_key, "ANTHROPIC_API_KEY")?,
                model: settings.model.clone(),
                temperature: settings.temperature,
                max_tokens: settings.max_tokens,
            })),
            // Ollama is local, no credential needed
            ProviderType::Ollama => Ok(ProviderConfig::Ollama(OllamaProviderConfig {
                host: settings.ollama_host.clone(),
                model: settings.model.clone(),
                temperature: settings.temperature,
                max_tokens: settings.max_tokens,
            })),
        }
    }
}

fn require_key(value: &Option<String>, name: &str) -> Result<String, ProviderError> {
    value
        .clone()
        .ok_or_else(|| ProviderError::Configuration(format!("{} is not set", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider_rejected() {
        let settings = Settings {
            provider: "bedrock".to_string(),
            ..Settings::default()
        };

        let result = ProviderConfig::from_settings(&settings);
        assert!(matches!(result, Err(ProviderError::Configuration(_))));
    }

    #[test]
    fn test_missing_credential_rejected() {
        // Default provider is groq with no key set
        let result = ProviderConfig::from_settings(&Settings::default());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("GROQ_API_KEY"));
    }

    #[test]
    fn test_ollama_needs_no_credential() {
        let settings = Settings {
            provider: "ollama".to_string(),
            model: "qwen2.5".to_string(),
            ..Settings::default()
        };

        let config = ProviderConfig::from_settings(&settings).unwrap();
        match config {
            ProviderConfig::Ollama(config) => {
                assert_eq!(config.host, "http://localhost:11434");
                assert_eq!(config.model, "qwen2.5");
            }
            _ => panic!("Expected Ollama config"),
        }
    }

    #[test]
    fn test_groq_from_settings() {
        let settings = Settings {
            groq_api_key: Some("test_key".to_string()),
            ..Settings::default()
        };

        let config = ProviderConfig::from_settings(&settings).unwrap();
        match config {
            ProviderConfig::Groq(config) => {
                assert_eq!(config.host, GROQ_HOST);
                assert_eq!(config.api_key, "test_key");
            }
            _ => panic!("Expected Groq config"),
        }
    }
}
