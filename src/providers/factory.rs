use std::sync::Arc;

use strum_macros::{Display, EnumIter, EnumString};

use crate::errors::ProviderError;

use super::{
    anthropic::AnthropicProvider, base::Provider, configs::ProviderConfig, groq::GroqProvider,
    ollama::OllamaProvider, openai::OpenAiProvider,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderType {
    Groq,
    OpenAi,
    Anthropic,
    Ollama,
}

/// Instantiate the backend selected by `config`. The provider is returned
/// behind an `Arc` so multiple agents can share one stateless gateway.
pub fn get_provider(config: ProviderConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    match config {
        ProviderConfig::Groq(groq_config) => Ok(Arc::new(GroqProvider::new(groq_config)?)),
        ProviderConfig::OpenAi(openai_config) => Ok(Arc::new(OpenAiProvider::new(openai_config)?)),
        ProviderConfig::Anthropic(anthropic_config) => {
            Ok(Arc::new(AnthropicProvider::new(anthropic_config)?))
        }
        ProviderConfig::Ollama(ollama_config) => Ok(Arc::new(OllamaProvider::new(ollama_config)?)),
    }
}
