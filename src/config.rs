use std::env;

/// Process-wide configuration, loaded once at startup and passed by
/// reference into provider configs and tool constructors. Nothing in the
/// core reads the environment after this value is built.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Backend identifier: groq, openai, anthropic or ollama
    pub provider: String,
    /// Model identifier, interpreted by the selected backend
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,

    pub groq_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub ollama_host: String,

    /// Ceiling in seconds for one code_execute invocation
    pub code_execute_timeout: u64,
    /// Result cap for one web_search invocation
    pub web_search_max_results: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: "groq".to_string(),
            model: "llama-3.1-70b-versatile".to_string(),
            temperature: Some(0.7),
            max_tokens: Some(4000),
            groq_api_key: None,
            openai_api_key: None,
            anthropic_api_key: None,
            ollama_host: "http://localhost:11434".to_string(),
            code_execute_timeout: 30,
            web_search_max_results: 5,
        }
    }
}

impl Settings {
    /// Load settings from a `.env` file (if present) and the process
    /// environment. Unset variables keep their defaults; malformed numeric
    /// values are treated as unset.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let defaults = Settings::default();
        Settings {
            provider: get_var("LLM_PROVIDER").unwrap_or(defaults.provider),
            model: get_var("LLM_MODEL").unwrap_or(defaults.model),
            temperature: get_var("LLM_TEMPERATURE")
                .and_then(|v| v.parse().ok())
                .or(defaults.temperature),
            max_tokens: get_var("LLM_MAX_TOKENS")
                .and_then(|v| v.parse().ok())
                .or(defaults.max_tokens),
            groq_api_key: get_var("GROQ_API_KEY"),
            openai_api_key: get_var("OPENAI_API_KEY"),
            anthropic_api_key: get_var("ANTHROPIC_API_KEY"),
            ollama_host: get_var("OLLAMA_HOST").unwrap_or(defaults.ollama_host),
            code_execute_timeout: get_var("CODE_EXECUTE_TIMEOUT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.code_execute_timeout),
            web_search_max_results: get_var("WEB_SEARCH_MAX_RESULTS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.web_search_max_results),
        }
    }
}

fn get_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
