use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::Settings;
use crate::errors::{AgentError, AgentResult};

use super::{required_str, ToolHandler};

const SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0";

/// Searches the web through DuckDuckGo's HTML endpoint and scrapes the
/// result list. No API key required.
pub struct WebSearch {
    client: Client,
    max_results: usize,
}

impl WebSearch {
    pub fn new(settings: &Settings) -> AgentResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AgentError::Internal(format!("could not build http client: {}", e)))?;

        Ok(Self {
            client,
            max_results: settings.web_search_max_results,
        })
    }

    fn parse_results(html: &str, max_results: usize) -> Vec<Value> {
        let document = Html::parse_document(html);
        let result_selector = Selector::parse("div.result").unwrap();
        let title_selector = Selector::parse("a.result__a").unwrap();
        let snippet_selector = Selector::parse(".result__snippet").unwrap();

        let mut results = Vec::new();
        for element in document.select(&result_selector).take(max_results) {
            let Some(link) = element.select(&title_selector).next() else {
                continue;
            };
            let title = link.text().collect::<String>().trim().to_string();
            let url = link.value().attr("href").unwrap_or_default().to_string();
            let snippet = element
                .select(&snippet_selector)
                .next()
                .map(|s| s.text().collect::<String>().trim().to_string())
                .unwrap_or_default();

            results.push(json!({
                "title": title,
                "snippet": snippet,
                "url": url,
            }));
        }

        results
    }
}

#[async_trait]
impl ToolHandler for WebSearch {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web and return a list of result titles, snippets and URLs"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum number of results to return"
                }
            },
            "required": ["query"]
        })
    }

    async fn call(&self, params: Value) -> AgentResult<Value> {
        let query = required_str(&params, "query")?;
        let max_results = params
            .get("max_results")
            .and_then(|v| v.as_u64())
            .map(|v| v as usize)
            .unwrap_or(self.max_results);

        let url = format!("{}?q={}", SEARCH_ENDPOINT, urlencoding::encode(query));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AgentError::ExecutionError(format!("search request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AgentError::ExecutionError(format!(
                "search request failed with status {}",
                response.status()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| AgentError::ExecutionError(format!("could not read search page: {}", e)))?;

        Ok(Value::Array(Self::parse_results(&html, max_results)))
    }
}
