//! Wordnik source
//!
//! Dictionary/corpus examples from the Wordnik v4 API. Requires an API
//! key, loaded from the `WORDNIK_API_KEY` environment variable.

use crate::providers::error::{ProviderError, ProviderResult};
use crate::providers::source::{ExampleSource, retry_after_secs};
use crate::types::ProviderId;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Response shape of `GET /word.json/{word}/examples`
#[derive(Debug, Deserialize)]
struct WordnikExamples {
    #[serde(default)]
    examples: Vec<WordnikExample>,
}

#[derive(Debug, Deserialize)]
struct WordnikExample {
    text: String,
}

/// Wordnik example source
#[derive(Clone)]
pub struct WordnikSource {
    api_key: String,
    client: reqwest::Client,
    base_url: String,
}

impl WordnikSource {
    const TIMEOUT: Duration = Duration::from_secs(3);

    /// Examples requested per lookup
    const LIMIT: u32 = 10;

    pub fn new(api_key: String) -> ProviderResult<Self> {
        if api_key.trim().is_empty() {
            return Err(ProviderError::ConfigError(
                "API key cannot be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Self::TIMEOUT)
            .build()
            .map_err(|e| {
                ProviderError::NetworkError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            api_key,
            client,
            base_url: "https://api.wordnik.com/v4".to_string(),
        })
    }

    /// Create a source from the `WORDNIK_API_KEY` environment variable
    pub fn from_env() -> ProviderResult<Self> {
        let api_key = std::env::var("WORDNIK_API_KEY").map_err(|_| {
            ProviderError::ConfigError("WORDNIK_API_KEY environment variable not set".to_string())
        })?;
        Self::new(api_key)
    }
}

impl std::fmt::Debug for WordnikSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordnikSource")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl ExampleSource for WordnikSource {
    fn id(&self) -> ProviderId {
        ProviderId::Wordnik
    }

    fn timeout(&self) -> Duration {
        Self::TIMEOUT
    }

    async fn lookup(&self, term: &str) -> ProviderResult<Vec<String>> {
        let url = format!("{}/word.json/{}/examples", self.base_url, term);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("limit", Self::LIMIT.to_string()),
                ("api_key", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Ok(Vec::new());
        }
        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimited {
                retry_after_secs: retry_after_secs(&response),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError(status.as_u16(), body));
        }

        let payload: WordnikExamples = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Invalid Wordnik response: {}", e)))?;

        Ok(payload.examples.into_iter().map(|e| e.text).collect())
    }
}
