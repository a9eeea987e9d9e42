//! WordsAPI source (RapidAPI)
//!
//! The paid, high-precision example source. Requires a RapidAPI key,
//! loaded from the `WORDS_API_KEY` environment variable. The free plan is
//! metered at 2,500 requests per month, so the retriever tracks a monthly
//! ceiling for this source and skips it once the ceiling is reached.

use crate::providers::error::{ProviderError, ProviderResult};
use crate::providers::source::{ExampleSource, retry_after_secs};
use crate::types::ProviderId;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const RAPIDAPI_HOST: &str = "wordsapiv1.p.rapidapi.com";

/// Response shape of `GET /words/{word}/examples`
#[derive(Debug, Deserialize)]
struct WordsApiExamples {
    #[serde(default)]
    examples: Vec<String>,
}

/// WordsAPI example source
#[derive(Clone)]
pub struct WordsApiSource {
    api_key: String,
    client: reqwest::Client,
    base_url: String,
}

impl WordsApiSource {
    /// Free-plan monthly request ceiling
    const MONTHLY_LIMIT: u32 = 2_500;

    /// Paid source, longer budget than the community sources
    const TIMEOUT: Duration = Duration::from_secs(6);

    /// Create a source with an explicit API key
    ///
    /// # Errors
    ///
    /// `ConfigError` if the key is empty, `NetworkError` if the HTTP client
    /// cannot be constructed.
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
            base_url: format!("https://{}", RAPIDAPI_HOST),
        })
    }

    /// Create a source from the `WORDS_API_KEY` environment variable
    pub fn from_env() -> ProviderResult<Self> {
        let api_key = std::env::var("WORDS_API_KEY").map_err(|_| {
            ProviderError::ConfigError("WORDS_API_KEY environment variable not set".to_string())
        })?;
        Self::new(api_key)
    }
}

impl std::fmt::Debug for WordsApiSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordsApiSource")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl ExampleSource for WordsApiSource {
    fn id(&self) -> ProviderId {
        ProviderId::WordsApi
    }

    fn timeout(&self) -> Duration {
        Self::TIMEOUT
    }

    fn monthly_limit(&self) -> Option<u32> {
        Some(Self::MONTHLY_LIMIT)
    }

    async fn lookup(&self, term: &str) -> ProviderResult<Vec<String>> {
        let url = format!("{}/words/{}/examples", self.base_url, term);

        let response = self
            .client
            .get(&url)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", RAPIDAPI_HOST)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 404 {
            // Unknown word: a normal empty result
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

        let payload: WordsApiExamples = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Invalid WordsAPI response: {}", e)))?;

        Ok(payload.examples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_valid_key() {
        let source = WordsApiSource::new("test-key".to_string());
        assert!(source.is_ok());
        assert_eq!(source.unwrap().id(), ProviderId::WordsApi);
    }

    #[test]
    fn test_new_with_empty_key() {
        match WordsApiSource::new("".to_string()) {
            Err(ProviderError::ConfigError(msg)) => assert!(msg.contains("empty")),
            other => panic!("Expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_new_with_whitespace_key() {
        assert!(WordsApiSource::new("   ".to_string()).is_err());
    }

    #[test]
    fn test_metered_with_long_timeout() {
        let source = WordsApiSource::new("test-key".to_string()).unwrap();
        assert_eq!(source.monthly_limit(), Some(2_500));
        assert!(source.timeout() > Duration::from_secs(3));
    }

    #[test]
    fn test_debug_masks_key() {
        let source = WordsApiSource::new("secret-key".to_string()).unwrap();
        let debug = format!("{:?}", source);
        assert!(debug.contains("***"));
        assert!(!debug.contains("secret-key"));
    }

    #[test]
    fn test_examples_shape_parses() {
        let json = r#"{"word":"cat","examples":["The cat sat.","A cat purred."]}"#;
        let payload: WordsApiExamples = serde_json::from_str(json).unwrap();
        assert_eq!(payload.examples.len(), 2);
    }

    #[test]
    fn test_examples_shape_tolerates_missing_field() {
        let payload: WordsApiExamples = serde_json::from_str(r#"{"word":"cat"}"#).unwrap();
        assert!(payload.examples.is_empty());
    }
}
