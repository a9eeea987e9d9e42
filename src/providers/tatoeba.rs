//! Tatoeba source
//!
//! Community-contributed sentence corpus. No credential required; the
//! public search endpoint is queried for approved English sentences
//! containing the term.

use crate::providers::error::{ProviderError, ProviderResult};
use crate::providers::source::{ExampleSource, retry_after_secs};
use crate::types::ProviderId;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Response shape of the Tatoeba search endpoint
#[derive(Debug, Deserialize)]
struct TatoebaSearch {
    #[serde(default)]
    results: Vec<TatoebaSentence>,
}

#[derive(Debug, Deserialize)]
struct TatoebaSentence {
    text: String,
}

/// Tatoeba example source
#[derive(Debug, Clone)]
pub struct TatoebaSource {
    client: reqwest::Client,
    base_url: String,
}

impl TatoebaSource {
    const TIMEOUT: Duration = Duration::from_secs(3);

    pub fn new() -> ProviderResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Self::TIMEOUT)
            .build()
            .map_err(|e| {
                ProviderError::NetworkError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: "https://tatoeba.org/en/api_v0/search".to_string(),
        })
    }
}

#[async_trait]
impl ExampleSource for TatoebaSource {
    fn id(&self) -> ProviderId {
        ProviderId::Tatoeba
    }

    fn timeout(&self) -> Duration {
        Self::TIMEOUT
    }

    async fn lookup(&self, term: &str) -> ProviderResult<Vec<String>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("from", "eng"),
                ("to", "eng"),
                ("query", term),
                ("orphans", "no"),
                ("unapproved", "no"),
                ("sort", "relevance"),
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

        let payload: TatoebaSearch = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Invalid Tatoeba response: {}", e)))?;

        Ok(payload.results.into_iter().map(|s| s.text).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction() {
        let source = TatoebaSource::new().unwrap();
        assert_eq!(source.id(), ProviderId::Tatoeba);
        assert_eq!(source.monthly_limit(), None);
        assert_eq!(source.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_search_shape_parses() {
        let json = r#"{"paging":{},"results":[{"id":1,"text":"The cat sleeps."},{"id":2,"text":"Cats are independent."}]}"#;
        let payload: TatoebaSearch = serde_json::from_str(json).unwrap();
        assert_eq!(payload.results.len(), 2);
        assert_eq!(payload.results[0].text, "The cat sleeps.");
    }

    #[test]
    fn test_search_shape_tolerates_missing_results() {
        let payload: TatoebaSearch = serde_json::from_str(r#"{"paging":{}}"#).unwrap();
        assert!(payload.results.is_empty());
    }
}
