//! Free Dictionary source (dictionaryapi.dev)
//!
//! Dictionary-derived examples pulled out of definition entries. No
//! credential required. The API answers 404 for any word it does not
//! know, which is a normal empty result here.

use crate::providers::error::{ProviderError, ProviderResult};
use crate::providers::source::{ExampleSource, retry_after_secs};
use crate::types::ProviderId;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Response shape of `GET /api/v2/entries/en/{word}`: a list of entries,
/// each with meanings, each with definitions that may carry an example.
#[derive(Debug, Deserialize)]
struct FreeDictionaryEntry {
    #[serde(default)]
    meanings: Vec<FreeDictionaryMeaning>,
}

#[derive(Debug, Deserialize)]
struct FreeDictionaryMeaning {
    #[serde(default)]
    definitions: Vec<FreeDictionaryDefinition>,
}

#[derive(Debug, Deserialize)]
struct FreeDictionaryDefinition {
    #[serde(default)]
    example: Option<String>,
}

/// Free Dictionary example source
#[derive(Debug, Clone)]
pub struct FreeDictionarySource {
    client: reqwest::Client,
    base_url: String,
}

impl FreeDictionarySource {
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
            base_url: "https://api.dictionaryapi.dev/api/v2/entries/en".to_string(),
        })
    }
}

#[async_trait]
impl ExampleSource for FreeDictionarySource {
    fn id(&self) -> ProviderId {
        ProviderId::FreeDictionary
    }

    fn timeout(&self) -> Duration {
        Self::TIMEOUT
    }

    async fn lookup(&self, term: &str) -> ProviderResult<Vec<String>> {
        let url = format!("{}/{}", self.base_url, term);

        let response = self
            .client
            .get(&url)
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

        let entries: Vec<FreeDictionaryEntry> = response.json().await.map_err(|e| {
            ProviderError::ParseError(format!("Invalid Free Dictionary response: {}", e))
        })?;

        Ok(entries
            .into_iter()
            .flat_map(|entry| entry.meanings)
            .flat_map(|meaning| meaning.definitions)
            .filter_map(|definition| definition.example)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction() {
        let source = FreeDictionarySource::new().unwrap();
        assert_eq!(source.id(), ProviderId::FreeDictionary);
        assert_eq!(source.monthly_limit(), None);
    }

    #[test]
    fn test_entry_shape_collects_examples() {
        let json = r#"[
            {
                "word": "cat",
                "meanings": [
                    {
                        "partOfSpeech": "noun",
                        "definitions": [
                            {"definition": "A small feline.", "example": "The cat napped all day."},
                            {"definition": "A type of whip."}
                        ]
                    }
                ]
            }
        ]"#;
        let entries: Vec<FreeDictionaryEntry> = serde_json::from_str(json).unwrap();
        let examples: Vec<String> = entries
            .into_iter()
            .flat_map(|entry| entry.meanings)
            .flat_map(|meaning| meaning.definitions)
            .filter_map(|definition| definition.example)
            .collect();
        assert_eq!(examples, vec!["The cat napped all day.".to_string()]);
    }
}
