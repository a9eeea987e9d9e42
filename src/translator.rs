//! Injected translation seam
//!
//! The pipeline produces English sentences and hands the chosen one to an
//! injected [`Translator`]. Real backends live in the embedding app; this
//! crate only defines the trait and ships a deterministic mock for tests
//! and the demo binary. A translator failure is the one error the pipeline
//! propagates to its caller.

use crate::error::{ExampleError, ExampleResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Generic trait for translation backends
///
/// The pipeline always translates from English, so implementations take
/// only the target locale.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate an English sentence into the target locale
    ///
    /// # Arguments
    ///
    /// * `text` - The English sentence to translate
    /// * `target_locale` - Target language code (e.g., "fr", "es-MX")
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The translated sentence
    /// * `Err(ExampleError)` - If translation fails
    async fn translate(&self, text: &str, target_locale: &str) -> ExampleResult<String>;

    /// Name of this backend, for logging and the demo output
    fn provider_name(&self) -> &str;
}

/// Normalize a locale code by stripping region/script information
///
/// - `es-MX` → `es`
/// - `zh-Hans` → `zh`
/// - `fr` → `fr` (unchanged)
pub fn normalize_locale(locale: &str) -> String {
    locale.split('-').next().unwrap_or(locale).to_lowercase()
}

/// Validate that a locale code is in acceptable format: non-empty,
/// alphanumeric plus hyphens and underscores
pub fn validate_locale(locale: &str) -> ExampleResult<()> {
    if locale.is_empty() {
        return Err(ExampleError::ConfigError(
            "Locale code is empty".to_string(),
        ));
    }
    if !locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ExampleError::ConfigError(format!(
            "Invalid characters in locale code: {}",
            locale
        )));
    }
    Ok(())
}

/// Mock translation behaviors for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append locale suffix: "Hello." → "Hello._fr"
    Suffix,
    /// Predefined (text, target_locale) → translation mappings,
    /// falling back to suffix behavior for unknown pairs
    Mappings(HashMap<(String, String), String>),
    /// Simulate a backend failure
    Error(String),
    /// Return the input unchanged
    NoOp,
}

/// Deterministic, network-free translator for tests and demos
#[derive(Debug, Clone)]
pub struct MockTranslator {
    mode: MockMode,
    delay_ms: u64,
}

impl MockTranslator {
    pub fn new(mode: MockMode) -> Self {
        Self { mode, delay_ms: 0 }
    }

    /// Mock with a simulated network delay per call
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self { mode, delay_ms }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str, target_locale: &str) -> ExampleResult<String> {
        validate_locale(target_locale)?;
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        let target = normalize_locale(target_locale);
        match &self.mode {
            MockMode::Suffix => Ok(format!("{}_{}", text, target)),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.clone());
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{}_{}", text, target)))
            }
            MockMode::Error(msg) => Err(ExampleError::TranslationError(msg.clone())),
            MockMode::NoOp => Ok(text.to_string()),
        }
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}
