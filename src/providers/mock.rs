//! Mock example source for testing
//!
//! A deterministic, network-free source for exercising the retriever and
//! the full pipeline. Modes cover the interesting provider behaviors:
//! fixed sentences, per-term lookup tables, empty results, transport
//! failures and throttling.

use crate::providers::error::{ProviderError, ProviderResult};
use crate::providers::source::ExampleSource;
use crate::types::ProviderId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Behaviors the mock source can simulate
#[derive(Debug, Clone)]
pub enum MockSourceMode {
    /// Return the same sentences for every term
    Sentences(Vec<String>),
    /// Return sentences per search term; unknown terms yield empty results
    PerTerm(HashMap<String, Vec<String>>),
    /// Always return no results
    Empty,
    /// Always fail with a transport error
    Error(String),
    /// Always report throttling with the given reset hint
    RateLimited(Option<u64>),
}

/// Mock example source
#[derive(Debug, Clone)]
pub struct MockSource {
    mode: MockSourceMode,
    id: ProviderId,
    delay: Duration,
    timeout: Duration,
}

impl MockSource {
    pub fn new(mode: MockSourceMode) -> Self {
        MockSource {
            mode,
            id: ProviderId::Mock,
            delay: Duration::ZERO,
            timeout: Duration::from_secs(1),
        }
    }

    /// Report a different provider identity, to simulate a specific source
    pub fn with_id(mut self, id: ProviderId) -> Self {
        self.id = id;
        self
    }

    /// Sleep before answering, to exercise timeout handling
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Override the advertised per-call budget
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ExampleSource for MockSource {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn lookup(&self, term: &str) -> ProviderResult<Vec<String>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.mode {
            MockSourceMode::Sentences(sentences) => Ok(sentences.clone()),
            MockSourceMode::PerTerm(map) => Ok(map.get(term).cloned().unwrap_or_default()),
            MockSourceMode::Empty => Ok(Vec::new()),
            MockSourceMode::Error(msg) => Err(ProviderError::NetworkError(msg.clone())),
            MockSourceMode::RateLimited(retry_after_secs) => Err(ProviderError::RateLimited {
                retry_after_secs: *retry_after_secs,
            }),
        }
    }
}
