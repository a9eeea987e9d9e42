//! Example source trait
//!
//! Every external example/definition service is wrapped in an adapter
//! implementing [`ExampleSource`]. The adapter owns the provider's HTTP
//! plumbing and response shape; the retriever only ever sees raw sentence
//! strings.

use crate::providers::error::ProviderResult;
use crate::types::ProviderId;
use async_trait::async_trait;
use std::time::Duration;

/// Generic trait for example sentence sources
///
/// Implementations perform one term lookup and return the raw example
/// strings found, in provider order. "Nothing found" is `Ok(vec![])`,
/// not an error; only transport, auth and shape problems are errors.
#[async_trait]
pub trait ExampleSource: Send + Sync {
    /// Stable identity, used for cache keys, quota state and scoring
    fn id(&self) -> ProviderId;

    /// Per-call time budget. Free/community sources get a short budget;
    /// the paid source gets a longer one to match its SLA.
    fn timeout(&self) -> Duration {
        Duration::from_secs(3)
    }

    /// Monthly request ceiling, if the provider meters usage
    fn monthly_limit(&self) -> Option<u32> {
        None
    }

    /// Look up raw example sentences for a search term
    async fn lookup(&self, term: &str) -> ProviderResult<Vec<String>>;
}

/// Parse a `Retry-After` seconds hint from a throttled response
pub(crate) fn retry_after_secs(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
