//! Multi-source example retrieval
//!
//! Fans out one lookup per (search term x source) pair, all concurrently,
//! and merges the answers into a deduplicated candidate list. Failures are
//! isolated per source: a slow, throttled or broken provider contributes
//! nothing and delays nothing else. The retriever consults the response
//! cache before the network and the quota registry before every call.

use crate::cache::{QuotaRegistry, ResponseCache, cache_key, now_ms};
use crate::normalize::clean_sentence;
use crate::providers::{ExampleSource, ProviderError};
use crate::types::{CandidateExample, ProviderId};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Raw results cached per provider/term lookup
const MAX_CACHED_RESULTS: usize = 10;

/// Leading tokens of technical compound detections whose remainder carries
/// the core concept ("cell phone" -> "phone")
const TECHNICAL_PREFIXES: &[&str] = &["cell", "sports", "wine", "hair", "traffic", "tennis"];

/// Derive the search terms for a word: the word itself, the remainder after
/// a known technical prefix, and the final token of a multi-token word.
pub fn search_terms(word: &str) -> Vec<String> {
    let w = word.trim().to_lowercase();
    let mut terms: Vec<String> = Vec::new();
    if w.is_empty() {
        return terms;
    }
    terms.push(w.clone());

    let tokens: Vec<&str> = w.split_whitespace().collect();
    if tokens.len() > 1 {
        if TECHNICAL_PREFIXES.contains(&tokens[0]) {
            push_unique(&mut terms, tokens[1..].join(" "));
        }
        let last = tokens[tokens.len() - 1];
        if last.len() > 2 {
            push_unique(&mut terms, last.to_string());
        }
    }
    terms
}

fn push_unique(terms: &mut Vec<String>, term: String) {
    if !terms.contains(&term) {
        terms.push(term);
    }
}

/// Drop duplicate candidates by case-insensitive trimmed text, keeping the
/// first occurrence. Idempotent.
pub fn dedup_candidates(candidates: Vec<CandidateExample>) -> Vec<CandidateExample> {
    let mut seen = std::collections::HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.text.trim().to_lowercase()))
        .collect()
}

/// Concurrent multi-source example retriever
pub struct ExampleRetriever {
    sources: Vec<Arc<dyn ExampleSource>>,
    cache: Mutex<ResponseCache>,
    quotas: Mutex<QuotaRegistry>,
}

impl ExampleRetriever {
    /// Retriever with a process-local cache
    pub fn new(sources: Vec<Arc<dyn ExampleSource>>) -> Self {
        Self::with_cache(sources, ResponseCache::in_memory())
    }

    /// Retriever over an existing (possibly durable) cache
    pub fn with_cache(sources: Vec<Arc<dyn ExampleSource>>, cache: ResponseCache) -> Self {
        let mut quotas = QuotaRegistry::new();
        for source in &sources {
            quotas.register(source.id(), source.monthly_limit());
        }
        ExampleRetriever {
            sources,
            cache: Mutex::new(cache),
            quotas: Mutex::new(quotas),
        }
    }

    /// Fetch, normalize, merge and deduplicate candidates for a word.
    /// Never fails: provider-level problems produce fewer candidates,
    /// not errors.
    pub async fn retrieve(&self, word: &str) -> Vec<CandidateExample> {
        let word = word.trim().to_lowercase();
        let terms = search_terms(&word);
        if terms.is_empty() {
            return Vec::new();
        }

        let mut lookups = Vec::new();
        for source in &self.sources {
            for term in &terms {
                lookups.push(self.lookup_one(Arc::clone(source), term.clone(), word.clone()));
            }
        }

        // join_all preserves input order, so the merged set is stable
        // regardless of which provider answers first
        let results = join_all(lookups).await;
        dedup_candidates(results.into_iter().flatten().collect())
    }

    async fn lookup_one(
        &self,
        source: Arc<dyn ExampleSource>,
        term: String,
        word: String,
    ) -> Vec<CandidateExample> {
        let provider = source.id();
        let key = cache_key(provider, &term);

        if let Some(raw) = self.cache.lock().await.get::<Vec<String>>(&key) {
            debug!(provider = %provider, term = %term, "Cache hit");
            return to_candidates(raw, provider, &term, &word);
        }

        {
            let mut quotas = self.quotas.lock().await;
            if !quotas.is_available(provider, now_ms()) {
                debug!(provider = %provider, "Provider throttled or out of quota, skipping");
                return Vec::new();
            }
            // Attempts count whether or not the call succeeds
            quotas.record_attempt(provider);
        }

        match tokio::time::timeout(source.timeout(), source.lookup(&term)).await {
            Ok(Ok(mut raw)) => {
                raw.truncate(MAX_CACHED_RESULTS);
                self.cache.lock().await.set(&key, &raw);
                to_candidates(raw, provider, &term, &word)
            }
            Ok(Err(ProviderError::RateLimited { retry_after_secs })) => {
                warn!(provider = %provider, retry_after_secs, "Provider rate limited");
                self.quotas
                    .lock()
                    .await
                    .mark_rate_limited(provider, retry_after_secs, now_ms());
                Vec::new()
            }
            Ok(Err(e)) => {
                warn!(provider = %provider, term = %term, error = %e, "Lookup failed");
                Vec::new()
            }
            Err(_elapsed) => {
                warn!(provider = %provider, term = %term, "Lookup timed out, abandoning call");
                Vec::new()
            }
        }
    }
}

fn to_candidates(
    raw: Vec<String>,
    provider: ProviderId,
    term: &str,
    word: &str,
) -> Vec<CandidateExample> {
    raw.iter()
        .filter_map(|sentence| clean_sentence(sentence))
        .map(|text| {
            let candidate = CandidateExample::new(text, provider);
            if term != word {
                candidate.with_search_term(term)
            } else {
                candidate
            }
        })
        .collect()
}
