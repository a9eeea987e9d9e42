//! Response cache and provider quota state
//!
//! Raw provider responses are cached under `"{provider}_{term}"` keys with a
//! 24 hour time-to-live. Expiry happens at read time: stale entries are
//! ignored, not evicted. The cache can be backed by a pluggable persistent
//! store so responses survive process restarts; corrupt stored data is
//! treated as a cache miss, never as a fatal error.
//!
//! Quota and rate-limit bookkeeping lives here too: the retriever consults
//! a [`QuotaRegistry`] before every network call and skips a provider whose
//! backoff window has not elapsed or whose monthly ceiling is exhausted.

use crate::types::ProviderId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Cache time-to-live: entries older than this are treated as absent
pub const CACHE_TTL_MS: u64 = 24 * 60 * 60 * 1000;

/// Default backoff window applied when a throttled provider gives no hint
pub const DEFAULT_BACKOFF_SECS: u64 = 60 * 60;

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Cache key for one provider/term lookup
pub fn cache_key(provider: ProviderId, term: &str) -> String {
    format!("{}_{}", provider.as_str(), term)
}

/// A stored value with its write timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub value: serde_json::Value,
    /// Write time, epoch milliseconds
    pub timestamp: u64,
}

/// Durable keyed storage for cache entries
///
/// Implementations hold one JSON-serializable document. Errors are plain
/// strings; callers log and carry on, a broken store never aborts a lookup.
pub trait CacheStore: Send + Sync {
    fn load(&self) -> Result<HashMap<String, CacheEntry>, String>;
    fn save(&self, entries: &HashMap<String, CacheEntry>) -> Result<(), String>;
}

/// File-backed store holding the whole cache as a single JSON document
///
/// Writes go through a temporary file in the same directory followed by an
/// atomic rename, so a crash mid-write cannot corrupt the previous contents.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CacheStore for FileStore {
    fn load(&self) -> Result<HashMap<String, CacheEntry>, String> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| format!("Failed to read cache file '{}': {}", self.path.display(), e))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse cache file '{}': {}", self.path.display(), e))
    }

    fn save(&self, entries: &HashMap<String, CacheEntry>) -> Result<(), String> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create cache directory: {}", e))?;
        let json = serde_json::to_string(entries)
            .map_err(|e| format!("Failed to serialize cache: {}", e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent)
            .map_err(|e| format!("Failed to create temp cache file: {}", e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| format!("Failed to write cache: {}", e))?;
        tmp.persist(&self.path)
            .map_err(|e| format!("Failed to persist cache file: {}", e))?;
        Ok(())
    }
}

/// Keyed TTL cache for raw provider responses
pub struct ResponseCache {
    entries: HashMap<String, CacheEntry>,
    store: Option<Box<dyn CacheStore>>,
    ttl_ms: u64,
}

impl ResponseCache {
    /// Process-local cache with no durable backing
    pub fn in_memory() -> Self {
        ResponseCache {
            entries: HashMap::new(),
            store: None,
            ttl_ms: CACHE_TTL_MS,
        }
    }

    /// Cache backed by a durable store; existing contents are loaded now.
    /// A corrupt store is logged and treated as empty.
    pub fn with_store(store: Box<dyn CacheStore>) -> Self {
        let entries = match store.load() {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "Cache store unreadable, starting empty");
                HashMap::new()
            }
        };
        ResponseCache {
            entries,
            store: Some(store),
            ttl_ms: CACHE_TTL_MS,
        }
    }

    /// Read a value, treating entries older than the TTL as absent
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get_at(key, now_ms())
    }

    /// Read with an explicit clock, for TTL tests
    pub fn get_at<T: DeserializeOwned>(&self, key: &str, now_ms: u64) -> Option<T> {
        let entry = self.entries.get(key)?;
        if now_ms.saturating_sub(entry.timestamp) > self.ttl_ms {
            debug!(key, "Cache entry expired");
            return None;
        }
        match serde_json::from_value(entry.value.clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Corrupt cache value, treating as miss");
                None
            }
        }
    }

    /// Store a value with the current timestamp
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) {
        self.set_at(key, value, now_ms());
    }

    /// Store with an explicit clock, for TTL tests
    pub fn set_at<T: Serialize>(&mut self, key: &str, value: &T, now_ms: u64) {
        let json = match serde_json::to_value(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(key, error = %e, "Unserializable cache value, skipping");
                return;
            }
        };
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value: json,
                timestamp: now_ms,
            },
        );
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.entries) {
                warn!(error = %e, "Failed to persist cache");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-provider request counters and backoff state
#[derive(Debug, Clone, Default)]
pub struct ProviderQuota {
    /// Attempted calls, incremented regardless of outcome
    pub requests: u32,
    /// Monthly ceiling; `None` means unmetered
    pub monthly_limit: Option<u32>,
    /// Epoch ms until which the provider is skipped entirely
    pub rate_limit_reset_ms: Option<u64>,
}

impl ProviderQuota {
    pub fn with_monthly_limit(limit: Option<u32>) -> Self {
        ProviderQuota {
            monthly_limit: limit,
            ..ProviderQuota::default()
        }
    }

    /// Whether a call may be attempted at `now_ms`
    pub fn is_available_at(&self, now_ms: u64) -> bool {
        if let Some(reset) = self.rate_limit_reset_ms {
            if now_ms < reset {
                return false;
            }
        }
        if let Some(limit) = self.monthly_limit {
            if self.requests >= limit {
                return false;
            }
        }
        true
    }

    pub fn record_attempt(&mut self) {
        self.requests = self.requests.saturating_add(1);
    }

    /// Enter backoff until the provider-supplied reset hint, or for the
    /// default window when no hint was given
    pub fn mark_rate_limited(&mut self, retry_after_secs: Option<u64>, now_ms: u64) {
        let backoff_secs = retry_after_secs.unwrap_or(DEFAULT_BACKOFF_SECS);
        self.rate_limit_reset_ms = Some(now_ms + backoff_secs * 1000);
    }
}

/// Quota state for every registered provider, shared across pipeline calls
#[derive(Debug, Default)]
pub struct QuotaRegistry {
    quotas: HashMap<ProviderId, ProviderQuota>,
}

impl QuotaRegistry {
    pub fn new() -> Self {
        QuotaRegistry::default()
    }

    pub fn register(&mut self, provider: ProviderId, monthly_limit: Option<u32>) {
        self.quotas
            .entry(provider)
            .or_insert_with(|| ProviderQuota::with_monthly_limit(monthly_limit));
    }

    pub fn is_available(&self, provider: ProviderId, now_ms: u64) -> bool {
        self.quotas
            .get(&provider)
            .map(|q| q.is_available_at(now_ms))
            .unwrap_or(true)
    }

    pub fn record_attempt(&mut self, provider: ProviderId) {
        self.quotas.entry(provider).or_default().record_attempt();
    }

    pub fn mark_rate_limited(
        &mut self,
        provider: ProviderId,
        retry_after_secs: Option<u64>,
        now_ms: u64,
    ) {
        self.quotas
            .entry(provider)
            .or_default()
            .mark_rate_limited(retry_after_secs, now_ms);
    }

    pub fn requests(&self, provider: ProviderId) -> u32 {
        self.quotas.get(&provider).map(|q| q.requests).unwrap_or(0)
    }

    /// Clear attempt counters on an external calendar rollover. Backoff
    /// windows are left untouched.
    pub fn reset_monthly(&mut self) {
        for quota in self.quotas.values_mut() {
            quota.requests = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== TTL Tests ==========

    #[test]
    fn test_fresh_entry_returned() {
        let mut cache = ResponseCache::in_memory();
        let now = 1_000_000_000_000u64;
        cache.set_at("wordsapi_cat", &vec!["The cat sat.".to_string()], now);
        let got: Option<Vec<String>> = cache.get_at("wordsapi_cat", now + 1_000);
        assert_eq!(got, Some(vec!["The cat sat.".to_string()]));
    }

    #[test]
    fn test_entry_older_than_ttl_absent() {
        let mut cache = ResponseCache::in_memory();
        let now = 1_000_000_000_000u64;
        cache.set_at("wordsapi_cat", &vec!["The cat sat.".to_string()], now);
        let later = now + CACHE_TTL_MS + 1;
        let got: Option<Vec<String>> = cache.get_at("wordsapi_cat", later);
        assert_eq!(got, None);
        // expired entries are ignored, not evicted
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_entry_exactly_at_ttl_still_present() {
        let mut cache = ResponseCache::in_memory();
        let now = 500_000u64;
        cache.set_at("k", &1u32, now);
        assert_eq!(cache.get_at::<u32>("k", now + CACHE_TTL_MS), Some(1));
    }

    #[test]
    fn test_missing_key_absent() {
        let cache = ResponseCache::in_memory();
        assert_eq!(cache.get_at::<u32>("nothing", 0), None);
    }

    #[test]
    fn test_wrong_shape_is_miss() {
        let mut cache = ResponseCache::in_memory();
        cache.set_at("k", &"not a number", 0);
        assert_eq!(cache.get_at::<u32>("k", 1), None);
    }

    #[test]
    fn test_last_writer_wins() {
        let mut cache = ResponseCache::in_memory();
        cache.set_at("k", &1u32, 0);
        cache.set_at("k", &2u32, 10);
        assert_eq!(cache.get_at::<u32>("k", 20), Some(2));
    }

    #[test]
    fn test_cache_key_format() {
        assert_eq!(cache_key(ProviderId::WordsApi, "cat"), "wordsapi_cat");
        assert_eq!(cache_key(ProviderId::Tatoeba, "dog"), "tatoeba_dog");
    }

    // ========== File Store Tests ==========

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        let store = FileStore::new(&path);

        let mut cache = ResponseCache::with_store(Box::new(FileStore::new(&path)));
        cache.set_at("tatoeba_dog", &vec!["Dogs bark.".to_string()], 42);

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded["tatoeba_dog"].timestamp, 42);

        let cache2 = ResponseCache::with_store(Box::new(FileStore::new(&path)));
        let got: Option<Vec<String>> = cache2.get_at("tatoeba_dog", 50);
        assert_eq!(got, Some(vec!["Dogs bark.".to_string()]));
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "{not json").unwrap();
        let cache = ResponseCache::with_store(Box::new(FileStore::new(&path)));
        assert!(cache.is_empty());
    }

    // ========== Quota Tests ==========

    #[test]
    fn test_quota_available_by_default() {
        let quota = ProviderQuota::default();
        assert!(quota.is_available_at(0));
    }

    #[test]
    fn test_monthly_ceiling_blocks() {
        let mut quota = ProviderQuota::with_monthly_limit(Some(2));
        assert!(quota.is_available_at(0));
        quota.record_attempt();
        quota.record_attempt();
        assert!(!quota.is_available_at(0));
    }

    #[test]
    fn test_rate_limit_window() {
        let now = 1_000_000u64;
        let mut quota = ProviderQuota::default();
        quota.mark_rate_limited(Some(60), now);
        assert!(!quota.is_available_at(now));
        assert!(!quota.is_available_at(now + 59_999));
        assert!(quota.is_available_at(now + 60_000));
    }

    #[test]
    fn test_rate_limit_default_backoff() {
        let now = 0u64;
        let mut quota = ProviderQuota::default();
        quota.mark_rate_limited(None, now);
        assert!(!quota.is_available_at(DEFAULT_BACKOFF_SECS * 1000 - 1));
        assert!(quota.is_available_at(DEFAULT_BACKOFF_SECS * 1000));
    }

    #[test]
    fn test_registry_counts_attempts() {
        let mut registry = QuotaRegistry::new();
        registry.register(ProviderId::WordsApi, Some(2500));
        registry.record_attempt(ProviderId::WordsApi);
        registry.record_attempt(ProviderId::WordsApi);
        assert_eq!(registry.requests(ProviderId::WordsApi), 2);
        assert_eq!(registry.requests(ProviderId::Tatoeba), 0);
    }

    #[test]
    fn test_registry_monthly_reset() {
        let mut registry = QuotaRegistry::new();
        registry.register(ProviderId::WordsApi, Some(1));
        registry.record_attempt(ProviderId::WordsApi);
        assert!(!registry.is_available(ProviderId::WordsApi, 0));
        registry.reset_monthly();
        assert!(registry.is_available(ProviderId::WordsApi, 0));
    }
}
