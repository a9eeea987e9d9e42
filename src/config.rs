//! Environment-driven pipeline configuration
//!
//! Credentialed sources are enabled only when their key is present and
//! non-empty; the free sources are always attempted. A cache path turns on
//! durable response caching.

use crate::cache::{FileStore, ResponseCache};
use crate::pipeline::ExamplePipeline;
use crate::providers::{
    ExampleSource, FreeDictionarySource, TatoebaSource, WordnikSource, WordsApiSource,
};
use crate::retriever::ExampleRetriever;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// RapidAPI key for WordsAPI; the paid source is skipped without it
    pub words_api_key: Option<String>,
    /// Wordnik API key; the Wordnik source is skipped without it
    pub wordnik_api_key: Option<String>,
    /// Durable cache location; in-memory cache when absent
    pub cache_path: Option<PathBuf>,
}

impl PipelineConfig {
    /// Read configuration from `WORDS_API_KEY`, `WORDNIK_API_KEY` and
    /// `SNAPVOCAB_CACHE_PATH`
    pub fn from_env() -> Self {
        PipelineConfig {
            words_api_key: non_empty_var("WORDS_API_KEY"),
            wordnik_api_key: non_empty_var("WORDNIK_API_KEY"),
            cache_path: non_empty_var("SNAPVOCAB_CACHE_PATH").map(PathBuf::from),
        }
    }

    /// Build the enabled example sources. A source that fails to construct
    /// is skipped with a warning; the pipeline works with whatever remains.
    pub fn build_sources(&self) -> Vec<Arc<dyn ExampleSource>> {
        let mut sources: Vec<Arc<dyn ExampleSource>> = Vec::new();

        if let Some(key) = &self.words_api_key {
            match WordsApiSource::new(key.clone()) {
                Ok(source) => sources.push(Arc::new(source)),
                Err(e) => warn!(error = %e, "WordsAPI source disabled"),
            }
        }
        match TatoebaSource::new() {
            Ok(source) => sources.push(Arc::new(source)),
            Err(e) => warn!(error = %e, "Tatoeba source disabled"),
        }
        match FreeDictionarySource::new() {
            Ok(source) => sources.push(Arc::new(source)),
            Err(e) => warn!(error = %e, "Free Dictionary source disabled"),
        }
        if let Some(key) = &self.wordnik_api_key {
            match WordnikSource::new(key.clone()) {
                Ok(source) => sources.push(Arc::new(source)),
                Err(e) => warn!(error = %e, "Wordnik source disabled"),
            }
        }
        sources
    }

    /// Build a ready-to-use pipeline from this configuration
    pub fn build_pipeline(&self) -> ExamplePipeline {
        let cache = match &self.cache_path {
            Some(path) => ResponseCache::with_store(Box::new(FileStore::new(path))),
            None => ResponseCache::in_memory(),
        };
        ExamplePipeline::new(ExampleRetriever::with_cache(self.build_sources(), cache))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
