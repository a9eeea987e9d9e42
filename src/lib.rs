//! Example sentence acquisition and curation for SnapVocab
//!
//! Given a learned word, an optional semantic category and a target
//! language, this crate produces one natural, pedagogically appropriate
//! English example sentence together with its translation.
//!
//! The pipeline runs in stages:
//!
//! 1. **Categorizer** - derive a semantic category when the caller has none
//! 2. **Retriever** - fan out concurrently to external example sources,
//!    behind a TTL cache and per-provider quota/backoff state
//! 3. **Quality filter** - a fixed chain of predicate stages rejecting
//!    unsuitable candidates
//! 4. **Scorer** - rank survivors and pick the best
//! 5. **Template generator** - guaranteed fallback when nothing survives
//! 6. **Translation** - through an injected [`Translator`]
//!
//! # Example
//!
//! ```ignore
//! use snapvocab_examples::{ExamplePipeline, MockMode, MockTranslator, PipelineConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = PipelineConfig::from_env().build_pipeline();
//!     let translator = MockTranslator::new(MockMode::Suffix);
//!
//!     let example = pipeline
//!         .get_example_sentence("cat", "es", &translator, None)
//!         .await?;
//!
//!     println!("{} -> {} ({})", example.english, example.translated, example.source);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod category;
pub mod config;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod pipeline;
pub mod providers;
pub mod retriever;
pub mod score;
pub mod templates;
pub mod translator;
pub mod types;


// Re-export main types for convenient access
pub use cache::{CacheStore, FileStore, ProviderQuota, QuotaRegistry, ResponseCache};
pub use category::{WordCategory, categorize};
pub use config::PipelineConfig;
pub use error::{ExampleError, ExampleResult};
pub use filter::QualityFilter;
pub use normalize::clean_sentence;
pub use pipeline::{ExamplePipeline, TEMPLATE_SOURCE};
pub use providers::{ExampleSource, ProviderError, ProviderResult};
pub use retriever::ExampleRetriever;
pub use score::{rank, select_best};
pub use templates::{GeneratedExample, TemplateGenerator, TemplateHistory};
pub use translator::{MockMode, MockTranslator, Translator};
pub use types::{CandidateExample, ComplexityTier, ExampleSentence, ProviderId, ScoredExample};
