//! Pipeline orchestration
//!
//! Composes the full flow: categorize (when the caller did not supply a
//! category) → retrieve → filter → score → translate, falling back to
//! template generation when no external candidate survives. "No good
//! example found" is a normal branch here, never an error; the only
//! failure that escapes is a translator failure.

use crate::category::{WordCategory, categorize};
use crate::error::{ExampleError, ExampleResult};
use crate::filter::QualityFilter;
use crate::retriever::ExampleRetriever;
use crate::score::select_best;
use crate::templates::{TemplateGenerator, TemplateHistory};
use crate::translator::{Translator, validate_locale};
use crate::types::{CandidateExample, ExampleSentence};
use tokio::sync::Mutex;
use tracing::debug;

/// Source label for sentences produced by the template generator
pub const TEMPLATE_SOURCE: &str = "template";

/// The example sentence pipeline
///
/// One instance is shared across calls: the retriever's cache and quota
/// state and the template history persist for the process lifetime.
pub struct ExamplePipeline {
    retriever: ExampleRetriever,
    filter: QualityFilter,
    generator: TemplateGenerator,
    history: Mutex<TemplateHistory>,
}

impl ExamplePipeline {
    pub fn new(retriever: ExampleRetriever) -> Self {
        ExamplePipeline {
            retriever,
            filter: QualityFilter::new(),
            generator: TemplateGenerator::new(),
            history: Mutex::new(TemplateHistory::new()),
        }
    }

    /// Produce one example sentence for a learned word, with translation
    ///
    /// # Arguments
    ///
    /// * `word` - The learned word (must be non-empty)
    /// * `target_language` - Locale code for the translation
    /// * `translator` - Injected translation backend
    /// * `category` - Optional caller-supplied category; derived from the
    ///   word when absent
    ///
    /// # Errors
    ///
    /// `ConfigError` for an empty word or malformed locale;
    /// `TranslationError` when the injected translator fails. Provider
    /// failures never surface: they reduce the candidate set, and an empty
    /// candidate set falls back to template generation.
    pub async fn get_example_sentence(
        &self,
        word: &str,
        target_language: &str,
        translator: &dyn Translator,
        category: Option<WordCategory>,
    ) -> ExampleResult<ExampleSentence> {
        let word = word.trim();
        if word.is_empty() {
            return Err(ExampleError::ConfigError("Word cannot be empty".to_string()));
        }
        validate_locale(target_language)?;

        let category = category.unwrap_or_else(|| categorize(word));
        debug!(word, category = %category, "Pipeline start");

        let candidates = self.retriever.retrieve(word).await;
        let retrieved = candidates.len();
        let accepted: Vec<CandidateExample> = candidates
            .into_iter()
            .filter(|candidate| self.filter.accepts(&candidate.text, word, category))
            .collect();
        debug!(word, retrieved, accepted = accepted.len(), "Filtering done");

        let (english, source) = match select_best(accepted, word) {
            Some(best) => {
                debug!(word, score = best.score, source = %best.candidate.source, "Candidate selected");
                (
                    best.candidate.text,
                    best.candidate.source.as_str().to_string(),
                )
            }
            None => {
                debug!(word, "No candidate survived, falling back to template");
                let mut history = self.history.lock().await;
                let generated = self.generator.generate(word, category, &mut history);
                (generated.text, TEMPLATE_SOURCE.to_string())
            }
        };

        let translated = translator.translate(&english, target_language).await?;
        Ok(ExampleSentence {
            english,
            translated,
            source,
        })
    }
}
