//! Shared data types for the example sentence pipeline
//!
//! These are the records that flow between the retriever, the quality
//! filter, the scorer and the orchestrator. Candidates live for a single
//! pipeline run; only the raw provider responses are cached.

use serde::{Deserialize, Serialize};

/// Identity of an external example/definition source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderId {
    /// WordsAPI via RapidAPI (paid, high precision)
    WordsApi,
    /// Tatoeba community sentence corpus
    Tatoeba,
    /// Free Dictionary API (dictionaryapi.dev)
    FreeDictionary,
    /// Wordnik example corpus
    Wordnik,
    /// Mock source used in tests and demos
    Mock,
}

impl ProviderId {
    /// Stable identifier used in cache keys and the `source` field of results
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::WordsApi => "wordsapi",
            ProviderId::Tatoeba => "tatoeba",
            ProviderId::FreeDictionary => "free_dictionary",
            ProviderId::Wordnik => "wordnik",
            ProviderId::Mock => "mock",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A raw example sentence fetched from a source, after normalization
/// but before filtering and scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateExample {
    /// Cleaned sentence text
    pub text: String,
    /// Which source produced it
    pub source: ProviderId,
    /// The search term that surfaced it, when it differs from the word itself
    pub search_term: Option<String>,
}

impl CandidateExample {
    pub fn new(text: impl Into<String>, source: ProviderId) -> Self {
        CandidateExample {
            text: text.into(),
            source,
            search_term: None,
        }
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }
}

/// A candidate together with its ranking score; lives for one selection pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredExample {
    pub candidate: CandidateExample,
    pub score: i32,
}

/// Complexity bucket of a generated template sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComplexityTier {
    Basic,
    Intermediate,
    Advanced,
}

/// The externally visible result of one pipeline call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSentence {
    /// The chosen or generated English example
    pub english: String,
    /// Its translation in the requested target language
    pub translated: String,
    /// Where the sentence came from: a provider id or "template"
    pub source: String,
}
