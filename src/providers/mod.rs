//! External example sentence sources
//!
//! One adapter per provider, each owning its HTTP plumbing and response
//! shape behind the [`ExampleSource`] trait:
//!
//! 1. **WordsAPI** - paid, high precision, metered monthly
//! 2. **Tatoeba** - community sentence corpus
//! 3. **Free Dictionary** - examples embedded in definition entries
//! 4. **Wordnik** - dictionary/corpus examples, keyed
//!
//! Plus a [`MockSource`] for tests and demos. The retriever fans out over
//! these concurrently; adapters never see the cache or quota state.

pub mod error;
pub mod free_dictionary;
pub mod mock;
pub mod source;
pub mod tatoeba;
pub mod wordnik;
pub mod words_api;

pub use error::{ProviderError, ProviderResult};
pub use free_dictionary::FreeDictionarySource;
pub use mock::{MockSource, MockSourceMode};
pub use source::ExampleSource;
pub use tatoeba::TatoebaSource;
pub use wordnik::WordnikSource;
pub use words_api::WordsApiSource;
