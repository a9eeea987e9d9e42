/// Error types for the example sentence pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExampleError {
    /// Invalid configuration or input (empty word, malformed locale, bad credential)
    ConfigError(String),
    /// The injected translator failed; the only failure the pipeline propagates
    TranslationError(String),
}

impl std::fmt::Display for ExampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExampleError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ExampleError::TranslationError(msg) => write!(f, "Translation error: {}", msg),
        }
    }
}

impl std::error::Error for ExampleError {}

/// Result type for pipeline operations
pub type ExampleResult<T> = Result<T, ExampleError>;
