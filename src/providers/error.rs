/// Error types for example source adapters
///
/// These never escape the retriever: every variant is handled by skipping
/// the affected provider for the current call (and, for `RateLimited`,
/// recording a backoff window). "No data found" is not an error; adapters
/// return an empty list for that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Missing or unusable credential/configuration
    ConfigError(String),
    /// Transport-level failure
    NetworkError(String),
    /// The call exceeded its time budget
    Timeout,
    /// Provider signalled throttling; optional reset hint in seconds
    RateLimited { retry_after_secs: Option<u64> },
    /// Non-success HTTP status
    ApiError(u16, String),
    /// Response body did not match the provider's documented shape
    ParseError(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ProviderError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            ProviderError::Timeout => write!(f, "Request timed out"),
            ProviderError::RateLimited { retry_after_secs } => match retry_after_secs {
                Some(secs) => write!(f, "Rate limited, retry after {}s", secs),
                None => write!(f, "Rate limited"),
            },
            ProviderError::ApiError(status, msg) => write!(f, "API error {}: {}", status, msg),
            ProviderError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;
