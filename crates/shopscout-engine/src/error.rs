use thiserror::Error;

/// Request-level errors from the discovery engine.
///
/// Per-target and per-task problems never show up here — they are
/// absorbed into reduced yield. Only configuration-grade setup failures
/// and a total initial-search wipeout surface to the caller.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An underlying `reqwest::Client` could not be constructed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Search client construction failed.
    #[error("search client error: {0}")]
    Search(#[from] shopscout_search::SearchError),

    /// Extraction component construction failed.
    #[error("extraction error: {0}")]
    Extract(#[from] shopscout_extract::ExtractError),

    /// The configured expander base URL cannot be parsed.
    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// Every initial query task failed upstream. Partial failure degrades
    /// silently; a total wipeout escalates instead of returning an empty
    /// success.
    #[error("all {attempted} initial search queries failed")]
    AllQueriesFailed { attempted: usize },
}
