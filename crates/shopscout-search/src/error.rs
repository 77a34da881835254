use thiserror::Error;

/// Errors returned by the web-search API client.
///
/// A non-2xx upstream status is fatal for the issuing query task only —
/// the client never retries; the caller decides whether the task's lost
/// contribution matters.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The search API responded with a non-2xx status.
    #[error("unexpected HTTP status {status} for query \"{query}\"")]
    UnexpectedStatus { status: u16, query: String },

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL cannot be parsed.
    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
