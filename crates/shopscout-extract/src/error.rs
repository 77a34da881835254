use thiserror::Error;

/// Construction-time errors for the extraction components.
///
/// Runtime problems during hydration are never errors — they are
/// [`crate::SkipReason`]s, absorbed per target.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The underlying `reqwest::Client` could not be constructed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
