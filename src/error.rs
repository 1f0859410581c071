//! Error types for config-overlay.

use crate::sources::FetchFailure;

/// Result type alias for config-overlay operations.
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Errors that can terminate a configuration resolution.
///
/// A missing override document is not represented here: it is recovered
/// inside the resolver and never reaches the caller.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The required base document could not be fetched.
    #[error("Failed to load base configuration: {0}")]
    MissingBase(FetchFailure),

    /// A fetch failed for a locator the resolver never asked for.
    #[error("Unexpected configuration failure: {0}")]
    UnexpectedFailure(FetchFailure),

    /// A fetcher could not be constructed.
    #[error("Fetcher error: {0}")]
    Fetcher(String),

    /// Resolver settings could not be loaded.
    #[error("Invalid settings: {0}")]
    Settings(String),

    /// The resolved configuration does not match the requested type.
    #[error("Failed to deserialize configuration: {0}")]
    Deserialization(String),
}

impl ResolveError {
    /// Whether this error aborts a resolution.
    ///
    /// Construction and deserialization errors happen outside of a
    /// resolution and are not considered fatal to it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingBase(_) | Self::UnexpectedFailure(_))
    }

    /// The fetch failure behind a fatal error, if any.
    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            Self::MissingBase(failure) | Self::UnexpectedFailure(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for ResolveError {
    fn from(err: config::ConfigError) -> Self {
        ResolveError::Settings(err.to_string())
    }
}
