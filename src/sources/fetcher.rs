//! Fetcher trait and fetch outcomes.

use async_trait::async_trait;
use futures::future::join_all;
use serde_json::{Map, Value};
use tracing::debug;

/// An untyped JSON object, as returned by a successful fetch.
pub type Payload = Map<String, Value>;

/// The settled result of fetching a single locator.
pub type FetchOutcome = std::result::Result<Payload, FetchFailure>;

/// Why a fetch failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailureKind {
    /// The transport could not complete the request.
    #[error("{0}")]
    Unreachable(String),

    /// The server answered with a non-success status.
    #[error("status {0}")]
    Status(u16),

    /// The resource does not exist.
    #[error("not found")]
    NotFound,

    /// The body is not a JSON object.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

/// A failed fetch, tagged with the locator that produced it.
///
/// The resolver classifies failures by [`FetchFailure::locator`], never by
/// the rendered message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Could not reach: {locator} ({kind})")]
pub struct FetchFailure {
    locator: String,
    kind: FailureKind,
}

impl FetchFailure {
    /// Create a failure for `locator`.
    pub fn new(locator: impl Into<String>, kind: FailureKind) -> Self {
        Self {
            locator: locator.into(),
            kind,
        }
    }

    /// The locator whose fetch failed.
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// The failure reason.
    pub fn kind(&self) -> &FailureKind {
        &self.kind
    }
}

/// Trait for configuration fetchers.
///
/// Implement this trait to load configuration documents from a new kind of
/// store. A fetcher must not fail as a whole: every call settles with either
/// a payload or a [`FetchFailure`] naming the requested locator.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch and parse the JSON object found at `locator`.
    async fn fetch(&self, locator: &str) -> FetchOutcome;

    /// Get a human-readable name for this fetcher (for logging/debugging).
    fn name(&self) -> String;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for std::sync::Arc<F> {
    async fn fetch(&self, locator: &str) -> FetchOutcome {
        (**self).fetch(locator).await
    }

    fn name(&self) -> String {
        (**self).name()
    }
}

/// Fetch every locator concurrently.
///
/// All requests are dispatched before any is awaited. The returned outcomes
/// are positional: `outcomes[i]` belongs to `locators[i]` regardless of the
/// order in which the requests settled.
pub async fn fetch_all<F, S>(fetcher: &F, locators: &[S]) -> Vec<FetchOutcome>
where
    F: Fetcher + ?Sized,
    S: AsRef<str>,
{
    debug!(fetcher = %fetcher.name(), count = locators.len(), "Dispatching fetches");
    join_all(locators.iter().map(|locator| fetcher.fetch(locator.as_ref()))).await
}

/// Parse a raw document body into a payload.
///
/// The root of the document must be a JSON object.
pub(crate) fn parse_payload(locator: &str, body: &[u8]) -> FetchOutcome {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        FetchFailure::new(locator, FailureKind::InvalidPayload(format!("Failed to parse JSON: {}", e)))
    })?;

    into_payload(locator, value)
}

/// Require a JSON value to be an object.
pub(crate) fn into_payload(locator: &str, value: Value) -> FetchOutcome {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(FetchFailure::new(
            locator,
            FailureKind::InvalidPayload("Expected JSON object at root level".to_string()),
        )),
    }
}
