//! In-memory fetcher.

use super::fetcher::{FailureKind, FetchFailure, FetchOutcome, Fetcher, Payload, into_payload};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

/// Serves fixed payloads from memory.
///
/// Unknown locators settle with [`FailureKind::NotFound`].
///
/// # Examples
///
/// ```rust
/// use config_overlay::sources::StaticFetcher;
/// use serde_json::json;
///
/// let fetcher = StaticFetcher::new()
///     .with_document("/app/apps/config.json", json!({ "server": "localhost" }));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    documents: HashMap<String, Value>,
}

impl StaticFetcher {
    /// Create an empty fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` at `locator`.
    ///
    /// Non-object documents are accepted here and rejected when fetched.
    pub fn with_document(mut self, locator: impl Into<String>, document: Value) -> Self {
        self.documents.insert(locator.into(), document);
        self
    }

    /// Serve a payload at `locator`.
    pub fn with_payload(self, locator: impl Into<String>, payload: Payload) -> Self {
        self.with_document(locator, Value::Object(payload))
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, locator: &str) -> FetchOutcome {
        match self.documents.get(locator) {
            Some(document) => into_payload(locator, document.clone()),
            None => Err(FetchFailure::new(locator, FailureKind::NotFound)),
        }
    }

    fn name(&self) -> String {
        format!("static:{} documents", self.documents.len())
    }
}
