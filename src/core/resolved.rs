//! The resolved configuration handed to a continuation.

use crate::error::{ResolveError, Result};
use crate::sources::Payload;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Key under which the deployment name is injected.
pub const DEPLOYMENT_KEY: &str = "base";

/// A fully resolved configuration.
///
/// Built only from a successful base document, optionally overlaid by the
/// override document, with the deployment name injected under
/// [`DEPLOYMENT_KEY`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedConfig {
    values: Payload,
}

impl ResolvedConfig {
    /// Wrap a merged payload, injecting the deployment name.
    ///
    /// The injected key replaces any `base` key carried by the documents.
    pub(crate) fn new(mut values: Payload, deployment_name: &str) -> Self {
        values.insert(DEPLOYMENT_KEY.to_string(), Value::String(deployment_name.to_string()));
        Self { values }
    }

    /// Look up a top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// The injected deployment name.
    pub fn deployment_name(&self) -> &str {
        self.values
            .get(DEPLOYMENT_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Borrow the underlying key-value mapping.
    pub fn as_map(&self) -> &Payload {
        &self.values
    }

    /// Take the underlying key-value mapping.
    pub fn into_inner(self) -> Payload {
        self.values
    }

    /// Deserialize into a typed configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the values do not match `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use config_overlay::core::ResolvedConfig;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct WebConfig {
    ///     base: String,
    /// }
    ///
    /// # fn example(config: ResolvedConfig) -> config_overlay::error::Result<()> {
    /// let web: WebConfig = config.deserialize()?;
    /// println!("Serving under /{}", web.base);
    /// # Ok(())
    /// # }
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        T::deserialize(&Value::Object(self.values.clone()))
            .map_err(|e| ResolveError::Deserialization(e.to_string()))
    }
}

impl From<ResolvedConfig> for Value {
    fn from(config: ResolvedConfig) -> Self {
        Value::Object(config.values)
    }
}
