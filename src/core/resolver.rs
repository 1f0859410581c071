//! Two-tier configuration resolution.

use super::merge::overlay;
use super::reporter::ErrorReporter;
use super::resolved::ResolvedConfig;
use crate::error::{ResolveError, Result};
use crate::sources::{FailureKind, FetchFailure, FetchOutcome, Fetcher, fetch_all};
use tracing::{debug, info};

/// One of the two documents a resolution fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    locator: String,
    required: bool,
}

impl ConfigSource {
    /// The required base document, `/<name>/apps/config.json`.
    pub fn base(deployment_name: &str) -> Self {
        Self {
            locator: format!("/{}/apps/config.json", deployment_name),
            required: true,
        }
    }

    /// The optional override document, `/<name>/config.json`.
    pub fn overrides(deployment_name: &str) -> Self {
        Self {
            locator: format!("/{}/config.json", deployment_name),
            required: false,
        }
    }

    /// The locator passed to the fetcher.
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Whether resolution fails without this document.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether `failure` was produced by fetching this source.
    fn produced(&self, failure: &FetchFailure) -> bool {
        failure.locator() == self.locator
    }
}

/// Resolves a base document and an optional override into one configuration.
///
/// Both documents are fetched concurrently. If both arrive they are merged
/// with the override winning on key collisions. A missing override degrades
/// to the base alone. A missing base is fatal.
///
/// Each call to [`resolve`](Self::resolve) owns its own outcomes, so one
/// resolver can serve concurrent resolutions.
///
/// # Examples
///
/// ```rust
/// use config_overlay::prelude::*;
/// use config_overlay::sources::StaticFetcher;
/// use serde_json::json;
///
/// # async fn example() -> Result<()> {
/// let fetcher = StaticFetcher::new()
///     .with_document("/nshmp-haz-v2/apps/config.json", json!({ "server": "prod" }))
///     .with_document("/nshmp-haz-v2/config.json", json!({ "server": "dev" }));
///
/// let resolver = ConfigResolver::builder().build(fetcher)?;
/// resolver
///     .resolve_config(|config| {
///         assert_eq!(config.get("server"), Some(&json!("dev")));
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct ConfigResolver<F> {
    /// Fetcher used for both documents
    fetcher: F,
    /// Fixed for the lifetime of the resolver
    deployment_name: String,
    /// Receives fatal errors from `resolve_config`
    reporter: Box<dyn ErrorReporter>,
}

impl<F: Fetcher> ConfigResolver<F> {
    pub(crate) fn from_parts(fetcher: F, deployment_name: String, reporter: Box<dyn ErrorReporter>) -> Self {
        Self {
            fetcher,
            deployment_name,
            reporter,
        }
    }

    /// The deployment name injected into every resolved configuration.
    pub fn deployment_name(&self) -> &str {
        &self.deployment_name
    }

    /// The base and override sources, in that order.
    pub fn sources(&self) -> [ConfigSource; 2] {
        [
            ConfigSource::base(&self.deployment_name),
            ConfigSource::overrides(&self.deployment_name),
        ]
    }

    /// Fetch, merge and return the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::MissingBase`] if the base document cannot be
    /// fetched, whatever happened to the override, and
    /// [`ResolveError::UnexpectedFailure`] if a failure names a locator that
    /// was never requested. A missing override is not an error.
    pub async fn resolve(&self) -> Result<ResolvedConfig> {
        let [base, overrides] = self.sources();
        debug!(
            fetcher = %self.fetcher.name(),
            base = base.locator(),
            overrides = overrides.locator(),
            "Resolving configuration"
        );

        let mut outcomes = fetch_all(&self.fetcher, &[base.locator(), overrides.locator()])
            .await
            .into_iter();
        let base_outcome = outcomes.next().unwrap_or_else(|| missing_outcome(&base));
        let override_outcome = outcomes.next().unwrap_or_else(|| missing_outcome(&overrides));

        self.settle(&base, &overrides, base_outcome, override_outcome)
    }

    /// Fetch and merge the configuration, then hand it to `continuation`.
    ///
    /// The continuation runs exactly once on success. On a fatal error it
    /// never runs; the error's message goes to the configured
    /// [`ErrorReporter`] once and the error is returned.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve).
    pub async fn resolve_config<C>(&self, continuation: C) -> Result<()>
    where
        C: FnOnce(ResolvedConfig),
    {
        match self.resolve().await {
            Ok(config) => {
                continuation(config);
                Ok(())
            }
            Err(err) => {
                self.reporter.report(&err.to_string());
                Err(err)
            }
        }
    }

    fn settle(
        &self,
        base: &ConfigSource,
        overrides: &ConfigSource,
        base_outcome: FetchOutcome,
        override_outcome: FetchOutcome,
    ) -> Result<ResolvedConfig> {
        match (base_outcome, override_outcome) {
            // Both documents arrived.
            (Ok(base_payload), Ok(override_payload)) => {
                info!(deployment = %self.deployment_name, "Resolved configuration with override");
                Ok(ResolvedConfig::new(
                    overlay(base_payload, override_payload),
                    &self.deployment_name,
                ))
            }

            // A base failure wins over any override outcome.
            (Err(failure), _) if base.produced(&failure) => Err(ResolveError::MissingBase(failure)),
            (Err(failure), _) => Err(ResolveError::UnexpectedFailure(failure)),

            (Ok(base_payload), Err(failure)) if overrides.produced(&failure) => {
                debug!(
                    locator = failure.locator(),
                    reason = %failure.kind(),
                    "Override configuration absent, using base only"
                );
                info!(deployment = %self.deployment_name, "Resolved configuration without override");
                Ok(ResolvedConfig::new(base_payload, &self.deployment_name))
            }
            (Ok(_), Err(failure)) => Err(ResolveError::UnexpectedFailure(failure)),
        }
    }
}

fn missing_outcome(source: &ConfigSource) -> FetchOutcome {
    Err(FetchFailure::new(
        source.locator(),
        FailureKind::Unreachable("fetch produced no outcome".to_string()),
    ))
}
