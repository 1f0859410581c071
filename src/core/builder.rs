//! Builder for constructing ConfigResolver instances.

use crate::core::{ConfigResolver, ErrorReporter, TracingReporter};
use crate::error::Result;
use crate::settings::{DEFAULT_DEPLOYMENT_NAME, ResolverSettings, validate_deployment_name};
use crate::sources::Fetcher;

/// Builder for constructing a `ConfigResolver`.
///
/// # Examples
///
/// ```rust,no_run
/// use config_overlay::prelude::*;
/// use config_overlay::sources::DirectoryFetcher;
///
/// # fn example() -> Result<()> {
/// let resolver = ConfigResolver::builder()
///     .with_deployment_name("hazard-app")
///     .with_reporter(|message: &str| eprintln!("fatal: {}", message))
///     .build(DirectoryFetcher::new("/var/www/html"))?;
/// # Ok(())
/// # }
/// ```
pub struct ConfigResolverBuilder {
    deployment_name: String,
    reporter: Option<Box<dyn ErrorReporter>>,
}

impl ConfigResolverBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            deployment_name: DEFAULT_DEPLOYMENT_NAME.to_string(),
            reporter: None,
        }
    }

    /// Set the deployment name.
    ///
    /// It determines both locators and the injected `base` value.
    /// Defaults to [`DEFAULT_DEPLOYMENT_NAME`].
    pub fn with_deployment_name(mut self, name: impl Into<String>) -> Self {
        self.deployment_name = name.into();
        self
    }

    /// Apply loaded settings.
    pub fn with_settings(self, settings: &ResolverSettings) -> Self {
        self.with_deployment_name(settings.deployment_name.clone())
    }

    /// Set the channel that receives fatal errors.
    ///
    /// Defaults to [`TracingReporter`].
    pub fn with_reporter<R: ErrorReporter + 'static>(mut self, reporter: R) -> Self {
        self.reporter = Some(Box::new(reporter));
        self
    }

    /// Build the resolver around `fetcher`.
    ///
    /// # Errors
    ///
    /// Returns an error if the deployment name is empty, is not a single
    /// path segment, or contains characters outside `A-Z a-z 0-9 . _ ~ -`.
    pub fn build<F: Fetcher>(self, fetcher: F) -> Result<ConfigResolver<F>> {
        validate_deployment_name(&self.deployment_name)?;

        let reporter: Box<dyn ErrorReporter> = match self.reporter {
            Some(reporter) => reporter,
            None => Box::new(TracingReporter),
        };

        Ok(ConfigResolver::from_parts(fetcher, self.deployment_name, reporter))
    }
}

impl Default for ConfigResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigResolver<()> {
    /// Create a new builder for constructing a resolver.
    pub fn builder() -> ConfigResolverBuilder {
        ConfigResolverBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use crate::sources::StaticFetcher;

    #[test]
    fn test_default_deployment_name() {
        let resolver = ConfigResolver::builder().build(StaticFetcher::new()).unwrap();
        assert_eq!(resolver.deployment_name(), "nshmp-haz-v2");
    }

    #[test]
    fn test_with_settings() {
        let settings = ResolverSettings {
            deployment_name: "hazard-app".to_string(),
            ..Default::default()
        };
        let resolver = ConfigResolver::builder()
            .with_settings(&settings)
            .build(StaticFetcher::new())
            .unwrap();

        let [base, overrides] = resolver.sources();
        assert_eq!(base.locator(), "/hazard-app/apps/config.json");
        assert_eq!(overrides.locator(), "/hazard-app/config.json");
    }

    #[test]
    fn test_reporter_receives_fatal_error() {
        let reports = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = std::sync::Arc::clone(&reports);
        let resolver = ConfigResolver::builder()
            .with_reporter(move |message: &str| sink.lock().unwrap().push(message.to_string()))
            .build(StaticFetcher::new())
            .unwrap();

        let result = tokio_test::block_on(resolver.resolve_config(|_| {}));
        assert!(result.is_err());
        assert_eq!(reports.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_invalid_deployment_name() {
        let result = ConfigResolver::builder()
            .with_deployment_name("a/b")
            .build(StaticFetcher::new());
        assert!(matches!(result, Err(ResolveError::Settings(_))));

        // Would otherwise turn the rest of each locator into a query or fragment.
        for name in ["app?x", "app#x"] {
            let result = ConfigResolver::builder()
                .with_deployment_name(name)
                .build(StaticFetcher::new());
            assert!(matches!(result, Err(ResolveError::Settings(_))), "{} accepted", name);
        }
    }
}
