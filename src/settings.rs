//! Resolver settings loaded from files and environment variables.

use crate::error::{ResolveError, Result};
use config::{Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Deployment name used when none is configured.
pub const DEFAULT_DEPLOYMENT_NAME: &str = "nshmp-haz-v2";

/// Environment variable prefix read by [`ResolverSettings::from_env`].
pub const DEFAULT_ENV_PREFIX: &str = "CONFIG_OVERLAY";

/// Settings that shape a resolver and its fetcher.
///
/// # Examples
///
/// ```rust,no_run
/// use config_overlay::settings::ResolverSettings;
///
/// # fn example() -> config_overlay::error::Result<()> {
/// // CONFIG_OVERLAY_DEPLOYMENT_NAME=my-app CONFIG_OVERLAY_ORIGIN=http://localhost:8080
/// let settings = ResolverSettings::from_env()?;
/// println!("Deployment: {}", settings.deployment_name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResolverSettings {
    /// Deployment name, used in both locators and injected as `base`.
    #[serde(default = "default_deployment_name")]
    pub deployment_name: String,

    /// Origin for HTTP fetches, e.g. `https://example.gov`.
    #[serde(default)]
    pub origin: Option<String>,

    /// Optional HTTP timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_deployment_name() -> String {
    DEFAULT_DEPLOYMENT_NAME.to_string()
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            deployment_name: default_deployment_name(),
            origin: None,
            timeout_secs: None,
        }
    }
}

impl ResolverSettings {
    /// Load settings from `CONFIG_OVERLAY_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or the result is invalid.
    pub fn from_env() -> Result<Self> {
        Self::load(None, DEFAULT_ENV_PREFIX)
    }

    /// Load settings from an optional file, then environment variables with
    /// `env_prefix`. Environment variables take precedence over the file.
    ///
    /// The file format is detected from its extension (`.json`, `.toml`,
    /// `.yaml`).
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed, or if the
    /// resulting settings are invalid.
    pub fn load(file: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Self = builder
            .add_source(Environment::with_prefix(env_prefix).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// The configured HTTP timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn validate(&self) -> Result<()> {
        validate_deployment_name(&self.deployment_name)
    }
}

/// A deployment name is a single non-empty path segment made only of
/// unreserved URL characters (`A-Z a-z 0-9 . _ ~ -`).
pub(crate) fn validate_deployment_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ResolveError::Settings("deployment name must not be empty".to_string()));
    }
    if let Some(bad) = name
        .chars()
        .find(|&c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '~' | '-')))
    {
        return Err(ResolveError::Settings(format!(
            "deployment name '{}' contains reserved character {:?}",
            name, bad
        )));
    }
    if name == "." || name == ".." {
        return Err(ResolveError::Settings(format!(
            "deployment name '{}' must be a single path segment",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(unsafe_code)] // For env var manipulation in tests
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = ResolverSettings::default();
        assert_eq!(settings.deployment_name, "nshmp-haz-v2");
        assert!(settings.origin.is_none());
        assert!(settings.timeout().is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("resolver.toml");
        fs::write(
            &path,
            r#"
deployment_name = "hazard-app"
origin = "http://localhost:8080"
timeout_secs = 5
"#,
        )
        .unwrap();

        let settings = ResolverSettings::load(Some(&path), "TEST_OVERLAY_FILE_ONLY").unwrap();
        assert_eq!(settings.deployment_name, "hazard-app");
        assert_eq!(settings.origin.as_deref(), Some("http://localhost:8080"));
        assert_eq!(settings.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_env_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("resolver.json");
        fs::write(&path, r#"{ "deployment_name": "from-file" }"#).unwrap();

        unsafe {
            env::set_var("TEST_OVERLAY_ENV_DEPLOYMENT_NAME", "from-env");
        }
        let settings = ResolverSettings::load(Some(&path), "TEST_OVERLAY_ENV").unwrap();
        unsafe {
            env::remove_var("TEST_OVERLAY_ENV_DEPLOYMENT_NAME");
        }

        assert_eq!(settings.deployment_name, "from-env");
    }

    #[test]
    fn test_missing_file() {
        let result = ResolverSettings::load(Some(Path::new("/nonexistent/resolver.toml")), "TEST_OVERLAY_MISSING");
        assert!(matches!(result, Err(ResolveError::Settings(_))));
    }

    #[test]
    fn test_rejects_bad_deployment_name() {
        assert!(validate_deployment_name("").is_err());
        assert!(validate_deployment_name("a/b").is_err());
        assert!(validate_deployment_name("..").is_err());
        assert!(validate_deployment_name("app?x").is_err());
        assert!(validate_deployment_name("app#frag").is_err());
        assert!(validate_deployment_name("app%2F").is_err());
        assert!(validate_deployment_name("a\\b").is_err());
        assert!(validate_deployment_name("my app").is_err());
        assert!(validate_deployment_name("app\n").is_err());
        assert!(validate_deployment_name("nshmp-haz-v2").is_ok());
        assert!(validate_deployment_name("app_v1.2~beta").is_ok());
    }
}
