//! Directory-backed fetcher.

use super::fetcher::{FailureKind, FetchFailure, FetchOutcome, Fetcher, parse_payload};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Serves locators from a directory on the local filesystem.
///
/// A locator such as `/nshmp-haz-v2/apps/config.json` is read from
/// `<root>/nshmp-haz-v2/apps/config.json`. Locators that try to escape the
/// root with `..` are rejected.
///
/// # Examples
///
/// ```rust,no_run
/// use config_overlay::sources::DirectoryFetcher;
///
/// let fetcher = DirectoryFetcher::new("/var/www/html");
/// ```
pub struct DirectoryFetcher {
    root: PathBuf,
}

impl DirectoryFetcher {
    /// Create a fetcher rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a locator onto a path under the root.
    fn resolve_path(&self, locator: &str) -> Option<PathBuf> {
        let relative = Path::new(locator.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return None;
        }
        Some(self.root.join(relative))
    }
}

#[async_trait]
impl Fetcher for DirectoryFetcher {
    async fn fetch(&self, locator: &str) -> FetchOutcome {
        let path = self.resolve_path(locator).ok_or_else(|| {
            FetchFailure::new(
                locator,
                FailureKind::Unreachable("Locator escapes the served directory".to_string()),
            )
        })?;

        debug!(path = %path.display(), "Reading configuration document");

        let body = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => FetchFailure::new(locator, FailureKind::NotFound),
            _ => FetchFailure::new(
                locator,
                FailureKind::Unreachable(format!("Failed to read {}: {}", path.display(), e)),
            ),
        })?;

        parse_payload(locator, &body)
    }

    fn name(&self) -> String {
        format!("dir:{}", self.root.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_document() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("app/apps")).unwrap();
        fs::write(temp_dir.path().join("app/apps/config.json"), r#"{"server": "x"}"#).unwrap();

        let fetcher = DirectoryFetcher::new(temp_dir.path());
        let payload = fetcher.fetch("/app/apps/config.json").await.unwrap();
        assert_eq!(payload["server"], "x");
    }

    #[tokio::test]
    async fn test_missing_document() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = DirectoryFetcher::new(temp_dir.path());

        let failure = fetcher.fetch("/app/config.json").await.unwrap_err();
        assert_eq!(failure.locator(), "/app/config.json");
        assert_eq!(failure.kind(), &FailureKind::NotFound);
    }

    #[tokio::test]
    async fn test_rejects_parent_components() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = DirectoryFetcher::new(temp_dir.path().join("served"));

        let failure = fetcher.fetch("/../secret.json").await.unwrap_err();
        assert!(matches!(failure.kind(), FailureKind::Unreachable(_)));
    }

    #[tokio::test]
    async fn test_invalid_document() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("config.json"), "{ broken").unwrap();

        let fetcher = DirectoryFetcher::new(temp_dir.path());
        let failure = fetcher.fetch("/config.json").await.unwrap_err();
        assert!(matches!(failure.kind(), FailureKind::InvalidPayload(_)));
    }

    #[test]
    fn test_name() {
        let fetcher = DirectoryFetcher::new("/srv/www");
        assert_eq!(fetcher.name(), "dir:/srv/www");
    }
}
