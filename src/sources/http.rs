//! Remote HTTP/HTTPS fetcher.

use super::fetcher::{FailureKind, FetchFailure, FetchOutcome, Fetcher, parse_payload};
use crate::error::{ResolveError, Result};
use crate::settings::ResolverSettings;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use tracing::{debug, warn};

/// Authentication method for HTTP requests.
#[derive(Clone)]
pub enum HttpAuth {
    /// No authentication
    None,
    /// Bearer token authentication
    Bearer(String),
    /// Basic authentication (username, password)
    Basic(String, String),
}

/// HTTP-based configuration fetcher.
///
/// Issues a GET for `<origin><locator>` and parses the body as a JSON object.
/// No timeout is imposed unless one is configured; a hung request stalls the
/// fetch.
///
/// # Examples
///
/// ```rust,no_run
/// use config_overlay::sources::HttpFetcher;
/// use std::time::Duration;
///
/// # fn example() -> config_overlay::error::Result<()> {
/// let fetcher = HttpFetcher::builder()
///     .with_origin("https://earthquake.example.gov")
///     .with_timeout(Duration::from_secs(10))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct HttpFetcher {
    origin: String,
    client: Client,
    auth: HttpAuth,
}

impl HttpFetcher {
    /// Create a new builder for constructing an HTTP fetcher.
    pub fn builder() -> HttpFetcherBuilder {
        HttpFetcherBuilder::new()
    }

    /// Build a fetcher from loaded settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings carry no origin.
    pub fn from_settings(settings: &ResolverSettings) -> Result<Self> {
        let origin = settings
            .origin
            .clone()
            .ok_or_else(|| ResolveError::Settings("origin is required for HttpFetcher".to_string()))?;

        let mut builder = HttpFetcherBuilder::new().with_origin(origin);
        if let Some(timeout) = settings.timeout() {
            builder = builder.with_timeout(timeout);
        }
        builder.build()
    }

    /// The full URL requested for `locator`.
    fn url(&self, locator: &str) -> String {
        if locator.starts_with('/') {
            format!("{}{}", self.origin, locator)
        } else {
            format!("{}/{}", self.origin, locator)
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, locator: &str) -> FetchOutcome {
        let url = self.url(locator);
        let mut request = self.client.get(&url);

        request = match &self.auth {
            HttpAuth::None => request,
            HttpAuth::Bearer(token) => request.bearer_auth(token),
            HttpAuth::Basic(username, password) => request.basic_auth(username, Some(password)),
        };

        debug!(%url, "Requesting configuration document");

        let response = request.send().await.map_err(|e| {
            warn!(%url, error = %e, "Configuration request failed");
            FetchFailure::new(locator, FailureKind::Unreachable(format!("HTTP request failed: {}", e)))
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!(%url, status = status.as_u16(), "Configuration request rejected");
            return Err(FetchFailure::new(locator, FailureKind::Status(status.as_u16())));
        }

        let body = response.bytes().await.map_err(|e| {
            FetchFailure::new(locator, FailureKind::Unreachable(format!("Failed to read body: {}", e)))
        })?;

        parse_payload(locator, &body)
    }

    fn name(&self) -> String {
        format!("http:{}", self.origin)
    }
}

/// Builder for constructing an `HttpFetcher`.
pub struct HttpFetcherBuilder {
    origin: Option<String>,
    auth: HttpAuth,
    timeout: Option<Duration>,
    headers: Vec<(String, String)>,
}

impl HttpFetcherBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            origin: None,
            auth: HttpAuth::None,
            timeout: None,
            headers: Vec::new(),
        }
    }

    /// Set the scheme and authority every locator is resolved against,
    /// e.g. `https://example.gov`.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Set Bearer token authentication.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth = HttpAuth::Bearer(token.into());
        self
    }

    /// Set Basic authentication.
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.auth = HttpAuth::Basic(username.into(), password.into());
        self
    }

    /// Set a request timeout.
    ///
    /// Unset by default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Send an extra header with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Build the HTTP fetcher.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No origin is provided
    /// - A header name or value is invalid
    /// - The HTTP client cannot be constructed
    pub fn build(self) -> Result<HttpFetcher> {
        let origin = self
            .origin
            .ok_or_else(|| ResolveError::Fetcher("origin is required for HttpFetcher".to_string()))?;

        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ResolveError::Fetcher(format!("Invalid header name '{}': {}", name, e)))?;
            if name == AUTHORIZATION {
                return Err(ResolveError::Fetcher(
                    "use with_auth_token or with_basic_auth for authorization".to_string(),
                ));
            }
            let value = HeaderValue::from_str(value)
                .map_err(|e| ResolveError::Fetcher(format!("Invalid header value: {}", e)))?;
            headers.insert(name, value);
        }

        let mut client = Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            client = client.timeout(timeout);
        }
        let client = client
            .build()
            .map_err(|e| ResolveError::Fetcher(format!("Failed to create HTTP client: {}", e)))?;

        Ok(HttpFetcher {
            origin: origin.trim_end_matches('/').to_string(),
            client,
            auth: self.auth,
        })
    }
}

impl Default for HttpFetcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
