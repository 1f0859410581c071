//! # config-overlay
//!
//! Two-tier runtime configuration resolution for web clients.
//!
//! ## Overview
//!
//! A deployment named `<name>` publishes two JSON documents:
//! - `/<name>/apps/config.json`: the required base configuration
//! - `/<name>/config.json`: an optional override, typically only present on
//!   developer machines
//!
//! `config-overlay` fetches both concurrently, overlays the override onto the
//! base (override wins on key collisions), injects the deployment name under
//! the `base` key, and hands the result to a single continuation. A missing
//! override silently degrades to the base alone; a missing base is fatal and
//! is reported once through an [`ErrorReporter`](core::ErrorReporter).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use config_overlay::prelude::*;
//! use config_overlay::sources::HttpFetcher;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct WebConfig {
//!     server: String,
//!     base: String,
//! }
//!
//! # async fn example() -> config_overlay::error::Result<()> {
//! let fetcher = HttpFetcher::builder()
//!     .with_origin("https://earthquake.example.gov")
//!     .build()?;
//!
//! let resolver = ConfigResolver::builder()
//!     .with_deployment_name("nshmp-haz-v2")
//!     .build(fetcher)?;
//!
//! resolver
//!     .resolve_config(|config| {
//!         let web: WebConfig = config.deserialize().unwrap();
//!         println!("Server {} under /{}", web.server, web.base);
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `http` (default): [`HttpFetcher`](sources::HttpFetcher) backed by `reqwest`

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod settings;
pub mod sources;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{ConfigResolver, ConfigResolverBuilder, ErrorReporter, ResolvedConfig};
    pub use crate::error::{ResolveError, Result};
    pub use crate::settings::ResolverSettings;
    pub use crate::sources::Fetcher;
}
