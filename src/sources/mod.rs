//! Fetcher implementations.

mod directory;
mod fetcher;
mod memory;

#[cfg(feature = "http")]
mod http;

pub use directory::DirectoryFetcher;
pub use fetcher::{FailureKind, FetchFailure, FetchOutcome, Fetcher, Payload, fetch_all};
pub use memory::StaticFetcher;

#[cfg(feature = "http")]
pub use http::{HttpAuth, HttpFetcher, HttpFetcherBuilder};
