//! Remote word-list store.

pub mod cache;
pub mod cached_client;
pub mod client;
pub mod types;

pub use cached_client::CachedStore;

use crate::cache::CacheError;

/// A failed network fetch. Recovered by falling back to the cache.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
  #[error("invalid resource URL '{url}': {source}")]
  Url {
    url: String,
    #[source]
    source: url::ParseError,
  },

  #[error("request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("{url} returned HTTP {status}")]
  Status { url: String, status: u16 },

  #[error("malformed document: {0}")]
  Parse(#[from] serde_yaml::Error),

  /// Parsed, but missing data the generator needs
  #[error("unusable document: {0}")]
  Invalid(String),
}

/// Errors surfaced by the resource store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("invalid resource stub '{stub}', expected '<share-id>/<name>'")]
  InvalidStub { stub: String },

  /// Neither the network nor the cache could provide the resource.
  #[error("no data available for '{stub}': fetch failed ({fetch}); cache unavailable ({cache})")]
  Unavailable {
    stub: String,
    fetch: FetchError,
    cache: CacheError,
  },
}
