//! Cache layer that orchestrates caching logic with network fetching.

use std::fmt::Display;
use std::future::Future;

use tracing::{debug, warn};

use super::storage::{CacheError, CacheStorage};
use super::traits::{Resource, Retrieval};

/// Both halves of a failed retrieval.
#[derive(Debug)]
pub struct Miss<E> {
  /// Why the network fetch failed
  pub fetch: E,
  /// Why the cache could not stand in
  pub cache: CacheError,
}

/// Cache layer that manages fallback between the network and local storage.
///
/// Unlike a cache-first layer, the network is always tried first. The cache
/// is only consulted when the fetch fails, and is refreshed on every success.
pub struct CacheLayer<S: CacheStorage> {
  storage: S,
}

impl<S: CacheStorage> CacheLayer<S> {
  /// Create a new cache layer with the given storage backend.
  pub fn new(storage: S) -> Self {
    Self { storage }
  }

  /// Fetch with a one-shot cache fallback.
  ///
  /// 1. Run the fetcher
  /// 2. On success, overwrite the cache entry for `key` and return the data
  /// 3. On failure, return the cached entry for `key` if one exists
  /// 4. Otherwise report both failures
  ///
  /// A failed cache write is logged and does not affect the result.
  pub async fn fetch<T, E, F, Fut>(&self, key: &str, fetcher: F) -> Retrieval<T, Miss<E>>
  where
    T: Resource,
    E: Display,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
  {
    match fetcher().await {
      Ok(data) => {
        if self.storage.write(key, &data) {
          debug!(key, kind = T::kind(), "cache refreshed");
        }
        Retrieval::Fetched(data)
      }
      Err(fetch) => {
        warn!(key, kind = T::kind(), "fetch failed, falling back to cache: {}", fetch);
        match self.storage.read::<T>(key) {
          Ok(data) => Retrieval::CachedFallback(data),
          Err(cache) => Retrieval::Unavailable(Miss { fetch, cache }),
        }
      }
    }
  }
}
