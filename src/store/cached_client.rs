//! Resource store that wraps a remote source with a fallback cache.

use color_eyre::Result;
use tracing::info;

use crate::cache::{CacheLayer, CacheStorage, Resource, Retrieval, YamlFileStorage};
use crate::config::Config;

use super::cache::CacheKey;
use super::client::{HttpSource, RemoteSource};
use super::types::{AnimalList, WordBook};
use super::{FetchError, StoreError};

/// Remote resource store with transparent cache fallback.
///
/// Every retrieval goes to the network first. A successful fetch refreshes
/// the cache; a failed one is served from the cache when possible.
pub struct CachedStore<R: RemoteSource, S: CacheStorage> {
  remote: R,
  cache: CacheLayer<S>,
}

impl CachedStore<HttpSource, YamlFileStorage> {
  /// Create a store fetching over HTTP and caching under the configured data dir.
  pub fn new(config: &Config) -> Result<Self> {
    let remote = HttpSource::new(config)?;
    let storage = YamlFileStorage::new(config.cache_dir());
    Ok(Self::with_parts(remote, storage))
  }
}

impl<R: RemoteSource, S: CacheStorage> CachedStore<R, S> {
  pub fn with_parts(remote: R, storage: S) -> Self {
    Self {
      remote,
      cache: CacheLayer::new(storage),
    }
  }

  #[cfg(test)]
  pub(crate) fn remote(&self) -> &R {
    &self.remote
  }

  /// Retrieve the resource at `stub`, reporting where the data came from.
  pub async fn retrieve<T: Resource>(&self, stub: &str) -> Retrieval<T, StoreError> {
    let key = match CacheKey::from_stub(stub) {
      Ok(key) => key,
      Err(err) => return Retrieval::Unavailable(err),
    };

    let remote = &self.remote;
    let result = self
      .cache
      .fetch(key.as_str(), move || async move {
        let body = remote.fetch(stub).await?;
        parse_resource::<T>(&body)
      })
      .await;

    if let Some(source) = result.source() {
      info!(stub, kind = T::kind(), ?source, "retrieved resource");
    }

    match result {
      Retrieval::Fetched(data) => Retrieval::Fetched(data),
      Retrieval::CachedFallback(data) => Retrieval::CachedFallback(data),
      Retrieval::Unavailable(miss) => Retrieval::Unavailable(StoreError::Unavailable {
        stub: stub.to_string(),
        fetch: miss.fetch,
        cache: miss.cache,
      }),
    }
  }

  /// Get the shared animal list.
  pub async fn animals(&self, stub: &str) -> Result<AnimalList, StoreError> {
    self.retrieve(stub).await.into_result()
  }

  /// Get a player's word book.
  pub async fn words(&self, stub: &str) -> Result<WordBook, StoreError> {
    self.retrieve(stub).await.into_result()
  }
}

fn parse_resource<T: Resource>(body: &str) -> Result<T, FetchError> {
  let resource: T = serde_yaml::from_str(body)?;
  resource.validate().map_err(FetchError::Invalid)?;
  Ok(resource)
}
