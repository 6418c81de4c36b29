//! Core traits and types for the caching system.

use serde::{de::DeserializeOwned, Serialize};

/// Trait for documents that can be fetched remotely and cached on disk.
///
/// Implementors describe what a usable document looks like; anything that
/// fails validation is never cached and never handed to callers.
pub trait Resource: Clone + Serialize + DeserializeOwned {
  /// Check the document carries everything the generator needs.
  fn validate(&self) -> Result<(), String>;

  /// Resource kind name used in log output (e.g. "animals", "words")
  fn kind() -> &'static str;
}

/// Outcome of a remote-then-cache retrieval.
#[derive(Debug)]
pub enum Retrieval<T, E> {
  /// Fresh data from the network (cached unless the write failed)
  Fetched(T),
  /// Network failed, serving the last cached copy
  CachedFallback(T),
  /// Neither the network nor the cache could provide the data
  Unavailable(E),
}

impl<T, E> Retrieval<T, E> {
  /// Where the data came from, if any was found.
  pub fn source(&self) -> Option<CacheSource> {
    match self {
      Self::Fetched(_) => Some(CacheSource::Network),
      Self::CachedFallback(_) => Some(CacheSource::Offline),
      Self::Unavailable(_) => None,
    }
  }

  /// Collapse into a plain result, discarding where the data came from.
  pub fn into_result(self) -> Result<T, E> {
    match self {
      Self::Fetched(data) | Self::CachedFallback(data) => Ok(data),
      Self::Unavailable(err) => Err(err),
    }
  }
}

/// Indicates where retrieved data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
  /// Fresh data from network
  Network,
  /// Offline mode - network unavailable, serving cached data
  Offline,
}
