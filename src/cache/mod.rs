//! Local fallback cache for remote word lists.
//!
//! This module provides a domain-agnostic caching mechanism that:
//! - Stores the last successfully fetched copy of each resource as a YAML file
//! - Always tries the network first and refreshes the cache on success
//! - Falls back to the cached copy exactly once when the network fails

mod layer;
mod storage;
mod traits;

pub use layer::CacheLayer;
pub use storage::{CacheError, CacheStorage, YamlFileStorage};
#[cfg(test)]
pub(crate) use traits::CacheSource;
pub use traits::{Resource, Retrieval};
