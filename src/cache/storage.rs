//! Cache storage trait and YAML file implementation.

use std::path::{Path, PathBuf};

use tracing::warn;

use super::traits::Resource;

/// Errors reading a cache entry.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
  /// No entry has ever been written for this key.
  #[error("no cache entry at {0}")]
  NotFound(PathBuf),

  #[error("failed to read cache entry {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse cache entry {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_yaml::Error,
  },

  /// The entry parsed but is missing data the generator needs.
  #[error("cache entry {path} is unusable: {reason}")]
  Invalid { path: PathBuf, reason: String },
}

/// Trait for cache storage backends.
pub trait CacheStorage: Send + Sync {
  /// Overwrite the entry for `key`. Failures are reported as `false`, never raised.
  fn write<T: Resource>(&self, key: &str, resource: &T) -> bool;

  /// Read the entry for `key`.
  fn read<T: Resource>(&self, key: &str) -> Result<T, CacheError>;
}

/// Cache storage with one YAML document per key.
pub struct YamlFileStorage {
  root: PathBuf,
}

impl YamlFileStorage {
  /// Create a storage rooted at `root`. The directory is created on first write.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  fn entry_path(&self, key: &str) -> PathBuf {
    self.root.join(format!("{}.yaml", key))
  }

  fn try_write<T: Resource>(&self, path: &Path, resource: &T) -> Result<(), String> {
    std::fs::create_dir_all(&self.root)
      .map_err(|e| format!("failed to create cache directory {}: {}", self.root.display(), e))?;
    let serialized =
      serde_yaml::to_string(resource).map_err(|e| format!("failed to serialize: {}", e))?;
    std::fs::write(path, serialized)
      .map_err(|e| format!("failed to write {}: {}", path.display(), e))
  }
}

impl CacheStorage for YamlFileStorage {
  fn write<T: Resource>(&self, key: &str, resource: &T) -> bool {
    let path = self.entry_path(key);
    match self.try_write(&path, resource) {
      Ok(()) => true,
      Err(err) => {
        warn!(key, "cache write failed: {}", err);
        false
      }
    }
  }

  fn read<T: Resource>(&self, key: &str) -> Result<T, CacheError> {
    let path = self.entry_path(key);
    let contents = match std::fs::read_to_string(&path) {
      Ok(contents) => contents,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        return Err(CacheError::NotFound(path));
      }
      Err(source) => return Err(CacheError::Io { path, source }),
    };

    let resource: T = match serde_yaml::from_str(&contents) {
      Ok(resource) => resource,
      Err(source) => return Err(CacheError::Parse { path, source }),
    };
    resource
      .validate()
      .map_err(|reason| CacheError::Invalid { path, reason })?;
    Ok(resource)
  }
}
