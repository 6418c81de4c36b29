//! Cache keys for remote resources.

use std::fmt;

use super::StoreError;

/// Stable cache key derived from a resource stub.
///
/// A stub looks like `"<share-id>/<name>"`; the key is the `<name>` segment,
/// so the same stub always maps to the same cache file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey(String);

impl CacheKey {
  pub fn from_stub(stub: &str) -> Result<Self, StoreError> {
    match stub.split('/').nth(1) {
      Some(name) if !name.trim().is_empty() && name != "." && name != ".." => {
        Ok(Self(name.to_string()))
      }
      _ => Err(StoreError::InvalidStub {
        stub: stub.to_string(),
      }),
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for CacheKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_key_is_second_segment() {
    let key = CacheKey::from_stub("s8d7f6g/animals").unwrap();
    assert_eq!(key.as_str(), "animals");
  }

  #[test]
  fn test_key_ignores_later_segments() {
    let key = CacheKey::from_stub("abc/alice/extra").unwrap();
    assert_eq!(key.as_str(), "alice");
  }

  #[test]
  fn test_key_is_stable_for_same_stub() {
    assert_eq!(
      CacheKey::from_stub("abc/alice").unwrap(),
      CacheKey::from_stub("abc/alice").unwrap()
    );
  }

  #[test]
  fn test_stub_without_name_segment_is_rejected() {
    assert!(matches!(
      CacheKey::from_stub("animals"),
      Err(StoreError::InvalidStub { .. })
    ));
    assert!(CacheKey::from_stub("abc/").is_err());
    assert!(CacheKey::from_stub("abc/..").is_err());
  }
}
