// hamper/src/storage/backend.rs

//! The storage backend seam: a persistent key/value store shared by every
//! tab of the same profile. `MemoryBackend` is the in-crate implementation,
//! capacity-bounded so quota exhaustion can be exercised deterministically.

use anyhow::Error as AnyhowError;
use parking_lot::Mutex;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
  #[error("Storage quota exceeded writing key '{key}' ({attempted_bytes} bytes)")]
  QuotaExceeded { key: String, attempted_bytes: usize },

  #[error("Storage backend failure. Source: {source}")]
  Backend {
    #[source]
    source: AnyhowError,
  },
}

impl StorageError {
  pub fn is_quota_exceeded(&self) -> bool {
    matches!(self, StorageError::QuotaExceeded { .. })
  }
}

/// Persistent key/value storage. Implementations must be safe to call from
/// multiple store handles; all calls are synchronous.
pub trait StorageBackend: Send + Sync {
  fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
  fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
  fn remove(&self, key: &str) -> Result<(), StorageError>;
  /// Snapshot of the currently stored keys, for cleanup passes.
  fn keys(&self) -> Vec<String>;
}

/// In-memory backend with an optional byte capacity. With a capacity set it
/// rejects writes that would exceed it, exactly like a browser origin that
/// has run out of storage quota.
pub struct MemoryBackend {
  entries: Mutex<HashMap<String, String>>,
  capacity_bytes: Option<usize>,
}

impl MemoryBackend {
  /// Unbounded backend.
  pub fn new() -> Self {
    MemoryBackend {
      entries: Mutex::new(HashMap::new()),
      capacity_bytes: None,
    }
  }

  /// Backend that rejects writes once the sum of stored key+value bytes
  /// would exceed `capacity_bytes`.
  pub fn with_capacity(capacity_bytes: usize) -> Self {
    MemoryBackend {
      entries: Mutex::new(HashMap::new()),
      capacity_bytes: Some(capacity_bytes),
    }
  }

  /// Total key+value bytes currently stored.
  pub fn used_bytes(&self) -> usize {
    let entries = self.entries.lock();
    entries.iter().map(|(k, v)| k.len() + v.len()).sum()
  }

  /// Number of stored entries.
  pub fn len(&self) -> usize {
    self.entries.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.lock().is_empty()
  }
}

impl Default for MemoryBackend {
  fn default() -> Self {
    Self::new()
  }
}

impl StorageBackend for MemoryBackend {
  fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
    let mut entries = self.entries.lock();
    if let Some(cap) = self.capacity_bytes {
      let used: usize = entries.iter().map(|(k, v)| k.len() + v.len()).sum();
      let existing = entries.get(key).map_or(0, |v| key.len() + v.len());
      let incoming = key.len() + value.len();
      if used - existing + incoming > cap {
        return Err(StorageError::QuotaExceeded {
          key: key.to_string(),
          attempted_bytes: incoming,
        });
      }
    }
    entries.insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
    Ok(self.entries.lock().get(key).cloned())
  }

  fn remove(&self, key: &str) -> Result<(), StorageError> {
    self.entries.lock().remove(key);
    Ok(())
  }

  fn keys(&self) -> Vec<String> {
    self.entries.lock().keys().cloned().collect()
  }
}
