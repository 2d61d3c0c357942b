// hamper/src/storage/cleanup.rs

//! Progressive cleanup: frees persisted space by evicting other cache
//! namespaces when a cart write fails on quota. The store runs one pass and
//! retries the failed write exactly once; it never loops.

use crate::storage::backend::StorageBackend;
use tracing::{event, Level};

/// Best-effort eviction over the shared storage. Implementations must never
/// touch the keys listed in `protected`.
pub trait CleanupPolicy: Send + Sync {
  /// Runs one eviction pass and returns the number of entries removed.
  fn run(&self, backend: &dyn StorageBackend) -> usize;
}

/// Evicts keys under configured cache-namespace prefixes, in the configured
/// order (least-recently-useful namespaces first). The cart key and the
/// booking backup key are passed in as protected and are never evicted.
pub struct NamespaceCleanup {
  prefixes: Vec<String>,
  protected: Vec<String>,
}

impl NamespaceCleanup {
  pub fn new(prefixes: Vec<String>, protected: Vec<String>) -> Self {
    NamespaceCleanup { prefixes, protected }
  }
}

impl CleanupPolicy for NamespaceCleanup {
  fn run(&self, backend: &dyn StorageBackend) -> usize {
    let mut evicted = 0usize;
    for prefix in &self.prefixes {
      for key in backend.keys() {
        if !key.starts_with(prefix.as_str()) {
          continue;
        }
        if self.protected.iter().any(|p| p == &key) {
          continue;
        }
        match backend.remove(&key) {
          Ok(()) => {
            evicted += 1;
            event!(Level::DEBUG, key, namespace = %prefix, "Evicted cache entry to free quota.");
          }
          Err(err) => {
            event!(Level::WARN, key, error = %err, "Failed to evict cache entry; continuing.");
          }
        }
      }
    }
    event!(Level::INFO, evicted, "Progressive cleanup pass finished.");
    evicted
  }
}

/// A policy that evicts nothing. Useful when the embedding application has
/// no evictable namespaces.
pub struct NoopCleanup;

impl CleanupPolicy for NoopCleanup {
  fn run(&self, _backend: &dyn StorageBackend) -> usize {
    0
  }
}
