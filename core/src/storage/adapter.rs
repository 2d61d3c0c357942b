// hamper/src/storage/adapter.rs

//! `StorageAdapter`: the quota-safe wrapper every cart store write/read goes
//! through. Failures never escape as errors; writes report success as a
//! boolean and the adapter keeps the last known-good serialized cart in an
//! explicit in-memory fallback slot for the lifetime of the process.

use crate::storage::hub::{SharedStorage, TabId};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{event, Level};

pub struct StorageAdapter {
  shared: Arc<SharedStorage>,
  tab: TabId,
  /// Last known-good serialized cart, populated when a persisted write fails
  /// even after cleanup. Owned here, not module-global, so it can be reset
  /// and tested in isolation.
  fallback: Mutex<Option<String>>,
}

impl StorageAdapter {
  pub fn new(shared: Arc<SharedStorage>) -> Self {
    let tab = shared.allocate_tab();
    StorageAdapter {
      shared,
      tab,
      fallback: Mutex::new(None),
    }
  }

  pub fn tab(&self) -> TabId {
    self.tab
  }

  pub fn shared(&self) -> &Arc<SharedStorage> {
    &self.shared
  }

  /// Attempts the underlying write. Returns whether it succeeded; quota
  /// rejections and backend failures are logged, never raised.
  pub fn try_write(&self, key: &str, value: &str) -> bool {
    match self.shared.write_as(self.tab, key, value) {
      Ok(()) => true,
      Err(err) if err.is_quota_exceeded() => {
        event!(Level::WARN, key, error = %err, "Persisted write rejected: quota exceeded.");
        false
      }
      Err(err) => {
        event!(Level::WARN, key, error = %err, "Persisted write failed.");
        false
      }
    }
  }

  /// Reads the raw stored value. Deserialization failures are the caller's
  /// concern; a read failure at the backend is treated as absence.
  pub fn read(&self, key: &str) -> Option<String> {
    match self.shared.read(key) {
      Ok(value) => value,
      Err(err) => {
        event!(Level::WARN, key, error = %err, "Persisted read failed; treating key as absent.");
        None
      }
    }
  }

  /// Removes the key. Best-effort; failures are logged and swallowed.
  pub fn remove(&self, key: &str) {
    if let Err(err) = self.shared.remove_as(self.tab, key) {
      event!(Level::WARN, key, error = %err, "Persisted remove failed.");
    }
  }

  /// Stores the last known-good serialized cart in the in-memory slot.
  pub fn stash_fallback(&self, value: String) {
    *self.fallback.lock() = Some(value);
  }

  pub fn fallback(&self) -> Option<String> {
    self.fallback.lock().clone()
  }

  pub fn clear_fallback(&self) {
    *self.fallback.lock() = None;
  }
}
