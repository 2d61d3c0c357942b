// hamper/src/storage/hub.rs

//! `SharedStorage`: one persisted key/value store fanned out to every store
//! handle ("tab") of the same profile, with change notifications carrying
//! the writing tab's identity. This is the stand-in for the browser's
//! storage-change event: a tab sees changes made by other tabs, never its own.

use crate::storage::backend::{StorageBackend, StorageError};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{event, Level};

/// Identity of one store handle. Each handle attached to a `SharedStorage`
/// gets a distinct id so it can ignore its own writes during sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(u64);

impl std::fmt::Display for TabId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "tab-{}", self.0)
  }
}

/// A key-level change notification, delivered to every registered listener
/// after the underlying write/remove has completed.
#[derive(Debug, Clone)]
pub struct StorageEvent {
  pub key: String,
  pub origin: TabId,
}

/// Returns whether the listener wants to stay registered. A `false` return
/// drops it from the hub, so listeners backed by weak references can detach
/// themselves once their owner is gone.
type StorageListener = Arc<dyn Fn(&StorageEvent) -> bool + Send + Sync>;

/// Shared persisted storage plus the listener fan-out.
pub struct SharedStorage {
  backend: Arc<dyn StorageBackend>,
  listeners: Mutex<Vec<StorageListener>>,
  next_tab: AtomicU64,
}

impl SharedStorage {
  pub fn new(backend: Arc<dyn StorageBackend>) -> Arc<Self> {
    Arc::new(SharedStorage {
      backend,
      listeners: Mutex::new(Vec::new()),
      next_tab: AtomicU64::new(1),
    })
  }

  /// Allocates a distinct identity for a new store handle.
  pub fn allocate_tab(&self) -> TabId {
    TabId(self.next_tab.fetch_add(1, Ordering::Relaxed))
  }

  /// Direct access to the backend, for cleanup passes.
  pub fn backend(&self) -> &Arc<dyn StorageBackend> {
    &self.backend
  }

  /// Writes through to the backend and, on success, notifies listeners with
  /// the writing tab's identity.
  pub fn write_as(&self, origin: TabId, key: &str, value: &str) -> Result<(), StorageError> {
    self.backend.write(key, value)?;
    self.notify(&StorageEvent {
      key: key.to_string(),
      origin,
    });
    Ok(())
  }

  /// Removes the key and notifies listeners. Removal of an absent key still
  /// notifies; listeners reload from persistence and see the same absence.
  pub fn remove_as(&self, origin: TabId, key: &str) -> Result<(), StorageError> {
    self.backend.remove(key)?;
    self.notify(&StorageEvent {
      key: key.to_string(),
      origin,
    });
    Ok(())
  }

  pub fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
    self.backend.read(key)
  }

  /// Registers a change listener. Listeners are invoked after the write
  /// completes, outside the listener-list lock, so a listener may itself
  /// read from (or write to) this storage. A listener that returns `false`
  /// is removed and never invoked again.
  pub fn subscribe(&self, listener: StorageListener) {
    self.listeners.lock().push(listener);
  }

  /// Number of currently registered listeners.
  pub fn listener_count(&self) -> usize {
    self.listeners.lock().len()
  }

  fn notify(&self, ev: &StorageEvent) {
    let listeners: Vec<StorageListener> = self.listeners.lock().iter().cloned().collect();
    event!(
      Level::TRACE,
      key = %ev.key,
      origin = %ev.origin,
      listener_count = listeners.len(),
      "Dispatching storage change notification."
    );
    let mut dead: Vec<StorageListener> = Vec::new();
    for listener in &listeners {
      if !listener(ev) {
        dead.push(listener.clone());
      }
    }
    if !dead.is_empty() {
      event!(Level::DEBUG, removed = dead.len(), "Dropping detached storage listeners.");
      self
        .listeners
        .lock()
        .retain(|l| !dead.iter().any(|d| Arc::ptr_eq(d, l)));
    }
  }
}
