// hamper/src/store/persistence.rs

//! Persistence paths of the cart store: the quota-aware write (cleanup pass
//! plus exactly one retry, then in-memory fallback) and the load (migration,
//! corruption recovery, lazy expiry sweep).

use crate::error::CartError;
use crate::model::line_item::{CartLineItem, StoredCartItem};
use crate::store::cart::{stored_snapshot, CartStore};
use crate::store::migration::parse_and_migrate;
use crate::store::outcome::WriteOutcome;
use std::sync::atomic::Ordering;
use tracing::{event, instrument, Level};

impl CartStore {
  /// Writes the given snapshot under the cart key.
  ///
  /// On a failed first attempt the cleanup policy runs once and the write is
  /// retried exactly once. A second failure stashes the serialized cart in
  /// the in-memory fallback and stops: repeated failures must not turn into
  /// retry loops. Never raises; the outcome says what happened.
  #[instrument(name = "CartStore::persist", skip_all, fields(tab = %self.tab(), item_count = snapshot.len()))]
  pub(crate) fn persist(&self, snapshot: &[StoredCartItem]) -> WriteOutcome {
    let key = &self.inner.config.cart_key;

    let serialized = match serde_json::to_string(snapshot) {
      Ok(json) => json,
      Err(err) => {
        // Only non-finite floats can land here; the cart stays usable in
        // memory for the rest of the session.
        event!(Level::ERROR, error = %err, "Cart snapshot failed to serialize; keeping in-memory only.");
        return WriteOutcome::MemoryOnly;
      }
    };

    if self.inner.adapter.try_write(key, &serialized) {
      self.inner.adapter.clear_fallback();
      return WriteOutcome::Persisted;
    }

    let evicted = self.inner.cleanup.run(self.shared().backend().as_ref());
    event!(Level::INFO, evicted, "Write failed; ran cleanup pass, retrying once.");

    if self.inner.adapter.try_write(key, &serialized) {
      self.inner.adapter.clear_fallback();
      return WriteOutcome::PersistedAfterCleanup;
    }

    event!(
      Level::WARN,
      "Storage incomplete: cart held in memory only. It will not survive a reload or reach other tabs."
    );
    self.inner.adapter.stash_fallback(serialized);
    WriteOutcome::MemoryOnly
  }

  /// Loads the persisted cart into memory, replacing the in-memory list.
  ///
  /// Corrupt data is logged, deleted, and treated as an empty cart. Expired
  /// entries are dropped. When `persist_back` is set, a load that migrated
  /// or dropped anything writes the cleaned snapshot back; the cross-tab
  /// synchronizer passes `false` so receiving tabs never echo writes.
  #[instrument(name = "CartStore::load_from_persistence", skip(self), fields(tab = %self.tab()))]
  pub(crate) fn load_from_persistence(&self, persist_back: bool) {
    let key = self.inner.config.cart_key.clone();
    let raw = self.inner.adapter.read(&key).or_else(|| {
      // A fresh handle in a tab whose writes never reached storage still
      // gets the last known-good cart for this process.
      self.inner.adapter.fallback()
    });

    let items: Vec<CartLineItem> = match raw {
      None => Vec::new(),
      Some(raw) => match parse_and_migrate(&key, &raw) {
        Ok((stored, migrated)) => {
          let now = self.inner.clock.now();
          let total = stored.len();
          let live: Vec<CartLineItem> = stored
            .into_iter()
            .map(CartLineItem::from)
            .filter(|item| !item.is_expired(now))
            .collect();
          let dropped = total - live.len();
          if dropped > 0 {
            event!(Level::INFO, dropped, "Dropped expired cart entries on load.");
          }
          if persist_back && (migrated || dropped > 0) {
            self.persist(&stored_snapshot(&live));
          }
          live
        }
        Err(err @ CartError::CorruptPersistedData { .. }) => {
          event!(Level::WARN, error = %err, "Corrupt persisted cart; deleting and treating as empty.");
          self.inner.adapter.remove(&key);
          Vec::new()
        }
        Err(err) => {
          event!(Level::WARN, error = %err, "Unexpected load failure; treating cart as empty.");
          Vec::new()
        }
      },
    };

    self.inner.state.write().items = items;
    self.inner.revision.fetch_add(1, Ordering::SeqCst);
  }
}
