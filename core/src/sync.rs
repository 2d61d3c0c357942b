// hamper/src/sync.rs

//! Cross-tab synchronization: keeps multiple store handles on the same
//! shared storage eventually consistent. Replace, not merge — the last
//! writer's persisted snapshot wins, by explicit design choice. A 4-hour
//! shopping cart does not justify a merge protocol.

use crate::store::cart::CartStore;
use crate::storage::hub::StorageEvent;
use std::sync::Arc;
use tracing::{event, Level};

pub struct CrossTabSync;

impl CrossTabSync {
  /// Subscribes the store to cart-key changes on its shared storage. On a
  /// change from a foreign tab, and only while this store is authenticated,
  /// the store reloads from persistence, replacing its in-memory state.
  ///
  /// The listener holds a weak reference; once every `CartStore` clone is
  /// dropped it signals the hub to remove it on the next dispatch.
  pub fn attach(store: &CartStore) {
    let weak = Arc::downgrade(&store.inner);
    let shared = store.shared().clone();

    shared.subscribe(Arc::new(move |ev: &StorageEvent| {
      let Some(inner) = weak.upgrade() else {
        return false;
      };
      let store = CartStore::from_inner(inner);

      if ev.key != store.config().cart_key {
        return true;
      }
      if ev.origin == store.tab() {
        return true;
      }
      if !store.auth_state().is_authenticated() {
        event!(Level::TRACE, tab = %store.tab(), "Foreign cart change ignored: no session.");
        return true;
      }

      event!(
        Level::DEBUG,
        tab = %store.tab(),
        origin = %ev.origin,
        "Foreign cart change; reloading from persistence (last write wins)."
      );
      // No persist-back: the receiving tab must not echo a write, or two
      // tabs would ping-pong storage events.
      store.load_from_persistence(false);
      true
    }));
  }
}
