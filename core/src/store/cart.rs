// hamper/src/store/cart.rs

//! `CartStore`: the single source of truth for the in-memory cart list during
//! a session. All reads and writes to persistence go through it.
//!
//! The handle is cheaply clonable (`Arc` inner), so UI observers and the
//! cross-tab synchronizer can hold it without ownership gymnastics. Lock
//! guards are internal and never escape a method, and persistence runs after
//! the state lock is released.

use crate::auth::AuthState;
use crate::clock::{Clock, SystemClock};
use crate::config::CartConfig;
use crate::error::CartError;
use crate::model::line_item::{CartLineItem, Selections, StoredCartItem};
use crate::model::service::{ServiceId, ServiceRecord};
use crate::prune::prune_service;
use crate::storage::adapter::StorageAdapter;
use crate::storage::cleanup::{CleanupPolicy, NamespaceCleanup};
use crate::storage::hub::{SharedStorage, TabId};
use crate::store::outcome::{AddOutcome, ClearOutcome, UpdateOutcome};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{event, instrument, Level};

pub(crate) struct CartState {
  pub(crate) items: Vec<CartLineItem>,
  pub(crate) auth: AuthState,
}

pub(crate) struct StoreInner {
  pub(crate) config: CartConfig,
  pub(crate) clock: Arc<dyn Clock>,
  pub(crate) adapter: StorageAdapter,
  pub(crate) cleanup: Arc<dyn CleanupPolicy>,
  pub(crate) state: RwLock<CartState>,
  /// Monotonic "last changed" marker. Observers compare it to force a
  /// re-read independent of object identity.
  pub(crate) revision: AtomicU64,
}

/// Handle to one tab's cart store. Clones share the same underlying state.
#[derive(Clone)]
pub struct CartStore {
  pub(crate) inner: Arc<StoreInner>,
}

impl CartStore {
  /// Creates a store on the given shared storage with the system clock and
  /// the namespace cleanup policy from `config`.
  pub fn new(config: CartConfig, shared: Arc<SharedStorage>) -> Self {
    let cleanup = Arc::new(NamespaceCleanup::new(
      config.evictable_namespaces.clone(),
      vec![config.cart_key.clone(), config.backup_key.clone()],
    ));
    Self::with_parts(config, shared, Arc::new(SystemClock), cleanup)
  }

  /// Full constructor with explicit clock and cleanup policy seams.
  pub fn with_parts(
    config: CartConfig,
    shared: Arc<SharedStorage>,
    clock: Arc<dyn Clock>,
    cleanup: Arc<dyn CleanupPolicy>,
  ) -> Self {
    CartStore {
      inner: Arc::new(StoreInner {
        config,
        clock,
        adapter: StorageAdapter::new(shared),
        cleanup,
        state: RwLock::new(CartState {
          items: Vec::new(),
          auth: AuthState::Loading,
        }),
        revision: AtomicU64::new(0),
      }),
    }
  }

  pub(crate) fn from_inner(inner: Arc<StoreInner>) -> Self {
    CartStore { inner }
  }

  /// This handle's identity on the shared storage.
  pub fn tab(&self) -> TabId {
    self.inner.adapter.tab()
  }

  pub fn config(&self) -> &CartConfig {
    &self.inner.config
  }

  pub(crate) fn shared(&self) -> &Arc<SharedStorage> {
    self.inner.adapter.shared()
  }

  /// Current change marker. Strictly increases with every actual mutation.
  pub fn revision(&self) -> u64 {
    self.inner.revision.load(Ordering::SeqCst)
  }

  fn bump_revision(&self) {
    self.inner.revision.fetch_add(1, Ordering::SeqCst);
  }

  pub fn auth_state(&self) -> AuthState {
    self.inner.state.read().auth
  }

  // --- Auth gate -----------------------------------------------------------

  /// Applies an auth transition. Entering `Unauthenticated` wipes the cart
  /// and deletes the persisted keys unconditionally; entering `Authenticated`
  /// loads the persisted cart (migrating and expiry-filtering it). Repeated
  /// `Authenticated` signals (token refresh) have no cart side effects.
  #[instrument(name = "CartStore::set_auth_state", skip(self), fields(tab = %self.tab()))]
  pub fn set_auth_state(&self, next: AuthState) {
    let prev = self.inner.state.read().auth;
    if prev == next {
      event!(Level::TRACE, ?next, "Auth state unchanged; no cart side effects.");
      return;
    }

    match next {
      AuthState::Loading => {
        self.inner.state.write().auth = AuthState::Loading;
      }
      AuthState::Unauthenticated => {
        {
          let mut state = self.inner.state.write();
          state.auth = AuthState::Unauthenticated;
          state.items.clear();
        }
        self.inner.adapter.remove(&self.inner.config.cart_key);
        self.inner.adapter.remove(&self.inner.config.backup_key);
        self.inner.adapter.clear_fallback();
        self.bump_revision();
        event!(Level::INFO, "Session ended; cart wiped and persisted keys deleted.");
      }
      AuthState::Authenticated => {
        self.inner.state.write().auth = AuthState::Authenticated;
        self.load_from_persistence(true);
      }
    }
  }

  // --- Mutations -----------------------------------------------------------

  /// Adds a service to the cart, or merges selections into the existing line
  /// item for the same service id. An expired line item counts as absent:
  /// re-adding replaces it with a fresh item on a new expiry window.
  /// Requires an authenticated session.
  #[instrument(name = "CartStore::add_item", skip_all, fields(service_id = %record.id, tab = %self.tab()))]
  pub fn add_item(&self, record: &ServiceRecord, selections: Selections) -> AddOutcome {
    match self.auth_state() {
      AuthState::Loading => {
        event!(Level::DEBUG, "Session still resolving; add deferred.");
        return AddOutcome::Deferred;
      }
      AuthState::Unauthenticated => {
        event!(Level::WARN, error = %CartError::UnauthenticatedMutation, "Add ignored; prompt the user to sign in.");
        return AddOutcome::RequiresAuthentication;
      }
      AuthState::Authenticated => {}
    }

    let now = self.inner.clock.now();
    let outcome;
    let snapshot = {
      let mut state = self.inner.state.write();
      if let Some(existing) = state
        .items
        .iter_mut()
        .find(|item| item.service_id() == &record.id && !item.is_expired(now))
      {
        existing.merge_selections(&selections);
        event!(Level::DEBUG, "Service already in cart; selections merged.");
        outcome = AddOutcome::Merged;
      } else {
        // An expired row for the same service is absent to every read;
        // drop it rather than merging into it or re-persisting it.
        state.items.retain(|item| item.service_id() != &record.id);
        let item = CartLineItem::new(prune_service(record), now, self.inner.config.item_ttl, selections);
        state.items.push(item);
        event!(Level::DEBUG, "New line item appended.");
        outcome = AddOutcome::Added;
      }
      stored_snapshot(&state.items)
    };

    self.bump_revision();
    self.persist(&snapshot);
    outcome
  }

  /// Removes the line item with that service id, if present. Idempotent.
  #[instrument(name = "CartStore::remove_item", skip(self), fields(service_id = %service_id, tab = %self.tab()))]
  pub fn remove_item(&self, service_id: &ServiceId) {
    let snapshot = {
      let mut state = self.inner.state.write();
      let before = state.items.len();
      state.items.retain(|item| item.service_id() != service_id);
      if state.items.len() == before {
        event!(Level::DEBUG, "Service not in cart; remove is a no-op.");
        return;
      }
      stored_snapshot(&state.items)
    };

    self.bump_revision();
    self.persist(&snapshot);
  }

  /// Replaces the selections map for that line item.
  ///
  /// Value-equal input short-circuits: the existing map is kept as-is, the
  /// revision marker does not move, and no persistence write happens. This is
  /// a correctness requirement (identity stability for observers), not an
  /// optimization.
  #[instrument(name = "CartStore::update_selections", skip(self, selections), fields(service_id = %service_id, tab = %self.tab()))]
  pub fn update_selections(&self, service_id: &ServiceId, selections: Selections) -> UpdateOutcome {
    let now = self.inner.clock.now();
    let snapshot = {
      let mut state = self.inner.state.write();
      let Some(item) = state
        .items
        .iter_mut()
        .find(|item| item.service_id() == service_id && !item.is_expired(now))
      else {
        event!(Level::DEBUG, "Service not in cart; update is a no-op.");
        return UpdateOutcome::NotInCart;
      };

      if item.selected_items == selections {
        event!(Level::TRACE, "Selections value-equal; short-circuiting.");
        return UpdateOutcome::Unchanged;
      }

      item.selected_items = selections;
      stored_snapshot(&state.items)
    };

    self.bump_revision();
    self.persist(&snapshot);
    UpdateOutcome::Updated
  }

  /// Destructive full-cart wipe. Executes only when `confirmed` is true; an
  /// unconfirmed call is a guarded no-op so incidental code paths (e.g. a
  /// navigation side effect) cannot empty the cart.
  #[instrument(name = "CartStore::clear", skip(self), fields(tab = %self.tab()))]
  pub fn clear(&self, confirmed: bool) -> ClearOutcome {
    if !confirmed {
      event!(Level::WARN, error = %CartError::UnconfirmedClear, "Clear ignored.");
      return ClearOutcome::Ignored;
    }
    if matches!(self.auth_state(), AuthState::Loading) {
      event!(Level::DEBUG, "Session still resolving; clear deferred and ignored.");
      return ClearOutcome::Ignored;
    }

    self.inner.state.write().items.clear();
    self.inner.adapter.remove(&self.inner.config.cart_key);
    self.inner.adapter.remove(&self.inner.config.backup_key);
    self.inner.adapter.clear_fallback();
    self.bump_revision();
    event!(Level::INFO, "Cart cleared; persisted cart and booking backup deleted.");
    ClearOutcome::Cleared
  }

  // --- Reads (all lazily expiry-filtered) ----------------------------------

  /// Expiry-filtered snapshot of the line items, for checkout flows.
  pub fn items(&self) -> Vec<CartLineItem> {
    let now = self.inner.clock.now();
    let state = self.inner.state.read();
    state.items.iter().filter(|item| !item.is_expired(now)).cloned().collect()
  }

  /// Number of (unexpired) line items.
  pub fn count(&self) -> usize {
    let now = self.inner.clock.now();
    let state = self.inner.state.read();
    state.items.iter().filter(|item| !item.is_expired(now)).count()
  }

  pub fn has_started_order(&self) -> bool {
    self.count() > 0
  }

  /// Membership check by service id.
  pub fn contains(&self, service_id: &ServiceId) -> bool {
    let now = self.inner.clock.now();
    let state = self.inner.state.read();
    state
      .items
      .iter()
      .any(|item| item.service_id() == service_id && !item.is_expired(now))
  }

  /// Current selections for that service id; empty if absent. Pure read.
  pub fn selections_for(&self, service_id: &ServiceId) -> Selections {
    let now = self.inner.clock.now();
    let state = self.inner.state.read();
    state
      .items
      .iter()
      .find(|item| item.service_id() == service_id && !item.is_expired(now))
      .map(|item| item.selected_items.clone())
      .unwrap_or_default()
  }
}

/// Projects the in-memory list to its wire form.
pub(crate) fn stored_snapshot(items: &[CartLineItem]) -> Vec<StoredCartItem> {
  items.iter().map(StoredCartItem::from).collect()
}
