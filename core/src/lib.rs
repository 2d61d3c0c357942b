// src/lib.rs

//! Hamper: an authentication-gated, quota-aware client cart store.
//!
//! Hamper holds a shopping cart (selected marketplace services plus their
//! sub-item selections) with:
//!  - Absolute 4-hour line-item expiry, evaluated lazily on every read.
//!  - Merge-on-re-add: one line item per service id, selections overlaid.
//!  - Pruned persistence: only the fields needed to redisplay a cart row and
//!    recompute a price are written, bounding entry size.
//!  - Quota-aware writes: a failed write triggers one progressive cleanup
//!    pass and one retry, then degrades to an in-memory fallback.
//!  - Cross-tab synchronization with last-write-wins replacement.
//!  - An auth gate coupling cart lifetime to session lifetime.

// Declare modules according to the planned structure
pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod prune;
pub mod storage;
pub mod store;
pub mod sync;

// --- Re-exports for the Public API ---

// Core types that users will interact with frequently
pub use crate::auth::AuthState;
pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::config::CartConfig;
pub use crate::model::line_item::{CartLineItem, SelectionKey, Selections, StoredCartItem};
pub use crate::model::service::{
  MenuItem, PriceType, RentalItem, ServiceCatalog, ServiceDetails, ServiceId, ServiceKind, ServiceRecord,
  ServiceSnapshot, StaffService, VendorIdentity, VenueOption,
};
pub use crate::prune::prune_service;

// The main store handle and its outcome signals
pub use crate::store::cart::CartStore;
pub use crate::store::outcome::{AddOutcome, ClearOutcome, UpdateOutcome, WriteOutcome};

// Storage seams: backend trait, shared hub, cleanup policy
pub use crate::storage::backend::{MemoryBackend, StorageBackend, StorageError};
pub use crate::storage::cleanup::{CleanupPolicy, NamespaceCleanup, NoopCleanup};
pub use crate::storage::hub::{SharedStorage, StorageEvent, TabId};

pub use crate::sync::CrossTabSync;

pub use crate::error::{CartError, CartResult};

/*
    Core Workflow:
    1. Wrap a `StorageBackend` in a `SharedStorage` (one per browser profile).
    2. Create a `CartStore` per tab with `CartStore::new(config, shared)`.
    3. Attach `CrossTabSync::attach(&store)` if other tabs share the storage.
    4. Drive the auth gate: `store.set_auth_state(AuthState::Authenticated)`
       once the session resolves (this loads and migrates the persisted cart).
    5. Mutate with `add_item` / `update_selections` / `remove_item` /
       `clear(true)`; observe with `count`, `contains`, `selections_for`,
       `items`, and the monotonic `revision()` marker.
*/
