// tests/quota_tests.rs
mod common;

use common::*;
use hamper::{AuthState, CartStore, ManualClock, ServiceId, SharedStorage, StorageBackend, UpdateOutcome};
use serial_test::serial;
use std::sync::Arc;

fn store_on_backend(backend: Arc<RecordingBackend>) -> (CartStore, Arc<SharedStorage>) {
  let shared = SharedStorage::new(backend);
  let clock = Arc::new(ManualClock::new(test_epoch()));
  let store = store_on(&shared, &clock);
  (store, shared)
}

#[test]
#[serial]
fn test_cart_stays_usable_when_every_write_fails() {
  setup_tracing();
  let backend = Arc::new(RecordingBackend::new());
  backend.set_fail_writes(true);
  let (store, shared) = store_on_backend(backend.clone());
  store.set_auth_state(AuthState::Authenticated);
  let id = ServiceId::new("svc-cater");

  // Simulated quota exhaustion: every persisted write fails, but the
  // in-memory view stays correct for the rest of the session.
  store.add_item(&catering_service("svc-cater"), selections(&[("menu-0", 2)]));
  assert_eq!(store.count(), 1);
  assert!(store.contains(&id));

  assert_eq!(
    store.update_selections(&id, selections(&[("menu-0", 5)])),
    UpdateOutcome::Updated
  );
  assert_eq!(store.selections_for(&id), selections(&[("menu-0", 5)]));

  store.add_item(&staff_service("svc-staff"), selections(&[("server", 1)]));
  assert_eq!(store.count(), 2);

  store.remove_item(&id);
  assert_eq!(store.count(), 1);
  assert!(store.contains(&ServiceId::new("svc-staff")));

  // Nothing reached persistence.
  assert_eq!(shared.read("marketplace-cart").unwrap(), None);
}

#[test]
#[serial]
fn test_failed_write_retries_exactly_once() {
  setup_tracing();
  let backend = Arc::new(RecordingBackend::new());
  backend.set_fail_writes(true);
  let (store, _shared) = store_on_backend(backend.clone());
  store.set_auth_state(AuthState::Authenticated);

  let before = backend.attempts();
  store.add_item(&catering_service("svc-cater"), selections(&[("menu-0", 1)]));

  // One original attempt plus exactly one post-cleanup retry. No loops.
  assert_eq!(backend.attempts() - before, 2);
}

#[test]
#[serial]
fn test_cleanup_frees_space_for_the_single_retry() {
  setup_tracing();
  // Capacity fits either the junk cache entry or the cart, not both.
  let backend = Arc::new(RecordingBackend::with_capacity(4096));
  backend
    .write("image-cache:hero", &"j".repeat(3800))
    .expect("junk entry must fit on its own");
  let (store, shared) = store_on_backend(backend.clone());
  store.set_auth_state(AuthState::Authenticated);

  let before = backend.attempts();
  store.add_item(&rentals_service("svc-rentals"), selections(&[("chair-1", 40)]));

  // First attempt failed, the cleanup pass evicted the cache namespace,
  // and the retry landed.
  assert_eq!(backend.attempts() - before, 2);
  assert!(shared.read("image-cache:hero").unwrap().is_none());
  assert!(shared.read("marketplace-cart").unwrap().is_some());
  assert_eq!(store.count(), 1);
}

#[test]
#[serial]
fn test_cleanup_never_evicts_the_cart_or_backup_keys() {
  setup_tracing();
  let backend = Arc::new(RecordingBackend::new());
  let (store, shared) = store_on_backend(backend.clone());
  store.set_auth_state(AuthState::Authenticated);

  store.add_item(&catering_service("svc-cater"), selections(&[("menu-0", 1)]));
  backend.write("booking-state-backup", "{\"step\":3}").unwrap();
  backend.write("image-cache:a", "junk").unwrap();

  // Force the next persist through the cleanup path.
  backend.set_fail_writes(true);
  store.add_item(&staff_service("svc-staff"), selections(&[("server", 1)]));
  backend.set_fail_writes(false);

  assert!(shared.read("image-cache:a").unwrap().is_none());
  assert!(shared.read("booking-state-backup").unwrap().is_some());
  // The cart key survived the cleanup pass (it holds the pre-failure write).
  assert!(shared.read("marketplace-cart").unwrap().is_some());
}

#[test]
#[serial]
fn test_recovery_after_quota_pressure_ends() {
  setup_tracing();
  let backend = Arc::new(RecordingBackend::new());
  backend.set_fail_writes(true);
  let (store, shared) = store_on_backend(backend.clone());
  store.set_auth_state(AuthState::Authenticated);

  store.add_item(&catering_service("svc-cater"), selections(&[("menu-0", 1)]));
  assert_eq!(shared.read("marketplace-cart").unwrap(), None);

  // Quota pressure lifts; the next mutation persists the whole cart.
  backend.set_fail_writes(false);
  store.add_item(&staff_service("svc-staff"), selections(&[("server", 2)]));

  let raw = shared.read("marketplace-cart").unwrap().unwrap();
  assert!(raw.contains("svc-cater"));
  assert!(raw.contains("svc-staff"));
}

#[test]
#[serial]
fn test_fallback_feeds_a_reload_in_the_same_process() {
  setup_tracing();
  let backend = Arc::new(RecordingBackend::new());
  backend.set_fail_writes(true);
  let (store, _shared) = store_on_backend(backend.clone());
  store.set_auth_state(AuthState::Authenticated);

  store.add_item(&catering_service("svc-cater"), selections(&[("menu-0", 1)]));

  // Re-resolving the session with the persisted key absent falls back to
  // the last known-good in-memory snapshot.
  store.set_auth_state(AuthState::Loading);
  store.set_auth_state(AuthState::Authenticated);
  assert_eq!(store.count(), 1);
  assert!(store.contains(&ServiceId::new("svc-cater")));
}
