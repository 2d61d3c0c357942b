// core/examples/basic_cart.rs

//! Add/merge/update/clear walkthrough against an in-memory backend.
//!
//! Run with: `cargo run --example basic_cart`

use hamper::{
  AuthState, CartConfig, CartStore, MemoryBackend, MenuItem, PriceType, SelectionKey, Selections, ServiceCatalog,
  ServiceId, ServiceKind, ServiceRecord, SharedStorage, VendorIdentity,
};
use std::sync::Arc;

fn taco_catering() -> ServiceRecord {
  ServiceRecord {
    id: ServiceId::new("svc-tacos"),
    name: "Taco Night Catering".to_string(),
    kind: ServiceKind::Catering,
    price: 250.0,
    price_type: PriceType::Fixed,
    vendor: VendorIdentity {
      id: "vendor-9".to_string(),
      display_name: "La Cocina".to_string(),
    },
    description: Some("Street-style tacos for up to 80 guests".to_string()),
    image_urls: vec!["tacos-hero.jpg".to_string()],
    details: ServiceCatalog::Catering(vec![MenuItem {
      id: "al-pastor".to_string(),
      name: "Al Pastor".to_string(),
      price: 4.5,
      price_type: PriceType::PerUnit,
      category: "tacos".to_string(),
      is_combo: false,
      combo_category_ids: vec![],
      description: Some("Marinated pork, pineapple, cilantro".to_string()),
      image_urls: vec![],
      combo_items: vec![],
      popularity_score: None,
    }]),
    rating: Some(4.9),
    review_count: Some(87),
  }
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
    .init();

  let shared = SharedStorage::new(Arc::new(MemoryBackend::new()));
  let store = CartStore::new(CartConfig::default(), shared);

  // The session resolves; the (empty) persisted cart is loaded.
  store.set_auth_state(AuthState::Authenticated);

  let mut selections: Selections = Selections::new();
  selections.insert(SelectionKey::item("al-pastor"), 30);
  let outcome = store.add_item(&taco_catering(), selections);
  println!("first add: {:?}, count = {}", outcome, store.count());

  // Re-adding the same service merges instead of duplicating.
  let mut more: Selections = Selections::new();
  more.insert(SelectionKey::item("al-pastor"), 45);
  let outcome = store.add_item(&taco_catering(), more);
  println!(
    "second add: {:?}, count = {}, selections = {:?}",
    outcome,
    store.count(),
    store.selections_for(&ServiceId::new("svc-tacos"))
  );

  // Unconfirmed clears are guarded no-ops.
  println!("clear(false): {:?}, count = {}", store.clear(false), store.count());
  println!("clear(true):  {:?}, count = {}", store.clear(true), store.count());
}
