// core/examples/quota_pressure.rs

//! Demonstrates quota degradation: a tiny-capacity backend, one progressive
//! cleanup pass, and the in-memory fallback keeping the tab usable.
//!
//! Run with: `cargo run --example quota_pressure`

use hamper::{
  AuthState, CartConfig, CartStore, MemoryBackend, PriceType, SelectionKey, Selections, ServiceCatalog, ServiceId,
  ServiceKind, ServiceRecord, SharedStorage, StaffService, StorageBackend, VendorIdentity,
};
use std::sync::Arc;

fn staffing() -> ServiceRecord {
  ServiceRecord {
    id: ServiceId::new("svc-staff"),
    name: "Event Staff".to_string(),
    kind: ServiceKind::Staff,
    price: 35.0,
    price_type: PriceType::PerHour,
    vendor: VendorIdentity {
      id: "vendor-2".to_string(),
      display_name: "Front of House Co".to_string(),
    },
    description: None,
    image_urls: vec![],
    details: ServiceCatalog::Staff(vec![StaffService {
      id: "server".to_string(),
      name: "Server".to_string(),
      price: 35.0,
      price_type: PriceType::PerHour,
      minimum_hours: 2,
      description: None,
      certifications: vec![],
    }]),
    rating: None,
    review_count: None,
  }
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
    .init();

  // Capacity fits either the image cache junk or the cart, not both.
  let backend = Arc::new(MemoryBackend::with_capacity(2048));
  backend
    .write("image-cache:hero", &"x".repeat(1800))
    .expect("junk fits on its own");

  let shared = SharedStorage::new(backend.clone());
  let store = CartStore::new(CartConfig::default(), shared.clone());
  store.set_auth_state(AuthState::Authenticated);

  // The first write attempt fails on quota; the cleanup pass evicts the
  // image cache and the single retry succeeds.
  let mut selections: Selections = Selections::new();
  selections.insert(SelectionKey::item_with_duration("server", 6), 4);
  store.add_item(&staffing(), selections);

  println!("cart count:         {}", store.count());
  println!("image cache entry:  {:?}", shared.read("image-cache:hero").unwrap());
  println!(
    "persisted cart:     {} bytes",
    shared.read("marketplace-cart").unwrap().map_or(0, |v| v.len())
  );
}
