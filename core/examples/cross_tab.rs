// core/examples/cross_tab.rs

//! Two store handles ("tabs") on one shared storage, kept eventually
//! consistent with last-write-wins replacement.
//!
//! Run with: `cargo run --example cross_tab`

use hamper::{
  AuthState, CartConfig, CartStore, CrossTabSync, MemoryBackend, PriceType, SelectionKey, Selections, ServiceCatalog,
  ServiceId, ServiceKind, ServiceRecord, SharedStorage, VendorIdentity, VenueOption,
};
use std::sync::Arc;

fn venue(id: &str, name: &str) -> ServiceRecord {
  ServiceRecord {
    id: ServiceId::new(id),
    name: name.to_string(),
    kind: ServiceKind::Venues,
    price: 1200.0,
    price_type: PriceType::Fixed,
    vendor: VendorIdentity {
      id: "vendor-5".to_string(),
      display_name: "Northside Venues".to_string(),
    },
    description: None,
    image_urls: vec![],
    details: ServiceCatalog::Venues(vec![VenueOption {
      id: format!("{}-base", id),
      name: "Base booking".to_string(),
      price: 1200.0,
      price_type: PriceType::Fixed,
      description: None,
      image_urls: vec![],
      capacity: Some(120),
    }]),
    rating: None,
    review_count: None,
  }
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
    .init();

  let shared = SharedStorage::new(Arc::new(MemoryBackend::new()));

  let tab_a = CartStore::new(CartConfig::default(), shared.clone());
  let tab_b = CartStore::new(CartConfig::default(), shared.clone());
  CrossTabSync::attach(&tab_a);
  CrossTabSync::attach(&tab_b);

  tab_a.set_auth_state(AuthState::Authenticated);
  tab_b.set_auth_state(AuthState::Authenticated);

  let mut selections: Selections = Selections::new();
  selections.insert(SelectionKey::item("garden-base"), 1);
  tab_a.add_item(&venue("svc-garden", "Garden Venue"), selections);

  // Tab B saw A's write and merges its own addition onto A's snapshot.
  tab_b.add_item(&venue("svc-loft", "Downtown Loft"), Selections::new());

  println!("tab A count: {} (tab {})", tab_a.count(), tab_a.tab());
  println!("tab B count: {} (tab {})", tab_b.count(), tab_b.tab());
  println!("tab A sees loft:   {}", tab_a.contains(&ServiceId::new("svc-loft")));
  println!("tab B sees garden: {}", tab_b.contains(&ServiceId::new("svc-garden")));

  // Signing out in one tab deletes the persisted cart and empties the other.
  tab_b.set_auth_state(AuthState::Unauthenticated);
  println!("after B signs out, tab A count: {}", tab_a.count());
}
