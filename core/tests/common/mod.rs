// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use chrono::{TimeZone, Utc};
use hamper::model::service::{MenuItem, RentalItem, StaffService, VenueOption};
use hamper::{
  CartConfig, CartStore, ManualClock, MemoryBackend, NamespaceCleanup, PriceType, SelectionKey, Selections,
  ServiceCatalog, ServiceId, ServiceKind, ServiceRecord, SharedStorage, StorageBackend, StorageError, VendorIdentity,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::Level;

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Clock fixture ---

/// A fixed, readable start instant for manual-clock tests.
pub fn test_epoch() -> chrono::DateTime<Utc> {
  Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// Store wired to a `ManualClock` and an unbounded in-memory backend.
pub fn store_with_manual_clock() -> (CartStore, Arc<ManualClock>, Arc<SharedStorage>) {
  let clock = Arc::new(ManualClock::new(test_epoch()));
  let shared = SharedStorage::new(Arc::new(MemoryBackend::new()));
  let store = store_on(&shared, &clock);
  (store, clock, shared)
}

/// Store on a caller-provided shared storage, sharing the given clock.
pub fn store_on(shared: &Arc<SharedStorage>, clock: &Arc<ManualClock>) -> CartStore {
  let config = CartConfig::default();
  let cleanup = Arc::new(NamespaceCleanup::new(
    config.evictable_namespaces.clone(),
    vec![config.cart_key.clone(), config.backup_key.clone()],
  ));
  CartStore::with_parts(config, shared.clone(), clock.clone(), cleanup)
}

// --- Backend fixture with write accounting and forced failure ---

/// In-memory backend that counts write attempts and can be switched to
/// reject every write, for quota-degradation tests.
pub struct RecordingBackend {
  inner: MemoryBackend,
  write_attempts: AtomicUsize,
  fail_writes: AtomicBool,
}

impl RecordingBackend {
  pub fn new() -> Self {
    RecordingBackend {
      inner: MemoryBackend::new(),
      write_attempts: AtomicUsize::new(0),
      fail_writes: AtomicBool::new(false),
    }
  }

  pub fn with_capacity(capacity_bytes: usize) -> Self {
    RecordingBackend {
      inner: MemoryBackend::with_capacity(capacity_bytes),
      write_attempts: AtomicUsize::new(0),
      fail_writes: AtomicBool::new(false),
    }
  }

  pub fn attempts(&self) -> usize {
    self.write_attempts.load(Ordering::SeqCst)
  }

  pub fn set_fail_writes(&self, fail: bool) {
    self.fail_writes.store(fail, Ordering::SeqCst);
  }
}

impl StorageBackend for RecordingBackend {
  fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
    self.write_attempts.fetch_add(1, Ordering::SeqCst);
    if self.fail_writes.load(Ordering::SeqCst) {
      return Err(StorageError::QuotaExceeded {
        key: key.to_string(),
        attempted_bytes: key.len() + value.len(),
      });
    }
    self.inner.write(key, value)
  }

  fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
    self.inner.read(key)
  }

  fn remove(&self, key: &str) -> Result<(), StorageError> {
    self.inner.remove(key)
  }

  fn keys(&self) -> Vec<String> {
    self.inner.keys()
  }
}

// --- Service record fixtures ---

pub fn vendor() -> VendorIdentity {
  VendorIdentity {
    id: "vendor-1".to_string(),
    display_name: "Golden Fork Events".to_string(),
  }
}

/// Catering service with `menu_items` entries, each carrying
/// `description_bytes` of filler text plus a small gallery.
pub fn heavy_catering_service(id: &str, menu_items: usize, description_bytes: usize) -> ServiceRecord {
  let items = (0..menu_items)
    .map(|i| MenuItem {
      id: format!("menu-{}", i),
      name: format!("Dish {}", i),
      price: 12.5 + i as f64,
      price_type: PriceType::PerUnit,
      category: "mains".to_string(),
      is_combo: i % 5 == 0,
      combo_category_ids: if i % 5 == 0 { vec!["sides".to_string()] } else { vec![] },
      description: Some("d".repeat(description_bytes)),
      image_urls: vec![format!("menu-{}-a.jpg", i), format!("menu-{}-b.jpg", i)],
      combo_items: vec![],
      popularity_score: Some(0.5),
    })
    .collect();

  ServiceRecord {
    id: ServiceId::new(id),
    name: "Full Service Catering".to_string(),
    kind: ServiceKind::Catering,
    price: 500.0,
    price_type: PriceType::Fixed,
    vendor: vendor(),
    description: Some("Award-winning catering for any occasion".to_string()),
    image_urls: vec!["hero.jpg".to_string(), "gallery.jpg".to_string()],
    details: ServiceCatalog::Catering(items),
    rating: Some(4.7),
    review_count: Some(311),
  }
}

pub fn catering_service(id: &str) -> ServiceRecord {
  heavy_catering_service(id, 3, 64)
}

pub fn staff_service(id: &str) -> ServiceRecord {
  ServiceRecord {
    id: ServiceId::new(id),
    name: "Event Staff".to_string(),
    kind: ServiceKind::Staff,
    price: 35.0,
    price_type: PriceType::PerHour,
    vendor: vendor(),
    description: None,
    image_urls: vec![],
    details: ServiceCatalog::Staff(vec![StaffService {
      id: "server".to_string(),
      name: "Server".to_string(),
      price: 35.0,
      price_type: PriceType::PerHour,
      minimum_hours: 2,
      description: Some("Experienced banquet server".to_string()),
      certifications: vec!["food-handler".to_string()],
    }]),
    rating: None,
    review_count: None,
  }
}

pub fn rentals_service(id: &str) -> ServiceRecord {
  ServiceRecord {
    id: ServiceId::new(id),
    name: "Party Rentals".to_string(),
    kind: ServiceKind::PartyRentals,
    price: 0.0,
    price_type: PriceType::PerUnit,
    vendor: vendor(),
    description: None,
    image_urls: vec!["rentals.jpg".to_string()],
    details: ServiceCatalog::PartyRentals(vec![RentalItem {
      id: "chair-1".to_string(),
      name: "Chiavari Chair".to_string(),
      price: 6.0,
      price_type: PriceType::PerUnit,
      category: "seating".to_string(),
      description: Some("Gold finish".to_string()),
      image_urls: vec!["chair.jpg".to_string()],
    }]),
    rating: None,
    review_count: None,
  }
}

pub fn venues_service(id: &str) -> ServiceRecord {
  ServiceRecord {
    id: ServiceId::new(id),
    name: "Garden Venue".to_string(),
    kind: ServiceKind::Venues,
    price: 1200.0,
    price_type: PriceType::Fixed,
    vendor: vendor(),
    description: Some("Outdoor garden with pavilion".to_string()),
    image_urls: vec!["garden.jpg".to_string()],
    details: ServiceCatalog::Venues(vec![VenueOption {
      id: "pavilion".to_string(),
      name: "Pavilion Add-on".to_string(),
      price: 200.0,
      price_type: PriceType::Fixed,
      description: None,
      image_urls: vec![],
      capacity: Some(150),
    }]),
    rating: None,
    review_count: None,
  }
}

// --- Selection helpers ---

pub fn selections(pairs: &[(&str, u32)]) -> Selections {
  pairs
    .iter()
    .map(|(key, qty)| (SelectionKey::item(*key), *qty))
    .collect()
}
