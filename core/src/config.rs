// hamper/src/config.rs

use chrono::Duration;

/// Configuration of one cart store. Plain data with sensible defaults; the
/// embedding application decides where the values come from.
#[derive(Debug, Clone)]
pub struct CartConfig {
  /// Persisted key holding the cart snapshot, shared across tabs.
  pub cart_key: String,
  /// Opaque booking-state backup key. Not written by this crate, but deleted
  /// whenever the cart is cleared or the session ends.
  pub backup_key: String,
  /// Absolute line-item lifetime. Fixed-duration; not refreshed on mutation.
  pub item_ttl: Duration,
  /// Cache-namespace prefixes the cleanup policy may evict under quota
  /// pressure, ordered least-recently-useful first.
  pub evictable_namespaces: Vec<String>,
}

impl Default for CartConfig {
  fn default() -> Self {
    CartConfig {
      cart_key: "marketplace-cart".to_string(),
      backup_key: "booking-state-backup".to_string(),
      item_ttl: Duration::hours(4),
      evictable_namespaces: vec![
        "image-cache:".to_string(),
        "search-cache:".to_string(),
        "listing-cache:".to_string(),
      ],
    }
  }
}

impl CartConfig {
  pub fn with_cart_key<S: Into<String>>(mut self, key: S) -> Self {
    self.cart_key = key.into();
    self
  }

  pub fn with_backup_key<S: Into<String>>(mut self, key: S) -> Self {
    self.backup_key = key.into();
    self
  }

  pub fn with_item_ttl(mut self, ttl: Duration) -> Self {
    self.item_ttl = ttl;
    self
  }

  pub fn with_evictable_namespaces(mut self, prefixes: Vec<String>) -> Self {
    self.evictable_namespaces = prefixes;
    self
  }
}
