// hamper/src/model/line_item.rs

//! Cart line items: the in-memory form (`CartLineItem`) and the wire form
//! (`StoredCartItem`). The two are structurally identical; the stored type
//! exists only to mark the serialization boundary.

use crate::model::service::{ServiceId, ServiceSnapshot};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Key of one sub-item selection inside a line item: a plain item id, or a
/// composite `itemId_duration` key for duration-priced items such as staff.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionKey(String);

impl SelectionKey {
  /// Key for a plainly-priced sub-item.
  pub fn item<S: Into<String>>(item_id: S) -> Self {
    SelectionKey(item_id.into())
  }

  /// Composite key for a duration-priced sub-item, e.g. `"staff-7_4"` for
  /// four hours of item `staff-7`.
  pub fn item_with_duration(item_id: &str, duration_hours: u32) -> Self {
    SelectionKey(format!("{}_{}", item_id, duration_hours))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for SelectionKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for SelectionKey {
  fn from(s: &str) -> Self {
    SelectionKey(s.to_string())
  }
}

/// Sub-item selections of one line item. Key uniqueness is enforced by the
/// map itself; insertion order is irrelevant. A key present with value 0 is
/// semantically equivalent to absence but is tolerated, not pruned.
pub type Selections = BTreeMap<SelectionKey, u32>;

/// One entry in the cart: one distinct marketplace service plus its
/// sub-selections and its absolute expiry window.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineItem {
  /// Always the pruned projection, never the full domain record.
  pub service: ServiceSnapshot,
  pub added_at: DateTime<Utc>,
  /// `added_at + TTL`. Fixed-duration absolute expiry; mutations do not
  /// refresh it.
  pub expires_at: DateTime<Utc>,
  pub selected_items: Selections,
}

impl CartLineItem {
  pub fn new(service: ServiceSnapshot, now: DateTime<Utc>, ttl: Duration, selected_items: Selections) -> Self {
    CartLineItem {
      service,
      added_at: now,
      expires_at: now + ttl,
      selected_items,
    }
  }

  /// An item with `expires_at <= now` is treated as absent on every read.
  pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
    self.expires_at <= now
  }

  /// Overlays `incoming` onto the existing selections: new keys are added,
  /// existing keys are overwritten by the incoming value. Timestamps are
  /// deliberately untouched (no sliding expiry).
  pub fn merge_selections(&mut self, incoming: &Selections) {
    for (key, qty) in incoming {
      self.selected_items.insert(key.clone(), *qty);
    }
  }
}

/// Wire/storage form of `CartLineItem` (camelCase JSON, ISO-8601 timestamps).
/// Strict parsing (`deny_unknown_fields`) is what distinguishes this shape
/// from the legacy unpruned format during migration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StoredCartItem {
  pub service: ServiceSnapshot,
  pub added_at: DateTime<Utc>,
  pub expires_at: DateTime<Utc>,
  pub selected_items: Selections,
}

impl From<&CartLineItem> for StoredCartItem {
  fn from(item: &CartLineItem) -> Self {
    StoredCartItem {
      service: item.service.clone(),
      added_at: item.added_at,
      expires_at: item.expires_at,
      selected_items: item.selected_items.clone(),
    }
  }
}

impl From<StoredCartItem> for CartLineItem {
  fn from(stored: StoredCartItem) -> Self {
    CartLineItem {
      service: stored.service,
      added_at: stored.added_at,
      expires_at: stored.expires_at,
      selected_items: stored.selected_items,
    }
  }
}

impl CartLineItem {
  pub fn service_id(&self) -> &ServiceId {
    &self.service.id
  }
}
