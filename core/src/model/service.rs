// hamper/src/model/service.rs

//! Marketplace service records: the full domain shape handed to `add_item`,
//! and the pruned projection that is actually persisted with a line item.
//!
//! The pruned types carry `deny_unknown_fields` so that a strict parse of a
//! persisted cart doubles as legacy-format detection (see `store::migration`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a marketplace service. Cart membership is keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(String);

impl ServiceId {
  pub fn new<S: Into<String>>(id: S) -> Self {
    ServiceId(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ServiceId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for ServiceId {
  fn from(s: &str) -> Self {
    ServiceId(s.to_string())
  }
}

/// The service type tag. Determines which lean detail list the pruner keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceKind {
  Catering,
  Venues,
  Staff,
  PartyRentals,
}

/// How a price is applied when totals are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceType {
  Fixed,
  PerPerson,
  PerHour,
  PerUnit,
}

/// Vendor identity retained on a cart row so it can be redisplayed without
/// re-fetching the vendor record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorIdentity {
  pub id: String,
  pub display_name: String,
}

// --- Full (rich) detail records, as they arrive from the marketplace ---

/// A full catering menu item. Combo items may nest one level of sub-items;
/// the pruner never expands them further.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
  pub id: String,
  pub name: String,
  pub price: f64,
  pub price_type: PriceType,
  pub category: String,
  #[serde(default)]
  pub is_combo: bool,
  #[serde(default)]
  pub combo_category_ids: Vec<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub image_urls: Vec<String>,
  #[serde(default)]
  pub combo_items: Vec<MenuItem>,
  #[serde(default)]
  pub popularity_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalItem {
  pub id: String,
  pub name: String,
  pub price: f64,
  pub price_type: PriceType,
  pub category: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub image_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffService {
  pub id: String,
  pub name: String,
  pub price: f64,
  pub price_type: PriceType,
  pub minimum_hours: u32,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub certifications: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueOption {
  pub id: String,
  pub name: String,
  pub price: f64,
  pub price_type: PriceType,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub image_urls: Vec<String>,
  #[serde(default)]
  pub capacity: Option<u32>,
}

/// Type-specific detail lists of a full service record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "items", rename_all = "kebab-case")]
pub enum ServiceCatalog {
  Catering(Vec<MenuItem>),
  PartyRentals(Vec<RentalItem>),
  Staff(Vec<StaffService>),
  Venues(Vec<VenueOption>),
}

/// The full marketplace service record, as handed to `CartStore::add_item`.
/// Everything beyond the pruned projection is dropped at write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
  pub id: ServiceId,
  pub name: String,
  #[serde(rename = "type")]
  pub kind: ServiceKind,
  pub price: f64,
  pub price_type: PriceType,
  pub vendor: VendorIdentity,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub image_urls: Vec<String>,
  pub details: ServiceCatalog,
  #[serde(default)]
  pub rating: Option<f64>,
  #[serde(default)]
  pub review_count: Option<u32>,
}

// --- Lean (pruned) detail records, as persisted on a cart row ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LeanMenuItem {
  pub id: String,
  pub name: String,
  pub price: f64,
  pub price_type: PriceType,
  pub category: String,
  pub is_combo: bool,
  pub combo_category_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LeanRentalItem {
  pub id: String,
  pub name: String,
  pub price: f64,
  pub price_type: PriceType,
  pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LeanStaffService {
  pub id: String,
  pub name: String,
  pub price: f64,
  pub price_type: PriceType,
  pub minimum_hours: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LeanVenueOption {
  pub id: String,
  pub name: String,
  pub price: f64,
  pub price_type: PriceType,
}

/// Type-specific lean detail lists, keyed the same way as `ServiceCatalog`.
/// Consumers get a checked contract per service kind instead of optional
/// fields probed at every read site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "items", rename_all = "kebab-case")]
pub enum ServiceDetails {
  Catering(Vec<LeanMenuItem>),
  PartyRentals(Vec<LeanRentalItem>),
  Staff(Vec<LeanStaffService>),
  Venues(Vec<LeanVenueOption>),
}

impl ServiceDetails {
  /// Number of lean detail entries, regardless of variant.
  pub fn len(&self) -> usize {
    match self {
      ServiceDetails::Catering(items) => items.len(),
      ServiceDetails::PartyRentals(items) => items.len(),
      ServiceDetails::Staff(items) => items.len(),
      ServiceDetails::Venues(items) => items.len(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// The pruned projection of a service, persisted with a cart line item.
/// Only identity/display/pricing fields plus the lean detail list survive;
/// re-hydration therefore yields a partially-populated service and callers
/// must tolerate the missing optional fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ServiceSnapshot {
  pub id: ServiceId,
  pub name: String,
  #[serde(rename = "type")]
  pub kind: ServiceKind,
  pub price: f64,
  pub price_type: PriceType,
  pub vendor: VendorIdentity,
  /// Primary image only. Galleries are dropped by the pruner.
  pub image_url: Option<String>,
  pub details: ServiceDetails,
}
