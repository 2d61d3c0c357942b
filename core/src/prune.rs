// hamper/src/prune.rs

//! The service pruner: reduces a full marketplace service record to the
//! minimal projection needed to redisplay a cart row and recompute a price.
//!
//! Pure and deterministic. Rich fields (descriptions, galleries beyond the
//! primary image, nested combo structures beyond one level, analytics) are
//! dropped, bounding the persisted size of every cart entry regardless of
//! how heavy the original record is.

use crate::model::service::{
  LeanMenuItem, LeanRentalItem, LeanStaffService, LeanVenueOption, ServiceCatalog, ServiceDetails, ServiceRecord,
  ServiceSnapshot,
};

/// Projects a full service record to its persisted form.
pub fn prune_service(record: &ServiceRecord) -> ServiceSnapshot {
  let details = match &record.details {
    ServiceCatalog::Catering(items) => ServiceDetails::Catering(
      items
        .iter()
        .map(|item| LeanMenuItem {
          id: item.id.clone(),
          name: item.name.clone(),
          price: item.price,
          price_type: item.price_type,
          category: item.category.clone(),
          is_combo: item.is_combo,
          // Combo sub-items are not expanded; only the category references
          // needed to redisplay the combo survive.
          combo_category_ids: item.combo_category_ids.clone(),
        })
        .collect(),
    ),
    ServiceCatalog::PartyRentals(items) => ServiceDetails::PartyRentals(
      items
        .iter()
        .map(|item| LeanRentalItem {
          id: item.id.clone(),
          name: item.name.clone(),
          price: item.price,
          price_type: item.price_type,
          category: item.category.clone(),
        })
        .collect(),
    ),
    ServiceCatalog::Staff(items) => ServiceDetails::Staff(
      items
        .iter()
        .map(|item| LeanStaffService {
          id: item.id.clone(),
          name: item.name.clone(),
          price: item.price,
          price_type: item.price_type,
          minimum_hours: item.minimum_hours,
        })
        .collect(),
    ),
    ServiceCatalog::Venues(items) => ServiceDetails::Venues(
      items
        .iter()
        .map(|item| LeanVenueOption {
          id: item.id.clone(),
          name: item.name.clone(),
          price: item.price,
          price_type: item.price_type,
        })
        .collect(),
    ),
  };

  ServiceSnapshot {
    id: record.id.clone(),
    name: record.name.clone(),
    kind: record.kind,
    price: record.price,
    price_type: record.price_type,
    vendor: record.vendor.clone(),
    image_url: record.image_urls.first().cloned(),
    details,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::service::{MenuItem, PriceType, ServiceId, ServiceKind, VendorIdentity};

  fn catering_record() -> ServiceRecord {
    ServiceRecord {
      id: ServiceId::new("svc-1"),
      name: "Taco Night".to_string(),
      kind: ServiceKind::Catering,
      price: 250.0,
      price_type: PriceType::Fixed,
      vendor: VendorIdentity {
        id: "vendor-9".to_string(),
        display_name: "La Cocina".to_string(),
      },
      description: Some("A very long marketing description".to_string()),
      image_urls: vec!["primary.jpg".to_string(), "gallery-1.jpg".to_string()],
      details: ServiceCatalog::Catering(vec![MenuItem {
        id: "menu-1".to_string(),
        name: "Al Pastor".to_string(),
        price: 4.5,
        price_type: PriceType::PerUnit,
        category: "tacos".to_string(),
        is_combo: true,
        combo_category_ids: vec!["sides".to_string()],
        description: Some("x".repeat(2048)),
        image_urls: vec!["a.jpg".to_string(), "b.jpg".to_string()],
        combo_items: vec![],
        popularity_score: Some(0.93),
      }]),
      rating: Some(4.8),
      review_count: Some(120),
    }
  }

  #[test]
  fn prune_keeps_primary_image_only() {
    let snapshot = prune_service(&catering_record());
    assert_eq!(snapshot.image_url.as_deref(), Some("primary.jpg"));
  }

  #[test]
  fn prune_is_deterministic() {
    let record = catering_record();
    assert_eq!(prune_service(&record), prune_service(&record));
  }

  #[test]
  fn prune_drops_rich_menu_fields() {
    let snapshot = prune_service(&catering_record());
    let ServiceDetails::Catering(items) = &snapshot.details else {
      panic!("expected catering details");
    };
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "menu-1");
    assert!(items[0].is_combo);
    // The serialized form must not contain any of the stripped text.
    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(!json.contains("xxxx"));
    assert!(!json.contains("gallery-1.jpg"));
  }
}
