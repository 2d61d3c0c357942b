// hamper/src/store/migration.rs

//! One-time migration of the legacy persisted format (full, unpruned service
//! records under the cart key) to the pruned shape.
//!
//! Detection is parse-driven: the pruned types carry `deny_unknown_fields`,
//! so a strict parse succeeding means the cart is already migrated and the
//! whole pass is a no-op. Anything that parses as neither shape is corrupt.

use crate::error::{CartError, CartResult};
use crate::model::line_item::{Selections, StoredCartItem};
use crate::model::service::ServiceRecord;
use crate::prune::prune_service;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{event, Level};

/// A cart entry as the pre-pruning format persisted it: the full service
/// record, unprojected.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyCartItem {
  service: ServiceRecord,
  added_at: DateTime<Utc>,
  expires_at: DateTime<Utc>,
  #[serde(default)]
  selected_items: Selections,
}

/// Parses a raw persisted cart, migrating legacy entries in the process.
/// Returns the entries plus whether anything was migrated (so the caller
/// knows to persist the pruned form back). Idempotent: an already-pruned
/// cart takes the strict-parse fast path and reports no migration.
pub(crate) fn parse_and_migrate(key: &str, raw: &str) -> CartResult<(Vec<StoredCartItem>, bool)> {
  if let Ok(items) = serde_json::from_str::<Vec<StoredCartItem>>(raw) {
    return Ok((items, false));
  }

  // Strict parse failed: either a legacy cart or corrupt data. Walk the
  // entries individually so one legacy row does not force re-pruning of
  // rows that are already lean.
  let values: Vec<serde_json::Value> = serde_json::from_str(raw).map_err(|err| CartError::CorruptPersistedData {
    key: key.to_string(),
    source: err.into(),
  })?;

  let mut items = Vec::with_capacity(values.len());
  let mut migrated = false;

  for value in values {
    match serde_json::from_value::<StoredCartItem>(value.clone()) {
      Ok(item) => items.push(item),
      Err(_) => {
        let legacy: LegacyCartItem = serde_json::from_value(value).map_err(|err| CartError::CorruptPersistedData {
          key: key.to_string(),
          source: err.into(),
        })?;
        event!(
          Level::INFO,
          service_id = %legacy.service.id,
          "Migrating legacy unpruned cart entry to the pruned format."
        );
        items.push(StoredCartItem {
          service: prune_service(&legacy.service),
          added_at: legacy.added_at,
          expires_at: legacy.expires_at,
          selected_items: legacy.selected_items,
        });
        migrated = true;
      }
    }
  }

  Ok((items, migrated))
}
