// hamper/src/error.rs

use crate::storage::backend::StorageError;
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Internal failure taxonomy of the cart store.
///
/// Nothing in this crate surfaces these across the public store boundary:
/// operations return outcome enums and the store degrades to an in-memory
/// fallback or an empty cart instead of propagating. The enum exists so the
/// persistence paths can report precisely what went wrong to the logs.
#[derive(Debug, Error)]
pub enum CartError {
  #[error("Persisted write rejected by the storage backend. Source: {source}")]
  QuotaExceeded {
    #[source]
    source: StorageError,
  },

  #[error("Persisted cart under key '{key}' failed to parse. Source: {source}")]
  CorruptPersistedData {
    key: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Cart mutation attempted without an authenticated session")]
  UnauthenticatedMutation,

  #[error("Cart clear requested without explicit confirmation")]
  UnconfirmedClear,
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
