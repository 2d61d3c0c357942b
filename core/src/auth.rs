// hamper/src/auth.rs

//! Session states driving the auth gate. The authentication provider is the
//! sole external signal; the store reacts to transitions via
//! `CartStore::set_auth_state`.

/// Session state as reported by the authentication provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
  /// Session resolution still in flight (e.g. right after a page refresh).
  /// All cart operations are deferred: no reads, no clears. This avoids the
  /// spurious clear-on-refresh race.
  Loading,
  /// No session. The cart is wiped, persisted keys deleted, unconditionally.
  Unauthenticated,
  /// Active session. The persisted cart is loaded, expiry-filtered.
  Authenticated,
}

impl AuthState {
  pub fn is_authenticated(&self) -> bool {
    matches!(self, AuthState::Authenticated)
  }
}
