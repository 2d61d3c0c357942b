// hamper/src/store/outcome.rs

//! Outcome signals returned by cart store operations. The store never raises
//! errors across its public boundary; callers branch on these instead.

/// Outcome of `CartStore::add_item`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
  /// A new line item was appended.
  Added,
  /// A line item for the same service already existed; its selections were
  /// merged (incoming keys win) and its timestamps left untouched.
  Merged,
  /// No active session. The operation was a no-op; surface a "please sign
  /// in" notice to the user.
  RequiresAuthentication,
  /// Session resolution is still in flight; the operation was deferred.
  Deferred,
}

/// Outcome of `CartStore::update_selections`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
  /// The selections map was replaced and the change persisted.
  Updated,
  /// The incoming map was value-equal to the current one. Nothing changed:
  /// no new map, no revision bump, no persistence write. Downstream
  /// consumers rely on this stability to avoid render loops.
  Unchanged,
  /// No (unexpired) line item with that service id.
  NotInCart,
}

/// Outcome of `CartStore::clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
  /// The cart was emptied and the persisted keys deleted.
  Cleared,
  /// The request lacked explicit confirmation (or arrived while the session
  /// was still resolving) and was ignored.
  Ignored,
}

/// Outcome of one persistence attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
  /// The first write attempt succeeded.
  Persisted,
  /// The first attempt hit quota; a cleanup pass freed enough space for the
  /// single retry to succeed.
  PersistedAfterCleanup,
  /// Both attempts failed. The cart is held in the in-memory fallback: the
  /// current tab stays usable, but the cart will not survive a reload or
  /// propagate to other tabs.
  MemoryOnly,
}
