pub mod adapter;
pub mod backend;
pub mod cleanup;
pub mod hub;

// Re-export key types for easier access from other hamper modules (and lib.rs)
pub use adapter::StorageAdapter;
pub use backend::{MemoryBackend, StorageBackend, StorageError};
pub use cleanup::{CleanupPolicy, NamespaceCleanup, NoopCleanup};
pub use hub::{SharedStorage, StorageEvent, TabId};
