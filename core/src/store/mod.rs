pub mod cart;
pub(crate) mod migration;
pub mod outcome;
pub mod persistence;

// Re-export key types for easier access from other hamper modules (and lib.rs)
pub use cart::CartStore;
pub use outcome::{AddOutcome, ClearOutcome, UpdateOutcome, WriteOutcome};
