pub mod line_item;
pub mod service;

// Re-export key types for easier access from other hamper modules (and lib.rs)
pub use line_item::{CartLineItem, SelectionKey, Selections, StoredCartItem};
pub use service::{
  LeanMenuItem, LeanRentalItem, LeanStaffService, LeanVenueOption, MenuItem, PriceType, RentalItem, ServiceCatalog,
  ServiceDetails, ServiceId, ServiceKind, ServiceRecord, ServiceSnapshot, StaffService, VendorIdentity, VenueOption,
};
