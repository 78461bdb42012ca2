//! Inventory domain module.
//!
//! This crate contains the catalog model (entries owning stock lots) and the
//! consolidation/expiry rules, implemented purely as deterministic domain logic
//! (no IO, no presentation, no storage). "Today" is always supplied by the caller.

pub mod catalog;
pub mod entry;
pub mod form;
pub mod lot;

pub use catalog::Catalog;
pub use entry::CatalogEntry;
pub use form::{EditInfoForm, LotForm, NewEntryForm, parse_date, parse_quantity};
pub use lot::StockLot;
