//! Inventory loading and grouping.
//!
//! `reader` turns the delimited inventory file into `InventoryRow`s; `grouping` builds the
//! per-report `GroupIndex` (by location for the master inventory, by department per store).

pub mod grouping;
pub mod reader;

pub use grouping::{group_by_location, group_for_store, median_group_size, stores_in_order};
pub use reader::read_inventory;
