pub mod group;
pub mod inventory;

pub use group::{Group, GroupIndex};
pub use inventory::InventoryRow;
