//! Curated report definitions: which groups appear, in what order, and how many rows fit a cell.
//!
//! The built-in catalog follows the house (master inventory, in walking order) and the aisles of
//! the two regular stores. A JSON file with the same shape replaces it wholesale.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::layout::grid::GridConfig;

/// Rows per cell for store lists that have no entry of their own.
pub const DEFAULT_STORE_CAPACITY: usize = 15;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// How a report picks its cell capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityPolicy {
    /// The median number of rows per group in that report's data.
    MedianGroupSize,
    Fixed(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterReport {
    pub title: String,
    /// Storage locations in the order they are visited.
    pub group_order: Vec<String>,
    pub capacity: CapacityPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreReport {
    pub store: String,
    /// Departments in aisle order.
    pub department_order: Vec<String>,
    pub capacity: CapacityPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportCatalog {
    #[serde(default)]
    pub grid: GridConfig,
    pub master: MasterReport,
    #[serde(default)]
    pub stores: Vec<StoreReport>,
    #[serde(default = "default_store_capacity")]
    pub default_store_capacity: usize,
}

fn default_store_capacity() -> usize {
    DEFAULT_STORE_CAPACITY
}

// ────────────────────────────────────────────────────────────────────────────
// Loading and lookup
// ────────────────────────────────────────────────────────────────────────────

impl ReportCatalog {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::Catalog(format!("cannot read {}: {e}", path.display())))?;
        let catalog: ReportCatalog = serde_json::from_str(&text)
            .map_err(|e| AppError::Catalog(format!("invalid catalog {}: {e}", path.display())))?;
        info!(
            path = %path.display(),
            stores = catalog.stores.len(),
            "Report catalog loaded"
        );
        Ok(catalog)
    }

    pub fn store(&self, store: &str) -> Option<&StoreReport> {
        self.stores.iter().find(|s| s.store == store)
    }
}

impl Default for ReportCatalog {
    fn default() -> Self {
        ReportCatalog {
            grid: GridConfig::default(),
            master: MasterReport {
                title: "supplies".to_string(),
                group_order: to_strings(&[
                    "fridge",
                    "tall cabinet",
                    "tea and coffee cabinet",
                    "cooking cabinet",
                    "cooking drawer",
                    "trash cabinet",
                    "sink cabinet",
                    "bathroom closet",
                    "snack station",
                    "basement stair landing",
                    "basement shelves",
                    "freezer",
                    "laundry",
                    "bathroom cabinet",
                ]),
                capacity: CapacityPolicy::MedianGroupSize,
            },
            stores: vec![
                StoreReport {
                    store: "market basket".to_string(),
                    department_order: to_strings(&[
                        "service",
                        "dairy & eggs",
                        "meat",
                        "condiments",
                        "baking",
                        "pasta",
                        "pharmacy",
                        "paper",
                        "wraps",
                        "cleaning",
                        "water",
                        "freezer",
                        "fruits & vegetables",
                    ]),
                    capacity: CapacityPolicy::Fixed(17),
                },
                StoreReport {
                    store: "trader joe's".to_string(),
                    department_order: to_strings(&[
                        "fruits & vegetables",
                        "cheese & crackers",
                        "coffee & tea",
                        "dairy & eggs",
                        "nuts & dried fruit",
                        "staples",
                        "bread",
                        "pharmacy",
                        "chocolate, cookies & crackers",
                    ]),
                    capacity: CapacityPolicy::Fixed(11),
                },
            ],
            default_store_capacity: DEFAULT_STORE_CAPACITY,
        }
    }
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
