/// One line of the household inventory.
///
/// Missing values are carried as empty strings, never as absent fields. `order` is only
/// consulted when sorting the master inventory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryRow {
    pub quantity: String,
    pub unit: String,
    pub item: String,
    pub location: String,
    pub department: String,
    pub store: String,
    pub order: Option<f64>,
}

impl InventoryRow {
    /// Identity of a shopping-list line. Two rows with the same key are printed once.
    pub fn shopping_key(&self) -> (&str, &str, &str, &str) {
        (&self.quantity, &self.unit, &self.item, &self.department)
    }
}
