//! Builds the per-report groupings.
//!
//! Master inventory: every row, sorted by `order` (absent last) then `item`, grouped by location.
//! Shopping list: one store's rows, de-duplicated, sorted by `item`, grouped by department.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::{GroupIndex, InventoryRow};

/// Groups the whole inventory by storage location.
pub fn group_by_location(rows: &[InventoryRow]) -> GroupIndex {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| compare_order(a.order, b.order).then_with(|| a.item.cmp(&b.item)));
    GroupIndex::build(sorted, |r| r.location.as_str())
}

/// Groups one store's shopping list by department.
///
/// Rows repeating an earlier `(quantity, unit, item, department)` are dropped, so an item kept
/// in two locations is listed once.
pub fn group_for_store(rows: &[InventoryRow], store: &str) -> GroupIndex {
    let mut seen = HashSet::new();
    let mut selected: Vec<InventoryRow> = rows
        .iter()
        .filter(|r| r.store == store)
        .filter(|r| seen.insert(r.shopping_key()))
        .cloned()
        .collect();
    selected.sort_by(|a, b| a.item.cmp(&b.item));
    GroupIndex::build(selected, |r| r.department.as_str())
}

/// Store names in order of first appearance. Rows without a store belong to no shopping list.
pub fn stores_in_order(rows: &[InventoryRow]) -> Vec<String> {
    let mut seen = HashSet::new();
    rows.iter()
        .map(|r| r.store.as_str())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(*s))
        .map(str::to_string)
        .collect()
}

/// Median number of rows per group. For an even group count, the mean of the two middle
/// sizes truncated toward zero. Returns `None` for an empty index.
pub fn median_group_size(index: &GroupIndex) -> Option<usize> {
    let mut sizes: Vec<usize> = index.groups().map(|g| g.len()).collect();
    if sizes.is_empty() {
        return None;
    }
    sizes.sort_unstable();
    let mid = sizes.len() / 2;
    if sizes.len() % 2 == 1 {
        Some(sizes[mid])
    } else {
        Some((sizes[mid - 1] + sizes[mid]) / 2)
    }
}

fn compare_order(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(qty: &str, item: &str, location: &str, department: &str, store: &str, order: Option<f64>) -> InventoryRow {
        InventoryRow {
            quantity: qty.to_string(),
            unit: "ct".to_string(),
            item: item.to_string(),
            location: location.to_string(),
            department: department.to_string(),
            store: store.to_string(),
            order,
        }
    }

    fn items(index: &GroupIndex, name: &str) -> Vec<String> {
        index
            .get(name)
            .map(|g| g.rows.iter().map(|r| r.item.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_location_sorted_by_order_then_item() {
        let rows = vec![
            row("1", "yogurt", "fridge", "dairy", "mb", Some(2.0)),
            row("1", "butter", "fridge", "dairy", "mb", Some(2.0)),
            row("1", "milk", "fridge", "dairy", "mb", Some(1.0)),
            row("1", "apples", "fridge", "produce", "mb", None),
        ];
        let index = group_by_location(&rows);
        assert_eq!(items(&index, "fridge"), vec!["milk", "butter", "yogurt", "apples"]);
    }

    #[test]
    fn test_store_filters_dedups_and_sorts() {
        let rows = vec![
            row("1", "soap", "laundry", "cleaning", "target", None),
            row("2", "eggs", "fridge", "dairy", "market basket", None),
            row("1", "butter", "fridge", "dairy", "market basket", None),
            row("2", "eggs", "basement shelves", "dairy", "market basket", None),
            row("1", "sponges", "sink cabinet", "cleaning", "market basket", None),
        ];
        let index = group_for_store(&rows, "market basket");
        assert_eq!(items(&index, "dairy"), vec!["butter", "eggs"]);
        assert_eq!(items(&index, "cleaning"), vec!["sponges"]);
        assert_eq!(index.total_rows(), 3);
    }

    #[test]
    fn test_store_keeps_distinct_quantities() {
        let rows = vec![
            row("1", "eggs", "fridge", "dairy", "mb", None),
            row("2", "eggs", "freezer", "dairy", "mb", None),
        ];
        assert_eq!(group_for_store(&rows, "mb").total_rows(), 2);
    }

    #[test]
    fn test_stores_in_first_appearance_order() {
        let rows = vec![
            row("1", "a", "l", "d", "trader joe's", None),
            row("1", "b", "l", "d", "market basket", None),
            row("1", "c", "l", "d", "", None),
            row("1", "d", "l", "d", "trader joe's", None),
        ];
        assert_eq!(stores_in_order(&rows), vec!["trader joe's", "market basket"]);
    }

    #[test]
    fn test_median_odd_and_even() {
        let odd = vec![
            row("1", "a", "x", "d", "s", None),
            row("1", "b", "x", "d", "s", None),
            row("1", "c", "y", "d", "s", None),
            row("1", "d", "z", "d", "s", None),
            row("1", "e", "z", "d", "s", None),
            row("1", "f", "z", "d", "s", None),
        ];
        // sizes 1, 2, 3
        assert_eq!(median_group_size(&group_by_location(&odd)), Some(2));

        let even = vec![
            row("1", "a", "x", "d", "s", None),
            row("1", "b", "y", "d", "s", None),
            row("1", "c", "y", "d", "s", None),
        ];
        // sizes 1, 2 -> 1.5 truncated
        assert_eq!(median_group_size(&group_by_location(&even)), Some(1));
    }

    #[test]
    fn test_median_of_empty_index_is_none() {
        assert_eq!(median_group_size(&GroupIndex::default()), None);
    }
}
