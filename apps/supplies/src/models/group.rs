use std::collections::BTreeMap;

use crate::models::InventoryRow;

/// A named run of rows sharing one key value (a storage location or a store department).
///
/// Membership and intra-group order are fixed when the group is built; layout only ever
/// reads `rows` through an advancing offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub name: String,
    pub rows: Vec<InventoryRow>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Precomputed lookup from group name to its ordered rows, built once before layout.
///
/// Backed by a `BTreeMap`, so iteration yields names in sorted order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupIndex {
    groups: BTreeMap<String, Group>,
}

impl GroupIndex {
    /// Groups already-sorted rows by `key`, preserving their relative order inside each group.
    pub fn build<F>(rows: impl IntoIterator<Item = InventoryRow>, key: F) -> Self
    where
        F: Fn(&InventoryRow) -> &str,
    {
        let mut groups: BTreeMap<String, Group> = BTreeMap::new();
        for row in rows {
            let name = key(&row).to_string();
            groups
                .entry(name.clone())
                .or_insert_with(|| Group {
                    name,
                    rows: Vec::new(),
                })
                .rows
                .push(row);
        }
        Self { groups }
    }

    pub fn get(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    /// Group names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[cfg(test)]
    pub fn total_rows(&self) -> usize {
        self.groups.values().map(Group::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(item: &str, location: &str) -> InventoryRow {
        InventoryRow {
            item: item.to_string(),
            location: location.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_preserves_input_order_within_group() {
        let index = GroupIndex::build(
            vec![row("milk", "fridge"), row("rice", "pantry"), row("eggs", "fridge")],
            |r| r.location.as_str(),
        );
        let fridge = index.get("fridge").unwrap();
        let items: Vec<&str> = fridge.rows.iter().map(|r| r.item.as_str()).collect();
        assert_eq!(items, vec!["milk", "eggs"]);
        assert_eq!(index.total_rows(), 3);
    }

    #[test]
    fn test_names_are_sorted() {
        let index = GroupIndex::build(
            vec![row("a", "zeta"), row("b", "alpha"), row("c", "mid")],
            |r| r.location.as_str(),
        );
        let names: Vec<&str> = index.names().collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_missing_group_is_none() {
        let index = GroupIndex::build(vec![row("a", "fridge")], |r| r.location.as_str());
        assert!(index.get("freezer").is_none());
    }
}
