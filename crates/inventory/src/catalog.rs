use serde::Serialize;

use stockroom_core::{AggregateRoot, DomainError, DomainResult, EntryId};

use crate::entry::CatalogEntry;

/// In-memory catalog of entries, kept in insertion order.
///
/// Entries are addressed by [`EntryId`] or by position; positions shift when an
/// entry is removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh entry and return its id.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        category: impl Into<String>,
        expirable: bool,
    ) -> EntryId {
        self.insert(CatalogEntry::new(name, category, expirable))
    }

    /// Add an already-built entry (e.g. from a form).
    ///
    /// An entry with an id already present replaces the stored one in place.
    pub fn insert(&mut self, entry: CatalogEntry) -> EntryId {
        let id = entry.id_typed();
        match self.position(id) {
            Some(index) => self.entries[index] = entry,
            None => self.entries.push(entry),
        }
        tracing::debug!(entry = %id, entries = self.entries.len(), "catalog entry stored");
        id
    }

    pub fn get(&self, id: EntryId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| *entry.id() == id)
    }

    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut CatalogEntry> {
        self.entries.iter_mut().find(|entry| *entry.id() == id)
    }

    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| *entry.id() == id)
    }

    pub fn at(&self, index: usize) -> DomainResult<&CatalogEntry> {
        let len = self.entries.len();
        self.entries
            .get(index)
            .ok_or_else(|| DomainError::index_out_of_range(index, len))
    }

    pub fn at_mut(&mut self, index: usize) -> DomainResult<&mut CatalogEntry> {
        let len = self.entries.len();
        self.entries
            .get_mut(index)
            .ok_or_else(|| DomainError::index_out_of_range(index, len))
    }

    pub fn remove(&mut self, id: EntryId) -> DomainResult<CatalogEntry> {
        let index = self.position(id).ok_or_else(DomainError::not_found)?;
        Ok(self.entries.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose category matches, ignoring ASCII case, with their catalog positions.
    pub fn in_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = (usize, &'a CatalogEntry)> {
        self.entries
            .iter()
            .enumerate()
            .filter(move |(_, entry)| entry.category().eq_ignore_ascii_case(category))
    }

    /// Sum of all entry totals. Each entry total fits in `i64`, their sum may not.
    pub fn total_quantity(&self) -> DomainResult<i64> {
        self.entries.iter().try_fold(0i64, |sum, entry| {
            sum.checked_add(entry.total_quantity())
                .ok_or_else(|| DomainError::validation("catalog total exceeds i64"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lot::StockLot;

    #[test]
    fn create_keeps_insertion_order() {
        let mut catalog = Catalog::new();
        let a = catalog.create("Apple", "Fruit", true);
        let b = catalog.create("Rice", "Grains", false);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.position(a), Some(0));
        assert_eq!(catalog.position(b), Some(1));
        assert_eq!(catalog.at(1).unwrap().name(), "Rice");
    }

    #[test]
    fn insert_with_known_id_replaces_entry() {
        let mut catalog = Catalog::new();
        let id = catalog.create("Apple", "Fruit", true);

        let mut edited = catalog.get(id).unwrap().clone();
        edited.set_name("Green Apple");
        catalog.insert(edited);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(id).unwrap().name(), "Green Apple");
    }

    #[test]
    fn positional_access_is_bounds_checked() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.at(0).unwrap_err(), DomainError::index_out_of_range(0, 0));
        assert!(catalog.at_mut(3).is_err());
    }

    #[test]
    fn remove_unknown_entry_is_not_found() {
        let mut catalog = Catalog::new();
        let id = catalog.create("Apple", "Fruit", true);

        assert_eq!(catalog.remove(EntryId::new()).unwrap_err(), DomainError::NotFound);
        let removed = catalog.remove(id).unwrap();
        assert_eq!(removed.name(), "Apple");
        assert!(catalog.is_empty());
    }

    #[test]
    fn category_filter_ignores_case() {
        let mut catalog = Catalog::new();
        catalog.create("Apple", "Fruit", true);
        catalog.create("Pear", "fruit", true);
        catalog.create("Rice", "Grains", false);

        let found: Vec<(usize, &str)> = catalog
            .in_category("FRUIT")
            .map(|(i, entry)| (i, entry.name()))
            .collect();
        assert_eq!(found, vec![(0, "Apple"), (1, "Pear")]);

        let grains: Vec<usize> = catalog.in_category("grains").map(|(i, _)| i).collect();
        assert_eq!(grains, vec![2]);
    }

    #[test]
    fn total_quantity_spans_entries() {
        let mut catalog = Catalog::new();
        let rice = catalog.create("Rice", "Grains", false);
        let beans = catalog.create("Beans", "Grains", false);
        catalog.get_mut(rice).unwrap().add_lot(StockLot::new(4).unwrap()).unwrap();
        catalog.get_mut(beans).unwrap().add_lot(StockLot::new(6).unwrap()).unwrap();

        assert_eq!(catalog.total_quantity().unwrap(), 10);
    }

    #[test]
    fn total_quantity_reports_overflow_across_entries() {
        let mut catalog = Catalog::new();
        for name in ["Rice", "Beans"] {
            let id = catalog.create(name, "Grains", false);
            catalog.get_mut(id).unwrap().update_lot(0, i64::MAX, None).unwrap();
        }

        let err = catalog.total_quantity().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
