//! Insertion-ordered collection of item records keyed by identifier.

use crate::error::{CoreError, Result};
use crate::types::ItemRecord;
use std::collections::HashMap;

/// All known items, in the order they were loaded or added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemIndex {
    records: Vec<ItemRecord>,
    positions: HashMap<String, usize>,
}

impl ItemIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index, rejecting duplicate identifiers.
    pub fn from_records(records: Vec<ItemRecord>) -> Result<Self> {
        let mut index = Self::new();
        for record in records {
            index.insert(record)?;
        }
        Ok(index)
    }

    /// Append a record for a new identifier.
    pub fn insert(&mut self, record: ItemRecord) -> Result<()> {
        if self.positions.contains_key(&record.identifier) {
            return Err(CoreError::DuplicateIdentifier(record.identifier));
        }
        self.positions
            .insert(record.identifier.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    pub fn get(&self, identifier: &str) -> Option<&ItemRecord> {
        self.positions.get(identifier).map(|&i| &self.records[i])
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.positions.contains_key(identifier)
    }

    /// Replace the stored record that has the same identifier, keeping its position.
    pub fn update(&mut self, record: ItemRecord) -> Result<()> {
        let position = *self
            .positions
            .get(&record.identifier)
            .ok_or_else(|| CoreError::UnknownIdentifier(record.identifier.clone()))?;
        self.records[position] = record;
        Ok(())
    }

    pub fn records(&self) -> &[ItemRecord] {
        &self.records
    }

    /// Mutable access for annotating records. Identifiers must not be changed.
    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut ItemRecord> {
        self.records.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<ItemRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(index: &ItemIndex) -> Vec<&str> {
        index
            .records()
            .iter()
            .map(|r| r.identifier.as_str())
            .collect()
    }

    #[test]
    fn preserves_insertion_order() {
        let index = ItemIndex::from_records(vec![
            ItemRecord::new("c.md", 2.5),
            ItemRecord::new("a.md", 2.5),
            ItemRecord::new("b.md", 2.5),
        ])
        .unwrap();
        assert_eq!(ids(&index), vec!["c.md", "a.md", "b.md"]);
    }

    #[test]
    fn rejects_duplicate_identifiers() {
        let err = ItemIndex::from_records(vec![
            ItemRecord::new("a.md", 2.5),
            ItemRecord::new("a.md", 1.3),
        ])
        .unwrap_err();
        assert_eq!(err, CoreError::DuplicateIdentifier("a.md".to_string()));
    }

    #[test]
    fn update_writes_back_in_place() {
        let mut index = ItemIndex::from_records(vec![
            ItemRecord::new("a.md", 2.5),
            ItemRecord::new("b.md", 2.5),
        ])
        .unwrap();

        let mut changed = index.get("a.md").unwrap().clone();
        changed.repetitions = 3;
        index.update(changed).unwrap();

        assert_eq!(index.get("a.md").unwrap().repetitions, 3);
        assert_eq!(ids(&index), vec!["a.md", "b.md"]);
    }

    #[test]
    fn update_unknown_identifier_fails() {
        let mut index = ItemIndex::new();
        let err = index.update(ItemRecord::new("x.md", 2.5)).unwrap_err();
        assert_eq!(err, CoreError::UnknownIdentifier("x.md".to_string()));
    }
}
