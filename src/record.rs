//! Frozen hash records and the category label table.

use std::collections::HashMap;

/// A single frozen, unique hash plus the categories ever associated with
/// it. Category ids are stored instead of label strings to keep records
/// compact; translation to labels happens only when a query result is
/// constructed (spec §9's "category-set representation" guidance).
#[derive(Debug, Clone)]
pub struct HashRecord {
    /// Lowercased hex representation of the hash, kept alongside the
    /// packed bits so query results don't need to re-encode it.
    pub hash: String,
    /// Packed `H/8`-byte value, see `primitives`'s bit-order contract.
    pub bits: Box<[u8]>,
    /// Category ids, sorted and duplicate-free.
    pub categories: Box<[u32]>,
}

/// Ordered, duplicate-free table of category labels. A label's position
/// is its stable id: once assigned, an id never changes, even across
/// later `Update` calls that reuse or add further labels.
#[derive(Debug, Clone, Default)]
pub struct CategoryTable {
    labels: Vec<String>,
    ids: HashMap<String, u32>,
}

impl CategoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `label`, appending it if not already present.
    /// Re-adding an existing label is a no-op beyond returning its id.
    pub fn intern(&mut self, label: &str) -> u32 {
        if let Some(&id) = self.ids.get(label) {
            return id;
        }
        let id = self.labels.len() as u32;
        self.labels.push(label.to_string());
        self.ids.insert(label.to_string(), id);
        id
    }

    /// Resolve a set of ids to their labels, in ascending id order.
    pub fn labels_for(&self, ids: &[u32]) -> Vec<String> {
        ids.iter()
            .map(|&id| self.labels[id as usize].clone())
            .collect()
    }

    /// All labels, optionally filtered to a set of ids.
    pub fn list(&self, filter: Option<&[u32]>) -> Vec<String> {
        match filter {
            None => self.labels.clone(),
            Some(ids) => ids
                .iter()
                .filter_map(|&id| self.labels.get(id as usize).cloned())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
