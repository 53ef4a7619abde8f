//! Association store
//!
//! Ordered, unique mapping from tab id to its record (and so its content id).
//! The order is the display order; after a drag it is rebuilt wholesale from
//! what the renderer shows rather than patched.

use std::collections::HashMap;

use crate::error::TabError;
use crate::tab::TabRecord;
use crate::Result;

#[derive(Debug, Clone, Default)]
pub struct AssociationStore {
    /// Tab ids, left to right
    order: Vec<String>,
    records: HashMap<String, TabRecord>,
}

impl AssociationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tab at the rightmost position.
    ///
    /// Returns `false` and leaves the store untouched if the id is already
    /// present; callers are expected to check [`contains`](Self::contains) first.
    pub fn insert(&mut self, tab_id: String, record: TabRecord) -> bool {
        if self.records.contains_key(&tab_id) {
            return false;
        }

        self.order.push(tab_id.clone());
        self.records.insert(tab_id, record);
        true
    }

    /// Delete a tab, keeping the relative order of the others
    pub fn remove(&mut self, tab_id: &str) -> Result<TabRecord> {
        let record = self
            .records
            .remove(tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))?;
        self.order.retain(|id| id != tab_id);
        Ok(record)
    }

    /// Replace the order with `ordered`.
    ///
    /// Ids missing from `ordered` are dropped, ids the store does not know are
    /// ignored, and repeated ids count once. Survivors keep their records.
    pub fn rebuild_order<I, S>(&mut self, ordered: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut previous = std::mem::take(&mut self.records);
        let mut order = Vec::with_capacity(previous.len());

        for id in ordered {
            let id = id.as_ref();
            if let Some(record) = previous.remove(id) {
                order.push(id.to_string());
                self.records.insert(id.to_string(), record);
            }
        }

        for dropped in previous.keys() {
            tracing::debug!(tab_id = %dropped, "Dropped tab missing from rendered order");
        }

        self.order = order;
    }

    pub fn keys_in_order(&self) -> &[String] {
        &self.order
    }

    pub fn contains(&self, tab_id: &str) -> bool {
        self.records.contains_key(tab_id)
    }

    pub fn get(&self, tab_id: &str) -> Option<&TabRecord> {
        self.records.get(tab_id)
    }

    pub fn content_id(&self, tab_id: &str) -> Option<&str> {
        self.records.get(tab_id).map(|r| r.content_id.as_str())
    }

    pub fn position(&self, tab_id: &str) -> Option<usize> {
        self.order.iter().position(|id| id == tab_id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Records in display order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TabRecord)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id).map(|r| (id.as_str(), r)))
    }
}
