//! Ordered idShort-to-value mapping.

use crate::value::ValueNode;

/// Collection value: entries keyed by idShort in insertion order.
///
/// Backed by a vector so iteration order never depends on hashing. Keys
/// are unique; inserting an existing key replaces its value in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollectionValue {
    entries: Vec<(String, ValueNode)>,
}

impl CollectionValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Wraps entries whose keys are already known to be distinct.
    pub(crate) fn from_unique(entries: Vec<(String, ValueNode)>) -> Self {
        Self { entries }
    }

    /// Inserts or replaces the value for `id_short`, returning the old one.
    pub fn insert(&mut self, id_short: impl Into<String>, value: ValueNode) -> Option<ValueNode> {
        let id_short = id_short.into();
        match self.entries.iter_mut().find(|(k, _)| *k == id_short) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((id_short, value));
                None
            }
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, id_short: impl Into<String>, value: ValueNode) -> Self {
        self.insert(id_short, value);
        self
    }

    pub fn get(&self, id_short: &str) -> Option<&ValueNode> {
        self.entries
            .iter()
            .find(|(k, _)| k == id_short)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, id_short: &str) -> bool {
        self.get(id_short).is_some()
    }

    pub fn remove(&mut self, id_short: &str) -> Option<ValueNode> {
        let position = self.entries.iter().position(|(k, _)| k == id_short)?;
        Some(self.entries.remove(position).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValueNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, ValueNode)> for CollectionValue {
    fn from_iter<I: IntoIterator<Item = (String, ValueNode)>>(iter: I) -> Self {
        let mut collection = CollectionValue::new();
        for (k, v) in iter {
            collection.insert(k, v);
        }
        collection
    }
}

impl IntoIterator for CollectionValue {
    type Item = (String, ValueNode);
    type IntoIter = std::vec::IntoIter<(String, ValueNode)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
