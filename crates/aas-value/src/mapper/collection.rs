//! Collections (by idShort) and lists (by position).

use crate::error::MappingError;
use crate::mapper::sequence;
use crate::mapper::ValueMapper;
use crate::model::{SubmodelElementCollection, SubmodelElementList};
use crate::value::{CollectionValue, ValueNode};

/// Partial update: children not named in the value are left alone, and a
/// name with no matching child is rejected.
impl ValueMapper for SubmodelElementCollection {
    type Value = CollectionValue;

    fn value(&self) -> CollectionValue {
        sequence::collection_value(&self.value)
    }

    fn check_value(&self, value: &CollectionValue) -> Result<(), MappingError> {
        sequence::check_collection(&self.value, value)
    }

    fn apply_value(&mut self, value: CollectionValue) {
        sequence::apply_collection(&mut self.value, value);
    }
}

/// Item `i` of the value is written to item `i` of the list. The lengths
/// must match; lists are never grown or truncated by a value write.
impl ValueMapper for SubmodelElementList {
    type Value = Vec<ValueNode>;

    fn value(&self) -> Vec<ValueNode> {
        sequence::list_value(&self.value)
    }

    fn check_value(&self, value: &Vec<ValueNode>) -> Result<(), MappingError> {
        sequence::check_list(&self.value, value)
    }

    fn apply_value(&mut self, value: Vec<ValueNode>) {
        sequence::apply_list(&mut self.value, value);
    }
}
