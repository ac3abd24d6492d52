//! Shared routines for child sequences.
//!
//! Collections, entity statements and submodels address children by
//! idShort; lists address them by position; annotations and operation
//! variables are positional but keep their idShort alongside each value.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::MappingError;
use crate::mapper::ValueMapper;
use crate::model::{OperationVariable, SubmodelElement};
use crate::value::{CollectionValue, ValueNode, ValueOnly};

/// A positional slot holding one element.
pub(crate) trait Slot {
    fn element(&self) -> &SubmodelElement;
    fn element_mut(&mut self) -> &mut SubmodelElement;
}

impl Slot for SubmodelElement {
    fn element(&self) -> &SubmodelElement {
        self
    }

    fn element_mut(&mut self) -> &mut SubmodelElement {
        self
    }
}

impl Slot for OperationVariable {
    fn element(&self) -> &SubmodelElement {
        &self.value
    }

    fn element_mut(&mut self) -> &mut SubmodelElement {
        &mut self.value
    }
}

/// Maps each idShort to the position of its first occurrence.
fn child_index(children: &[SubmodelElement]) -> FxHashMap<&str, usize> {
    let mut index = FxHashMap::default();
    index.reserve(children.len());
    for (position, child) in children.iter().enumerate() {
        if let Some(id_short) = child.id_short() {
            index.entry(id_short).or_insert(position);
        }
    }
    index
}

/// Reads named children in declaration order.
///
/// Children without an idShort cannot be addressed and are skipped. When
/// siblings share an idShort the first one wins, matching writes.
pub(crate) fn collection_value(children: &[SubmodelElement]) -> CollectionValue {
    let mut seen = FxHashSet::default();
    let mut entries = Vec::with_capacity(children.len());
    for child in children {
        if let Some(id_short) = child.id_short() {
            if seen.insert(id_short) {
                entries.push((id_short.to_string(), child.value()));
            }
        }
    }
    CollectionValue::from_unique(entries)
}

pub(crate) fn check_collection(
    children: &[SubmodelElement],
    value: &CollectionValue,
) -> Result<(), MappingError> {
    let index = child_index(children);
    for (id_short, child_value) in value.iter() {
        let position = index
            .get(id_short)
            .ok_or_else(|| MappingError::unknown_child(id_short))?;
        children[*position].check_value(child_value)?;
    }
    Ok(())
}

/// Writes each entry onto the child with the same idShort.
///
/// Children not named in `value` keep their values.
pub(crate) fn apply_collection(children: &mut [SubmodelElement], value: CollectionValue) {
    let targets: Vec<(usize, ValueNode)> = {
        let index = child_index(children);
        value
            .into_iter()
            .filter_map(|(id_short, v)| index.get(id_short.as_str()).map(|&p| (p, v)))
            .collect()
    };
    for (position, child_value) in targets {
        children[position].apply_value(child_value);
    }
}

pub(crate) fn list_value(items: &[SubmodelElement]) -> Vec<ValueNode> {
    items.iter().map(SubmodelElement::value).collect()
}

pub(crate) fn check_list(items: &[SubmodelElement], values: &[ValueNode]) -> Result<(), MappingError> {
    if items.len() != values.len() {
        return Err(MappingError::length(items.len(), values.len()));
    }
    for (item, value) in items.iter().zip(values) {
        item.check_value(value)?;
    }
    Ok(())
}

pub(crate) fn apply_list(items: &mut [SubmodelElement], values: Vec<ValueNode>) {
    for (item, value) in items.iter_mut().zip(values) {
        item.apply_value(value);
    }
}

pub(crate) fn value_only_sequence<S: Slot>(slots: &[S]) -> Vec<ValueOnly> {
    slots
        .iter()
        .map(|slot| {
            let element = slot.element();
            ValueOnly::new(element.id_short().unwrap_or_default(), element.value())
        })
        .collect()
}

pub(crate) fn check_value_only_sequence<S: Slot>(
    slots: &[S],
    values: &[ValueOnly],
) -> Result<(), MappingError> {
    if slots.len() != values.len() {
        return Err(MappingError::length(slots.len(), values.len()));
    }
    for (slot, value) in slots.iter().zip(values) {
        let element = slot.element();
        if element.id_short().unwrap_or_default() != value.id_short {
            return Err(MappingError::unknown_child(value.id_short.as_str()));
        }
        element.check_value(&value.value)?;
    }
    Ok(())
}

pub(crate) fn apply_value_only_sequence<S: Slot>(slots: &mut [S], values: Vec<ValueOnly>) {
    for (slot, value) in slots.iter_mut().zip(values) {
        let element = slot.element_mut();
        if element.id_short().unwrap_or_default() == value.id_short {
            element.apply_value(value.value);
        }
    }
}
