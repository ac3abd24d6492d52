//! Submodels: the root of an element tree.

use crate::error::{Error, MappingError, PathError};
use crate::mapper::sequence;
use crate::mapper::ValueMapper;
use crate::model::{IdShortPath, LangString, Reference, SubmodelElement};
use crate::value::{CollectionValue, ValueNode};

/// A submodel and its top-level elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Submodel {
    pub id: String,
    pub id_short: Option<String>,
    pub semantic_id: Option<Reference>,
    pub description: Vec<LangString>,
    pub submodel_elements: Vec<SubmodelElement>,
}

impl Submodel {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Returns the element at `path`.
    pub fn element_at(&self, path: &IdShortPath) -> Result<&SubmodelElement, PathError> {
        path.resolve(&self.submodel_elements)
    }

    pub fn element_at_mut(&mut self, path: &IdShortPath) -> Result<&mut SubmodelElement, PathError> {
        path.resolve_mut(&mut self.submodel_elements)
    }

    /// Reads the value of the element at `path`.
    pub fn value_at(&self, path: &IdShortPath) -> Result<ValueNode, PathError> {
        Ok(self.element_at(path)?.value())
    }

    /// Writes `value` onto the element at `path`.
    pub fn set_value_at(&mut self, path: &IdShortPath, value: ValueNode) -> Result<(), Error> {
        self.element_at_mut(path)?.set_value(value)?;
        Ok(())
    }
}

/// Top-level elements behave like a collection.
impl ValueMapper for Submodel {
    type Value = CollectionValue;

    fn value(&self) -> CollectionValue {
        sequence::collection_value(&self.submodel_elements)
    }

    fn check_value(&self, value: &CollectionValue) -> Result<(), MappingError> {
        sequence::check_collection(&self.submodel_elements, value)
    }

    fn apply_value(&mut self, value: CollectionValue) {
        sequence::apply_collection(&mut self.submodel_elements, value);
    }
}
