//! Kind-erased value nodes.
//!
//! A [`ValueNode`] carries only the value-bearing attributes of an element:
//! no idShort, semantics or declared types. Interpreting one requires the
//! canonical element it was read from (or will be written to).

pub mod collection;
pub mod data;
pub mod entity;

pub use collection::CollectionValue;
pub use data::{
    AnnotatedRelationshipValue, BasicEventValue, BlobValue, FileValue, OperationValue, RangeValue,
    RelationshipValue,
};
pub use entity::{EntityValue, SpecificAssetIdValue};

use crate::model::{LangString, Reference};

/// The value of one submodel element.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueNode {
    /// Property value in lexical form, `None` when unknown.
    Scalar(Option<String>),
    /// Multi-language text, in stored order.
    MultiLanguage(Vec<LangString>),
    Range(RangeValue),
    Blob(BlobValue),
    File(FileValue),
    /// Reference element value, `None` when unset.
    Reference(Option<Reference>),
    Relationship(RelationshipValue),
    AnnotatedRelationship(AnnotatedRelationshipValue),
    Entity(EntityValue),
    Operation(OperationValue),
    Event(BasicEventValue),
    /// Children keyed by idShort, in declaration order.
    Collection(CollectionValue),
    /// Children by position.
    List(Vec<ValueNode>),
    /// Kinds without a value (capabilities).
    Empty,
}

/// The shape of a [`ValueNode`], used in mismatch errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueShape {
    Scalar,
    MultiLanguage,
    Range,
    Blob,
    File,
    Reference,
    Relationship,
    AnnotatedRelationship,
    Entity,
    Operation,
    Event,
    Collection,
    List,
    Empty,
}

impl ValueShape {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueShape::Scalar => "scalar",
            ValueShape::MultiLanguage => "multi-language",
            ValueShape::Range => "range",
            ValueShape::Blob => "blob",
            ValueShape::File => "file",
            ValueShape::Reference => "reference",
            ValueShape::Relationship => "relationship",
            ValueShape::AnnotatedRelationship => "annotated relationship",
            ValueShape::Entity => "entity",
            ValueShape::Operation => "operation",
            ValueShape::Event => "event",
            ValueShape::Collection => "collection",
            ValueShape::List => "list",
            ValueShape::Empty => "empty",
        }
    }
}

impl std::fmt::Display for ValueShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ValueNode {
    /// Returns the shape of this value.
    pub fn shape(&self) -> ValueShape {
        match self {
            ValueNode::Scalar(_) => ValueShape::Scalar,
            ValueNode::MultiLanguage(_) => ValueShape::MultiLanguage,
            ValueNode::Range(_) => ValueShape::Range,
            ValueNode::Blob(_) => ValueShape::Blob,
            ValueNode::File(_) => ValueShape::File,
            ValueNode::Reference(_) => ValueShape::Reference,
            ValueNode::Relationship(_) => ValueShape::Relationship,
            ValueNode::AnnotatedRelationship(_) => ValueShape::AnnotatedRelationship,
            ValueNode::Entity(_) => ValueShape::Entity,
            ValueNode::Operation(_) => ValueShape::Operation,
            ValueNode::Event(_) => ValueShape::Event,
            ValueNode::Collection(_) => ValueShape::Collection,
            ValueNode::List(_) => ValueShape::List,
            ValueNode::Empty => ValueShape::Empty,
        }
    }

    /// Shorthand for a present scalar.
    pub fn scalar(value: impl Into<String>) -> Self {
        ValueNode::Scalar(Some(value.into()))
    }

    /// Returns the scalar text, if this is a present scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ValueNode::Scalar(value) => value.as_deref(),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&CollectionValue> {
        match self {
            ValueNode::Collection(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ValueNode]> {
        match self {
            ValueNode::List(items) => Some(items),
            _ => None,
        }
    }
}

/// A value paired with the idShort of the element it belongs to.
///
/// Used for positional sequences that still name their slots: annotations
/// and operation variables.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueOnly {
    pub id_short: String,
    pub value: ValueNode,
}

impl ValueOnly {
    pub fn new(id_short: impl Into<String>, value: ValueNode) -> Self {
        Self {
            id_short: id_short.into(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_and_accessors() {
        let scalar = ValueNode::scalar("42");
        assert_eq!(scalar.shape(), ValueShape::Scalar);
        assert_eq!(scalar.as_scalar(), Some("42"));
        assert_eq!(ValueNode::Scalar(None).as_scalar(), None);

        let list = ValueNode::List(vec![ValueNode::Empty]);
        assert_eq!(list.shape(), ValueShape::List);
        assert_eq!(list.as_list().map(<[ValueNode]>::len), Some(1));
        assert!(list.as_collection().is_none());
    }

    #[test]
    fn test_shape_display() {
        assert_eq!(ValueShape::AnnotatedRelationship.to_string(), "annotated relationship");
        assert_eq!(ValueShape::Collection.to_string(), "collection");
    }
}
