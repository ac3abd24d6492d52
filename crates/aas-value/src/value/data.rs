//! Value carriers for the fixed-shape element kinds.

use crate::model::Reference;
use crate::value::ValueOnly;

/// Range bounds in lexical form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RangeValue {
    pub min: Option<String>,
    pub max: Option<String>,
}

/// Blob content with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlobValue {
    pub content_type: String,
    pub value: Option<Vec<u8>>,
}

/// File path or URI with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileValue {
    pub content_type: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelationshipValue {
    pub first: Reference,
    pub second: Reference,
}

/// Relationship references plus annotation values, by position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnotatedRelationshipValue {
    pub first: Reference,
    pub second: Reference,
    pub annotations: Vec<ValueOnly>,
}

/// Operation argument values, by position within each slot group.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OperationValue {
    pub input_variables: Vec<ValueOnly>,
    pub output_variables: Vec<ValueOnly>,
    pub inoutput_variables: Vec<ValueOnly>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasicEventValue {
    pub observed: Reference,
}
