//! Error types for value mapping, idShort paths, value-only JSON and validation.

use thiserror::Error;

use crate::model::DataTypeDefXsd;
use crate::value::ValueShape;

/// Detail for a [`MappingError::ValueShapeMismatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeMismatch {
    /// A positional sequence had the wrong number of entries.
    Length { expected: usize, actual: usize },
    /// The value node does not have the shape the element kind requires.
    Kind {
        expected: ValueShape,
        found: ValueShape,
    },
}

impl std::fmt::Display for ShapeMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeMismatch::Length { expected, actual } => {
                write!(f, "expected {} entries, got {}", expected, actual)
            }
            ShapeMismatch::Kind { expected, found } => {
                write!(f, "expected {} value, got {} value", expected, found)
            }
        }
    }
}

/// Error while reading or writing a value through a mapper.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MappingError {
    #[error("unsupported submodel element kind: {kind:?}")]
    UnsupportedElementKind { kind: String },

    #[error("value {raw_value:?} is not a valid {declared_type}")]
    TypeCoercionError {
        declared_type: DataTypeDefXsd,
        raw_value: String,
    },

    #[error("no child element with idShort {id_short:?}")]
    UnknownChildIdentifier { id_short: String },

    #[error("value shape mismatch: {detail}")]
    ValueShapeMismatch { detail: ShapeMismatch },
}

impl MappingError {
    pub(crate) fn length(expected: usize, actual: usize) -> Self {
        MappingError::ValueShapeMismatch {
            detail: ShapeMismatch::Length { expected, actual },
        }
    }

    pub(crate) fn shape(expected: ValueShape, found: ValueShape) -> Self {
        MappingError::ValueShapeMismatch {
            detail: ShapeMismatch::Kind { expected, found },
        }
    }

    pub(crate) fn unknown_child(id_short: impl Into<String>) -> Self {
        MappingError::UnknownChildIdentifier {
            id_short: id_short.into(),
        }
    }
}

/// Error while parsing or resolving an idShort path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("invalid idShort path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("idShort path length {len} exceeds maximum {max}")]
    PathTooLong { len: usize, max: usize },

    #[error("no submodel element at {path:?}")]
    ElementNotFound { path: String },
}

/// Error while translating between value nodes and value-only JSON.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("expected {expected} at {path:?}, found {found}")]
    UnexpectedJson {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("missing field {field:?} at {path:?}")]
    MissingField { path: String, field: &'static str },

    #[error("invalid base64 payload at {path:?}: {message}")]
    InvalidBase64 { path: String, message: String },

    #[error("malformed {what} at {path:?}: {message}")]
    Malformed {
        path: String,
        what: &'static str,
        message: String,
    },

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

/// Structural problem found in a canonical element tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("element under {parent:?} has no idShort")]
    MissingIdShort { parent: String },

    #[error("idShort {id_short:?} is not a valid identifier")]
    InvalidIdShort { id_short: String },

    #[error("duplicate idShort {id_short:?} under {parent:?}")]
    DuplicateIdShort { parent: String, id_short: String },

    #[error("list {list:?} item {index} is a {found}, expected {expected}")]
    ListElementKindMismatch {
        list: String,
        index: usize,
        expected: crate::model::ElementKind,
        found: crate::model::ElementKind,
    },

    #[error("list {list:?} item {index} has value type {found}, expected {expected}")]
    ListValueTypeMismatch {
        list: String,
        index: usize,
        expected: DataTypeDefXsd,
        found: DataTypeDefXsd,
    },

    #[error("annotation {id_short:?} is a {kind}, annotations must be data elements")]
    InvalidAnnotationKind {
        id_short: String,
        kind: crate::model::ElementKind,
    },

    #[error("{path:?} holds {raw_value:?}, which is not a valid {value_type}")]
    InvalidValue {
        path: String,
        value_type: DataTypeDefXsd,
        raw_value: String,
    },
}

/// Umbrella error for the path-addressed value-only entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Error {
    /// Returns the underlying mapping error, if this failure came from a mapper.
    pub fn as_mapping(&self) -> Option<&MappingError> {
        match self {
            Error::Mapping(e) | Error::Codec(CodecError::Mapping(e)) => Some(e),
            _ => None,
        }
    }
}
