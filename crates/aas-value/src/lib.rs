//! Value-only mapping for Asset Administration Shell submodels.
//!
//! This crate reads and writes the *values* of a submodel element tree
//! without its schema envelope, using the typed tree as the schema for
//! untyped incoming values.
//!
//! # Overview
//!
//! - **Typed tree**: [`SubmodelElement`] is a closed enum over the concrete
//!   element kinds; each kind carries its metadata and its value.
//! - **Value nodes**: [`ValueNode`] is the kind-erased value of an element.
//!   It has no type tags; a collection value is an ordered idShort map and
//!   a list value is positional.
//! - **Mappers**: every kind implements [`ValueMapper`]. Writes check the
//!   whole value first, so a rejected write leaves the tree untouched.
//!
//! # Quick Start
//!
//! ```rust
//! use aas_value::model::builder::SubmodelBuilder;
//! use aas_value::model::{DataTypeDefXsd, ElementKind};
//! use aas_value::codec::{read_value_only, write_value_only, ValueOnlyOptions};
//! use aas_value::{IdShortPath, MappingError, ValueMapper, ValueNode};
//! use serde_json::json;
//!
//! let mut submodel = SubmodelBuilder::new("urn:example:sm:operational")
//!     .id_short("OperationalData")
//!     .elements(|e| e
//!         .property("Status", DataTypeDefXsd::String, "running")
//!         .collection("Sensors", |c| c
//!             .property("Temperature", DataTypeDefXsd::Double, "21.5")
//!             .list("History", ElementKind::Property, |l| l
//!                 .property(DataTypeDefXsd::Double, "20.9")
//!                 .property(DataTypeDefXsd::Double, "21.1")
//!             )
//!         )
//!     )
//!     .build();
//!
//! // Read values as JSON
//! let json = read_value_only(&submodel, None, &ValueOnlyOptions::default()).unwrap();
//! assert_eq!(json["Sensors"]["Temperature"], "21.5");
//!
//! // Partial update of one collection
//! let path = IdShortPath::parse("Sensors").unwrap();
//! write_value_only(&mut submodel, Some(&path), &json!({"Temperature": "22.0"})).unwrap();
//!
//! // Typed access to a single element
//! let reading = IdShortPath::parse("Sensors.History[1]").unwrap();
//! assert_eq!(submodel.value_at(&reading).unwrap(), ValueNode::scalar("21.1"));
//!
//! // Values are checked against the declared type
//! let err = submodel.set_value_at(&reading, ValueNode::scalar("warm")).unwrap_err();
//! assert!(matches!(err.as_mapping(), Some(MappingError::TypeCoercionError { .. })));
//! ```
//!
//! # Modules
//!
//! - [`model`]: Typed element tree, submodels, idShort paths, builders
//! - [`value`]: Kind-erased value nodes
//! - [`mapper`]: The [`ValueMapper`] trait and its per-kind impls
//! - [`codec`]: Value-only JSON encoding and decoding
//! - [`validate`]: Structural validation of element trees
//! - [`error`]: Error types
//! - [`limits`]: Limits for untrusted input
//!
//! # Concurrency
//!
//! Mappers borrow the tree for one call and hold no state. Writes mutate
//! in place, so callers sharing a document across threads must serialize
//! writes to it.

pub mod codec;
pub mod error;
pub mod limits;
pub mod mapper;
pub mod model;
pub mod util;
pub mod validate;
pub mod value;

// Re-export commonly used types at crate root
pub use codec::{
    decode_element, decode_submodel, encode_element, encode_submodel, read_value_only,
    write_value_only, ValueOnlyOptions,
};
pub use error::{CodecError, Error, MappingError, PathError, ShapeMismatch, ValidationError};
pub use mapper::ValueMapper;
pub use model::{
    DataTypeDefXsd, ElementKind, EntityType, IdShortPath, LangString, Reference, Submodel,
    SubmodelElement,
};
pub use validate::{validate_element, validate_submodel};
pub use value::{CollectionValue, EntityValue, SpecificAssetIdValue, ValueNode, ValueOnly, ValueShape};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
