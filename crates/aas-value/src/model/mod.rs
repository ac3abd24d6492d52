//! Canonical document model.
//!
//! This module contains the typed element tree the value mappers operate on:
//! - References and keys
//! - Declared value types (`xs:` datatypes)
//! - Submodel elements (one struct per kind, closed under [`SubmodelElement`])
//! - Submodels and idShort paths
//! - Builders (ergonomic construction)

pub mod builder;
pub mod element;
pub mod path;
pub mod reference;
pub mod submodel;
pub mod xsd;

pub use builder::{ElementsBuilder, EntityBuilder, ListBuilder, OperationBuilder, SubmodelBuilder};
pub use element::{
    find_child, find_child_mut, AnnotatedRelationshipElement, BasicEventElement, Blob, Capability,
    Direction, ElementKind, Entity, EntityType, File, LangString, MultiLanguageProperty, Operation,
    OperationVariable, Property, Range, ReferenceElement, RelationshipElement, SpecificAssetId,
    StateOfEvent, SubmodelElement, SubmodelElementCollection, SubmodelElementList,
};
pub use path::{IdShortPath, PathSegment};
pub use reference::{Key, KeyTypes, Reference, ReferenceTypes};
pub use submodel::Submodel;
pub use xsd::DataTypeDefXsd;
