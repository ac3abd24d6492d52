//! Submodel element kinds.
//!
//! The element family is closed: [`SubmodelElement`] enumerates every
//! concrete kind, so adding a kind is a compile error at each exhaustive
//! match until it is handled.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MappingError;
use crate::model::{DataTypeDefXsd, Reference};
use crate::value::ValueShape;

/// Runtime kind tag of a submodel element (the AAS `modelType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Property,
    MultiLanguageProperty,
    Range,
    Blob,
    File,
    ReferenceElement,
    RelationshipElement,
    AnnotatedRelationshipElement,
    Entity,
    Operation,
    Capability,
    BasicEventElement,
    SubmodelElementCollection,
    SubmodelElementList,
}

impl ElementKind {
    pub const ALL: [ElementKind; 14] = [
        ElementKind::Property,
        ElementKind::MultiLanguageProperty,
        ElementKind::Range,
        ElementKind::Blob,
        ElementKind::File,
        ElementKind::ReferenceElement,
        ElementKind::RelationshipElement,
        ElementKind::AnnotatedRelationshipElement,
        ElementKind::Entity,
        ElementKind::Operation,
        ElementKind::Capability,
        ElementKind::BasicEventElement,
        ElementKind::SubmodelElementCollection,
        ElementKind::SubmodelElementList,
    ];

    /// Returns the `modelType` name.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Property => "Property",
            ElementKind::MultiLanguageProperty => "MultiLanguageProperty",
            ElementKind::Range => "Range",
            ElementKind::Blob => "Blob",
            ElementKind::File => "File",
            ElementKind::ReferenceElement => "ReferenceElement",
            ElementKind::RelationshipElement => "RelationshipElement",
            ElementKind::AnnotatedRelationshipElement => "AnnotatedRelationshipElement",
            ElementKind::Entity => "Entity",
            ElementKind::Operation => "Operation",
            ElementKind::Capability => "Capability",
            ElementKind::BasicEventElement => "BasicEventElement",
            ElementKind::SubmodelElementCollection => "SubmodelElementCollection",
            ElementKind::SubmodelElementList => "SubmodelElementList",
        }
    }

    /// Returns the value shape elements of this kind read and write.
    pub fn value_shape(self) -> ValueShape {
        match self {
            ElementKind::Property => ValueShape::Scalar,
            ElementKind::MultiLanguageProperty => ValueShape::MultiLanguage,
            ElementKind::Range => ValueShape::Range,
            ElementKind::Blob => ValueShape::Blob,
            ElementKind::File => ValueShape::File,
            ElementKind::ReferenceElement => ValueShape::Reference,
            ElementKind::RelationshipElement => ValueShape::Relationship,
            ElementKind::AnnotatedRelationshipElement => ValueShape::AnnotatedRelationship,
            ElementKind::Entity => ValueShape::Entity,
            ElementKind::Operation => ValueShape::Operation,
            ElementKind::Capability => ValueShape::Empty,
            ElementKind::BasicEventElement => ValueShape::Event,
            ElementKind::SubmodelElementCollection => ValueShape::Collection,
            ElementKind::SubmodelElementList => ValueShape::List,
        }
    }

    /// Returns true for the data element kinds allowed as annotations.
    pub fn is_data_element(self) -> bool {
        matches!(
            self,
            ElementKind::Property
                | ElementKind::MultiLanguageProperty
                | ElementKind::Range
                | ElementKind::Blob
                | ElementKind::File
                | ElementKind::ReferenceElement
        )
    }
}

impl FromStr for ElementKind {
    type Err = MappingError;

    /// Parses a concrete `modelType` name.
    ///
    /// Abstract kinds (`DataElement`, `EventElement`, `SubmodelElement`) and
    /// unknown names are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| MappingError::UnsupportedElementKind {
                kind: s.to_string(),
            })
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text in one language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LangString {
    pub language: String,
    pub text: String,
}

impl LangString {
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            text: text.into(),
        }
    }
}

/// Whether an entity is managed by its own shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntityType {
    #[default]
    CoManagedEntity,
    SelfManagedEntity,
}

/// A name/value pair identifying an asset within some context.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecificAssetId {
    pub name: String,
    pub value: String,
    pub external_subject_id: Option<Reference>,
    pub semantic_id: Option<Reference>,
}

/// Direction of a basic event element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Input,
    Output,
}

/// Whether a basic event element is currently emitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StateOfEvent {
    #[default]
    Off,
    On,
}

/// Data element with a single value of a declared type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Property {
    pub id_short: Option<String>,
    pub semantic_id: Option<Reference>,
    pub description: Vec<LangString>,
    pub value_type: DataTypeDefXsd,
    /// Lexical form; `None` when the value is not yet known.
    pub value: Option<String>,
    pub value_id: Option<Reference>,
}

/// Data element holding text in several languages.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiLanguageProperty {
    pub id_short: Option<String>,
    pub semantic_id: Option<Reference>,
    pub description: Vec<LangString>,
    pub value: Vec<LangString>,
    pub value_id: Option<Reference>,
}

/// Data element spanning `min..=max` of a declared type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Range {
    pub id_short: Option<String>,
    pub semantic_id: Option<Reference>,
    pub description: Vec<LangString>,
    pub value_type: DataTypeDefXsd,
    pub min: Option<String>,
    pub max: Option<String>,
}

/// Data element with inline binary content.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Blob {
    pub id_short: Option<String>,
    pub semantic_id: Option<Reference>,
    pub description: Vec<LangString>,
    pub content_type: String,
    pub value: Option<Vec<u8>>,
}

/// Data element pointing at a file by path or URI.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct File {
    pub id_short: Option<String>,
    pub semantic_id: Option<Reference>,
    pub description: Vec<LangString>,
    pub content_type: String,
    pub value: Option<String>,
}

/// Data element holding a single reference.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReferenceElement {
    pub id_short: Option<String>,
    pub semantic_id: Option<Reference>,
    pub description: Vec<LangString>,
    pub value: Option<Reference>,
}

/// Relationship between two referenced elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RelationshipElement {
    pub id_short: Option<String>,
    pub semantic_id: Option<Reference>,
    pub description: Vec<LangString>,
    pub first: Reference,
    pub second: Reference,
}

/// Relationship carrying annotation data elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnotatedRelationshipElement {
    pub id_short: Option<String>,
    pub semantic_id: Option<Reference>,
    pub description: Vec<LangString>,
    pub first: Reference,
    pub second: Reference,
    pub annotations: Vec<SubmodelElement>,
}

/// A physical or virtual thing with its own statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entity {
    pub id_short: Option<String>,
    pub semantic_id: Option<Reference>,
    pub description: Vec<LangString>,
    pub entity_type: EntityType,
    pub global_asset_id: Option<String>,
    pub specific_asset_ids: Vec<SpecificAssetId>,
    pub statements: Vec<SubmodelElement>,
}

/// One argument slot of an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationVariable {
    pub value: SubmodelElement,
}

/// Callable operation with positional argument slots.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Operation {
    pub id_short: Option<String>,
    pub semantic_id: Option<Reference>,
    pub description: Vec<LangString>,
    pub input_variables: Vec<OperationVariable>,
    pub output_variables: Vec<OperationVariable>,
    pub inoutput_variables: Vec<OperationVariable>,
}

/// Capability marker; carries no value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Capability {
    pub id_short: Option<String>,
    pub semantic_id: Option<Reference>,
    pub description: Vec<LangString>,
}

/// Event source observing a referenced element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BasicEventElement {
    pub id_short: Option<String>,
    pub semantic_id: Option<Reference>,
    pub description: Vec<LangString>,
    pub observed: Reference,
    pub direction: Direction,
    pub state: StateOfEvent,
    pub message_topic: Option<String>,
}

/// Children addressed by idShort, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubmodelElementCollection {
    pub id_short: Option<String>,
    pub semantic_id: Option<Reference>,
    pub description: Vec<LangString>,
    pub value: Vec<SubmodelElement>,
}

/// Children addressed by position; items carry no idShort.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmodelElementList {
    pub id_short: Option<String>,
    pub semantic_id: Option<Reference>,
    pub description: Vec<LangString>,
    pub order_relevant: bool,
    pub type_value_list_element: ElementKind,
    pub value_type_list_element: Option<DataTypeDefXsd>,
    pub value: Vec<SubmodelElement>,
}

impl SubmodelElementList {
    /// Creates an empty, order-relevant list of the given item kind.
    pub fn new(id_short: impl Into<String>, type_value_list_element: ElementKind) -> Self {
        Self {
            id_short: Some(id_short.into()),
            semantic_id: None,
            description: Vec::new(),
            order_relevant: true,
            type_value_list_element,
            value_type_list_element: None,
            value: Vec::new(),
        }
    }
}

/// A node in the submodel element tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmodelElement {
    Property(Property),
    MultiLanguageProperty(MultiLanguageProperty),
    Range(Range),
    Blob(Blob),
    File(File),
    ReferenceElement(ReferenceElement),
    RelationshipElement(RelationshipElement),
    AnnotatedRelationshipElement(AnnotatedRelationshipElement),
    Entity(Entity),
    Operation(Operation),
    Capability(Capability),
    BasicEventElement(BasicEventElement),
    SubmodelElementCollection(SubmodelElementCollection),
    SubmodelElementList(SubmodelElementList),
}

/// Applies `$body` to the payload of whichever variant `$element` holds.
macro_rules! with_payload {
    ($element:expr, $e:ident => $body:expr) => {
        match $element {
            SubmodelElement::Property($e) => $body,
            SubmodelElement::MultiLanguageProperty($e) => $body,
            SubmodelElement::Range($e) => $body,
            SubmodelElement::Blob($e) => $body,
            SubmodelElement::File($e) => $body,
            SubmodelElement::ReferenceElement($e) => $body,
            SubmodelElement::RelationshipElement($e) => $body,
            SubmodelElement::AnnotatedRelationshipElement($e) => $body,
            SubmodelElement::Entity($e) => $body,
            SubmodelElement::Operation($e) => $body,
            SubmodelElement::Capability($e) => $body,
            SubmodelElement::BasicEventElement($e) => $body,
            SubmodelElement::SubmodelElementCollection($e) => $body,
            SubmodelElement::SubmodelElementList($e) => $body,
        }
    };
}

impl SubmodelElement {
    /// Returns the runtime kind tag.
    pub fn kind(&self) -> ElementKind {
        match self {
            SubmodelElement::Property(_) => ElementKind::Property,
            SubmodelElement::MultiLanguageProperty(_) => ElementKind::MultiLanguageProperty,
            SubmodelElement::Range(_) => ElementKind::Range,
            SubmodelElement::Blob(_) => ElementKind::Blob,
            SubmodelElement::File(_) => ElementKind::File,
            SubmodelElement::ReferenceElement(_) => ElementKind::ReferenceElement,
            SubmodelElement::RelationshipElement(_) => ElementKind::RelationshipElement,
            SubmodelElement::AnnotatedRelationshipElement(_) => {
                ElementKind::AnnotatedRelationshipElement
            }
            SubmodelElement::Entity(_) => ElementKind::Entity,
            SubmodelElement::Operation(_) => ElementKind::Operation,
            SubmodelElement::Capability(_) => ElementKind::Capability,
            SubmodelElement::BasicEventElement(_) => ElementKind::BasicEventElement,
            SubmodelElement::SubmodelElementCollection(_) => {
                ElementKind::SubmodelElementCollection
            }
            SubmodelElement::SubmodelElementList(_) => ElementKind::SubmodelElementList,
        }
    }

    pub fn id_short(&self) -> Option<&str> {
        with_payload!(self, e => e.id_short.as_deref())
    }

    pub fn semantic_id(&self) -> Option<&Reference> {
        with_payload!(self, e => e.semantic_id.as_ref())
    }

    pub fn description(&self) -> &[LangString] {
        with_payload!(self, e => &e.description)
    }

    /// Sets or clears the idShort.
    pub fn set_id_short(&mut self, id_short: Option<String>) {
        with_payload!(self, e => e.id_short = id_short)
    }

    /// Returns the value type declared by a property or range.
    pub fn value_type(&self) -> Option<DataTypeDefXsd> {
        match self {
            SubmodelElement::Property(p) => Some(p.value_type),
            SubmodelElement::Range(r) => Some(r.value_type),
            _ => None,
        }
    }

    /// Returns the children addressable by idShort, if this kind has any.
    ///
    /// Collections expose their values, entities their statements and
    /// annotated relationships their annotations.
    pub fn named_children(&self) -> Option<&[SubmodelElement]> {
        match self {
            SubmodelElement::SubmodelElementCollection(c) => Some(&c.value),
            SubmodelElement::Entity(e) => Some(&e.statements),
            SubmodelElement::AnnotatedRelationshipElement(a) => Some(&a.annotations),
            _ => None,
        }
    }

    /// Mutable counterpart of [`SubmodelElement::named_children`].
    pub fn named_children_mut(&mut self) -> Option<&mut [SubmodelElement]> {
        match self {
            SubmodelElement::SubmodelElementCollection(c) => Some(&mut c.value),
            SubmodelElement::Entity(e) => Some(&mut e.statements),
            SubmodelElement::AnnotatedRelationshipElement(a) => Some(&mut a.annotations),
            _ => None,
        }
    }
}

macro_rules! impl_from_payload {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for SubmodelElement {
                fn from(e: $variant) -> Self {
                    SubmodelElement::$variant(e)
                }
            }
        )*
    };
}

impl_from_payload!(
    Property,
    MultiLanguageProperty,
    Range,
    Blob,
    File,
    ReferenceElement,
    RelationshipElement,
    AnnotatedRelationshipElement,
    Entity,
    Operation,
    Capability,
    BasicEventElement,
    SubmodelElementCollection,
    SubmodelElementList,
);

/// Finds the first child with the given idShort.
pub fn find_child<'a>(children: &'a [SubmodelElement], id_short: &str) -> Option<&'a SubmodelElement> {
    children.iter().find(|c| c.id_short() == Some(id_short))
}

/// Mutable counterpart of [`find_child`].
pub fn find_child_mut<'a>(
    children: &'a mut [SubmodelElement],
    id_short: &str,
) -> Option<&'a mut SubmodelElement> {
    children.iter_mut().find(|c| c.id_short() == Some(id_short))
}
