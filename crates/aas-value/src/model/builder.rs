//! Builder API for ergonomic element tree construction.
//!
//! Nested containers take a closure receiving a child builder, so a tree
//! reads top-down the way it is declared.
//!
//! # Example
//!
//! ```rust
//! use aas_value::model::builder::SubmodelBuilder;
//! use aas_value::model::{DataTypeDefXsd, ElementKind, EntityType};
//!
//! let submodel = SubmodelBuilder::new("urn:example:sm:nameplate")
//!     .id_short("Nameplate")
//!     .elements(|e| e
//!         .property("ManufacturerName", DataTypeDefXsd::String, "ACME")
//!         .collection("Address", |c| c
//!             .property("Street", DataTypeDefXsd::String, "Main St 1")
//!             .property("Zip", DataTypeDefXsd::Int, "12345")
//!         )
//!         .list("Markings", ElementKind::Property, |l| l
//!             .value_type(DataTypeDefXsd::String)
//!             .property(DataTypeDefXsd::String, "CE")
//!         )
//!         .entity("Motor", EntityType::SelfManagedEntity, |m| m
//!             .global_asset_id("urn:example:asset:motor")
//!         )
//!     )
//!     .build();
//!
//! assert_eq!(submodel.submodel_elements.len(), 4);
//! ```

use crate::model::{
    AnnotatedRelationshipElement, BasicEventElement, Blob, Capability, DataTypeDefXsd,
    ElementKind, Entity, EntityType, File, LangString, MultiLanguageProperty, Operation,
    OperationVariable, Property, Range, Reference, ReferenceElement, RelationshipElement,
    SpecificAssetId, Submodel, SubmodelElement, SubmodelElementCollection, SubmodelElementList,
};

/// Builder for a submodel.
#[derive(Debug, Clone)]
pub struct SubmodelBuilder {
    submodel: Submodel,
}

impl SubmodelBuilder {
    /// Creates a builder for a submodel with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            submodel: Submodel::new(id),
        }
    }

    pub fn id_short(mut self, id_short: impl Into<String>) -> Self {
        self.submodel.id_short = Some(id_short.into());
        self
    }

    pub fn semantic_id(mut self, semantic_id: Reference) -> Self {
        self.submodel.semantic_id = Some(semantic_id);
        self
    }

    pub fn description(mut self, language: &str, text: &str) -> Self {
        self.submodel.description.push(LangString::new(language, text));
        self
    }

    /// Appends top-level elements built by `f`.
    pub fn elements<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ElementsBuilder) -> ElementsBuilder,
    {
        self.submodel
            .submodel_elements
            .extend(f(ElementsBuilder::new()).build());
        self
    }

    pub fn build(self) -> Submodel {
        self.submodel
    }
}

/// Builder for a sequence of idShort-named elements.
///
/// Used for submodel elements, collection values, entity statements,
/// annotations and operation variables.
#[derive(Debug, Clone, Default)]
pub struct ElementsBuilder {
    elements: Vec<SubmodelElement>,
}

impl ElementsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a prebuilt element.
    pub fn element(mut self, element: impl Into<SubmodelElement>) -> Self {
        self.elements.push(element.into());
        self
    }

    /// Adds a property with a value.
    pub fn property(
        self,
        id_short: impl Into<String>,
        value_type: DataTypeDefXsd,
        value: impl Into<String>,
    ) -> Self {
        self.element(Property {
            id_short: Some(id_short.into()),
            value_type,
            value: Some(value.into()),
            ..Default::default()
        })
    }

    /// Adds a property whose value is not yet known.
    pub fn empty_property(self, id_short: impl Into<String>, value_type: DataTypeDefXsd) -> Self {
        self.element(Property {
            id_short: Some(id_short.into()),
            value_type,
            ..Default::default()
        })
    }

    /// Adds a multi-language property from `(language, text)` pairs.
    pub fn multi_language(self, id_short: impl Into<String>, texts: &[(&str, &str)]) -> Self {
        self.element(MultiLanguageProperty {
            id_short: Some(id_short.into()),
            value: lang_strings(texts),
            ..Default::default()
        })
    }

    pub fn range(
        self,
        id_short: impl Into<String>,
        value_type: DataTypeDefXsd,
        min: impl Into<String>,
        max: impl Into<String>,
    ) -> Self {
        self.element(Range {
            id_short: Some(id_short.into()),
            value_type,
            min: Some(min.into()),
            max: Some(max.into()),
            ..Default::default()
        })
    }

    pub fn blob(
        self,
        id_short: impl Into<String>,
        content_type: impl Into<String>,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        self.element(Blob {
            id_short: Some(id_short.into()),
            content_type: content_type.into(),
            value: Some(value.into()),
            ..Default::default()
        })
    }

    pub fn file(
        self,
        id_short: impl Into<String>,
        content_type: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        self.element(File {
            id_short: Some(id_short.into()),
            content_type: content_type.into(),
            value: Some(path.into()),
            ..Default::default()
        })
    }

    pub fn reference(self, id_short: impl Into<String>, value: Reference) -> Self {
        self.element(ReferenceElement {
            id_short: Some(id_short.into()),
            value: Some(value),
            ..Default::default()
        })
    }

    pub fn relationship(
        self,
        id_short: impl Into<String>,
        first: Reference,
        second: Reference,
    ) -> Self {
        self.element(RelationshipElement {
            id_short: Some(id_short.into()),
            first,
            second,
            ..Default::default()
        })
    }

    /// Adds an annotated relationship with annotations built by `f`.
    pub fn annotated_relationship<F>(
        self,
        id_short: impl Into<String>,
        first: Reference,
        second: Reference,
        f: F,
    ) -> Self
    where
        F: FnOnce(ElementsBuilder) -> ElementsBuilder,
    {
        self.element(AnnotatedRelationshipElement {
            id_short: Some(id_short.into()),
            first,
            second,
            annotations: f(ElementsBuilder::new()).build(),
            ..Default::default()
        })
    }

    /// Adds an entity configured by `f`.
    pub fn entity<F>(self, id_short: impl Into<String>, entity_type: EntityType, f: F) -> Self
    where
        F: FnOnce(EntityBuilder) -> EntityBuilder,
    {
        let mut entity = f(EntityBuilder::new(entity_type)).build();
        entity.id_short = Some(id_short.into());
        self.element(entity)
    }

    /// Adds an operation whose variables are built by `f`.
    pub fn operation<F>(self, id_short: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(OperationBuilder) -> OperationBuilder,
    {
        let mut operation = f(OperationBuilder::default()).build();
        operation.id_short = Some(id_short.into());
        self.element(operation)
    }

    pub fn capability(self, id_short: impl Into<String>) -> Self {
        self.element(Capability {
            id_short: Some(id_short.into()),
            ..Default::default()
        })
    }

    /// Adds a basic event element observing `observed`.
    pub fn event(self, id_short: impl Into<String>, observed: Reference) -> Self {
        self.element(BasicEventElement {
            id_short: Some(id_short.into()),
            observed,
            ..Default::default()
        })
    }

    /// Adds a collection with children built by `f`.
    pub fn collection<F>(self, id_short: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(ElementsBuilder) -> ElementsBuilder,
    {
        self.element(SubmodelElementCollection {
            id_short: Some(id_short.into()),
            value: f(ElementsBuilder::new()).build(),
            ..Default::default()
        })
    }

    /// Adds a list of `kind` items built by `f`.
    pub fn list<F>(self, id_short: impl Into<String>, kind: ElementKind, f: F) -> Self
    where
        F: FnOnce(ListBuilder) -> ListBuilder,
    {
        let list = f(ListBuilder::new(kind)).build();
        self.element(SubmodelElementList {
            id_short: Some(id_short.into()),
            ..list
        })
    }

    pub fn build(self) -> Vec<SubmodelElement> {
        self.elements
    }
}

/// Builder for list items. Items never carry an idShort.
#[derive(Debug, Clone)]
pub struct ListBuilder {
    list: SubmodelElementList,
}

impl ListBuilder {
    fn new(kind: ElementKind) -> Self {
        Self {
            list: SubmodelElementList {
                id_short: None,
                semantic_id: None,
                description: Vec::new(),
                order_relevant: true,
                type_value_list_element: kind,
                value_type_list_element: None,
                value: Vec::new(),
            },
        }
    }

    /// Declares the value type shared by property or range items.
    pub fn value_type(mut self, value_type: DataTypeDefXsd) -> Self {
        self.list.value_type_list_element = Some(value_type);
        self
    }

    pub fn order_relevant(mut self, order_relevant: bool) -> Self {
        self.list.order_relevant = order_relevant;
        self
    }

    /// Adds a prebuilt item, clearing its idShort.
    pub fn item(mut self, item: impl Into<SubmodelElement>) -> Self {
        let mut item = item.into();
        item.set_id_short(None);
        self.list.value.push(item);
        self
    }

    pub fn property(self, value_type: DataTypeDefXsd, value: impl Into<String>) -> Self {
        self.item(Property {
            value_type,
            value: Some(value.into()),
            ..Default::default()
        })
    }

    pub fn collection<F>(self, f: F) -> Self
    where
        F: FnOnce(ElementsBuilder) -> ElementsBuilder,
    {
        self.item(SubmodelElementCollection {
            value: f(ElementsBuilder::new()).build(),
            ..Default::default()
        })
    }

    pub fn entity<F>(self, entity_type: EntityType, f: F) -> Self
    where
        F: FnOnce(EntityBuilder) -> EntityBuilder,
    {
        self.item(f(EntityBuilder::new(entity_type)).build())
    }

    /// Adds a nested list item.
    pub fn list<F>(self, kind: ElementKind, f: F) -> Self
    where
        F: FnOnce(ListBuilder) -> ListBuilder,
    {
        self.item(f(ListBuilder::new(kind)).build())
    }

    fn build(self) -> SubmodelElementList {
        self.list
    }
}

/// Builder for an entity.
#[derive(Debug, Clone)]
pub struct EntityBuilder {
    entity: Entity,
}

impl EntityBuilder {
    fn new(entity_type: EntityType) -> Self {
        Self {
            entity: Entity {
                entity_type,
                ..Default::default()
            },
        }
    }

    pub fn global_asset_id(mut self, id: impl Into<String>) -> Self {
        self.entity.global_asset_id = Some(id.into());
        self
    }

    pub fn specific_asset_id(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entity.specific_asset_ids.push(SpecificAssetId {
            name: name.into(),
            value: value.into(),
            ..Default::default()
        });
        self
    }

    /// Adds a specific asset id scoped to an external subject.
    pub fn specific_asset_id_with_subject(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        external_subject_id: Reference,
    ) -> Self {
        self.entity.specific_asset_ids.push(SpecificAssetId {
            name: name.into(),
            value: value.into(),
            external_subject_id: Some(external_subject_id),
            semantic_id: None,
        });
        self
    }

    /// Appends statements built by `f`.
    pub fn statements<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ElementsBuilder) -> ElementsBuilder,
    {
        self.entity
            .statements
            .extend(f(ElementsBuilder::new()).build());
        self
    }

    fn build(self) -> Entity {
        self.entity
    }
}

/// Builder for operation variables.
#[derive(Debug, Clone, Default)]
pub struct OperationBuilder {
    operation: Operation,
}

impl OperationBuilder {
    pub fn input<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ElementsBuilder) -> ElementsBuilder,
    {
        self.operation.input_variables.extend(variables(f));
        self
    }

    pub fn output<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ElementsBuilder) -> ElementsBuilder,
    {
        self.operation.output_variables.extend(variables(f));
        self
    }

    pub fn inoutput<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ElementsBuilder) -> ElementsBuilder,
    {
        self.operation.inoutput_variables.extend(variables(f));
        self
    }

    fn build(self) -> Operation {
        self.operation
    }
}

fn variables<F>(f: F) -> impl Iterator<Item = OperationVariable>
where
    F: FnOnce(ElementsBuilder) -> ElementsBuilder,
{
    f(ElementsBuilder::new())
        .build()
        .into_iter()
        .map(|value| OperationVariable { value })
}

fn lang_strings(texts: &[(&str, &str)]) -> Vec<LangString> {
    texts
        .iter()
        .map(|(language, text)| LangString::new(*language, *text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elements_builder_kinds() {
        let elements = ElementsBuilder::new()
            .property("P", DataTypeDefXsd::Int, "1")
            .empty_property("Unknown", DataTypeDefXsd::Double)
            .multi_language("Title", &[("en", "Pump"), ("de", "Pumpe")])
            .range("Limits", DataTypeDefXsd::Double, "0", "10")
            .blob("Thumbnail", "image/png", vec![0x89, 0x50])
            .file("Manual", "application/pdf", "/docs/manual.pdf")
            .reference("Ref", Reference::global("urn:x"))
            .relationship("Rel", Reference::global("urn:a"), Reference::global("urn:b"))
            .capability("CanPump")
            .event("Alarm", Reference::global("urn:alarm"))
            .build();

        let kinds: Vec<_> = elements.iter().map(SubmodelElement::kind).collect();
        assert_eq!(
            kinds,
            [
                ElementKind::Property,
                ElementKind::Property,
                ElementKind::MultiLanguageProperty,
                ElementKind::Range,
                ElementKind::Blob,
                ElementKind::File,
                ElementKind::ReferenceElement,
                ElementKind::RelationshipElement,
                ElementKind::Capability,
                ElementKind::BasicEventElement,
            ]
        );
        match &elements[1] {
            SubmodelElement::Property(p) => assert_eq!(p.value, None),
            _ => panic!("expected property"),
        }
    }

    #[test]
    fn test_list_items_have_no_id_short() {
        let elements = ElementsBuilder::new()
            .list("Values", ElementKind::Property, |l| {
                l.value_type(DataTypeDefXsd::Int)
                    .property(DataTypeDefXsd::Int, "1")
                    .item(Property {
                        id_short: Some("Named".to_string()),
                        value_type: DataTypeDefXsd::Int,
                        value: Some("2".to_string()),
                        ..Default::default()
                    })
            })
            .build();

        let SubmodelElement::SubmodelElementList(list) = &elements[0] else {
            panic!("expected list");
        };
        assert_eq!(list.id_short.as_deref(), Some("Values"));
        assert_eq!(list.value_type_list_element, Some(DataTypeDefXsd::Int));
        assert_eq!(list.value.len(), 2);
        assert!(list.value.iter().all(|item| item.id_short().is_none()));
    }

    #[test]
    fn test_entity_and_operation_builders() {
        let elements = ElementsBuilder::new()
            .entity("Motor", EntityType::SelfManagedEntity, |e| {
                e.global_asset_id("urn:asset:motor")
                    .specific_asset_id("serialNumber", "SN-1")
                    .specific_asset_id_with_subject("lot", "7", Reference::global("urn:acme"))
                    .statements(|s| s.property("Power", DataTypeDefXsd::Double, "7.5"))
            })
            .operation("Start", |o| {
                o.input(|v| v.property("Speed", DataTypeDefXsd::Int, "0"))
                    .output(|v| v.property("Ok", DataTypeDefXsd::Boolean, "false"))
            })
            .build();

        let SubmodelElement::Entity(entity) = &elements[0] else {
            panic!("expected entity");
        };
        assert_eq!(entity.id_short.as_deref(), Some("Motor"));
        assert_eq!(entity.entity_type, EntityType::SelfManagedEntity);
        assert_eq!(entity.specific_asset_ids.len(), 2);
        assert!(entity.specific_asset_ids[1].external_subject_id.is_some());
        assert_eq!(entity.statements.len(), 1);

        let SubmodelElement::Operation(operation) = &elements[1] else {
            panic!("expected operation");
        };
        assert_eq!(operation.input_variables.len(), 1);
        assert_eq!(operation.output_variables.len(), 1);
        assert!(operation.inoutput_variables.is_empty());
    }

    #[test]
    fn test_submodel_builder() {
        let submodel = SubmodelBuilder::new("urn:sm:1")
            .id_short("Technical")
            .semantic_id(Reference::global("urn:sem:technical"))
            .description("en", "Technical data")
            .elements(|e| e.property("A", DataTypeDefXsd::String, "a"))
            .elements(|e| e.property("B", DataTypeDefXsd::String, "b"))
            .build();

        assert_eq!(submodel.id, "urn:sm:1");
        assert_eq!(submodel.id_short.as_deref(), Some("Technical"));
        assert_eq!(submodel.description.len(), 1);
        let ids: Vec<_> = submodel
            .submodel_elements
            .iter()
            .filter_map(SubmodelElement::id_short)
            .collect();
        assert_eq!(ids, ["A", "B"]);
    }
}
