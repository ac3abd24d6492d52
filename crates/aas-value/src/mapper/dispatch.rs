//! Kind dispatch: the [`ValueMapper`] impl for [`SubmodelElement`].

use crate::error::MappingError;
use crate::mapper::ValueMapper;
use crate::model::SubmodelElement;
use crate::value::ValueNode;

impl ValueMapper for SubmodelElement {
    type Value = ValueNode;

    fn value(&self) -> ValueNode {
        match self {
            SubmodelElement::Property(e) => ValueNode::Scalar(e.value()),
            SubmodelElement::MultiLanguageProperty(e) => ValueNode::MultiLanguage(e.value()),
            SubmodelElement::Range(e) => ValueNode::Range(e.value()),
            SubmodelElement::Blob(e) => ValueNode::Blob(e.value()),
            SubmodelElement::File(e) => ValueNode::File(e.value()),
            SubmodelElement::ReferenceElement(e) => ValueNode::Reference(e.value()),
            SubmodelElement::RelationshipElement(e) => ValueNode::Relationship(e.value()),
            SubmodelElement::AnnotatedRelationshipElement(e) => {
                ValueNode::AnnotatedRelationship(e.value())
            }
            SubmodelElement::Entity(e) => ValueNode::Entity(e.value()),
            SubmodelElement::Operation(e) => ValueNode::Operation(e.value()),
            SubmodelElement::Capability(_) => ValueNode::Empty,
            SubmodelElement::BasicEventElement(e) => ValueNode::Event(e.value()),
            SubmodelElement::SubmodelElementCollection(e) => ValueNode::Collection(e.value()),
            SubmodelElement::SubmodelElementList(e) => ValueNode::List(e.value()),
        }
    }

    fn check_value(&self, value: &ValueNode) -> Result<(), MappingError> {
        match (self, value) {
            (SubmodelElement::Property(e), ValueNode::Scalar(v)) => e.check_value(v),
            (SubmodelElement::MultiLanguageProperty(e), ValueNode::MultiLanguage(v)) => {
                e.check_value(v)
            }
            (SubmodelElement::Range(e), ValueNode::Range(v)) => e.check_value(v),
            (SubmodelElement::Blob(e), ValueNode::Blob(v)) => e.check_value(v),
            (SubmodelElement::File(e), ValueNode::File(v)) => e.check_value(v),
            (SubmodelElement::ReferenceElement(e), ValueNode::Reference(v)) => e.check_value(v),
            (SubmodelElement::RelationshipElement(e), ValueNode::Relationship(v)) => {
                e.check_value(v)
            }
            (
                SubmodelElement::AnnotatedRelationshipElement(e),
                ValueNode::AnnotatedRelationship(v),
            ) => e.check_value(v),
            (SubmodelElement::Entity(e), ValueNode::Entity(v)) => e.check_value(v),
            (SubmodelElement::Operation(e), ValueNode::Operation(v)) => e.check_value(v),
            (SubmodelElement::Capability(_), ValueNode::Empty) => Ok(()),
            (SubmodelElement::BasicEventElement(e), ValueNode::Event(v)) => e.check_value(v),
            (SubmodelElement::SubmodelElementCollection(e), ValueNode::Collection(v)) => {
                e.check_value(v)
            }
            (SubmodelElement::SubmodelElementList(e), ValueNode::List(v)) => e.check_value(v),
            (element, value) => Err(MappingError::shape(
                element.kind().value_shape(),
                value.shape(),
            )),
        }
    }

    fn apply_value(&mut self, value: ValueNode) {
        match (self, value) {
            (SubmodelElement::Property(e), ValueNode::Scalar(v)) => e.apply_value(v),
            (SubmodelElement::MultiLanguageProperty(e), ValueNode::MultiLanguage(v)) => {
                e.apply_value(v)
            }
            (SubmodelElement::Range(e), ValueNode::Range(v)) => e.apply_value(v),
            (SubmodelElement::Blob(e), ValueNode::Blob(v)) => e.apply_value(v),
            (SubmodelElement::File(e), ValueNode::File(v)) => e.apply_value(v),
            (SubmodelElement::ReferenceElement(e), ValueNode::Reference(v)) => e.apply_value(v),
            (SubmodelElement::RelationshipElement(e), ValueNode::Relationship(v)) => {
                e.apply_value(v)
            }
            (
                SubmodelElement::AnnotatedRelationshipElement(e),
                ValueNode::AnnotatedRelationship(v),
            ) => e.apply_value(v),
            (SubmodelElement::Entity(e), ValueNode::Entity(v)) => e.apply_value(v),
            (SubmodelElement::Operation(e), ValueNode::Operation(v)) => e.apply_value(v),
            (SubmodelElement::BasicEventElement(e), ValueNode::Event(v)) => e.apply_value(v),
            (SubmodelElement::SubmodelElementCollection(e), ValueNode::Collection(v)) => {
                e.apply_value(v)
            }
            (SubmodelElement::SubmodelElementList(e), ValueNode::List(v)) => e.apply_value(v),
            // Capabilities carry nothing; mismatched shapes were rejected by the check.
            _ => {}
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::model::{
        Blob, Capability, DataTypeDefXsd, ElementKind, LangString, MultiLanguageProperty,
        Property, Range, SubmodelElementCollection, SubmodelElementList,
    };
    use proptest::prelude::*;

    fn leaf() -> impl Strategy<Value = SubmodelElement> {
        prop_oneof![
            proptest::option::of(any::<i32>()).prop_map(|v| {
                SubmodelElement::from(Property {
                    value_type: DataTypeDefXsd::Int,
                    value: v.map(|v| v.to_string()),
                    ..Default::default()
                })
            }),
            "[a-zA-Z0-9 ]{0,12}".prop_map(|v| {
                SubmodelElement::from(Property {
                    value_type: DataTypeDefXsd::String,
                    value: Some(v),
                    ..Default::default()
                })
            }),
            prop::collection::vec(("[a-z]{2}", "[a-zA-Z ]{0,8}"), 0..3).prop_map(|texts| {
                SubmodelElement::from(MultiLanguageProperty {
                    value: texts
                        .into_iter()
                        .map(|(language, text)| LangString::new(language, text))
                        .collect(),
                    ..Default::default()
                })
            }),
            (any::<i16>(), any::<i16>()).prop_map(|(a, b)| {
                SubmodelElement::from(Range {
                    value_type: DataTypeDefXsd::Short,
                    min: Some(a.min(b).to_string()),
                    max: Some(a.max(b).to_string()),
                    ..Default::default()
                })
            }),
            prop::collection::vec(any::<u8>(), 0..16).prop_map(|bytes| {
                SubmodelElement::from(Blob {
                    content_type: "application/octet-stream".to_string(),
                    value: Some(bytes),
                    ..Default::default()
                })
            }),
            Just(SubmodelElement::from(Capability::default())),
        ]
    }

    fn named(children: Vec<SubmodelElement>) -> Vec<SubmodelElement> {
        children
            .into_iter()
            .enumerate()
            .map(|(i, mut child)| {
                child.set_id_short(Some(format!("E{}", i)));
                child
            })
            .collect()
    }

    fn element_tree() -> impl Strategy<Value = SubmodelElement> {
        leaf().prop_recursive(4, 48, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(|children| {
                    SubmodelElement::from(SubmodelElementCollection {
                        value: named(children),
                        ..Default::default()
                    })
                }),
                prop::collection::vec(inner, 0..6).prop_map(|items| {
                    let mut list = SubmodelElementList::new("L", ElementKind::Property);
                    list.id_short = None;
                    list.value = items
                        .into_iter()
                        .map(|mut item| {
                            item.set_id_short(None);
                            item
                        })
                        .collect();
                    SubmodelElement::from(list)
                }),
            ]
        })
    }

    proptest! {
        /// Writing back what was read changes nothing.
        #[test]
        fn round_trip_is_identity(element in element_tree()) {
            let mut copy = element.clone();
            let value = element.value();
            prop_assert!(copy.set_value(value.clone()).is_ok());
            prop_assert_eq!(&copy, &element);
            prop_assert_eq!(copy.value(), value);
        }

        /// A rejected write never mutates the tree.
        #[test]
        fn rejected_write_is_atomic(element in element_tree()) {
            let mut copy = element.clone();
            let bogus = match element.value() {
                ValueNode::Collection(c) => ValueNode::Collection(
                    c.with("NoSuchChild", ValueNode::Empty),
                ),
                ValueNode::List(mut items) => {
                    items.push(ValueNode::Empty);
                    ValueNode::List(items)
                }
                ValueNode::Empty => ValueNode::Scalar(None),
                _ => ValueNode::Empty,
            };
            prop_assert!(copy.set_value(bogus).is_err());
            prop_assert_eq!(&copy, &element);
        }
    }
}
