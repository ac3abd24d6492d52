//! Mappers for relationship and annotated relationship elements.

use crate::error::MappingError;
use crate::mapper::sequence;
use crate::mapper::ValueMapper;
use crate::model::{AnnotatedRelationshipElement, RelationshipElement};
use crate::value::{AnnotatedRelationshipValue, RelationshipValue};

impl ValueMapper for RelationshipElement {
    type Value = RelationshipValue;

    fn value(&self) -> RelationshipValue {
        RelationshipValue {
            first: self.first.clone(),
            second: self.second.clone(),
        }
    }

    fn check_value(&self, _value: &RelationshipValue) -> Result<(), MappingError> {
        Ok(())
    }

    fn apply_value(&mut self, value: RelationshipValue) {
        self.first = value.first;
        self.second = value.second;
    }
}

/// Annotations are positional and length-checked, each entry naming the
/// annotation it belongs to.
impl ValueMapper for AnnotatedRelationshipElement {
    type Value = AnnotatedRelationshipValue;

    fn value(&self) -> AnnotatedRelationshipValue {
        AnnotatedRelationshipValue {
            first: self.first.clone(),
            second: self.second.clone(),
            annotations: sequence::value_only_sequence(&self.annotations),
        }
    }

    fn check_value(&self, value: &AnnotatedRelationshipValue) -> Result<(), MappingError> {
        sequence::check_value_only_sequence(&self.annotations, &value.annotations)
    }

    fn apply_value(&mut self, value: AnnotatedRelationshipValue) {
        self.first = value.first;
        self.second = value.second;
        sequence::apply_value_only_sequence(&mut self.annotations, value.annotations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShapeMismatch;
    use crate::model::builder::ElementsBuilder;
    use crate::model::{DataTypeDefXsd, Reference, SubmodelElement};
    use crate::value::{ValueNode, ValueOnly};

    fn annotated() -> AnnotatedRelationshipElement {
        let elements = ElementsBuilder::new()
            .annotated_relationship(
                "Feeds",
                Reference::global("urn:pump"),
                Reference::global("urn:tank"),
                |a| {
                    a.property("FlowRate", DataTypeDefXsd::Double, "3.2")
                        .property("Medium", DataTypeDefXsd::String, "water")
                },
            )
            .build();
        match elements.into_iter().next() {
            Some(SubmodelElement::AnnotatedRelationshipElement(a)) => a,
            _ => panic!("expected annotated relationship"),
        }
    }

    #[test]
    fn test_relationship_overwrites_both_ends() {
        let mut rel = RelationshipElement::default();
        rel.set_value(RelationshipValue {
            first: Reference::global("urn:a"),
            second: Reference::global("urn:b"),
        })
        .unwrap();
        assert_eq!(rel.first, Reference::global("urn:a"));
        assert_eq!(rel.second, Reference::global("urn:b"));
    }

    #[test]
    fn test_annotations_read_in_order() {
        let value = annotated().value();
        let names: Vec<_> = value.annotations.iter().map(|a| a.id_short.as_str()).collect();
        assert_eq!(names, ["FlowRate", "Medium"]);
        assert_eq!(value.annotations[0].value, ValueNode::scalar("3.2"));
    }

    #[test]
    fn test_annotations_written_by_position() {
        let mut rel = annotated();
        let mut value = rel.value();
        value.second = Reference::global("urn:silo");
        value.annotations[1].value = ValueNode::scalar("oil");
        rel.set_value(value).unwrap();

        assert_eq!(rel.second, Reference::global("urn:silo"));
        assert_eq!(rel.value().annotations[1].value, ValueNode::scalar("oil"));
    }

    #[test]
    fn test_annotation_length_and_name_checked() {
        let mut rel = annotated();
        let before = rel.clone();

        let mut short = rel.value();
        short.annotations.pop();
        assert_eq!(
            rel.set_value(short),
            Err(MappingError::ValueShapeMismatch {
                detail: ShapeMismatch::Length {
                    expected: 2,
                    actual: 1
                }
            })
        );

        let mut renamed = rel.value();
        renamed.annotations[0] = ValueOnly::new("Pressure", ValueNode::scalar("1"));
        assert_eq!(
            rel.set_value(renamed),
            Err(MappingError::unknown_child("Pressure"))
        );
        assert_eq!(rel, before);
    }
}
