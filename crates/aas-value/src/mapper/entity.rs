//! Entity mapper: statements update like a collection, asset ids replace.

use crate::error::MappingError;
use crate::mapper::sequence;
use crate::mapper::ValueMapper;
use crate::model::Entity;
use crate::value::{EntityValue, SpecificAssetIdValue};

/// Statements follow collection semantics. The entity type is always
/// written; the global asset id and the specific asset ids only when
/// present, the latter replacing the stored list as a whole.
impl ValueMapper for Entity {
    type Value = EntityValue;

    fn value(&self) -> EntityValue {
        EntityValue {
            statements: sequence::collection_value(&self.statements),
            entity_type: self.entity_type,
            global_asset_id: self.global_asset_id.clone(),
            specific_asset_ids: Some(
                self.specific_asset_ids
                    .iter()
                    .map(SpecificAssetIdValue::from)
                    .collect(),
            ),
        }
    }

    fn check_value(&self, value: &EntityValue) -> Result<(), MappingError> {
        sequence::check_collection(&self.statements, &value.statements)
    }

    fn apply_value(&mut self, value: EntityValue) {
        sequence::apply_collection(&mut self.statements, value.statements);
        self.entity_type = value.entity_type;
        if let Some(global_asset_id) = value.global_asset_id {
            self.global_asset_id = Some(global_asset_id);
        }
        if let Some(ids) = value.specific_asset_ids {
            self.specific_asset_ids = ids.into_iter().map(Into::into).collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::builder::ElementsBuilder;
    use crate::model::{DataTypeDefXsd, EntityType, SubmodelElement};
    use crate::value::{CollectionValue, ValueNode};

    fn motor() -> Entity {
        let elements = ElementsBuilder::new()
            .entity("Motor", EntityType::CoManagedEntity, |e| {
                e.global_asset_id("urn:asset:motor")
                    .specific_asset_id("serialNumber", "SN-1")
                    .specific_asset_id("batch", "B-7")
                    .statements(|s| {
                        s.property("Power", DataTypeDefXsd::Double, "7.5")
                            .property("Speed", DataTypeDefXsd::Int, "1500")
                    })
            })
            .build();
        match elements.into_iter().next() {
            Some(SubmodelElement::Entity(e)) => e,
            _ => panic!("expected entity"),
        }
    }

    #[test]
    fn test_read() {
        let value = motor().value();
        assert_eq!(value.entity_type, EntityType::CoManagedEntity);
        assert_eq!(value.global_asset_id.as_deref(), Some("urn:asset:motor"));
        assert_eq!(value.specific_asset_ids.as_ref().map(Vec::len), Some(2));
        assert_eq!(value.statements.keys().collect::<Vec<_>>(), ["Power", "Speed"]);
    }

    #[test]
    fn test_specific_asset_ids_replaced_not_merged() {
        let mut entity = motor();
        let mut value = entity.value();
        value.specific_asset_ids = Some(vec![SpecificAssetIdValue::new("serialNumber", "SN-2")]);
        entity.set_value(value).unwrap();

        assert_eq!(entity.specific_asset_ids.len(), 1);
        assert_eq!(entity.specific_asset_ids[0].value, "SN-2");
    }

    #[test]
    fn test_absent_fields_left_untouched() {
        let mut entity = motor();
        entity
            .set_value(EntityValue {
                statements: CollectionValue::new().with("Speed", ValueNode::scalar("3000")),
                entity_type: EntityType::SelfManagedEntity,
                global_asset_id: None,
                specific_asset_ids: None,
            })
            .unwrap();

        assert_eq!(entity.entity_type, EntityType::SelfManagedEntity);
        assert_eq!(entity.global_asset_id.as_deref(), Some("urn:asset:motor"));
        assert_eq!(entity.specific_asset_ids.len(), 2);
        let statements = entity.value().statements;
        assert_eq!(statements.get("Power"), Some(&ValueNode::scalar("7.5")));
        assert_eq!(statements.get("Speed"), Some(&ValueNode::scalar("3000")));
    }

    #[test]
    fn test_unknown_statement_rejected() {
        let mut entity = motor();
        let before = entity.clone();
        let err = entity
            .set_value(EntityValue {
                statements: CollectionValue::new().with("Torque", ValueNode::scalar("1")),
                entity_type: EntityType::SelfManagedEntity,
                global_asset_id: Some("urn:other".to_string()),
                specific_asset_ids: Some(Vec::new()),
            })
            .unwrap_err();
        assert_eq!(err, MappingError::unknown_child("Torque"));
        assert_eq!(entity, before);
    }
}
