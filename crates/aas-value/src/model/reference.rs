//! References and keys.
//!
//! These carry the AAS JSON field names so the value-only codec can embed
//! them verbatim (reference elements, relationships, event `observed`).

use serde::{Deserialize, Serialize};

/// Whether a reference points outside the model or at a model element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReferenceTypes {
    #[default]
    ExternalReference,
    ModelReference,
}

/// Key types allowed in a reference key chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyTypes {
    AnnotatedRelationshipElement,
    AssetAdministrationShell,
    BasicEventElement,
    Blob,
    Capability,
    ConceptDescription,
    DataElement,
    Entity,
    EventElement,
    File,
    FragmentReference,
    GlobalReference,
    Identifiable,
    MultiLanguageProperty,
    Operation,
    Property,
    Range,
    Referable,
    ReferenceElement,
    RelationshipElement,
    Submodel,
    SubmodelElement,
    SubmodelElementCollection,
    SubmodelElementList,
}

/// One step of a reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    #[serde(rename = "type")]
    pub key_type: KeyTypes,
    pub value: String,
}

impl Key {
    pub fn new(key_type: KeyTypes, value: impl Into<String>) -> Self {
        Self {
            key_type,
            value: value.into(),
        }
    }
}

/// A reference to an external concept or to an element inside the model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    #[serde(rename = "type")]
    pub reference_type: ReferenceTypes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referred_semantic_id: Option<Box<Reference>>,
    pub keys: Vec<Key>,
}

impl Reference {
    /// Creates an external reference with a single `GlobalReference` key.
    pub fn global(value: impl Into<String>) -> Self {
        Self {
            reference_type: ReferenceTypes::ExternalReference,
            referred_semantic_id: None,
            keys: vec![Key::new(KeyTypes::GlobalReference, value)],
        }
    }

    /// Creates a model reference from a key chain.
    pub fn model(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            reference_type: ReferenceTypes::ModelReference,
            referred_semantic_id: None,
            keys: keys.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_json_names() {
        let reference = Reference::model([
            Key::new(KeyTypes::Submodel, "urn:sm:1"),
            Key::new(KeyTypes::Property, "Temperature"),
        ]);
        let json = serde_json::to_value(&reference).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "ModelReference",
                "keys": [
                    {"type": "Submodel", "value": "urn:sm:1"},
                    {"type": "Property", "value": "Temperature"}
                ]
            })
        );
        let back: Reference = serde_json::from_value(json).unwrap();
        assert_eq!(back, reference);
    }

    #[test]
    fn test_referred_semantic_id_is_optional() {
        let json = serde_json::json!({
            "type": "ExternalReference",
            "keys": [{"type": "GlobalReference", "value": "0173-1#02-AAO677#002"}],
            "referredSemanticId": {
                "type": "ExternalReference",
                "keys": [{"type": "GlobalReference", "value": "urn:unit"}]
            }
        });
        let reference: Reference = serde_json::from_value(json).unwrap();
        assert_eq!(
            reference.referred_semantic_id.as_deref(),
            Some(&Reference::global("urn:unit"))
        );
    }
}
