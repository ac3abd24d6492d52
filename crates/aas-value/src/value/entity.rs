//! Entity value carriers.

use serde::{Deserialize, Serialize};

use crate::model::{EntityType, Reference, SpecificAssetId};
use crate::value::CollectionValue;

/// Value of an entity.
///
/// `global_asset_id` and `specific_asset_ids` distinguish absent (`None`,
/// leave the stored attribute alone) from present. A present
/// `specific_asset_ids` replaces the stored list as a whole.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityValue {
    pub statements: CollectionValue,
    pub entity_type: EntityType,
    pub global_asset_id: Option<String>,
    pub specific_asset_ids: Option<Vec<SpecificAssetIdValue>>,
}

/// Value form of a specific asset id.
///
/// The semantic id of the stored pair is metadata and is not carried.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificAssetIdValue {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_subject_id: Option<Reference>,
}

impl SpecificAssetIdValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            external_subject_id: None,
        }
    }
}

impl From<&SpecificAssetId> for SpecificAssetIdValue {
    fn from(id: &SpecificAssetId) -> Self {
        Self {
            name: id.name.clone(),
            value: id.value.clone(),
            external_subject_id: id.external_subject_id.clone(),
        }
    }
}

impl From<SpecificAssetIdValue> for SpecificAssetId {
    fn from(value: SpecificAssetIdValue) -> Self {
        Self {
            name: value.name,
            value: value.value,
            external_subject_id: value.external_subject_id,
            semantic_id: None,
        }
    }
}
