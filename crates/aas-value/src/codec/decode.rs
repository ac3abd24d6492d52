//! Value-only JSON to value node, using the canonical element as schema.
//!
//! Decoding rejects JSON that cannot be read against the schema (wrong JSON
//! types, unknown idShorts, list length changes) but leaves lexical checks
//! against declared types to the mappers.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::trace;

use crate::codec::named_children;
use crate::error::{CodecError, MappingError};
use crate::limits::MAX_BLOB_LEN;
use crate::mapper::sequence::{self, Slot};
use crate::model::path::{child_path, index_path};
use crate::model::{
    EntityType, LangString, OperationVariable, Reference, Submodel, SubmodelElement,
};
use crate::value::{
    AnnotatedRelationshipValue, BasicEventValue, BlobValue, CollectionValue, EntityValue,
    FileValue, OperationValue, RangeValue, RelationshipValue, SpecificAssetIdValue, ValueNode,
    ValueOnly,
};

/// Decodes `json` as the value of `schema`.
pub fn decode_element(schema: &SubmodelElement, json: &Value) -> Result<ValueNode, CodecError> {
    trace!(kind = %schema.kind(), "decoding element value");
    decode_at(schema, json, schema.id_short().unwrap_or_default())
}

/// Decodes a JSON object keyed by top-level idShorts.
pub fn decode_submodel(submodel: &Submodel, json: &Value) -> Result<CollectionValue, CodecError> {
    trace!(submodel = %submodel.id, "decoding submodel value");
    decode_collection(&submodel.submodel_elements, json, "")
}

/// Decodes `json` against `schema`, reporting errors under `path`.
pub(crate) fn decode_at(schema: &SubmodelElement, json: &Value, path: &str) -> Result<ValueNode, CodecError> {
    let node = match schema {
        SubmodelElement::Property(_) => ValueNode::Scalar(scalar(json, path)?),
        SubmodelElement::MultiLanguageProperty(_) => {
            ValueNode::MultiLanguage(lang_strings(json, path)?)
        }
        SubmodelElement::Range(_) => {
            let object = object(json, path)?;
            ValueNode::Range(RangeValue {
                min: optional_scalar(object, "min", path)?,
                max: optional_scalar(object, "max", path)?,
            })
        }
        SubmodelElement::Blob(blob) => {
            let object = object(json, path)?;
            let content_type = optional_string(object, "contentType", path)?
                .unwrap_or_else(|| blob.content_type.clone());
            let value = match optional_string(object, "value", path)? {
                Some(encoded) => Some(blob_bytes(&encoded, path)?),
                None => None,
            };
            ValueNode::Blob(BlobValue {
                content_type,
                value,
            })
        }
        SubmodelElement::File(file) => {
            let object = object(json, path)?;
            ValueNode::File(FileValue {
                content_type: optional_string(object, "contentType", path)?
                    .unwrap_or_else(|| file.content_type.clone()),
                value: optional_string(object, "value", path)?,
            })
        }
        SubmodelElement::ReferenceElement(_) => match json {
            Value::Null => ValueNode::Reference(None),
            _ => ValueNode::Reference(Some(reference(json, path)?)),
        },
        SubmodelElement::RelationshipElement(_) => {
            let object = object(json, path)?;
            ValueNode::Relationship(RelationshipValue {
                first: required_reference(object, "first", path)?,
                second: required_reference(object, "second", path)?,
            })
        }
        SubmodelElement::AnnotatedRelationshipElement(rel) => {
            let object = object(json, path)?;
            let annotations = match object.get("annotations") {
                Some(entries) => value_only_entries(
                    &rel.annotations,
                    entries,
                    &child_path(path, "annotations"),
                )?,
                None => sequence::value_only_sequence(&rel.annotations),
            };
            ValueNode::AnnotatedRelationship(AnnotatedRelationshipValue {
                first: required_reference(object, "first", path)?,
                second: required_reference(object, "second", path)?,
                annotations,
            })
        }
        SubmodelElement::Entity(entity) => {
            let object = object(json, path)?;
            let statements = match object.get("statements") {
                Some(statements) => decode_collection(&entity.statements, statements, path)?,
                None => CollectionValue::new(),
            };
            let entity_type = match object.get("entityType") {
                Some(name) => entity_type(name, &child_path(path, "entityType"))?,
                None => entity.entity_type,
            };
            let specific_asset_ids = match object.get("specificAssetIds") {
                None | Some(Value::Null) => None,
                Some(ids) => Some(deserialize::<Vec<SpecificAssetIdValue>>(
                    ids,
                    &child_path(path, "specificAssetIds"),
                    "specific asset ids",
                )?),
            };
            ValueNode::Entity(EntityValue {
                statements,
                entity_type,
                global_asset_id: optional_string(object, "globalAssetId", path)?,
                specific_asset_ids,
            })
        }
        SubmodelElement::Operation(op) => {
            let object = object(json, path)?;
            ValueNode::Operation(OperationValue {
                input_variables: variables(&op.input_variables, object, "inputVariables", path)?,
                output_variables: variables(&op.output_variables, object, "outputVariables", path)?,
                inoutput_variables: variables(
                    &op.inoutput_variables,
                    object,
                    "inoutputVariables",
                    path,
                )?,
            })
        }
        SubmodelElement::Capability(_) => match json {
            Value::Null => ValueNode::Empty,
            other => return Err(unexpected(path, "null", other)),
        },
        SubmodelElement::BasicEventElement(_) => {
            let object = object(json, path)?;
            ValueNode::Event(BasicEventValue {
                observed: required_reference(object, "observed", path)?,
            })
        }
        SubmodelElement::SubmodelElementCollection(c) => {
            ValueNode::Collection(decode_collection(&c.value, json, path)?)
        }
        SubmodelElement::SubmodelElementList(list) => {
            let items = array(json, path)?;
            if items.len() != list.value.len() {
                return Err(MappingError::length(list.value.len(), items.len()).into());
            }
            let values = list
                .value
                .iter()
                .zip(items)
                .enumerate()
                .map(|(i, (item_schema, item))| decode_at(item_schema, item, &index_path(path, i)))
                .collect::<Result<Vec<_>, _>>()?;
            ValueNode::List(values)
        }
    };
    Ok(node)
}

/// Decodes an object keyed by idShort. Keys keep their JSON order.
fn decode_collection(
    children: &[SubmodelElement],
    json: &Value,
    path: &str,
) -> Result<CollectionValue, CodecError> {
    let object = object(json, path)?;
    let index = named_children(children);
    let mut entries = Vec::with_capacity(object.len());
    for (id_short, child_json) in object {
        let child = index
            .get(id_short.as_str())
            .ok_or_else(|| MappingError::unknown_child(id_short.as_str()))?;
        let child_value = decode_at(child, child_json, &child_path(path, id_short))?;
        entries.push((id_short.clone(), child_value));
    }
    Ok(CollectionValue::from_unique(entries))
}

/// Decodes `[{idShort: value}, ...]` positionally against `slots`.
fn value_only_entries<S: Slot>(
    slots: &[S],
    json: &Value,
    path: &str,
) -> Result<Vec<ValueOnly>, CodecError> {
    let entries = array(json, path)?;
    if entries.len() != slots.len() {
        return Err(MappingError::length(slots.len(), entries.len()).into());
    }
    slots
        .iter()
        .zip(entries)
        .enumerate()
        .map(|(i, (slot, entry))| {
            let slot = slot.element();
            let entry_path = index_path(path, i);
            let object = object(entry, &entry_path)?;
            let mut fields = object.iter();
            let (id_short, value_json) = match (fields.next(), fields.next()) {
                (Some(field), None) => field,
                _ => {
                    return Err(CodecError::Malformed {
                        path: entry_path,
                        what: "value-only entry",
                        message: format!("expected one idShort key, found {}", object.len()),
                    });
                }
            };
            if slot.id_short().unwrap_or_default() != id_short.as_str() {
                return Err(MappingError::unknown_child(id_short.as_str()).into());
            }
            let value = decode_at(slot, value_json, &child_path(&entry_path, id_short))?;
            Ok(ValueOnly::new(id_short.as_str(), value))
        })
        .collect()
}

/// Decodes one operation variable group; absent groups keep their values.
fn variables(
    slots: &[OperationVariable],
    object: &Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<Vec<ValueOnly>, CodecError> {
    match object.get(field) {
        Some(json) => value_only_entries(slots, json, &child_path(path, field)),
        None => Ok(sequence::value_only_sequence(slots)),
    }
}

fn scalar(json: &Value, path: &str) -> Result<Option<String>, CodecError> {
    match json {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(unexpected(path, "string", other)),
    }
}

fn optional_scalar(
    object: &Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<Option<String>, CodecError> {
    match object.get(field) {
        Some(json) => scalar(json, &child_path(path, field)),
        None => Ok(None),
    }
}

fn optional_string(
    object: &Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<Option<String>, CodecError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(unexpected(&child_path(path, field), "string", other)),
    }
}

/// Reads `[{"en": "text"}, ...]`.
fn lang_strings(json: &Value, path: &str) -> Result<Vec<LangString>, CodecError> {
    let entries = array(json, path)?;
    let mut out = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let entry_path = index_path(path, i);
        let object = object(entry, &entry_path)?;
        if object.is_empty() {
            return Err(CodecError::Malformed {
                path: entry_path,
                what: "language string",
                message: "expected a language key".to_string(),
            });
        }
        // Several languages in one object are accepted and kept in key order.
        for (language, text) in object {
            match text {
                Value::String(text) => out.push(LangString::new(language.as_str(), text.as_str())),
                other => return Err(unexpected(&child_path(&entry_path, language), "string", other)),
            }
        }
    }
    Ok(out)
}

fn blob_bytes(encoded: &str, path: &str) -> Result<Vec<u8>, CodecError> {
    let decoded_len = encoded.len() / 4 * 3;
    if decoded_len > MAX_BLOB_LEN {
        return Err(CodecError::LengthExceedsLimit {
            field: "blob",
            len: decoded_len,
            max: MAX_BLOB_LEN,
        });
    }
    STANDARD
        .decode(encoded.as_bytes())
        .map_err(|e| CodecError::InvalidBase64 {
            path: child_path(path, "value"),
            message: e.to_string(),
        })
}

fn entity_type(json: &Value, path: &str) -> Result<EntityType, CodecError> {
    match json {
        Value::String(name) => match name.as_str() {
            "CoManagedEntity" => Ok(EntityType::CoManagedEntity),
            "SelfManagedEntity" => Ok(EntityType::SelfManagedEntity),
            other => Err(CodecError::Malformed {
                path: path.to_string(),
                what: "entity type",
                message: format!("unknown entity type {:?}", other),
            }),
        },
        other => Err(unexpected(path, "string", other)),
    }
}

fn reference(json: &Value, path: &str) -> Result<Reference, CodecError> {
    object(json, path)?;
    deserialize(json, path, "reference")
}

fn required_reference(
    object: &Map<String, Value>,
    field: &'static str,
    path: &str,
) -> Result<Reference, CodecError> {
    let json = object.get(field).ok_or_else(|| CodecError::MissingField {
        path: path.to_string(),
        field,
    })?;
    reference(json, &child_path(path, field))
}

fn deserialize<T: DeserializeOwned>(
    json: &Value,
    path: &str,
    what: &'static str,
) -> Result<T, CodecError> {
    T::deserialize(json).map_err(|e| CodecError::Malformed {
        path: path.to_string(),
        what,
        message: e.to_string(),
    })
}

fn object<'a>(json: &'a Value, path: &str) -> Result<&'a Map<String, Value>, CodecError> {
    json.as_object()
        .ok_or_else(|| unexpected(path, "object", json))
}

fn array<'a>(json: &'a Value, path: &str) -> Result<&'a Vec<Value>, CodecError> {
    json.as_array().ok_or_else(|| unexpected(path, "array", json))
}

fn unexpected(path: &str, expected: &'static str, found: &Value) -> CodecError {
    CodecError::UnexpectedJson {
        path: path.to_string(),
        expected,
        found: json_type(found),
    }
}

fn json_type(json: &Value) -> &'static str {
    match json {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{encode_element, ValueOnlyOptions};
    use crate::mapper::ValueMapper;
    use crate::model::builder::ElementsBuilder;
    use crate::model::{DataTypeDefXsd, ElementKind, Property};
    use serde_json::json;

    fn single(builder: ElementsBuilder) -> SubmodelElement {
        builder.build().remove(0)
    }

    #[test]
    fn test_scalar_accepts_strings_numbers_and_booleans() {
        let p = single(ElementsBuilder::new().property("P", DataTypeDefXsd::Double, "0"));
        assert_eq!(decode_element(&p, &json!("1.5")).unwrap(), ValueNode::scalar("1.5"));
        assert_eq!(decode_element(&p, &json!(2.5)).unwrap(), ValueNode::scalar("2.5"));
        assert_eq!(decode_element(&p, &json!(true)).unwrap(), ValueNode::scalar("true"));
        assert_eq!(decode_element(&p, &Value::Null).unwrap(), ValueNode::Scalar(None));
        assert_eq!(
            decode_element(&p, &json!([1])),
            Err(CodecError::UnexpectedJson {
                path: "P".to_string(),
                expected: "string",
                found: "array",
            })
        );
    }

    #[test]
    fn test_collection_keeps_json_order_and_rejects_unknown() {
        let c = single(ElementsBuilder::new().collection("C", |c| {
            c.property("A", DataTypeDefXsd::String, "a")
                .property("B", DataTypeDefXsd::String, "b")
        }));
        let value = decode_element(&c, &json!({"B": "2", "A": "1"})).unwrap();
        let keys: Vec<_> = value.as_collection().unwrap().keys().collect();
        assert_eq!(keys, ["B", "A"]);

        assert_eq!(
            decode_element(&c, &json!({"A": "1", "X": "?"})),
            Err(CodecError::Mapping(MappingError::unknown_child("X")))
        );
    }

    #[test]
    fn test_list_length_and_nested_paths() {
        let l = single(ElementsBuilder::new().list("L", ElementKind::SubmodelElementCollection, |l| {
            l.collection(|c| c.property("V", DataTypeDefXsd::Int, "1"))
        }));
        assert_eq!(
            decode_element(&l, &json!([{"V": "1"}, {"V": "2"}])),
            Err(CodecError::Mapping(MappingError::length(1, 2)))
        );
        assert_eq!(
            decode_element(&l, &json!([{"V": {}}])),
            Err(CodecError::UnexpectedJson {
                path: "L[0].V".to_string(),
                expected: "string",
                found: "object",
            })
        );
    }

    #[test]
    fn test_entity_absent_fields() {
        let e = single(ElementsBuilder::new().entity("M", EntityType::SelfManagedEntity, |e| {
            e.global_asset_id("urn:m")
                .statements(|s| s.property("Speed", DataTypeDefXsd::Int, "1"))
        }));
        let ValueNode::Entity(value) = decode_element(&e, &json!({})).unwrap() else {
            panic!("expected entity value");
        };
        assert!(value.statements.is_empty());
        assert_eq!(value.entity_type, EntityType::SelfManagedEntity);
        assert_eq!(value.global_asset_id, None);
        assert_eq!(value.specific_asset_ids, None);

        let ValueNode::Entity(value) = decode_element(
            &e,
            &json!({
                "entityType": "CoManagedEntity",
                "specificAssetIds": [{"name": "serialNumber", "value": "SN-9"}]
            }),
        )
        .unwrap() else {
            panic!("expected entity value");
        };
        assert_eq!(value.entity_type, EntityType::CoManagedEntity);
        assert_eq!(
            value.specific_asset_ids,
            Some(vec![SpecificAssetIdValue::new("serialNumber", "SN-9")])
        );

        assert!(matches!(
            decode_element(&e, &json!({"entityType": "Robot"})),
            Err(CodecError::Malformed { what: "entity type", .. })
        ));
    }

    #[test]
    fn test_blob_base64() {
        let b = single(ElementsBuilder::new().blob("B", "text/plain", Vec::new()));
        let value = decode_element(&b, &json!({"value": "aGk="})).unwrap();
        assert_eq!(
            value,
            ValueNode::Blob(BlobValue {
                content_type: "text/plain".to_string(),
                value: Some(b"hi".to_vec()),
            })
        );
        assert!(matches!(
            decode_element(&b, &json!({"value": "not base64!"})),
            Err(CodecError::InvalidBase64 { .. })
        ));
    }

    #[test]
    fn test_relationship_requires_references() {
        let r = single(ElementsBuilder::new().relationship(
            "R",
            Reference::global("urn:a"),
            Reference::global("urn:b"),
        ));
        assert_eq!(
            decode_element(&r, &json!({"first": {"type": "ExternalReference", "keys": []}})),
            Err(CodecError::MissingField {
                path: "R".to_string(),
                field: "second",
            })
        );
        assert!(matches!(
            decode_element(&r, &json!({"first": {"keys": 3}, "second": {}})),
            Err(CodecError::Malformed { what: "reference", .. })
        ));
    }

    #[test]
    fn test_operation_groups_and_entry_shape() {
        let op = single(ElementsBuilder::new().operation("Start", |o| {
            o.input(|v| v.property("Speed", DataTypeDefXsd::Int, "0"))
                .output(|v| v.property("Ok", DataTypeDefXsd::Boolean, "false"))
        }));
        let ValueNode::Operation(value) =
            decode_element(&op, &json!({"inputVariables": [{"Speed": 100}]})).unwrap()
        else {
            panic!("expected operation value");
        };
        assert_eq!(value.input_variables, vec![ValueOnly::new("Speed", ValueNode::scalar("100"))]);
        assert_eq!(value.output_variables, vec![ValueOnly::new("Ok", ValueNode::scalar("false"))]);

        assert!(matches!(
            decode_element(&op, &json!({"inputVariables": [{"Speed": 1, "Extra": 2}]})),
            Err(CodecError::Malformed { what: "value-only entry", .. })
        ));
        assert_eq!(
            decode_element(&op, &json!({"inputVariables": [{"Torque": 1}]})),
            Err(CodecError::Mapping(MappingError::unknown_child("Torque")))
        );
    }

    #[test]
    fn test_unnamed_annotation_reads_back() {
        let mut rel = single(ElementsBuilder::new().annotated_relationship(
            "A",
            Reference::global("urn:a"),
            Reference::global("urn:b"),
            |a| {
                a.element(Property {
                    value: Some("n".to_string()),
                    ..Default::default()
                })
            },
        ));
        let json = encode_element(&rel, &ValueOnlyOptions::new());
        assert_eq!(json["annotations"], json!([{"": "n"}]));

        let decoded = decode_element(&rel, &json!({
            "first": json["first"],
            "second": json["second"],
            "annotations": [{"": "m"}],
        }))
        .unwrap();
        rel.set_value(decoded).unwrap();
        assert_eq!(encode_element(&rel, &ValueOnlyOptions::new())["annotations"], json!([{"": "m"}]));
    }

    #[test]
    fn test_decode_of_encoded_is_read_value() {
        let elements = ElementsBuilder::new()
            .multi_language("T", &[("en", "Pump"), ("en", "Pump 2")])
            .range("R", DataTypeDefXsd::Int, "1", "2")
            .file("F", "application/pdf", "/manual.pdf")
            .reference("Ref", Reference::global("urn:x"))
            .annotated_relationship("A", Reference::global("urn:a"), Reference::global("urn:b"), |a| {
                a.property("Note", DataTypeDefXsd::String, "n")
            })
            .event("E", Reference::global("urn:e"))
            .capability("C")
            .build();
        for element in &elements {
            for options in [ValueOnlyOptions::new(), ValueOnlyOptions::typed()] {
                let json = encode_element(element, &options);
                assert_eq!(
                    decode_element(element, &json).unwrap(),
                    element.value(),
                    "{}",
                    element.kind()
                );
            }
        }
    }
}
