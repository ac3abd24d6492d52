//! Value node to value-only JSON.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Number, Value};
use tracing::trace;

use crate::codec::{named_children, ValueOnlyOptions};
use crate::mapper::ValueMapper;
use crate::model::{DataTypeDefXsd, EntityType, OperationVariable, Reference, Submodel, SubmodelElement};
use crate::util::lexical;
use crate::value::{CollectionValue, ValueNode, ValueOnly};

/// Encodes the current value of `element`.
pub fn encode_element(element: &SubmodelElement, options: &ValueOnlyOptions) -> Value {
    trace!(kind = %element.kind(), "encoding element value");
    encode_value(element, &element.value(), options)
}

/// Encodes every top-level element of `submodel` as one JSON object.
pub fn encode_submodel(submodel: &Submodel, options: &ValueOnlyOptions) -> Value {
    trace!(submodel = %submodel.id, "encoding submodel value");
    encode_collection(&submodel.submodel_elements, &submodel.value(), options)
}

/// Encodes `value` using `schema` for declared types.
///
/// Parts of `value` that do not match `schema` are rendered without type
/// information.
pub fn encode_value(schema: &SubmodelElement, value: &ValueNode, options: &ValueOnlyOptions) -> Value {
    match (schema, value) {
        (_, ValueNode::Scalar(raw)) => scalar(raw.as_deref(), schema.value_type(), options),
        (_, ValueNode::MultiLanguage(texts)) => Value::Array(
            texts
                .iter()
                .map(|t| {
                    let mut entry = Map::new();
                    entry.insert(t.language.clone(), Value::String(t.text.clone()));
                    Value::Object(entry)
                })
                .collect(),
        ),
        (_, ValueNode::Range(range)) => {
            let value_type = schema.value_type();
            let mut out = Map::new();
            if let Some(min) = &range.min {
                out.insert("min".into(), scalar(Some(min), value_type, options));
            }
            if let Some(max) = &range.max {
                out.insert("max".into(), scalar(Some(max), value_type, options));
            }
            Value::Object(out)
        }
        (_, ValueNode::Blob(blob)) => {
            let mut out = Map::new();
            out.insert("contentType".into(), Value::String(blob.content_type.clone()));
            if let Some(bytes) = &blob.value {
                out.insert("value".into(), Value::String(STANDARD.encode(bytes)));
            }
            Value::Object(out)
        }
        (_, ValueNode::File(file)) => {
            let mut out = Map::new();
            out.insert("contentType".into(), Value::String(file.content_type.clone()));
            if let Some(path) = &file.value {
                out.insert("value".into(), Value::String(path.clone()));
            }
            Value::Object(out)
        }
        (_, ValueNode::Reference(reference)) => match reference {
            Some(r) => reference_json(r),
            None => Value::Null,
        },
        (_, ValueNode::Relationship(rel)) => {
            let mut out = Map::new();
            out.insert("first".into(), reference_json(&rel.first));
            out.insert("second".into(), reference_json(&rel.second));
            Value::Object(out)
        }
        (_, ValueNode::AnnotatedRelationship(rel)) => {
            let annotations = match schema {
                SubmodelElement::AnnotatedRelationshipElement(a) => a.annotations.as_slice(),
                _ => &[],
            };
            let mut out = Map::new();
            out.insert("first".into(), reference_json(&rel.first));
            out.insert("second".into(), reference_json(&rel.second));
            out.insert(
                "annotations".into(),
                value_only_array(annotations.iter(), &rel.annotations, options),
            );
            Value::Object(out)
        }
        (_, ValueNode::Entity(entity)) => {
            let statements = match schema {
                SubmodelElement::Entity(e) => e.statements.as_slice(),
                _ => &[],
            };
            let mut out = Map::new();
            out.insert(
                "statements".into(),
                encode_collection(statements, &entity.statements, options),
            );
            out.insert(
                "entityType".into(),
                Value::String(entity_type_name(entity.entity_type).to_string()),
            );
            if let Some(id) = &entity.global_asset_id {
                out.insert("globalAssetId".into(), Value::String(id.clone()));
            }
            if let Some(ids) = &entity.specific_asset_ids {
                out.insert(
                    "specificAssetIds".into(),
                    serde_json::to_value(ids).unwrap_or_default(),
                );
            }
            Value::Object(out)
        }
        (_, ValueNode::Operation(op)) => {
            let (input, output, inoutput): (&[OperationVariable], &[OperationVariable], &[OperationVariable]) =
                match schema {
                    SubmodelElement::Operation(o) => {
                        (&o.input_variables, &o.output_variables, &o.inoutput_variables)
                    }
                    _ => (&[], &[], &[]),
                };
            let mut out = Map::new();
            out.insert(
                "inputVariables".into(),
                value_only_array(input.iter().map(|v| &v.value), &op.input_variables, options),
            );
            out.insert(
                "outputVariables".into(),
                value_only_array(output.iter().map(|v| &v.value), &op.output_variables, options),
            );
            out.insert(
                "inoutputVariables".into(),
                value_only_array(
                    inoutput.iter().map(|v| &v.value),
                    &op.inoutput_variables,
                    options,
                ),
            );
            Value::Object(out)
        }
        (_, ValueNode::Event(event)) => {
            let mut out = Map::new();
            out.insert("observed".into(), reference_json(&event.observed));
            Value::Object(out)
        }
        (SubmodelElement::SubmodelElementCollection(c), ValueNode::Collection(value)) => {
            encode_collection(&c.value, value, options)
        }
        (_, ValueNode::Collection(value)) => encode_collection(&[], value, options),
        (_, ValueNode::List(items)) => {
            let schema_items = match schema {
                SubmodelElement::SubmodelElementList(l) => l.value.as_slice(),
                _ => &[],
            };
            Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| match schema_items.get(i) {
                        Some(item_schema) => encode_value(item_schema, item, options),
                        None => encode_untyped(item, options),
                    })
                    .collect(),
            )
        }
        (_, ValueNode::Empty) => Value::Null,
    }
}

fn encode_collection(
    children: &[SubmodelElement],
    value: &CollectionValue,
    options: &ValueOnlyOptions,
) -> Value {
    let index = named_children(children);
    let mut out = Map::with_capacity(value.len());
    for (id_short, child_value) in value.iter() {
        let encoded = match index.get(id_short) {
            Some(child) => encode_value(child, child_value, options),
            None => encode_untyped(child_value, options),
        };
        out.insert(id_short.to_string(), encoded);
    }
    Value::Object(out)
}

/// Encodes `[{idShort: value}, ...]` for annotations and operation variables.
fn value_only_array<'a>(
    mut slots: impl Iterator<Item = &'a SubmodelElement>,
    values: &[ValueOnly],
    options: &ValueOnlyOptions,
) -> Value {
    Value::Array(
        values
            .iter()
            .map(|v| {
                let encoded = match slots.next() {
                    Some(schema) => encode_value(schema, &v.value, options),
                    None => encode_untyped(&v.value, options),
                };
                let mut entry = Map::new();
                entry.insert(v.id_short.clone(), encoded);
                Value::Object(entry)
            })
            .collect(),
    )
}

/// Encodes without a schema by borrowing a capability as a neutral one.
fn encode_untyped(value: &ValueNode, options: &ValueOnlyOptions) -> Value {
    let neutral = SubmodelElement::Capability(Default::default());
    encode_value(&neutral, value, options)
}

fn scalar(raw: Option<&str>, value_type: Option<DataTypeDefXsd>, options: &ValueOnlyOptions) -> Value {
    let Some(raw) = raw else {
        return Value::Null;
    };
    if options.typed_scalars {
        if let Some(typed) = value_type.and_then(|t| typed_scalar(t, raw)) {
            return typed;
        }
    }
    Value::String(raw.to_string())
}

/// Converts a lexical value to a JSON number or boolean, when it fits one.
fn typed_scalar(value_type: DataTypeDefXsd, raw: &str) -> Option<Value> {
    if value_type == DataTypeDefXsd::Boolean {
        return match raw {
            "true" | "1" => Some(Value::Bool(true)),
            "false" | "0" => Some(Value::Bool(false)),
            _ => None,
        };
    }
    if value_type.integer_bounds().is_some() {
        let trimmed = raw.strip_prefix('+').unwrap_or(raw);
        if let Ok(n) = trimmed.parse::<i64>() {
            return Some(Value::Number(n.into()));
        }
        return trimmed.parse::<u64>().ok().map(|n| Value::Number(n.into()));
    }
    if value_type == DataTypeDefXsd::Decimal {
        return typed_decimal(raw);
    }
    if value_type.is_numeric() {
        let n: f64 = raw.parse().ok()?;
        return Number::from_f64(n).map(Value::Number);
    }
    None
}

/// Digits an `f64` carries exactly through a decimal round trip.
const F64_EXACT_DIGITS: usize = 15;

/// A decimal becomes a JSON number only when the number renders back as a
/// plain decimal with the same value.
fn typed_decimal(raw: &str) -> Option<Value> {
    if lexical::check_decimal(raw).is_err() || significant_digits(raw) > F64_EXACT_DIGITS {
        return None;
    }
    let number = Number::from_f64(raw.parse().ok()?)?;
    lexical::check_decimal(&number.to_string()).ok()?;
    Some(Value::Number(number))
}

/// Counts the significant digits of a decimal literal.
fn significant_digits(raw: &str) -> usize {
    let unsigned = raw.trim_start_matches(['+', '-']);
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let digits = format!("{}{}", int_part, frac_part.trim_end_matches('0'));
    digits.trim_start_matches('0').len()
}

fn reference_json(reference: &Reference) -> Value {
    serde_json::to_value(reference).unwrap_or_default()
}

pub(crate) fn entity_type_name(entity_type: EntityType) -> &'static str {
    match entity_type {
        EntityType::CoManagedEntity => "CoManagedEntity",
        EntityType::SelfManagedEntity => "SelfManagedEntity",
    }
}
