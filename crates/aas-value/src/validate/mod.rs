//! Structural validation of element trees.
//!
//! Value mapping assumes a well-formed tree: named siblings with distinct
//! idShorts, lists whose items match the declared item kind, and stored
//! values that are lexically valid for their declared type. Trees built
//! in code or loaded from elsewhere can be checked here first.
//!
//! Validation reports the first problem found, walking the tree in
//! declaration order.

use rustc_hash::FxHashSet;

use crate::error::ValidationError;
use crate::limits::MAX_ID_SHORT_LEN;
use crate::model::path::{child_path, index_path};
use crate::model::{DataTypeDefXsd, Submodel, SubmodelElement};

/// Validates every element of a submodel.
pub fn validate_submodel(submodel: &Submodel) -> Result<(), ValidationError> {
    validate_named(&submodel.submodel_elements, "", &submodel.id)
}

/// Validates an element and everything below it.
pub fn validate_element(element: &SubmodelElement) -> Result<(), ValidationError> {
    let path = element.id_short().unwrap_or_default();
    if let Some(id_short) = element.id_short() {
        validate_id_short(id_short)?;
    }
    validate_at(element, path)
}

/// Checks an idShort against `^[a-zA-Z]([a-zA-Z0-9_-]*[a-zA-Z0-9_])?$`.
pub fn validate_id_short(id_short: &str) -> Result<(), ValidationError> {
    let bytes = id_short.as_bytes();
    let valid = match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            bytes.len() <= MAX_ID_SHORT_LEN
                && first.is_ascii_alphabetic()
                && *last != b'-'
                && bytes
                    .iter()
                    .all(|b| b.is_ascii_alphanumeric() || *b == b'_' || *b == b'-')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidIdShort {
            id_short: id_short.to_string(),
        })
    }
}

/// Validates siblings addressed by idShort.
///
/// `parent` names the owner in errors; it differs from `path` only at the
/// top of a submodel.
fn validate_named<'a>(
    children: impl IntoIterator<Item = &'a SubmodelElement>,
    path: &str,
    parent: &str,
) -> Result<(), ValidationError> {
    let mut seen = FxHashSet::default();
    for child in children {
        let id_short = child
            .id_short()
            .ok_or_else(|| ValidationError::MissingIdShort {
                parent: parent.to_string(),
            })?;
        validate_id_short(id_short)?;
        if !seen.insert(id_short) {
            return Err(ValidationError::DuplicateIdShort {
                parent: parent.to_string(),
                id_short: id_short.to_string(),
            });
        }
        validate_at(child, &child_path(path, id_short))?;
    }
    Ok(())
}

fn validate_at(element: &SubmodelElement, path: &str) -> Result<(), ValidationError> {
    match element {
        SubmodelElement::Property(p) => {
            if let Some(raw) = &p.value {
                validate_lexical(path, p.value_type, raw)?;
            }
            Ok(())
        }
        SubmodelElement::Range(r) => {
            for raw in [&r.min, &r.max].into_iter().flatten() {
                validate_lexical(path, r.value_type, raw)?;
            }
            Ok(())
        }
        SubmodelElement::SubmodelElementCollection(c) => validate_named(&c.value, path, path),
        SubmodelElement::Entity(e) => validate_named(&e.statements, path, path),
        SubmodelElement::AnnotatedRelationshipElement(a) => {
            for annotation in &a.annotations {
                let kind = annotation.kind();
                if !kind.is_data_element() {
                    return Err(ValidationError::InvalidAnnotationKind {
                        id_short: annotation.id_short().unwrap_or_default().to_string(),
                        kind,
                    });
                }
            }
            validate_named(&a.annotations, path, path)
        }
        SubmodelElement::Operation(op) => {
            // idShorts are unique across all three variable groups.
            let variables = op
                .input_variables
                .iter()
                .chain(&op.output_variables)
                .chain(&op.inoutput_variables)
                .map(|v| &v.value);
            validate_named(variables, path, path)
        }
        SubmodelElement::SubmodelElementList(list) => {
            for (index, item) in list.value.iter().enumerate() {
                let found = item.kind();
                if found != list.type_value_list_element {
                    return Err(ValidationError::ListElementKindMismatch {
                        list: path.to_string(),
                        index,
                        expected: list.type_value_list_element,
                        found,
                    });
                }
                if let (Some(expected), Some(found)) =
                    (list.value_type_list_element, item.value_type())
                {
                    if expected != found {
                        return Err(ValidationError::ListValueTypeMismatch {
                            list: path.to_string(),
                            index,
                            expected,
                            found,
                        });
                    }
                }
                validate_at(item, &index_path(path, index))?;
            }
            Ok(())
        }
        SubmodelElement::MultiLanguageProperty(_)
        | SubmodelElement::Blob(_)
        | SubmodelElement::File(_)
        | SubmodelElement::ReferenceElement(_)
        | SubmodelElement::RelationshipElement(_)
        | SubmodelElement::Capability(_)
        | SubmodelElement::BasicEventElement(_) => Ok(()),
    }
}

fn validate_lexical(path: &str, value_type: DataTypeDefXsd, raw: &str) -> Result<(), ValidationError> {
    value_type
        .coerce(raw)
        .map_err(|_| ValidationError::InvalidValue {
            path: path.to_string(),
            value_type,
            raw_value: raw.to_string(),
        })
}
