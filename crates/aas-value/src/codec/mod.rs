//! Value-only JSON.
//!
//! Value-only JSON carries no `modelType` tags, so both directions walk the
//! canonical element alongside the value: the element decides how a JSON
//! string, object or array is to be read.
//!
//! | Kind | JSON |
//! |---|---|
//! | Property | `"23.5"` (or a JSON number/boolean with [`ValueOnlyOptions::typed_scalars`]) |
//! | MultiLanguageProperty | `[{"en": "Pump"}, {"de": "Pumpe"}]` |
//! | Range | `{"min": "0", "max": "10"}` |
//! | Blob / File | `{"contentType": "image/png", "value": "iVBORw=="}` |
//! | ReferenceElement | reference object, or `null` |
//! | RelationshipElement | `{"first": ref, "second": ref}` |
//! | AnnotatedRelationshipElement | as above plus `"annotations": [{"Note": value}]` |
//! | Entity | `{"statements", "entityType", "globalAssetId", "specificAssetIds"}` |
//! | Operation | `{"inputVariables", "outputVariables", "inoutputVariables"}` |
//! | Capability | `null` |
//! | BasicEventElement | `{"observed": ref}` |
//! | SubmodelElementCollection | object keyed by idShort, in declaration order |
//! | SubmodelElementList | array |

mod decode;
mod encode;

pub use decode::{decode_element, decode_submodel};
pub use encode::{encode_element, encode_submodel, encode_value};

use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::debug;

use crate::error::Error;
use crate::mapper::ValueMapper;
use crate::model::{IdShortPath, Submodel, SubmodelElement};

/// Options for encoding value-only JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueOnlyOptions {
    /// Emit numeric and boolean properties as JSON numbers and booleans.
    ///
    /// By default every property value is a JSON string holding its
    /// lexical form, which always round-trips exactly. Typed output is
    /// friendlier to clients but renders numbers in JSON's canonical form
    /// (`1.50` becomes `1.5`). Values that do not fit a JSON number stay
    /// strings.
    pub typed_scalars: bool,
}

impl ValueOnlyOptions {
    /// Creates default (string scalar) options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options emitting typed scalars.
    pub fn typed() -> Self {
        Self {
            typed_scalars: true,
        }
    }
}

/// Reads a submodel, or the element at `path`, as value-only JSON.
pub fn read_value_only(
    submodel: &Submodel,
    path: Option<&IdShortPath>,
    options: &ValueOnlyOptions,
) -> Result<Value, Error> {
    match path {
        None => {
            debug!(submodel = %submodel.id, "reading submodel value");
            Ok(encode_submodel(submodel, options))
        }
        Some(path) => {
            let element = submodel.element_at(path)?;
            debug!(submodel = %submodel.id, %path, kind = %element.kind(), "reading element value");
            Ok(encode_element(element, options))
        }
    }
}

/// Writes value-only JSON onto a submodel, or onto the element at `path`.
///
/// The JSON is decoded against the current tree and checked in full before
/// anything is written; on error the submodel is unchanged.
pub fn write_value_only(
    submodel: &mut Submodel,
    path: Option<&IdShortPath>,
    json: &Value,
) -> Result<(), Error> {
    match path {
        None => {
            debug!(submodel = %submodel.id, "writing submodel value");
            let value = decode_submodel(submodel, json)?;
            submodel.set_value(value)?;
        }
        Some(path) => {
            let element = submodel.element_at_mut(path)?;
            debug!(%path, kind = %element.kind(), "writing element value");
            let value = decode::decode_at(element, json, &path.to_string())?;
            element.set_value(value)?;
        }
    }
    Ok(())
}

/// Indexes named children by idShort, first occurrence winning.
fn named_children(children: &[SubmodelElement]) -> FxHashMap<&str, &SubmodelElement> {
    let mut index = FxHashMap::default();
    index.reserve(children.len());
    for child in children {
        if let Some(id_short) = child.id_short() {
            index.entry(id_short).or_insert(child);
        }
    }
    index
}
