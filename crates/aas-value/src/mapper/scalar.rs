//! Mappers for kinds holding a single value.

use crate::error::MappingError;
use crate::mapper::ValueMapper;
use crate::model::{
    BasicEventElement, Blob, Capability, File, Property, Range, Reference, ReferenceElement,
};
use crate::value::{BasicEventValue, BlobValue, FileValue, RangeValue};

/// `None` clears the value ("not yet known").
impl ValueMapper for Property {
    type Value = Option<String>;

    fn value(&self) -> Option<String> {
        self.value.clone()
    }

    fn check_value(&self, value: &Option<String>) -> Result<(), MappingError> {
        match value {
            Some(raw) => self.value_type.coerce(raw),
            None => Ok(()),
        }
    }

    fn apply_value(&mut self, value: Option<String>) {
        self.value = value;
    }
}

impl ValueMapper for Range {
    type Value = RangeValue;

    fn value(&self) -> RangeValue {
        RangeValue {
            min: self.min.clone(),
            max: self.max.clone(),
        }
    }

    fn check_value(&self, value: &RangeValue) -> Result<(), MappingError> {
        for bound in [&value.min, &value.max].into_iter().flatten() {
            self.value_type.coerce(bound)?;
        }
        Ok(())
    }

    fn apply_value(&mut self, value: RangeValue) {
        self.min = value.min;
        self.max = value.max;
    }
}

impl ValueMapper for Blob {
    type Value = BlobValue;

    fn value(&self) -> BlobValue {
        BlobValue {
            content_type: self.content_type.clone(),
            value: self.value.clone(),
        }
    }

    fn check_value(&self, _value: &BlobValue) -> Result<(), MappingError> {
        Ok(())
    }

    fn apply_value(&mut self, value: BlobValue) {
        self.content_type = value.content_type;
        self.value = value.value;
    }
}

impl ValueMapper for File {
    type Value = FileValue;

    fn value(&self) -> FileValue {
        FileValue {
            content_type: self.content_type.clone(),
            value: self.value.clone(),
        }
    }

    fn check_value(&self, _value: &FileValue) -> Result<(), MappingError> {
        Ok(())
    }

    fn apply_value(&mut self, value: FileValue) {
        self.content_type = value.content_type;
        self.value = value.value;
    }
}

impl ValueMapper for ReferenceElement {
    type Value = Option<Reference>;

    fn value(&self) -> Option<Reference> {
        self.value.clone()
    }

    fn check_value(&self, _value: &Option<Reference>) -> Result<(), MappingError> {
        Ok(())
    }

    fn apply_value(&mut self, value: Option<Reference>) {
        self.value = value;
    }
}

/// Only `observed` is a value; direction, state and topic are metadata.
impl ValueMapper for BasicEventElement {
    type Value = BasicEventValue;

    fn value(&self) -> BasicEventValue {
        BasicEventValue {
            observed: self.observed.clone(),
        }
    }

    fn check_value(&self, _value: &BasicEventValue) -> Result<(), MappingError> {
        Ok(())
    }

    fn apply_value(&mut self, value: BasicEventValue) {
        self.observed = value.observed;
    }
}

impl ValueMapper for Capability {
    type Value = ();

    fn value(&self) {}

    fn check_value(&self, _value: &()) -> Result<(), MappingError> {
        Ok(())
    }

    fn apply_value(&mut self, _value: ()) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DataTypeDefXsd;

    fn property(value_type: DataTypeDefXsd, value: &str) -> Property {
        Property {
            id_short: Some("P".to_string()),
            value_type,
            value: Some(value.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_property_coercion() {
        let mut p = property(DataTypeDefXsd::Int, "1");

        let err = p.set_value(Some("not-a-number".to_string())).unwrap_err();
        assert_eq!(
            err,
            MappingError::TypeCoercionError {
                declared_type: DataTypeDefXsd::Int,
                raw_value: "not-a-number".to_string(),
            }
        );
        assert_eq!(p.value(), Some("1".to_string()));

        p.set_value(Some("42".to_string())).unwrap();
        assert_eq!(p.value(), Some("42".to_string()));
    }

    #[test]
    fn test_property_null_clears() {
        let mut p = property(DataTypeDefXsd::Double, "1.5");
        p.set_value(None).unwrap();
        assert_eq!(p.value, None);
    }

    #[test]
    fn test_property_bounds_and_dates() {
        let mut p = property(DataTypeDefXsd::UnsignedByte, "0");
        assert!(p.set_value(Some("256".to_string())).is_err());
        assert!(p.set_value(Some("255".to_string())).is_ok());

        let mut d = property(DataTypeDefXsd::Date, "2024-01-01");
        assert!(d.set_value(Some("2024-02-30".to_string())).is_err());
        assert!(d.set_value(Some("2024-02-29".to_string())).is_ok());

        let mut s = property(DataTypeDefXsd::String, "");
        assert!(s.set_value(Some("anything at all".to_string())).is_ok());
    }

    #[test]
    fn test_range_checks_both_bounds() {
        let mut range = Range {
            value_type: DataTypeDefXsd::Double,
            min: Some("0".to_string()),
            max: Some("1".to_string()),
            ..Default::default()
        };
        let bad = RangeValue {
            min: Some("-1".to_string()),
            max: Some("high".to_string()),
        };
        assert!(matches!(
            range.set_value(bad),
            Err(MappingError::TypeCoercionError { ref raw_value, .. }) if raw_value == "high"
        ));
        assert_eq!(range.max.as_deref(), Some("1"));

        range
            .set_value(RangeValue {
                min: None,
                max: Some("1e3".to_string()),
            })
            .unwrap();
        assert_eq!(range.min, None);
        assert_eq!(range.max.as_deref(), Some("1e3"));
    }

    #[test]
    fn test_blob_and_file_overwrite_content_type() {
        let mut blob = Blob {
            content_type: "text/plain".to_string(),
            value: Some(b"hi".to_vec()),
            ..Default::default()
        };
        blob.set_value(BlobValue {
            content_type: "application/octet-stream".to_string(),
            value: Some(vec![0, 1, 2]),
        })
        .unwrap();
        assert_eq!(blob.content_type, "application/octet-stream");
        assert_eq!(blob.value.as_deref(), Some(&[0u8, 1, 2][..]));

        let mut file = File::default();
        file.set_value(FileValue {
            content_type: "application/pdf".to_string(),
            value: Some("/aasx/manual.pdf".to_string()),
        })
        .unwrap();
        assert_eq!(file.value(), FileValue {
            content_type: "application/pdf".to_string(),
            value: Some("/aasx/manual.pdf".to_string()),
        });
    }

    #[test]
    fn test_event_keeps_metadata() {
        let mut event = BasicEventElement {
            message_topic: Some("alarms".to_string()),
            ..Default::default()
        };
        event
            .set_value(BasicEventValue {
                observed: Reference::global("urn:observed"),
            })
            .unwrap();
        assert_eq!(event.observed, Reference::global("urn:observed"));
        assert_eq!(event.message_topic.as_deref(), Some("alarms"));
    }
}
