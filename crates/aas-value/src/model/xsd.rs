//! Declared value types (`xs:` datatypes) for properties, ranges and lists.

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::error::MappingError;
use crate::util::lexical;

/// The XSD datatypes a data element may declare as its `valueType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataTypeDefXsd {
    AnyUri,
    Base64Binary,
    Boolean,
    Byte,
    Date,
    DateTime,
    Decimal,
    Double,
    Duration,
    Float,
    GDay,
    GMonth,
    GMonthDay,
    GYear,
    GYearMonth,
    HexBinary,
    Int,
    Integer,
    Long,
    NegativeInteger,
    NonNegativeInteger,
    NonPositiveInteger,
    PositiveInteger,
    Short,
    #[default]
    String,
    Time,
    UnsignedByte,
    UnsignedInt,
    UnsignedLong,
    UnsignedShort,
}

lazy_static! {
    static ref BY_NAME: FxHashMap<&'static str, DataTypeDefXsd> = DataTypeDefXsd::ALL
        .iter()
        .map(|t| (t.name(), *t))
        .collect();
}

impl DataTypeDefXsd {
    /// Every declared type, in AAS metamodel order.
    pub const ALL: [DataTypeDefXsd; 30] = [
        DataTypeDefXsd::AnyUri,
        DataTypeDefXsd::Base64Binary,
        DataTypeDefXsd::Boolean,
        DataTypeDefXsd::Byte,
        DataTypeDefXsd::Date,
        DataTypeDefXsd::DateTime,
        DataTypeDefXsd::Decimal,
        DataTypeDefXsd::Double,
        DataTypeDefXsd::Duration,
        DataTypeDefXsd::Float,
        DataTypeDefXsd::GDay,
        DataTypeDefXsd::GMonth,
        DataTypeDefXsd::GMonthDay,
        DataTypeDefXsd::GYear,
        DataTypeDefXsd::GYearMonth,
        DataTypeDefXsd::HexBinary,
        DataTypeDefXsd::Int,
        DataTypeDefXsd::Integer,
        DataTypeDefXsd::Long,
        DataTypeDefXsd::NegativeInteger,
        DataTypeDefXsd::NonNegativeInteger,
        DataTypeDefXsd::NonPositiveInteger,
        DataTypeDefXsd::PositiveInteger,
        DataTypeDefXsd::Short,
        DataTypeDefXsd::String,
        DataTypeDefXsd::Time,
        DataTypeDefXsd::UnsignedByte,
        DataTypeDefXsd::UnsignedInt,
        DataTypeDefXsd::UnsignedLong,
        DataTypeDefXsd::UnsignedShort,
    ];

    /// Returns the prefixed name, e.g. `xs:int`.
    pub fn name(self) -> &'static str {
        match self {
            DataTypeDefXsd::AnyUri => "xs:anyURI",
            DataTypeDefXsd::Base64Binary => "xs:base64Binary",
            DataTypeDefXsd::Boolean => "xs:boolean",
            DataTypeDefXsd::Byte => "xs:byte",
            DataTypeDefXsd::Date => "xs:date",
            DataTypeDefXsd::DateTime => "xs:dateTime",
            DataTypeDefXsd::Decimal => "xs:decimal",
            DataTypeDefXsd::Double => "xs:double",
            DataTypeDefXsd::Duration => "xs:duration",
            DataTypeDefXsd::Float => "xs:float",
            DataTypeDefXsd::GDay => "xs:gDay",
            DataTypeDefXsd::GMonth => "xs:gMonth",
            DataTypeDefXsd::GMonthDay => "xs:gMonthDay",
            DataTypeDefXsd::GYear => "xs:gYear",
            DataTypeDefXsd::GYearMonth => "xs:gYearMonth",
            DataTypeDefXsd::HexBinary => "xs:hexBinary",
            DataTypeDefXsd::Int => "xs:int",
            DataTypeDefXsd::Integer => "xs:integer",
            DataTypeDefXsd::Long => "xs:long",
            DataTypeDefXsd::NegativeInteger => "xs:negativeInteger",
            DataTypeDefXsd::NonNegativeInteger => "xs:nonNegativeInteger",
            DataTypeDefXsd::NonPositiveInteger => "xs:nonPositiveInteger",
            DataTypeDefXsd::PositiveInteger => "xs:positiveInteger",
            DataTypeDefXsd::Short => "xs:short",
            DataTypeDefXsd::String => "xs:string",
            DataTypeDefXsd::Time => "xs:time",
            DataTypeDefXsd::UnsignedByte => "xs:unsignedByte",
            DataTypeDefXsd::UnsignedInt => "xs:unsignedInt",
            DataTypeDefXsd::UnsignedLong => "xs:unsignedLong",
            DataTypeDefXsd::UnsignedShort => "xs:unsignedShort",
        }
    }

    /// Looks up a type by its prefixed name (`xs:double`).
    pub fn from_name(name: &str) -> Option<DataTypeDefXsd> {
        BY_NAME.get(name).copied()
    }

    /// Inclusive bounds for the integer family, `None` for other types.
    ///
    /// An unbounded side is reported as `None` inside the tuple.
    pub fn integer_bounds(self) -> Option<(Option<i128>, Option<i128>)> {
        let bounds = match self {
            DataTypeDefXsd::Integer => (None, None),
            DataTypeDefXsd::Long => (Some(i64::MIN as i128), Some(i64::MAX as i128)),
            DataTypeDefXsd::Int => (Some(i32::MIN as i128), Some(i32::MAX as i128)),
            DataTypeDefXsd::Short => (Some(i16::MIN as i128), Some(i16::MAX as i128)),
            DataTypeDefXsd::Byte => (Some(i8::MIN as i128), Some(i8::MAX as i128)),
            DataTypeDefXsd::UnsignedLong => (Some(0), Some(u64::MAX as i128)),
            DataTypeDefXsd::UnsignedInt => (Some(0), Some(u32::MAX as i128)),
            DataTypeDefXsd::UnsignedShort => (Some(0), Some(u16::MAX as i128)),
            DataTypeDefXsd::UnsignedByte => (Some(0), Some(u8::MAX as i128)),
            DataTypeDefXsd::PositiveInteger => (Some(1), None),
            DataTypeDefXsd::NonNegativeInteger => (Some(0), None),
            DataTypeDefXsd::NegativeInteger => (None, Some(-1)),
            DataTypeDefXsd::NonPositiveInteger => (None, Some(0)),
            _ => return None,
        };
        Some(bounds)
    }

    /// Returns true for integer, decimal and floating point types.
    pub fn is_numeric(self) -> bool {
        self.integer_bounds().is_some()
            || matches!(
                self,
                DataTypeDefXsd::Decimal | DataTypeDefXsd::Double | DataTypeDefXsd::Float
            )
    }

    /// Checks that `raw` is in the lexical space of this type.
    ///
    /// String-like types (`xs:string`, `xs:anyURI`) accept anything.
    pub fn coerce(self, raw: &str) -> Result<(), MappingError> {
        let checked = match self {
            DataTypeDefXsd::String | DataTypeDefXsd::AnyUri => Ok(()),
            DataTypeDefXsd::Boolean => lexical::check_boolean(raw),
            DataTypeDefXsd::Decimal => lexical::check_decimal(raw),
            DataTypeDefXsd::Double | DataTypeDefXsd::Float => lexical::check_double(raw),
            DataTypeDefXsd::Date => lexical::check_date(raw),
            DataTypeDefXsd::DateTime => lexical::check_date_time(raw),
            DataTypeDefXsd::Time => lexical::check_time(raw),
            DataTypeDefXsd::Duration => lexical::check_duration(raw),
            DataTypeDefXsd::GDay => lexical::check_g_day(raw),
            DataTypeDefXsd::GMonth => lexical::check_g_month(raw),
            DataTypeDefXsd::GMonthDay => lexical::check_g_month_day(raw),
            DataTypeDefXsd::GYear => lexical::check_g_year(raw),
            DataTypeDefXsd::GYearMonth => lexical::check_g_year_month(raw),
            DataTypeDefXsd::HexBinary => lexical::check_hex_binary(raw),
            DataTypeDefXsd::Base64Binary => lexical::check_base64_binary(raw),
            integer => match integer.integer_bounds() {
                Some((min, max)) => lexical::check_integer(raw, min, max),
                None => Ok(()),
            },
        };
        checked.map_err(|_| MappingError::TypeCoercionError {
            declared_type: self,
            raw_value: raw.to_string(),
        })
    }
}

impl std::fmt::Display for DataTypeDefXsd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_lookup() {
        for t in DataTypeDefXsd::ALL {
            assert_eq!(DataTypeDefXsd::from_name(t.name()), Some(t));
        }
        assert_eq!(DataTypeDefXsd::from_name("xs:int"), Some(DataTypeDefXsd::Int));
        assert_eq!(DataTypeDefXsd::from_name("int"), None);
        assert_eq!(DataTypeDefXsd::from_name("xs:langString"), None);
    }

    #[test]
    fn test_numeric_coercion() {
        assert!(DataTypeDefXsd::Int.coerce("42").is_ok());
        assert!(DataTypeDefXsd::Int.coerce("2147483648").is_err());
        assert!(DataTypeDefXsd::UnsignedByte.coerce("255").is_ok());
        assert!(DataTypeDefXsd::UnsignedByte.coerce("-1").is_err());
        assert!(DataTypeDefXsd::NegativeInteger.coerce("0").is_err());
        assert!(DataTypeDefXsd::Double.coerce("23.5").is_ok());
        assert!(DataTypeDefXsd::Float.coerce("-INF").is_ok());
        assert!(DataTypeDefXsd::Decimal.coerce("1e3").is_err());
    }

    #[test]
    fn test_coercion_error_carries_type_and_value() {
        let err = DataTypeDefXsd::Double.coerce("not-a-number").unwrap_err();
        assert_eq!(
            err,
            MappingError::TypeCoercionError {
                declared_type: DataTypeDefXsd::Double,
                raw_value: "not-a-number".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "value \"not-a-number\" is not a valid xs:double"
        );
    }

    #[test]
    fn test_string_types_accept_anything() {
        assert!(DataTypeDefXsd::String.coerce("").is_ok());
        assert!(DataTypeDefXsd::String.coerce("not-a-number").is_ok());
        assert!(DataTypeDefXsd::AnyUri.coerce("urn:example:1").is_ok());
    }

    #[test]
    fn test_is_numeric() {
        assert!(DataTypeDefXsd::Long.is_numeric());
        assert!(DataTypeDefXsd::Float.is_numeric());
        assert!(!DataTypeDefXsd::Boolean.is_numeric());
        assert!(!DataTypeDefXsd::DateTime.is_numeric());
    }
}
