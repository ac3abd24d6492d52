//! idShort paths (`Sensors.Readings[1].Value`).
//!
//! A path starts with an idShort and continues with `.idShort` steps into
//! collections, entity statements or annotations, and `[n]` steps into
//! lists.

use std::str::FromStr;

use crate::error::PathError;
use crate::limits::{MAX_PATH_LEN, MAX_PATH_SEGMENTS};
use crate::model::element::{find_child, find_child_mut};
use crate::model::SubmodelElement;

/// One step of an idShort path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    IdShort(String),
    Index(usize),
}

/// A parsed idShort path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdShortPath {
    segments: Vec<PathSegment>,
}

impl IdShortPath {
    /// Parses a path string.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.len() > MAX_PATH_LEN {
            return Err(PathError::PathTooLong {
                len: path.len(),
                max: MAX_PATH_LEN,
            });
        }

        let invalid = |reason: &'static str| PathError::InvalidPath {
            path: path.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        for part in path.split('.') {
            let (name, mut indexes) = match part.find('[') {
                Some(open) => (&part[..open], &part[open..]),
                None => (part, ""),
            };
            if name.is_empty() {
                return Err(invalid("empty idShort segment"));
            }
            if name.contains(']') {
                return Err(invalid("unexpected ']'"));
            }
            segments.push(PathSegment::IdShort(name.to_string()));

            while !indexes.is_empty() {
                let inner = indexes
                    .strip_prefix('[')
                    .ok_or_else(|| invalid("expected '[' after index"))?;
                let close = inner.find(']').ok_or_else(|| invalid("unterminated index"))?;
                let digits = &inner[..close];
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid("index is not a non-negative integer"));
                }
                let index = digits
                    .parse()
                    .map_err(|_| invalid("index is out of range"))?;
                segments.push(PathSegment::Index(index));
                indexes = &inner[close + 1..];
            }

            if segments.len() > MAX_PATH_SEGMENTS {
                return Err(invalid("too many segments"));
            }
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns the path with the last segment removed, or `None` at the top.
    pub fn parent(&self) -> Option<IdShortPath> {
        if self.segments.len() <= 1 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Resolves the path against top-level elements.
    pub fn resolve<'a>(&self, elements: &'a [SubmodelElement]) -> Result<&'a SubmodelElement, PathError> {
        let (first, rest) = self.split_first()?;
        let mut current = find_child(elements, first).ok_or_else(|| self.not_found(1))?;
        for (offset, segment) in rest.iter().enumerate() {
            current = child(current, segment).ok_or_else(|| self.not_found(offset + 2))?;
        }
        Ok(current)
    }

    /// Mutable counterpart of [`IdShortPath::resolve`].
    pub fn resolve_mut<'a>(
        &self,
        elements: &'a mut [SubmodelElement],
    ) -> Result<&'a mut SubmodelElement, PathError> {
        let (first, rest) = self.split_first()?;
        let mut current = find_child_mut(elements, first).ok_or_else(|| self.not_found(1))?;
        for (offset, segment) in rest.iter().enumerate() {
            current = match child_mut(current, segment) {
                Some(next) => next,
                None => return Err(self.not_found(offset + 2)),
            };
        }
        Ok(current)
    }

    fn split_first(&self) -> Result<(&str, &[PathSegment]), PathError> {
        match self.segments.split_first() {
            Some((PathSegment::IdShort(first), rest)) => Ok((first, rest)),
            _ => Err(PathError::InvalidPath {
                path: self.to_string(),
                reason: "path must start with an idShort",
            }),
        }
    }

    /// Builds a not-found error naming the first `depth` segments.
    fn not_found(&self, depth: usize) -> PathError {
        PathError::ElementNotFound {
            path: display_segments(&self.segments[..depth.min(self.segments.len())]),
        }
    }
}

fn child<'a>(element: &'a SubmodelElement, segment: &PathSegment) -> Option<&'a SubmodelElement> {
    match (element, segment) {
        (SubmodelElement::SubmodelElementList(list), PathSegment::Index(i)) => list.value.get(*i),
        (_, PathSegment::IdShort(name)) => find_child(element.named_children()?, name),
        _ => None,
    }
}

fn child_mut<'a>(
    element: &'a mut SubmodelElement,
    segment: &PathSegment,
) -> Option<&'a mut SubmodelElement> {
    match (element, segment) {
        (SubmodelElement::SubmodelElementList(list), PathSegment::Index(i)) => {
            list.value.get_mut(*i)
        }
        (element, PathSegment::IdShort(name)) => find_child_mut(element.named_children_mut()?, name),
        _ => None,
    }
}

fn display_segments(segments: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            PathSegment::IdShort(name) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(name);
            }
            PathSegment::Index(i) => {
                out.push('[');
                out.push_str(&i.to_string());
                out.push(']');
            }
        }
    }
    out
}

/// Appends `.id_short` to a rendered path.
pub(crate) fn child_path(parent: &str, id_short: &str) -> String {
    if parent.is_empty() {
        id_short.to_string()
    } else {
        format!("{}.{}", parent, id_short)
    }
}

/// Appends `[index]` to a rendered path.
pub(crate) fn index_path(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}

impl std::fmt::Display for IdShortPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&display_segments(&self.segments))
    }
}

impl FromStr for IdShortPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IdShortPath::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::builder::ElementsBuilder;
    use crate::model::{DataTypeDefXsd, ElementKind, EntityType};

    fn tree() -> Vec<SubmodelElement> {
        ElementsBuilder::new()
            .property("Name", DataTypeDefXsd::String, "pump")
            .collection("Sensors", |c| {
                c.list("Readings", ElementKind::SubmodelElementCollection, |l| {
                    l.collection(|r| r.property("Value", DataTypeDefXsd::Double, "1.5"))
                        .collection(|r| r.property("Value", DataTypeDefXsd::Double, "2.5"))
                })
            })
            .entity("Motor", EntityType::SelfManagedEntity, |e| {
                e.statements(|s| s.property("Serial", DataTypeDefXsd::String, "M-1"))
            })
            .build()
    }

    #[test]
    fn test_parse_and_display() {
        let path = IdShortPath::parse("Sensors.Readings[1].Value").unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::IdShort("Sensors".to_string()),
                PathSegment::IdShort("Readings".to_string()),
                PathSegment::Index(1),
                PathSegment::IdShort("Value".to_string()),
            ]
        );
        assert_eq!(path.to_string(), "Sensors.Readings[1].Value");

        let nested: IdShortPath = "Matrix[0][2]".parse().unwrap();
        assert_eq!(nested.segments().len(), 3);
        assert_eq!(nested.to_string(), "Matrix[0][2]");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", ".Name", "Name.", "a..b", "[0]", "a[", "a[x]", "a[-1]", "a[0]b", "a]"] {
            assert!(
                matches!(IdShortPath::parse(bad), Err(PathError::InvalidPath { .. })),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_parse_rejects_long_path() {
        let long = "a".repeat(MAX_PATH_LEN + 1);
        assert!(matches!(
            IdShortPath::parse(&long),
            Err(PathError::PathTooLong { .. })
        ));
    }

    #[test]
    fn test_resolve() {
        let elements = tree();

        let value = IdShortPath::parse("Sensors.Readings[1].Value")
            .unwrap()
            .resolve(&elements)
            .unwrap();
        match value {
            SubmodelElement::Property(p) => assert_eq!(p.value.as_deref(), Some("2.5")),
            other => panic!("expected property, got {:?}", other.kind()),
        }

        let serial = IdShortPath::parse("Motor.Serial").unwrap().resolve(&elements).unwrap();
        assert_eq!(serial.id_short(), Some("Serial"));
    }

    #[test]
    fn test_resolve_not_found_reports_prefix() {
        let elements = tree();

        let err = IdShortPath::parse("Sensors.Readings[5].Value")
            .unwrap()
            .resolve(&elements)
            .unwrap_err();
        assert_eq!(
            err,
            PathError::ElementNotFound {
                path: "Sensors.Readings[5]".to_string()
            }
        );

        let err = IdShortPath::parse("Name.Inner").unwrap().resolve(&elements).unwrap_err();
        assert_eq!(
            err,
            PathError::ElementNotFound {
                path: "Name.Inner".to_string()
            }
        );

        let err = IdShortPath::parse("Sensors[0]").unwrap().resolve(&elements).unwrap_err();
        assert_eq!(
            err,
            PathError::ElementNotFound {
                path: "Sensors[0]".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_mut() {
        let mut elements = tree();
        let path = IdShortPath::parse("Sensors.Readings[0].Value").unwrap();
        if let SubmodelElement::Property(p) = path.resolve_mut(&mut elements).unwrap() {
            p.value = Some("9.0".to_string());
        }
        match path.resolve(&elements).unwrap() {
            SubmodelElement::Property(p) => assert_eq!(p.value.as_deref(), Some("9.0")),
            _ => panic!("expected property"),
        }
    }

    #[test]
    fn test_path_helpers() {
        assert_eq!(child_path("", "A"), "A");
        assert_eq!(child_path("A", "B"), "A.B");
        assert_eq!(index_path("A.B", 2), "A.B[2]");
    }

    #[test]
    fn test_parent() {
        let path = IdShortPath::parse("Sensors.Readings[1]").unwrap();
        assert_eq!(path.parent().unwrap().to_string(), "Sensors.Readings");
        assert!(IdShortPath::parse("Sensors").unwrap().parent().is_none());
    }
}
