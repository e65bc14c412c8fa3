//! Property paths and their `[]`-joined form keys

use std::fmt;

/// Marker appended to a key for the elements of an array
pub const ITEMS_MARKER: &str = "[]";

/// Segment of a property path
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// The reflected value itself
    Root,
    /// Object property access: .fieldName
    Property(String),
    /// Array element access: []
    Items,
}

impl PathSegment {
    fn as_str(&self) -> &str {
        match self {
            PathSegment::Root => "#",
            PathSegment::Property(name) => name,
            PathSegment::Items => ITEMS_MARKER,
        }
    }
}

/// Path of a property from the schema root (e.g. `#.neighbors.[]`)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    segments: Vec<PathSegment>,
}

impl Default for PropertyPath {
    fn default() -> Self {
        Self::root()
    }
}

impl PropertyPath {
    pub fn root() -> Self {
        Self {
            segments: vec![PathSegment::Root],
        }
    }

    pub fn push_property(&self, name: &str) -> Self {
        let mut new = self.clone();
        new.segments.push(PathSegment::Property(name.to_string()));
        new
    }

    pub fn push_items(&self) -> Self {
        let mut new = self.clone();
        new.segments.push(PathSegment::Items);
        new
    }

    /// Form key of the property `name` under this path.
    ///
    /// The root segment is dropped, segments are joined with `.` and `.[]`
    /// collapses to `[]`, so `#.neighbors.[]` + `bio` reads `neighbors[].bio`.
    pub fn key(&self, name: &str) -> String {
        let joined = self
            .segments
            .iter()
            .skip(1)
            .map(PathSegment::as_str)
            .chain(std::iter::once(name))
            .collect::<Vec<_>>()
            .join(".");

        joined.replace(".[]", ITEMS_MARKER)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.segments.iter().map(PathSegment::as_str).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Parent of an array element key: the text before its last `[]`
pub fn items_parent(key: &str) -> Option<&str> {
    key.rfind(ITEMS_MARKER).map(|pos| &key[..pos])
}
