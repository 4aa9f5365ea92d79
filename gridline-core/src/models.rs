use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A record in the collection being shaped. Usually a JSON object.
pub type Item = Value;

/// One step of a field path: an object key or an array index
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(i) => write!(f, "{}", i),
            PathSegment::Key(k) => f.write_str(k),
        }
    }
}

/// Address of a (possibly nested) field inside an item.
///
/// Accepts either a single key or a list of segments when deserialized, so
/// `"title"` and `["author", "name"]` are both valid column fields. An empty
/// path means "any field" to the filter engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawFieldPath", into = "Vec<PathSegment>")]
pub struct FieldPath(Vec<PathSegment>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFieldPath {
    Single(PathSegment),
    Segments(Vec<PathSegment>),
}

impl From<RawFieldPath> for FieldPath {
    fn from(raw: RawFieldPath) -> Self {
        match raw {
            RawFieldPath::Single(segment) => FieldPath(vec![segment]),
            RawFieldPath::Segments(segments) => FieldPath(segments),
        }
    }
}

impl From<FieldPath> for Vec<PathSegment> {
    fn from(path: FieldPath) -> Self {
        path.0
    }
}

impl FieldPath {
    /// The "any field" path
    pub fn any() -> Self {
        FieldPath(Vec::new())
    }

    /// Single-key path. The key is taken literally, dots included.
    pub fn key(key: impl Into<String>) -> Self {
        FieldPath(vec![PathSegment::Key(key.into())])
    }

    /// Parse a dotted path such as `author.name` or `tags.0`
    pub fn parse_dotted(path: &str) -> Self {
        let segments = path
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| match s.parse::<usize>() {
                Ok(index) => PathSegment::Index(index),
                Err(_) => PathSegment::Key(s.to_string()),
            })
            .collect();

        FieldPath(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dotted form, used for query strings and display
    pub fn dotted(&self) -> String {
        self.0
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

impl From<&str> for FieldPath {
    fn from(key: &str) -> Self {
        FieldPath::key(key)
    }
}

impl From<Vec<PathSegment>> for FieldPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        FieldPath(segments)
    }
}

/// A named filter criterion with the values it accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterTerm {
    pub display: String,
    #[serde(default)]
    pub fields: FieldPath,
    #[serde(default)]
    pub values: Vec<String>,
}

impl FilterTerm {
    pub fn new(display: impl Into<String>, fields: FieldPath, values: Vec<String>) -> Self {
        Self {
            display: display.into(),
            fields,
            values,
        }
    }

    /// A term with no values does not take part in filtering
    pub fn is_active(&self) -> bool {
        !self.values.is_empty()
    }
}

/// One removable rendering of a filter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub text: String,
    pub tag_index: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
    #[default]
    #[serde(rename = "")]
    None,
}

impl SortDirection {
    /// Header click cycle: asc -> desc -> none -> asc
    pub fn next(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::None,
            SortDirection::None => SortDirection::Ascending,
        }
    }
}

/// User-supplied ordering of two items
#[derive(Clone)]
pub struct Comparator(Arc<dyn Fn(&Item, &Item) -> Ordering + Send + Sync>);

impl Comparator {
    pub fn new<F>(compare: F) -> Self
    where
        F: Fn(&Item, &Item) -> Ordering + Send + Sync + 'static,
    {
        Comparator(Arc::new(compare))
    }

    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        (self.0)(a, b)
    }
}

impl fmt::Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Comparator(..)")
    }
}

/// One rule of a multi-key sort
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SortSpec {
    #[serde(default)]
    pub field: FieldPath,
    #[serde(default)]
    pub direction: SortDirection,
    #[serde(default)]
    pub order: i32,
    #[serde(skip)]
    pub compare: Option<Comparator>,
}

impl SortSpec {
    pub fn new(field: impl Into<FieldPath>, direction: SortDirection, order: i32) -> Self {
        Self {
            field: field.into(),
            direction,
            order,
            compare: None,
        }
    }

    pub fn with_compare(mut self, compare: Comparator) -> Self {
        self.compare = Some(compare);
        self
    }

    pub fn is_active(&self) -> bool {
        self.direction != SortDirection::None
    }
}

/// An item plus the transient UI state of its table row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowData<T> {
    pub item: T,
    pub expanded: bool,
    pub selected: bool,
}

impl<T> RowData<T> {
    pub fn new(item: T) -> Self {
        Self {
            item,
            expanded: false,
            selected: false,
        }
    }
}
