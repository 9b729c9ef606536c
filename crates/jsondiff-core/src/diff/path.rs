use std::fmt;

use serde::{Serialize, Serializer};

use crate::PointerError;

/// Sentinel printed for the root of a display path.
pub const ROOT_SYMBOL: &str = "$";

/// Represents a single element within a diff path.
///
/// ```
/// # use jsondiff_core::diff::PathSegment;
/// let key = PathSegment::key("name");
/// let index = PathSegment::index(2);
/// assert!(matches!(key, PathSegment::Key(_)));
/// assert!(matches!(index, PathSegment::Index(2)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object key lookup.
    Key(String),
    /// Array index lookup.
    Index(usize),
}

impl PathSegment {
    /// Creates a key segment.
    #[must_use]
    pub fn key<S>(value: S) -> Self
    where
        S: Into<String>,
    {
        Self::Key(value.into())
    }

    /// Creates an index segment.
    #[must_use]
    pub fn index(value: usize) -> Self {
        Self::Index(value)
    }

    /// Returns the pointer token for this segment, with `~` and `/` escaped.
    #[must_use]
    pub fn pointer_token(&self) -> String {
        match self {
            Self::Key(key) => escape_pointer_token(key),
            Self::Index(index) => index.to_string(),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, ".{key}"),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Location of a [`DiffNode`](crate::DiffNode) within the compared documents.
///
/// The display form is the dot/bracket address rooted at `$`; the pointer
/// form is slash-delimited.
///
/// ```
/// # use jsondiff_core::diff::{Path, PathSegment};
/// let path = Path::new().with_segment(PathSegment::key("items"))
///     .with_segment(PathSegment::index(0));
/// assert_eq!(path.to_string(), "$.items[0]");
/// assert_eq!(path.to_pointer(), "/items/0");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<PathSegment>);

impl Path {
    /// Creates the root path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new segment, returning the extended path.
    #[must_use]
    pub fn with_segment(mut self, segment: PathSegment) -> Self {
        self.0.push(segment);
        self
    }

    /// Returns a child path one object key deeper.
    #[must_use]
    pub fn child_key(&self, key: &str) -> Self {
        self.clone().with_segment(PathSegment::key(key))
    }

    /// Returns a child path one array index deeper.
    #[must_use]
    pub fn child_index(&self, index: usize) -> Self {
        self.clone().with_segment(PathSegment::Index(index))
    }

    /// Returns the underlying segments.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether this is the root path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the last segment, if any.
    #[must_use]
    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }

    /// Translates the path into a slash-delimited pointer.
    ///
    /// The root maps to `/`. Keys are escaped so that [`parse_pointer`]
    /// recovers every token exactly.
    ///
    /// ```
    /// # use jsondiff_core::diff::{Path, PathSegment};
    /// assert_eq!(Path::new().to_pointer(), "/");
    /// let path = Path::from(PathSegment::key("a/b~c"));
    /// assert_eq!(path.to_pointer(), "/a~1b~0c");
    /// ```
    #[must_use]
    pub fn to_pointer(&self) -> String {
        if self.0.is_empty() {
            return "/".to_string();
        }
        let mut pointer = String::new();
        for segment in &self.0 {
            pointer.push('/');
            pointer.push_str(&segment.pointer_token());
        }
        pointer
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(value: Vec<PathSegment>) -> Self {
        Self(value)
    }
}

impl From<PathSegment> for Path {
    fn from(value: PathSegment) -> Self {
        Self(vec![value])
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ROOT_SYMBOL)?;
        for segment in &self.0 {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Splits a pointer produced by [`Path::to_pointer`] back into unescaped tokens.
///
/// Both `""` and `"/"` denote the root and yield no tokens. Index tokens come
/// back as their decimal text.
///
/// ```
/// # use jsondiff_core::diff::parse_pointer;
/// assert_eq!(parse_pointer("/")?, Vec::<String>::new());
/// assert_eq!(parse_pointer("/a~1b/0")?, vec!["a/b".to_string(), "0".to_string()]);
/// # Ok::<(), jsondiff_core::PointerError>(())
/// ```
pub fn parse_pointer(pointer: &str) -> Result<Vec<String>, PointerError> {
    if pointer.is_empty() || pointer == "/" {
        return Ok(Vec::new());
    }
    let Some(rest) = pointer.strip_prefix('/') else {
        return Err(PointerError::MissingLeadingSlash(pointer.to_string()));
    };
    rest.split('/').map(unescape_pointer_token).collect()
}

fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn unescape_pointer_token(token: &str) -> Result<String, PointerError> {
    let mut result = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(ch) = chars.next() {
        if ch != '~' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('0') => result.push('~'),
            Some('1') => result.push('/'),
            _ => return Err(PointerError::InvalidEscape(token.to_string())),
        }
    }
    Ok(result)
}
