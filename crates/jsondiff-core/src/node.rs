use indexmap::IndexMap;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::{diff::NodeType, CanonicalizeError, DiffNode, DiffOptions, Number};

/// Represents the JSON data model compared by the diff engine.
///
/// Objects keep their keys in first-seen order; that order drives the
/// default child order of a diff.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number represented as IEEE-754 double precision.
    Number(Number),
    /// JSON string.
    String(String),
    /// JSON array.
    Array(Vec<Node>),
    /// JSON object with insertion-ordered keys.
    Object(IndexMap<String, Node>),
}

impl Node {
    /// Parses a JSON string into the node representation.
    ///
    /// ```
    /// # use jsondiff_core::Node;
    /// let node = Node::from_json_str("{\"hello\":\"world\"}")?;
    /// assert!(matches!(node, Node::Object(_)));
    /// # Ok::<(), jsondiff_core::CanonicalizeError>(())
    /// ```
    pub fn from_json_str(input: &str) -> Result<Self, CanonicalizeError> {
        if input.trim().is_empty() {
            return Err(CanonicalizeError::Empty);
        }
        let value: JsonValue = serde_json::from_str(input)?;
        Self::from_json_value(value)
    }

    /// Parses a YAML string into the node representation.
    ///
    /// ```
    /// # use jsondiff_core::Node;
    /// let node = Node::from_yaml_str("---\nanswer: 42\n")?;
    /// assert!(matches!(node, Node::Object(_)));
    /// # Ok::<(), jsondiff_core::CanonicalizeError>(())
    /// ```
    pub fn from_yaml_str(input: &str) -> Result<Self, CanonicalizeError> {
        if input.trim().is_empty() {
            return Err(CanonicalizeError::Empty);
        }
        let value: YamlValue = serde_yaml::from_str(input)?;
        Self::from_yaml_value(value)
    }

    /// Converts a serde JSON value into a [`Node`].
    pub fn from_json_value(value: JsonValue) -> Result<Self, CanonicalizeError> {
        match value {
            JsonValue::Null => Ok(Self::Null),
            JsonValue::Bool(v) => Ok(Self::Bool(v)),
            JsonValue::Number(num) => {
                let Some(as_f64) = num.as_f64() else {
                    return Err(CanonicalizeError::NumberOutOfRange { value: num.to_string() });
                };
                Ok(Self::Number(Number::new(as_f64)?))
            }
            JsonValue::String(s) => Ok(Self::String(s)),
            JsonValue::Array(values) => {
                let items =
                    values.into_iter().map(Self::from_json_value).collect::<Result<_, _>>()?;
                Ok(Self::Array(items))
            }
            JsonValue::Object(map) => {
                let mut object = IndexMap::with_capacity(map.len());
                for (key, value) in map {
                    object.insert(key, Self::from_json_value(value)?);
                }
                Ok(Self::Object(object))
            }
        }
    }

    fn from_yaml_value(value: YamlValue) -> Result<Self, CanonicalizeError> {
        match value {
            YamlValue::Null => Ok(Self::Null),
            YamlValue::Bool(v) => Ok(Self::Bool(v)),
            YamlValue::Number(num) => {
                if let Some(i) = num.as_i64() {
                    return Ok(Self::Number(Number::new(i as f64)?));
                }
                if let Some(u) = num.as_u64() {
                    return Ok(Self::Number(Number::new(u as f64)?));
                }
                if let Some(f) = num.as_f64() {
                    return Ok(Self::Number(Number::new(f)?));
                }
                Err(CanonicalizeError::NumberOutOfRange { value: num.to_string() })
            }
            YamlValue::String(s) => Ok(Self::String(s)),
            YamlValue::Sequence(seq) => {
                let items =
                    seq.into_iter().map(Self::from_yaml_value).collect::<Result<_, _>>()?;
                Ok(Self::Array(items))
            }
            YamlValue::Mapping(map) => {
                let mut object = IndexMap::with_capacity(map.len());
                for (key, value) in map {
                    let key = match key {
                        YamlValue::String(s) => s,
                        other => {
                            return Err(CanonicalizeError::NonStringYamlKey {
                                found: format!("{other:?}"),
                            });
                        }
                    };
                    object.insert(key, Self::from_yaml_value(value)?);
                }
                Ok(Self::Object(object))
            }
            YamlValue::Tagged(tagged) => {
                Err(CanonicalizeError::UnsupportedYamlTag { tag: tagged.tag.to_string() })
            }
        }
    }

    /// Converts the node into a serde JSON value, preserving key order.
    ///
    /// ```
    /// # use jsondiff_core::Node;
    /// let node = Node::from_json_str("{\"b\":1,\"a\":[true]}")?;
    /// assert_eq!(node.to_json_value().to_string(), "{\"b\":1,\"a\":[true]}");
    /// # Ok::<(), jsondiff_core::CanonicalizeError>(())
    /// ```
    #[must_use]
    pub fn to_json_value(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(v) => JsonValue::Bool(*v),
            Self::Number(n) => n.to_json_value(),
            Self::String(s) => JsonValue::String(s.clone()),
            Self::Array(values) => JsonValue::Array(values.iter().map(Self::to_json_value).collect()),
            Self::Object(map) => JsonValue::Object(
                map.iter().map(|(key, value)| (key.clone(), value.to_json_value())).collect(),
            ),
        }
    }

    /// Returns the structural classification of this value.
    ///
    /// ```
    /// # use jsondiff_core::{Node, NodeType};
    /// assert_eq!(Node::from_json_str("[]")?.node_type(), NodeType::Array);
    /// assert_eq!(Node::from_json_str("null")?.node_type(), NodeType::Value);
    /// # Ok::<(), jsondiff_core::CanonicalizeError>(())
    /// ```
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Array(_) => NodeType::Array,
            Self::Object(_) => NodeType::Object,
            _ => NodeType::Value,
        }
    }

    /// Returns the container nesting depth: `0` for scalars, `1` for a flat
    /// array or object, and one more for every nested level.
    ///
    /// ```
    /// # use jsondiff_core::Node;
    /// assert_eq!(Node::from_json_str("1")?.depth(), 0);
    /// assert_eq!(Node::from_json_str("{\"a\":[[]]}")?.depth(), 3);
    /// # Ok::<(), jsondiff_core::CanonicalizeError>(())
    /// ```
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Array(values) => 1 + values.iter().map(Self::depth).max().unwrap_or(0),
            Self::Object(map) => 1 + map.values().map(Self::depth).max().unwrap_or(0),
            _ => 0,
        }
    }

    /// Computes the structural diff between two nodes.
    ///
    /// ```
    /// # use jsondiff_core::{DiffOptions, DiffState, Node};
    /// let lhs = Node::from_json_str("1")?;
    /// let rhs = Node::from_json_str("2")?;
    /// let root = lhs.compare(&rhs, &DiffOptions::default());
    /// assert_eq!(root.state, DiffState::Changed);
    /// # Ok::<(), jsondiff_core::CanonicalizeError>(())
    /// ```
    #[must_use]
    pub fn compare(&self, other: &Self, options: &DiffOptions) -> DiffNode {
        crate::diff::compare(self, other, options)
    }
}

impl TryFrom<JsonValue> for Node {
    type Error = CanonicalizeError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        Self::from_json_value(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(values) => values.serialize(serializer),
            Self::Object(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = JsonValue::deserialize(deserializer)?;
        Self::from_json_value(value).map_err(D::Error::custom)
    }
}
