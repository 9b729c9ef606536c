//! Diff tree data structures and the comparison engine.
//!
//! [`compare`] walks both values depth-first and builds a [`DiffNode`] for
//! every structural position reachable from either side. Objects recurse by
//! key union, arrays recurse strictly by position, and scalars are compared
//! with the numeric tolerance from [`DiffOptions`].

mod list;
mod object;
mod path;
mod primitives;

pub use path::{parse_pointer, Path, PathSegment, ROOT_SYMBOL};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{DiffOptions, Node};

/// Structural classification of a diff node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Both sides are objects.
    Object,
    /// Both sides are arrays.
    Array,
    /// A scalar, or two sides whose shapes disagree.
    Value,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object => f.write_str("object"),
            Self::Array => f.write_str("array"),
            Self::Value => f.write_str("value"),
        }
    }
}

/// Outcome of comparing one structural position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffState {
    /// Both sides hold the same value (within tolerance).
    Equal,
    /// Only the right side holds a value here.
    Added,
    /// Only the left side holds a value here.
    Removed,
    /// Both sides hold a value but they differ.
    Changed,
}

impl DiffState {
    /// Returns the lowercase label used in renderings.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Changed => "changed",
        }
    }
}

impl fmt::Display for DiffState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of the diff tree.
///
/// `children` is `Some` exactly when both sides existed at this path and
/// shared a container type; it may then be empty.
///
/// ```
/// # use jsondiff_core::{compare, DiffOptions, DiffState, Node, NodeType};
/// let lhs = Node::from_json_str("{}")?;
/// let rhs = Node::from_json_str("{}")?;
/// let root = compare(&lhs, &rhs, &DiffOptions::default());
/// assert_eq!(root.state, DiffState::Equal);
/// assert_eq!(root.node_type, NodeType::Object);
/// assert_eq!(root.children, Some(vec![]));
/// # Ok::<(), jsondiff_core::CanonicalizeError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DiffNode {
    /// Location of this node.
    pub path: Path,
    /// Object key that produced this node, when reached through an object.
    ///
    /// Set on every object member, including members that were recursed
    /// into; `None` for the root and for array elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Structural classification.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Comparison outcome.
    pub state: DiffState,
    /// Left-hand value for leaf, mismatch, and removed nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Node>,
    /// Right-hand value for leaf, mismatch, and added nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Node>,
    /// Child comparisons for containers present on both sides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DiffNode>>,
}

impl DiffNode {
    /// Builds a terminal node recording both sides.
    pub(crate) fn leaf(
        path: Path,
        key: Option<&str>,
        node_type: NodeType,
        state: DiffState,
        left: &Node,
        right: &Node,
    ) -> Self {
        Self {
            path,
            key: key.map(str::to_owned),
            node_type,
            state,
            left: Some(left.clone()),
            right: Some(right.clone()),
            children: None,
        }
    }

    /// Builds a terminal node for a value that only exists on the right.
    pub(crate) fn added(path: Path, key: Option<&str>, right: &Node) -> Self {
        Self {
            path,
            key: key.map(str::to_owned),
            node_type: right.node_type(),
            state: DiffState::Added,
            left: None,
            right: Some(right.clone()),
            children: None,
        }
    }

    /// Builds a terminal node for a value that only exists on the left.
    pub(crate) fn removed(path: Path, key: Option<&str>, left: &Node) -> Self {
        Self {
            path,
            key: key.map(str::to_owned),
            node_type: left.node_type(),
            state: DiffState::Removed,
            left: Some(left.clone()),
            right: None,
            children: None,
        }
    }

    /// Builds a container node whose state aggregates its children.
    pub(crate) fn container(
        path: Path,
        key: Option<&str>,
        node_type: NodeType,
        children: Vec<DiffNode>,
    ) -> Self {
        let state = if children.iter().all(DiffNode::is_equal) {
            DiffState::Equal
        } else {
            DiffState::Changed
        };
        Self {
            path,
            key: key.map(str::to_owned),
            node_type,
            state,
            left: None,
            right: None,
            children: Some(children),
        }
    }

    /// Indicates whether this node compared equal.
    #[must_use]
    pub fn is_equal(&self) -> bool {
        self.state == DiffState::Equal
    }

    /// Returns the children, or an empty slice for terminal nodes.
    #[must_use]
    pub fn children(&self) -> &[DiffNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Returns the pointer form of this node's path.
    #[must_use]
    pub fn pointer(&self) -> String {
        self.path.to_pointer()
    }

    /// Iterates over this node and all descendants in pre-order.
    ///
    /// ```
    /// # use jsondiff_core::{compare, DiffOptions, Node};
    /// let lhs = Node::from_json_str("{\"a\":[1]}")?;
    /// let root = compare(&lhs, &lhs, &DiffOptions::default());
    /// let paths: Vec<String> = root.iter().map(|n| n.path.to_string()).collect();
    /// assert_eq!(paths, ["$", "$.a", "$.a[0]"]);
    /// # Ok::<(), jsondiff_core::CanonicalizeError>(())
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Returns the node at `path`, if the tree reaches it.
    #[must_use]
    pub fn find(&self, path: &Path) -> Option<&DiffNode> {
        let mut current = self;
        for depth in 0..path.len() {
            current = current.children().iter().find(|child| {
                child.path.len() == depth + 1 && child.path.last() == path.segments().get(depth)
            })?;
        }
        Some(current)
    }

    /// Counts added, removed, and changed nodes across the whole tree.
    ///
    /// Changed containers are counted alongside their differing descendants.
    ///
    /// ```
    /// # use jsondiff_core::{compare, DiffOptions, Node};
    /// let lhs = Node::from_json_str("{\"a\":1,\"b\":2}")?;
    /// let rhs = Node::from_json_str("{\"b\":3,\"c\":4}")?;
    /// let summary = compare(&lhs, &rhs, &DiffOptions::default()).summary();
    /// assert_eq!((summary.added, summary.removed, summary.changed), (1, 1, 2));
    /// # Ok::<(), jsondiff_core::CanonicalizeError>(())
    /// ```
    #[must_use]
    pub fn summary(&self) -> DiffSummary {
        let mut summary = DiffSummary::default();
        for node in self.iter() {
            match node.state {
                DiffState::Added => summary.added += 1,
                DiffState::Removed => summary.removed += 1,
                DiffState::Changed => summary.changed += 1,
                DiffState::Equal => {}
            }
        }
        summary
    }
}

impl<'a> IntoIterator for &'a DiffNode {
    type Item = &'a DiffNode;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator over a diff tree.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    stack: Vec<&'a DiffNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a DiffNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// Per-state node counts of a diff tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    /// Number of added nodes.
    pub added: usize,
    /// Number of removed nodes.
    pub removed: usize,
    /// Number of changed nodes, containers included.
    pub changed: usize,
}

impl DiffSummary {
    /// Indicates whether no differences were counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.removed == 0 && self.changed == 0
    }
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "added: {} / removed: {} / changed: {}", self.added, self.removed, self.changed)
    }
}

/// Computes the diff tree of two values.
///
/// Total over every input: mismatched shapes produce a changed leaf rather
/// than an error.
#[must_use]
pub fn compare(lhs: &Node, rhs: &Node, options: &DiffOptions) -> DiffNode {
    diff_impl(lhs, rhs, Path::new(), None, options)
}

pub(super) fn diff_impl(
    lhs: &Node,
    rhs: &Node,
    path: Path,
    key: Option<&str>,
    options: &DiffOptions,
) -> DiffNode {
    match (lhs, rhs) {
        (Node::Object(left), Node::Object(right)) => {
            object::diff_objects(left, right, path, key, options)
        }
        (Node::Array(left), Node::Array(right)) => list::diff_lists(left, right, path, key, options),
        _ if lhs.node_type() != rhs.node_type() => {
            tracing::trace!(%path, left = %lhs.node_type(), right = %rhs.node_type(), "shape mismatch");
            DiffNode::leaf(path, key, NodeType::Value, DiffState::Changed, lhs, rhs)
        }
        _ => primitives::diff_primitives(lhs, rhs, path, key, options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Number;
    use proptest::prelude::*;

    fn node(json: &str) -> Node {
        Node::from_json_str(json).unwrap()
    }

    #[test]
    fn diff_of_numbers_is_changed_leaf() {
        let root = compare(&node("1"), &node("2"), &DiffOptions::default());
        let expected = DiffNode {
            path: Path::new(),
            key: None,
            node_type: NodeType::Value,
            state: DiffState::Changed,
            left: Some(node("1")),
            right: Some(node("2")),
            children: None,
        };
        assert_eq!(root, expected);
    }

    #[test]
    fn object_versus_array_is_terminal_value_change() {
        let root = compare(&node("{\"a\":1}"), &node("[1]"), &DiffOptions::default());
        assert_eq!(root.node_type, NodeType::Value);
        assert_eq!(root.state, DiffState::Changed);
        assert_eq!(root.left, Some(node("{\"a\":1}")));
        assert_eq!(root.right, Some(node("[1]")));
        assert!(root.children.is_none());
    }

    #[test]
    fn null_versus_empty_object_is_terminal_value_change() {
        let root = compare(&Node::Null, &node("{}"), &DiffOptions::default());
        assert_eq!(root.node_type, NodeType::Value);
        assert_eq!(root.state, DiffState::Changed);
        assert!(root.children.is_none());
    }

    #[test]
    fn string_versus_bool_is_changed_value() {
        let root = compare(&Node::from("true"), &Node::Bool(true), &DiffOptions::default());
        assert_eq!(root.state, DiffState::Changed);
        assert_eq!(root.node_type, NodeType::Value);
    }

    #[test]
    fn number_versus_numeric_string_is_changed_even_with_tolerance() {
        let options = DiffOptions::default().with_epsilon(10.0).unwrap();
        let root = compare(&node("1"), &Node::from("1"), &options);
        assert_eq!(root.state, DiffState::Changed);
    }

    #[test]
    fn iter_visits_parent_before_children() {
        let lhs = node("{\"a\":{\"b\":[1,2]},\"c\":3}");
        let root = compare(&lhs, &node("{}"), &DiffOptions::default());
        let states: Vec<_> = root.iter().map(|n| (n.path.to_string(), n.state)).collect();
        assert_eq!(
            states,
            [
                ("$".to_string(), DiffState::Changed),
                ("$.a".to_string(), DiffState::Removed),
                ("$.c".to_string(), DiffState::Removed),
            ]
        );
    }

    #[test]
    fn find_locates_nested_nodes() {
        let lhs = node("{\"a\":[1,{\"b\":2}]}");
        let rhs = node("{\"a\":[1,{\"b\":3}]}");
        let root = compare(&lhs, &rhs, &DiffOptions::default());
        let target = Path::new().child_key("a").child_index(1).child_key("b");
        let found = root.find(&target).expect("nested node");
        assert_eq!(found.left, Some(Node::Number(Number::new(2.0).unwrap())));
        assert!(root.find(&Path::new().child_key("missing")).is_none());
    }

    #[test]
    fn serializes_with_original_field_names() {
        let root = compare(&node("{\"a\":1}"), &node("{\"a\":2}"), &DiffOptions::default());
        let json = serde_json::to_value(&root).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "path": "$",
                "type": "object",
                "state": "changed",
                "children": [
                    {"path": "$.a", "key": "a", "type": "value", "state": "changed", "left": 1, "right": 2}
                ]
            })
        );
    }

    fn arb_json_value() -> impl Strategy<Value = serde_json::Value> {
        use proptest::{collection::btree_map, collection::vec, string::string_regex};

        let leaf = prop_oneof![
            Just(serde_json::Value::Null),
            any::<bool>().prop_map(serde_json::Value::Bool),
            (-1000i64..1000).prop_map(serde_json::Value::from),
            string_regex("[a-zA-Z0-9]{0,8}").unwrap().prop_map(serde_json::Value::String),
        ];
        leaf.prop_recursive(4, 8, 4, move |inner| {
            prop_oneof![
                vec(inner.clone(), 0..4).prop_map(serde_json::Value::Array),
                btree_map(string_regex("[a-z]{1,3}").unwrap(), inner, 0..4)
                    .prop_map(|map| serde_json::Value::Object(map.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn identical_values_are_equal_throughout(json in arb_json_value()) {
            let value = Node::from_json_value(json).unwrap();
            let root = compare(&value, &value.clone(), &DiffOptions::default());
            prop_assert!(root.iter().all(DiffNode::is_equal));
        }

        #[test]
        fn paths_are_unique(lhs in arb_json_value(), rhs in arb_json_value()) {
            let lhs = Node::from_json_value(lhs).unwrap();
            let rhs = Node::from_json_value(rhs).unwrap();
            let root = compare(&lhs, &rhs, &DiffOptions::default());
            let mut seen = std::collections::HashSet::new();
            for node in root.iter() {
                prop_assert!(seen.insert(node.path.clone()), "duplicate path {}", node.path);
            }
        }

        #[test]
        fn internal_state_aggregates_children(lhs in arb_json_value(), rhs in arb_json_value()) {
            let lhs = Node::from_json_value(lhs).unwrap();
            let rhs = Node::from_json_value(rhs).unwrap();
            let root = compare(&lhs, &rhs, &DiffOptions::default());
            for node in root.iter().filter(|n| n.children.is_some()) {
                let all_equal = node.children().iter().all(DiffNode::is_equal);
                prop_assert_eq!(node.is_equal(), all_equal);
                prop_assert!(matches!(node.node_type, NodeType::Object | NodeType::Array));
            }
        }
    }
}
