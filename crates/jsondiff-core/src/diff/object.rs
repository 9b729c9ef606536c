use indexmap::IndexMap;

use super::{diff_impl, DiffNode, NodeType, Path};
use crate::{DiffOptions, Node};

pub(super) fn diff_objects(
    lhs: &IndexMap<String, Node>,
    rhs: &IndexMap<String, Node>,
    path: Path,
    key: Option<&str>,
    options: &DiffOptions,
) -> DiffNode {
    let mut children = Vec::with_capacity(lhs.len().max(rhs.len()));
    for name in key_union(lhs, rhs, options.key_sort()) {
        let child_path = path.child_key(name);
        let child = match (lhs.get(name), rhs.get(name)) {
            (Some(left), Some(right)) => diff_impl(left, right, child_path, Some(name), options),
            (Some(left), None) => DiffNode::removed(child_path, Some(name), left),
            (None, Some(right)) => DiffNode::added(child_path, Some(name), right),
            (None, None) => continue,
        };
        children.push(child);
    }
    DiffNode::container(path, key, NodeType::Object, children)
}

/// Left keys in their order, then right-only keys in theirs; optionally
/// re-sorted by code point.
fn key_union<'a>(
    lhs: &'a IndexMap<String, Node>,
    rhs: &'a IndexMap<String, Node>,
    sort: bool,
) -> Vec<&'a str> {
    let mut keys: Vec<&str> = lhs.keys().map(String::as_str).collect();
    keys.extend(rhs.keys().filter(|name| !lhs.contains_key(*name)).map(String::as_str));
    if sort {
        keys.sort_unstable();
    }
    keys
}
