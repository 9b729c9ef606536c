use super::{diff_impl, DiffNode, NodeType, Path};
use crate::{DiffOptions, Node};

/// Compares arrays position by position. Elements past the shorter length
/// become added or removed nodes; they are never aligned by content.
pub(super) fn diff_lists(
    lhs: &[Node],
    rhs: &[Node],
    path: Path,
    key: Option<&str>,
    options: &DiffOptions,
) -> DiffNode {
    let overlap = lhs.len().min(rhs.len());
    let mut children = Vec::with_capacity(lhs.len().max(rhs.len()));

    for (index, (left, right)) in lhs.iter().zip(rhs).enumerate() {
        children.push(diff_impl(left, right, path.child_index(index), None, options));
    }
    for (index, left) in lhs.iter().enumerate().skip(overlap) {
        children.push(DiffNode::removed(path.child_index(index), None, left));
    }
    for (index, right) in rhs.iter().enumerate().skip(overlap) {
        children.push(DiffNode::added(path.child_index(index), None, right));
    }

    DiffNode::container(path, key, NodeType::Array, children)
}
