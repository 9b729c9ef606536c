use super::{DiffNode, DiffState, NodeType, Path};
use crate::{DiffOptions, Node};

/// Compares two scalars. Numbers use the configured tolerance; every other
/// pairing uses exact equality.
pub(super) fn diff_primitives(
    lhs: &Node,
    rhs: &Node,
    path: Path,
    key: Option<&str>,
    options: &DiffOptions,
) -> DiffNode {
    let equal = match (lhs, rhs) {
        (Node::Number(a), Node::Number(b)) => a.equals_within(*b, options.epsilon()),
        _ => lhs == rhs,
    };
    let state = if equal { DiffState::Equal } else { DiffState::Changed };
    DiffNode::leaf(path, key, NodeType::Value, state, lhs, rhs)
}
