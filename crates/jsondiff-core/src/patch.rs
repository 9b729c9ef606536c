//! Patch derivation from a diff tree.
//!
//! The builder walks the tree once in pre-order and turns every leaf-level
//! difference into an `add`, `remove`, or `replace` operation addressed by a
//! slash-delimited pointer. Changed containers contribute nothing of their
//! own; their descendants carry the operations.

use serde::{Deserialize, Serialize};

use crate::{DiffNode, DiffState, Node, NodeType, RenderError};

/// A single patch operation.
///
/// Serializes as `{"op":"add","path":"/a","value":1}`.
///
/// ```
/// # use jsondiff_core::PatchOp;
/// let op = PatchOp::Remove { path: "/a".to_string() };
/// assert_eq!(serde_json::to_string(&op)?, r#"{"op":"remove","path":"/a"}"#);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOp {
    /// Insert `value` at `path`.
    Add {
        /// Target pointer.
        path: String,
        /// Value to insert.
        value: Node,
    },
    /// Delete whatever is at `path`.
    Remove {
        /// Target pointer.
        path: String,
    },
    /// Overwrite the value at `path`.
    Replace {
        /// Target pointer.
        path: String,
        /// Replacement value.
        value: Node,
    },
}

impl PatchOp {
    /// Returns the operation name as it appears in the `op` field.
    #[must_use]
    pub fn op(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Remove { .. } => "remove",
            Self::Replace { .. } => "replace",
        }
    }

    /// Returns the target pointer.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Add { path, .. } | Self::Remove { path } | Self::Replace { path, .. } => path,
        }
    }

    /// Returns the carried value, if the operation has one.
    #[must_use]
    pub fn value(&self) -> Option<&Node> {
        match self {
            Self::Add { value, .. } | Self::Replace { value, .. } => Some(value),
            Self::Remove { .. } => None,
        }
    }
}

/// Ordered list of patch operations.
///
/// ```
/// # use jsondiff_core::{build_patch, compare, DiffOptions, Node};
/// let lhs = Node::from_json_str("{\"a\":1,\"b\":2}")?;
/// let rhs = Node::from_json_str("{\"b\":2,\"c\":3}")?;
/// let patch = build_patch(&compare(&lhs, &rhs, &DiffOptions::default()));
/// assert_eq!(
///     patch.to_json_string()?,
///     r#"[{"op":"remove","path":"/a"},{"op":"add","path":"/c","value":3}]"#
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Patch {
    ops: Vec<PatchOp>,
}

impl Patch {
    /// Builds a patch from the provided operations.
    #[must_use]
    pub fn from_ops(ops: Vec<PatchOp>) -> Self {
        Self { ops }
    }

    /// Returns the number of operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Indicates whether the patch has no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Returns an iterator over the operations.
    pub fn iter(&self) -> std::slice::Iter<'_, PatchOp> {
        self.ops.iter()
    }

    /// Returns the operations as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[PatchOp] {
        &self.ops
    }

    /// Consumes the patch and returns the operations.
    #[must_use]
    pub fn into_ops(self) -> Vec<PatchOp> {
        self.ops
    }

    /// Serializes the patch as compact JSON.
    pub fn to_json_string(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string(&self.ops)?)
    }

    /// Serializes the patch as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(&self.ops)?)
    }
}

impl IntoIterator for Patch {
    type Item = PatchOp;
    type IntoIter = std::vec::IntoIter<PatchOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a Patch {
    type Item = &'a PatchOp;
    type IntoIter = std::slice::Iter<'a, PatchOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

impl From<Vec<PatchOp>> for Patch {
    fn from(value: Vec<PatchOp>) -> Self {
        Self::from_ops(value)
    }
}

/// Derives the patch for a diff tree in pre-order.
#[must_use]
pub fn build_patch(root: &DiffNode) -> Patch {
    let ops: Vec<PatchOp> = root.iter().filter_map(node_op).collect();
    tracing::debug!(ops = ops.len(), "built patch");
    Patch::from_ops(ops)
}

fn node_op(node: &DiffNode) -> Option<PatchOp> {
    match (node.state, node.node_type) {
        (DiffState::Added, _) => {
            node.right.clone().map(|value| PatchOp::Add { path: node.pointer(), value })
        }
        (DiffState::Removed, _) => Some(PatchOp::Remove { path: node.pointer() }),
        (DiffState::Changed, NodeType::Value) => {
            node.right.clone().map(|value| PatchOp::Replace { path: node.pointer(), value })
        }
        _ => None,
    }
}
