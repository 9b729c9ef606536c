//! Structural JSON diff engine and patch builder.
//!
//! [`compare`] turns two parsed values into a [`DiffNode`] tree that labels
//! every structural position as equal, added, removed, or changed.
//! [`build_patch`] walks that tree once and derives an ordered list of
//! `add`/`remove`/`replace` operations. Both are pure functions.
//!
//! ```
//! use jsondiff_core::{build_patch, compare, DiffOptions, DiffState, Node};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let left = Node::from_json_str("{\"name\":\"jsondiff\",\"version\":1}")?;
//!     let right = Node::from_json_str("{\"name\":\"jsondiff\",\"version\":2}")?;
//!     let root = compare(&left, &right, &DiffOptions::default());
//!     assert_eq!(root.state, DiffState::Changed);
//!
//!     let patch = build_patch(&root);
//!     assert_eq!(patch.to_json_string()?, r#"[{"op":"replace","path":"/version","value":2}]"#);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod diff;
mod error;
mod node;
mod number;
mod options;
mod patch;
mod render;

pub use diff::{
    compare, parse_pointer, DiffNode, DiffState, DiffSummary, NodeType, Path, PathSegment,
};
pub use error::{CanonicalizeError, OptionsError, PointerError, RenderError};
pub use node::Node;
pub use number::Number;
pub use options::DiffOptions;
pub use patch::{build_patch, Patch, PatchOp};
pub use render::RenderConfig;

/// Returns the semantic version of the `jsondiff-core` crate.
///
/// ```
/// assert!(!jsondiff_core::version().is_empty());
/// ```
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
