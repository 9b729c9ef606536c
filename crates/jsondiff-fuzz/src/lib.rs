//! Fuzzing harnesses for the `jsondiff` engine.
//!
//! Each public function accepts raw bytes and drives one part of the
//! pipeline: parsing, tree comparison, or patch derivation. Recoverable
//! errors are swallowed so fuzzers keep exploring; broken structural
//! invariants panic.
//!
//! # Examples
//!
//! ```
//! jsondiff_fuzz::fuzz_canonicalization(b"{\"a\":1}");
//! jsondiff_fuzz::fuzz_diff(&[1, 2, 3, 4]);
//! jsondiff_fuzz::fuzz_patch(b"example");
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::collections::HashSet;

use arbitrary::Unstructured;
use jsondiff_core::{
    build_patch, compare, parse_pointer, DiffNode, DiffOptions, DiffState, Node, NodeType, Patch,
};
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};

const MAX_DEPTH: usize = 4;
const MAX_ARRAY_LEN: u8 = 6;
const MAX_OBJECT_LEN: u8 = 6;
const MAX_STRING_LEN: u8 = 12;

/// Feeds arbitrary bytes through the JSON and YAML parsers.
///
/// ```
/// jsondiff_fuzz::fuzz_canonicalization(b"{\"key\":\"value\"}");
/// ```
pub fn fuzz_canonicalization(data: &[u8]) {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(node) = Node::from_json_str(text) {
            let reparsed = Node::from_json_value(node.to_json_value());
            assert_eq!(reparsed.ok().as_ref(), Some(&node), "json value roundtrip");
        }
        let _ = Node::from_yaml_str(text);
    }
}

/// Compares two generated documents and checks the tree invariants.
///
/// ```
/// jsondiff_fuzz::fuzz_diff(b"seed");
/// ```
pub fn fuzz_diff(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let Some(lhs) = random_node(&mut unstructured) else {
        return;
    };
    let Some(rhs) = random_node(&mut unstructured) else {
        return;
    };
    let options = random_options(&mut unstructured);

    let root = compare(&lhs, &rhs, &options);
    check_tree(&root);

    let itself = compare(&lhs, &lhs, &options);
    assert!(itself.iter().all(DiffNode::is_equal), "self comparison must be equal");
}

/// Derives a patch from two generated documents and checks its pointers.
///
/// Also attempts to decode the raw bytes as a serialized patch.
///
/// ```
/// jsondiff_fuzz::fuzz_patch(b"patch fuzz");
/// ```
pub fn fuzz_patch(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    if let (Some(lhs), Some(rhs)) = (random_node(&mut unstructured), random_node(&mut unstructured))
    {
        let root = compare(&lhs, &rhs, &DiffOptions::default());
        let patch = build_patch(&root);
        assert_eq!(patch.is_empty(), root.is_equal(), "empty patch iff equal");
        for op in &patch {
            assert!(parse_pointer(op.path()).is_ok(), "unparseable pointer {}", op.path());
        }
        if let Ok(json) = patch.to_json_string() {
            let decoded: Result<Patch, _> = serde_json::from_str(&json);
            assert_eq!(decoded.ok().as_ref(), Some(&patch), "patch serde roundtrip");
        }
    }

    let _ = serde_json::from_slice::<Patch>(data);
}

fn check_tree(root: &DiffNode) {
    let mut seen = HashSet::new();
    for node in root.iter() {
        assert!(seen.insert(node.path.clone()), "duplicate path {}", node.path);
        let container = node.node_type != NodeType::Value;
        assert_eq!(
            node.children.is_some(),
            container && node.left.is_none() && node.right.is_none(),
            "children only on shared containers at {}",
            node.path
        );
        if node.children.is_some() {
            let equal = node.children().iter().all(DiffNode::is_equal);
            assert_eq!(node.is_equal(), equal, "aggregation at {}", node.path);
        }
        match node.state {
            DiffState::Added => assert!(node.left.is_none() && node.right.is_some()),
            DiffState::Removed => assert!(node.left.is_some() && node.right.is_none()),
            DiffState::Equal | DiffState::Changed => {}
        }
    }
}

fn random_options(unstructured: &mut Unstructured<'_>) -> DiffOptions {
    let epsilon = f64::from(unstructured.int_in_range::<u8>(0..=4).unwrap_or(0)) / 8.0;
    let key_sort = unstructured.arbitrary().unwrap_or(false);
    DiffOptions::default().with_epsilon_clamped(epsilon).with_key_sort(key_sort)
}

fn random_node(unstructured: &mut Unstructured<'_>) -> Option<Node> {
    let value = json_value_from_unstructured(unstructured, 0).ok()?;
    Node::from_json_value(value).ok()
}

fn json_value_from_unstructured(
    unstructured: &mut Unstructured<'_>,
    depth: usize,
) -> Result<JsonValue, arbitrary::Error> {
    if depth >= MAX_DEPTH {
        return json_leaf(unstructured);
    }

    match unstructured.int_in_range::<u8>(0..=5)? {
        0..=3 => json_leaf(unstructured),
        4 => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_ARRAY_LEN)?);
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(json_value_from_unstructured(unstructured, depth + 1)?);
            }
            Ok(JsonValue::Array(items))
        }
        _ => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_OBJECT_LEN)?);
            let mut map = JsonMap::new();
            for _ in 0..len {
                let key = random_string(unstructured)?;
                let value = json_value_from_unstructured(unstructured, depth + 1)?;
                map.insert(key, value);
            }
            Ok(JsonValue::Object(map))
        }
    }
}

fn json_leaf(unstructured: &mut Unstructured<'_>) -> Result<JsonValue, arbitrary::Error> {
    match unstructured.int_in_range::<u8>(0..=3)? {
        0 => Ok(JsonValue::Null),
        1 => Ok(JsonValue::Bool(unstructured.arbitrary()?)),
        2 => Ok(JsonValue::Number(random_number(unstructured)?)),
        _ => Ok(JsonValue::String(random_string(unstructured)?)),
    }
}

fn random_number(unstructured: &mut Unstructured<'_>) -> Result<JsonNumber, arbitrary::Error> {
    if unstructured.arbitrary()? {
        Ok(JsonNumber::from(unstructured.arbitrary::<i32>()?))
    } else {
        let numerator = f64::from(unstructured.arbitrary::<i32>()?);
        let denominator = f64::from(unstructured.int_in_range::<u16>(1..=1024)?);
        JsonNumber::from_f64(numerator / denominator).ok_or(arbitrary::Error::IncorrectFormat)
    }
}

// Keys draw from a small alphabet that includes the pointer escapes.
fn random_string(unstructured: &mut Unstructured<'_>) -> Result<String, arbitrary::Error> {
    const ALPHABET: &[u8] = b"ab/~.[]0 ";
    let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_STRING_LEN)?);
    let mut string = String::with_capacity(len);
    for _ in 0..len {
        let byte = *unstructured.choose(ALPHABET)?;
        string.push(char::from(byte));
    }
    Ok(string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalization_handles_utf8() {
        fuzz_canonicalization(br"{}");
        fuzz_canonicalization(b"a: [1, 2]");
        fuzz_canonicalization(&[0xff, 0xfe]);
    }

    #[test]
    fn diff_harness_runs() {
        fuzz_diff(b"diff");
        fuzz_diff(&[5, 3, 1, 0, 4, 2, 9, 9, 9, 5, 2, 1, 7, 3, 3, 3, 0, 1]);
    }

    #[test]
    fn patch_harness_runs() {
        fuzz_patch(b"patch");
        fuzz_patch(br#"[{"op":"remove","path":"/a"}]"#);
    }

    #[test]
    fn dotted_key_beside_nested_key_is_not_a_duplicate() {
        let node = Node::from_json_str(r#"{"a.b":1,"a":{"b":1},"x[0]":2,"x":[2]}"#).unwrap();
        let root = compare(&node, &node, &DiffOptions::default());
        check_tree(&root);
        assert_eq!(root.iter().count(), 7);
    }

    #[test]
    fn generated_nodes_stay_shallow() {
        let data: Vec<u8> = (0..=255).cycle().take(4096).collect();
        let mut unstructured = Unstructured::new(&data);
        if let Some(node) = random_node(&mut unstructured) {
            assert!(node.depth() <= MAX_DEPTH);
        }
    }
}
