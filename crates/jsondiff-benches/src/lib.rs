//! Benchmark corpora for the `jsondiff` engine.
//!
//! Each [`Corpus`] generates a deterministic pair of documents shaped like a
//! common real-world payload, so Criterion groups can measure comparison,
//! patch derivation, and rendering without checked-in fixtures.
//!
//! # Examples
//!
//! ```
//! use jsondiff_benches::available_corpora;
//! use jsondiff_core::DiffOptions;
//!
//! let corpus = &available_corpora()[0];
//! let dataset = corpus.load()?;
//! assert!(!dataset.compare(&DiffOptions::default()).is_equal());
//! # Ok::<(), jsondiff_core::CanonicalizeError>(())
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use jsondiff_core::{compare, CanonicalizeError, DiffNode, DiffOptions, Node};
use serde_json::{json, Value as JsonValue};

/// A named generator for a left/right document pair.
#[derive(Clone, Copy, Debug)]
pub struct Corpus {
    name: &'static str,
    size: usize,
    generate: fn(usize) -> (JsonValue, JsonValue),
}

impl Corpus {
    /// Returns the corpus name used as the benchmark id.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Builds both documents.
    pub fn load(&self) -> Result<Dataset, CanonicalizeError> {
        let (left, right) = (self.generate)(self.size);
        Ok(Dataset { left: Node::from_json_value(left)?, right: Node::from_json_value(right)? })
    }

    /// Returns the combined size of both documents serialized as compact JSON.
    #[must_use]
    pub fn fixture_bytes(&self) -> usize {
        let (left, right) = (self.generate)(self.size);
        left.to_string().len() + right.to_string().len()
    }
}

/// A loaded document pair.
#[derive(Clone, Debug)]
pub struct Dataset {
    left: Node,
    right: Node,
}

impl Dataset {
    /// The original document.
    #[must_use]
    pub fn left(&self) -> &Node {
        &self.left
    }

    /// The modified document.
    #[must_use]
    pub fn right(&self) -> &Node {
        &self.right
    }

    /// Compares the pair under `options`.
    #[must_use]
    pub fn compare(&self, options: &DiffOptions) -> DiffNode {
        compare(&self.left, &self.right, options)
    }
}

/// Returns every registered corpus.
#[must_use]
pub fn available_corpora() -> &'static [Corpus] {
    const CORPORA: &[Corpus] = &[
        Corpus { name: "config-object", size: 400, generate: config_object },
        Corpus { name: "record-array", size: 1_000, generate: record_array },
        Corpus { name: "deep-tree", size: 10, generate: deep_tree },
    ];
    CORPORA
}

// Flat object; every tenth key changes, every fiftieth disappears.
fn config_object(size: usize) -> (JsonValue, JsonValue) {
    let mut left = serde_json::Map::new();
    let mut right = serde_json::Map::new();
    for i in 0..size {
        let key = format!("setting_{i:04}");
        left.insert(key.clone(), json!(i));
        if i % 50 == 0 {
            continue;
        }
        let value = if i % 10 == 0 { json!(format!("v{i}")) } else { json!(i) };
        right.insert(key, value);
    }
    right.insert("appended".to_string(), json!({"enabled": true}));
    (JsonValue::Object(left), JsonValue::Object(right))
}

// Array of records with float noise and a shorter right side.
fn record_array(size: usize) -> (JsonValue, JsonValue) {
    let record = |i: usize, drift: f64| {
        json!({
            "id": i,
            "name": format!("record-{i}"),
            "score": i as f64 * 0.5 + drift,
            "tags": ["a", "b", if i % 7 == 0 { "c" } else { "d" }],
        })
    };
    let left: Vec<_> = (0..size).map(|i| record(i, 0.0)).collect();
    let right: Vec<_> = (0..size - size / 20).map(|i| record(i, 1e-12)).collect();
    (JsonValue::Array(left), JsonValue::Array(right))
}

// Binary tree of objects; one leaf differs.
fn deep_tree(depth: usize) -> (JsonValue, JsonValue) {
    fn build(depth: usize, leaf: i64) -> JsonValue {
        if depth == 0 {
            return json!(leaf);
        }
        json!({"l": build(depth - 1, leaf), "r": build(depth - 1, 0)})
    }
    (build(depth, 0), build(depth, 1))
}
