use jsondiff_core::{compare, DiffNode, DiffOptions, DiffState, Node, NodeType, Number};
use proptest::prelude::*;

fn node(json: &str) -> Node {
    Node::from_json_str(json).unwrap()
}

fn number(value: f64) -> Node {
    Node::Number(Number::new(value).unwrap())
}

#[test]
fn empty_objects_are_equal_with_empty_children() {
    let root = compare(&node("{}"), &node("{}"), &DiffOptions::default());
    assert_eq!(root.state, DiffState::Equal);
    assert_eq!(root.node_type, NodeType::Object);
    assert_eq!(root.children, Some(Vec::new()));
}

#[test]
fn tolerance_boundary() {
    let epsilon = 1e-9;
    let options = DiffOptions::default().with_epsilon(epsilon).unwrap();
    let at_bound = compare(&number(1.0), &number(1.0 + epsilon), &options);
    assert_eq!(at_bound.state, DiffState::Equal);
    let past_bound = compare(&number(1.0), &number(1.0 + epsilon * 1.0001), &options);
    assert_eq!(past_bound.state, DiffState::Changed);
}

#[test]
fn tolerance_applies_inside_containers() {
    let options = DiffOptions::default().with_epsilon(0.01).unwrap();
    let root = compare(&node("{\"x\":[1.0,2.0]}"), &node("{\"x\":[1.005,2.5]}"), &options);
    let states: Vec<_> = root.iter().map(|n| n.state).collect();
    assert_eq!(
        states,
        [DiffState::Changed, DiffState::Changed, DiffState::Equal, DiffState::Changed]
    );
}

#[test]
fn left_longer_array_reports_removed_tail() {
    let root = compare(&node("[1,2,3]"), &node("[1,2]"), &DiffOptions::default());
    let children = root.children();
    assert_eq!(children.len(), 3);
    assert_eq!(children[0].state, DiffState::Equal);
    assert_eq!(children[1].state, DiffState::Equal);
    assert_eq!(children[2].state, DiffState::Removed);
    assert_eq!(children[2].left, Some(number(3.0)));
    assert_eq!(children[2].right, None);
}

#[test]
fn right_longer_array_reports_added_tail() {
    let root = compare(&node("[1,2]"), &node("[1,2,3]"), &DiffOptions::default());
    let added = &root.children()[2];
    assert_eq!(added.state, DiffState::Added);
    assert_eq!(added.right, Some(number(3.0)));
    assert_eq!(added.left, None);
    assert_eq!(added.path.to_string(), "$[2]");
}

#[test]
fn object_key_union_in_first_seen_order() {
    let root = compare(&node("{\"a\":1,\"b\":2}"), &node("{\"b\":2,\"c\":3}"), &DiffOptions::default());
    let summary: Vec<_> = root
        .children()
        .iter()
        .map(|child| (child.key.clone().unwrap(), child.state))
        .collect();
    assert_eq!(
        summary,
        [
            ("a".to_string(), DiffState::Removed),
            ("b".to_string(), DiffState::Equal),
            ("c".to_string(), DiffState::Added),
        ]
    );
    assert_eq!(root.children()[0].left, Some(number(1.0)));
    assert_eq!(root.children()[2].right, Some(number(3.0)));
}

#[test]
fn key_sort_changes_order_but_not_classification() {
    let lhs = node("{\"c\":1,\"b\":2}");
    let rhs = node("{\"a\":0,\"b\":3}");
    let unsorted = compare(&lhs, &rhs, &DiffOptions::default());
    let sorted = compare(&lhs, &rhs, &DiffOptions::default().with_key_sort(true));

    let keys = |root: &DiffNode| -> Vec<String> {
        root.children().iter().map(|c| c.key.clone().unwrap()).collect()
    };
    assert_eq!(keys(&unsorted), ["c", "b", "a"]);
    assert_eq!(keys(&sorted), ["a", "b", "c"]);

    let mut by_key_unsorted: Vec<_> =
        unsorted.children().iter().map(|c| (c.path.to_string(), c.state)).collect();
    let mut by_key_sorted: Vec<_> =
        sorted.children().iter().map(|c| (c.path.to_string(), c.state)).collect();
    by_key_unsorted.sort();
    by_key_sorted.sort();
    assert_eq!(by_key_unsorted, by_key_sorted);
}

#[test]
fn array_versus_object_keeps_both_values() {
    let root = compare(&node("[1]"), &node("{\"0\":1}"), &DiffOptions::default());
    assert_eq!(root.state, DiffState::Changed);
    assert_eq!(root.node_type, NodeType::Value);
    assert_eq!(root.left, Some(node("[1]")));
    assert_eq!(root.right, Some(node("{\"0\":1}")));
    assert!(root.children.is_none());
}

fn arb_node() -> impl Strategy<Value = Node> {
    use proptest::{collection::btree_map, collection::vec, string::string_regex};

    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::Bool),
        (-50i64..50).prop_map(serde_json::Value::from),
        string_regex("[a-c]{0,3}").unwrap().prop_map(serde_json::Value::String),
    ];
    leaf.prop_recursive(3, 16, 4, move |inner| {
        prop_oneof![
            vec(inner.clone(), 0..4).prop_map(serde_json::Value::Array),
            btree_map(string_regex("[a-d]{1,2}").unwrap(), inner, 0..4)
                .prop_map(|map| serde_json::Value::Object(map.into_iter().collect())),
        ]
    })
    .prop_map(|value| Node::from_json_value(value).unwrap())
}

fn structural_tag(value: &Node) -> u8 {
    match value {
        Node::Array(_) => 0,
        Node::Object(_) => 1,
        _ => 2,
    }
}

proptest! {
    #[test]
    fn reflexivity(value in arb_node(), key_sort in any::<bool>()) {
        let options = DiffOptions::default().with_key_sort(key_sort);
        let root = compare(&value, &value, &options);
        prop_assert_eq!(root.state, DiffState::Equal);
        prop_assert!(root.iter().all(DiffNode::is_equal));
    }

    #[test]
    fn type_mismatch_totality(lhs in arb_node(), rhs in arb_node()) {
        prop_assume!(structural_tag(&lhs) != structural_tag(&rhs));
        let root = compare(&lhs, &rhs, &DiffOptions::default());
        prop_assert_eq!(root.state, DiffState::Changed);
        prop_assert_eq!(root.node_type, NodeType::Value);
        prop_assert_eq!(root.left.as_ref(), Some(&lhs));
        prop_assert_eq!(root.right.as_ref(), Some(&rhs));
        prop_assert!(root.children.is_none());
    }

    #[test]
    fn children_only_for_shared_containers(lhs in arb_node(), rhs in arb_node()) {
        let root = compare(&lhs, &rhs, &DiffOptions::default());
        for n in root.iter() {
            let container = matches!(n.node_type, NodeType::Object | NodeType::Array);
            let two_sided = !matches!(n.state, DiffState::Added | DiffState::Removed);
            let has_sides = n.left.is_some() || n.right.is_some();
            prop_assert_eq!(n.children.is_some(), container && two_sided && !has_sides);
        }
    }
}
