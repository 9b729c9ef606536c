use jsondiff_core::{compare, DiffOptions, Node, RenderConfig};

fn tree() -> jsondiff_core::DiffNode {
    let lhs = Node::from_json_str("{\"a\":{\"b\":1},\"c\":[1]}").unwrap();
    let rhs = Node::from_json_str("{\"a\":{\"b\":2},\"c\":[1]}").unwrap();
    compare(&lhs, &rhs, &DiffOptions::default())
}

#[test]
fn only_changes_with_query_combines_filters() {
    let config = RenderConfig::new().with_only_changes(true).with_query("$.a");
    assert_eq!(tree().render(&config), "changed  $.a\nchanged  $.a.b\n");
}

#[test]
fn empty_query_keeps_everything() {
    let config = RenderConfig::new().with_query("");
    assert_eq!(config.query(), None);
    assert_eq!(tree().render(&config).lines().count(), 5);
}

#[test]
fn json_rendering_uses_lowercase_labels() {
    let json = tree().to_json_pretty().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["state"], "changed");
    assert_eq!(value["type"], "object");
    assert_eq!(value["children"][0]["key"], "a");
    assert_eq!(value["children"][1]["children"][0]["path"], "$.c[0]");
    assert!(value["children"][1]["children"][0].get("key").is_none());
}
