use dynpath::{
    Value, delete, get,
    value::{List, Record},
};

use crate::helpers::{addresses, bookstore, json};

#[test]
fn test_delete_root_zeroes_it() {
    let mut root = bookstore();
    assert_eq!(delete(&mut root, "$").unwrap(), 1);
    assert_eq!(root.to_json_string(), "{}");

    let mut fixed = Value::List(List::fixed(vec![1.into(), 2.into()]));
    delete(&mut fixed, "$").unwrap();
    assert_eq!(fixed.to_json_string(), "[0,0]");
}

#[test]
fn test_delete_union_below_two_branches() {
    let mut root = addresses();
    let count = delete(&mut root, "$[1,4].City[5]['location','sub-location']").unwrap();
    assert_eq!(count, 4);

    for branch in ["$[1].City[5]", "$[4].City[5]"] {
        let remaining = get(&root, branch).unwrap();
        assert_eq!(remaining.to_json_string(), r#"{"postcode":"N1"}"#);
    }
    assert_eq!(get(&root, "$[1].City[4]").unwrap(), "street 4");
    assert_eq!(get(&root, "$[1].City").unwrap().as_list().unwrap().len(), 6);
    assert_eq!(get(&root, "$[0].Name").unwrap(), "plain");
}

#[test]
fn test_delete_from_growable_list_preserves_order() {
    let mut root = json(r#"{"xs": [0, 1, 2, 3, 4, 5]}"#);
    assert_eq!(delete(&mut root, "$.xs[::2]").unwrap(), 3);
    assert_eq!(root.to_json_string(), r#"{"xs":[1,3,5]}"#);

    assert_eq!(delete(&mut root, "$.xs[*]").unwrap(), 3);
    assert_eq!(root.to_json_string(), r#"{"xs":[]}"#);
}

#[test]
fn test_delete_from_fixed_list_zeroes_in_place() {
    let mut root = Value::List(List::fixed(vec!["a".into(), "b".into(), "c".into()]));
    assert_eq!(delete(&mut root, "$[1]").unwrap(), 1);
    assert_eq!(root.to_json_string(), r#"["a","","c"]"#);

    assert_eq!(delete(&mut root, "$[*]").unwrap(), 3);
    assert_eq!(root.to_json_string(), r#"["","",""]"#);
    assert_eq!(root.as_list().unwrap().len(), 3);
}

#[test]
fn test_field_delete_is_idempotent() {
    let mut root = Value::Record(Record::new("User").field("Name", "ada").field("Age", 36));
    assert_eq!(delete(&mut root, "$.Age").unwrap(), 1);
    let once = root.clone();
    assert_eq!(delete(&mut root, "$.Age").unwrap(), 1);
    assert_eq!(root, once);
    assert_eq!(get(&root, "$.Age").unwrap(), 0);
    assert_eq!(get(&root, "$.Name").unwrap(), "ada");
}

#[test]
fn test_delete_does_not_create() {
    let mut root = json(r#"{"a": {}}"#);
    let err = delete(&mut root, "$.a.b.c").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(root.to_json_string(), r#"{"a":{}}"#);

    let mut null = Value::Null;
    assert!(delete(&mut null, "$.x").unwrap_err().is_not_found());
    assert!(null.is_null());
}

#[test]
fn test_delete_everywhere_with_recursive_descent() {
    let mut root = bookstore();
    assert_eq!(delete(&mut root, "$..price").unwrap(), 5);
    assert!(get(&root, "$..price").unwrap_err().is_not_found());
    assert_eq!(get(&root, "$..title").unwrap().as_list().unwrap().len(), 4);
}

#[test]
fn test_read_only_field_delete() {
    let mut root = Value::Record(Record::new("Cfg").readonly_field("Id", 9).field("Label", "x"));
    assert!(delete(&mut root, "$.Id").unwrap_err().is_not_found());
    assert_eq!(delete(&mut root, "$[*]").unwrap(), 1);
    assert_eq!(get(&root, "$.Id").unwrap(), 9);
    assert_eq!(get(&root, "$.Label").unwrap(), "");
}

#[test]
fn test_delete_slice_past_the_end() {
    let mut root = json(r#"{"xs": [1, 2, 3]}"#);
    assert_eq!(delete(&mut root, "$.xs[1:9223372036854775807]").unwrap(), 2);
    assert_eq!(root.to_json_string(), r#"{"xs":[1]}"#);

    assert!(delete(&mut root, "$.xs[5:10]").unwrap_err().is_not_found());
    assert_eq!(delete(&mut root, "$.xs[-100:1]").unwrap(), 1);
    assert_eq!(root.to_json_string(), r#"{"xs":[]}"#);
}
