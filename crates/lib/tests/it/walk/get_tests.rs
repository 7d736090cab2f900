use dynpath::{
    Value, convert, get, get_as,
    schema::{DynamicSchemaNode, Schema},
    value::{List, Record},
};

use crate::helpers::{bookstore, json, row_schema, sorted_elements};

#[test]
fn test_root_is_identity() {
    let root = bookstore();
    assert_eq!(get(&root, "$").unwrap(), root);
    assert_eq!(get(&root, "").unwrap(), root);
}

#[test]
fn test_single_valued_path_returns_the_value() {
    let root = bookstore();
    assert_eq!(get(&root, "$.store.bicycle.color").unwrap(), "red");
    assert_eq!(get(&root, "$['store']['book'][0]['author']").unwrap(), "Nigel Rees");
    assert_eq!(get_as::<f64>(&root, "$.store.book[3].price"), Some(22.99));
}

#[test]
fn test_multi_valued_path_returns_a_list() {
    let root = bookstore();
    let authors = get(&root, "$.store.book[*].author").unwrap();
    assert_eq!(
        authors.to_json_string(),
        r#"["Nigel Rees","Evelyn Waugh","Herman Melville","J. R. R. Tolkien"]"#
    );

    let first_two = get(&root, "$.store.book[:2].title").unwrap();
    assert_eq!(first_two.as_list().unwrap().len(), 2);

    let last = get(&root, "$.store.book[-1:].title").unwrap();
    assert_eq!(last.to_json_string(), r#"["The Lord of the Rings"]"#);

    // A one-element union still returns a list
    let one = get(&root, "$.store.book[0,'x'].title").unwrap();
    assert_eq!(one.to_json_string(), r#"["Sayings of the Century"]"#);
}

#[test]
fn test_recursive_descent_collects_every_depth() {
    let root = bookstore();
    let prices = get(&root, "$..price").unwrap();
    assert_eq!(
        sorted_elements(&prices),
        vec!["12.99", "19.95", "22.99", "8.95", "8.99"]
    );

    let isbns = get(&root, "$..book[*].isbn").unwrap();
    assert_eq!(isbns.as_list().unwrap().len(), 2);
}

#[test]
fn test_recursive_descent_keeps_declaration_order_and_zero_fields() {
    let rows = json(r#"[{"Five": "five", "Six": "0_six"}, {"Five": "five"}, {"Five": "five", "Six": "2_six"}]"#);
    let schema: Schema = DynamicSchemaNode::list(row_schema()).into();
    let typed = convert(&rows, &schema).unwrap();

    let sixes = get(&typed, "$..Six").unwrap();
    assert_eq!(sixes.to_json_string(), r#"["0_six","","2_six"]"#);
}

#[test]
fn test_missing_strict_key_is_not_found() {
    let root = bookstore();
    let err = get(&root, "$.store.car").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.operation(), Some("get"));
    assert_eq!(err.path(), Some("$.store"));

    let err = get(&root, "$.store.book[10]").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_inapplicable_segment_is_invalid() {
    let root = bookstore();
    let err = get(&root, "$.store.book.title").unwrap_err();
    assert!(err.is_invalid_segment());

    let err = get(&root, "$.store.bicycle.color[0]").unwrap_err();
    assert!(err.is_invalid_segment());
}

#[test]
fn test_expansion_skips_misses_but_empty_result_fails() {
    let root = bookstore();
    let isbns = get(&root, "$.store.book[*].isbn").unwrap();
    assert_eq!(isbns.as_list().unwrap().len(), 2);

    let err = get(&root, "$.store.book[*].publisher").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_hidden_fields() {
    let root = Value::List(List::growable(vec![Value::Record(
        Record::new("Account").field("Owner", "ada").private_field("pin", 1234),
    )]));
    assert!(get(&root, "$[0].pin").unwrap_err().is_invalid_segment());
    assert_eq!(get(&root, "$[0][*]").unwrap().to_json_string(), r#"["ada"]"#);
    assert!(get(&root, "$..pin").unwrap_err().is_not_found());
}

#[test]
fn test_references_are_transparent() {
    let root = Value::reference(json(r#"{"inner": [1, 2]}"#));
    assert_eq!(get(&root, "$.inner[1]").unwrap(), 2);
}

#[test]
fn test_slice_bounds_outside_the_list_are_clamped() {
    let root = json("[1, 2, 3]");
    assert_eq!(get(&root, "$[0:9223372036854775807]").unwrap().to_json_string(), "[1,2,3]");
    assert_eq!(get(&root, "$[1:100]").unwrap().to_json_string(), "[2,3]");
    assert_eq!(get(&root, "$[-100:1]").unwrap().to_json_string(), "[1]");
    assert_eq!(get(&root, "$[-9223372036854775808:]").unwrap().to_json_string(), "[1,2,3]");

    // Clamping can leave nothing selected
    assert!(get(&root, "$[5:10]").unwrap_err().is_not_found());
}
