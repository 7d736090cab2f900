use dynpath::{
    Value, get, set, set_with_schema,
    schema::{DynamicSchemaNode, Schema},
    value::{Kind, List, Map, Record},
};

use crate::helpers::{bookstore, json, person_schema};

#[test]
fn test_set_root_replaces_everything() {
    let mut root = bookstore();
    assert_eq!(set(&mut root, "$", Value::from(7)).unwrap(), 1);
    assert_eq!(root, 7);
}

#[test]
fn test_set_index_on_null_builds_generic_list() {
    let mut root = Value::Null;
    assert_eq!(set(&mut root, "$[10]", Value::from(10)).unwrap(), 1);

    let list = root.as_list().unwrap();
    assert!(list.can_grow());
    assert_eq!(list.len(), 11);
    assert!(list.iter().take(10).all(Value::is_null));
    assert_eq!(list.get(10), Some(&Value::Int(10)));
}

#[test]
fn test_set_index_on_null_follows_array_schema() {
    let schema: Schema = DynamicSchemaNode::array(11, DynamicSchemaNode::int()).into();
    let mut root = Value::Null;
    assert_eq!(set_with_schema(&mut root, "$[10]", Value::from(10), &schema).unwrap(), 1);

    assert_eq!(root.kind(), Kind::Array);
    assert_eq!(root.to_json_string(), "[0,0,0,0,0,0,0,0,0,0,10]");
}

#[test]
fn test_growable_padding_uses_element_zero() {
    let schema: Schema = DynamicSchemaNode::object()
        .with_child("scores", DynamicSchemaNode::list(DynamicSchemaNode::float()))
        .into();
    let mut root = Value::Null;
    set_with_schema(&mut root, "$.scores[2]", Value::from(1.5), &schema).unwrap();
    assert_eq!(root.to_json_string(), r#"{"scores":[0.0,0.0,1.5]}"#);
}

#[test]
fn test_schema_shapes_created_records() {
    let schema = person_schema();
    let mut root = Value::Null;
    set_with_schema(&mut root, "$.Address.Number", Value::from(12), &schema).unwrap();

    let person = root.as_record().unwrap();
    assert_eq!(person.name(), "Person");
    assert_eq!(person.get("Name"), Some(&Value::from("")));

    let address = person.get("Address").unwrap();
    assert_eq!(address.kind(), Kind::Ref);
    let address = address.deref_value().as_record().unwrap();
    assert_eq!(address.name(), "Address");
    assert_eq!(address.get("Number"), Some(&Value::Int(12)));
}

#[test]
fn test_fixed_list_cannot_grow() {
    let mut root = Value::List(List::fixed(vec![Value::Int(0), Value::Int(0)]));
    let err = set(&mut root, "$[5]", Value::from(1)).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(root.to_json_string(), "[0,0]");
}

#[test]
fn test_set_through_wildcard_and_union() {
    let mut root = bookstore();
    assert_eq!(set(&mut root, "$.store.book[*].price", Value::from(1)).unwrap(), 4);
    assert_eq!(get(&root, "$..book[*].price").unwrap().to_json_string(), "[1,1,1,1]");

    assert_eq!(
        set(&mut root, "$.store.bicycle['color','gears']", Value::from("x")).unwrap(),
        2
    );
    assert_eq!(get(&root, "$.store.bicycle.gears").unwrap(), "x");
}

#[test]
fn test_growable_slice_extends_list() {
    let mut root = json("[1]");
    assert_eq!(set(&mut root, "$[0:3]", Value::from(0)).unwrap(), 3);
    assert_eq!(root.to_json_string(), "[0,0,0]");
}

#[test]
fn test_recursive_descent_write_does_not_revisit() {
    let mut root = json(r#"{"a": {"id": 1, "b": {"id": 2}}}"#);
    let nested = json(r#"{"id": 99}"#);
    assert_eq!(set(&mut root, "$..id", nested).unwrap(), 2);
    assert_eq!(
        root.to_json_string(),
        r#"{"a":{"id":{"id":99},"b":{"id":{"id":99}}}}"#
    );
}

#[test]
fn test_set_through_reference_keeps_reference() {
    let mut root = Value::Map(Map::new().with("p", Value::reference(1)));
    set(&mut root, "$.p", Value::from(2)).unwrap();
    assert_eq!(root.as_map().unwrap().get("p"), Some(&Value::reference(2)));

    let mut nil = Value::Map(Map::new().with("p", Value::Ref(None)));
    set(&mut nil, "$.p.q", Value::from(true)).unwrap();
    assert_eq!(get(&nil, "$.p.q").unwrap(), true);
    assert_eq!(nil.as_map().unwrap().get("p").unwrap().kind(), Kind::Ref);
}

#[test]
fn test_read_only_fields() {
    let record = || Value::Record(Record::new("Cfg").field("A", 1).readonly_field("B", 2));

    let mut root = record();
    let err = set(&mut root, "$.B", Value::from(5)).unwrap_err();
    assert!(err.is_not_found());

    // Expansion skips the read-only field
    let mut root = record();
    assert_eq!(set(&mut root, "$[*]", Value::from(5)).unwrap(), 1);
    assert_eq!(root.as_record().unwrap().get("B"), Some(&Value::Int(2)));
}

#[test]
fn test_wildcard_skips_inapplicable_elements() {
    let mut root = json(r#"[{"a": 1}, 5, {"a": 3}]"#);
    assert_eq!(set(&mut root, "$[*].a", Value::from(0)).unwrap(), 2);
    assert_eq!(root.to_json_string(), r#"[{"a":0},5,{"a":0}]"#);
}

#[test]
fn test_partial_writes_survive_errors() {
    let mut root = Value::List(List::growable(vec![
        Value::Map(Map::new().with("a", 1)),
        Value::Record(Record::new("Locked").private_field("a", 2)),
    ]));
    let err = set(&mut root, "$[*].a", Value::from(0)).unwrap_err();
    assert!(err.is_invalid_segment());
    assert_eq!(get(&root, "$[0].a").unwrap(), 0);
}

#[test]
fn test_set_slice_past_the_end_of_fixed_list() {
    let mut root = Value::List(List::fixed(vec![Value::Int(0); 3]));
    assert_eq!(set(&mut root, "$[1:9223372036854775807]", Value::from(7)).unwrap(), 2);
    assert_eq!(root.to_json_string(), "[0,7,7]");
}

#[test]
fn test_set_refuses_unbounded_growth() {
    let mut root = json("[1]");
    let err = set(&mut root, "$[9223372036854775807]", Value::from(2)).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(root.to_json_string(), "[1]");
}

#[test]
fn test_set_root_writes_through_reference() {
    let mut root = Value::reference(1);
    assert_eq!(set(&mut root, "$", Value::from(2)).unwrap(), 1);
    assert_eq!(root, Value::reference(2));
}
