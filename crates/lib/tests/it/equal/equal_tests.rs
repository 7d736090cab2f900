use dynpath::{
    EqualityOptions, Value, are_equal, convert,
    schema::DynamicSchemaNode,
    value::{Kind, Record},
};

use crate::helpers::{bookstore, json, person_schema};

#[test]
fn test_decoded_documents_compare_structurally() {
    let a = json(r#"{"x": 1, "y": [1, 2, {"z": null}]}"#);
    let b = json(r#"{"y": [1, 2, {"z": null}], "x": 1}"#);
    assert!(are_equal(&a, &b, None));
    assert!(are_equal(&bookstore(), &bookstore(), None));

    let c = json(r#"{"x": 1, "y": [2, 1, {"z": null}]}"#);
    assert!(!are_equal(&a, &c, None));
}

#[test]
fn test_float_tolerance_applies_at_depth() {
    let a = json(r#"{"p": [0.1, 0.2]}"#);
    let b = json(r#"{"p": [0.1000001, 0.2]}"#);
    assert!(!are_equal(&a, &b, None));
    let options = EqualityOptions::new().with_float_tolerance(1e-3);
    assert!(are_equal(&a, &b, Some(&options)));
}

#[test]
fn test_converted_values_compare_equal() {
    let schema = person_schema();
    let from_strings = convert(&json(r#"{"Name": "Ada", "Age": "36"}"#), &schema).unwrap();
    let from_numbers = convert(&json(r#"{"Name": "Ada", "Age": 36.9}"#), &schema).unwrap();
    assert!(are_equal(&from_strings, &from_numbers, None));
}

#[test]
fn test_overrides() {
    let options = EqualityOptions::new()
        .with_kind_override(Kind::Int, |_: &Value, _: &Value| true)
        .with_record_override("Stamp", |_: &Value, _: &Value| true);

    assert!(are_equal(&Value::Int(1), &Value::Int(2), Some(&options)));
    assert!(!are_equal(&Value::Int(1), &Value::from("1"), Some(&options)));

    let a = Value::Record(Record::new("Stamp").field("At", "monday"));
    let b = Value::Record(Record::new("Stamp").field("At", "tuesday"));
    assert!(are_equal(&a, &b, Some(&options)));

    let other = Value::Record(Record::new("Other").field("At", "monday"));
    assert!(!are_equal(&a, &other, Some(&options)));
}

#[test]
fn test_schema_zero_values_are_equal() {
    let node = DynamicSchemaNode::record("P").with_field("X", DynamicSchemaNode::int());
    assert!(are_equal(&node.zero_value(), &node.zero_value(), None));
    assert!(are_equal(&node.zero_value(), &Value::Record(Record::new("P").field("X", 0)), None));
}
