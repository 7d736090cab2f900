use dynpath::{
    Value, convert, is_valid, validate_data, validate_union,
    schema::{DynamicSchemaNode, Schema},
    value::{List, Record},
};

use crate::helpers::{json, person_schema, shape_union};

#[test]
fn test_validation_does_not_coerce() {
    let schema = person_schema();
    // Plain JSON maps are not records
    let raw = json(r#"{"Name": "Ada", "Age": 36}"#);
    assert!(!is_valid(&raw, &schema));

    let err = validate_data(&raw, &schema).unwrap_err();
    assert!(err.is_validation_error());
    assert_eq!(err.operation(), Some("validate"));

    let converted = convert(&raw, &schema).unwrap();
    assert!(validate_data(&converted, &schema).is_ok());
}

#[test]
fn test_nested_failure_reports_location() {
    let schema = person_schema();
    let mut person = convert(&json(r#"{"Name": "Ada"}"#), &schema).unwrap();
    dynpath::set(&mut person, "$.Tags[1]", Value::from(3)).unwrap();

    let err = validate_data(&person, &schema).unwrap_err();
    assert_eq!(err.path(), Some("$.Tags[0]"));
}

#[test]
fn test_union_validation_reports_alternative() {
    let shapes = shape_union();
    let square = Value::Record(Record::new("Square").field("Side", 3));
    assert_eq!(validate_union(&square, &shapes).unwrap(), "Square");

    let triangle = Value::Record(Record::new("Triangle").field("Side", 3));
    assert!(validate_union(&triangle, &shapes).unwrap_err().is_validation_error());
}

#[test]
fn test_schema_built_values_are_valid() {
    let schema: Schema = DynamicSchemaNode::object()
        .with_child("grid", DynamicSchemaNode::array(2, DynamicSchemaNode::array(2, DynamicSchemaNode::float())))
        .with_child("owner", Schema::from(shape_union()))
        .into();
    let mut value = Value::Null;
    dynpath::set_with_schema(&mut value, "$.grid[1][0]", Value::Float(1.0), &schema).unwrap();
    dynpath::set_with_schema(
        &mut value,
        "$.owner",
        Value::Record(Record::new("Circle").field("Radius", 2.0)),
        &schema,
    )
    .unwrap();
    assert!(is_valid(&value, &schema), "{value}");

    dynpath::set(&mut value, "$.grid[0]", Value::List(List::growable(vec![]))).unwrap();
    assert!(!is_valid(&value, &schema));
}
