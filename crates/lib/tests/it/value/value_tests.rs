use dynpath::value::{Kind, List, Map, Record, Value};

use crate::helpers::json;

#[test]
fn test_json_round_trip_preserves_order_and_numbers() {
    let text = r#"{"z":1,"a":[true,null,2.5,"x"],"m":{"k":-3}}"#;
    let value = json(text);
    assert_eq!(value.to_json_string(), text);
    assert_eq!(value.kind(), Kind::Map);
    assert_eq!(dynpath::get(&value, "$.a[2]").unwrap(), Value::Float(2.5));
    assert_eq!(dynpath::get(&value, "$.m.k").unwrap(), -3);
}

#[test]
fn test_serde_uses_json_shape() {
    let value = Value::Map(Map::new().with("n", 1).with("tags", List::growable(vec!["a".into()])));
    let text = serde_json::to_string(&value).unwrap();
    assert_eq!(text, r#"{"n":1,"tags":["a"]}"#);
    let back: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(back, value);
}

#[test]
fn test_records_serialize_exported_fields() {
    let record = Value::Record(
        Record::new("User")
            .field("Name", "ada")
            .private_field("secret", "hunter2"),
    );
    assert_eq!(record.to_json_string(), r#"{"Name":"ada"}"#);
}

#[test]
fn test_kinds_distinguish_fixed_and_growable_lists() {
    assert_eq!(Value::List(List::growable(vec![])).kind(), Kind::List);
    assert_eq!(Value::List(List::fixed(vec![Value::Int(0)])).kind(), Kind::Array);
    assert_eq!(Value::reference(1).kind(), Kind::Ref);
    assert_eq!(Value::reference(1).deref_value().kind(), Kind::Int);
}

#[test]
fn test_zeroed_preserves_shape() {
    let fixed = Value::List(List::fixed(vec![1.into(), "a".into()]));
    assert_eq!(fixed.zeroed().to_json_string(), r#"[0,""]"#);

    let record = Value::Record(Record::new("P").field("X", 4).field("Y", true));
    let zero = record.zeroed();
    assert_eq!(zero.as_record().unwrap().name(), "P");
    assert!(zero.is_zero());

    assert_eq!(Value::reference("x").zeroed(), Value::Ref(None));
    assert_eq!(json(r#"{"a":1}"#).zeroed(), Value::Map(Map::new()));
}

#[test]
fn test_try_from_follows_references() {
    let value = Value::reference(Value::reference(41));
    assert_eq!(i64::try_from(&value).unwrap(), 41);
    assert!(String::try_from(&value).is_err());

    let err: dynpath::Error = String::try_from(&value).unwrap_err().into();
    assert!(err.is_type_error());
}

#[test]
fn test_path_methods_delegate_to_walk() {
    let mut value = Value::Null;
    assert_eq!(value.set_path("$.a.b", 1).unwrap(), 1);
    assert_eq!(value.get_path("$.a.b").unwrap(), 1);

    let mut paths = Vec::new();
    value
        .for_each_path("$..b", |path, _| {
            paths.push(path.render());
            false
        })
        .unwrap();
    assert_eq!(paths, vec!["$.a.b"]);

    assert_eq!(value.delete_path("$.a.b").unwrap(), 1);
    assert_eq!(value.to_json_string(), r#"{"a":{}}"#);
}

#[test]
fn test_malformed_json_is_a_decode_error() {
    let err: dynpath::Error = Value::from_json_str("{nope").unwrap_err().into();
    assert!(err.is_deserialization_error());
    assert_eq!(err.module(), "value");
}
