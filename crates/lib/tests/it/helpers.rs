use dynpath::{
    schema::{DynamicSchema, DynamicSchemaNode, Schema},
    value::{List, Map, Record, Value},
};

// ==========================
// VALUE FIXTURES
// ==========================

/// Parses a JSON literal used as test input
pub fn json(text: &str) -> Value {
    Value::from_json_str(text).expect("test JSON must be valid")
}

/// The classic bookstore document
pub fn bookstore() -> Value {
    json(
        r#"{
            "store": {
                "book": [
                    {"category": "reference", "author": "Nigel Rees", "title": "Sayings of the Century", "price": 8.95},
                    {"category": "fiction", "author": "Evelyn Waugh", "title": "Sword of Honour", "price": 12.99},
                    {"category": "fiction", "author": "Herman Melville", "title": "Moby Dick", "isbn": "0-553-21311-3", "price": 8.99},
                    {"category": "fiction", "author": "J. R. R. Tolkien", "title": "The Lord of the Rings", "isbn": "0-395-19395-8", "price": 22.99}
                ],
                "bicycle": {"color": "red", "price": 19.95}
            }
        }"#,
    )
}

/// A list of addresses where elements 1 and 4 carry a `City` list whose element 5 holds location
/// entries
pub fn addresses() -> Value {
    let city = || {
        let mut entries: Vec<Value> = (0..5).map(|i| Value::from(format!("street {i}"))).collect();
        entries.push(Value::Map(
            Map::new()
                .with("location", "north")
                .with("sub-location", "harbour")
                .with("postcode", "N1"),
        ));
        List::growable(entries)
    };
    let branch = || Value::Map(Map::new().with("City", city()).with("Name", "branch"));
    let plain = || Value::Map(Map::new().with("Name", "plain"));
    Value::List(List::growable(vec![
        plain(),
        branch(),
        plain(),
        plain(),
        branch(),
    ]))
}

/// A tree where fields named `Three` appear at different depths, in maps and records
pub fn nested_threes() -> Value {
    let map_branch = List::growable(vec![
        Value::Map(Map::new().with("TwentyFour", 1).with("04", 2).with("Other", 3)),
        Value::Map(Map::new().with("TwentyFour", 10)),
        Value::Map(Map::new().with("TwentyFour", 100).with("04", 200)),
    ]);
    let record_branch = List::growable(vec![
        Value::Record(Record::new("Leaf").field("TwentyFour", 5).field("Other", 6)),
        Value::Map(Map::new().with("TwentyFour", 50)),
        Value::Map(Map::new().with("04", 7)),
    ]);
    Value::Map(
        Map::new()
            .with("One", Map::new().with("Three", map_branch))
            .with(
                "Two",
                Map::new().with(
                    "NotThree",
                    List::growable(vec![Value::Map(Map::new().with("TwentyFour", -1))]),
                ),
            )
            .with("Holder", Record::new("Holder").field("Three", record_branch)),
    )
}

// ==========================
// SCHEMA FIXTURES
// ==========================

/// Record schema with a string `Five` and a string `Six`
pub fn row_schema() -> DynamicSchemaNode {
    DynamicSchemaNode::record("Row")
        .with_field("Five", DynamicSchemaNode::string())
        .with_field("Six", DynamicSchemaNode::string())
}

/// Person record with a nested address and a list of tags
pub fn person_schema() -> Schema {
    DynamicSchemaNode::record("Person")
        .with_field("Name", DynamicSchemaNode::string())
        .with_field("Age", DynamicSchemaNode::int())
        .with_field(
            "Address",
            DynamicSchemaNode::reference(
                DynamicSchemaNode::record("Address")
                    .with_field("Street", DynamicSchemaNode::string())
                    .with_field("Number", DynamicSchemaNode::int()),
            ),
        )
        .with_field("Tags", DynamicSchemaNode::list(DynamicSchemaNode::string()))
        .into()
}

/// Union of `Circle` (default, `Radius`) and `Square` (`Side`)
pub fn shape_union() -> DynamicSchema {
    DynamicSchema::new("Shape")
        .with_default_alternative(
            "Circle",
            DynamicSchemaNode::record("Circle").with_field("Radius", DynamicSchemaNode::float()),
        )
        .with_alternative(
            "Square",
            DynamicSchemaNode::record("Square").with_field("Side", DynamicSchemaNode::int()),
        )
}

// ==========================
// ASSERTION HELPERS
// ==========================

/// Collects `(path, value)` pairs from a ForEach, sorted so map order does not matter
pub fn visited(root: &Value, path: &str) -> Vec<(String, String)> {
    let mut seen = Vec::new();
    dynpath::for_each(root, path, |at, value| {
        seen.push((at.render(), value.to_string()));
        false
    })
    .expect("for_each should succeed");
    seen.sort();
    seen
}

/// Renders every element of a list value, sorted
pub fn sorted_elements(value: &Value) -> Vec<String> {
    let mut items: Vec<String> = value
        .as_list()
        .expect("expected a list")
        .iter()
        .map(|v| v.to_string())
        .collect();
    items.sort();
    items
}
