use dynpath::{JsonPath, Value, for_each, for_each_parsed, get};

use crate::helpers::{bookstore, nested_threes, visited};

#[test]
fn test_combined_selectors_compose() {
    let root = nested_threes();
    let seen = visited(&root, "$..Three[::2]['TwentyFour','04']");

    let values: Vec<&str> = seen.iter().map(|(_, v)| v.as_str()).collect();
    let mut sorted_values = values.clone();
    sorted_values.sort_by_key(|v| v.parse::<i64>().unwrap_or_default());
    assert_eq!(sorted_values, vec!["1", "2", "5", "7", "100", "200"]);

    for (path, _) in &seen {
        assert!(path.contains(".Three["), "{path} is not below a Three field");
        assert!(
            path.contains("[0]") || path.contains("[2]"),
            "{path} is not at an even index"
        );
        assert!(
            path.ends_with(".TwentyFour") || path.ends_with("['04']"),
            "{path} does not end at a selected key"
        );
    }
}

#[test]
fn test_visited_paths_are_resolved() {
    let root = nested_threes();
    let seen = visited(&root, "$.One.Three[0]['TwentyFour','04']");
    assert_eq!(
        seen,
        vec![
            ("$.One.Three[0].TwentyFour".to_string(), "1".to_string()),
            ("$.One.Three[0]['04']".to_string(), "2".to_string()),
        ]
    );
}

#[test]
fn test_list_and_record_order_is_deterministic() {
    let root = bookstore();
    let mut titles = Vec::new();
    for_each(&root, "$.store.book[*].title", |_, value| {
        titles.push(value.to_string());
        false
    })
    .unwrap();
    assert_eq!(
        titles,
        vec![
            "Sayings of the Century",
            "Sword of Honour",
            "Moby Dick",
            "The Lord of the Rings"
        ]
    );
}

#[test]
fn test_stop_halts_the_whole_traversal() {
    let root = bookstore();
    let mut count = 0;
    for_each(&root, "$..price", |_, _| {
        count += 1;
        true
    })
    .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_no_match_is_not_an_error() {
    let root = bookstore();
    let mut called = false;
    for_each(&root, "$..publisher", |_, _| {
        called = true;
        false
    })
    .unwrap();
    assert!(!called);
}

#[test]
fn test_strict_errors_still_surface() {
    let root = bookstore();
    let err = for_each(&root, "$.store.car", |_, _| false).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.operation(), Some("for_each"));
}

#[test]
fn test_visit_paths_can_be_fed_back() {
    let root = bookstore();
    let path: JsonPath = "$..isbn".parse().unwrap();
    let mut found = Vec::new();
    for_each_parsed(&root, &path, |at, value| {
        found.push((at.clone(), value.clone()));
        false
    })
    .unwrap();
    assert_eq!(found.len(), 2);
    for (at, value) in found {
        let again: Value = get(&root, &at.render()).unwrap();
        assert_eq!(again, value);
    }
}

#[test]
fn test_slice_bounds_outside_the_list() {
    let root = Value::from_json_str("[1, 2, 3]").unwrap();
    let paths = |path: &str| -> Vec<String> {
        let mut seen = Vec::new();
        for_each(&root, path, |at, _| {
            seen.push(at.render());
            false
        })
        .unwrap();
        seen
    };
    assert_eq!(paths("$[0:9223372036854775807]"), vec!["$[0]", "$[1]", "$[2]"]);
    assert_eq!(paths("$[-100:1]"), vec!["$[0]"]);
    assert!(paths("$[5:10]").is_empty());
}
