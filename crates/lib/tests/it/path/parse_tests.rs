use dynpath::{
    JsonPath, parse,
    path::{PathSegment, UnionEntry},
};

#[test]
fn test_canonical_paths_round_trip() {
    let canonical = [
        "$",
        "$.store.book[*].author",
        "$..author",
        "$.store..price",
        "$..book[2]",
        "$..book[-1:]",
        "$..book[0,1]",
        "$..book[:2]",
        "$['first name'].last",
        "$[1,4].City[5]['location','sub-location']",
        "$..Three[::2]['TwentyFour','04']",
        "..author",
    ];
    for text in canonical {
        let parsed = parse(text).unwrap_or_else(|e| panic!("{text}: {e}"));
        assert_eq!(parsed.render(), text);
        assert_eq!(parsed.to_string(), text);
    }
}

#[test]
fn test_equivalent_spellings_render_the_same() {
    assert_eq!(parse("$['store']['book']").unwrap().render(), "$.store.book");
    assert_eq!(parse("$[*]").unwrap(), parse("$[:]").unwrap());
    assert_eq!(parse("").unwrap().render(), "");
    assert!(parse("").unwrap().is_root());
}

#[test]
fn test_groups_split_on_recursive_descent() {
    let path = parse("$.a..b[0]..c").unwrap();
    let groups = path.groups();
    assert_eq!(groups.len(), 3);
    assert_eq!(
        groups[0].segments(),
        &[PathSegment::Root, PathSegment::Key("a".into())]
    );
    assert_eq!(
        groups[1].segments(),
        &[PathSegment::Key("b".into()), PathSegment::Index(0)]
    );
    assert_eq!(groups[2].segments(), &[PathSegment::Key("c".into())]);
}

#[test]
fn test_union_keeps_listed_order_and_entry_types() {
    let path = parse("$['b',2,'a']").unwrap();
    let segment = &path.groups()[0].segments()[1];
    assert_eq!(
        segment,
        &PathSegment::Union(vec![
            UnionEntry::Key("b".into()),
            UnionEntry::Index(2),
            UnionEntry::Key("a".into()),
        ])
    );
    assert!(segment.applies_to_associative());
    assert!(segment.applies_to_linear());
    assert!(segment.is_multi_valued());
}

#[test]
fn test_invalid_paths_report_the_segment() {
    for text in ["$[", "$['unterminated]", "$.a[b]", "$[-3]", "$[1:2:3:4]", "$.a.$"] {
        let err = parse(text).unwrap_err();
        assert!(err.is_invalid_segment(), "{text} should be rejected");
        assert_eq!(err.path(), text);
    }

    let err: dynpath::Error = parse("$[").unwrap_err().into();
    assert!(err.is_invalid_segment());
    assert_eq!(err.module(), "path");
}

#[test]
fn test_builder_matches_parser() {
    let built = JsonPath::root()
        .key("users")
        .index(3)
        .key("first name")
        .descend("id");
    assert_eq!(built, parse("$.users[3]['first name']..id").unwrap());
}

#[test]
fn test_serde_as_string() {
    let path: JsonPath = "$.a[0]..b".parse().unwrap();
    let json = serde_json::to_string(&path).unwrap();
    assert_eq!(json, r#""$.a[0]..b""#);
    let back: JsonPath = serde_json::from_str(&json).unwrap();
    assert_eq!(back, path);

    assert!(serde_json::from_str::<JsonPath>(r#""$[""#).is_err());
}
