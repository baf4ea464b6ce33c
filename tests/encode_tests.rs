use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde_graphjson::time::EpochMillis;
use serde_graphjson::{to_string, Value};
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::marker::PhantomData;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Serialize)]
struct Pair {
    a: i32,
    b: String,
}

#[derive(Serialize)]
#[allow(clippy::upper_case_acronyms, non_camel_case_types)]
enum Flag {
    FOO,
    bar_baz,
}

#[derive(Serialize)]
enum Shape {
    Circle(f64),
    Rect(u32, u32),
    Labelled { label: String, _hidden: bool },
}

#[derive(Serialize)]
struct Base {
    id: u64,
    created: EpochMillis,
}

#[derive(Serialize)]
struct Derived {
    name: String,
    #[serde(flatten)]
    base: Base,
}

#[test]
fn test_null() {
    assert_eq!(to_string(&None::<i32>).unwrap(), "null");
    assert_eq!(to_string(&()).unwrap(), "null");
    assert_eq!(to_string(&Value::Null).unwrap(), "null");
}

#[test]
fn test_booleans_are_unquoted() {
    assert_eq!(to_string(&true).unwrap(), "true");
    assert_eq!(to_string(&false).unwrap(), "false");
}

#[test]
fn test_plain_text_is_quoted() {
    assert_eq!(to_string("hello").unwrap(), "\"hello\"");
    assert_eq!(to_string(&"a b c".to_string()).unwrap(), "\"a b c\"");
}

#[test]
fn test_escaping() {
    let text = "a\"b\\c\nd";
    assert_eq!(to_string(text).unwrap(), r#""a\"b\\c\nd""#);
    assert_eq!(to_string("\u{1}").unwrap(), r#""\u0001""#);
}

#[test]
fn test_already_escaped_text_is_escaped_once() {
    let text = r"line\nnext";
    assert_eq!(to_string(text).unwrap(), r#""line\\nnext""#);
}

#[test]
fn test_insertion_ordered_mapping() {
    let mut map = IndexMap::new();
    map.insert("x", 1);
    map.insert("y", 2);
    assert_eq!(to_string(&map).unwrap(), r#"{"x":1,"y":2}"#);

    let mut reversed = IndexMap::new();
    reversed.insert("y", 2);
    reversed.insert("x", 1);
    assert_eq!(to_string(&reversed).unwrap(), r#"{"y":2,"x":1}"#);
}

#[test]
fn test_hash_map_entries() {
    let mut map = HashMap::new();
    map.insert("only".to_string(), vec![true]);
    assert_eq!(to_string(&map).unwrap(), r#"{"only":[true]}"#);
}

#[test]
fn test_sequences() {
    assert_eq!(to_string(&vec![1, 2, 3]).unwrap(), "[1,2,3]");
    assert_eq!(to_string(&VecDeque::from(vec!["a"])).unwrap(), r#"["a"]"#);

    let set: BTreeSet<_> = [3, 1, 2].into_iter().collect();
    assert_eq!(to_string(&set).unwrap(), "[1,2,3]");
}

#[test]
fn test_array_like_blocks() {
    assert_eq!(to_string(&[7u8, 8, 9]).unwrap(), "[7,8,9]");
    assert_eq!(to_string(&(1, "two", 3.0)).unwrap(), r#"[1,"two",3.0]"#);

    #[derive(Serialize)]
    struct Rgb(u8, u8, u8);
    assert_eq!(to_string(&Rgb(1, 2, 3)).unwrap(), "[1,2,3]");
}

#[test]
fn test_struct_members_in_declaration_order() {
    let pair = Pair {
        a: 1,
        b: "s".to_string(),
    };
    assert_eq!(to_string(&pair).unwrap(), r#"{"a":1,"b":"s"}"#);
}

#[test]
fn test_excluded_members() {
    #[derive(Serialize)]
    struct Record<T> {
        _internal: u32,
        visible: u32,
        #[serde(skip)]
        transient: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
        _marker: PhantomData<T>,
    }

    let record = Record::<u8> {
        _internal: 1,
        visible: 2,
        transient: 3,
        note: None,
        _marker: PhantomData,
    };
    assert_eq!(to_string(&record).unwrap(), r#"{"visible":2}"#);
}

#[test]
fn test_renamed_members_use_serde_names() {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Renamed {
        first_name: &'static str,
        #[serde(rename = "_kept")]
        kept: bool,
    }

    let value = Renamed {
        first_name: "Ada",
        kept: true,
    };
    // the encoder sees the serialized name, which starts with `_`
    assert_eq!(to_string(&value).unwrap(), r#"{"firstName":"Ada"}"#);
}

#[test]
fn test_inherited_members_follow_own_members() {
    let derived = Derived {
        name: "child".to_string(),
        base: Base {
            id: 9,
            created: EpochMillis::new(0),
        },
    };
    assert_eq!(
        to_string(&derived).unwrap(),
        r#"{"name":"child","id":9,"created":"0"}"#
    );
}

#[test]
fn test_inherited_members_skip_underscore_names_at_every_level() {
    #[derive(Serialize)]
    struct Account {
        id: u32,
        _base_secret: u32,
    }

    #[derive(Serialize)]
    struct Admin {
        name: &'static str,
        _own_secret: u32,
        #[serde(flatten)]
        account: Account,
    }

    let admin = Admin {
        name: "n",
        _own_secret: 1,
        account: Account {
            id: 2,
            _base_secret: 3,
        },
    };
    assert_eq!(to_string(&admin).unwrap(), r#"{"name":"n","id":2}"#);
}

#[test]
fn test_sized_maps_keep_underscore_keys() {
    let mut map = IndexMap::new();
    map.insert("_private", 1);
    map.insert("open", 2);
    assert_eq!(to_string(&map).unwrap(), r#"{"_private":1,"open":2}"#);
}

#[test]
fn test_enum_constants_use_their_name() {
    assert_eq!(to_string(&Flag::FOO).unwrap(), "\"FOO\"");
    assert_eq!(to_string(&Flag::bar_baz).unwrap(), "\"bar_baz\"");
    assert_eq!(
        to_string(&vec![Flag::FOO, Flag::bar_baz]).unwrap(),
        r#"["FOO","bar_baz"]"#
    );
}

#[test]
fn test_variants_with_data() {
    assert_eq!(to_string(&Shape::Circle(1.5)).unwrap(), r#"{"Circle":1.5}"#);
    assert_eq!(to_string(&Shape::Rect(2, 3)).unwrap(), r#"{"Rect":[2,3]}"#);
    let labelled = Shape::Labelled {
        label: "x".to_string(),
        _hidden: true,
    };
    assert_eq!(to_string(&labelled).unwrap(), r#"{"Labelled":{"label":"x"}}"#);
}

#[test]
fn test_newtype_structs_are_transparent() {
    #[derive(Serialize)]
    struct Meters(f64);
    assert_eq!(to_string(&Meters(2.5)).unwrap(), "2.5");
}

#[test]
fn test_legacy_dates_are_quoted_millis() {
    assert_eq!(to_string(&EpochMillis::new(0)).unwrap(), "\"0\"");
    assert_eq!(to_string(&EpochMillis::new(-250)).unwrap(), "\"-250\"");

    #[derive(Serialize)]
    struct Stamped {
        #[serde(with = "serde_graphjson::time::epoch_millis")]
        at: SystemTime,
        count: u32,
    }

    let stamped = Stamped {
        at: UNIX_EPOCH + Duration::from_millis(1_700),
        count: 1_700,
    };
    assert_eq!(to_string(&stamped).unwrap(), r#"{"at":"1700","count":1700}"#);
}

#[test]
fn test_temporal_values_are_iso_text() {
    let ts = Utc.with_ymd_and_hms(2014, 7, 24, 12, 34, 6).unwrap();
    assert_eq!(to_string(&ts).unwrap(), "\"2014-07-24T12:34:06Z\"");

    let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    assert_eq!(to_string(&day).unwrap(), "\"2024-03-01\"");

    #[derive(Serialize)]
    struct Opening {
        #[serde(serialize_with = "serde_graphjson::time::iso8601::serialize")]
        at: NaiveTime,
    }

    let opening = Opening {
        at: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
    };
    assert_eq!(to_string(&opening).unwrap(), r#"{"at":"09:30:00"}"#);
}

#[test]
fn test_nested_graph() {
    #[derive(Serialize)]
    struct Order {
        id: u32,
        lines: Vec<Pair>,
        tags: HashMap<String, Flag>,
        total: f64,
    }

    let mut tags = HashMap::new();
    tags.insert("kind".to_string(), Flag::FOO);
    let order = Order {
        id: 5,
        lines: vec![
            Pair {
                a: 1,
                b: "one".to_string(),
            },
            Pair {
                a: 2,
                b: "two".to_string(),
            },
        ],
        tags,
        total: 10.25,
    };

    assert_eq!(
        to_string(&order).unwrap(),
        concat!(
            r#"{"id":5,"lines":[{"a":1,"b":"one"},{"a":2,"b":"two"}],"#,
            r#""tags":{"kind":"FOO"},"total":10.25}"#
        )
    );
}

#[test]
fn test_output_is_valid_json() {
    let value = serde_graphjson::value!({
        "text": "tab\there \u{1f} \"quoted\"",
        "list": [1, 2.5, null, false],
        "nested": { "unicode": "héllo ✓" }
    });
    let text = to_string(&value).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["text"], "tab\there \u{1f} \"quoted\"");
    assert_eq!(parsed["list"][1], 2.5);
    assert_eq!(parsed["nested"]["unicode"], "héllo ✓");
}
