use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use sigil::prelude::*;

#[test]
fn test_request_round() {
    let request = json!({
        "Moment:m": {
            "@column": "id,content",
            "user-id": 82001
        },
        "Comment[]": [
            { "Comment": { "moment-id@": "/Moment/id" } }
        ],
        "[]": [],
        "format": true
    });

    let toggles = FormatToggles::default().with_hyphen(true);
    let out = sigil::normalize(&request, &toggles);

    assert_eq!(
        out,
        json!({
            "m": { "column": "id,content", "userId": 82001 },
            "CommentList": [
                { "Comment": { "momentId@": "/Moment/id" } }
            ],
            "list": [],
            "format": true
        })
    );
}

#[test]
fn test_input_untouched() {
    let tree = json!({ "a-b": { "c-d": 1 } });
    let before = tree.clone();
    let _ = KeyNormalizer::new(FormatToggles::all()).normalize(&tree);
    assert_eq!(tree, before);
}

#[test]
fn test_unknown_keys_pass_through() {
    let tree = json!({ "weird key!": 1, "@": 2, "x:y": 3 });
    assert_eq!(
        sigil::normalize(&tree, &FormatToggles::default()),
        json!({ "weird key!": 1, "": 2, "x:y": 3 })
    );
}

#[test]
fn test_at_and_alias_keys() {
    let tree = json!({
        "@Moment:m": { "@id": 1 },
        "@Comment[]": [],
        "Comment-item:c[]": [{ "x": 1 }],
        "Table:t": 2
    });
    let once = sigil::normalize(&tree, &FormatToggles::default());
    assert_eq!(
        once,
        json!({ "m": { "id": 1 }, "CommentList": [], "c": [{ "x": 1 }], "Table:t": 2 })
    );
    assert_eq!(sigil::normalize(&once, &FormatToggles::default()), once);
}

#[test]
fn test_keys_that_settle_on_a_later_pass() {
    let off = FormatToggles::default();

    // only one `@` is removed per pass
    let once = sigil::normalize(&json!({ "@@a": 1 }), &off);
    assert_eq!(once, json!({ "@a": 1 }));
    assert_eq!(sigil::normalize(&once, &off), json!({ "a": 1 }));

    // an alias is kept verbatim, dividers included
    let once = sigil::normalize(&json!({ "T:a-b[]": [1] }), &off);
    assert_eq!(once, json!({ "a-b": [1] }));
    assert_eq!(sigil::normalize(&once, &off), json!({ "aB": [1] }));
}

// ========================================================================
// Properties
// ========================================================================

fn arb_toggles() -> impl Strategy<Value = FormatToggles> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(hyphen, underline, dollar)| {
        FormatToggles {
            hyphen,
            underline,
            dollar,
        }
    })
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z-]{0,6}".prop_map(Value::String),
    ]
}

/// Key suffixes drawn from the shapes found in requests. Each key gets a
/// unique `k{index}` stem so normalized keys never collide.
fn arb_suffix() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[A-Za-z]{1,4}",
        "[-_$][a-z]{1,3}",
        "[-_$][a-z]{1,3}[-_$][A-Z][a-z]{0,2}",
        Just("[]".to_string()),
        "-[a-z]{1,3}\\[\\]",
    ]
}

/// `k{i}{suffix}`, or a `Table:alias` key whose alias is a plain name,
/// optionally behind a single `@`.
fn arb_key(i: usize, at: bool, alias: bool, suffix: &str) -> String {
    let key = if alias {
        let tail = if suffix.ends_with("[]") { "[]" } else { "" };
        format!("Tab-le{i}:k{i}Alias{tail}")
    } else {
        format!("k{i}{suffix}")
    };
    if at { format!("@{key}") } else { key }
}

fn arb_tree() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((any::<bool>(), any::<bool>(), arb_suffix(), inner), 0..6)
                .prop_map(|entries| {
                    let mut object = Map::new();
                    for (i, (at, alias, suffix, value)) in entries.into_iter().enumerate() {
                        object.insert(arb_key(i, at, alias, &suffix), value);
                    }
                    Value::Object(object)
                }),
        ]
    })
}

fn same_shape(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len() && x.values().zip(y.values()).all(|(x, y)| same_shape(x, y))
        }
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| same_shape(x, y))
        }
        (x, y) => x == y,
    }
}

proptest! {
    #[test]
    fn prop_normalize_is_idempotent(tree in arb_tree(), toggles in arb_toggles()) {
        let once = sigil::normalize(&tree, &toggles);
        let twice = sigil::normalize(&once, &toggles);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_normalize_keeps_shape(tree in arb_tree(), toggles in arb_toggles()) {
        let out = sigil::normalize(&tree, &toggles);
        prop_assert!(same_shape(&tree, &out));
    }
}
