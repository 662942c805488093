use quickcheck::QuickCheck;

use super::{arbitrary::Json, utils::roundtrip};

/// Property: rebuilding a document from its events agrees with `serde_json`
/// reading the same text, compact or pretty-printed.
#[test]
fn roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Json, pretty: bool) -> bool {
        let text = if pretty {
            serde_json::to_vec_pretty(&doc.0)
        } else {
            serde_json::to_vec(&doc.0)
        };
        let Ok(text) = text else {
            return false;
        };
        // Numbers are compared after the same text-to-float conversion.
        let Ok(expected) = serde_json::from_slice::<serde_json::Value>(&text) else {
            return false;
        };
        roundtrip(&text) == Some(expected)
    }

    #[cfg(not(any(miri, feature = "test-fast")))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(any(miri, feature = "test-fast"))]
    let tests = 10;

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Json, bool) -> bool);
}

/// Property: the event count is one per container plus one per scalar.
#[test]
fn one_event_per_value_quickcheck() {
    fn count(value: &serde_json::Value) -> usize {
        1 + match value {
            serde_json::Value::Array(items) => items.iter().map(count).sum(),
            serde_json::Value::Object(map) => map.values().map(count).sum(),
            _ => 0,
        }
    }

    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Json) -> bool {
        let Ok(text) = serde_json::to_vec(&doc.0) else {
            return false;
        };
        super::utils::events(&text).len() == count(&doc.0)
    }

    #[cfg(not(any(miri, feature = "test-fast")))]
    let tests = if is_ci::cached() { 2_000 } else { 200 };
    #[cfg(any(miri, feature = "test-fast"))]
    let tests = 10;

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Json) -> bool);
}
