use alloc::{string::String, vec::Vec};

use serde_json::{Map, Value};

use crate::{NodeKind, OwnedEvent, ParserError, ParserOptions, Parser, PathNode, Recorder, SliceSource};

pub fn strict_parser() -> Parser {
    Parser::new(ParserOptions {
        panic_on_error: true,
        ..Default::default()
    })
}

pub fn events(input: &[u8]) -> Vec<OwnedEvent> {
    let mut rec = Recorder::new();
    strict_parser()
        .parse(SliceSource::new(input), &mut rec)
        .unwrap();
    rec.into_events()
}

pub fn parse_err(input: &[u8]) -> ParserError {
    let mut rec = Recorder::new();
    crate::parse_slice(input, &mut rec).unwrap_err()
}

fn scalar(kind: NodeKind, text: &[u8]) -> Value {
    match kind {
        NodeKind::Array => Value::Array(Vec::new()),
        NodeKind::Object => Value::Object(Map::new()),
        NodeKind::String => Value::String(String::from_utf8(text.to_vec()).unwrap()),
        NodeKind::Bool => Value::Bool(text == b"true"),
        NodeKind::Null => Value::Null,
        NodeKind::Number => serde_json::from_slice(text).unwrap(),
    }
}

fn key(node: &PathNode) -> String {
    String::from_utf8(node.name().to_vec()).unwrap()
}

/// Rebuilds the document described by `events`.
///
/// Arrays are addressed by the child count of the container and objects by
/// the name of the child slot, so every event lands exactly once.
pub fn reconstruct(events: &[OwnedEvent]) -> Option<Value> {
    let mut root = None;
    for event in events {
        let value = scalar(event.kind(), &event.value);
        let Some((_, parents)) = event.path.split_last() else {
            continue;
        };
        if parents.is_empty() {
            root = Some(value);
            continue;
        }

        let mut cur = root.as_mut()?;
        for (i, parent) in parents.iter().enumerate() {
            let child = &event.path[i + 1];
            let last = i + 1 == parents.len();
            cur = match (parent.kind(), cur) {
                (NodeKind::Array, Value::Array(items)) => {
                    if last {
                        assert_eq!(items.len(), parent.child_count(), "out of order: {event:?}");
                        items.push(value);
                        break;
                    }
                    items.get_mut(parent.child_count())?
                }
                (NodeKind::Object, Value::Object(map)) => {
                    if last {
                        assert_eq!(map.len(), parent.child_count(), "out of order: {event:?}");
                        map.insert(key(child), value);
                        break;
                    }
                    map.get_mut(&key(child))?
                }
                _ => return None,
            };
        }
    }
    root
}

/// Parses `input` into events and rebuilds the document from them.
pub fn roundtrip(input: &[u8]) -> Option<Value> {
    reconstruct(&events(input))
}
