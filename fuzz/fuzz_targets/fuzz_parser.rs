#![no_main]
use std::io::Cursor;

use bstr::BStr;
use jsonevents::{ErrorKind, IoSource, Parser, ParserOptions, PathNode, SliceSource};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use serde_json::Value;

/// Input layout: one flag byte, a little-endian `u16` abort point, then the
/// document.
const HEADER: usize = 3;

/// Fragments the byte-level mutator does not find on its own: structure,
/// escapes that need a fixed suffix, and surrogate halves.
static TOKENS: &[&[u8]] = &[
    b"{", b"}", b"[", b"]", b":", b",", b"\"", b"\"\"", b"{\"k\":", b"[[",
    b"true", b"false", b"null", b"-0.5e+1", b"\\n", b"\\\"", b"\\u0041",
    b"\\ud83d\\ude00", b"\\ud800", b"\\udc00", b"\\u0000", b" ", b"\r\n",
    b"\xC3\xA9", b"\xF0\x9F\x98\x80", b"\x7F", b"\x01",
];

/// Splices one token into the document at a random position, keeping the
/// header intact.
fn splice_token(data: &mut [u8], size: usize, max_size: usize, rng: &mut SmallRng) -> usize {
    let token = TOKENS[rng.random_range(0..TOKENS.len())];
    if size < HEADER || size + token.len() > max_size {
        return fuzzer_mutate(data, size, max_size);
    }
    let at = rng.random_range(HEADER..=size);
    data.copy_within(at..size, at + token.len());
    data[at..at + token.len()].copy_from_slice(token);
    size + token.len()
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    let mut rng = SmallRng::seed_from_u64(u64::from(seed));
    if rng.random_bool(0.3) {
        splice_token(data, size, max_size, &mut rng)
    } else {
        fuzzer_mutate(data, size, max_size)
    }
});

/// Container nesting of a reference-parsed value; scalars are 0.
fn depth(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(depth).max().unwrap_or(0),
        Value::Object(map) => 1 + map.values().map(depth).max().unwrap_or(0),
        _ => 0,
    }
}

fn check(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    // Bits 0..=5 pick the depth limit, bit 6 reads through `std::io`.
    let flags = data[0];
    let abort_at = usize::from(u16::from_le_bytes([data[1], data[2]]));
    let data = &data[HEADER..];

    let parser = Parser::new(ParserOptions {
        max_depth: usize::from(flags & 0x3F) + 1,
        panic_on_error: false,
    });

    let mut events = 0usize;
    let mut sink = |path: &[PathNode], value: &BStr| -> Result<(), &'static str> {
        let node = path.last().expect("events carry at least the root slot");
        assert!(path.len() <= parser.max_depth());
        assert!(!node.kind().is_container() || value.is_empty());
        assert!(node.kind().is_container() || node.child_count() == 0);
        events += 1;
        if events == abort_at {
            return Err("abort");
        }
        Ok(())
    };

    let result = if flags & 0x40 != 0 {
        parser
            .parse(IoSource::new(Cursor::new(data)), &mut sink)
            .map_err(|e| e.kind())
    } else {
        parser
            .parse(SliceSource::new(data), &mut sink)
            .map_err(|e| e.kind())
    };

    // Every document the reference parser accepts within the depth limit is
    // accepted, unless the sink stopped it.
    if let Ok(value) = serde_json::from_slice::<Value>(data) {
        if depth(&value) < parser.max_depth() {
            match result {
                Ok(()) => {}
                Err(ErrorKind::Aborted) => assert_eq!(events, abort_at),
                Err(kind) => panic!("rejected valid JSON: {kind:?}"),
            }
        }
    }
}

fuzz_target!(|data: &[u8]| check(data));
