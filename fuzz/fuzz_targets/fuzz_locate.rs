#![no_main]

use arbitrary::Arbitrary;
use jsonspan::{PointerPath, find};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

static WS_TABLE: &[&str] = &["", " ", "\t", "\n", "\r\n", "  "];

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let node_type = u.choose_index(21)?;
        let value = match node_type {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

#[derive(Debug, Arbitrary)]
struct Input {
    root: ArbitraryValue,
    path_choice: usize,
    whitespace: u8,
}

/// Walks `value` and returns the `choice`-th path (pre-order), if any.
fn pick_path(value: &Value, choice: usize) -> Option<Vec<String>> {
    fn walk(value: &Value, prefix: &mut Vec<String>, left: &mut usize) -> Option<Vec<String>> {
        let children: Vec<(String, &Value)> = match value {
            Value::Array(items) => items.iter().enumerate().map(|(i, v)| (i.to_string(), v)).collect(),
            Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
            _ => return None,
        };
        for (segment, child) in children {
            prefix.push(segment);
            if *left == 0 {
                return Some(prefix.clone());
            }
            *left -= 1;
            if let Some(found) = walk(child, prefix, left) {
                return Some(found);
            }
            prefix.pop();
        }
        None
    }
    let mut left = choice;
    walk(value, &mut Vec::new(), &mut left)
}

fn check(input: Input) {
    let root = input.root.0;
    if !root.is_object() && !root.is_array() {
        return;
    }
    let ws = WS_TABLE[usize::from(input.whitespace) % WS_TABLE.len()];
    let text = format!("{ws}{}{ws}", serde_json::to_string_pretty(&root).unwrap());
    let reference: Value = serde_json::from_str(&text).unwrap();

    let Some(path) = pick_path(&reference, input.path_choice % 64) else {
        assert_eq!(find(&text, "/\u{0}absent"), Ok(None));
        return;
    };
    let pointer = PointerPath::from_segments(path.iter().cloned()).to_string();
    let expected = reference.pointer(&pointer).expect("path from walk exists");

    let span = find(&text, &path)
        .expect("valid document")
        .expect("existing path must be found");
    let slice = span.slice(&text).expect("span inside text");
    let found: Value = serde_json::from_str(slice).expect("span is a JSON value");
    assert_eq!(&found, expected, "pointer {pointer} in {text}");
}

fuzz_target!(|input: Input| check(input));
