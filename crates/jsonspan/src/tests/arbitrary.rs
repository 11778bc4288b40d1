use alloc::{string::String, vec::Vec};

use quickcheck::{Arbitrary, Gen};
use serde_json::{Map, Number, Value};

/// A randomly generated object or array document.
#[derive(Clone, Debug)]
pub struct Document(pub Value);

fn arbitrary_key(g: &mut Gen) -> String {
    // Mix plain keys with ones that need escaping in JSON or in a pointer.
    match u8::arbitrary(g) % 6 {
        0 => String::arbitrary(g),
        1 => String::from("a/b"),
        2 => String::from("~"),
        3 => String::from("\"\\\n\u{1}"),
        4 => String::new(),
        _ => {
            let n = u8::arbitrary(g) % 8;
            alloc::format!("k{n}")
        }
    }
}

fn arbitrary_scalar(g: &mut Gen) -> Value {
    match u8::arbitrary(g) % 6 {
        0 => Value::Null,
        1 => Value::Bool(bool::arbitrary(g)),
        2 => Value::Number(i64::arbitrary(g).into()),
        3 => {
            let f = f64::arbitrary(g);
            Number::from_f64(f).map_or(Value::Null, Value::Number)
        }
        _ => Value::String(String::arbitrary(g)),
    }
}

fn arbitrary_container(g: &mut Gen, depth: usize) -> Value {
    let width = usize::arbitrary(g) % 5;
    if bool::arbitrary(g) {
        let items = (0..width).map(|_| arbitrary_value(g, depth + 1)).collect();
        Value::Array(items)
    } else {
        let mut map = Map::new();
        for _ in 0..width {
            map.insert(arbitrary_key(g), arbitrary_value(g, depth + 1));
        }
        Value::Object(map)
    }
}

fn arbitrary_value(g: &mut Gen, depth: usize) -> Value {
    if depth < 4 && u8::arbitrary(g) % 3 == 0 {
        arbitrary_container(g, depth)
    } else {
        arbitrary_scalar(g)
    }
}

impl Arbitrary for Document {
    fn arbitrary(g: &mut Gen) -> Self {
        Document(arbitrary_container(g, 0))
    }
}

/// Every path that addresses a value inside `value`, root excluded.
pub fn all_paths(value: &Value) -> Vec<Vec<String>> {
    fn walk(value: &Value, prefix: &mut Vec<String>, out: &mut Vec<Vec<String>>) {
        match value {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    prefix.push(alloc::format!("{i}"));
                    out.push(prefix.clone());
                    walk(item, prefix, out);
                    prefix.pop();
                }
            }
            Value::Object(map) => {
                for (k, v) in map {
                    prefix.push(k.clone());
                    out.push(prefix.clone());
                    walk(v, prefix, out);
                    prefix.pop();
                }
            }
            _ => {}
        }
    }
    let mut out = Vec::new();
    walk(value, &mut Vec::new(), &mut out);
    out
}
