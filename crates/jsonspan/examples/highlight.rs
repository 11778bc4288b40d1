//! Prints a document with a caret line under the value a pointer addresses.
//!
//! ```text
//! cargo run --example highlight -- '/items/1/price'
//! ```
#![allow(missing_docs)]

use jsonspan::find;

const DOCUMENT: &str = r#"{
  "items": [
    { "name": "widget", "price": 9.5 },
    { "name": "gadget", "price": "twelve" }
  ]
}"#;

fn main() {
    let pointer = std::env::args().nth(1).unwrap_or_else(|| "/items/1/price".into());
    let span = match find(DOCUMENT, pointer.as_str()) {
        Ok(Some(span)) => span,
        Ok(None) => {
            eprintln!("{pointer}: not found");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("{pointer}: {err}");
            std::process::exit(2);
        }
    };

    let mut offset = 0;
    for line in DOCUMENT.lines() {
        println!("{line}");
        let len = line.chars().count();
        let start = span.from.max(offset);
        let end = span.to.min(offset + len);
        if start < end {
            println!("{}{}", " ".repeat(start - offset), "^".repeat(end - start));
        }
        offset += len + 1;
    }
}
