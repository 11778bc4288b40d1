use alloc::string::{String, ToString};

use quickcheck::QuickCheck;
use serde_json::Value;

use super::arbitrary::{Document, all_paths};
use crate::{PointerPath, find};

/// Inserts extra whitespace after every structural character outside strings.
fn spread_out(compact: &str, pad: &str) -> String {
    let mut out = String::with_capacity(compact.len() * 2);
    let mut in_string = false;
    let mut escaped = false;
    for c in compact.chars() {
        out.push(c);
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' | '}' | '[' | ']' | ',' | ':' => out.push_str(pad),
            _ => {}
        }
    }
    out
}

/// Property: reformatting changes offsets, never which value a path selects.
#[test]
fn whitespace_never_changes_selected_value() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Document, pad_kind: u8) -> bool {
        let compact = doc.0.to_string();
        let pad = [" ", "\n", "\t \r\n", "  "][usize::from(pad_kind % 4)];
        let layouts = [
            spread_out(&compact, pad),
            serde_json::to_string_pretty(&doc.0).unwrap(),
            alloc::format!("\n {compact} \n"),
        ];
        all_paths(&doc.0).iter().all(|path| {
            let pointer = PointerPath::from_segments(path.iter().cloned());
            let Ok(Some(base)) = find(&compact, &pointer) else {
                return false;
            };
            let base: Value = serde_json::from_str(base.slice(&compact).unwrap()).unwrap();
            layouts.iter().all(|text| {
                find(text, &pointer)
                    .ok()
                    .flatten()
                    .and_then(|span| span.slice(text))
                    .and_then(|slice| serde_json::from_str::<Value>(slice).ok())
                    .is_some_and(|value| value == base)
            })
        })
    }

    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 2_000 } else { 300 };
    #[cfg(miri)]
    let tests = 5;

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Document, u8) -> bool);
}

#[test]
fn spread_out_leaves_strings_alone() {
    assert_eq!(
        spread_out(r#"{"a,b":[1,"\"]"]}"#, " "),
        r#"{ "a,b": [ 1, "\"]"] } "#
    );
}
