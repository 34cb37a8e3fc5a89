use crate::error::{Result, SearchError};

/// Shortest prefix of `text` that is a brace-balanced JSON object.
///
/// `text` must start with `{`. Braces inside string literals are ignored and a
/// backslash inside a string always consumes the following character. Running
/// out of input before the depth returns to zero is an error, never a partial
/// object.
pub fn slice_object(text: &str) -> Result<&str> {
    if !text.starts_with('{') {
        return Err(SearchError::UnbalancedInput { depth: 0, consumed: 0 });
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    // Only ASCII delimiters matter, so bytes are safe: UTF-8 continuation
    // bytes never collide with them, and every cut lands after a `}`.
    for (i, b) in text.bytes().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[..=i]);
                }
            }
            _ => {}
        }
    }

    Err(SearchError::UnbalancedInput {
        depth,
        consumed: text.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_object() {
        assert_eq!(slice_object(r#"{"a":1};var b = 2;"#).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn empty_object() {
        assert_eq!(slice_object("{}}}").unwrap(), "{}");
    }

    #[test]
    fn nested_objects() {
        let obj = r#"{"a":{"b":{"c":[{"d":1},{"e":{}}]}},"f":2}"#;
        let text = format!("{};\nwindow.x = {{}};", obj);
        assert_eq!(slice_object(&text).unwrap(), obj);
    }

    #[test]
    fn braces_inside_strings() {
        let obj = r#"{"open":"{{{","close":"}}","mixed":"{\"}"}"#;
        assert_eq!(slice_object(&format!("{}tail", obj)).unwrap(), obj);
    }

    #[test]
    fn escaped_quotes_and_backslashes() {
        let obj = r#"{"q":"say \"hi\" }","bs":"c:\\","after":"}"}"#;
        let input = format!("{};", obj);
        let sliced = slice_object(&input).unwrap();
        assert_eq!(sliced, obj);
        let v: serde_json::Value = serde_json::from_str(sliced).unwrap();
        assert_eq!(v["bs"], "c:\\");
        assert_eq!(v["q"], "say \"hi\" }");
    }

    #[test]
    fn serialized_value_round_trips() {
        let value = serde_json::json!({
            "title": "brace } and quote \" and {",
            "nested": {"list": [1, {"deep": "\\}"}], "unicode": "名前 ✓"},
        });
        let text = serde_json::to_string(&value).unwrap();
        let input = format!("{};</script>", text);
        let sliced = slice_object(&input).unwrap();
        assert_eq!(sliced, text);
        let back: serde_json::Value = serde_json::from_str(sliced).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn truncated_input_fails() {
        let err = slice_object(r#"{"a":{"b":1}"#).unwrap_err();
        assert!(matches!(err, SearchError::UnbalancedInput { depth: 1, .. }));
    }

    #[test]
    fn unterminated_string_fails() {
        let err = slice_object(r#"{"a":"}}}}"#).unwrap_err();
        assert!(matches!(err, SearchError::UnbalancedInput { .. }));
    }

    #[test]
    fn must_start_at_brace() {
        let err = slice_object(r#" {"a":1}"#).unwrap_err();
        assert!(matches!(err, SearchError::UnbalancedInput { depth: 0, consumed: 0 }));
    }
}
