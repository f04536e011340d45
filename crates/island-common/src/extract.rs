//! Best-effort JSON extraction from hook payloads.
//!
//! Hook pipelines occasionally hand us mangled input: shell wrappers
//! prepend banners, agents append file paths or a second object after the
//! JSON body. Extraction tries progressively more permissive strategies
//! and never errors.

use serde_json::{Map, Value};

/// Extract a JSON object from possibly malformed input.
///
/// Strategies, in increasing cost and permissiveness, first success wins:
/// 1. Parse the whole input directly.
/// 2. Slice from the first `{` to the last `}` and parse that.
/// 3. Scan from the first `{` tracking brace depth (string-literal aware)
///    and parse the first balanced candidate.
///
/// Returns `None` if no strategy yields an object.
pub fn extract_object(raw: &str) -> Option<Map<String, Value>> {
    if let Some(obj) = parse_object(raw) {
        return Some(obj);
    }

    let start = raw.find('{')?;

    if let Some(end) = raw.rfind('}')
        && end > start
        && let Some(obj) = parse_object(&raw[start..=end])
    {
        return Some(obj);
    }

    parse_object(balanced_candidate(raw, start)?)
}

/// Parse input as JSON and keep it only if it is an object.
fn parse_object(input: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str(input) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Find the first depth-balanced `{...}` starting at `start`.
///
/// A `"` toggles string context unless escaped by a preceding unescaped
/// backslash; braces inside strings are not counted. Stops at the first
/// balanced candidate whether or not it parses. Rescanning for a later
/// candidate is deliberately not attempted.
fn balanced_candidate(raw: &str, start: usize) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape = false;

    for (i, &b) in raw.as_bytes().iter().enumerate().skip(start) {
        if escape {
            escape = false;
            continue;
        }
        match b {
            b'\\' => escape = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..=i]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== direct parse ====================

    #[test]
    fn valid_object_returned_unchanged() {
        let obj = extract_object(r#"{"session_id": "abc", "n": 1}"#).unwrap();
        assert_eq!(obj.get("session_id").unwrap(), "abc");
        assert_eq!(obj.get("n").unwrap(), 1);
    }

    #[test]
    fn leading_and_trailing_whitespace_tolerated() {
        let obj = extract_object("\n  {\"a\": 1}  \n").unwrap();
        assert_eq!(obj.get("a").unwrap(), 1);
    }

    #[test]
    fn valid_json_non_object_rejected() {
        assert!(extract_object("[1, 2, 3]").is_none());
        assert!(extract_object("\"not an object\"").is_none());
        assert!(extract_object("42").is_none());
        assert!(extract_object("null").is_none());
    }

    // ==================== outer-bracket slice ====================

    #[test]
    fn surrounding_garbage_stripped() {
        let obj = extract_object(r#"warning: slow startup {"a": 1} "#).unwrap();
        assert_eq!(obj.get("a").unwrap(), 1);
    }

    #[test]
    fn trailing_text_without_braces_stripped() {
        let obj = extract_object("noise{\"a\":1}moretrailing").unwrap();
        assert_eq!(obj.get("a").unwrap(), 1);
    }

    // ==================== depth-balanced scan ====================

    #[test]
    fn trailing_garbage_with_later_brace_recovered() {
        // The last-`}` slice picks up the broken trailer; only the
        // balanced scan finds the valid leading object.
        let obj = extract_object(r#"noise{"a":1} and {"broken": ]}"#).unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj.get("a").unwrap(), 1);
    }

    #[test]
    fn two_top_level_objects_take_the_first() {
        let obj = extract_object(r#"{"a":1}{"b":2}"#).unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj.get("a").unwrap(), 1);
    }

    #[test]
    fn braces_inside_strings_not_counted() {
        let input = "garbage {\"a\":\"x\\\"{\\\"y\"} tail}";
        let obj = extract_object(input).unwrap();
        assert_eq!(obj.get("a").unwrap(), "x\"{\"y");
    }

    #[test]
    fn escaped_quote_does_not_end_string() {
        let candidate = balanced_candidate(r#"{"a":"br\"}ace"} extra}"#, 0).unwrap();
        assert_eq!(candidate, r#"{"a":"br\"}ace"}"#);
    }

    #[test]
    fn unparseable_first_candidate_is_not_rescanned() {
        // First balanced candidate fails to parse; a later valid object
        // is deliberately not searched for.
        assert!(extract_object(r#"{bad}{"ok":1}"#).is_none());
    }

    // ==================== total failure ====================

    #[test]
    fn empty_input_yields_none() {
        assert!(extract_object("").is_none());
    }

    #[test]
    fn non_json_input_yields_none() {
        assert!(extract_object("not json at all").is_none());
    }

    #[test]
    fn unterminated_object_yields_none() {
        assert!(extract_object(r#"{"a": "never closed"#).is_none());
    }

    #[test]
    fn multibyte_text_around_object_is_safe() {
        let obj = extract_object("ログ出力 {\"a\":\"值\"} 終了").unwrap();
        assert_eq!(obj.get("a").unwrap(), "值");
    }
}
