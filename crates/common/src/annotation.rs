//! Extraction of test actions embedded in source comments
//!
//! An annotated line looks like
//! `<prefix><open marker><JSON object>[<close marker><suffix>]`. The payload
//! starts right after the first open marker and ends at the last close
//! marker, or at the end of the line when the rule has no close marker.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::Value;
use tracing::{debug, trace};

use crate::assembler::TestAssembler;
use crate::error::{Error, Result};
use crate::types::{FileTypeRule, TestAction, LINE_KEY, TEST_ID_KEY};

/// Scan `path` line by line and append every annotation to `into`.
///
/// Annotations without a `testId` belong to `default_id`. The file handle is
/// released on every return path, including errors.
pub fn parse_annotations(
    path: &Path,
    rule: &FileTypeRule,
    default_id: &str,
    into: &mut TestAssembler,
) -> Result<()> {
    let file = File::open(path).map_err(|e| Error::read(path, e))?;
    let reader = BufReader::new(file);
    let mut found = 0usize;

    for (idx, raw) in reader.split(b'\n').enumerate() {
        let raw = raw.map_err(|e| Error::read(path, e))?;
        let line_number = idx + 1;
        let text = String::from_utf8_lossy(&raw);
        let text = text.strip_suffix('\r').unwrap_or(&text);

        let payload = match extract_payload(text, rule) {
            Ok(Some(payload)) => payload,
            Ok(None) => continue,
            Err(reason) => return Err(Error::malformed(path, Some(line_number), reason)),
        };

        let (id, action) = build_action(payload, default_id, line_number)
            .map_err(|reason| Error::malformed(path, Some(line_number), reason))?;

        trace!(file = %path.display(), line = line_number, test = %id, "Extracted action");
        into.push_action(&id, path, action);
        found += 1;
    }

    debug!(file = %path.display(), actions = found, "Parsed annotations");
    Ok(())
}

/// Slice the payload out of one line.
///
/// Returns `Ok(None)` when the line carries no open marker, and an error when
/// a configured close marker does not follow the payload start.
pub fn extract_payload<'l>(
    line: &'l str,
    rule: &FileTypeRule,
) -> std::result::Result<Option<&'l str>, String> {
    let open = rule.open_test_statement.as_str();
    let Some(open_at) = line.find(open) else {
        return Ok(None);
    };
    let start = open_at + open.len();

    let end = match rule.close_test_statement.as_deref() {
        Some(close) => match line.rfind(close) {
            Some(end) if end >= start => end,
            _ => return Err(format!("closing marker {close:?} not found after {open:?}")),
        },
        None => line.len(),
    };

    Ok(Some(&line[start..end]))
}

/// Parse a payload into its owning test id and the stored action
fn build_action(
    payload: &str,
    default_id: &str,
    line_number: usize,
) -> std::result::Result<(String, TestAction), String> {
    let value: Value = serde_json::from_str(payload).map_err(|e| e.to_string())?;
    let Value::Object(mut fields) = value else {
        return Err(format!("expected a JSON object, found {payload}"));
    };

    let id = match fields.shift_remove(TEST_ID_KEY) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => default_id.to_string(),
        Some(Value::String(id)) if id.is_empty() => default_id.to_string(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => default_id.to_string(),
        Some(Value::String(id)) => id,
        Some(other) => return Err(format!("{TEST_ID_KEY} must be a string, found {other}")),
    };

    fields.insert(LINE_KEY.to_string(), Value::from(line_number));
    Ok((id, TestAction::from(fields)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn rule(open: &str, close: Option<&str>) -> FileTypeRule {
        FileTypeRule::new(&[".js"], open, close)
    }

    #[test_case("// T:{\"action\":\"click\"}*/trailer", Some("*/"), Some("{\"action\":\"click\"}") ; "close marker trims trailer")]
    #[test_case("  // T:{\"a\":1}", None, Some("{\"a\":1}") ; "no close marker runs to end of line")]
    #[test_case("x // T:{\"a\":\"*/\"}*/ */", Some("*/"), Some("{\"a\":\"*/\"}*/ ") ; "last close marker wins")]
    #[test_case("// T:a // T:b", None, Some("a // T:b") ; "first open marker wins")]
    #[test_case("const x = 1;", Some("*/"), None ; "line without marker")]
    fn test_extract_payload(line: &str, close: Option<&str>, expected: Option<&str>) {
        assert_eq!(extract_payload(line, &rule("// T:", close)).unwrap(), expected);
    }

    #[test]
    fn test_extract_missing_close_marker() {
        let err = extract_payload("// T:{\"a\":1}", &rule("// T:", Some("*/"))).unwrap_err();
        assert!(err.contains("closing marker"));
    }

    #[test]
    fn test_extract_close_before_open() {
        assert!(extract_payload("*/ // T:{}", &rule("// T:", Some("*/"))).is_err());
    }

    #[test]
    fn test_build_action_strips_test_id() {
        let (id, action) = build_action(r#"{"testId":"login","action":"goto"}"#, "auto", 3).unwrap();
        assert_eq!(id, "login");
        assert_eq!(serde_json::to_value(&action).unwrap(), json!({"action": "goto", "line": 3}));
    }

    #[test_case(r#"{"action":"goto"}"# ; "absent")]
    #[test_case(r#"{"testId":"","action":"goto"}"# ; "empty string")]
    #[test_case(r#"{"testId":null,"action":"goto"}"# ; "null")]
    #[test_case(r#"{"testId":false,"action":"goto"}"# ; "false")]
    #[test_case(r#"{"testId":0,"action":"goto"}"# ; "zero")]
    fn test_build_action_uses_default_id(payload: &str) {
        let (id, action) = build_action(payload, "auto", 1).unwrap();
        assert_eq!(id, "auto");
        assert!(action.get(TEST_ID_KEY).is_none());
    }

    #[test]
    fn test_build_action_overwrites_line() {
        let (_, action) = build_action(r#"{"line":99,"action":"wait"}"#, "auto", 5).unwrap();
        assert_eq!(action.line(), Some(5));
        let keys: Vec<&str> = action.fields().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["line", "action"]);
    }

    #[test]
    fn test_build_action_rejects_non_object() {
        assert!(build_action("[1, 2]", "auto", 1).is_err());
    }

    #[test]
    fn test_build_action_rejects_numeric_test_id() {
        let err = build_action(r#"{"testId":42}"#, "auto", 1).unwrap_err();
        assert!(err.contains("testId"));
    }

    #[test]
    fn test_build_action_rejects_invalid_json() {
        assert!(build_action(r#"{"action": }"#, "auto", 1).is_err());
    }
}
