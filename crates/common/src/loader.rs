//! Loading of pre-built JSON test files

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::assembler::TestAssembler;
use crate::error::{Error, Result};
use crate::types::TestRecord;

#[derive(Deserialize)]
struct TestFile {
    tests: Vec<TestRecord>,
}

/// Append every record of a `{"tests": [...]}` file to `into`, verbatim.
///
/// Records are not checked against ids already assembled, and no `line`
/// or `file` fields are filled in. A record needs no `id`, and its id and
/// actions may be any JSON value.
pub fn load_json_tests(path: &Path, into: &mut TestAssembler) -> Result<()> {
    let content = fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
    let file: TestFile =
        serde_json::from_str(&content).map_err(|e| Error::malformed(path, None, e))?;

    debug!(file = %path.display(), tests = file.tests.len(), "Loaded JSON tests");
    for record in file.tests {
        into.push_record(record);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_record_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "suite.json",
            r#"{"tests":[{"id":"x","file":"f.js","actions":[{"k":1}]}]}"#,
        );

        let mut assembler = TestAssembler::new();
        load_json_tests(&path, &mut assembler).unwrap();

        let collection = assembler.finish();
        assert_eq!(
            serde_json::to_value(&collection).unwrap(),
            json!({"tests": [{"id": "x", "file": "f.js", "actions": [{"k": 1}]}]})
        );
        assert_eq!(collection.tests[0].actions[0].line(), None);
    }

    #[test]
    fn test_load_record_without_string_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "suite.json",
            r#"{"tests":[{"name":"x","actions":[{"k":1}]},{"id":5,"actions":[]},{"id":"y","actions":["goto"]}]}"#,
        );

        let mut assembler = TestAssembler::new();
        load_json_tests(&path, &mut assembler).unwrap();

        let collection = assembler.finish();
        assert_eq!(
            serde_json::to_value(&collection).unwrap(),
            json!({"tests": [
                {"actions": [{"k": 1}], "name": "x"},
                {"id": 5, "actions": []},
                {"id": "y", "actions": ["goto"]}
            ]})
        );
        assert!(collection.get("y").is_some());
    }

    #[test]
    fn test_missing_tests_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "package.json", r#"{"name":"app"}"#);

        let err = load_json_tests(&path, &mut TestAssembler::new()).unwrap_err();
        assert!(matches!(err, Error::MalformedAnnotationPayload { line: None, .. }));
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "broken.json", "{\"tests\": [");

        let err = load_json_tests(&path, &mut TestAssembler::new()).unwrap_err();
        assert!(matches!(err, Error::MalformedAnnotationPayload { .. }));
    }
}
