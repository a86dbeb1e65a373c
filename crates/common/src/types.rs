//! Core types for Annotest

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Payload key naming the test an annotation belongs to
pub const TEST_ID_KEY: &str = "testId";

/// Key carrying the 1-based source line of an extracted action
pub const LINE_KEY: &str = "line";

/// How embedded tests are marked up in one family of source files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTypeRule {
    /// Extensions handled by this rule, including the leading period
    pub extensions: Vec<String>,

    /// Marker that opens an annotation payload
    pub open_test_statement: String,

    /// Marker that closes the payload; the rest of the line is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_test_statement: Option<String>,
}

impl FileTypeRule {
    pub fn new(extensions: &[&str], open: impl Into<String>, close: Option<&str>) -> Self {
        Self {
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            open_test_statement: open.into(),
            close_test_statement: close.map(String::from),
        }
    }
}

/// One opaque step of a test.
///
/// Forwarded verbatim to the execution engine. Actions extracted from
/// annotations are always objects carrying a `line` field; actions loaded
/// from JSON test files may be any value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestAction(pub Value);

impl TestAction {
    /// Source line the action was extracted from, if any
    pub fn line(&self) -> Option<u64> {
        self.0.get(LINE_KEY).and_then(Value::as_u64)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Object fields, or `None` for a non-object action
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        self.0.as_object()
    }
}

impl From<Map<String, Value>> for TestAction {
    fn from(fields: Map<String, Value>) -> Self {
        Self(Value::Object(fields))
    }
}

/// An ordered set of actions sharing one identifier.
///
/// The id is kept as raw JSON because records loaded from test files are
/// stored as written; only string ids take part in id lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub id: Value,

    /// File the record was first discovered in; absent for some JSON-sourced tests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    #[serde(default)]
    pub actions: Vec<TestAction>,

    /// Any other fields of a JSON-sourced record, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TestRecord {
    pub fn new(id: impl Into<String>, file: Option<PathBuf>) -> Self {
        Self {
            id: Value::String(id.into()),
            file,
            actions: Vec::new(),
            extra: Map::new(),
        }
    }

    /// The id when it is a string
    pub fn key(&self) -> Option<&str> {
        self.id.as_str()
    }

    /// Printable id: strings as-is, other values as JSON, empty when missing
    pub fn label(&self) -> String {
        match &self.id {
            Value::String(id) => id.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// Every test produced by one discovery-and-parse run, in first-encounter order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestCollection {
    pub tests: Vec<TestRecord>,
}

impl TestCollection {
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// First record with the given id
    pub fn get(&self, id: &str) -> Option<&TestRecord> {
        self.tests.iter().find(|t| t.key() == Some(id))
    }

    /// Total number of actions across all records
    pub fn action_count(&self) -> usize {
        self.tests.iter().map(|t| t.actions.len()).sum()
    }
}
