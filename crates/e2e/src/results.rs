//! Test outcomes and the result artifact

use std::fmt;
use std::path::{Path, PathBuf};

use annotest_common::TestCollection;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::E2eResult;

/// Outcome of one test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Pass,
    Fail,
    Skipped,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Pass => write!(f, "PASS"),
            TestStatus::Fail => write!(f, "FAIL"),
            TestStatus::Skipped => write!(f, "SKIPPED"),
        }
    }
}

/// Result of running a single test record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    pub id: String,
    pub status: TestStatus,

    /// Per-action results as reported by the engine
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Value>,

    /// Screenshots and recordings captured while running the test
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TestOutcome {
    pub fn new(id: impl Into<String>, status: TestStatus) -> Self {
        Self {
            id: id.into(),
            status,
            actions: Vec::new(),
            media: Vec::new(),
            error: None,
        }
    }

    pub fn failed(id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(id, TestStatus::Fail)
        }
    }
}

/// Outcomes of a whole run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultCollection {
    pub tests: Vec<TestOutcome>,
}

/// Status counts for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl ResultCollection {
    pub fn summary(&self) -> ResultSummary {
        let mut summary = ResultSummary {
            total: self.tests.len(),
            ..Default::default()
        };
        for outcome in &self.tests {
            match outcome.status {
                TestStatus::Pass => summary.passed += 1,
                TestStatus::Fail => summary.failed += 1,
                TestStatus::Skipped => summary.skipped += 1,
            }
        }
        summary
    }

    pub fn success(&self) -> bool {
        self.summary().failed == 0
    }

    /// Make sure every input test id has an outcome.
    ///
    /// Ids the engine did not report are recorded as failures.
    pub fn reconcile(&mut self, tests: &TestCollection) {
        for record in &tests.tests {
            let id = record.label();
            if !self.tests.iter().any(|o| o.id == id) {
                warn!(test = %id, "No result reported for test");
                self.tests.push(TestOutcome::failed(
                    id,
                    "no result reported by the execution engine",
                ));
            }
        }
    }
}

/// Write results as pretty JSON, creating parent directories.
///
/// Failures are returned to the caller.
pub fn write_results(path: &Path, results: &ResultCollection) -> E2eResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(path, json)?;

    info!("Results written to: {}", path.display());
    Ok(())
}
