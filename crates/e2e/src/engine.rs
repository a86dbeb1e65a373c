//! Execution engines
//!
//! The engine receives the assembled [`TestCollection`] read-only and returns
//! one outcome per test id. The action vocabulary is opaque here: the
//! [`CommandEngine`] forwards tests to an external runner process that knows
//! how to drive a browser.

use std::path::PathBuf;
use std::process::Stdio;

use annotest_common::TestCollection;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tracing::{debug, info};

use crate::error::{E2eError, E2eResult};
use crate::results::{ResultCollection, TestOutcome, TestStatus};

/// Runs assembled tests
#[async_trait]
pub trait ExecutionEngine: Send + Sync {
    async fn run(&self, tests: &TestCollection) -> E2eResult<ResultCollection>;
}

/// Browser settings passed through to the runner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserOptions {
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Browser executable to use instead of the runner's bundled one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_width")]
    pub width: u32,
}

fn default_true() -> bool {
    true
}

fn default_height() -> u32 {
    600
}

fn default_width() -> u32 {
    800
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: true,
            path: None,
            height: default_height(),
            width: default_width(),
        }
    }
}

/// External runner program and its arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Engine backed by an external runner process.
///
/// The collection is written to the runner's stdin as JSON and a
/// `{"tests": [...]}` result document is read back from its stdout. Browser
/// options and the media directory travel as `ANNOTEST_*` environment
/// variables.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    command: RunnerCommand,
    browser: BrowserOptions,
    media_dir: PathBuf,
}

impl CommandEngine {
    pub fn new(command: RunnerCommand, browser: BrowserOptions, media_dir: PathBuf) -> Self {
        Self {
            command,
            browser,
            media_dir,
        }
    }

    fn build_command(&self) -> TokioCommand {
        let mut cmd = TokioCommand::new(&self.command.program);
        cmd.args(&self.command.args)
            .env("ANNOTEST_BROWSER_HEADLESS", self.browser.headless.to_string())
            .env("ANNOTEST_BROWSER_HEIGHT", self.browser.height.to_string())
            .env("ANNOTEST_BROWSER_WIDTH", self.browser.width.to_string())
            .env("ANNOTEST_MEDIA_DIR", &self.media_dir);

        if let Some(path) = &self.browser.path {
            cmd.env("ANNOTEST_BROWSER_PATH", path);
        }

        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl ExecutionEngine for CommandEngine {
    async fn run(&self, tests: &TestCollection) -> E2eResult<ResultCollection> {
        let payload = serde_json::to_vec(tests)?;

        info!(
            "Running {} test(s) with {}",
            tests.len(),
            self.command.program
        );

        let mut child = self.build_command().spawn().map_err(|e| {
            E2eError::Runner(format!("Failed to spawn {}: {}", self.command.program, e))
        })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| E2eError::Runner("runner stdin unavailable".to_string()))?;
        let writer = tokio::spawn(async move {
            stdin.write_all(&payload).await?;
            stdin.shutdown().await?;
            Ok::<_, std::io::Error>(())
        });

        let output = child.wait_with_output().await?;
        if let Err(e) = writer
            .await
            .map_err(|e| E2eError::Runner(format!("stdin writer failed: {e}")))?
        {
            debug!("Runner closed stdin early: {}", e);
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(E2eError::Runner(format!(
                "{} exited with {}:\nstdout: {}\nstderr: {}",
                self.command.program, output.status, stdout, stderr
            )));
        }

        let mut results: ResultCollection = serde_json::from_slice(&output.stdout)
            .map_err(|e| E2eError::Runner(format!("Invalid results from runner: {e}")))?;
        results.reconcile(tests);
        Ok(results)
    }
}

/// Engine that runs nothing and reports every test as skipped
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunEngine;

#[async_trait]
impl ExecutionEngine for DryRunEngine {
    async fn run(&self, tests: &TestCollection) -> E2eResult<ResultCollection> {
        Ok(ResultCollection {
            tests: tests
                .tests
                .iter()
                .map(|t| TestOutcome::new(t.label(), TestStatus::Skipped))
                .collect(),
        })
    }
}
