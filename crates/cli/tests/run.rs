//! End-to-end runs of the CLI pipeline without a browser

use std::fs;

use annotest_cli::output::OutputFormat;
use annotest_cli::{run, Config, RunOptions};
use annotest_e2e::{ResultCollection, RunnerCommand, TestStatus};

fn options() -> RunOptions {
    RunOptions {
        list_only: false,
        format: OutputFormat::Json,
    }
}

#[tokio::test]
async fn dry_run_writes_skipped_results() {
    let dir = tempfile::tempdir().unwrap();
    let docs = dir.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(
        docs.join("intro.md"),
        "[comment]: # (test {\"testId\":\"intro\",\"action\":\"goTo\",\"uri\":\"https://example.com\"})\n",
    )
    .unwrap();
    fs::write(
        docs.join("suite.json"),
        r#"{"tests":[{"id":"prebuilt","actions":[{"action":"wait"}]}]}"#,
    )
    .unwrap();

    let output = dir.path().join("out/results.json");
    let config = Config {
        input: docs,
        output: output.clone(),
        ..Config::default()
    };

    assert!(run(&config, options()).await.unwrap());

    let results: ResultCollection =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let mut ids: Vec<&str> = results.tests.iter().map(|t| t.id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, ["intro", "prebuilt"]);
    assert!(results.tests.iter().all(|t| t.status == TestStatus::Skipped));
}

#[tokio::test]
async fn list_only_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("app.js"), "// test {\"action\":\"click\"}\n").unwrap();

    let output = dir.path().join("results.json");
    let config = Config {
        input: dir.path().to_path_buf(),
        output: output.clone(),
        ..Config::default()
    };
    let options = RunOptions {
        list_only: true,
        ..options()
    };

    assert!(run(&config, options).await.unwrap());
    assert!(!output.exists());
}

#[tokio::test]
async fn unconfigured_extension_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("style.css"), "body {}\n").unwrap();

    let output = dir.path().join("results.json");
    let config = Config {
        input: dir.path().to_path_buf(),
        output: output.clone(),
        ..Config::default()
    };

    let err = run(&config, options()).await.unwrap_err();
    assert!(format!("{:#}", err).contains(".css"));
    assert!(!output.exists());
}

#[cfg(unix)]
#[tokio::test]
async fn failing_runner_result_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("page.html"),
        "<!-- test {\"testId\":\"home\",\"action\":\"find\"} -->\n",
    )
    .unwrap();

    let output = dir.path().join("results.json");
    let config = Config {
        input: dir.path().to_path_buf(),
        output: output.clone(),
        runner: Some(RunnerCommand {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                r#"cat > /dev/null; printf '{"tests":[{"id":"home","status":"FAIL","error":"not found"}]}'"#
                    .to_string(),
            ],
        }),
        ..Config::default()
    };

    assert!(!run(&config, options()).await.unwrap());
    let results: ResultCollection =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(results.tests[0].status, TestStatus::Fail);
}
