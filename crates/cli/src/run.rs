//! Discover, run and record

use annotest_common::{collect_tests, UuidGenerator};
use annotest_e2e::{
    convert_recordings, write_results, CommandEngine, DryRunEngine, ExecutionEngine,
    ResultCollection,
};
use anyhow::Context;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::output::{print_results, print_tests, OutputFormat};

/// What a run should do once tests are assembled
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Print the discovered tests instead of executing them
    pub list_only: bool,
    pub format: OutputFormat,
}

/// Execute one run. Returns whether every test passed.
pub async fn run(config: &Config, options: RunOptions) -> anyhow::Result<bool> {
    let registry = config.registry().context("Invalid file type configuration")?;
    let request = config.discovery_request();

    let tests = collect_tests(&request, &registry, &mut UuidGenerator)
        .with_context(|| format!("Failed to collect tests from {}", config.input.display()))?;
    for test in &tests.tests {
        debug!(
            test = %test.label(),
            file = ?test.file,
            actions = test.actions.len(),
            "Assembled test"
        );
    }

    if options.list_only {
        print_tests(&tests, options.format);
        return Ok(true);
    }

    let engine: Box<dyn ExecutionEngine> = match &config.runner {
        Some(command) => Box::new(CommandEngine::new(
            command.clone(),
            config.browser_options.clone(),
            config.media_directory.clone(),
        )),
        None => {
            warn!("No runner configured; reporting every test as skipped");
            Box::new(DryRunEngine)
        }
    };

    let mut results: ResultCollection = engine.run(&tests).await.context("Test run failed")?;
    debug!(?results, "Run finished");

    if config.convert_recordings {
        let converted = convert_recordings(&mut results, config.browser_options.width).await?;
        info!("Converted {} recording(s) to GIF", converted);
    }

    write_results(&config.output, &results)
        .with_context(|| format!("Failed to write results to {}", config.output.display()))?;

    print_results(&results, options.format);
    Ok(results.success())
}
