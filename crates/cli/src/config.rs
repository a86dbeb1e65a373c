//! Run configuration
//!
//! Built-in defaults, optionally replaced by a JSON config file, then
//! overridden flag by flag from the command line.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use annotest_common::{
    parse_extension_list, DiscoveryRequest, ExtensionFilter, FileTypeRegistry, FileTypeRule,
};
use annotest_e2e::{BrowserOptions, RunnerCommand};
use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Annotest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// File or directory to search for tests
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Path of the JSON results artifact
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Descend into subdirectories of `input`
    #[serde(default = "default_true")]
    pub recursive: bool,

    /// Extensions to test, leading period included; empty tests every file
    #[serde(default)]
    pub test_extensions: Vec<String>,

    /// Where the runner stores screenshots and recordings
    #[serde(default = "default_media_directory")]
    pub media_directory: PathBuf,

    #[serde(default)]
    pub verbose: bool,

    #[serde(default)]
    pub browser_options: BrowserOptions,

    /// Annotation markers by file type name
    #[serde(default = "default_file_types")]
    pub file_types: BTreeMap<String, FileTypeRule>,

    /// External runner that executes the tests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runner: Option<RunnerCommand>,

    /// Convert recordings in the results to GIFs
    #[serde(default)]
    pub convert_recordings: bool,
}

fn default_input() -> PathBuf {
    PathBuf::from(".")
}

fn default_output() -> PathBuf {
    PathBuf::from("results.json")
}

fn default_media_directory() -> PathBuf {
    PathBuf::from("media")
}

fn default_true() -> bool {
    true
}

fn default_file_types() -> BTreeMap<String, FileTypeRule> {
    let mut rules = BTreeMap::new();
    rules.insert(
        "markdown".to_string(),
        FileTypeRule::new(&[".md", ".markdown", ".mdx"], "[comment]: # (test ", Some(")")),
    );
    rules.insert(
        "html".to_string(),
        FileTypeRule::new(&[".html", ".htm"], "<!-- test ", Some("-->")),
    );
    rules.insert(
        "javascript".to_string(),
        FileTypeRule::new(&[".js", ".ts"], "// test ", None),
    );
    rules
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            recursive: true,
            test_extensions: Vec::new(),
            media_directory: default_media_directory(),
            verbose: false,
            browser_options: BrowserOptions::default(),
            file_types: default_file_types(),
            runner: None,
            convert_recordings: false,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Defaults or the `--config` file, with every other flag applied on top
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli)?;
        Ok(config)
    }

    /// Override fields with the flags that were given
    pub fn apply_cli(&mut self, cli: &Cli) -> anyhow::Result<()> {
        if let Some(input) = &cli.input {
            self.input = absolute(input)?;
        }
        if let Some(output) = &cli.output {
            self.output = absolute(output)?;
        }
        if let Some(media_dir) = &cli.media_dir {
            self.media_directory = absolute(media_dir)?;
        }
        if let Some(recursive) = cli.recursive {
            self.recursive = recursive;
        }
        if let Some(ext) = &cli.ext {
            self.test_extensions = parse_extension_list(ext);
        }
        if let Some(headless) = cli.browser_headless {
            self.browser_options.headless = headless;
        }
        if let Some(path) = &cli.browser_path {
            self.browser_options.path = Some(path.clone());
        }
        if let Some(height) = cli.browser_height {
            self.browser_options.height = height;
        }
        if let Some(width) = cli.browser_width {
            self.browser_options.width = width;
        }
        if cli.verbose {
            self.verbose = true;
        }
        Ok(())
    }

    /// Validated file type table
    pub fn registry(&self) -> annotest_common::Result<FileTypeRegistry> {
        FileTypeRegistry::new(self.file_types.clone())
    }

    pub fn discovery_request(&self) -> DiscoveryRequest {
        DiscoveryRequest::new(&self.input)
            .recursive(self.recursive)
            .extensions(ExtensionFilter::new(self.test_extensions.iter().cloned()))
    }
}

fn absolute(path: &Path) -> anyhow::Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("Cannot resolve path {}", path.display()))
}
