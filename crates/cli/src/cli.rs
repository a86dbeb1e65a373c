//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

use crate::output::OutputFormat;

/// Annotest - run browser tests embedded in your docs and source comments
#[derive(Parser, Debug)]
#[command(name = "annotest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a custom config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to a file or directory to parse for tests
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Path for a JSON file of test result output
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Recursively find test files in the input directory
    #[arg(short, long, value_name = "BOOL")]
    pub recursive: Option<bool>,

    /// Comma-separated list of file extensions to test, including the leading period
    #[arg(short, long, value_name = "EXTENSIONS")]
    pub ext: Option<String>,

    /// Path to the media output directory
    #[arg(long)]
    pub media_dir: Option<PathBuf>,

    /// Run the browser in headless mode
    #[arg(long, value_name = "BOOL")]
    pub browser_headless: Option<bool>,

    /// Path to a browser executable to use instead of the runner's default
    #[arg(long)]
    pub browser_path: Option<PathBuf>,

    /// Height of the browser viewport in pixels
    #[arg(long)]
    pub browser_height: Option<u32>,

    /// Width of the browser viewport in pixels
    #[arg(long)]
    pub browser_width: Option<u32>,

    /// Log in-progress output to the console
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the discovered tests and exit without running them
    #[arg(long)]
    pub list: bool,

    /// Output format for the summary
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,
}
