//! Annotest CLI
//!
//! Command-line interface that resolves configuration, collects embedded
//! tests and hands them to an execution engine.

pub mod cli;
pub mod config;
pub mod output;
pub mod run;

pub use cli::Cli;
pub use config::Config;
pub use run::{run, RunOptions};
