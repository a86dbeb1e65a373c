//! Annotest execution boundary
//!
//! This crate hands an assembled [`annotest_common::TestCollection`] to an
//! execution engine and deals with what comes back:
//! - runs tests through an external runner process ([`CommandEngine`])
//! - persists the [`ResultCollection`] as a JSON artifact
//! - converts captured recordings to GIFs with ffmpeg
//!
//! ```text
//! TestCollection ──► ExecutionEngine::run ──► ResultCollection ──► write_results(path)
//!                                                   │
//!                                                   └── media/*.mp4 ──► convert_to_gif
//! ```

pub mod engine;
pub mod error;
pub mod media;
pub mod results;

pub use engine::{BrowserOptions, CommandEngine, DryRunEngine, ExecutionEngine, RunnerCommand};
pub use error::{E2eError, E2eResult};
pub use media::{convert_recordings, convert_to_gif};
pub use results::{write_results, ResultCollection, ResultSummary, TestOutcome, TestStatus};
