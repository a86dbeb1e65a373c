//! Error types for Annotest

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using the Annotest error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by discovery and parsing.
///
/// Every variant is fatal to the discovery-and-parse pass: the first error
/// aborts the run and no partial collection is returned.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input isn't a valid file or directory: {}", path.display())]
    InvalidInputPath { path: PathBuf },

    #[error("Specify options for the {extension:?} extension in your config file (found {})", path.display())]
    UnconfiguredExtension { extension: String, path: PathBuf },

    #[error("Malformed test payload in {}{}: {reason}", path.display(), line.map(|l| format!(":{l}")).unwrap_or_default())]
    MalformedAnnotationPayload {
        path: PathBuf,
        line: Option<usize>,
        reason: String,
    },

    #[error("Extension {extension:?} is claimed by both the {first:?} and {second:?} file types")]
    DuplicateExtension {
        extension: String,
        first: String,
        second: String,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn malformed(
        path: impl Into<PathBuf>,
        line: Option<usize>,
        reason: impl ToString,
    ) -> Self {
        Error::MalformedAnnotationPayload {
            path: path.into(),
            line,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Read {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_includes_line() {
        let err = Error::malformed("/src/app.js", Some(12), "expected value");
        assert_eq!(
            err.to_string(),
            "Malformed test payload in /src/app.js:12: expected value"
        );
    }

    #[test]
    fn test_malformed_message_without_line() {
        let err = Error::malformed("/tests/login.json", None, "missing field `tests`");
        assert!(!err.to_string().contains("login.json:"));
    }

    #[test]
    fn test_unconfigured_extension_message() {
        let err = Error::UnconfiguredExtension {
            extension: ".css".to_string(),
            path: PathBuf::from("/site/style.css"),
        };
        assert!(err.to_string().contains("\".css\""));
    }
}
