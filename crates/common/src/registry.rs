//! File type registry and per-file dispatch

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::FileTypeRule;

/// Extension of files that already hold test records
pub const JSON_EXTENSION: &str = ".json";

/// How a discovered file is turned into tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind<'a> {
    /// Source file with embedded annotations, scanned line by line
    Annotated(&'a FileTypeRule),
    /// Pre-built `{"tests": [...]}` file, loaded directly
    JsonTests,
}

/// Immutable table of file type rules keyed by extension
#[derive(Debug, Clone, Default)]
pub struct FileTypeRegistry {
    rules: BTreeMap<String, FileTypeRule>,
    by_extension: HashMap<String, String>,
}

impl FileTypeRegistry {
    /// Build the registry, rejecting extensions claimed by more than one rule
    pub fn new(rules: BTreeMap<String, FileTypeRule>) -> Result<Self> {
        let mut by_extension: HashMap<String, String> = HashMap::new();

        for (name, rule) in &rules {
            for ext in &rule.extensions {
                if let Some(first) = by_extension.get(ext) {
                    if first != name {
                        return Err(Error::DuplicateExtension {
                            extension: ext.clone(),
                            first: first.clone(),
                            second: name.clone(),
                        });
                    }
                    continue;
                }
                by_extension.insert(ext.clone(), name.clone());
            }
        }

        Ok(Self { rules, by_extension })
    }

    /// Rule registered for an extension (leading period included)
    pub fn rule_for(&self, extension: &str) -> Option<&FileTypeRule> {
        self.by_extension
            .get(extension)
            .and_then(|name| self.rules.get(name))
    }

    /// Decide how a file is handled.
    ///
    /// `.json` always loads as a test file. Any other extension must have a
    /// configured rule.
    pub fn classify(&self, path: &Path) -> Result<FileKind<'_>> {
        let extension = dotted_extension(path);
        if extension == JSON_EXTENSION {
            return Ok(FileKind::JsonTests);
        }
        self.rule_for(&extension)
            .map(FileKind::Annotated)
            .ok_or_else(|| Error::UnconfiguredExtension {
                extension,
                path: path.to_path_buf(),
            })
    }
}

/// Extension of `path` with its leading period, or an empty string.
///
/// Dotfiles such as `.gitignore` have no extension.
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
