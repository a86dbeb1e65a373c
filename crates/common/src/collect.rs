//! The discovery-and-parse pass

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::annotation::parse_annotations;
use crate::assembler::TestAssembler;
use crate::discovery::{discover, ExtensionFilter};
use crate::error::Result;
use crate::ids::IdGenerator;
use crate::loader::load_json_tests;
use crate::registry::{FileKind, FileTypeRegistry};
use crate::types::TestCollection;

/// Inputs of one discovery run
#[derive(Debug, Clone)]
pub struct DiscoveryRequest {
    /// File or directory to search
    pub root: PathBuf,
    /// Descend into subdirectories
    pub recursive: bool,
    /// Extensions to include; empty includes every file
    pub extensions: ExtensionFilter,
}

impl DiscoveryRequest {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recursive: true,
            extensions: ExtensionFilter::all(),
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn extensions(mut self, extensions: ExtensionFilter) -> Self {
        self.extensions = extensions;
        self
    }
}

/// Pair every discovered file with its handling.
///
/// Fails on the first file without a configured rule, before any file is read.
pub fn plan<'r>(
    files: &[PathBuf],
    registry: &'r FileTypeRegistry,
) -> Result<Vec<(PathBuf, FileKind<'r>)>> {
    files
        .iter()
        .map(|path| registry.classify(path).map(|kind| (path.clone(), kind)))
        .collect()
}

/// Discover, validate and parse every candidate file into one collection.
///
/// Files are processed one at a time in discovery order. Each annotated file
/// draws one default id from `ids`. The first error aborts the pass.
pub fn collect_tests<G: IdGenerator>(
    request: &DiscoveryRequest,
    registry: &FileTypeRegistry,
    ids: &mut G,
) -> Result<TestCollection> {
    let files = discover(&request.root, request.recursive, &request.extensions)?;
    info!(root = %request.root.display(), files = files.len(), "Discovered candidate files");

    let planned = plan(&files, registry)?;
    let mut assembler = TestAssembler::new();

    for (path, kind) in &planned {
        parse_file(path, *kind, ids, &mut assembler)?;
    }

    let collection = assembler.finish();
    info!(
        tests = collection.len(),
        actions = collection.action_count(),
        "Assembled tests"
    );
    Ok(collection)
}

fn parse_file<G: IdGenerator>(
    path: &Path,
    kind: FileKind<'_>,
    ids: &mut G,
    assembler: &mut TestAssembler,
) -> Result<()> {
    match kind {
        FileKind::Annotated(rule) => {
            let default_id = ids.next_id();
            debug!(file = %path.display(), default_id = %default_id, "Scanning for annotations");
            parse_annotations(path, rule, &default_id, assembler)
        }
        FileKind::JsonTests => load_json_tests(path, assembler),
    }
}
