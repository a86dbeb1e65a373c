//! Annotest Common Library
//!
//! Discovers source files, extracts the test definitions embedded in their
//! comments and assembles them into an ordered [`TestCollection`].
//!
//! ```text
//! discover(root) ─► plan (FileKind per path) ─┬─► parse_annotations ─┐
//!                                             └─► load_json_tests ───┴─► TestAssembler ─► TestCollection
//! ```

pub mod annotation;
pub mod assembler;
pub mod collect;
pub mod discovery;
pub mod error;
pub mod ids;
pub mod loader;
pub mod registry;
pub mod types;

// Re-export commonly used types
pub use assembler::TestAssembler;
pub use collect::{collect_tests, DiscoveryRequest};
pub use discovery::{discover, parse_extension_list, ExtensionFilter};
pub use error::{Error, Result};
pub use ids::{IdGenerator, SequentialIds, UuidGenerator};
pub use registry::{FileKind, FileTypeRegistry};
pub use types::*;

/// Annotest version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
