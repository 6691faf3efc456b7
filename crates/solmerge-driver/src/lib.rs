//! Solmerge Driver Library
//!
//! Flattens a modular Solidity project into a single source text. Starting
//! from a root file, the import graph is walked depth-first; every imported
//! declaration is emitted once, before the code that uses it, with the
//! renames the import statements ask for.
//!
//! ```rust,ignore
//! use solmerge_driver::{MergeEngine, MergeOptions};
//!
//! let engine = MergeEngine::new(MergeOptions::default());
//! let flattened = engine.run("contracts/Token.sol")?;
//! ```

pub mod dependency_root;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod policy;
pub mod registry;
pub mod rename;
pub mod resolver;
pub mod strip;
pub mod transform;
pub mod walker;

pub use engine::{MergeEngine, MergeOptions};
pub use error::{MergeError, MergeResult};
pub use extractor::{SolidityExtractor, StatementExtractor};
pub use policy::ExportDecision;
pub use registry::ImportRegistry;
pub use resolver::{FsPathResolver, PathResolver, ResolvedImport};
pub use strip::strip_statements;
pub use transform::{ExcludeDeclarations, ExportTransform, TransformOutcome, TransformPipeline};
pub use tokio_util::sync::CancellationToken;
