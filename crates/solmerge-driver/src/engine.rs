//! Merge entry points

use std::env;
use std::path::{Path, PathBuf};

use log::info;
use rayon::prelude::*;
use tokio_util::sync::CancellationToken;

use crate::dependency_root;
use crate::error::{MergeError, MergeResult};
use crate::extractor::{SolidityExtractor, StatementExtractor};
use crate::registry::ImportRegistry;
use crate::resolver::{FsPathResolver, PathResolver};
use crate::transform::TransformPipeline;
use crate::walker::GraphWalker;

/// Knobs of a merge run
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Between blocks
    pub delimiter: String,
    /// After a comment block
    pub comment_delimiter: String,
    /// Drop free comment blocks
    pub strip_comments: bool,
    /// Overrides dependency root discovery
    pub dependency_root: Option<PathBuf>,
    pub transforms: TransformPipeline,
    pub cancellation: Option<CancellationToken>,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            delimiter: "\n\n".to_string(),
            comment_delimiter: "\n".to_string(),
            strip_comments: false,
            dependency_root: None,
            transforms: TransformPipeline::new(),
            cancellation: None,
        }
    }
}

/// Flattens a root file and everything it imports into one source text.
///
/// Each call to [`MergeEngine::run`] owns a fresh [`ImportRegistry`], so one
/// engine can serve any number of runs, including parallel ones through
/// [`MergeEngine::run_all`].
pub struct MergeEngine {
    options: MergeOptions,
    working_dir: PathBuf,
    extractor: Box<dyn StatementExtractor>,
    resolver: Option<Box<dyn PathResolver>>,
}

impl MergeEngine {
    pub fn new(options: MergeOptions) -> Self {
        Self {
            options,
            working_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            extractor: Box::new(SolidityExtractor),
            resolver: None,
        }
    }

    pub fn with_working_dir(mut self, working_dir: impl Into<PathBuf>) -> Self {
        self.working_dir = working_dir.into();
        self
    }

    pub fn with_extractor(mut self, extractor: impl StatementExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// Replaces the file-system resolver
    pub fn with_resolver(mut self, resolver: impl PathResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Merges `root` and returns the flattened text without trailing
    /// whitespace. Any failure aborts the run without partial output.
    pub fn run(&self, root: impl AsRef<Path>) -> MergeResult<String> {
        let requested = self.working_dir.join(root.as_ref());
        let root = requested.canonicalize().map_err(|e| MergeError::io(&requested, e))?;

        if self.options.cancellation.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Err(MergeError::Cancelled { root });
        }

        let dependency_root = self.dependency_root();

        let fs_resolver;
        let resolver: &dyn PathResolver = match &self.resolver {
            Some(resolver) => resolver.as_ref(),
            None => {
                fs_resolver = FsPathResolver::new(self.working_dir.clone());
                &fs_resolver
            }
        };

        let mut registry = ImportRegistry::new();
        let mut walker = GraphWalker::new(
            &mut registry,
            &self.options,
            self.extractor.as_ref(),
            resolver,
            dependency_root.as_deref(),
            root.clone(),
        );
        let output = walker.visit(&root, None)?;
        let files = walker.files_seen();

        info!(
            "merged {} ({} files, {} edges, {} blocks)",
            root.display(),
            files,
            registry.processed_edge_count(),
            registry.emitted_count()
        );

        Ok(output.trim_end().to_string())
    }

    /// Merges independent roots in parallel. Results keep the input order.
    pub fn run_all(&self, roots: &[PathBuf]) -> Vec<(PathBuf, MergeResult<String>)> {
        roots
            .par_iter()
            .map(|root| (root.clone(), self.run(root)))
            .collect()
    }

    fn dependency_root(&self) -> Option<PathBuf> {
        match &self.options.dependency_root {
            Some(explicit) => Some(self.working_dir.join(explicit)),
            None => dependency_root::discover(&self.working_dir),
        }
    }
}

impl Default for MergeEngine {
    fn default() -> Self {
        Self::new(MergeOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolvedImport;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_options() {
        let options = MergeOptions::default();
        assert_eq!(options.delimiter, "\n\n");
        assert_eq!(options.comment_delimiter, "\n");
        assert!(!options.strip_comments);
        assert!(options.transforms.is_empty());
    }

    #[test]
    fn test_output_is_trimmed() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Root.sol"), "contract Root {}\n// trailing\n").unwrap();

        let mut options = MergeOptions::default();
        options.transforms.register(|mut item: solmerge_ast::ExportItem| {
            item.body.push_str("\n\t ");
            crate::transform::TransformOutcome::Keep(item)
        });
        let engine = MergeEngine::new(options).with_working_dir(temp.path());
        assert_eq!(engine.run("Root.sol").unwrap(), "contract Root {}\n\t \n\n// trailing");
    }

    #[test]
    fn test_missing_root_is_io_error() {
        let temp = TempDir::new().unwrap();
        let engine = MergeEngine::default().with_working_dir(temp.path());
        assert!(matches!(engine.run("Nope.sol"), Err(MergeError::Io { .. })));
    }

    struct MapResolver(PathBuf);

    impl PathResolver for MapResolver {
        fn resolve(&self, reference: &str, _current_dir: &Path, _dependency_root: Option<&Path>) -> ResolvedImport {
            ResolvedImport::Found(self.0.join(reference.trim_start_matches("lib:")))
        }
    }

    #[test]
    fn test_custom_resolver() {
        let temp = TempDir::new().unwrap();
        let libs = temp.path().join("libs");
        fs::create_dir_all(&libs).unwrap();
        fs::write(libs.join("Math.sol"), "library Math {}").unwrap();
        fs::write(temp.path().join("Root.sol"), "import \"lib:Math.sol\";").unwrap();

        let engine = MergeEngine::default()
            .with_working_dir(temp.path())
            .with_resolver(MapResolver(libs));
        assert_eq!(engine.run("Root.sol").unwrap(), "library Math {}");
    }
}
