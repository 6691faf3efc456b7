//! Import target resolution

use std::path::{Path, PathBuf};

use log::debug;
use solmerge_ast::is_relative_reference;

/// Outcome of resolving one import reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolvedImport {
    /// Existing file, canonicalized
    Found(PathBuf),
    /// No candidate exists; the candidates that were checked, in order
    NotFound { tried: Vec<PathBuf> },
}

/// Maps an import reference to a physical file
pub trait PathResolver: Send + Sync {
    fn resolve(&self, reference: &str, current_dir: &Path, dependency_root: Option<&Path>) -> ResolvedImport;
}

/// File-system resolver.
///
/// - `./x` and `../x` resolve against the importing file's directory
/// - `/x` is taken as-is
/// - bare `x` resolves against the working directory, then against the
///   dependency root
pub struct FsPathResolver {
    working_dir: PathBuf,
}

impl FsPathResolver {
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    fn candidates(&self, reference: &str, current_dir: &Path, dependency_root: Option<&Path>) -> Vec<PathBuf> {
        if is_relative_reference(reference) {
            return vec![current_dir.join(reference)];
        }

        if reference.starts_with('/') {
            return vec![PathBuf::from(reference)];
        }

        let mut candidates = vec![self.working_dir.join(reference)];
        if let Some(root) = dependency_root {
            candidates.push(root.join(reference));
        }
        candidates
    }
}

impl PathResolver for FsPathResolver {
    fn resolve(&self, reference: &str, current_dir: &Path, dependency_root: Option<&Path>) -> ResolvedImport {
        let candidates = self.candidates(reference, current_dir, dependency_root);

        for candidate in &candidates {
            if candidate.is_file() {
                let resolved = candidate.canonicalize().unwrap_or_else(|_| candidate.clone());
                debug!("resolved \"{}\" to {}", reference, resolved.display());
                return ResolvedImport::Found(resolved);
            }
        }

        ResolvedImport::NotFound { tried: candidates }
    }
}
