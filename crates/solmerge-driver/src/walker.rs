//! Depth-first traversal of the import graph
//!
//! The walker visits the root file, then every import edge in textual order,
//! and finally emits the exports the incoming edge asks for. Dependencies
//! therefore always precede their dependents in the output.
//!
//! Two mechanisms keep the traversal finite and the output free of
//! duplicates:
//!
//! - every `(importer, statement)` edge is followed at most once per run
//! - an edge pointing at a file still on the visitation stack closes a cycle
//!   and contributes nothing
//!
//! Files are not cached: a file reached through two edges is read and
//! extracted twice, and emission dedup drops whatever it already produced.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use log::{debug, trace};
use solmerge_ast::{AnalyzedFile, ImportEdge};

use crate::engine::MergeOptions;
use crate::error::{MergeError, MergeResult};
use crate::extractor::StatementExtractor;
use crate::policy;
use crate::registry::{EdgeKey, ImportRegistry};
use crate::rename::{self, BodyRewrite, QualifiedAlias};
use crate::resolver::{PathResolver, ResolvedImport};

/// The edge a file is being visited through
#[derive(Debug, Clone, Copy)]
pub struct Incoming<'e> {
    pub importer: &'e Path,
    pub edge: &'e ImportEdge,
}

pub struct GraphWalker<'a> {
    registry: &'a mut ImportRegistry,
    options: &'a MergeOptions,
    extractor: &'a dyn StatementExtractor,
    resolver: &'a dyn PathResolver,
    dependency_root: Option<&'a Path>,
    root: PathBuf,
    /// Files currently being visited, outermost first
    stack: IndexSet<PathBuf>,
    /// Declaration names per file read so far
    declared: HashMap<PathBuf, HashSet<String>>,
}

impl<'a> GraphWalker<'a> {
    pub fn new(
        registry: &'a mut ImportRegistry,
        options: &'a MergeOptions,
        extractor: &'a dyn StatementExtractor,
        resolver: &'a dyn PathResolver,
        dependency_root: Option<&'a Path>,
        root: PathBuf,
    ) -> Self {
        Self {
            registry,
            options,
            extractor,
            resolver,
            dependency_root,
            root,
            stack: IndexSet::new(),
            declared: HashMap::new(),
        }
    }

    /// Number of distinct files read so far
    pub fn files_seen(&self) -> usize {
        self.declared.len()
    }

    /// Visits `file` and returns its fragment: the fragments of its
    /// dependencies followed by its own qualifying exports.
    pub fn visit(&mut self, file: &Path, incoming: Option<Incoming<'_>>) -> MergeResult<String> {
        if let Some(incoming) = incoming {
            if !self.registry.mark_edge_processed(EdgeKey::new(incoming.importer, incoming.edge)) {
                trace!("skipping already processed edge {} in {}", incoming.edge, incoming.importer.display());
                return Ok(String::new());
            }

            if self.stack.contains(file) {
                trace!("{} closes a cycle back to {}", incoming.edge, file.display());
                return Ok(String::new());
            }

            if let Some(alias) = incoming.edge.global_rename_alias() {
                self.registry.record_global_alias(file, alias);
            }
        }

        self.stack.insert(file.to_path_buf());
        let result = self.visit_file(file, incoming);
        self.stack.pop();
        result
    }

    fn visit_file(&mut self, file: &Path, incoming: Option<Incoming<'_>>) -> MergeResult<String> {
        let analyzed = self.analyze(file)?;
        let mut parts = Vec::new();

        if incoming.is_none() {
            let pragmas = analyzed.pragma_block();
            if !pragmas.is_empty() {
                parts.push(pragmas);
            }
        }

        // Global aliases this file can refer to as `Alias.Name`
        let mut qualified: Vec<QualifiedAlias> = Vec::new();

        for edge in &analyzed.imports {
            self.check_cancelled()?;

            let target = self.resolve(&analyzed, edge)?;
            let fragment = self.visit(
                &target,
                Some(Incoming {
                    importer: &analyzed.filename,
                    edge,
                }),
            )?;
            if !fragment.is_empty() {
                parts.push(fragment);
            }

            if let Some(alias) = edge.global_rename_alias() {
                if self.registry.has_global_alias(&target, alias) && !qualified.iter().any(|q| q.alias == alias) {
                    let names = self.declared.get(&target).cloned().unwrap_or_default();
                    qualified.push(QualifiedAlias::new(alias, names));
                }
            }
        }

        let exports = self.emit_exports(&analyzed, incoming, &qualified);
        if !exports.is_empty() {
            parts.push(exports);
        }

        Ok(parts.join(&self.options.delimiter))
    }

    /// Reads and extracts `file` afresh on every visit
    fn analyze(&mut self, file: &Path) -> MergeResult<AnalyzedFile> {
        debug!("reading {}", file.display());
        let raw_text = fs::read_to_string(file).map_err(|e| MergeError::io(file, e))?;
        let mut statements = self
            .extractor
            .extract(&raw_text)
            .map_err(|source| MergeError::Extraction {
                file: file.to_path_buf(),
                source,
            })?;

        if self.options.strip_comments {
            statements.exports.retain(|item| !item.is_comment());
        }

        debug!(
            "{}: {} pragmas, {} imports, {} exports",
            file.display(),
            statements.pragmas.len(),
            statements.imports.len(),
            statements.exports.len()
        );

        let analyzed = AnalyzedFile::new(file.to_path_buf(), raw_text, statements);
        self.declared
            .entry(file.to_path_buf())
            .or_insert_with(|| analyzed.declaration_names().map(str::to_string).collect());
        Ok(analyzed)
    }

    fn resolve(&self, analyzed: &AnalyzedFile, edge: &ImportEdge) -> MergeResult<PathBuf> {
        match self.resolver.resolve(&edge.target, analyzed.dir(), self.dependency_root) {
            ResolvedImport::Found(path) => Ok(path),
            ResolvedImport::NotFound { tried } => Err(MergeError::Resolution {
                reference: edge.target.clone(),
                importer: analyzed.filename.clone(),
                span: edge.span,
                tried,
            }),
        }
    }

    fn check_cancelled(&self) -> MergeResult<()> {
        match &self.options.cancellation {
            Some(token) if token.is_cancelled() => Err(MergeError::Cancelled {
                root: self.root.clone(),
            }),
            _ => Ok(()),
        }
    }

    fn emit_exports(&mut self, analyzed: &AnalyzedFile, incoming: Option<Incoming<'_>>, qualified: &[QualifiedAlias]) -> String {
        let file = analyzed.filename.as_path();
        let edge = incoming.map(|incoming| incoming.edge);

        let sibling = edge.and_then(ImportEdge::global_rename_alias).map(|prefix| {
            let names: HashSet<String> = analyzed.declaration_names().map(str::to_string).collect();
            (prefix, names)
        });

        let mut out = String::new();
        let mut previous_was_comment: Option<bool> = None;

        for item in &analyzed.exports {
            let decision = policy::decide(file, item, edge, self.registry);
            if !decision.included {
                continue;
            }

            let identity = item.identity().into_owned();
            let Some(item) = self.options.transforms.apply(item.clone()) else {
                continue;
            };

            let body = rename::build_body(
                &item,
                &BodyRewrite {
                    alias: decision.alias.as_deref(),
                    sibling: sibling.as_ref().map(|(prefix, names)| (*prefix, names)),
                    qualified,
                },
            );
            self.registry.record_emission(file, &identity, decision.alias.as_deref());

            if body.trim().is_empty() {
                trace!("{}: {} is empty after transforms", file.display(), identity);
                continue;
            }

            if let Some(was_comment) = previous_was_comment {
                out.push_str(if was_comment {
                    &self.options.comment_delimiter
                } else {
                    &self.options.delimiter
                });
            }
            out.push_str(&body);
            previous_was_comment = Some(item.is_comment());
        }

        out
    }
}
