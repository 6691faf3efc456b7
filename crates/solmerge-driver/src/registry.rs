//! Per-run bookkeeping of handled import edges and emitted declarations

use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use solmerge_ast::ImportEdge;

/// Identity of an import edge: the statement text as found in one file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub importer: PathBuf,
    pub statement: String,
}

impl EdgeKey {
    pub fn new(importer: &Path, edge: &ImportEdge) -> Self {
        Self {
            importer: importer.to_path_buf(),
            statement: edge.statement.clone(),
        }
    }
}

/// One materialized declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmissionKey {
    pub file: PathBuf,
    pub name: String,
    pub alias: Option<String>,
}

/// State owned by exactly one merge run.
///
/// All collections only grow. Insertion order is kept so the registry can
/// be reported in the order things happened.
#[derive(Debug, Default)]
pub struct ImportRegistry {
    processed_edges: IndexSet<EdgeKey>,
    emitted: IndexSet<EmissionKey>,
    global_aliases: IndexMap<PathBuf, IndexSet<String>>,
}

impl ImportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_edge_processed(&self, key: &EdgeKey) -> bool {
        self.processed_edges.contains(key)
    }

    /// Marks an edge as handled. Returns false if it already was.
    pub fn mark_edge_processed(&mut self, key: EdgeKey) -> bool {
        self.processed_edges.insert(key)
    }

    pub fn is_emitted(&self, file: &Path, name: &str, alias: Option<&str>) -> bool {
        // IndexSet lookups need an owned key
        self.emitted.contains(&EmissionKey {
            file: file.to_path_buf(),
            name: name.to_string(),
            alias: alias.map(str::to_string),
        })
    }

    /// Records an emission. Returns false if it was already recorded.
    pub fn record_emission(&mut self, file: &Path, name: &str, alias: Option<&str>) -> bool {
        self.emitted.insert(EmissionKey {
            file: file.to_path_buf(),
            name: name.to_string(),
            alias: alias.map(str::to_string),
        })
    }

    /// Records that `file` was imported under the global alias `alias`
    pub fn record_global_alias(&mut self, file: &Path, alias: &str) {
        self.global_aliases
            .entry(file.to_path_buf())
            .or_default()
            .insert(alias.to_string());
    }

    pub fn has_global_alias(&self, file: &Path, alias: &str) -> bool {
        self.global_aliases
            .get(file)
            .is_some_and(|aliases| aliases.contains(alias))
    }

    /// Global aliases `file` was imported under, in first-use order
    pub fn global_aliases(&self, file: &Path) -> impl Iterator<Item = &str> {
        self.global_aliases
            .get(file)
            .into_iter()
            .flat_map(|aliases| aliases.iter().map(String::as_str))
    }

    pub fn processed_edge_count(&self) -> usize {
        self.processed_edges.len()
    }

    pub fn emitted_count(&self) -> usize {
        self.emitted.len()
    }

    /// Emissions in the order they happened
    pub fn emitted(&self) -> impl Iterator<Item = &EmissionKey> {
        self.emitted.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solmerge_ast::{ImportMode, Span};

    fn edge(statement: &str) -> ImportEdge {
        ImportEdge::new("./A.sol", ImportMode::Wildcard, statement, Span::default())
    }

    #[test]
    fn test_edges_are_keyed_by_importer_and_statement() {
        let mut registry = ImportRegistry::new();
        let stmt = edge("import \"./A.sol\";");

        assert!(registry.mark_edge_processed(EdgeKey::new(Path::new("/p/Root.sol"), &stmt)));
        assert!(!registry.mark_edge_processed(EdgeKey::new(Path::new("/p/Root.sol"), &stmt)));
        assert!(registry.is_edge_processed(&EdgeKey::new(Path::new("/p/Root.sol"), &stmt)));

        // Same text in another file is another edge
        assert!(!registry.is_edge_processed(&EdgeKey::new(Path::new("/p/lib/B.sol"), &stmt)));
        assert_eq!(registry.processed_edge_count(), 1);
    }

    #[test]
    fn test_emissions_distinguish_aliases() {
        let mut registry = ImportRegistry::new();
        let file = Path::new("/p/A.sol");

        assert!(registry.record_emission(file, "Token", None));
        assert!(registry.is_emitted(file, "Token", None));
        assert!(!registry.is_emitted(file, "Token", Some("A$Token")));
        assert!(registry.record_emission(file, "Token", Some("A$Token")));
        assert!(!registry.record_emission(file, "Token", None));

        let order: Vec<_> = registry.emitted().map(|k| k.alias.clone()).collect();
        assert_eq!(order, vec![None, Some("A$Token".to_string())]);
        assert_eq!(registry.emitted_count(), 2);
    }

    #[test]
    fn test_global_aliases_per_file() {
        let mut registry = ImportRegistry::new();
        let file = Path::new("/p/A.sol");

        registry.record_global_alias(file, "A");
        registry.record_global_alias(file, "Alt");
        registry.record_global_alias(file, "A");

        assert_eq!(registry.global_aliases(file).collect::<Vec<_>>(), vec!["A", "Alt"]);
        assert!(registry.has_global_alias(file, "Alt"));
        assert!(!registry.has_global_alias(Path::new("/p/B.sol"), "A"));
        assert_eq!(registry.global_aliases(Path::new("/p/B.sol")).count(), 0);
    }
}
