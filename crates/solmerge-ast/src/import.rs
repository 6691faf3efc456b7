//! Import statement records

use super::*;

/// One entry of a `{a, b as c}` import list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedImport {
    pub name: String,
    pub alias: Option<String>,
}

impl NamedImport {
    pub fn new(name: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            name: name.into(),
            alias,
        }
    }
}

/// Inclusion mode of an import statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImportMode {
    /// import "file";
    Wildcard,

    /// import "file" as Alias; or import * as Alias from "file";
    GlobalRename(String),

    /// import { a, b as c } from "file";
    Named(Vec<NamedImport>),
}

/// One import statement as found in a source file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportEdge {
    /// Target reference exactly as written between the quotes
    pub target: String,
    pub mode: ImportMode,
    /// Statement text with whitespace collapsed, used as the edge identity
    pub statement: String,
    pub span: Span,
}

impl ImportEdge {
    pub fn new(target: impl Into<String>, mode: ImportMode, statement: impl Into<String>, span: Span) -> Self {
        Self {
            target: target.into(),
            mode,
            statement: statement.into(),
            span,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self.mode, ImportMode::Wildcard)
    }

    pub fn is_global_rename(&self) -> bool {
        matches!(self.mode, ImportMode::GlobalRename(_))
    }

    pub fn global_rename_alias(&self) -> Option<&str> {
        match &self.mode {
            ImportMode::GlobalRename(alias) => Some(alias),
            _ => None,
        }
    }

    pub fn named_imports(&self) -> &[NamedImport] {
        match &self.mode {
            ImportMode::Named(names) => names,
            _ => &[],
        }
    }

    /// True when the statement pulls in every export of the target.
    pub fn imports_everything(&self) -> bool {
        self.is_wildcard() || self.is_global_rename()
    }

    pub fn find_named(&self, name: &str) -> Option<&NamedImport> {
        self.named_imports().iter().find(|n| n.name == name)
    }
}

/// True for `./` and `../` references, which resolve against the importer.
pub fn is_relative_reference(reference: &str) -> bool {
    reference.starts_with("./") || reference.starts_with("../")
}

impl fmt::Display for ImportEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.statement)
    }
}
