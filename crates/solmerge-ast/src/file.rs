//! Per-file extraction results

use super::*;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PragmaKind {
    /// // SPDX-License-Identifier: ...
    License,
    /// pragma ...;
    Directive,
}

/// Header statement emitted once at the top of a merged document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pragma {
    pub kind: PragmaKind,
    pub text: String,
    pub span: Span,
}

impl Pragma {
    pub fn new(kind: PragmaKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

/// Everything a statement extractor pulls out of one source text,
/// each list in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceStatements {
    pub pragmas: Vec<Pragma>,
    pub imports: Vec<ImportEdge>,
    pub exports: Vec<ExportItem>,
}

/// A physical file together with its extracted statements
#[derive(Debug, Clone)]
pub struct AnalyzedFile {
    pub filename: PathBuf,
    pub raw_text: String,
    pub pragmas: Vec<Pragma>,
    pub imports: Vec<ImportEdge>,
    pub exports: Vec<ExportItem>,
}

impl AnalyzedFile {
    pub fn new(filename: PathBuf, raw_text: String, statements: SourceStatements) -> Self {
        Self {
            filename,
            raw_text,
            pragmas: statements.pragmas,
            imports: statements.imports,
            exports: statements.exports,
        }
    }

    /// Directory relative imports are resolved against
    pub fn dir(&self) -> &Path {
        self.filename.parent().unwrap_or_else(|| Path::new("."))
    }

    pub fn declaration_names(&self) -> impl Iterator<Item = &str> {
        self.exports
            .iter()
            .filter(|item| !item.is_comment())
            .map(|item| item.name.as_str())
    }

    /// Pragma texts joined one per line
    pub fn pragma_block(&self) -> String {
        self.pragmas
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyzed_file_accessors() {
        let statements = SourceStatements {
            pragmas: vec![
                Pragma::new(PragmaKind::License, "// SPDX-License-Identifier: MIT", Span::new(0, 31)),
                Pragma::new(PragmaKind::Directive, "pragma solidity ^0.8.0;", Span::new(32, 55)),
            ],
            imports: vec![],
            exports: vec![
                ExportItem::comment("// helpers", Span::new(56, 66)),
                ExportItem::declaration(DeclarationKind::Error, "Oops", "error Oops();", None, Span::new(67, 80)),
            ],
        };
        let file = AnalyzedFile::new(PathBuf::from("/src/A.sol"), String::new(), statements);

        assert_eq!(file.dir(), Path::new("/src"));
        assert_eq!(file.declaration_names().collect::<Vec<_>>(), vec!["Oops"]);
        assert_eq!(
            file.pragma_block(),
            "// SPDX-License-Identifier: MIT\npragma solidity ^0.8.0;"
        );
    }
}
