//! Error types for merge runs

use std::io;
use std::path::{Path, PathBuf};

use solmerge_ast::Span;
use solmerge_parser::ParseError;
use thiserror::Error;

/// Every way a merge run can fail. Any of these aborts the whole run; a
/// failed run never returns partial output.
#[derive(Debug, Error)]
pub enum MergeError {
    /// An import target exists under none of the resolution rules.
    #[error("cannot resolve import \"{reference}\" in {}", .importer.display())]
    Resolution {
        reference: String,
        importer: PathBuf,
        span: Span,
        tried: Vec<PathBuf>,
    },

    /// A file's statements could not be extracted.
    #[error("failed to extract statements from {}: {source}", .file.display())]
    Extraction {
        file: PathBuf,
        #[source]
        source: ParseError,
    },

    /// A file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The caller cancelled the run.
    #[error("merge of {} was cancelled", .root.display())]
    Cancelled { root: PathBuf },
}

pub type MergeResult<T> = Result<T, MergeError>;

impl MergeError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The file the error points into
    pub fn file(&self) -> &Path {
        match self {
            MergeError::Resolution { importer, .. } => importer,
            MergeError::Extraction { file, .. } => file,
            MergeError::Io { path, .. } => path,
            MergeError::Cancelled { root } => root,
        }
    }

    /// Source location inside [`MergeError::file`], when there is one
    pub fn span(&self) -> Option<Span> {
        match self {
            MergeError::Resolution { span, .. } => Some(*span),
            MergeError::Extraction { source, .. } => Some(source.span),
            MergeError::Io { .. } | MergeError::Cancelled { .. } => None,
        }
    }

    /// Short label for diagnostics
    pub fn label(&self) -> String {
        match self {
            MergeError::Resolution { tried, .. } if !tried.is_empty() => {
                let tried = tried
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("not found (tried {})", tried)
            }
            MergeError::Resolution { .. } => "not found".to_string(),
            MergeError::Extraction { source, .. } => source.message.clone(),
            other => other.to_string(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            MergeError::Resolution { .. } => "E0100",
            MergeError::Extraction { .. } => "E0200",
            MergeError::Io { .. } => "E0300",
            MergeError::Cancelled { .. } => "E0400",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_message_names_reference_and_importer() {
        let err = MergeError::Resolution {
            reference: "./missing.sol".to_string(),
            importer: PathBuf::from("/project/Root.sol"),
            span: Span::new(0, 24),
            tried: vec![PathBuf::from("/project/missing.sol")],
        };

        let message = err.to_string();
        assert!(message.contains("./missing.sol"));
        assert!(message.contains("/project/Root.sol"));
        assert_eq!(err.file(), Path::new("/project/Root.sol"));
        assert_eq!(err.span(), Some(Span::new(0, 24)));
        assert_eq!(err.label(), "not found (tried /project/missing.sol)");
    }

    #[test]
    fn test_extraction_error_carries_parse_span() {
        let err = MergeError::Extraction {
            file: PathBuf::from("A.sol"),
            source: ParseError::new("Unclosed '{'", Span::new(3, 4)),
        };
        assert_eq!(err.span(), Some(Span::new(3, 4)));
        assert_eq!(err.label(), "Unclosed '{'");
        assert_eq!(err.code(), "E0200");
    }
}
