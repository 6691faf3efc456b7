//! # Solmerge AST
//!
//! Structured records produced by statement extraction: the pragma headers,
//! import statements and top-level export items of a single source file.
//! Nothing here understands declaration bodies; they are carried as text.

use std::fmt;
use std::ops::Range;

// =============================================================================
// Core Types (kept in lib.rs - used by all modules)
// =============================================================================

/// Byte range into a source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Shifts the span so that it is relative to `origin`.
    pub fn relative_to(&self, origin: usize) -> Span {
        Span {
            start: self.start.saturating_sub(origin),
            end: self.end.saturating_sub(origin),
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

// =============================================================================
// Module Declarations
// =============================================================================

pub mod import;
pub mod export;
pub mod file;

pub use import::*;
pub use export::*;
pub use file::*;

// =============================================================================
// Tests
// =============================================================================
