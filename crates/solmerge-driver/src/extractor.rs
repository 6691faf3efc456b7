//! Statement extraction seam
//!
//! The merge engine never looks at raw text itself; it asks a
//! [`StatementExtractor`] for the pragmas, imports and exports of a file.

use solmerge_ast::SourceStatements;
use solmerge_parser::ParseResult;

/// Pure function from source text to structured statements. Implementations
/// must keep imports and exports in source order.
pub trait StatementExtractor: Send + Sync {
    fn extract(&self, source: &str) -> ParseResult<SourceStatements>;
}

/// Default extractor backed by `solmerge-parser`
#[derive(Debug, Default, Clone, Copy)]
pub struct SolidityExtractor;

impl StatementExtractor for SolidityExtractor {
    fn extract(&self, source: &str) -> ParseResult<SourceStatements> {
        solmerge_parser::extract(source)
    }
}
