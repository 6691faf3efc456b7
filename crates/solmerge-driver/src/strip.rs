//! Strip-only mode: a single file with its pragma directives and import
//! statements removed. License comments and everything else stay in place.

use solmerge_ast::{PragmaKind, Span};
use solmerge_parser::ParseResult;

pub fn strip_statements(source: &str) -> ParseResult<String> {
    let statements = solmerge_parser::extract(source)?;

    let mut removals: Vec<Span> = statements
        .pragmas
        .iter()
        .filter(|pragma| pragma.kind == PragmaKind::Directive)
        .map(|pragma| pragma.span)
        .chain(statements.imports.iter().map(|edge| edge.span))
        .collect();
    removals.sort_by_key(|span| span.start);

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;

    for span in removals {
        let (start, end) = line_extent(source, span);
        let start = start.max(cursor);
        out.push_str(&source[cursor..start]);
        cursor = end;
    }
    out.push_str(&source[cursor..]);

    Ok(out)
}

/// Range to cut for a removed statement: the whole line when nothing else
/// is on it, just the statement otherwise.
fn line_extent(source: &str, span: Span) -> (usize, usize) {
    let line_start = source[..span.start].rfind('\n').map_or(0, |i| i + 1);
    let newline = source[span.end..].find('\n').map(|i| span.end + i);
    let line_end = newline.map_or(source.len(), |i| i + 1);

    let blank_before = source[line_start..span.start].trim().is_empty();
    let blank_after = source[span.end..line_end].trim().is_empty();

    match (blank_before, blank_after) {
        (true, true) => (line_start, line_end),
        // Keep the newline that ends the preceding code
        (false, true) => (span.start, newline.unwrap_or(source.len())),
        _ => (span.start, span.end),
    }
}
