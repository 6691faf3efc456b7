//! Core Parser struct and the top-level statement loop

use super::*;

/// Scanner that turns a token stream into pragma, import and export records.
///
/// Declaration bodies are never parsed, only balanced, so any grammar inside
/// a `{ ... }` block is accepted.
pub struct Parser<'a> {
    pub(crate) source: &'a str,
    pub(crate) tokens: Vec<Token>,
    pub(crate) current: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `source`, tokenizing it up front
    pub fn new(source: &'a str) -> Self {
        let tokens = Lexer::new(source).tokenize();
        Self {
            source,
            tokens,
            current: 0,
        }
    }

    /// Parses a complete source unit
    pub fn parse_source_unit(&mut self) -> ParseResult<SourceStatements> {
        if let Some(invalid) = self.tokens.iter().find(|t| t.kind == TokenKind::Invalid) {
            return Err(ParseError::new(invalid.value.clone(), invalid.span));
        }

        let mut statements = SourceStatements::default();

        while !self.is_at_end() {
            let token = self.current_token().clone();
            match token.kind {
                TokenKind::LineComment if is_license_comment(&token.value) => {
                    self.advance();
                    statements
                        .pragmas
                        .push(Pragma::new(PragmaKind::License, token.value, token.span));
                }
                TokenKind::LineComment | TokenKind::BlockComment => {
                    self.advance();
                    statements.exports.push(ExportItem::comment(token.value, token.span));
                }
                TokenKind::Pragma => {
                    let pragma = self.parse_pragma()?;
                    statements.pragmas.push(pragma);
                }
                TokenKind::Import => {
                    let import = self.parse_import()?;
                    statements.imports.push(import);
                }
                TokenKind::Semicolon => {
                    self.advance();
                }
                TokenKind::RBrace | TokenKind::RParen | TokenKind::RBracket => {
                    return Err(self.error("Unbalanced closing delimiter at top level".to_string()));
                }
                _ => {
                    let item = self.parse_declaration()?;
                    statements.exports.push(item);
                }
            }
        }

        Ok(statements)
    }

    // =========================================================================
    // Pragmas
    // =========================================================================

    pub(crate) fn parse_pragma(&mut self) -> ParseResult<Pragma> {
        let start = self.advance();
        let end = self.skip_to_statement_end()?;
        let span = start.span.merge(&end.span);
        Ok(Pragma::new(PragmaKind::Directive, self.slice(span), span))
    }
}

fn is_license_comment(text: &str) -> bool {
    text.contains("SPDX-License-Identifier:")
}
