//! Import statements

use super::*;

impl<'a> Parser<'a> {
    /// Parses one of:
    ///
    /// - `import "path";`
    /// - `import "path" as Alias;`
    /// - `import * as Alias from "path";`
    /// - `import {a, b as c} from "path";`
    pub(crate) fn parse_import(&mut self) -> ParseResult<ImportEdge> {
        let start = self.advance();
        self.skip_comments();

        let (target, mode) = match self.current_token().kind {
            TokenKind::StringLiteral => {
                let path = self.advance();
                if self.check(TokenKind::As) {
                    self.advance();
                    let alias = self.expect_identifier("alias after 'as'")?;
                    (path.value, ImportMode::GlobalRename(alias.value))
                } else {
                    (path.value, ImportMode::Wildcard)
                }
            }
            TokenKind::Star => {
                self.advance();
                self.expect(TokenKind::As, "'as' after '*'")?;
                let alias = self.expect_identifier("alias after 'as'")?;
                self.expect(TokenKind::From, "'from'")?;
                let path = self.expect(TokenKind::StringLiteral, "import path")?;
                (path.value, ImportMode::GlobalRename(alias.value))
            }
            TokenKind::LBrace => {
                self.advance();
                let names = self.parse_import_list()?;
                self.expect(TokenKind::From, "'from'")?;
                let path = self.expect(TokenKind::StringLiteral, "import path")?;
                (path.value, ImportMode::Named(names))
            }
            _ => {
                return Err(self.error("Expected import path, '*' or '{' after 'import'".to_string()));
            }
        };

        let end = self.expect(TokenKind::Semicolon, "';' after import")?;
        let span = start.span.merge(&end.span);
        let statement = collapse_whitespace(self.slice(span));

        Ok(ImportEdge::new(target, mode, statement, span))
    }

    /// Parses `a, b as c }` after the opening brace
    fn parse_import_list(&mut self) -> ParseResult<Vec<NamedImport>> {
        let mut names = Vec::new();

        loop {
            if self.check(TokenKind::RBrace) {
                self.advance();
                break;
            }

            let name = self.expect_name("imported symbol name")?;
            let alias = if self.check(TokenKind::As) {
                self.advance();
                Some(self.expect_identifier("alias after 'as'")?.value)
            } else {
                None
            };
            names.push(NamedImport::new(name.value, alias));

            if self.check(TokenKind::Comma) {
                self.advance();
            } else {
                self.expect(TokenKind::RBrace, "',' or '}' in import list")?;
                break;
            }
        }

        if names.is_empty() {
            return Err(self.error("Expected at least one symbol in import list".to_string()));
        }

        Ok(names)
    }
}
