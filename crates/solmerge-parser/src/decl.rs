//! Top-level declarations

use super::*;

impl<'a> Parser<'a> {
    pub(crate) fn parse_declaration(&mut self) -> ParseResult<ExportItem> {
        let start = self.current_token().clone();

        match start.kind {
            TokenKind::Abstract => {
                self.advance();
                self.expect(TokenKind::Contract, "'contract' after 'abstract'")?;
                self.parse_block_declaration(&start, DeclarationKind::AbstractContract)
            }
            TokenKind::Contract => {
                self.advance();
                self.parse_block_declaration(&start, DeclarationKind::Contract)
            }
            TokenKind::Interface => {
                self.advance();
                self.parse_block_declaration(&start, DeclarationKind::Interface)
            }
            TokenKind::Library => {
                self.advance();
                self.parse_block_declaration(&start, DeclarationKind::Library)
            }
            TokenKind::Struct => {
                self.advance();
                self.parse_block_declaration(&start, DeclarationKind::Struct)
            }
            TokenKind::Enum => {
                self.advance();
                self.parse_block_declaration(&start, DeclarationKind::Enum)
            }
            TokenKind::Function => {
                self.advance();
                self.parse_function(&start)
            }
            TokenKind::Error => {
                self.advance();
                self.parse_statement_declaration(&start, DeclarationKind::Error)
            }
            TokenKind::Event => {
                self.advance();
                self.parse_statement_declaration(&start, DeclarationKind::Event)
            }
            TokenKind::Type => {
                self.advance();
                self.parse_statement_declaration(&start, DeclarationKind::UserDefinedValueType)
            }
            TokenKind::Using => self.parse_using(&start),
            _ => self.parse_constant(&start),
        }
    }

    /// `contract A is B { ... }`, `struct S { ... }` and friends
    fn parse_block_declaration(&mut self, start: &Token, kind: DeclarationKind) -> ParseResult<ExportItem> {
        let name = self.expect_name(&format!("{} name", kind))?;
        self.skip_header(false)?;
        let end = self.skip_block()?;
        Ok(self.declaration(kind, start, &name, &end))
    }

    /// Free functions; a missing body ends at `;`
    fn parse_function(&mut self, start: &Token) -> ParseResult<ExportItem> {
        let name = self.expect_name("function name")?;
        let terminator = self.skip_header(true)?;
        let end = match terminator.kind {
            TokenKind::Semicolon => terminator,
            _ => self.skip_block()?,
        };
        Ok(self.declaration(DeclarationKind::Function, start, &name, &end))
    }

    /// `error E(uint);`, `event E();`, `type T is uint256;`
    fn parse_statement_declaration(&mut self, start: &Token, kind: DeclarationKind) -> ParseResult<ExportItem> {
        let name = self.expect_name(&format!("{} name", kind))?;
        let end = self.skip_to_statement_end()?;
        Ok(self.declaration(kind, start, &name, &end))
    }

    /// `using L for T global;` has no declared name; the collapsed statement
    /// text (without `;`) stands in for one.
    fn parse_using(&mut self, start: &Token) -> ParseResult<ExportItem> {
        self.advance();
        let end = self.skip_to_statement_end()?;
        let span = start.span.merge(&end.span);
        let body = self.slice(span);
        let name = collapse_whitespace(body.trim_end_matches(';'));
        Ok(ExportItem::declaration(DeclarationKind::UsingDirective, name, body, None, span))
    }

    /// `uint256 constant MAX = 10;`
    fn parse_constant(&mut self, start: &Token) -> ParseResult<ExportItem> {
        let mut depth = 0usize;
        let mut saw_constant = false;
        let mut last_identifier: Option<Token> = None;
        let mut name: Option<Token> = None;

        loop {
            let token = self.current_token().clone();
            match token.kind {
                TokenKind::Eof => break,
                TokenKind::Semicolon if depth == 0 => break,
                TokenKind::Constant if depth == 0 => saw_constant = true,
                TokenKind::Identifier if depth == 0 && name.is_none() => {
                    last_identifier = Some(token);
                }
                TokenKind::Eq if depth == 0 && name.is_none() => {
                    name = last_identifier.take();
                }
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.advance();
        }

        let name = match name {
            Some(name) if saw_constant => name,
            _ => {
                return Err(ParseError::new(
                    format!("Unexpected '{}' at top level", start.value),
                    start.span,
                ));
            }
        };

        let end = self.expect(TokenKind::Semicolon, "';' after constant")?;
        Ok(self.declaration(DeclarationKind::Constant, start, &name, &end))
    }

    fn declaration(&self, kind: DeclarationKind, start: &Token, name: &Token, end: &Token) -> ExportItem {
        let span = start.span.merge(&end.span);
        ExportItem::declaration(
            kind,
            name.value.clone(),
            self.slice(span),
            Some(name.span.relative_to(span.start)),
            span,
        )
    }
}
