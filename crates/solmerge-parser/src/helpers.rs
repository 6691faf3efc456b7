//! Token navigation helpers

use super::*;

impl<'a> Parser<'a> {
    pub(crate) fn current_token(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.current.min(last)]
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.current_token().kind == TokenKind::Eof
    }

    /// Moves past the current token and returns it. Never moves past `Eof`.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    pub(crate) fn skip_comments(&mut self) {
        while self.current_token().kind.is_comment() {
            self.advance();
        }
    }

    /// Checks the next significant token without consuming it.
    pub(crate) fn check(&mut self, kind: TokenKind) -> bool {
        self.skip_comments();
        self.current_token().kind == kind
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(format!("Expected {}", what)))
        }
    }

    pub(crate) fn expect_identifier(&mut self, what: &str) -> ParseResult<Token> {
        self.expect(TokenKind::Identifier, what)
    }

    /// Declared or imported name: an identifier or a contextual keyword
    /// such as `from` or `error`.
    pub(crate) fn expect_name(&mut self, what: &str) -> ParseResult<Token> {
        self.skip_comments();
        let kind = self.current_token().kind;
        if kind == TokenKind::Identifier || kind.is_contextual() {
            Ok(self.advance())
        } else {
            Err(self.error(format!("Expected {}", what)))
        }
    }

    /// Error located at the current token
    pub(crate) fn error(&self, message: String) -> ParseError {
        let token = self.current_token();
        let found = match token.kind {
            TokenKind::Eof => "end of file".to_string(),
            _ => format!("'{}'", token.value),
        };
        ParseError::new(format!("{}, found {}", message, found), token.span)
    }

    pub(crate) fn slice(&self, span: Span) -> &'a str {
        &self.source[span.range()]
    }

    /// Advances to the `;` that ends the current statement, skipping over
    /// nested brackets, and returns it.
    pub(crate) fn skip_to_statement_end(&mut self) -> ParseResult<Token> {
        let mut depth = 0usize;
        loop {
            let token = self.current_token().clone();
            match token.kind {
                TokenKind::Eof => return Err(self.error("Expected ';'".to_string())),
                TokenKind::Semicolon if depth == 0 => return Ok(self.advance()),
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    if depth == 0 {
                        return Err(self.error("Expected ';'".to_string()));
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.advance();
        }
    }

    /// Advances over a declaration header up to its `{` (outside any
    /// parentheses) or its terminating `;`. Returns the `{` or `;` token
    /// without consuming a `{`.
    pub(crate) fn skip_header(&mut self, allow_semicolon: bool) -> ParseResult<Token> {
        let mut parens = 0usize;
        loop {
            let token = self.current_token().clone();
            match token.kind {
                TokenKind::Eof => return Err(self.error("Expected '{'".to_string())),
                TokenKind::LBrace if parens == 0 => return Ok(token),
                TokenKind::Semicolon if parens == 0 && allow_semicolon => return Ok(self.advance()),
                TokenKind::Semicolon | TokenKind::RBrace if parens == 0 => {
                    return Err(self.error("Expected '{'".to_string()));
                }
                TokenKind::LParen => parens += 1,
                TokenKind::RParen => parens = parens.saturating_sub(1),
                _ => {}
            }
            self.advance();
        }
    }

    /// Consumes a `{ ... }` block and returns the closing brace.
    pub(crate) fn skip_block(&mut self) -> ParseResult<Token> {
        let open = self.expect(TokenKind::LBrace, "'{'")?;
        let mut depth = 1usize;
        loop {
            let token = self.advance();
            match token.kind {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(token);
                    }
                }
                TokenKind::Eof => {
                    return Err(ParseError::new("Unclosed '{'", open.span));
                }
                _ => {}
            }
        }
    }
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
