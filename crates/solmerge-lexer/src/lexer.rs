use solmerge_ast::Span;
use crate::token::{Token, TokenKind};

/// Tokenizer for the top-level surface of a source file.
///
/// Comments are produced as tokens instead of being skipped. Errors never
/// abort lexing; they come back as `TokenKind::Invalid` tokens whose value is
/// the message.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::str::CharIndices<'a>,
    current_pos: usize,
    current_char: Option<char>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer from source code. A leading byte order mark is
    /// skipped; spans still count it.
    pub fn new(source: &'a str) -> Self {
        let mut chars = source.char_indices();
        let current_char = chars.next().map(|(_, c)| c);
        let mut lexer = Self {
            source,
            chars,
            current_pos: 0,
            current_char,
        };
        if lexer.current_char == Some('\u{feff}') {
            lexer.advance();
        }
        lexer
    }

    /// Tokenizes the entire source and returns all tokens, ending with `Eof`.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Gets the next token from the source.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.current_pos;

        match self.current_char {
            None => Token::new(TokenKind::Eof, Span::new(start, start), String::new()),
            Some(ch) => match ch {
                '"' | '\'' => self.read_string_literal(ch),
                '0'..='9' => self.read_number(),
                'a'..='z' | 'A'..='Z' | '_' | '$' => self.read_identifier_or_keyword(),
                '/' if self.peek() == Some('/') => self.read_line_comment(),
                '/' if self.peek() == Some('*') => self.read_block_comment(),
                '(' => self.single(TokenKind::LParen),
                ')' => self.single(TokenKind::RParen),
                '{' => self.single(TokenKind::LBrace),
                '}' => self.single(TokenKind::RBrace),
                '[' => self.single(TokenKind::LBracket),
                ']' => self.single(TokenKind::RBracket),
                ';' => self.single(TokenKind::Semicolon),
                ',' => self.single(TokenKind::Comma),
                '.' => self.single(TokenKind::Dot),
                '*' => self.single(TokenKind::Star),
                '=' => self.single(TokenKind::Eq),
                _ if ch.is_alphabetic() => self.read_identifier_or_keyword(),
                _ if ch.is_ascii_punctuation() => self.single(TokenKind::Punct),
                _ => {
                    self.advance();
                    Token::new(
                        TokenKind::Invalid,
                        Span::new(start, self.current_pos),
                        format!("Unexpected character: {}", ch),
                    )
                }
            },
        }
    }

    // Helper methods

    fn advance(&mut self) {
        if let Some((pos, ch)) = self.chars.next() {
            self.current_pos = pos;
            self.current_char = Some(ch);
        } else {
            self.current_pos = self.source.len();
            self.current_char = None;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.clone().next().map(|(_, c)| c)
    }

    fn text(&self, start: usize) -> String {
        self.source[start..self.current_pos].to_string()
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.current_pos;
        self.advance();
        Token::new(kind, Span::new(start, self.current_pos), self.text(start))
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char {
            if !ch.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    fn read_line_comment(&mut self) -> Token {
        let start = self.current_pos;
        while let Some(ch) = self.current_char {
            if ch == '\n' || ch == '\r' {
                break;
            }
            self.advance();
        }
        Token::new(TokenKind::LineComment, Span::new(start, self.current_pos), self.text(start))
    }

    fn read_block_comment(&mut self) -> Token {
        let start = self.current_pos;
        // Skip /*
        self.advance();
        self.advance();

        while let Some(ch) = self.current_char {
            if ch == '*' && self.peek() == Some('/') {
                self.advance(); // *
                self.advance(); // /
                return Token::new(
                    TokenKind::BlockComment,
                    Span::new(start, self.current_pos),
                    self.text(start),
                );
            }
            self.advance();
        }

        Token::new(
            TokenKind::Invalid,
            Span::new(start, self.current_pos),
            "Unterminated multi-line comment".to_string(),
        )
    }

    fn read_string_literal(&mut self, quote: char) -> Token {
        let start = self.current_pos;
        self.advance(); // Skip opening quote

        let mut value = String::new();

        while let Some(ch) = self.current_char {
            if ch == quote {
                self.advance(); // Skip closing quote
                return Token::new(TokenKind::StringLiteral, Span::new(start, self.current_pos), value);
            } else if ch == '\\' {
                self.advance();
                if let Some(escaped) = self.current_char {
                    let unescaped = match escaped {
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        _ => escaped,
                    };
                    value.push(unescaped);
                    self.advance();
                }
            } else if ch == '\n' {
                break;
            } else {
                value.push(ch);
                self.advance();
            }
        }

        Token::new(
            TokenKind::Invalid,
            Span::new(start, self.current_pos),
            "Unterminated string literal".to_string(),
        )
    }

    /// Numbers are only skipped over, so one greedy rule covers decimal,
    /// hex, scientific and underscore-separated forms.
    fn read_number(&mut self) -> Token {
        let start = self.current_pos;
        while let Some(ch) = self.current_char {
            let continues = ch.is_ascii_alphanumeric()
                || ch == '_'
                || (ch == '.' && self.peek().is_some_and(|c| c.is_ascii_digit()));
            if !continues {
                break;
            }
            self.advance();
        }
        Token::new(TokenKind::NumberLiteral, Span::new(start, self.current_pos), self.text(start))
    }

    fn read_identifier_or_keyword(&mut self) -> Token {
        let start = self.current_pos;
        while let Some(ch) = self.current_char {
            if ch.is_alphanumeric() || ch == '_' || ch == '$' {
                self.advance();
            } else {
                break;
            }
        }
        let word = self.text(start);
        let kind = TokenKind::from_keyword(&word).unwrap_or(TokenKind::Identifier);
        Token::new(kind, Span::new(start, self.current_pos), word)
    }
}
