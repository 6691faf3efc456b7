use solmerge_ast::Span;

/// Token kinds of the top-level surface of a source file.
///
/// Only the keywords that start or shape a top-level statement get their own
/// kind; every other word is an `Identifier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Pragma,
    Import,
    As,
    From,
    Abstract,
    Contract,
    Interface,
    Library,
    Struct,
    Enum,
    Function,
    Error,
    Event,
    Type,
    Is,
    Using,
    For,
    Constant,

    // Literals
    NumberLiteral,
    StringLiteral,

    // Identifier
    Identifier,

    // Comments (kept as tokens, top-level comments are export items)
    LineComment,
    BlockComment,

    // Delimiters
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    Semicolon, // ;
    Comma,     // ,
    Dot,       // .
    Star,      // *
    Eq,        // =

    /// Any other operator character
    Punct,

    // Special
    Eof,
    Invalid,
}

impl TokenKind {
    pub fn from_keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "pragma" => TokenKind::Pragma,
            "import" => TokenKind::Import,
            "as" => TokenKind::As,
            "from" => TokenKind::From,
            "abstract" => TokenKind::Abstract,
            "contract" => TokenKind::Contract,
            "interface" => TokenKind::Interface,
            "library" => TokenKind::Library,
            "struct" => TokenKind::Struct,
            "enum" => TokenKind::Enum,
            "function" => TokenKind::Function,
            "error" => TokenKind::Error,
            "event" => TokenKind::Event,
            "type" => TokenKind::Type,
            "is" => TokenKind::Is,
            "using" => TokenKind::Using,
            "for" => TokenKind::For,
            "constant" => TokenKind::Constant,
            _ => return None,
        };
        Some(kind)
    }

    /// Keywords that are still legal declaration names
    pub fn is_contextual(&self) -> bool {
        matches!(self, TokenKind::From | TokenKind::Error | TokenKind::Type)
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }
}

/// Represents a token with its kind, span, and value.
///
/// `value` is the source text for words, punctuation and comments, and the
/// unescaped contents for string literals. Invalid tokens carry the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub value: String,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, span: Span, value: String) -> Self {
        Self { kind, span, value }
    }

    /// Identifiers and keywords. Keywords such as `from` or `type` are legal
    /// member names, so anything word-shaped counts.
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Identifier || TokenKind::from_keyword(&self.value).is_some()
    }
}
