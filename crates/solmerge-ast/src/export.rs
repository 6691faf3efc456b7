//! Top-level export items

use super::*;
use std::borrow::Cow;

/// Kind of a named top-level declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Contract,
    AbstractContract,
    Interface,
    Library,
    Struct,
    Enum,
    /// Free function declared at file level
    Function,
    Error,
    Event,
    /// type Name is uint256;
    UserDefinedValueType,
    /// File-level constant
    Constant,
    /// File-level `using L for T;` directive
    UsingDirective,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DeclarationKind::Contract => "contract",
            DeclarationKind::AbstractContract => "abstract contract",
            DeclarationKind::Interface => "interface",
            DeclarationKind::Library => "library",
            DeclarationKind::Struct => "struct",
            DeclarationKind::Enum => "enum",
            DeclarationKind::Function => "function",
            DeclarationKind::Error => "error",
            DeclarationKind::Event => "event",
            DeclarationKind::UserDefinedValueType => "type",
            DeclarationKind::Constant => "constant",
            DeclarationKind::UsingDirective => "using",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    Declaration(DeclarationKind),
    /// Free-floating documentation between declarations
    Comment,
}

/// One declaration or free comment block found at file top level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportItem {
    pub kind: ExportKind,
    /// Declared name; empty for comments
    pub name: String,
    /// Exact source text of the item
    pub body: String,
    /// Location of the declared name inside `body`
    pub name_span: Option<Span>,
    /// Location of the item in its file
    pub span: Span,
}

impl ExportItem {
    pub fn declaration(
        kind: DeclarationKind,
        name: impl Into<String>,
        body: impl Into<String>,
        name_span: Option<Span>,
        span: Span,
    ) -> Self {
        Self {
            kind: ExportKind::Declaration(kind),
            name: name.into(),
            body: body.into(),
            name_span,
            span,
        }
    }

    pub fn comment(body: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ExportKind::Comment,
            name: String::new(),
            body: body.into(),
            name_span: None,
            span,
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, ExportKind::Comment)
    }

    pub fn declaration_kind(&self) -> Option<DeclarationKind> {
        match self.kind {
            ExportKind::Declaration(kind) => Some(kind),
            ExportKind::Comment => None,
        }
    }

    /// Deduplication identity. Comments have no name, so their source offset
    /// stands in for one; it is stable across re-parses of the same text.
    pub fn identity(&self) -> Cow<'_, str> {
        match self.kind {
            ExportKind::Comment => Cow::Owned(format!("#comment@{}", self.span.start)),
            ExportKind::Declaration(_) => Cow::Borrowed(&self.name),
        }
    }

    /// Name span if it still points at the declared name in the current body.
    pub fn valid_name_span(&self) -> Option<Span> {
        self.name_span
            .filter(|span| self.body.get(span.range()) == Some(self.name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_identity_uses_offset() {
        let comment = ExportItem::comment("// note", Span::new(42, 49));
        assert!(comment.is_comment());
        assert_eq!(comment.identity(), "#comment@42");
        assert_eq!(comment.declaration_kind(), None);
    }

    #[test]
    fn test_declaration_identity_is_name() {
        let item = ExportItem::declaration(
            DeclarationKind::Library,
            "Math",
            "library Math {}",
            Some(Span::new(8, 12)),
            Span::new(0, 15),
        );
        assert_eq!(item.identity(), "Math");
        assert_eq!(item.valid_name_span(), Some(Span::new(8, 12)));
        assert_eq!(format!("{}", DeclarationKind::AbstractContract), "abstract contract");
    }

    #[test]
    fn test_stale_name_span_is_rejected() {
        let mut item = ExportItem::declaration(
            DeclarationKind::Struct,
            "Point",
            "struct Point { uint x; }",
            Some(Span::new(7, 12)),
            Span::new(0, 24),
        );
        item.body = format!("/* moved */ {}", item.body);
        assert_eq!(item.valid_name_span(), None);
    }
}
