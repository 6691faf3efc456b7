//! Output names for aliased declarations and the body rewriting that keeps
//! references consistent with them.
//!
//! A file imported under a global rename `G` has each of its declarations
//! emitted as `G$Name`. Inside that file, bare references to its own
//! declarations become `G$Name`; inside the importing file, `G.Name` becomes
//! `G$Name`, or plain `Name` when the aliased file only passes `Name` on from
//! its own imports. Rewriting works on tokens, so strings and comments are
//! never touched. Two files imported with bare wildcards that declare the same
//! name still collide; only global renames are made collision-free.

use std::collections::HashSet;

use log::trace;
use solmerge_ast::{ExportItem, ImportEdge, Span};
use solmerge_lexer::{Lexer, Token, TokenKind};

/// Joins a global alias and a declaration name
pub const SEPARATOR: &str = "$";

pub fn global_name(prefix: &str, name: &str) -> String {
    format!("{}{}{}", prefix, SEPARATOR, name)
}

/// Alias an everything-import gives to `item`: prefixed under a global
/// rename, none under a bare wildcard. Comments never get one.
pub fn alias_for(edge: &ImportEdge, item: &ExportItem) -> Option<String> {
    match edge.global_rename_alias() {
        Some(prefix) if !item.is_comment() => Some(global_name(prefix, &item.name)),
        _ => None,
    }
}

/// Rewrites to apply while building one emitted body
#[derive(Debug, Default)]
pub struct BodyRewrite<'a> {
    /// Replacement for the declared name, from a named `{a as b}` import
    pub alias: Option<&'a str>,
    /// Global alias the owning file is emitted under, with that file's
    /// declaration names
    pub sibling: Option<(&'a str, &'a HashSet<String>)>,
    /// Global aliases the owning file binds through its own imports
    pub qualified: &'a [QualifiedAlias],
}

/// A global alias bound by an import, with the names its target declares
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedAlias {
    pub alias: String,
    pub names: HashSet<String>,
}

impl QualifiedAlias {
    pub fn new(alias: impl Into<String>, names: HashSet<String>) -> Self {
        Self {
            alias: alias.into(),
            names,
        }
    }

    /// Replacement for `alias.member`
    fn flatten(&self, member: &str) -> String {
        if self.names.contains(member) {
            global_name(&self.alias, member)
        } else {
            member.to_string()
        }
    }
}

impl BodyRewrite<'_> {
    fn rewrites_tokens(&self) -> bool {
        self.sibling.is_some() || !self.qualified.is_empty()
    }
}

/// Builds the text emitted for `item`
pub fn build_body(item: &ExportItem, rewrite: &BodyRewrite<'_>) -> String {
    if item.is_comment() {
        return item.body.clone();
    }

    let mut replacements: Vec<(Span, String)> = Vec::new();

    if rewrite.sibling.is_none() {
        if let (Some(alias), Some(span)) = (rewrite.alias, item.valid_name_span()) {
            replacements.push((span, alias.to_string()));
        }
    }

    if rewrite.rewrites_tokens() {
        let tokens = Lexer::new(&item.body).tokenize();
        if tokens.iter().any(|t| t.kind == TokenKind::Invalid) {
            trace!("leaving body of {} untouched, it does not tokenize", item.name);
        } else {
            let significant: Vec<&Token> = tokens.iter().filter(|t| !t.kind.is_comment()).collect();
            collect_reference_rewrites(&significant, rewrite, &mut replacements);
        }
    }

    splice(&item.body, replacements)
}

fn collect_reference_rewrites(tokens: &[&Token], rewrite: &BodyRewrite<'_>, out: &mut Vec<(Span, String)>) {
    let mut depth = 0usize;
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        match token.kind {
            TokenKind::LBrace => depth += 1,
            TokenKind::RBrace => depth = depth.saturating_sub(1),
            _ => {}
        }

        let previous = i.checked_sub(1).map(|p| tokens[p]);
        if !is_name(token) || previous.is_some_and(|p| p.kind == TokenKind::Dot) {
            i += 1;
            continue;
        }

        if let Some(qualified) = rewrite.qualified.iter().find(|q| q.alias == token.value) {
            let dot = tokens.get(i + 1).filter(|t| t.kind == TokenKind::Dot);
            let member = tokens.get(i + 2).filter(|t| t.is_word());
            if let (Some(_), Some(member)) = (dot, member) {
                out.push((token.span.merge(&member.span), qualified.flatten(&member.value)));
                i += 3;
                continue;
            }
        }

        if let Some((prefix, names)) = rewrite.sibling {
            let member_declaration = depth > 0 && previous.is_some_and(declares_member);
            if names.contains(&token.value) && !member_declaration {
                out.push((token.span, global_name(prefix, &token.value)));
            }
        }

        i += 1;
    }
}

fn is_name(token: &Token) -> bool {
    token.kind == TokenKind::Identifier || token.kind.is_contextual()
}

/// Inside a body, the word after these names a member, not a reference
fn declares_member(token: &Token) -> bool {
    matches!(token.kind, TokenKind::Function | TokenKind::Event | TokenKind::Error)
        || (token.kind == TokenKind::Identifier && token.value == "modifier")
}

fn splice(body: &str, mut replacements: Vec<(Span, String)>) -> String {
    if replacements.is_empty() {
        return body.to_string();
    }

    replacements.sort_by_key(|(span, _)| span.start);

    let mut out = String::with_capacity(body.len());
    let mut cursor = 0;
    for (span, text) in replacements {
        if span.start < cursor {
            continue;
        }
        out.push_str(&body[cursor..span.start]);
        out.push_str(&text);
        cursor = span.end;
    }
    out.push_str(&body[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use solmerge_ast::{DeclarationKind, ImportMode};

    fn contract(body: &str) -> ExportItem {
        let statements = solmerge_parser::extract(body).unwrap();
        statements.exports.into_iter().next().unwrap()
    }

    fn names(list: &[&str]) -> HashSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_alias_for_global_rename() {
        let edge = ImportEdge::new("./A.sol", ImportMode::GlobalRename("A".to_string()), "", Span::default());
        let item = ExportItem::declaration(DeclarationKind::Struct, "S", "struct S {}", None, Span::default());
        assert_eq!(alias_for(&edge, &item), Some("A$S".to_string()));

        let wildcard = ImportEdge::new("./A.sol", ImportMode::Wildcard, "", Span::default());
        assert_eq!(alias_for(&wildcard, &item), None);
    }

    #[test]
    fn test_named_alias_renames_header_only() {
        let item = contract("contract Token { Token next; }");
        let body = build_body(
            &item,
            &BodyRewrite {
                alias: Some("MyToken"),
                ..Default::default()
            },
        );
        assert_eq!(body, "contract MyToken { Token next; }");
    }

    #[test]
    fn test_sibling_references_get_prefixed() {
        let item = contract(
            "contract Vault is Base { Base.Kind k; string s = \"Base\"; // Base\n x.Base y; }",
        );
        let siblings = names(&["Vault", "Base"]);
        let body = build_body(
            &item,
            &BodyRewrite {
                sibling: Some(("V", &siblings)),
                ..Default::default()
            },
        );
        assert_eq!(
            body,
            "contract V$Vault is V$Base { V$Base.Kind k; string s = \"Base\"; // Base\n x.Base y; }"
        );
    }

    #[test]
    fn test_member_declarations_keep_their_names() {
        let siblings = names(&["max", "Math", "User"]);
        let rewrite = BodyRewrite {
            sibling: Some(("G", &siblings)),
            ..Default::default()
        };

        let free = contract("function max(uint a, uint b) pure returns (uint) { return a > b ? a : b; }");
        assert_eq!(
            build_body(&free, &rewrite),
            "function G$max(uint a, uint b) pure returns (uint) { return a > b ? a : b; }"
        );

        let library = contract(
            "library Math { event max(); modifier max() { _; } function max(uint a) internal pure returns (uint) { return max(a, a); } }",
        );
        assert_eq!(
            build_body(&library, &rewrite),
            "library G$Math { event max(); modifier max() { _; } function max(uint a) internal pure returns (uint) { return G$max(a, a); } }"
        );

        let user = contract("contract User { function f() public { Math.max(1, 2); } }");
        assert_eq!(
            build_body(&user, &rewrite),
            "contract G$User { function f() public { G$Math.max(1, 2); } }"
        );
    }

    #[test]
    fn test_passed_on_names_drop_the_alias() {
        let item = contract("contract R is G.Y, G.Own {}");
        let qualified = vec![QualifiedAlias::new("G", names(&["Own"]))];
        let body = build_body(
            &item,
            &BodyRewrite {
                qualified: &qualified,
                ..Default::default()
            },
        );
        assert_eq!(body, "contract R is Y, G$Own {}");
    }

    #[test]
    fn test_qualified_references_are_flattened() {
        let item = contract("contract App is Lib.Base { Lib . Point p; Other.Point q; }");
        let qualified = vec![QualifiedAlias::new("Lib", names(&["Base", "Point"]))];
        let body = build_body(
            &item,
            &BodyRewrite {
                qualified: &qualified,
                ..Default::default()
            },
        );
        assert_eq!(body, "contract App is Lib$Base { Lib$Point p; Other.Point q; }");
    }

    #[test]
    fn test_comments_are_copied_verbatim() {
        let comment = ExportItem::comment("// Lib.Base", Span::default());
        let qualified = vec![QualifiedAlias::new("Lib", names(&["Base"]))];
        let body = build_body(
            &comment,
            &BodyRewrite {
                qualified: &qualified,
                ..Default::default()
            },
        );
        assert_eq!(body, "// Lib.Base");
    }
}
