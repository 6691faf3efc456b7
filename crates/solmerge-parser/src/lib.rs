//! # Solmerge Parser
//!
//! Statement extractor for modular source files. Produces the pragma
//! headers, import statements and top-level export items of one file, each
//! in source order, without interpreting declaration bodies.

use solmerge_ast::*;
use solmerge_lexer::{Lexer, Token, TokenKind};

// Module declarations
mod error;
mod parser;
mod import;
mod decl;
mod helpers;

// Re-export public types
pub use error::{ParseError, ParseResult};
pub use parser::Parser;

use helpers::collapse_whitespace;

/// Extracts pragmas, imports and exports from `source`.
pub fn extract(source: &str) -> ParseResult<SourceStatements> {
    Parser::new(source).parse_source_unit()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_forms() {
        let source = r#"
            import "./A.sol";
            import "./B.sol" as B;
            import * as C from "../C.sol";
            import {x, y as z} from "lib/D.sol";
        "#;
        let statements = extract(source).unwrap();
        let imports = &statements.imports;

        assert_eq!(imports.len(), 4);
        assert_eq!(imports[0].target, "./A.sol");
        assert!(imports[0].is_wildcard());
        assert_eq!(imports[1].global_rename_alias(), Some("B"));
        assert_eq!(imports[2].target, "../C.sol");
        assert_eq!(imports[2].global_rename_alias(), Some("C"));
        assert_eq!(
            imports[3].named_imports(),
            &[
                NamedImport::new("x", None),
                NamedImport::new("y", Some("z".to_string())),
            ]
        );
        assert_eq!(imports[3].statement, r#"import {x, y as z} from "lib/D.sol";"#);
    }

    #[test]
    fn test_import_statement_is_whitespace_normalized() {
        let source = "import   {\n  a,\n  b\n} from   './A.sol' ;";
        let statements = extract(source).unwrap();
        assert_eq!(statements.imports[0].statement, "import { a, b } from './A.sol' ;");
    }

    #[test]
    fn test_pragmas_and_license() {
        let source = r#"// SPDX-License-Identifier: MIT
pragma solidity >=0.8.0 <0.9.0;
pragma abicoder v2;

contract A {}
"#;
        let statements = extract(source).unwrap();

        assert_eq!(statements.pragmas.len(), 3);
        assert_eq!(statements.pragmas[0].kind, PragmaKind::License);
        assert_eq!(statements.pragmas[1].text, "pragma solidity >=0.8.0 <0.9.0;");
        assert_eq!(statements.pragmas[2].text, "pragma abicoder v2;");
        assert_eq!(statements.exports.len(), 1);
    }

    #[test]
    fn test_declaration_kinds() {
        let source = r#"
abstract contract Base is IBase(1) { function f() public virtual; }
interface IBase { }
library Math { function add(uint a, uint b) internal pure returns (uint) { return a + b; } }
struct Point { uint x; uint y; }
enum Color { Red, Green }
function helper(uint[] memory xs) pure returns (uint) { return xs.length; }
error Unauthorized(address caller);
event Log(string message);
type Price is uint128;
uint256 constant MAX_SUPPLY = 10 ** 18;
using Math for uint256 global;
"#;
        let statements = extract(source).unwrap();
        let kinds: Vec<_> = statements
            .exports
            .iter()
            .map(|e| (e.declaration_kind().unwrap(), e.name.as_str()))
            .collect();

        assert_eq!(
            kinds,
            vec![
                (DeclarationKind::AbstractContract, "Base"),
                (DeclarationKind::Interface, "IBase"),
                (DeclarationKind::Library, "Math"),
                (DeclarationKind::Struct, "Point"),
                (DeclarationKind::Enum, "Color"),
                (DeclarationKind::Function, "helper"),
                (DeclarationKind::Error, "Unauthorized"),
                (DeclarationKind::Event, "Log"),
                (DeclarationKind::UserDefinedValueType, "Price"),
                (DeclarationKind::Constant, "MAX_SUPPLY"),
                (DeclarationKind::UsingDirective, "using Math for uint256 global"),
            ]
        );
    }

    #[test]
    fn test_body_and_name_span() {
        let source = "\n\ncontract Token is ERC20 {\n    uint x = 1;\n}\n";
        let statements = extract(source).unwrap();
        let item = &statements.exports[0];

        assert_eq!(item.body, "contract Token is ERC20 {\n    uint x = 1;\n}");
        assert_eq!(item.valid_name_span(), item.name_span);
        assert_eq!(&item.body[item.name_span.unwrap().range()], "Token");
        assert_eq!(&source[item.span.range()], item.body);
    }

    #[test]
    fn test_comments_in_source_order() {
        let source = r#"
/// @title First
contract A {}
// trailing note
/* block */
contract B {}
"#;
        let statements = extract(source).unwrap();
        let items: Vec<_> = statements
            .exports
            .iter()
            .map(|e| if e.is_comment() { e.body.as_str() } else { e.name.as_str() })
            .collect();

        assert_eq!(items, vec!["/// @title First", "A", "// trailing note", "/* block */", "B"]);
    }

    #[test]
    fn test_nested_braces_and_strings_in_body() {
        let source = r#"contract A { string s = "}"; function f() { if (true) { } } }
contract B {}"#;
        let statements = extract(source).unwrap();
        assert_eq!(statements.exports.len(), 2);
        assert_eq!(statements.exports[1].name, "B");
    }

    #[test]
    fn test_unclosed_block_is_an_error() {
        let err = extract("contract A {\n function f() {").unwrap_err();
        assert!(err.message.contains("Unclosed"));
    }

    #[test]
    fn test_malformed_import_is_an_error() {
        let err = extract("import {a} \"./A.sol\";").unwrap_err();
        assert!(err.message.contains("Expected 'from'"));

        let err = extract("import {} from \"./A.sol\";").unwrap_err();
        assert!(err.message.contains("at least one symbol"));
    }

    #[test]
    fn test_lexical_error_is_reported() {
        let err = extract("contract A { string s = \"open\n; }").unwrap_err();
        assert_eq!(err.message, "Unterminated string literal");
    }

    #[test]
    fn test_contextual_keywords_as_names() {
        let source = "struct from { uint x; }\nfunction error() pure {}\nimport {from, type as T} from \"./A.sol\";";
        let statements = extract(source).unwrap();

        let names: Vec<_> = statements.exports.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["from", "error"]);
        assert_eq!(statements.exports[0].valid_name_span(), Some(Span::new(7, 11)));

        let imported: Vec<_> = statements.imports[0]
            .named_imports()
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(imported, vec!["from", "type"]);
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let source = "\u{feff}pragma solidity ^0.8.0;\ncontract A {}";
        let statements = extract(source).unwrap();

        assert_eq!(statements.pragmas[0].text, "pragma solidity ^0.8.0;");
        assert_eq!(statements.exports[0].body, "contract A {}");
    }

    #[test]
    fn test_stray_statement_is_an_error() {
        let err = extract("uint256 x = 5;").unwrap_err();
        assert!(err.message.contains("Unexpected 'uint256'"));

        assert!(extract("}").is_err());
    }
}
