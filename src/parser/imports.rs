//! Extraction of `@import`, `@use` and `@forward` targets from a token stream.

use std::mem;
use thiserror::Error;

use super::dialect::Dialect;
use super::tokenizer::{Token, TokenKind};

/// Directive keywords that introduce dependency targets.
const DIRECTIVES: [&str; 3] = ["import", "use", "forward"];

/// An import directive opened inside another unterminated SCSS directive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid nested import directive on line {line}")]
pub struct SyntaxError {
    /// Line of the offending directive keyword (1-based).
    pub line: usize,
}

/// Extract the literal import targets from `tokens`, in source order.
///
/// Quoted targets are taken whole. Bare targets (`@import foo/bar`) are
/// stitched together from adjacent identifier and `/` tokens until the next
/// whitespace, comma or `;`. Anything inside parentheses is ignored, as are
/// words that follow a completed target in the same clause (`as ns`,
/// `with (...)`, media queries).
///
/// In the indented dialect a directive ends with its line unless the line
/// ends where a target is still expected (after the keyword or a comma),
/// and a new directive may start without the previous one being terminated.
pub fn extract_imports(tokens: &[Token<'_>], dialect: Dialect) -> Result<Vec<String>, SyntaxError> {
    let mut targets = Vec::new();
    let mut pending = String::new();
    let mut in_import = false;
    let mut paren_depth = 0usize;
    // Whether a bare word may start (or continue) a target here.
    let mut at_target = false;
    let mut prev: Option<&Token<'_>> = None;

    for token in tokens {
        let in_parens = paren_depth > 0;
        let opens_directive = token.kind == TokenKind::Ident
            && DIRECTIVES.contains(&token.text)
            && prev.is_some_and(|p| p.kind == TokenKind::At);
        let is_comma = token.kind == TokenKind::Other && token.text == ",";

        if in_import && !in_parens && token.kind == TokenKind::Str {
            targets.push(token.text.to_string());
            at_target = false;
        } else if opens_directive {
            if in_import && dialect == Dialect::Braced {
                return Err(SyntaxError { line: token.line });
            }
            in_import = true;
            at_target = true;
        } else if in_import
            && !in_parens
            && matches!(token.kind, TokenKind::Ident | TokenKind::Slash)
        {
            if at_target {
                pending.push_str(token.text);
            }
        } else if in_import
            && !in_parens
            && (matches!(token.kind, TokenKind::Space | TokenKind::Newline) || is_comma)
        {
            if !pending.is_empty() {
                targets.push(mem::take(&mut pending));
                at_target = false;
                if dialect == Dialect::Indented {
                    in_import = false;
                }
            }
            if is_comma {
                at_target = true;
            } else if dialect == Dialect::Indented
                && token.kind == TokenKind::Newline
                && !at_target
            {
                in_import = false;
            }
        } else if in_import && token.kind == TokenKind::Semicolon {
            in_import = false;
            paren_depth = 0;
            if !pending.is_empty() {
                targets.push(mem::take(&mut pending));
            }
        } else if in_import && token.kind == TokenKind::OpenParen {
            paren_depth += 1;
            pending.clear();
        } else if in_parens && token.kind == TokenKind::CloseParen {
            paren_depth -= 1;
        }

        prev = Some(token);
    }

    if !pending.is_empty() {
        targets.push(pending);
    }

    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_imports;

    fn scss(source: &str) -> Vec<String> {
        parse_imports(source, Dialect::Braced).unwrap()
    }

    fn sass(source: &str) -> Vec<String> {
        parse_imports(source, Dialect::Indented).unwrap()
    }

    #[test]
    fn test_comma_separated_strings() {
        assert_eq!(scss(r#"@import "a", "b";"#), vec!["a", "b"]);
    }

    #[test]
    fn test_indented_lines_close_each_directive() {
        assert_eq!(sass("@import a\n@import b\n"), vec!["a", "b"]);
        assert_eq!(sass("@import a\n@import b"), vec!["a", "b"]);
    }

    #[test]
    fn test_indented_quoted_targets() {
        assert_eq!(sass("@import \"a\"\n@import \"b\"\n"), vec!["a", "b"]);
    }

    #[test]
    fn test_indented_directive_ends_with_its_line() {
        let source = "@import \"a\"\n.x\n  margin: 0, colors\n";
        assert_eq!(sass(source), vec!["a"]);
        assert_eq!(sass("@use \"a\" as m\n.x\n  a: b, c\n"), vec!["a"]);
    }

    #[test]
    fn test_indented_directive_continues_after_trailing_comma() {
        assert_eq!(sass("@import \"a\",\n  \"b\"\n.x\n  c: d, e\n"), vec!["a", "b"]);
    }

    #[test]
    fn test_use_with_configuration() {
        assert_eq!(scss(r#"@use "pkg" with (x: 1)"#), vec!["pkg"]);
        assert_eq!(
            scss(r#"@use "pkg" with ($a: "ignored", $b: (nested: 2));"#),
            vec!["pkg"]
        );
    }

    #[test]
    fn test_use_namespace_is_not_a_target() {
        assert_eq!(scss(r#"@use "sass:math" as m;"#), vec!["sass:math"]);
        assert_eq!(scss(r#"@forward "src/list" hide list-reset;"#), vec!["src/list"]);
    }

    #[test]
    fn test_nested_braced_import_is_an_error() {
        let err = parse_imports("@import \"a\"\n@import \"b\";", Dialect::Braced).unwrap_err();
        assert_eq!(err, SyntaxError { line: 2 });
    }

    #[test]
    fn test_nested_indented_import_is_allowed() {
        assert_eq!(sass("@import \"a\"\n@import \"b\""), vec!["a", "b"]);
    }

    #[test]
    fn test_bare_path_targets() {
        assert_eq!(scss("@import foo/bar/_baz.scss;"), vec!["foo/bar/_baz.scss"]);
        assert_eq!(scss("@import a, b/c;"), vec!["a", "b/c"]);
        assert_eq!(sass("@import ../shared/vars\n"), vec!["../shared/vars"]);
    }

    #[test]
    fn test_bare_target_without_terminator() {
        assert_eq!(scss("@import foo"), vec!["foo"]);
    }

    #[test]
    fn test_parenthesised_text_is_discarded() {
        assert_eq!(scss("@import url(foo.css);"), Vec::<String>::new());
        assert_eq!(scss(r#"@import url("foo.css"), "b";"#), vec!["b"]);
    }

    #[test]
    fn test_media_query_is_not_a_target() {
        assert_eq!(scss(r#"@import "print" screen;"#), vec!["print"]);
    }

    #[test]
    fn test_multiple_statements() {
        let source = r#"
// @import "commented";
@import "variables";
@use 'mixins';

.btn {
  color: red;
  @include button;
}
@import "a", 'b';
"#;
        assert_eq!(scss(source), vec!["variables", "mixins", "a", "b"]);
    }

    #[test]
    fn test_other_at_rules_are_ignored() {
        assert_eq!(scss("@media screen { a { b: c; } }\n@include foo;"), Vec::<String>::new());
        assert_eq!(scss("@ import \"x\";"), Vec::<String>::new());
    }

    #[test]
    fn test_multiline_braced_directive() {
        assert_eq!(scss("@import\n  \"a\",\n  \"b\";\n"), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_source() {
        assert!(scss("").is_empty());
        assert!(sass("").is_empty());
    }
}
