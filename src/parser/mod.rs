//! Import extraction for stylesheet sources.
//!
//! A hand-written lexer splits the source into tokens and a single forward
//! scan over those tokens collects the literal targets of every
//! `@import` / `@use` / `@forward` directive.

pub mod dialect;
pub mod imports;
pub mod tokenizer;

pub use dialect::Dialect;
pub use imports::{extract_imports, SyntaxError};
pub use tokenizer::{tokenize, Token, TokenKind};

use std::path::Path;

/// Tokenize `source` and extract its import targets.
pub fn parse_imports(source: &str, dialect: Dialect) -> Result<Vec<String>, SyntaxError> {
    extract_imports(&tokenize(source), dialect)
}

/// Extract import targets from a file's contents, choosing the dialect
/// from the file extension.
pub fn extract_file(path: &Path, source: &str) -> Result<Vec<String>, SyntaxError> {
    parse_imports(source, Dialect::from_path(path))
}
