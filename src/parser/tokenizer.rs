//! A small lexer for SCSS and indented Sass sources.
//!
//! Only the token classes the import extractor cares about are
//! distinguished; everything else is reported as [`TokenKind::Other`].
//! Tokens borrow their text from the source.

/// The class of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A run of word characters (`foo`, `bar-baz`, `_x.scss`).
    Ident,
    /// The contents of a quoted string, without the quotes.
    Str,
    /// A single `/`.
    Slash,
    /// Spaces, tabs, carriage returns and form feeds.
    Space,
    /// A single `\n`.
    Newline,
    OpenParen,
    CloseParen,
    /// `;`
    Semicolon,
    /// `@`
    At,
    /// Comments and any other punctuation.
    Other,
}

/// A token with the text it covers and the line it starts on (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub line: usize,
}

/// Split `source` into tokens. Never fails: unterminated strings and
/// comments run to the end of the line or input.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut lexer = Lexer {
        src: source,
        bytes: source.as_bytes(),
        pos: 0,
        line: 1,
        depth: 0,
    };
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token() {
        tokens.push(token);
    }
    tokens
}

fn is_ident_byte(b: u8) -> bool {
    // Bytes >= 0x80 belong to multi-byte UTF-8 sequences; keeping them in
    // identifiers means slices only ever split at ASCII bytes.
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~') || b >= 0x80
}

fn is_space_byte(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | 0x0c)
}

struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    /// Parenthesis nesting; `//` only starts a comment at depth zero so
    /// that `url(http://...)` stays intact.
    depth: usize,
}

impl<'a> Lexer<'a> {
    fn next_token(&mut self) -> Option<Token<'a>> {
        let start = self.pos;
        let line = self.line;
        let b = *self.bytes.get(start)?;

        let kind = match b {
            b'\n' => {
                self.pos += 1;
                self.line += 1;
                TokenKind::Newline
            }
            b if is_space_byte(b) => {
                self.take_while(is_space_byte);
                TokenKind::Space
            }
            b'"' | b'\'' => return Some(self.string(b)),
            b'/' => match self.bytes.get(start + 1).copied() {
                Some(b'/') if self.depth == 0 => {
                    self.take_while(|b| b != b'\n');
                    TokenKind::Other
                }
                Some(b'*') => {
                    self.block_comment();
                    TokenKind::Other
                }
                _ => {
                    self.pos += 1;
                    TokenKind::Slash
                }
            },
            b'(' => {
                self.pos += 1;
                self.depth += 1;
                TokenKind::OpenParen
            }
            b')' => {
                self.pos += 1;
                self.depth = self.depth.saturating_sub(1);
                TokenKind::CloseParen
            }
            b';' => {
                self.pos += 1;
                TokenKind::Semicolon
            }
            b'@' => {
                self.pos += 1;
                TokenKind::At
            }
            b if is_ident_byte(b) => {
                self.take_while(is_ident_byte);
                TokenKind::Ident
            }
            _ => {
                self.pos += 1;
                TokenKind::Other
            }
        };

        Some(Token {
            kind,
            text: &self.src[start..self.pos],
            line,
        })
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.bytes.get(self.pos).is_some_and(|&b| pred(b)) {
            self.pos += 1;
        }
    }

    fn string(&mut self, quote: u8) -> Token<'a> {
        let line = self.line;
        let content_start = self.pos + 1;
        let mut end = content_start;
        while let Some(&b) = self.bytes.get(end) {
            match b {
                b'\\' if end + 1 < self.bytes.len() && self.bytes[end + 1] != b'\n' => end += 2,
                b'\n' => break,
                b if b == quote => break,
                _ => end += 1,
            }
        }
        let closed = self.bytes.get(end) == Some(&quote);
        self.pos = if closed { end + 1 } else { end };
        Token {
            kind: TokenKind::Str,
            text: &self.src[content_start..end],
            line,
        }
    }

    fn block_comment(&mut self) {
        self.pos += 2;
        while self.pos < self.bytes.len() {
            if self.bytes[self.pos] == b'*' && self.bytes.get(self.pos + 1) == Some(&b'/') {
                self.pos += 2;
                return;
            }
            if self.bytes[self.pos] == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
        }
    }
}
