//! Token scanner for Rust and C/C++ sources.
//!
//! Only as much of each language is understood as finding enum declarations
//! requires: identifiers, numbers, char literals and punctuation come out as
//! tokens; whitespace, comments, string literals and (for C/C++)
//! preprocessor lines are skipped.

use memchr::{memchr, memmem};

use crate::error::GenError;
use crate::parser::SourceSyntax;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Number,
    /// Char literal, quotes included.
    Char,
    Punct,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'s> {
    pub kind: TokenKind,
    pub text: &'s str,
    pub line: u32,
}

impl Token<'_> {
    pub fn is_punct(&self, punct: &str) -> bool {
        self.kind == TokenKind::Punct && self.text == punct
    }

    pub fn is_ident(&self, ident: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == ident
    }
}

/// Longest punctuators first; only the ones enum bodies can contain matter.
const PUNCTS: &[&str] = &[
    "::", "<<", ">>", "->", "=>", "==", "!=", "<=", ">=", "&&", "||",
];

const CPP_RAW_PREFIXES: &[&[u8]] = &[b"u8R", b"uR", b"UR", b"LR", b"R"];

pub fn tokenize(source: &str, syntax: SourceSyntax) -> Result<Vec<Token<'_>>, GenError> {
    Lexer {
        source,
        bytes: source.as_bytes(),
        pos: 0,
        line: 1,
        syntax,
        at_line_start: true,
    }
    .run()
}

struct Lexer<'s> {
    source: &'s str,
    bytes: &'s [u8],
    pos: usize,
    line: u32,
    syntax: SourceSyntax,
    at_line_start: bool,
}

impl<'s> Lexer<'s> {
    fn run(mut self) -> Result<Vec<Token<'s>>, GenError> {
        let mut tokens = Vec::new();
        while self.pos < self.bytes.len() {
            let ch = self.bytes[self.pos];
            match ch {
                b'\n' => {
                    self.line += 1;
                    self.pos += 1;
                    self.at_line_start = true;
                    continue;
                }
                b' ' | b'\t' | b'\r' | 0x0c => {
                    self.pos += 1;
                    continue;
                }
                b'#' if self.syntax == SourceSyntax::Cpp && self.at_line_start => {
                    self.skip_preprocessor_line();
                    continue;
                }
                b'/' if self.peek(1) == Some(b'/') => {
                    self.skip_line_comment();
                    continue;
                }
                b'/' if self.peek(1) == Some(b'*') => {
                    self.skip_block_comment()?;
                    continue;
                }
                _ => {}
            }
            self.at_line_start = false;

            if let Some(hashes) = self.raw_string_prefix() {
                self.skip_raw_string(hashes)?;
                continue;
            }
            if ch == b'"' || (ch == b'b' && self.peek(1) == Some(b'"')) {
                if ch == b'b' {
                    self.pos += 1;
                }
                self.skip_quoted(b'"')?;
                continue;
            }
            if ch == b'\'' {
                if let Some(token) = self.char_or_lifetime()? {
                    tokens.push(token);
                }
                continue;
            }
            if ch.is_ascii_digit() {
                tokens.push(self.number());
                continue;
            }
            if is_ident_start(ch) {
                tokens.push(self.ident());
                continue;
            }
            if !ch.is_ascii() {
                return Err(GenError::syntax(
                    self.line,
                    "non-ASCII character outside a comment or string",
                ));
            }
            tokens.push(self.punct());
        }
        Ok(tokens)
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token<'s> {
        Token {
            kind,
            text: &self.source[start..self.pos],
            line: self.line,
        }
    }

    fn count_lines(&mut self, from: usize, to: usize) {
        self.line += memchr::memchr_iter(b'\n', &self.bytes[from..to]).count() as u32;
    }

    fn skip_line_comment(&mut self) {
        match memchr(b'\n', &self.bytes[self.pos..]) {
            Some(offset) => self.pos += offset,
            None => self.pos = self.bytes.len(),
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), GenError> {
        let start_line = self.line;
        let start = self.pos;
        self.pos += 2;
        if self.syntax == SourceSyntax::Cpp {
            let Some(offset) = memmem::find(&self.bytes[self.pos..], b"*/") else {
                return Err(GenError::syntax(start_line, "unterminated block comment"));
            };
            self.pos += offset + 2;
            self.count_lines(start, self.pos);
            return Ok(());
        }

        // Rust block comments nest.
        let mut depth = 1;
        while self.pos + 1 < self.bytes.len() {
            match (self.bytes[self.pos], self.bytes[self.pos + 1]) {
                (b'/', b'*') => {
                    depth += 1;
                    self.pos += 2;
                }
                (b'*', b'/') => {
                    depth -= 1;
                    self.pos += 2;
                    if depth == 0 {
                        self.count_lines(start, self.pos);
                        return Ok(());
                    }
                }
                _ => self.pos += 1,
            }
        }
        Err(GenError::syntax(start_line, "unterminated block comment"))
    }

    fn skip_preprocessor_line(&mut self) {
        // Backslash-newline continues the directive.
        loop {
            let end = match memchr(b'\n', &self.bytes[self.pos..]) {
                Some(offset) => self.pos + offset,
                None => {
                    self.pos = self.bytes.len();
                    return;
                }
            };
            let continued = self.bytes[self.pos..end]
                .iter()
                .rev()
                .find(|b| !matches!(b, b' ' | b'\t' | b'\r'))
                == Some(&b'\\');
            self.pos = end;
            if !continued {
                return;
            }
            self.line += 1;
            self.pos += 1;
        }
    }

    /// Returns the hash count (Rust) or delimiter length (C++) of a raw
    /// string starting here.
    fn raw_string_prefix(&self) -> Option<usize> {
        let rest = &self.bytes[self.pos..];
        match self.syntax {
            SourceSyntax::Rust => {
                let after_prefix = if rest.starts_with(b"br") {
                    2
                } else if rest.starts_with(b"r") {
                    1
                } else {
                    return None;
                };
                let hashes = rest[after_prefix..]
                    .iter()
                    .take_while(|&&b| b == b'#')
                    .count();
                (rest.get(after_prefix + hashes) == Some(&b'"')).then_some(hashes)
            }
            SourceSyntax::Cpp => {
                let after_prefix = CPP_RAW_PREFIXES
                    .iter()
                    .find(|prefix| rest.starts_with(prefix))?
                    .len();
                if rest.get(after_prefix) != Some(&b'"') {
                    return None;
                }
                let delimiter = rest[after_prefix + 1..]
                    .iter()
                    .take_while(|&&b| !is_raw_delimiter_end(b))
                    .count();
                Some(delimiter)
            }
        }
    }

    fn skip_raw_string(&mut self, len: usize) -> Result<(), GenError> {
        let start_line = self.line;
        let start = self.pos;
        let open = match memchr(b'"', &self.bytes[self.pos..]) {
            Some(offset) => self.pos + offset,
            None => return Err(GenError::syntax(start_line, "malformed raw string")),
        };
        let closing: Vec<u8> = match self.syntax {
            SourceSyntax::Rust => {
                let mut closing = vec![b'"'];
                closing.extend(std::iter::repeat_n(b'#', len));
                self.pos = open + 1;
                closing
            }
            SourceSyntax::Cpp => {
                let body = open + 1 + len;
                if len > MAX_RAW_DELIMITER || self.bytes.get(body) != Some(&b'(') {
                    return Err(GenError::syntax(start_line, "malformed raw string"));
                }
                let delimiter = &self.bytes[open + 1..body];
                let mut closing = vec![b')'];
                closing.extend_from_slice(delimiter);
                closing.push(b'"');
                self.pos = body + 1;
                closing
            }
        };
        let Some(offset) = memmem::find(&self.bytes[self.pos..], &closing) else {
            return Err(GenError::syntax(start_line, "unterminated raw string"));
        };
        self.pos += offset + closing.len();
        self.count_lines(start, self.pos);
        Ok(())
    }

    fn skip_quoted(&mut self, quote: u8) -> Result<(), GenError> {
        let start_line = self.line;
        let start = self.pos;
        self.pos += 1;
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'\\' => self.pos += 2,
                b if b == quote => {
                    self.pos += 1;
                    self.count_lines(start, self.pos.min(self.bytes.len()));
                    return Ok(());
                }
                _ => self.pos += 1,
            }
        }
        Err(GenError::syntax(start_line, "unterminated string literal"))
    }

    /// A char literal, or nothing for a Rust lifetime or label.
    fn char_or_lifetime(&mut self) -> Result<Option<Token<'s>>, GenError> {
        let start = self.pos;
        let is_char = match (self.peek(1), self.peek(2)) {
            (Some(b'\\'), _) => true,
            (Some(_), Some(b'\'')) => true,
            // Multi-byte UTF-8 char literal.
            (Some(b), _) if b >= 0x80 => true,
            _ => self.syntax == SourceSyntax::Cpp,
        };
        if !is_char {
            self.pos += 1;
            while self.pos < self.bytes.len() && is_ident_continue(self.bytes[self.pos]) {
                self.pos += 1;
            }
            return Ok(None);
        }
        self.skip_quoted(b'\'')?;
        Ok(Some(self.token(TokenKind::Char, start)))
    }

    fn number(&mut self) -> Token<'s> {
        let start = self.pos;
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            let separator = b == b'\''
                && self.syntax == SourceSyntax::Cpp
                && self.peek(1).is_some_and(|next| next.is_ascii_alphanumeric());
            if b.is_ascii_alphanumeric() || b == b'_' || separator {
                self.pos += 1;
            } else {
                break;
            }
        }
        self.token(TokenKind::Number, start)
    }

    fn ident(&mut self) -> Token<'s> {
        // Rust raw identifiers lex as the bare name.
        if self.syntax == SourceSyntax::Rust
            && self.bytes[self.pos] == b'r'
            && self.peek(1) == Some(b'#')
            && self.peek(2).is_some_and(is_ident_start)
        {
            self.pos += 2;
        }
        let start = self.pos;
        while self.pos < self.bytes.len() && is_ident_continue(self.bytes[self.pos]) {
            self.pos += 1;
        }
        self.token(TokenKind::Ident, start)
    }

    fn punct(&mut self) -> Token<'s> {
        let start = self.pos;
        let rest = &self.bytes[self.pos..];
        let len = PUNCTS
            .iter()
            .find(|punct| rest.starts_with(punct.as_bytes()))
            .map(|punct| punct.len())
            .unwrap_or(1);
        self.pos += len;
        self.token(TokenKind::Punct, start)
    }
}

/// Longest delimiter a C++ raw string may carry.
const MAX_RAW_DELIMITER: usize = 16;

/// Bytes that end a C++ raw string delimiter, `(` when well formed.
fn is_raw_delimiter_end(b: u8) -> bool {
    matches!(
        b,
        b'(' | b')' | b'\\' | b'"' | b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c
    )
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
