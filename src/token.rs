//! Forward-only JSON tokenizer.
//!
//! [`Scanner`] walks RFC 8259 text and yields structural tokens one at a time.
//! Commas and colons are validated and consumed internally, so callers only
//! ever see values and container boundaries. Object keys are delivered as
//! [`Token::String`]; the caller knows from context whether it is reading a
//! key or a value.
//!
//! ```rust
//! use rpcjson::token::{Scanner, Token};
//!
//! let mut scanner = Scanner::new(r#"{"a": [1, "x"]}"#);
//! assert_eq!(scanner.next_token().unwrap(), Token::ObjectBegin);
//! assert_eq!(scanner.next_token().unwrap(), Token::String("a".into()));
//! assert_eq!(scanner.next_token().unwrap(), Token::ArrayBegin);
//! assert_eq!(scanner.next_token().unwrap(), Token::Number("1"));
//! assert_eq!(scanner.next_token().unwrap(), Token::String("x".into()));
//! assert_eq!(scanner.next_token().unwrap(), Token::ArrayEnd);
//! assert_eq!(scanner.next_token().unwrap(), Token::ObjectEnd);
//! assert_eq!(scanner.next_token().unwrap(), Token::End);
//! ```

use crate::{DecodeOptions, Error, Result};
use std::borrow::Cow;

/// The category of a token, available without consuming it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    ObjectBegin,
    ObjectEnd,
    ArrayBegin,
    ArrayEnd,
    True,
    False,
    Null,
    Number,
    String,
    End,
}

impl TokenKind {
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            TokenKind::ObjectBegin => "object",
            TokenKind::ObjectEnd => "'}'",
            TokenKind::ArrayBegin => "array",
            TokenKind::ArrayEnd => "']'",
            TokenKind::True | TokenKind::False => "boolean",
            TokenKind::Null => "null",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::End => "end of input",
        }
    }
}

/// A single JSON token.
///
/// Numbers are kept as their source text so the consumer decides how to
/// interpret them. Strings borrow from the input unless they contain escapes.
#[derive(Clone, Debug, PartialEq)]
pub enum Token<'de> {
    ObjectBegin,
    ObjectEnd,
    ArrayBegin,
    ArrayEnd,
    True,
    False,
    Null,
    Number(&'de str),
    String(Cow<'de, str>),
    End,
}

impl Token<'_> {
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::ObjectBegin => TokenKind::ObjectBegin,
            Token::ObjectEnd => TokenKind::ObjectEnd,
            Token::ArrayBegin => TokenKind::ArrayBegin,
            Token::ArrayEnd => TokenKind::ArrayEnd,
            Token::True => TokenKind::True,
            Token::False => TokenKind::False,
            Token::Null => TokenKind::Null,
            Token::Number(_) => TokenKind::Number,
            Token::String(_) => TokenKind::String,
            Token::End => TokenKind::End,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

/// What the grammar allows at the current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Expect {
    Value,
    /// Right after `[`.
    ValueOrEnd,
    /// Right after `{`.
    KeyOrEnd,
    /// After a `,` inside an object.
    Key,
    CommaOrEnd,
    Done,
}

/// Forward-only JSON token cursor over an in-memory document.
#[derive(Clone, Debug)]
pub struct Scanner<'de> {
    input: &'de str,
    position: usize,
    containers: Vec<Container>,
    expect: Expect,
    peeked: Option<Token<'de>>,
    max_depth: usize,
    max_string_len: usize,
}

impl<'de> Scanner<'de> {
    /// Creates a scanner with default limits.
    #[must_use]
    pub fn new(input: &'de str) -> Self {
        Self::with_options(input, &DecodeOptions::default())
    }

    /// Creates a scanner using the depth and string limits of `options`.
    #[must_use]
    pub fn with_options(input: &'de str, options: &DecodeOptions) -> Self {
        Scanner {
            input,
            position: 0,
            containers: Vec::new(),
            expect: Expect::Value,
            peeked: None,
            max_depth: options.max_depth,
            max_string_len: options.max_string_len,
        }
    }

    /// Byte offset of the cursor.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Line and column (both 1-based) of a byte offset.
    #[must_use]
    pub fn location(&self, offset: usize) -> (usize, usize) {
        let before = &self.input[..offset.min(self.input.len())];
        let line = before.bytes().filter(|&b| b == b'\n').count() + 1;
        let col = match before.rfind('\n') {
            Some(nl) => before[nl + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };
        (line, col)
    }

    fn syntax_error(&self, msg: &str) -> Error {
        let (line, col) = self.location(self.position);
        Error::syntax(line, col, msg)
    }

    fn eof_error(&self, expected: &str) -> Error {
        let (line, col) = self.location(self.position);
        Error::unexpected_eof(line, col, expected)
    }

    #[inline]
    fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek_byte() {
            if matches!(b, b' ' | b'\t' | b'\n' | b'\r') {
                self.position += 1;
            } else {
                break;
            }
        }
    }

    /// Kind of the next token, without consuming it.
    pub fn peek_kind(&mut self) -> Result<TokenKind> {
        if let Some(token) = &self.peeked {
            return Ok(token.kind());
        }
        let token = self.scan()?;
        let kind = token.kind();
        self.peeked = Some(token);
        Ok(kind)
    }

    /// Consumes and returns the next token.
    pub fn next_token(&mut self) -> Result<Token<'de>> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.scan(),
        }
    }

    /// Consumes the next token with a tighter bound on string length than
    /// the scanner's own limit.
    pub fn next_token_bounded(&mut self, max_string_len: usize) -> Result<Token<'de>> {
        let token = self.next_token()?;
        if let Token::String(s) = &token {
            if s.len() > max_string_len {
                return Err(Error::StringTooLong {
                    len: s.len(),
                    max: max_string_len,
                });
            }
        }
        Ok(token)
    }

    /// Consumes one complete value, including everything nested inside it.
    pub fn skip_value(&mut self) -> Result<()> {
        let mut depth = 0usize;
        loop {
            match self.next_token()? {
                Token::ObjectBegin | Token::ArrayBegin => depth += 1,
                Token::ObjectEnd | Token::ArrayEnd => {
                    if depth == 0 {
                        return Err(self.syntax_error("expected a value"));
                    }
                    depth -= 1;
                }
                Token::End => return Err(self.eof_error("a value")),
                _ => {}
            }
            if depth == 0 {
                return Ok(());
            }
        }
    }

    /// Succeeds only if nothing but whitespace remains.
    pub fn finish(&mut self) -> Result<()> {
        match self.next_token() {
            Ok(Token::End) => Ok(()),
            Ok(_) | Err(Error::Syntax { .. }) => {
                let (line, col) = self.location(self.position);
                Err(Error::TrailingCharacters { line, col })
            }
            Err(err) => Err(err),
        }
    }

    fn scan(&mut self) -> Result<Token<'de>> {
        self.skip_whitespace();
        match self.expect {
            Expect::Done => {
                if self.position < self.input.len() {
                    Err(self.syntax_error("trailing characters"))
                } else {
                    Ok(Token::End)
                }
            }
            Expect::Value => self.scan_value(),
            Expect::ValueOrEnd => {
                if self.peek_byte() == Some(b']') {
                    self.position += 1;
                    self.close(Container::Array)
                } else {
                    self.scan_value()
                }
            }
            Expect::KeyOrEnd => match self.peek_byte() {
                Some(b'}') => {
                    self.position += 1;
                    self.close(Container::Object)
                }
                _ => self.scan_key(),
            },
            Expect::Key => self.scan_key(),
            Expect::CommaOrEnd => match self.peek_byte() {
                Some(b',') => {
                    self.position += 1;
                    self.skip_whitespace();
                    match self.containers.last() {
                        Some(Container::Object) => self.scan_key(),
                        _ => self.scan_value(),
                    }
                }
                Some(b'}') if self.containers.last() == Some(&Container::Object) => {
                    self.position += 1;
                    self.close(Container::Object)
                }
                Some(b']') if self.containers.last() == Some(&Container::Array) => {
                    self.position += 1;
                    self.close(Container::Array)
                }
                Some(_) => Err(self.syntax_error("expected ',' or closing bracket")),
                None => Err(self.eof_error("',' or closing bracket")),
            },
        }
    }

    fn close(&mut self, container: Container) -> Result<Token<'de>> {
        self.containers.pop();
        self.after_value();
        Ok(match container {
            Container::Object => Token::ObjectEnd,
            Container::Array => Token::ArrayEnd,
        })
    }

    fn open(&mut self, container: Container) -> Result<Token<'de>> {
        if self.containers.len() >= self.max_depth {
            return Err(Error::DepthLimitExceeded(self.max_depth));
        }
        self.position += 1;
        self.containers.push(container);
        Ok(match container {
            Container::Object => {
                self.expect = Expect::KeyOrEnd;
                Token::ObjectBegin
            }
            Container::Array => {
                self.expect = Expect::ValueOrEnd;
                Token::ArrayBegin
            }
        })
    }

    fn after_value(&mut self) {
        self.expect = if self.containers.is_empty() {
            Expect::Done
        } else {
            Expect::CommaOrEnd
        };
    }

    fn scan_key(&mut self) -> Result<Token<'de>> {
        match self.peek_byte() {
            Some(b'"') => {}
            Some(_) => return Err(self.syntax_error("expected object key")),
            None => return Err(self.eof_error("object key")),
        }
        let key = self.scan_string()?;
        self.skip_whitespace();
        match self.peek_byte() {
            Some(b':') => self.position += 1,
            Some(_) => return Err(self.syntax_error("expected ':' after key")),
            None => return Err(self.eof_error("':'")),
        }
        self.expect = Expect::Value;
        Ok(Token::String(key))
    }

    fn scan_value(&mut self) -> Result<Token<'de>> {
        let token = match self.peek_byte() {
            Some(b'{') => return self.open(Container::Object),
            Some(b'[') => return self.open(Container::Array),
            Some(b'"') => Token::String(self.scan_string()?),
            Some(b't') => {
                self.scan_literal("true")?;
                Token::True
            }
            Some(b'f') => {
                self.scan_literal("false")?;
                Token::False
            }
            Some(b'n') => {
                self.scan_literal("null")?;
                Token::Null
            }
            Some(b) if b == b'-' || b.is_ascii_digit() => Token::Number(self.scan_number()?),
            Some(_) => return Err(self.syntax_error("expected a value")),
            None => return Err(self.eof_error("a value")),
        };
        self.after_value();
        Ok(token)
    }

    fn scan_literal(&mut self, literal: &str) -> Result<()> {
        if self.input[self.position..].starts_with(literal) {
            self.position += literal.len();
            Ok(())
        } else {
            Err(self.syntax_error(&format!("expected `{}`", literal)))
        }
    }

    fn scan_number(&mut self) -> Result<&'de str> {
        let input = self.input;
        let bytes = input.as_bytes();
        let start = self.position;
        let mut pos = self.position;

        if bytes.get(pos) == Some(&b'-') {
            pos += 1;
        }
        match bytes.get(pos) {
            Some(b'0') => pos += 1,
            Some(b) if b.is_ascii_digit() => {
                while bytes.get(pos).map_or(false, u8::is_ascii_digit) {
                    pos += 1;
                }
            }
            _ => {
                self.position = pos;
                return Err(self.syntax_error("expected digit"));
            }
        }
        if bytes.get(pos) == Some(&b'.') {
            pos += 1;
            if !bytes.get(pos).map_or(false, u8::is_ascii_digit) {
                self.position = pos;
                return Err(self.syntax_error("expected digit after '.'"));
            }
            while bytes.get(pos).map_or(false, u8::is_ascii_digit) {
                pos += 1;
            }
        }
        if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
            pos += 1;
            if matches!(bytes.get(pos), Some(b'+') | Some(b'-')) {
                pos += 1;
            }
            if !bytes.get(pos).map_or(false, u8::is_ascii_digit) {
                self.position = pos;
                return Err(self.syntax_error("expected digit in exponent"));
            }
            while bytes.get(pos).map_or(false, u8::is_ascii_digit) {
                pos += 1;
            }
        }

        self.position = pos;
        Ok(&input[start..pos])
    }

    fn scan_string(&mut self) -> Result<Cow<'de, str>> {
        self.position += 1; // opening quote
        let input = self.input;
        let bytes = input.as_bytes();
        let start = self.position;
        let mut owned: Option<String> = None;
        let mut run_start = start;

        loop {
            let Some(&b) = bytes.get(self.position) else {
                return Err(self.eof_error("closing '\"'"));
            };
            match b {
                b'"' => {
                    let s = match owned {
                        Some(mut s) => {
                            s.push_str(&input[run_start..self.position]);
                            Cow::Owned(s)
                        }
                        None => Cow::Borrowed(&input[start..self.position]),
                    };
                    self.position += 1;
                    if s.len() > self.max_string_len {
                        return Err(Error::StringTooLong {
                            len: s.len(),
                            max: self.max_string_len,
                        });
                    }
                    return Ok(s);
                }
                b'\\' => {
                    let s = owned.get_or_insert_with(String::new);
                    s.push_str(&input[run_start..self.position]);
                    self.position += 1;
                    let ch = self.scan_escape()?;
                    if let Some(s) = owned.as_mut() {
                        s.push(ch);
                        if s.len() > self.max_string_len {
                            return Err(Error::StringTooLong {
                                len: s.len(),
                                max: self.max_string_len,
                            });
                        }
                    }
                    run_start = self.position;
                }
                0x00..=0x1f => {
                    return Err(self.syntax_error("control character in string"));
                }
                _ => self.position += 1,
            }
        }
    }

    fn scan_escape(&mut self) -> Result<char> {
        let Some(b) = self.peek_byte() else {
            return Err(self.eof_error("escape sequence"));
        };
        self.position += 1;
        Ok(match b {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{0008}',
            b'f' => '\u{000C}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => {
                let high = self.scan_hex4()?;
                if (0xD800..0xDC00).contains(&high) {
                    if !self.input[self.position..].starts_with("\\u") {
                        return Err(self.syntax_error("unpaired surrogate in \\u escape"));
                    }
                    self.position += 2;
                    let low = self.scan_hex4()?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(self.syntax_error("invalid low surrogate in \\u escape"));
                    }
                    let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                    char::from_u32(code)
                        .ok_or_else(|| self.syntax_error("invalid unicode code point"))?
                } else {
                    char::from_u32(high)
                        .ok_or_else(|| self.syntax_error("unpaired surrogate in \\u escape"))?
                }
            }
            _ => return Err(self.syntax_error("invalid escape sequence")),
        })
    }

    fn scan_hex4(&mut self) -> Result<u32> {
        let digits = self
            .input
            .get(self.position..self.position + 4)
            .ok_or_else(|| self.eof_error("4 hex digits"))?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(self.syntax_error("expected 4 hex digits in \\u escape"));
        }
        let code = u32::from_str_radix(digits, 16)
            .map_err(|_| self.syntax_error("expected 4 hex digits in \\u escape"))?;
        self.position += 4;
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn tokens(input: &str) -> Result<Vec<Token<'_>>> {
        let mut scanner = Scanner::new(input);
        let mut out = Vec::new();
        loop {
            let token = scanner.next_token()?;
            if token == Token::End {
                return Ok(out);
            }
            out.push(token);
        }
    }

    #[test]
    fn test_scalars() {
        assert_eq!(tokens("true").unwrap(), vec![Token::True]);
        assert_eq!(tokens(" null ").unwrap(), vec![Token::Null]);
        assert_eq!(tokens("-1.5e+3").unwrap(), vec![Token::Number("-1.5e+3")]);
        assert_eq!(
            tokens("\"a\\nb\"").unwrap(),
            vec![Token::String(Cow::Owned("a\nb".to_string()))]
        );
    }

    #[test]
    fn test_nested_containers() {
        let toks = tokens(r#"{"a":[],"b":{}}"#).unwrap();
        assert_eq!(
            toks,
            vec![
                Token::ObjectBegin,
                Token::String("a".into()),
                Token::ArrayBegin,
                Token::ArrayEnd,
                Token::String("b".into()),
                Token::ObjectBegin,
                Token::ObjectEnd,
                Token::ObjectEnd,
            ]
        );
    }

    #[test]
    fn test_unescaped_strings_borrow() {
        let mut scanner = Scanner::new("\"plain\"");
        match scanner.next_token().unwrap() {
            Token::String(Cow::Borrowed(s)) => assert_eq!(s, "plain"),
            other => panic!("expected borrowed string, got {:?}", other),
        }
    }

    #[test]
    fn test_unicode_escapes() {
        assert_eq!(
            tokens(r#""\u00e9\ud83d\ude00""#).unwrap(),
            vec![Token::String("é😀".into())]
        );
        assert!(tokens(r#""\ud83d""#).is_err());
    }

    #[test]
    fn test_syntax_errors() {
        for bad in ["[1,]", "{\"a\" 1}", "[1 2]", "01", "1.", "tru", "{,}", "\"\u{1}\""] {
            assert!(tokens(bad).is_err(), "accepted {:?}", bad);
        }
        assert_eq!(tokens("[1").unwrap_err().kind(), ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_error_location() {
        let err = tokens("[\n  1,\n  x]").unwrap_err();
        match err {
            Error::Syntax { line, col, .. } => {
                assert_eq!(line, 3);
                assert_eq!(col, 3);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut scanner = Scanner::new("[true]");
        assert_eq!(scanner.peek_kind().unwrap(), TokenKind::ArrayBegin);
        assert_eq!(scanner.peek_kind().unwrap(), TokenKind::ArrayBegin);
        assert_eq!(scanner.next_token().unwrap(), Token::ArrayBegin);
        assert_eq!(scanner.peek_kind().unwrap(), TokenKind::True);
    }

    #[test]
    fn test_skip_value() {
        let mut scanner = Scanner::new(r#"[{"a":[1,{"b":2}]}, 7]"#);
        assert_eq!(scanner.next_token().unwrap(), Token::ArrayBegin);
        scanner.skip_value().unwrap();
        assert_eq!(scanner.next_token().unwrap(), Token::Number("7"));
        assert_eq!(scanner.next_token().unwrap(), Token::ArrayEnd);
        scanner.finish().unwrap();
    }

    #[test]
    fn test_trailing_characters() {
        let mut scanner = Scanner::new("1 2");
        scanner.next_token().unwrap();
        assert_eq!(
            scanner.finish().unwrap_err().kind(),
            ErrorKind::TrailingCharacters
        );
    }

    #[test]
    fn test_limits() {
        let options = DecodeOptions::new().with_max_depth(2);
        let mut scanner = Scanner::with_options("[[[1]]]", &options);
        scanner.next_token().unwrap();
        scanner.next_token().unwrap();
        assert_eq!(
            scanner.next_token().unwrap_err().kind(),
            ErrorKind::DepthLimitExceeded
        );

        let options = DecodeOptions::new().with_max_string_len(3);
        let mut scanner = Scanner::with_options("\"abcd\"", &options);
        assert_eq!(
            scanner.next_token().unwrap_err().kind(),
            ErrorKind::StringTooLong
        );

        let mut scanner = Scanner::new("\"abcd\"");
        assert_eq!(
            scanner.next_token_bounded(2).unwrap_err().kind(),
            ErrorKind::StringTooLong
        );
    }
}
