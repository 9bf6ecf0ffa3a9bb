//! Helpers shared by the array and hstore literal codecs.

use oxide_sql_core::{DialectError, Result};

/// Appends `s` as an SQL string literal, doubling single quotes.
pub fn append_sql_quoted(buf: &mut String, s: &str) {
    buf.push('\'');
    for c in s.chars() {
        match c {
            '\'' => buf.push_str("''"),
            // PostgreSQL text cannot hold NUL.
            '\0' => {}
            _ => buf.push(c),
        }
    }
    buf.push('\'');
}

/// Appends `s` double-quoted, escaping `"` and `\` with a backslash.
pub fn append_quoted_element(buf: &mut String, s: &str) {
    buf.push('"');
    for c in s.chars() {
        match c {
            '"' | '\\' => {
                buf.push('\\');
                buf.push(c);
            }
            '\0' => {}
            _ => buf.push(c),
        }
    }
    buf.push('"');
}

/// Appends `n` as the `i32` with the same bit pattern.
pub fn append_uint32(buf: &mut String, n: u32) {
    buf.push_str(&i32::from_ne_bytes(n.to_ne_bytes()).to_string());
}

/// Appends `n` as the `i64` with the same bit pattern.
pub fn append_uint64(buf: &mut String, n: u64) {
    buf.push_str(&i64::from_ne_bytes(n.to_ne_bytes()).to_string());
}

/// Appends lowercase hex digits of `bytes`.
pub fn append_hex(buf: &mut String, bytes: &[u8]) {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    for byte in bytes {
        buf.push(char::from(DIGITS[usize::from(byte >> 4)]));
        buf.push(char::from(DIGITS[usize::from(byte & 0x0f)]));
    }
}

/// Decodes the `\x<hex>` bytea output format.
pub fn decode_bytea(s: &str) -> Option<Vec<u8>> {
    let hex = s.strip_prefix("\\x")?.as_bytes();
    if hex.len() % 2 == 1 {
        return None;
    }
    hex.chunks(2)
        .map(|pair| Some((hex_value(pair[0])? << 4) | hex_value(pair[1])?))
        .collect()
}

const fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Converts a driver value holding literal text into a `&str`.
pub fn literal_text(src: &oxide_sql_core::SqlValue) -> Result<Option<&str>> {
    use oxide_sql_core::SqlValue;

    match src {
        SqlValue::Null => Ok(None),
        SqlValue::Text(s) => Ok(Some(s)),
        SqlValue::Blob(b) => std::str::from_utf8(b)
            .map(Some)
            .map_err(|e| DialectError::parse(e.valid_up_to(), "literal is not valid UTF-8")),
        other => Err(DialectError::type_mismatch("text literal", other.kind())),
    }
}

/// A cursor over literal text produced by the server.
pub struct Cursor<'a> {
    /// The input text.
    input: &'a str,
    /// The current byte position.
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// Returns the current character without advancing.
    pub fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns true if the remaining input starts with `s`.
    pub fn starts_with(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    /// Advances to the next character and returns it.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    pub const fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Consumes `expected` or fails.
    pub fn expect(&mut self, expected: &str) -> Result<()> {
        if self.starts_with(expected) {
            self.pos += expected.len();
            Ok(())
        } else if self.is_eof() {
            Err(self.error(format!("unexpected end of input, expected `{expected}`")))
        } else {
            Err(self.error(format!("expected `{expected}`")))
        }
    }

    /// Scans a double-quoted string, resolving backslash escapes.
    pub fn scan_quoted(&mut self) -> Result<String> {
        let start = self.pos;
        self.expect("\"")?;
        let mut out = String::new();
        loop {
            match self.advance() {
                Some('"') => return Ok(out),
                Some('\\') => match self.advance() {
                    Some(c) => out.push(c),
                    None => break,
                },
                Some(c) => out.push(c),
                None => break,
            }
        }
        Err(DialectError::parse(start, "unterminated quoted string"))
    }

    /// Scans an unquoted token up to (not including) any of `stop` or
    /// whitespace.
    pub fn scan_unquoted(&mut self, stop: &[char]) -> &'a str {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| !stop.contains(&c) && !c.is_whitespace())
        {
            self.advance();
        }
        &self.input[start..self.pos]
    }

    pub fn error(&self, message: impl Into<String>) -> DialectError {
        DialectError::parse(self.pos, message)
    }
}
