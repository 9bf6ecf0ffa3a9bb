//! `hstore` key-value columns.
//!
//! Maps are written as `'"k"=>"v","k2"=>NULL'`. The server prints them back
//! in the same shape, separated by `, `.

use std::collections::BTreeMap;

use oxide_sql_core::schema::{FieldCodec, HostType};
use oxide_sql_core::{DialectError, Result, SqlValue};

use crate::literal::{self, Cursor};

/// Codec for string-keyed string maps stored as `hstore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HstoreCodec {
    host_type: HostType,
}

impl HstoreCodec {
    /// Creates a codec for a field of `host_type`.
    #[must_use]
    pub const fn new(host_type: HostType) -> Self {
        Self { host_type }
    }

    /// Fails unless the host type is a map from `String` to (optional)
    /// `String`.
    fn check_host(&self) -> Result<()> {
        match self.host_type.indirect() {
            HostType::Map(key, value)
                if *key.indirect() == HostType::String && *value.indirect() == HostType::String =>
            {
                Ok(())
            }
            other => Err(DialectError::type_mismatch("Map<String, String>", other.to_string())),
        }
    }
}

impl FieldCodec for HstoreCodec {
    fn append(&self, buf: &mut String, value: &SqlValue) -> Result<()> {
        self.check_host()?;
        let map = match value {
            SqlValue::Null => {
                buf.push_str("NULL");
                return Ok(());
            }
            SqlValue::Map(map) => map,
            other => return Err(DialectError::type_mismatch("map", other.kind())),
        };

        let mut text = String::new();
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                text.push(',');
            }
            literal::append_quoted_element(&mut text, key);
            text.push_str("=>");
            match value {
                SqlValue::Null => text.push_str("NULL"),
                SqlValue::Text(s) => literal::append_quoted_element(&mut text, s),
                other => {
                    return Err(DialectError::type_mismatch("text hstore value", other.kind()));
                }
            }
        }
        literal::append_sql_quoted(buf, &text);
        Ok(())
    }

    fn scan(&self, src: &SqlValue) -> Result<SqlValue> {
        self.check_host()?;
        match literal::literal_text(src)? {
            Some(text) => parse_hstore(text).map(SqlValue::Map),
            None => Ok(SqlValue::Null),
        }
    }
}

const UNQUOTED_STOP: &[char] = &[',', '=', '>', '"'];

fn parse_hstore(text: &str) -> Result<BTreeMap<String, SqlValue>> {
    let mut cursor = Cursor::new(text);
    let mut map = BTreeMap::new();

    cursor.skip_whitespace();
    if cursor.is_eof() {
        return Ok(map);
    }

    loop {
        cursor.skip_whitespace();
        let key = if cursor.peek() == Some('"') {
            cursor.scan_quoted()?
        } else {
            let position = cursor.pos();
            let token = cursor.scan_unquoted(UNQUOTED_STOP);
            if token.is_empty() {
                return Err(cursor.error("expected hstore key"));
            }
            if token.eq_ignore_ascii_case("NULL") {
                return Err(DialectError::parse(position, "hstore key cannot be NULL"));
            }
            token.to_string()
        };

        cursor.skip_whitespace();
        cursor.expect("=>")?;
        cursor.skip_whitespace();

        let value = if cursor.peek() == Some('"') {
            SqlValue::Text(cursor.scan_quoted()?)
        } else {
            let token = cursor.scan_unquoted(UNQUOTED_STOP);
            if token.is_empty() {
                return Err(cursor.error("expected hstore value"));
            }
            if token.eq_ignore_ascii_case("NULL") {
                SqlValue::Null
            } else {
                SqlValue::Text(token.to_string())
            }
        };
        map.insert(key, value);

        cursor.skip_whitespace();
        match cursor.peek() {
            None => return Ok(map),
            Some(',') => {
                cursor.advance();
            }
            Some(_) => return Err(cursor.error("expected `,` or end of input")),
        }
    }
}
