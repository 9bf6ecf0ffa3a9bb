//! Native array columns.
//!
//! Values are written as `'{1,2,3}'` and read back from the server's array
//! output, e.g. `{"a","b \"c\"",NULL}`. Elements are typed after the
//! field's sequence element type.
//!
//! Decoding is stricter than the server's array input: an unquoted element
//! may not contain whitespace, so `{a b}` is a parse error. The server
//! always quotes such elements in its output.

use std::str::FromStr;

use oxide_sql_core::schema::{FieldCodec, HostType};
use oxide_sql_core::{DialectError, Result, SqlValue};

use crate::literal::{self, Cursor};

/// Codec for fields stored as `PostgreSQL` arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayCodec {
    host_type: HostType,
}

impl ArrayCodec {
    /// Creates a codec for a field of `host_type`.
    ///
    /// A non-sequence host type is accepted here; every encode and decode
    /// then fails with a type mismatch.
    #[must_use]
    pub const fn new(host_type: HostType) -> Self {
        Self { host_type }
    }

    fn elem(&self) -> Result<&HostType> {
        self.host_type
            .elem()
            .ok_or_else(|| DialectError::type_mismatch("sequence", self.host_type.to_string()))
    }
}

impl FieldCodec for ArrayCodec {
    fn append(&self, buf: &mut String, value: &SqlValue) -> Result<()> {
        let elem = self.elem()?;
        match value {
            SqlValue::Null => {
                buf.push_str("NULL");
                Ok(())
            }
            SqlValue::Array(items) => {
                let mut text = String::new();
                append_array(&mut text, items, elem)?;
                literal::append_sql_quoted(buf, &text);
                Ok(())
            }
            other => Err(DialectError::type_mismatch("array", other.kind())),
        }
    }

    fn scan(&self, src: &SqlValue) -> Result<SqlValue> {
        let elem = self.elem()?;
        match literal::literal_text(src)? {
            Some(text) => parse_array(text, elem),
            None => Ok(SqlValue::Null),
        }
    }
}

fn is_bytes(ty: &HostType) -> bool {
    match ty.indirect() {
        HostType::Bytes => true,
        HostType::Seq(elem) => *elem.indirect() == HostType::U8,
        _ => false,
    }
}

fn append_array(buf: &mut String, items: &[SqlValue], elem: &HostType) -> Result<()> {
    buf.push('{');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        append_elem(buf, item, elem)?;
    }
    buf.push('}');
    Ok(())
}

fn append_elem(buf: &mut String, value: &SqlValue, elem: &HostType) -> Result<()> {
    match value {
        SqlValue::Null => buf.push_str("NULL"),
        SqlValue::Array(items) if !is_bytes(elem) => {
            if let HostType::Seq(inner) = elem.indirect() {
                return append_array(buf, items, inner);
            }
            literal::append_quoted_element(buf, &value.to_json().to_string());
        }
        SqlValue::Bool(b) => buf.push(if *b { 't' } else { 'f' }),
        SqlValue::Int(n) => buf.push_str(&n.to_string()),
        SqlValue::UInt(n) => match elem.indirect() {
            HostType::U32 => match u32::try_from(*n) {
                Ok(n) => literal::append_uint32(buf, n),
                Err(_) => return Err(DialectError::type_mismatch("u32", format!("uint {n}"))),
            },
            HostType::U64 => literal::append_uint64(buf, *n),
            _ => buf.push_str(&n.to_string()),
        },
        SqlValue::Float(f) => {
            if f.is_nan() {
                buf.push_str("NaN");
            } else if f.is_infinite() {
                buf.push_str(if *f > 0.0 { "Infinity" } else { "-Infinity" });
            } else {
                buf.push_str(&f.to_string());
            }
        }
        SqlValue::Text(s) => literal::append_quoted_element(buf, s),
        SqlValue::Blob(b) => {
            let mut hex = String::from("\\x");
            literal::append_hex(&mut hex, b);
            literal::append_quoted_element(buf, &hex);
        }
        SqlValue::Json(_) | SqlValue::Map(_) | SqlValue::Array(_) => {
            literal::append_quoted_element(buf, &value.to_json().to_string());
        }
    }
    Ok(())
}

/// An array element as written by the server, before typing.
enum Element {
    Null,
    Text { text: String, position: usize },
    Nested(Vec<Self>),
}

/// Parses array output text into values of `elem`.
fn parse_array(text: &str, elem: &HostType) -> Result<SqlValue> {
    let mut cursor = Cursor::new(text);
    cursor.skip_whitespace();

    // Arrays with non-default bounds are prefixed with `[1:3]=`.
    if cursor.peek() == Some('[') {
        while cursor.peek().is_some_and(|c| c != '=') {
            cursor.advance();
        }
        cursor.expect("=")?;
    }

    let items = parse_elements(&mut cursor)?;
    cursor.skip_whitespace();
    if !cursor.is_eof() {
        return Err(cursor.error("unexpected input after array"));
    }
    typed_array(items, elem)
}

fn parse_elements(cursor: &mut Cursor<'_>) -> Result<Vec<Element>> {
    cursor.expect("{")?;
    let mut items = Vec::new();

    cursor.skip_whitespace();
    if cursor.peek() == Some('}') {
        cursor.advance();
        return Ok(items);
    }

    loop {
        cursor.skip_whitespace();
        let position = cursor.pos();
        let item = match cursor.peek() {
            Some('{') => Element::Nested(parse_elements(cursor)?),
            Some('"') => Element::Text {
                text: cursor.scan_quoted()?,
                position,
            },
            Some(',' | '}') => return Err(cursor.error("missing array element")),
            None => return Err(cursor.error("unterminated array, expected `}`")),
            Some(_) => {
                let token = cursor.scan_unquoted(&[',', '{', '}', '"', '\\']);
                if token.eq_ignore_ascii_case("NULL") {
                    Element::Null
                } else {
                    Element::Text {
                        text: token.to_string(),
                        position,
                    }
                }
            }
        };
        items.push(item);

        cursor.skip_whitespace();
        match cursor.peek() {
            Some(',') => {
                cursor.advance();
            }
            Some('}') => {
                cursor.advance();
                return Ok(items);
            }
            Some(_) => return Err(cursor.error("expected `,` or `}`")),
            None => return Err(cursor.error("unterminated array, expected `}`")),
        }
    }
}

fn typed_array(items: Vec<Element>, elem: &HostType) -> Result<SqlValue> {
    items
        .into_iter()
        .map(|item| typed_elem(item, elem))
        .collect::<Result<Vec<_>>>()
        .map(SqlValue::Array)
}

fn typed_elem(item: Element, ty: &HostType) -> Result<SqlValue> {
    match item {
        Element::Null => Ok(SqlValue::Null),
        Element::Nested(items) => match ty.indirect() {
            HostType::Seq(inner) if !is_bytes(ty) => typed_array(items, inner),
            _ => Err(DialectError::type_mismatch(ty.to_string(), "nested array")),
        },
        Element::Text { text, position } => typed_text(text, position, ty),
    }
}

fn parse_number<T: FromStr>(text: &str, position: usize, ty: &HostType) -> Result<T> {
    text.parse()
        .map_err(|_| DialectError::parse(position, format!("invalid {ty} element `{text}`")))
}

fn parse_int<T>(text: &str, position: usize, ty: &HostType) -> Result<SqlValue>
where
    T: FromStr + Into<i64>,
{
    let n: T = parse_number(text, position, ty)?;
    Ok(SqlValue::Int(n.into()))
}

fn parse_uint<T>(text: &str, position: usize, ty: &HostType) -> Result<SqlValue>
where
    T: FromStr + Into<u64>,
{
    let n: T = parse_number(text, position, ty)?;
    Ok(SqlValue::UInt(n.into()))
}

fn parse_bool(text: &str, position: usize) -> Result<bool> {
    match text.to_ascii_lowercase().as_str() {
        "t" | "true" => Ok(true),
        "f" | "false" => Ok(false),
        _ => Err(DialectError::parse(position, format!("invalid bool element `{text}`"))),
    }
}

fn parse_json(text: &str, position: usize) -> Result<SqlValue> {
    serde_json::from_str(text)
        .map(SqlValue::Json)
        .map_err(|e| DialectError::parse(position, format!("invalid json element: {e}")))
}

fn typed_text(text: String, position: usize, ty: &HostType) -> Result<SqlValue> {
    let ty = ty.indirect();
    match ty {
        HostType::Bool => parse_bool(&text, position).map(SqlValue::Bool),
        HostType::I8 => parse_int::<i8>(&text, position, ty),
        HostType::I16 => parse_int::<i16>(&text, position, ty),
        HostType::I32 => parse_int::<i32>(&text, position, ty),
        HostType::I64 => parse_int::<i64>(&text, position, ty),
        HostType::U8 => parse_uint::<u8>(&text, position, ty),
        HostType::U16 => parse_uint::<u16>(&text, position, ty),
        HostType::U32 => {
            let n: i32 = parse_number(&text, position, ty)?;
            Ok(SqlValue::UInt(u64::from(u32::from_ne_bytes(n.to_ne_bytes()))))
        }
        HostType::U64 => {
            let n: i64 = parse_number(&text, position, ty)?;
            Ok(SqlValue::UInt(u64::from_ne_bytes(n.to_ne_bytes())))
        }
        HostType::F32 | HostType::F64 => parse_number(&text, position, ty).map(SqlValue::Float),
        _ if is_bytes(ty) => literal::decode_bytea(&text)
            .map(SqlValue::Blob)
            .ok_or_else(|| DialectError::parse(position, "invalid bytea element")),
        HostType::Seq(_) => Err(DialectError::type_mismatch(ty.to_string(), "scalar element")),
        HostType::Json | HostType::Struct(_) | HostType::Map(..) => parse_json(&text, position),
        HostType::String
        | HostType::Uuid
        | HostType::Timestamp
        | HostType::Bytes
        | HostType::Option(_) => Ok(SqlValue::Text(text)),
    }
}
