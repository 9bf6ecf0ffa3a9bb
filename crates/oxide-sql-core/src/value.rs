//! SQL values and literal rendering.
//!
//! [`SqlValue`] is what the ORM hands to a dialect when it renders a literal
//! and what a driver hands back when a row is scanned.

use std::collections::{BTreeMap, HashMap};

use crate::dialect::Dialect;

/// A SQL value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// Unsigned integer value.
    UInt(u64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
    /// JSON document.
    Json(serde_json::Value),
    /// Ordered sequence of values.
    Array(Vec<Self>),
    /// String-keyed map of values.
    Map(BTreeMap<String, Self>),
}

impl SqlValue {
    /// Creates an array value from anything convertible.
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToSqlValue,
    {
        Self::Array(items.into_iter().map(ToSqlValue::to_sql_value).collect())
    }

    /// Returns true for [`SqlValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns a short name of the variant, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
            Self::Json(_) => "json",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
        }
    }

    /// Converts the value into a JSON document.
    ///
    /// Blobs become arrays of byte values; non-finite floats become `null`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Self::Null => Json::Null,
            Self::Bool(b) => Json::Bool(*b),
            Self::Int(n) => Json::from(*n),
            Self::UInt(n) => Json::from(*n),
            Self::Float(f) => serde_json::Number::from_f64(*f).map_or(Json::Null, Json::Number),
            Self::Text(s) => Json::String(s.clone()),
            Self::Blob(b) => Json::Array(b.iter().map(|byte| Json::from(*byte)).collect()),
            Self::Json(v) => v.clone(),
            Self::Array(items) => Json::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(map) => {
                Json::Object(map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect())
            }
        }
    }
}

/// Appends `value` to `buf` as a literal in the dialect's syntax.
///
/// Unsigned integers go through [`Dialect::append_uint64`]. Arrays and maps
/// are rendered as JSON text; columns that need a native encoding install a
/// codec instead.
pub fn append_value<D: Dialect + ?Sized>(dialect: &D, buf: &mut String, value: &SqlValue) {
    match value {
        SqlValue::Null => buf.push_str("NULL"),
        SqlValue::Bool(true) => buf.push_str("TRUE"),
        SqlValue::Bool(false) => buf.push_str("FALSE"),
        SqlValue::Int(n) => buf.push_str(&n.to_string()),
        SqlValue::UInt(n) => dialect.append_uint64(buf, *n),
        SqlValue::Float(f) => append_float(buf, *f),
        SqlValue::Text(s) => dialect.append_string(buf, s),
        SqlValue::Blob(b) => dialect.append_bytes(buf, b),
        SqlValue::Json(_) | SqlValue::Array(_) | SqlValue::Map(_) => {
            dialect.append_string(buf, &value.to_json().to_string());
        }
    }
}

fn append_float(buf: &mut String, f: f64) {
    if f.is_nan() {
        buf.push_str("'NaN'");
    } else if f.is_infinite() {
        buf.push_str(if f > 0.0 { "'Infinity'" } else { "'-Infinity'" });
    } else {
        buf.push_str(&f.to_string());
    }
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

macro_rules! impl_to_sql_value {
    ($variant:ident, $wide:ty: $($ty:ty),+) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(self) -> SqlValue {
                    SqlValue::$variant(<$wide>::from(self))
                }
            }
        )+
    };
}

impl_to_sql_value!(Int, i64: i8, i16, i32, i64);
impl_to_sql_value!(UInt, u64: u8, u16, u32, u64);
impl_to_sql_value!(Float, f64: f32, f64);

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        self.map_or(SqlValue::Null, ToSqlValue::to_sql_value)
    }
}

impl ToSqlValue for Vec<u8> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self)
    }
}

impl ToSqlValue for &[u8] {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self.to_vec())
    }
}

impl ToSqlValue for serde_json::Value {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Json(self)
    }
}

impl<V: ToSqlValue> ToSqlValue for BTreeMap<String, V> {
    fn to_sql_value(self) -> SqlValue {
        let map = self.into_iter().map(|(k, v)| (k, v.to_sql_value()));
        SqlValue::Map(map.collect())
    }
}

impl<V: ToSqlValue, S> ToSqlValue for HashMap<String, V, S> {
    fn to_sql_value(self) -> SqlValue {
        let map = self.into_iter().map(|(k, v)| (k, v.to_sql_value()));
        SqlValue::Map(map.collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::GenericDialect;

    #[test]
    fn test_to_sql_value_conversions() {
        assert_eq!(7_u32.to_sql_value(), SqlValue::UInt(7));
        assert_eq!((-7_i16).to_sql_value(), SqlValue::Int(-7));
        assert_eq!(None::<i32>.to_sql_value(), SqlValue::Null);
        let expected = vec![SqlValue::Text("a".into()), SqlValue::Text("b".into())];
        assert_eq!(SqlValue::array(["a", "b"]), SqlValue::Array(expected));
    }

    #[test]
    fn test_append_value_generic() {
        let dialect = GenericDialect::new();
        let mut buf = String::new();
        append_value(&dialect, &mut buf, &SqlValue::UInt(u64::MAX));
        buf.push(',');
        append_value(&dialect, &mut buf, &SqlValue::Text("o'k".into()));
        buf.push(',');
        append_value(&dialect, &mut buf, &SqlValue::Float(f64::NAN));
        buf.push(',');
        append_value(&dialect, &mut buf, &SqlValue::array([1_i64, 2]));
        assert_eq!(buf, "18446744073709551615,'o''k','NaN','[1,2]'");
    }

    #[test]
    fn test_append_value_scalars() {
        let dialect = GenericDialect::new();
        let mut buf = String::new();
        for value in [
            SqlValue::Null,
            SqlValue::Bool(true),
            SqlValue::Int(-100),
            SqlValue::Float(f64::NEG_INFINITY),
            SqlValue::Blob(vec![0xDE, 0xAD]),
        ] {
            append_value(&dialect, &mut buf, &value);
            buf.push(' ');
        }
        assert_eq!(buf, "NULL TRUE -100 '-Infinity' X'DEAD' ");
    }

    #[test]
    fn test_map_to_json() {
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), Some("x".to_string()));
        map.insert("b".to_string(), None);
        assert_eq!(
            map.to_sql_value().to_json(),
            serde_json::json!({"a": "x", "b": null})
        );
    }
}
