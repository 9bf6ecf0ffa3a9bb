//! Host-side field types.

use std::fmt;

/// The Rust-side type of a model field.
///
/// Dialects map a `HostType` to a column type and pick the value codec from
/// it, so it carries only the structure that matters for that decision.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostType {
    /// `bool`
    Bool,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `String`
    String,
    /// `Vec<u8>` treated as an opaque byte string.
    Bytes,
    /// A 128-bit UUID.
    Uuid,
    /// An instant in time.
    Timestamp,
    /// Raw JSON document.
    Json,
    /// A named struct stored as a single column.
    Struct(String),
    /// `Option<T>`
    Option(Box<Self>),
    /// `Vec<T>` and other sequences.
    Seq(Box<Self>),
    /// A key-value map.
    Map(Box<Self>, Box<Self>),
}

impl HostType {
    /// Creates `Option<inner>`.
    #[must_use]
    pub fn option(inner: Self) -> Self {
        Self::Option(Box::new(inner))
    }

    /// Creates a sequence of `elem`.
    #[must_use]
    pub fn seq(elem: Self) -> Self {
        Self::Seq(Box::new(elem))
    }

    /// Creates a map from `key` to `value`.
    #[must_use]
    pub fn map(key: Self, value: Self) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    /// Returns the type with every `Option` layer removed.
    #[must_use]
    pub fn indirect(&self) -> &Self {
        let mut ty = self;
        while let Self::Option(inner) = ty {
            ty = inner;
        }
        ty
    }

    /// Returns the element type if this is (an optional) sequence.
    #[must_use]
    pub fn elem(&self) -> Option<&Self> {
        match self.indirect() {
            Self::Seq(elem) => Some(elem),
            _ => None,
        }
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::I8 => write!(f, "i8"),
            Self::I16 => write!(f, "i16"),
            Self::I32 => write!(f, "i32"),
            Self::I64 => write!(f, "i64"),
            Self::U8 => write!(f, "u8"),
            Self::U16 => write!(f, "u16"),
            Self::U32 => write!(f, "u32"),
            Self::U64 => write!(f, "u64"),
            Self::F32 => write!(f, "f32"),
            Self::F64 => write!(f, "f64"),
            Self::String => write!(f, "String"),
            Self::Bytes => write!(f, "bytes"),
            Self::Uuid => write!(f, "uuid"),
            Self::Timestamp => write!(f, "timestamp"),
            Self::Json => write!(f, "json"),
            Self::Struct(name) => write!(f, "{name}"),
            Self::Option(inner) => write!(f, "Option<{inner}>"),
            Self::Seq(elem) => write!(f, "Vec<{elem}>"),
            Self::Map(key, value) => write!(f, "Map<{key}, {value}>"),
        }
    }
}
