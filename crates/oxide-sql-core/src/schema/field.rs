//! Field descriptors.
//!
//! A field goes through two phases. A [`FieldDef`] is written when the
//! schema is defined. When its table is registered, the dialect turns it into
//! a [`FieldResolution`] and the registry combines both into an immutable
//! [`Field`].

use std::fmt;
use std::sync::Arc;

use super::HostType;
use crate::dialect::Dialect;
use crate::error::{DialectError, Result};
use crate::value::{self, SqlValue};

/// How a column stores its value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldKind {
    /// A single value of the column type.
    #[default]
    Scalar,
    /// A native SQL array of the host sequence's element type.
    Array,
    /// A key-value map column.
    Hstore,
    /// A user-defined composite type with the given name.
    Composite(String),
}

/// Encodes host values into SQL literals and decodes driver values back.
///
/// Installed by a dialect on fields whose values need a native encoding,
/// such as arrays and key-value maps.
pub trait FieldCodec: fmt::Debug + Send + Sync {
    /// Appends `value` to `buf` as an SQL literal.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::TypeMismatch`](crate::DialectError::TypeMismatch)
    /// if the value does not have the shape the codec encodes.
    fn append(&self, buf: &mut String, value: &SqlValue) -> Result<()>;

    /// Decodes a value returned by the driver.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::TypeMismatch`](crate::DialectError::TypeMismatch)
    /// if the field cannot hold the decoded shape and
    /// [`DialectError::Parse`](crate::DialectError::Parse) if the literal is
    /// malformed.
    fn scan(&self, src: &SqlValue) -> Result<SqlValue>;
}

/// Schema definition of a field, before its table is registered.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct FieldDef {
    name: String,
    host_type: HostType,
    user_sql_type: Option<String>,
    kind: FieldKind,
    primary_key: bool,
    auto_increment: bool,
    identity: bool,
    not_null: bool,
}

impl FieldDef {
    /// Creates a scalar field.
    pub fn new(name: impl Into<String>, host_type: HostType) -> Self {
        Self {
            name: name.into(),
            host_type,
            user_sql_type: None,
            kind: FieldKind::Scalar,
            primary_key: false,
            auto_increment: false,
            identity: false,
            not_null: false,
        }
    }

    /// Sets an explicit SQL type. A type ending in `[]` makes the field an
    /// array.
    #[must_use]
    pub fn sql_type(mut self, sql_type: impl Into<String>) -> Self {
        let sql_type = sql_type.into();
        if sql_type.ends_with("[]") {
            self.kind = FieldKind::Array;
        }
        self.user_sql_type = Some(sql_type);
        self
    }

    /// Stores the field as a native array.
    #[must_use]
    pub fn array(mut self) -> Self {
        self.kind = FieldKind::Array;
        self
    }

    /// Stores the field as a key-value map.
    #[must_use]
    pub fn hstore(mut self) -> Self {
        self.kind = FieldKind::Hstore;
        self
    }

    /// Stores the field as the named composite type.
    #[must_use]
    pub fn composite(mut self, type_name: impl Into<String>) -> Self {
        self.kind = FieldKind::Composite(type_name.into());
        self
    }

    /// Marks the field as (part of) the primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.not_null = true;
        self
    }

    /// Marks the field as auto-incremented by the database.
    #[must_use]
    pub const fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Generates values with a database-native identity column.
    #[must_use]
    pub const fn identity(mut self) -> Self {
        self.identity = true;
        self
    }

    /// Adds a NOT NULL constraint.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the host type.
    #[must_use]
    pub const fn host_type(&self) -> &HostType {
        &self.host_type
    }

    /// Returns the user-specified SQL type, if any.
    #[must_use]
    pub fn user_sql_type(&self) -> Option<&str> {
        self.user_sql_type.as_deref()
    }

    /// Returns how the column stores its value.
    #[must_use]
    pub const fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Returns true if the field is part of the primary key.
    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// Returns true if the field is auto-incremented.
    #[must_use]
    pub const fn is_auto_increment(&self) -> bool {
        self.auto_increment
    }

    /// Returns true if the field uses a native identity column.
    #[must_use]
    pub const fn is_identity(&self) -> bool {
        self.identity
    }

    /// Returns true if the field has a NOT NULL constraint.
    #[must_use]
    pub const fn is_not_null(&self) -> bool {
        self.not_null
    }
}

/// What a dialect decided for a field.
#[derive(Debug, Clone)]
pub struct FieldResolution {
    sql_type: String,
    create_table_sql_type: Option<String>,
    codec: Option<Arc<dyn FieldCodec>>,
}

impl FieldResolution {
    /// Creates a resolution with only a column type.
    pub fn new(sql_type: impl Into<String>) -> Self {
        Self {
            sql_type: sql_type.into(),
            create_table_sql_type: None,
            codec: None,
        }
    }

    /// Overrides the type used in `CREATE TABLE`.
    #[must_use]
    pub fn with_create_table_sql_type(mut self, sql_type: impl Into<String>) -> Self {
        self.create_table_sql_type = Some(sql_type.into());
        self
    }

    /// Installs a value codec.
    #[must_use]
    pub fn with_codec(mut self, codec: Arc<dyn FieldCodec>) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Returns the discovered column type.
    #[must_use]
    pub fn sql_type(&self) -> &str {
        &self.sql_type
    }

    /// Returns the `CREATE TABLE` override, if any.
    #[must_use]
    pub fn create_table_sql_type(&self) -> Option<&str> {
        self.create_table_sql_type.as_deref()
    }

    /// Returns the installed codec, if any.
    #[must_use]
    pub fn codec(&self) -> Option<&Arc<dyn FieldCodec>> {
        self.codec.as_ref()
    }
}

/// A registered field. Never changes once built.
#[derive(Debug, Clone)]
pub struct Field {
    def: FieldDef,
    resolution: FieldResolution,
}

impl Field {
    /// Combines a definition with the dialect's resolution of it.
    #[must_use]
    pub const fn new(def: FieldDef, resolution: FieldResolution) -> Self {
        Self { def, resolution }
    }

    /// Returns the schema definition.
    #[must_use]
    pub const fn def(&self) -> &FieldDef {
        &self.def
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.def.name()
    }

    /// Returns the column type used by queries.
    #[must_use]
    pub fn sql_type(&self) -> &str {
        self.resolution.sql_type()
    }

    /// Returns the column type used by `CREATE TABLE`.
    #[must_use]
    pub fn create_table_sql_type(&self) -> &str {
        self.resolution
            .create_table_sql_type()
            .unwrap_or_else(|| self.resolution.sql_type())
    }

    /// Returns the installed codec, if any.
    #[must_use]
    pub fn codec(&self) -> Option<&Arc<dyn FieldCodec>> {
        self.resolution.codec()
    }

    /// Appends `value` as a literal for this column.
    ///
    /// # Errors
    ///
    /// Propagates codec errors. Returns a type mismatch when an unsigned
    /// value does not fit the host type's width.
    pub fn append_value<D: Dialect + ?Sized>(
        &self,
        dialect: &D,
        buf: &mut String,
        value: &SqlValue,
    ) -> Result<()> {
        if let Some(codec) = self.codec() {
            return codec.append(buf, value);
        }
        match (self.def.host_type().indirect(), value) {
            (HostType::U32, SqlValue::UInt(n)) => match u32::try_from(*n) {
                Ok(n) => dialect.append_uint32(buf, n),
                Err(_) => return Err(DialectError::type_mismatch("u32", format!("uint {n}"))),
            },
            _ => value::append_value(dialect, buf, value),
        }
        Ok(())
    }

    /// Decodes a driver value for this column.
    ///
    /// Unsigned host types stored in signed columns get their bit pattern
    /// reinterpreted back.
    ///
    /// # Errors
    ///
    /// Propagates codec errors. Returns a type mismatch when a signed value
    /// does not fit the unsigned host type's width.
    pub fn scan_value(&self, src: &SqlValue) -> Result<SqlValue> {
        if let Some(codec) = self.codec() {
            return codec.scan(src);
        }
        match (self.def.host_type().indirect(), src) {
            (HostType::U32, SqlValue::Int(n)) => i32::try_from(*n)
                .map(|n| SqlValue::UInt(u64::from(u32::from_ne_bytes(n.to_ne_bytes()))))
                .map_err(|_| DialectError::type_mismatch("u32", format!("int {n}"))),
            (HostType::U64, SqlValue::Int(n)) => {
                Ok(SqlValue::UInt(u64::from_ne_bytes(n.to_ne_bytes())))
            }
            _ => Ok(src.clone()),
        }
    }
}
