//! `PostgreSQL` dialect implementation.

use std::sync::Arc;

use oxide_sql_core::dialect::{Dialect, DialectName, Feature};
use oxide_sql_core::schema::{FieldDef, FieldKind, FieldResolution};
use oxide_sql_core::sqltype::HSTORE;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::array::ArrayCodec;
use crate::hstore::HstoreCodec;
use crate::{literal, sqltype};

/// Options fixed when the dialect is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PgOptions {
    /// Execute statements as server-side prepared statements.
    pub prepared: bool,
}

impl PgOptions {
    /// Creates the default options.
    #[must_use]
    pub const fn new() -> Self {
        Self { prepared: false }
    }

    /// Sets whether statements are prepared.
    #[must_use]
    pub const fn prepared(mut self, prepared: bool) -> Self {
        self.prepared = prepared;
        self
    }
}

/// `PostgreSQL` dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PgDialect {
    features: Feature,
    prepared: bool,
}

impl PgDialect {
    /// Everything `PostgreSQL` supports.
    pub const FEATURES: Feature = Feature::CTE
        .union(Feature::WITH_VALUES)
        .union(Feature::RETURNING)
        .union(Feature::INSERT_RETURNING)
        .union(Feature::DEFAULT_PLACEHOLDER)
        .union(Feature::DOUBLE_COLON_CAST)
        .union(Feature::INSERT_TABLE_ALIAS)
        .union(Feature::UPDATE_TABLE_ALIAS)
        .union(Feature::DELETE_TABLE_ALIAS)
        .union(Feature::TABLE_CASCADE)
        .union(Feature::TABLE_IDENTITY)
        .union(Feature::TABLE_TRUNCATE)
        .union(Feature::TABLE_NOT_EXISTS)
        .union(Feature::INSERT_ON_CONFLICT)
        .union(Feature::SELECT_EXISTS)
        .union(Feature::GENERATED_IDENTITY)
        .union(Feature::COMPOSITE_IN);

    /// Creates a dialect with default options.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_options(PgOptions::new())
    }

    /// Creates a dialect with the given options.
    #[must_use]
    pub const fn with_options(options: PgOptions) -> Self {
        Self {
            features: Self::FEATURES,
            prepared: options.prepared,
        }
    }
}

impl Default for PgDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for PgDialect {
    fn name(&self) -> DialectName {
        DialectName::Pg
    }

    fn features(&self) -> Feature {
        self.features
    }

    fn ident_quote(&self) -> char {
        '"'
    }

    fn append_placeholder(&self, buf: &mut String, index: usize) {
        buf.push('$');
        buf.push_str(&index.to_string());
    }

    // PostgreSQL has no unsigned integers; store the bit pattern instead.
    fn append_uint32(&self, buf: &mut String, n: u32) {
        literal::append_uint32(buf, n);
    }

    fn append_uint64(&self, buf: &mut String, n: u64) {
        literal::append_uint64(buf, n);
    }

    fn append_string(&self, buf: &mut String, s: &str) {
        literal::append_sql_quoted(buf, s);
    }

    fn append_bytes(&self, buf: &mut String, bytes: &[u8]) {
        buf.push_str("'\\x");
        literal::append_hex(buf, bytes);
        buf.push('\'');
    }

    fn resolve_field(&self, field: &FieldDef) -> FieldResolution {
        let sql_type = sqltype::field_sql_type(field);
        let mut resolution = FieldResolution::new(sql_type.clone());

        if field.is_auto_increment() && !field.is_identity() {
            match sqltype::serial_type(&sql_type) {
                Some(serial) => {
                    resolution = resolution.with_create_table_sql_type(serial);
                }
                None => warn!(
                    field = %field.name(),
                    sql_type = %sql_type,
                    "auto-increment field has no serial type"
                ),
            }
        }

        let host_type = field.host_type();
        if *field.kind() == FieldKind::Array {
            resolution = resolution.with_codec(Arc::new(ArrayCodec::new(host_type.clone())));
        }
        if sql_type.eq_ignore_ascii_case(HSTORE) {
            resolution = resolution.with_codec(Arc::new(HstoreCodec::new(host_type.clone())));
        }

        debug!(
            field = %field.name(),
            sql_type = %resolution.sql_type(),
            create_table_sql_type = ?resolution.create_table_sql_type(),
            codec = resolution.codec().is_some(),
            "resolved field"
        );
        resolution
    }

    fn prepared(&self) -> bool {
        self.prepared
    }
}
