//! SQL column type names shared by all dialects.
//!
//! Dialects start from [`discover_sql_type`] and override the names their
//! engine spells differently.

use crate::schema::HostType;

pub const BOOLEAN: &str = "BOOLEAN";
pub const SMALLINT: &str = "SMALLINT";
pub const INTEGER: &str = "INTEGER";
pub const BIGINT: &str = "BIGINT";
pub const REAL: &str = "REAL";
pub const DOUBLE_PRECISION: &str = "DOUBLE PRECISION";
pub const VARCHAR: &str = "VARCHAR";
pub const BLOB: &str = "BLOB";
pub const TIMESTAMP: &str = "TIMESTAMP";
pub const JSON: &str = "JSON";
pub const JSONB: &str = "JSONB";
pub const HSTORE: &str = "HSTORE";

/// Returns the dialect-neutral SQL type for a host type.
#[must_use]
pub fn discover_sql_type(ty: &HostType) -> &'static str {
    match ty.indirect() {
        HostType::Bool => BOOLEAN,
        HostType::I8 | HostType::I16 | HostType::U8 | HostType::U16 => SMALLINT,
        HostType::I32 | HostType::U32 => INTEGER,
        HostType::I64 | HostType::U64 => BIGINT,
        HostType::F32 => REAL,
        HostType::F64 => DOUBLE_PRECISION,
        HostType::Bytes => BLOB,
        HostType::Timestamp => TIMESTAMP,
        HostType::Json => JSON,
        HostType::String
        | HostType::Uuid
        | HostType::Struct(_)
        | HostType::Seq(_)
        | HostType::Map(..)
        | HostType::Option(_) => VARCHAR,
    }
}
