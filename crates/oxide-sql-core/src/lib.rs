//! # oxide-sql-core
//!
//! The dialect contract of the oxide-sql ORM.
//!
//! This crate provides:
//! - The [`Dialect`] trait: identifier quoting, placeholders, literal
//!   rendering and per-field type resolution
//! - The [`Feature`] set a dialect advertises
//! - The SQL type-name vocabulary ([`sqltype`])
//! - Table and field descriptors plus the [`Tables`] registry
//! - [`SqlValue`] and the [`FieldCodec`] trait for column encodings
//!
//! ## Registering a table
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use oxide_sql_core::dialect::GenericDialect;
//! use oxide_sql_core::schema::{FieldDef, HostType, TableDef, Tables};
//!
//! let tables = Tables::new(Arc::new(GenericDialect::new()));
//! let users = tables.register(
//!     TableDef::new("users")
//!         .field(FieldDef::new("id", HostType::I64).primary_key())
//!         .field(FieldDef::new("name", HostType::String)),
//! );
//!
//! assert_eq!(users.field("id").unwrap().sql_type(), "BIGINT");
//! ```

pub mod dialect;
mod error;
pub mod schema;
pub mod sqltype;
pub mod value;

pub use dialect::{Dialect, DialectName, Feature};
pub use error::{DialectError, Result};
pub use schema::{
    Field, FieldCodec, FieldDef, FieldKind, FieldResolution, HostType, Table, TableDef, Tables,
};
pub use value::{SqlValue, ToSqlValue};

/// Version of the core crate. Dialect crates must be built from the same
/// release.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
