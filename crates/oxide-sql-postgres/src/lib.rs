//! # oxide-sql-postgres
//!
//! `PostgreSQL` dialect for `oxide-sql-core`.
//!
//! # How `PostgreSQL` differs from other dialects
//!
//! - **[Placeholders]**: parameters are numbered, `$1`, `$2`, ...,
//!   instead of `?`.
//! - **No unsigned integers**: `u32` and `u64` values are written as
//!   the `INTEGER`/`BIGINT` with the same bit pattern, so `u32::MAX`
//!   is stored as `-1`. [`Field::scan_value`] reverses this on read.
//! - **[SERIAL]**: auto-increment columns are created as
//!   `SMALLSERIAL`, `SERIAL` or `BIGSERIAL`. Identity fields use
//!   `GENERATED BY DEFAULT AS IDENTITY` instead.
//! - **[Arrays]**: fields with an SQL type ending in `[]`, or marked
//!   as arrays, are stored natively and encoded by [`ArrayCodec`].
//! - **[hstore]**: string maps typed `HSTORE` are encoded by
//!   [`HstoreCodec`].
//! - **[bytea]**: binary values use the `'\x...'` hex format.
//!
//! [Placeholders]: https://www.postgresql.org/docs/current/sql-prepare.html
//! [SERIAL]: https://www.postgresql.org/docs/current/datatype-numeric.html#DATATYPE-SERIAL
//! [Arrays]: https://www.postgresql.org/docs/current/arrays.html
//! [hstore]: https://www.postgresql.org/docs/current/hstore.html
//! [bytea]: https://www.postgresql.org/docs/current/datatype-binary.html
//! [`Field::scan_value`]: oxide_sql_core::Field::scan_value
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use oxide_sql_core::schema::{FieldDef, HostType, TableDef, Tables};
//! use oxide_sql_postgres::PgOptions;
//!
//! let dialect = oxide_sql_postgres::init(oxide_sql_core::VERSION, PgOptions::new())
//!     .expect("versions match");
//! let tables = Tables::new(Arc::new(dialect));
//! let users = tables.register(
//!     TableDef::new("users")
//!         .field(FieldDef::new("id", HostType::I64).primary_key().auto_increment())
//!         .field(FieldDef::new("tags", HostType::seq(HostType::String)).sql_type("text[]")),
//! );
//!
//! assert_eq!(
//!     users.create_table_sql(tables.dialect(), true),
//!     r#"CREATE TABLE IF NOT EXISTS "users" ("id" BIGSERIAL NOT NULL, "tags" text[], PRIMARY KEY ("id"))"#
//! );
//! ```

mod array;
mod dialect;
mod hstore;
mod literal;
mod sqltype;
mod version;

pub use array::ArrayCodec;
pub use dialect::{PgDialect, PgOptions};
pub use hstore::HstoreCodec;
pub use version::{check_version, init, VERSION};
