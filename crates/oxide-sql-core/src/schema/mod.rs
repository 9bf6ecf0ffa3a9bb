//! Table and field metadata.
//!
//! The ORM describes each model as a [`TableDef`]. Registering it with
//! [`Tables`] asks the dialect to resolve every field once and caches the
//! resulting immutable [`Table`].

mod field;
mod host_type;
mod table;

pub use field::{Field, FieldCodec, FieldDef, FieldKind, FieldResolution};
pub use host_type::HostType;
pub use table::{Table, TableDef, Tables};
