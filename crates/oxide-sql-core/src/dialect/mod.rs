//! SQL Dialect support.
//!
//! Different databases have slightly different SQL syntax. A [`Dialect`]
//! supplies identifier quoting, placeholder syntax, the engine's
//! [`Feature`] set and the per-field type mapping used when a table is
//! registered.

mod feature;
mod generic;

use std::fmt::{self, Write};

pub use feature::Feature;
pub use generic::GenericDialect;

use crate::schema::{FieldDef, FieldResolution, TableDef};
use crate::sqltype;

/// Identifies the SQL engine a dialect targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialectName {
    /// ANSI SQL without engine-specific extensions.
    Generic,
    /// `PostgreSQL`.
    Pg,
    /// `MySQL`.
    Mysql,
}

impl DialectName {
    /// Returns the short identifier of the engine.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Pg => "pg",
            Self::Mysql => "mysql",
        }
    }
}

impl fmt::Display for DialectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for SQL dialect-specific behavior.
///
/// The `append_*` methods write into a caller-supplied buffer and keep no
/// state between calls, so a dialect can be shared freely once built.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Returns the engine this dialect targets.
    fn name(&self) -> DialectName;

    /// Returns the SQL capabilities of the engine.
    fn features(&self) -> Feature {
        Feature::empty()
    }

    /// Returns whether every capability in `feature` is supported.
    fn has_feature(&self, feature: Feature) -> bool {
        self.features().contains(feature)
    }

    /// Returns the identifier quote character (e.g., `"` for standard SQL, `` ` `` for `MySQL`).
    fn ident_quote(&self) -> char {
        '"'
    }

    /// Appends a quoted identifier. Quote characters inside the identifier
    /// are doubled.
    fn append_ident(&self, buf: &mut String, ident: &str) {
        let quote = self.ident_quote();
        buf.push(quote);
        for c in ident.chars() {
            if c == quote {
                buf.push(quote);
            }
            buf.push(c);
        }
        buf.push(quote);
    }

    /// Quotes an identifier.
    fn quote_identifier(&self, name: &str) -> String {
        let mut buf = String::with_capacity(name.len() + 2);
        self.append_ident(&mut buf, name);
        buf
    }

    /// Appends the placeholder for the `index`-th parameter (1-based).
    fn append_placeholder(&self, buf: &mut String, _index: usize) {
        buf.push('?');
    }

    /// Appends an unsigned 32-bit integer literal.
    fn append_uint32(&self, buf: &mut String, n: u32) {
        buf.push_str(&n.to_string());
    }

    /// Appends an unsigned 64-bit integer literal.
    fn append_uint64(&self, buf: &mut String, n: u64) {
        buf.push_str(&n.to_string());
    }

    /// Appends a string literal.
    fn append_string(&self, buf: &mut String, s: &str) {
        buf.push('\'');
        for c in s.chars() {
            if c == '\'' {
                buf.push('\'');
            }
            buf.push(c);
        }
        buf.push('\'');
    }

    /// Appends a binary literal.
    fn append_bytes(&self, buf: &mut String, bytes: &[u8]) {
        buf.push_str("X'");
        for byte in bytes {
            let _ = write!(buf, "{byte:02X}");
        }
        buf.push('\'');
    }

    /// Resolves the column type and codec of a single field.
    fn resolve_field(&self, field: &FieldDef) -> FieldResolution {
        let sql_type = field
            .user_sql_type()
            .unwrap_or_else(|| sqltype::discover_sql_type(field.host_type()));
        FieldResolution::new(sql_type)
    }

    /// Resolves every field of a table being registered.
    ///
    /// Returns one resolution per field, in field order. Nothing is
    /// rejected here; malformed types surface when statements run.
    fn on_table(&self, table: &TableDef) -> Vec<FieldResolution> {
        table
            .fields()
            .iter()
            .map(|field| self.resolve_field(field))
            .collect()
    }

    /// Returns whether statements should be executed as prepared statements.
    fn prepared(&self) -> bool {
        false
    }
}
