#![allow(dead_code)]

use std::sync::Arc;

use oxide_sql_core::schema::{Field, Table, TableDef, Tables};
use oxide_sql_core::SqlValue;
use oxide_sql_postgres::{PgDialect, PgOptions};

/// Installs a log subscriber that writes through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn pg() -> PgDialect {
    init_tracing();
    oxide_sql_postgres::init(oxide_sql_core::VERSION, PgOptions::new())
        .unwrap_or_else(|e| panic!("init failed: {e}"))
}

pub fn registry() -> Tables {
    Tables::new(Arc::new(pg()))
}

pub fn table(def: TableDef) -> Arc<Table> {
    registry().register(def)
}

/// Strips an SQL string literal down to the text the server stores.
pub fn unquote_sql(literal: &str) -> String {
    let inner = literal
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or_else(|| panic!("not an SQL string literal: {literal}"));
    inner.replace("''", "'")
}

/// Encodes `value` for `field`, then scans back what the server would
/// return for it.
pub fn round_trip(field: &Field, value: &SqlValue) -> SqlValue {
    let mut buf = String::new();
    field
        .append_value(&pg(), &mut buf, value)
        .unwrap_or_else(|e| panic!("append {value:?}: {e}"));
    let stored = if buf == "NULL" {
        SqlValue::Null
    } else if buf.starts_with('\'') {
        SqlValue::Text(unquote_sql(&buf))
    } else {
        let n = buf
            .parse()
            .unwrap_or_else(|e| panic!("not an integer: {buf}: {e}"));
        SqlValue::Int(n)
    };
    field
        .scan_value(&stored)
        .unwrap_or_else(|e| panic!("scan {stored:?} (from {buf}): {e}"))
}
