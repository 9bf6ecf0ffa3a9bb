//! Tests for table registration with the `PostgreSQL` dialect.

mod common;
use common::*;

use std::sync::Arc;
use std::thread;

use oxide_sql_core::schema::{FieldDef, HostType, TableDef};

fn serial_table(name: &str, host_type: HostType) -> TableDef {
    let id = FieldDef::new("id", host_type)
        .primary_key()
        .auto_increment();
    TableDef::new(name).field(id)
}

#[test]
fn test_serial_widths() {
    let registry = registry();
    for (host_type, sql_type, serial) in [
        (HostType::I16, "SMALLINT", "SMALLSERIAL"),
        (HostType::U16, "SMALLINT", "SMALLSERIAL"),
        (HostType::I32, "INTEGER", "SERIAL"),
        (HostType::U32, "INTEGER", "SERIAL"),
        (HostType::I64, "BIGINT", "BIGSERIAL"),
        (HostType::U64, "BIGINT", "BIGSERIAL"),
    ] {
        let name = format!("t_{host_type}");
        let table = registry.register(serial_table(&name, host_type));
        let id = table.field("id").unwrap();
        // Queries keep the integer type; only CREATE TABLE uses the counter.
        assert_eq!(id.sql_type(), sql_type);
        assert_eq!(id.create_table_sql_type(), serial);
    }
}

#[test]
fn test_create_table() {
    let registry = registry();
    let id = FieldDef::new("id", HostType::I64)
        .primary_key()
        .auto_increment();
    let tags = FieldDef::new("tags", HostType::seq(HostType::String)).array();
    let attrs = HostType::map(HostType::String, HostType::String);
    let table = registry.register(
        TableDef::new("users")
            .field(id)
            .field(FieldDef::new("email", HostType::String).not_null())
            .field(FieldDef::new("avatar", HostType::option(HostType::Bytes)))
            .field(FieldDef::new("created_at", HostType::Timestamp).not_null())
            .field(tags)
            .field(FieldDef::new("attrs", attrs).hstore())
            .field(FieldDef::new("profile", HostType::Struct("Profile".into()))),
    );

    assert_eq!(
        table.create_table_sql(registry.dialect(), true),
        "CREATE TABLE IF NOT EXISTS \"users\" (\
         \"id\" BIGSERIAL NOT NULL, \
         \"email\" VARCHAR NOT NULL, \
         \"avatar\" BYTEA, \
         \"created_at\" TIMESTAMPTZ NOT NULL, \
         \"tags\" VARCHAR[], \
         \"attrs\" HSTORE, \
         \"profile\" JSONB, \
         PRIMARY KEY (\"id\"))"
    );
}

#[test]
fn test_create_table_identity() {
    let registry = registry();
    let id = FieldDef::new("id", HostType::I64)
        .primary_key()
        .auto_increment()
        .identity();
    let kind = FieldDef::new("kind", HostType::Struct("event_kind".into()));
    let table = registry.register(
        TableDef::new("events")
            .field(id)
            .field(kind.composite("event_kind")),
    );

    assert_eq!(
        table.create_table_sql(registry.dialect(), false),
        "CREATE TABLE \"events\" (\
         \"id\" BIGINT NOT NULL GENERATED BY DEFAULT AS IDENTITY, \
         \"kind\" event_kind, \
         PRIMARY KEY (\"id\"))"
    );
}

#[test]
fn test_codecs_are_installed_per_field() {
    let strings = HostType::seq(HostType::String);
    let attrs = HostType::map(HostType::String, HostType::String);
    let table = table(
        TableDef::new("posts")
            .field(FieldDef::new("id", HostType::I64).primary_key())
            .field(FieldDef::new("tags", strings.clone()).sql_type("text[]"))
            .field(FieldDef::new("meta", strings))
            .field(FieldDef::new("attrs", attrs).sql_type("HSTORE")),
    );

    assert!(table.field("id").unwrap().codec().is_none());
    assert!(table.field("tags").unwrap().codec().is_some());
    assert_eq!(table.field("meta").unwrap().sql_type(), "JSONB");
    assert!(table.field("meta").unwrap().codec().is_none());
    assert!(table.field("attrs").unwrap().codec().is_some());
}

#[test]
fn test_concurrent_registration_shares_one_table() {
    let registry = registry();
    let register = || registry.register(serial_table("shared", HostType::I64));
    let tables: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8).map(|_| scope.spawn(register)).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(registry.len(), 1);
    assert!(tables.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}
