//! Tests for native array columns.

mod common;
use common::*;

use std::sync::Arc;

use oxide_sql_core::schema::{FieldDef, HostType, Table, TableDef};
use oxide_sql_core::SqlValue;
use proptest::prelude::*;

fn arrays() -> Arc<Table> {
    let tags = HostType::seq(HostType::option(HostType::String));
    let grid = HostType::seq(HostType::seq(HostType::I64));
    let flags = HostType::option(HostType::seq(HostType::Bool));
    table(
        TableDef::new("arrays")
            .field(FieldDef::new("tags", tags).sql_type("text[]"))
            .field(FieldDef::new("counts", HostType::seq(HostType::U32)).array())
            .field(FieldDef::new("grid", grid).array())
            .field(FieldDef::new("blobs", HostType::seq(HostType::Bytes)).array())
            .field(FieldDef::new("scores", HostType::seq(HostType::F64)).array())
            .field(FieldDef::new("flags", flags).array())
            .field(FieldDef::new("n", HostType::I64).sql_type("bigint[]")),
    )
}

#[test]
fn test_column_types() {
    let table = arrays();
    for (name, sql_type) in [
        ("counts", "INTEGER[]"),
        ("grid", "BIGINT[][]"),
        ("blobs", "BYTEA[]"),
        ("scores", "DOUBLE PRECISION[]"),
        ("flags", "BOOLEAN[]"),
    ] {
        assert_eq!(table.field(name).unwrap().sql_type(), sql_type);
    }
}

#[test]
fn test_string_round_trips() {
    let table = arrays();
    let tags = table.field("tags").unwrap();
    for value in [
        SqlValue::Array(vec![]),
        SqlValue::array(["one"]),
        SqlValue::array(["a,b", "{c}", "d\"e", "f\\g", "it's", " padded ", "", "NULL"]),
        SqlValue::array([Some("x"), None, Some("y")]),
        SqlValue::Null,
    ] {
        assert_eq!(round_trip(tags, &value), value);
    }
}

#[test]
fn test_typed_round_trips() {
    let table = arrays();
    let grid = vec![SqlValue::array([1_i64, 2]), SqlValue::array([3_i64, -4])];
    let blobs = vec![SqlValue::Blob(vec![]), SqlValue::Blob(vec![0, 255, 16])];
    let scores = SqlValue::array([0.5, -1.25, f64::INFINITY, f64::NEG_INFINITY]);
    let cases = [
        ("counts", SqlValue::array([0, 7, u32::MAX, 1 << 31])),
        ("grid", SqlValue::Array(grid)),
        ("blobs", SqlValue::Array(blobs)),
        ("scores", scores),
        ("flags", SqlValue::array([Some(true), None, Some(false)])),
    ];
    for (name, value) in cases {
        let field = table.field(name).unwrap();
        assert_eq!(round_trip(field, &value), value, "{name}");
    }
}

#[test]
fn test_unsigned_elements_are_stored_signed() {
    let table = arrays();
    let mut buf = String::new();
    table
        .field("counts")
        .unwrap()
        .append_value(&pg(), &mut buf, &SqlValue::array([u32::MAX]))
        .unwrap();
    assert_eq!(buf, "'{-1}'");
}

#[test]
fn test_scan_server_output() {
    let table = arrays();
    let scanned = table
        .field("tags")
        .unwrap()
        .scan_value(&SqlValue::Text(r#"{plain,"with space",NULL,"quote\"d"}"#.into()))
        .unwrap();
    assert_eq!(
        scanned,
        SqlValue::array([Some("plain"), Some("with space"), None, Some("quote\"d")])
    );
}

#[test]
fn test_scan_into_non_sequence_field() {
    let table = arrays();
    let err = table
        .field("n")
        .unwrap()
        .scan_value(&SqlValue::Text("{1,2}".into()))
        .unwrap_err();
    assert!(err.is_type_mismatch(), "{err}");
}

#[test]
fn test_scan_malformed() {
    let table = arrays();
    let grid = table.field("grid").unwrap();
    for input in ["{{1,2}", "{{1,2}}}", "{1,x}", "{\"1}", "1,2"] {
        let err = grid.scan_value(&SqlValue::Text(input.into())).unwrap_err();
        assert!(err.is_parse() || err.is_type_mismatch(), "{input}: {err}");
    }
    let counts = table.field("counts").unwrap();
    let err = counts
        .scan_value(&SqlValue::Text("{4294967295}".into()))
        .unwrap_err();
    assert!(err.is_parse(), "{err}");
}

proptest! {
    #[test]
    fn proptest_string_arrays_round_trip(
        items in prop::collection::vec(proptest::option::of("[^\\x00]{0,12}"), 0..8)
    ) {
        let table = arrays();
        let value = SqlValue::array(items);
        prop_assert_eq!(round_trip(table.field("tags").unwrap(), &value), value);
    }

    #[test]
    fn proptest_u32_arrays_round_trip(items in prop::collection::vec(any::<u32>(), 0..8)) {
        let table = arrays();
        let value = SqlValue::array(items);
        prop_assert_eq!(round_trip(table.field("counts").unwrap(), &value), value);
    }
}
