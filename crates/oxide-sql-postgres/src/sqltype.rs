//! `PostgreSQL` column type mapping.

use oxide_sql_core::schema::{FieldDef, FieldKind, HostType};
use oxide_sql_core::sqltype;

pub const SMALL_SERIAL: &str = "SMALLSERIAL";
pub const SERIAL: &str = "SERIAL";
pub const BIG_SERIAL: &str = "BIGSERIAL";
pub const TIMESTAMPTZ: &str = "TIMESTAMPTZ";
pub const BYTEA: &str = "BYTEA";
pub const UUID: &str = "UUID";

/// Returns the column type of a field.
///
/// An explicit SQL type always wins. Arrays are typed after their element,
/// so `Vec<String>` with [`FieldKind::Array`] becomes `VARCHAR[]`.
pub fn field_sql_type(field: &FieldDef) -> String {
    if let Some(user) = field.user_sql_type() {
        return user.to_string();
    }

    match field.kind() {
        FieldKind::Composite(name) => return name.clone(),
        FieldKind::Hstore => return sqltype::HSTORE.to_string(),
        FieldKind::Array => {
            if let Some(elem) = field.host_type().elem() {
                return array_sql_type(elem);
            }
        }
        FieldKind::Scalar => {}
    }

    sql_type(field.host_type()).to_string()
}

/// Returns the array type for `elem`, one `[]` per nesting level.
fn array_sql_type(elem: &HostType) -> String {
    let mut dims = 1;
    let mut elem = elem;
    while let HostType::Seq(inner) = elem.indirect() {
        if *inner.indirect() == HostType::U8 {
            break;
        }
        dims += 1;
        elem = inner.as_ref();
    }
    format!("{}{}", sql_type(elem), "[]".repeat(dims))
}

/// Returns the column type of a host type.
pub fn sql_type(ty: &HostType) -> &'static str {
    match ty.indirect() {
        HostType::Bytes => BYTEA,
        HostType::Uuid => UUID,
        HostType::Timestamp => TIMESTAMPTZ,
        HostType::Json | HostType::Map(..) | HostType::Struct(_) => sqltype::JSONB,
        HostType::Seq(elem) if *elem.indirect() == HostType::U8 => BYTEA,
        HostType::Seq(_) => sqltype::JSONB,
        other => sqltype::discover_sql_type(other),
    }
}

/// Returns the auto-incrementing counter type for an integer column type.
pub fn serial_type(sql_type: &str) -> Option<&'static str> {
    if sql_type.eq_ignore_ascii_case(sqltype::SMALLINT) {
        Some(SMALL_SERIAL)
    } else if sql_type.eq_ignore_ascii_case(sqltype::INTEGER) {
        Some(SERIAL)
    } else if sql_type.eq_ignore_ascii_case(sqltype::BIGINT) {
        Some(BIG_SERIAL)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_mapping() {
        assert_eq!(sql_type(&HostType::Bool), "BOOLEAN");
        assert_eq!(sql_type(&HostType::U32), "INTEGER");
        assert_eq!(sql_type(&HostType::F64), "DOUBLE PRECISION");
        assert_eq!(sql_type(&HostType::String), "VARCHAR");
        assert_eq!(sql_type(&HostType::Bytes), "BYTEA");
        assert_eq!(sql_type(&HostType::seq(HostType::U8)), "BYTEA");
        assert_eq!(sql_type(&HostType::Timestamp), "TIMESTAMPTZ");
        assert_eq!(sql_type(&HostType::option(HostType::Uuid)), "UUID");
    }

    #[test]
    fn test_structured_types_are_jsonb() {
        assert_eq!(sql_type(&HostType::Json), "JSONB");
        assert_eq!(sql_type(&HostType::Struct("Address".into())), "JSONB");
        assert_eq!(sql_type(&HostType::seq(HostType::I64)), "JSONB");
        assert_eq!(
            sql_type(&HostType::map(HostType::String, HostType::I64)),
            "JSONB"
        );
    }

    fn array_field(host_type: HostType) -> FieldDef {
        FieldDef::new("f", host_type).array()
    }

    #[test]
    fn test_field_sql_type_precedence() {
        let tags = HostType::seq(HostType::String);
        assert_eq!(field_sql_type(&array_field(tags.clone())), "VARCHAR[]");

        let field = FieldDef::new("tags", tags).sql_type("text[]");
        assert_eq!(field_sql_type(&field), "text[]");

        let attrs = HostType::map(HostType::String, HostType::String);
        let field = FieldDef::new("attrs", attrs).hstore();
        assert_eq!(field_sql_type(&field), "HSTORE");

        let home = HostType::Struct("Address".into());
        let field = FieldDef::new("home", home).composite("address");
        assert_eq!(field_sql_type(&field), "address");
    }

    #[test]
    fn test_nested_array_types() {
        let grid = HostType::seq(HostType::seq(HostType::I32));
        assert_eq!(field_sql_type(&array_field(grid)), "INTEGER[][]");

        let blobs = HostType::seq(HostType::seq(HostType::U8));
        assert_eq!(field_sql_type(&array_field(blobs)), "BYTEA[]");
    }

    #[test]
    fn test_array_kind_without_sequence_falls_back() {
        assert_eq!(field_sql_type(&array_field(HostType::I32)), "INTEGER");
    }

    #[test]
    fn test_serial_types() {
        assert_eq!(serial_type("SMALLINT"), Some(SMALL_SERIAL));
        assert_eq!(serial_type("integer"), Some(SERIAL));
        assert_eq!(serial_type("BIGINT"), Some(BIG_SERIAL));
        assert_eq!(serial_type("VARCHAR"), None);
    }
}
