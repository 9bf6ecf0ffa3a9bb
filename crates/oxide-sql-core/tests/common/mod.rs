#![allow(dead_code)]

use oxide_sql_core::dialect::{Dialect, DialectName, Feature};
use oxide_sql_core::schema::{FieldDef, FieldResolution};
use oxide_sql_core::sqltype::discover_sql_type;

/// A `MySQL`-flavoured dialect used to exercise the trait defaults.
#[derive(Debug, Default)]
pub struct BacktickDialect;

impl Dialect for BacktickDialect {
    fn name(&self) -> DialectName {
        DialectName::Mysql
    }

    fn features(&self) -> Feature {
        Feature::AUTO_INCREMENT | Feature::INSERT_ON_DUPLICATE_KEY | Feature::TABLE_NOT_EXISTS
    }

    fn ident_quote(&self) -> char {
        '`'
    }

    fn resolve_field(&self, field: &FieldDef) -> FieldResolution {
        let sql_type = field
            .user_sql_type()
            .unwrap_or_else(|| discover_sql_type(field.host_type()));
        let resolution = FieldResolution::new(sql_type);
        if field.is_auto_increment() {
            let sql_type = format!("{} AUTO_INCREMENT", resolution.sql_type());
            return resolution.with_create_table_sql_type(sql_type);
        }
        resolution
    }
}
