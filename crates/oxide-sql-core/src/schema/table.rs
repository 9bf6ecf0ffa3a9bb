//! Tables and the table registry.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use super::{Field, FieldDef};
use crate::dialect::{Dialect, Feature};

/// Schema definition of a table, before registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDef {
    name: String,
    fields: Vec<FieldDef>,
}

impl TableDef {
    /// Creates a table definition without fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a field.
    #[must_use]
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field definitions in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }
}

/// A registered table.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    fields: Vec<Field>,
}

impl Table {
    /// Resolves every field of `def` with `dialect`.
    ///
    /// Fields left without a resolution by [`Dialect::on_table`] fall back to
    /// [`Dialect::resolve_field`]; surplus resolutions are discarded.
    pub fn resolve<D: Dialect + ?Sized>(dialect: &D, def: TableDef) -> Self {
        let mut resolutions = dialect.on_table(&def).into_iter();
        if resolutions.len() != def.fields.len() {
            warn!(
                dialect = %dialect.name(),
                table = %def.name,
                fields = def.fields.len(),
                resolutions = resolutions.len(),
                "dialect resolved a different number of fields"
            );
        }
        let fields = def
            .fields
            .into_iter()
            .map(|field| {
                let resolution = resolutions
                    .next()
                    .unwrap_or_else(|| dialect.resolve_field(&field));
                Field::new(field, resolution)
            })
            .collect();
        Self {
            name: def.name,
            fields,
        }
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks a field up by column name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Renders a `CREATE TABLE` statement.
    ///
    /// `IF NOT EXISTS` is only emitted when the dialect supports it.
    pub fn create_table_sql<D: Dialect + ?Sized>(
        &self,
        dialect: &D,
        if_not_exists: bool,
    ) -> String {
        let mut sql = String::from("CREATE TABLE ");
        if if_not_exists && dialect.has_feature(Feature::TABLE_NOT_EXISTS) {
            sql.push_str("IF NOT EXISTS ");
        }
        dialect.append_ident(&mut sql, &self.name);
        sql.push_str(" (");

        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            dialect.append_ident(&mut sql, field.name());
            sql.push(' ');
            sql.push_str(field.create_table_sql_type());
            if field.def().is_not_null() {
                sql.push_str(" NOT NULL");
            }
            if field.def().is_identity() && dialect.has_feature(Feature::GENERATED_IDENTITY) {
                sql.push_str(" GENERATED BY DEFAULT AS IDENTITY");
            }
        }

        let pks: Vec<&Field> = self
            .fields
            .iter()
            .filter(|f| f.def().is_primary_key())
            .collect();
        if !pks.is_empty() {
            sql.push_str(", PRIMARY KEY (");
            for (i, field) in pks.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                dialect.append_ident(&mut sql, field.name());
            }
            sql.push(')');
        }

        sql.push(')');
        sql
    }
}

/// Process-wide cache of registered tables.
///
/// Each table is resolved once, on first registration; later lookups share
/// the same immutable [`Table`].
#[derive(Debug)]
pub struct Tables {
    dialect: Arc<dyn Dialect>,
    tables: RwLock<HashMap<String, Arc<Table>>>,
}

impl Tables {
    /// Creates an empty registry bound to `dialect`.
    pub fn new(dialect: Arc<dyn Dialect>) -> Self {
        Self {
            dialect,
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the dialect tables are resolved with.
    #[must_use]
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Registers a table, or returns the already registered one with the
    /// same name.
    pub fn register(&self, def: TableDef) -> Arc<Table> {
        if let Some(table) = self.get(def.name()) {
            return table;
        }

        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have won the race while we waited for the lock.
        if let Some(table) = tables.get(def.name()) {
            return Arc::clone(table);
        }

        let table = Arc::new(Table::resolve(self.dialect.as_ref(), def));
        debug!(
            dialect = %self.dialect.name(),
            table = %table.name(),
            fields = table.fields().len(),
            "registered table"
        );
        tables.insert(table.name().to_string(), Arc::clone(&table));
        table
    }

    /// Returns a registered table.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Table>> {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Returns the number of registered tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no table is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
