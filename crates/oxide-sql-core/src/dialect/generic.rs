//! Generic SQL dialect.

use super::{Dialect, DialectName};

/// A generic SQL dialect using ANSI SQL standards.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> DialectName {
        DialectName::Generic
    }
}
