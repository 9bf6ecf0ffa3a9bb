//! SQL capability flags.
//!
//! A dialect advertises the SQL constructs its engine understands as a
//! [`Feature`] set. The set is fixed when the dialect is built and the query
//! builder tests membership before emitting a construct:
//!
//! ```rust
//! use oxide_sql_core::dialect::Feature;
//!
//! let features = Feature::CTE | Feature::RETURNING;
//! assert!(features.contains(Feature::RETURNING));
//! assert!((features & Feature::INSERT_ON_CONFLICT).is_empty());
//! ```

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// A set of SQL capabilities.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Feature(u64);

impl Feature {
    /// `WITH` common table expressions.
    pub const CTE: Self = Self(1 << 0);
    /// `WITH ... (VALUES ...)`.
    pub const WITH_VALUES: Self = Self(1 << 1);
    /// `RETURNING` on UPDATE and DELETE.
    pub const RETURNING: Self = Self(1 << 2);
    /// `INSERT ... RETURNING`.
    pub const INSERT_RETURNING: Self = Self(1 << 3);
    /// `OUTPUT` clause instead of `RETURNING`.
    pub const OUTPUT: Self = Self(1 << 4);
    /// `DEFAULT` as a value placeholder in INSERT.
    pub const DEFAULT_PLACEHOLDER: Self = Self(1 << 5);
    /// `expr::type` casts.
    pub const DOUBLE_COLON_CAST: Self = Self(1 << 6);
    /// `VALUES ROW(...)`.
    pub const VALUES_ROW: Self = Self(1 << 7);
    /// `UPDATE a, b SET ...`.
    pub const UPDATE_MULTI_TABLE: Self = Self(1 << 8);
    /// `INSERT INTO t AS alias`.
    pub const INSERT_TABLE_ALIAS: Self = Self(1 << 9);
    /// `UPDATE t AS alias`.
    pub const UPDATE_TABLE_ALIAS: Self = Self(1 << 10);
    /// `DELETE FROM t AS alias`.
    pub const DELETE_TABLE_ALIAS: Self = Self(1 << 11);
    /// `AUTO_INCREMENT` column keyword.
    pub const AUTO_INCREMENT: Self = Self(1 << 12);
    /// `IDENTITY` column keyword.
    pub const IDENTITY: Self = Self(1 << 13);
    /// `DROP TABLE ... CASCADE`.
    pub const TABLE_CASCADE: Self = Self(1 << 14);
    /// `TRUNCATE ... RESTART IDENTITY`.
    pub const TABLE_IDENTITY: Self = Self(1 << 15);
    /// `TRUNCATE TABLE`.
    pub const TABLE_TRUNCATE: Self = Self(1 << 16);
    /// `INSERT ... ON CONFLICT`.
    pub const INSERT_ON_CONFLICT: Self = Self(1 << 17);
    /// `INSERT ... ON DUPLICATE KEY UPDATE`.
    pub const INSERT_ON_DUPLICATE_KEY: Self = Self(1 << 18);
    /// `INSERT IGNORE`.
    pub const INSERT_IGNORE: Self = Self(1 << 19);
    /// `CREATE TABLE IF NOT EXISTS` / `DROP TABLE IF EXISTS`.
    pub const TABLE_NOT_EXISTS: Self = Self(1 << 20);
    /// `OFFSET ... FETCH NEXT`.
    pub const OFFSET_FETCH: Self = Self(1 << 21);
    /// `SELECT EXISTS(...)`.
    pub const SELECT_EXISTS: Self = Self(1 << 22);
    /// `UPDATE ... FROM other_table`.
    pub const UPDATE_FROM_TABLE: Self = Self(1 << 23);
    /// `SAVE TRANSACTION` savepoints.
    pub const MS_SAVEPOINT: Self = Self(1 << 24);
    /// `GENERATED BY DEFAULT AS IDENTITY` columns.
    pub const GENERATED_IDENTITY: Self = Self(1 << 25);
    /// `(a, b) IN ((1, 2), (3, 4))`.
    pub const COMPOSITE_IN: Self = Self(1 << 26);

    const NAMES: &'static [(Self, &'static str)] = &[
        (Self::CTE, "CTE"),
        (Self::WITH_VALUES, "WITH_VALUES"),
        (Self::RETURNING, "RETURNING"),
        (Self::INSERT_RETURNING, "INSERT_RETURNING"),
        (Self::OUTPUT, "OUTPUT"),
        (Self::DEFAULT_PLACEHOLDER, "DEFAULT_PLACEHOLDER"),
        (Self::DOUBLE_COLON_CAST, "DOUBLE_COLON_CAST"),
        (Self::VALUES_ROW, "VALUES_ROW"),
        (Self::UPDATE_MULTI_TABLE, "UPDATE_MULTI_TABLE"),
        (Self::INSERT_TABLE_ALIAS, "INSERT_TABLE_ALIAS"),
        (Self::UPDATE_TABLE_ALIAS, "UPDATE_TABLE_ALIAS"),
        (Self::DELETE_TABLE_ALIAS, "DELETE_TABLE_ALIAS"),
        (Self::AUTO_INCREMENT, "AUTO_INCREMENT"),
        (Self::IDENTITY, "IDENTITY"),
        (Self::TABLE_CASCADE, "TABLE_CASCADE"),
        (Self::TABLE_IDENTITY, "TABLE_IDENTITY"),
        (Self::TABLE_TRUNCATE, "TABLE_TRUNCATE"),
        (Self::INSERT_ON_CONFLICT, "INSERT_ON_CONFLICT"),
        (Self::INSERT_ON_DUPLICATE_KEY, "INSERT_ON_DUPLICATE_KEY"),
        (Self::INSERT_IGNORE, "INSERT_IGNORE"),
        (Self::TABLE_NOT_EXISTS, "TABLE_NOT_EXISTS"),
        (Self::OFFSET_FETCH, "OFFSET_FETCH"),
        (Self::SELECT_EXISTS, "SELECT_EXISTS"),
        (Self::UPDATE_FROM_TABLE, "UPDATE_FROM_TABLE"),
        (Self::MS_SAVEPOINT, "MS_SAVEPOINT"),
        (Self::GENERATED_IDENTITY, "GENERATED_IDENTITY"),
        (Self::COMPOSITE_IN, "COMPOSITE_IN"),
    ];

    /// Returns the empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Returns true if no capability is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every capability in `other` is also in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two sets. Usable in `const` context.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns the names of the capabilities in this set.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMES
            .iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
    }
}

impl BitOr for Feature {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for Feature {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Feature {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Debug for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Feature(")?;
        for (i, name) in self.names().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{name}")?;
        }
        write!(f, ")")
    }
}
