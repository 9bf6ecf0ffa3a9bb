//! Error types shared by dialects and field codecs.

use thiserror::Error;

/// Errors raised by dialect start-up checks and field codecs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialectError {
    /// The dialect was built against a different core version.
    #[error("dialect and core must have the same version: v{dialect} != v{core}")]
    VersionMismatch {
        /// Version declared by the dialect crate.
        dialect: String,
        /// Version of the core crate.
        core: String,
    },

    /// A value does not have the shape the field's host type requires.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// What the codec can handle.
        expected: String,
        /// What it was given.
        found: String,
    },

    /// A literal could not be parsed.
    #[error("parse error at offset {position}: {message}")]
    Parse {
        /// Byte offset into the literal.
        position: usize,
        /// The error message.
        message: String,
    },
}

impl DialectError {
    /// Creates a type-mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates a parse error at the given byte offset.
    #[must_use]
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }

    /// Returns true for [`DialectError::TypeMismatch`].
    #[must_use]
    pub const fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    /// Returns true for [`DialectError::Parse`].
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Result type alias for dialect operations.
pub type Result<T> = std::result::Result<T, DialectError>;
