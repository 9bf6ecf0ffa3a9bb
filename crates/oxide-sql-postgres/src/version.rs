//! Start-up checks.

use oxide_sql_core::{DialectError, Result};
use tracing::{error, info};

use crate::dialect::{PgDialect, PgOptions};

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Checks that `core_version` is the version this crate was released with.
///
/// # Errors
///
/// Returns [`DialectError::VersionMismatch`] if the versions differ.
pub fn check_version(core_version: &str) -> Result<()> {
    if core_version == VERSION {
        return Ok(());
    }
    error!(
        dialect = VERSION,
        core = core_version,
        "dialect and core versions differ"
    );
    Err(DialectError::VersionMismatch {
        dialect: VERSION.to_string(),
        core: core_version.to_string(),
    })
}

/// Checks the core version and builds the dialect.
///
/// Call once at start-up, usually as
/// `init(oxide_sql_core::VERSION, options)`. A mismatch is meant to abort
/// the application.
///
/// # Errors
///
/// Returns [`DialectError::VersionMismatch`] if the versions differ.
pub fn init(core_version: &str, options: PgOptions) -> Result<PgDialect> {
    check_version(core_version)?;
    info!(
        version = VERSION,
        prepared = options.prepared,
        "postgres dialect initialized"
    );
    Ok(PgDialect::with_options(options))
}
