//! Errors raised by [`GuideStore`](super::GuideStore) implementations.

#[cfg(feature = "store-sqlite")]
use camino::Utf8PathBuf;
use thiserror::Error;

use crate::{GuideId, PoiId, ValidationError};

/// Error raised by a store operation.
///
/// A lookup miss is not an error: getters return `Ok(None)`. Only updates
/// report absence, as [`GuideNotFound`](Self::GuideNotFound) or
/// [`PoiNotFound`](Self::PoiNotFound).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The guide does not exist.
    #[error("guide {guide_id} not found")]
    GuideNotFound {
        /// Identifier that failed to resolve.
        guide_id: GuideId,
    },
    /// The point of interest does not exist under the given guide.
    #[error("point of interest {poi_id} not found in guide {guide_id}")]
    PoiNotFound {
        /// Guide the point of interest was looked up under.
        guide_id: GuideId,
        /// Identifier that failed to resolve.
        poi_id: PoiId,
    },
    /// An update was attempted on an entity without an id.
    #[error("{entity} has not been persisted yet")]
    NotPersisted {
        /// Kind of entity, `"guide"` or `"point of interest"`.
        entity: &'static str,
    },
    /// A create was attempted on an entity that already has an id.
    #[error("{entity} {id} has already been persisted")]
    AlreadyPersisted {
        /// Kind of entity, `"guide"` or `"point of interest"`.
        entity: &'static str,
        /// Identifier the entity already carries.
        id: i64,
    },
    /// A stored row no longer passes domain validation.
    #[error("stored {table} row {id} is invalid: {source}")]
    CorruptRow {
        /// Table holding the row.
        table: &'static str,
        /// Primary key of the row.
        id: i64,
        /// Validation failure.
        #[source]
        source: ValidationError,
    },
    /// An empty path was supplied for the database file.
    #[cfg(feature = "store-sqlite")]
    #[error("database path cannot be empty")]
    EmptyPath,
    /// The database file's parent directory could not be created.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to create parent directory for {path}")]
    CreateDirectory {
        /// Database path whose parent was being created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite database failed.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to open SQLite database at {path}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Applying a connection setting failed.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to apply SQLite setting '{setting}'")]
    Configure {
        /// Setting being applied.
        setting: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A schema migration step failed.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to execute migration step '{step}'")]
    Migration {
        /// Step that failed.
        step: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// The database was created by an incompatible schema version.
    #[cfg(feature = "store-sqlite")]
    #[error(
        "expected guide schema version {expected} but found {found}; apply migrations before retrying"
    )]
    VersionMismatch {
        /// Version this build understands.
        expected: i64,
        /// Version recorded in the database.
        found: i64,
    },
    /// A query or statement failed, including busy-timeout exhaustion and
    /// constraint violations.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to {operation}")]
    Database {
        /// Operation being performed.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Closing the connection failed.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to close SQLite database")]
    Close {
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
}

impl StoreError {
    /// Whether the error reports a missing guide or point of interest.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::GuideNotFound { .. } | Self::PoiNotFound { .. }
        )
    }
}
