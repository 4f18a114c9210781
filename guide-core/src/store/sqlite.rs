//! SQLite-backed [`GuideStore`].

use std::{fmt, time::Duration};

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use rusqlite::{Connection, OptionalExtension, Row, ffi};

use super::schema::initialise_schema;
use super::{
    GuideStore, StoreError, ensure_transient_guide, ensure_transient_poi, persisted_guide_id,
    persisted_poi_id,
};
use crate::{Coordinate, Guide, GuideId, PoiId, PointOfInterest, ValidationError};

/// How long a writer waits for a competing writer's lock before failing.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const GUIDE_TABLE: &str = "guide";
const POI_TABLE: &str = "poi";

const SELECT_GUIDE: &str = "SELECT id, name, description, latitude, longitude FROM guide";
const SELECT_POI: &str = "SELECT id, guide_id, name, description, latitude, longitude FROM poi";

/// Connection settings for [`SqliteGuideStore::open_with`].
///
/// Settings apply once, when the store opens, and hold for the lifetime of
/// the connection. Foreign key enforcement is always on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteStoreConfig {
    /// Location of the database file. Missing parent directories are created.
    pub path: Utf8PathBuf,
    /// Time a blocked writer keeps retrying before reporting an error.
    pub busy_timeout: Duration,
    /// Enable write-ahead logging so readers proceed during a write.
    pub write_ahead_log: bool,
}

impl SqliteStoreConfig {
    /// Default settings for the database at `path`.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            write_ahead_log: true,
        }
    }

    /// Override the busy timeout.
    #[must_use]
    pub const fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    /// Toggle write-ahead logging.
    #[must_use]
    pub const fn with_write_ahead_log(mut self, enabled: bool) -> Self {
        self.write_ahead_log = enabled;
        self
    }
}

/// Guide store persisted in a single SQLite database.
///
/// The store owns its connection; every caller goes through the store's
/// operations. Opening applies the connection settings and initialises the
/// schema. The handle is released by [`close`](Self::close), or on drop.
///
/// # Examples
/// ```
/// use guide_core::{EntityOptions, Guide, GuideStore, PointOfInterest, SqliteGuideStore};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut store = SqliteGuideStore::open_in_memory()?;
/// let mut guide = Guide::new(
///     "San Cristobal",
///     EntityOptions::default().with_coordinates(16.7371, -92.6375),
/// )?;
/// let guide_id = store.create_guide(&mut guide)?;
///
/// let mut poi = PointOfInterest::new(
///     "Cafeología",
///     guide_id,
///     EntityOptions::default().with_coordinates(16.737393, -92.635857),
/// )?;
/// store.create_poi(&mut poi)?;
///
/// assert_eq!(store.get_all_pois(guide_id)?.len(), 1);
/// store.close()?;
/// # Ok(())
/// # }
/// ```
pub struct SqliteGuideStore {
    connection: Connection,
    location: Option<Utf8PathBuf>,
}

impl fmt::Debug for SqliteGuideStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteGuideStore")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

impl SqliteGuideStore {
    /// Open (or create) the database at `path` with default settings.
    ///
    /// # Errors
    /// As for [`open_with`](Self::open_with).
    pub fn open(path: impl AsRef<Utf8Path>) -> Result<Self, StoreError> {
        Self::open_with(&SqliteStoreConfig::new(path.as_ref()))
    }

    /// Open (or create) a database with explicit settings.
    ///
    /// # Errors
    /// Returns [`StoreError::EmptyPath`] for an empty path,
    /// [`StoreError::CreateDirectory`] when a missing parent directory cannot
    /// be created, [`StoreError::OpenDatabase`] when SQLite cannot open the
    /// file, and the configuration or schema errors raised while preparing
    /// the connection.
    pub fn open_with(config: &SqliteStoreConfig) -> Result<Self, StoreError> {
        let path = config.path.as_path();
        if path.as_str().is_empty() {
            return Err(StoreError::EmptyPath);
        }
        if confirmed_missing(path) {
            info!("creating guide database at {path}");
        }
        guide_fs::ensure_parent_dir(path).map_err(|source| StoreError::CreateDirectory {
            path: path.to_path_buf(),
            source,
        })?;

        let connection =
            Connection::open(path.as_std_path()).map_err(|source| StoreError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        Self::initialise(connection, config, Some(path.to_path_buf()))
    }

    /// Open a private in-memory database. Write-ahead logging does not apply.
    ///
    /// # Errors
    /// Returns [`StoreError::OpenDatabase`] when SQLite cannot allocate the
    /// database, or a schema error while initialising it.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let connection =
            Connection::open_in_memory().map_err(|source| StoreError::OpenDatabase {
                path: Utf8PathBuf::from(":memory:"),
                source,
            })?;
        let config = SqliteStoreConfig::new(":memory:").with_write_ahead_log(false);
        Self::initialise(connection, &config, None)
    }

    fn initialise(
        mut connection: Connection,
        config: &SqliteStoreConfig,
        location: Option<Utf8PathBuf>,
    ) -> Result<Self, StoreError> {
        configure_connection(&connection, config)?;
        initialise_schema(&mut connection)?;
        debug!("opened guide store at {}", config.path);
        Ok(Self {
            connection,
            location,
        })
    }

    /// Database file backing the store; `None` for in-memory stores.
    #[must_use]
    pub fn location(&self) -> Option<&Utf8Path> {
        self.location.as_deref()
    }

    /// Release the connection.
    ///
    /// # Errors
    /// Returns [`StoreError::Close`] with the error SQLite raises on close.
    pub fn close(self) -> Result<(), StoreError> {
        self.connection
            .close()
            .map_err(|(_, source)| StoreError::Close { source })
    }

    fn query_guides(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
        operation: &'static str,
    ) -> Result<Vec<Guide>, StoreError> {
        let database = |source: rusqlite::Error| StoreError::Database { operation, source };
        let mut statement = self.connection.prepare_cached(sql).map_err(database)?;
        let rows = statement
            .query_map(params, GuideRow::from_row)
            .map_err(database)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(database)?;
        rows.into_iter().map(GuideRow::into_guide).collect()
    }

    fn query_pois(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
        operation: &'static str,
    ) -> Result<Vec<PointOfInterest>, StoreError> {
        let database = |source: rusqlite::Error| StoreError::Database { operation, source };
        let mut statement = self.connection.prepare_cached(sql).map_err(database)?;
        let rows = statement
            .query_map(params, PoiRow::from_row)
            .map_err(database)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(database)?;
        rows.into_iter().map(PoiRow::into_poi).collect()
    }
}

/// Whether `path` is known not to exist yet. A failed check says nothing.
fn confirmed_missing(path: &Utf8Path) -> bool {
    match guide_fs::file_is_file(path) {
        Ok(exists) => !exists,
        Err(error) => {
            debug!("could not check for an existing database at {path}: {error}");
            false
        }
    }
}

fn configure_connection(
    connection: &Connection,
    config: &SqliteStoreConfig,
) -> Result<(), StoreError> {
    connection
        .busy_timeout(config.busy_timeout)
        .map_err(|source| StoreError::Configure {
            setting: "busy_timeout",
            source,
        })?;
    connection
        .pragma_update(None, "foreign_keys", true)
        .map_err(|source| StoreError::Configure {
            setting: "foreign_keys",
            source,
        })?;
    if config.write_ahead_log {
        let mode: String = connection
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
            .map_err(|source| StoreError::Configure {
                setting: "journal_mode",
                source,
            })?;
        debug!("SQLite journal mode is {mode}");
    }
    Ok(())
}

fn is_foreign_key_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}

impl GuideStore for SqliteGuideStore {
    fn create_guide(&mut self, guide: &mut Guide) -> Result<GuideId, StoreError> {
        ensure_transient_guide(guide)?;
        let coordinate = guide.coordinate();
        self.connection
            .prepare_cached(
                "INSERT INTO guide (name, description, latitude, longitude)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .and_then(|mut statement| {
                statement.execute((
                    guide.name(),
                    guide.description(),
                    coordinate.latitude(),
                    coordinate.longitude(),
                ))
            })
            .map_err(|source| StoreError::Database {
                operation: "insert guide",
                source,
            })?;
        let id = GuideId::new(self.connection.last_insert_rowid());
        guide.assign_id(id);
        debug!("created guide {id}");
        Ok(id)
    }

    fn get_guide(&self, id: GuideId) -> Result<Option<Guide>, StoreError> {
        let row = self
            .connection
            .prepare_cached(&format!("{SELECT_GUIDE} WHERE id = ?1"))
            .and_then(|mut statement| {
                statement
                    .query_row([id.get()], GuideRow::from_row)
                    .optional()
            })
            .map_err(|source| StoreError::Database {
                operation: "read guide",
                source,
            })?;
        row.map(GuideRow::into_guide).transpose()
    }

    fn update_guide(&mut self, guide: &Guide) -> Result<(), StoreError> {
        let id = persisted_guide_id(guide)?;
        let coordinate = guide.coordinate();
        let changed = self
            .connection
            .prepare_cached(
                "UPDATE guide SET name = ?1, description = ?2, latitude = ?3, longitude = ?4
                 WHERE id = ?5",
            )
            .and_then(|mut statement| {
                statement.execute((
                    guide.name(),
                    guide.description(),
                    coordinate.latitude(),
                    coordinate.longitude(),
                    id.get(),
                ))
            })
            .map_err(|source| StoreError::Database {
                operation: "update guide",
                source,
            })?;
        if changed == 0 {
            return Err(StoreError::GuideNotFound { guide_id: id });
        }
        Ok(())
    }

    fn delete_guide(&mut self, id: GuideId) -> Result<(), StoreError> {
        let removed = self
            .connection
            .execute("DELETE FROM guide WHERE id = ?1", [id.get()])
            .map_err(|source| StoreError::Database {
                operation: "delete guide",
                source,
            })?;
        if removed > 0 {
            debug!("deleted guide {id} and its points of interest");
        }
        Ok(())
    }

    fn get_all_guides(&self) -> Result<Vec<Guide>, StoreError> {
        self.query_guides(&format!("{SELECT_GUIDE} ORDER BY id"), [], "list guides")
    }

    fn search(&self, prefix: &str) -> Result<Vec<Guide>, StoreError> {
        // `LIKE` folds ASCII case; comparing the leading characters does not.
        self.query_guides(
            &format!("{SELECT_GUIDE} WHERE substr(name, 1, length(?1)) = ?1 ORDER BY id"),
            [prefix],
            "search guides",
        )
    }

    fn count_guides(&self) -> Result<u64, StoreError> {
        self.connection
            .query_row("SELECT COUNT(*) FROM guide", [], |row| row.get::<_, i64>(0))
            .map(i64::unsigned_abs)
            .map_err(|source| StoreError::Database {
                operation: "count guides",
                source,
            })
    }

    fn create_poi(&mut self, poi: &mut PointOfInterest) -> Result<PoiId, StoreError> {
        ensure_transient_poi(poi)?;
        let guide_id = poi.guide_id();
        let coordinate = poi.coordinate();
        self.connection
            .prepare_cached(
                "INSERT INTO poi (name, description, latitude, longitude, guide_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .and_then(|mut statement| {
                statement.execute((
                    poi.name(),
                    poi.description(),
                    coordinate.latitude(),
                    coordinate.longitude(),
                    guide_id.get(),
                ))
            })
            .map_err(|source| {
                if is_foreign_key_violation(&source) {
                    StoreError::GuideNotFound { guide_id }
                } else {
                    StoreError::Database {
                        operation: "insert point of interest",
                        source,
                    }
                }
            })?;
        let id = PoiId::new(self.connection.last_insert_rowid());
        poi.assign_id(id);
        debug!("created point of interest {id} under guide {guide_id}");
        Ok(id)
    }

    fn get_poi(
        &self,
        guide_id: GuideId,
        poi_id: PoiId,
    ) -> Result<Option<PointOfInterest>, StoreError> {
        let row = self
            .connection
            .prepare_cached(&format!("{SELECT_POI} WHERE id = ?1 AND guide_id = ?2"))
            .and_then(|mut statement| {
                statement
                    .query_row([poi_id.get(), guide_id.get()], PoiRow::from_row)
                    .optional()
            })
            .map_err(|source| StoreError::Database {
                operation: "read point of interest",
                source,
            })?;
        row.map(PoiRow::into_poi).transpose()
    }

    fn update_poi(&mut self, poi: &PointOfInterest) -> Result<(), StoreError> {
        let poi_id = persisted_poi_id(poi)?;
        let guide_id = poi.guide_id();
        let coordinate = poi.coordinate();
        let changed = self
            .connection
            .prepare_cached(
                "UPDATE poi SET name = ?1, description = ?2, latitude = ?3, longitude = ?4
                 WHERE id = ?5 AND guide_id = ?6",
            )
            .and_then(|mut statement| {
                statement.execute((
                    poi.name(),
                    poi.description(),
                    coordinate.latitude(),
                    coordinate.longitude(),
                    poi_id.get(),
                    guide_id.get(),
                ))
            })
            .map_err(|source| StoreError::Database {
                operation: "update point of interest",
                source,
            })?;
        if changed == 0 {
            return Err(StoreError::PoiNotFound { guide_id, poi_id });
        }
        Ok(())
    }

    fn delete_poi(&mut self, guide_id: GuideId, poi_id: PoiId) -> Result<(), StoreError> {
        self.connection
            .execute(
                "DELETE FROM poi WHERE id = ?1 AND guide_id = ?2",
                [poi_id.get(), guide_id.get()],
            )
            .map(|_| ())
            .map_err(|source| StoreError::Database {
                operation: "delete point of interest",
                source,
            })
    }

    fn get_all_pois(&self, guide_id: GuideId) -> Result<Vec<PointOfInterest>, StoreError> {
        self.query_pois(
            &format!("{SELECT_POI} WHERE guide_id = ?1 ORDER BY id"),
            [guide_id.get()],
            "list points of interest",
        )
    }
}

/// Raw `guide` row, validated separately so a bad row surfaces as
/// [`StoreError::CorruptRow`] rather than a SQLite error.
struct GuideRow {
    id: i64,
    name: String,
    description: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl GuideRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            latitude: row.get(3)?,
            longitude: row.get(4)?,
        })
    }

    fn into_guide(self) -> Result<Guide, StoreError> {
        let id = self.id;
        let corrupt = |source: ValidationError| StoreError::CorruptRow {
            table: GUIDE_TABLE,
            id,
            source,
        };
        let coordinate = Coordinate::new(self.latitude, self.longitude).map_err(corrupt)?;
        Guide::restore(GuideId::new(id), self.name, self.description, coordinate).map_err(corrupt)
    }
}

/// Raw `poi` row.
struct PoiRow {
    id: i64,
    guide_id: i64,
    name: String,
    description: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl PoiRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            guide_id: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            latitude: row.get(4)?,
            longitude: row.get(5)?,
        })
    }

    fn into_poi(self) -> Result<PointOfInterest, StoreError> {
        let id = self.id;
        let corrupt = |source: ValidationError| StoreError::CorruptRow {
            table: POI_TABLE,
            id,
            source,
        };
        let coordinate = Coordinate::new(self.latitude, self.longitude).map_err(corrupt)?;
        PointOfInterest::restore(
            PoiId::new(id),
            GuideId::new(self.guide_id),
            self.name,
            self.description,
            coordinate,
        )
        .map_err(corrupt)
    }
}
