//! SQLite schema for guides and points of interest.

use log::debug;
use rusqlite::{Connection, OptionalExtension, Transaction};

use super::StoreError;

/// Schema version written by this build.
pub const SCHEMA_VERSION: i64 = 1;

/// Create the guide tables inside an open connection.
///
/// Idempotent: tables, indexes and the version row are only created when
/// missing. An existing database must already be at [`SCHEMA_VERSION`];
/// anything else is rejected so migrations can be applied explicitly.
pub(crate) fn initialise_schema(connection: &mut Connection) -> Result<(), StoreError> {
    let transaction = connection
        .transaction()
        .map_err(|source| StoreError::Migration {
            step: "begin schema transaction",
            source,
        })?;

    create_tables(&transaction)?;
    create_indexes(&transaction)?;
    ensure_schema_version(&transaction)?;

    transaction
        .commit()
        .map_err(|source| StoreError::Migration {
            step: "commit schema transaction",
            source,
        })?;
    debug!("guide schema version {SCHEMA_VERSION} ready");
    Ok(())
}

fn create_tables(transaction: &Transaction<'_>) -> Result<(), StoreError> {
    // AUTOINCREMENT keeps SQLite from handing out the id of a deleted row.
    run_migration_step(
        transaction,
        "create guide",
        "CREATE TABLE IF NOT EXISTS guide (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL CHECK (name <> ''),
            description TEXT,
            latitude REAL NOT NULL CHECK (latitude BETWEEN -90 AND 90),
            longitude REAL NOT NULL CHECK (longitude BETWEEN -180 AND 180)
        )",
    )?;
    run_migration_step(
        transaction,
        "create poi",
        "CREATE TABLE IF NOT EXISTS poi (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL CHECK (name <> ''),
            description TEXT,
            latitude REAL NOT NULL CHECK (latitude BETWEEN -90 AND 90),
            longitude REAL NOT NULL CHECK (longitude BETWEEN -180 AND 180),
            guide_id INTEGER NOT NULL,
            FOREIGN KEY (guide_id) REFERENCES guide(id) ON DELETE CASCADE
        )",
    )
}

fn create_indexes(transaction: &Transaction<'_>) -> Result<(), StoreError> {
    run_migration_step(
        transaction,
        "index poi",
        "CREATE INDEX IF NOT EXISTS idx_poi_guide_id ON poi(guide_id, id)",
    )
}

fn ensure_schema_version(transaction: &Transaction<'_>) -> Result<(), StoreError> {
    run_migration_step(
        transaction,
        "create schema version table",
        "CREATE TABLE IF NOT EXISTS guide_schema_version (
            version INTEGER PRIMARY KEY CHECK (version > 0),
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
        ) WITHOUT ROWID",
    )?;

    let existing_version: Option<i64> = transaction
        .query_row(
            "SELECT version FROM guide_schema_version LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()
        .map_err(|source| StoreError::Migration {
            step: "read schema version",
            source,
        })?;

    match existing_version {
        Some(version) if version == SCHEMA_VERSION => {}
        Some(found) => {
            return Err(StoreError::VersionMismatch {
                expected: SCHEMA_VERSION,
                found,
            });
        }
        None => {
            transaction
                .execute(
                    "INSERT INTO guide_schema_version (version) VALUES (?1)",
                    [SCHEMA_VERSION],
                )
                .map_err(|source| StoreError::Migration {
                    step: "record schema version",
                    source,
                })?;
        }
    }

    Ok(())
}

fn run_migration_step(
    transaction: &Transaction<'_>,
    step: &'static str,
    sql: &str,
) -> Result<(), StoreError> {
    transaction
        .execute(sql, [])
        .map(|_| ())
        .map_err(|source| StoreError::Migration { step, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn connection() -> Connection {
        let mut connection = Connection::open_in_memory().expect("create in-memory database");
        initialise_schema(&mut connection).expect("initialise schema");
        connection
    }

    #[rstest]
    fn initialisation_is_idempotent(mut connection: Connection) {
        initialise_schema(&mut connection).expect("second initialisation");
        let versions: i64 = connection
            .query_row("SELECT COUNT(*) FROM guide_schema_version", [], |row| {
                row.get(0)
            })
            .expect("count versions");
        assert_eq!(versions, 1);
    }

    #[rstest]
    fn rejects_unknown_schema_version(mut connection: Connection) {
        connection
            .execute("UPDATE guide_schema_version SET version = 99", [])
            .expect("bump version");
        let err = initialise_schema(&mut connection).expect_err("mismatched version");
        assert!(matches!(
            err,
            StoreError::VersionMismatch {
                expected: SCHEMA_VERSION,
                found: 99
            }
        ));
    }

    #[rstest]
    #[case("INSERT INTO guide (name, latitude, longitude) VALUES ('', 0, 0)")]
    #[case("INSERT INTO guide (name, latitude, longitude) VALUES ('North', 91, 0)")]
    #[case("INSERT INTO guide (name, latitude, longitude) VALUES ('East', 0, 181)")]
    fn check_constraints_mirror_domain_rules(connection: Connection, #[case] sql: &str) {
        assert!(connection.execute(sql, []).is_err());
    }

    #[rstest]
    fn poi_requires_existing_guide_when_foreign_keys_are_on(connection: Connection) {
        connection
            .pragma_update(None, "foreign_keys", true)
            .expect("enable foreign keys");
        let result = connection.execute(
            "INSERT INTO poi (name, latitude, longitude, guide_id) VALUES ('Ghost', 0, 0, 42)",
            [],
        );
        assert!(result.is_err());
    }
}
