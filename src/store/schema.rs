/*!
 * Schema definitions and migration handling for the translation store.
 *
 * The store keeps two application tables: `translations` holds the
 * key/locale/value records with soft-delete tombstones, and `api_tokens`
 * holds hashed bearer tokens for the request pipeline. A `schema_version`
 * table tracks the installed schema so future versions can migrate in place.
 */

use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info};
use rusqlite::Connection;

/// Current schema version for this build.
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema, creating tables when missing and
/// migrating older layouts when needed.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        info!("Creating new database schema (version {})", SCHEMA_VERSION);
        create_all_tables(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if version < SCHEMA_VERSION {
        info!(
            "Migrating database schema from version {} to {}",
            version, SCHEMA_VERSION
        );
        migrate_schema(conn, version)?;
    } else {
        debug!("Database schema is up to date (version {})", version);
    }

    Ok(())
}

/// Read the installed schema version, or 0 when the database is empty.
fn get_schema_version(conn: &Connection) -> Result<i32> {
    let table_exists: bool = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
            [],
            |row| row.get::<_, i32>(0).map(|count| count > 0),
        )
        .context("Failed to check for schema_version table")?;

    if !table_exists {
        return Ok(0);
    }

    conn.query_row("SELECT version FROM schema_version WHERE id = 1", [], |row| {
        row.get(0)
    })
    .context("Failed to read schema version")
}

/// Record the installed schema version.
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT INTO schema_version (id, version, updated_at)
         VALUES (1, ?1, ?2)
         ON CONFLICT(id) DO UPDATE SET version = ?1, updated_at = ?2",
        rusqlite::params![version, Utc::now().to_rfc3339()],
    )
    .context("Failed to set schema version")?;

    Ok(())
}

/// Create all tables for a fresh database.
fn create_all_tables(conn: &Connection) -> Result<()> {
    // Enable WAL mode for better concurrency and crash recovery
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Create schema version table
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;

    // Create translations table
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS translations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            key TEXT NOT NULL,
            locale TEXT NOT NULL,
            value TEXT NOT NULL,
            context TEXT NOT NULL DEFAULT 'web',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            deleted_at TEXT
        );
        "#,
    )?;

    // Create indexes for the upsert identity, locale listing and
    // live-record filters
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_translations_key_locale
            ON translations (key, locale);
        CREATE INDEX IF NOT EXISTS idx_translations_locale
            ON translations (locale);
        CREATE INDEX IF NOT EXISTS idx_translations_deleted_at
            ON translations (deleted_at);
        "#,
    )?;

    // Create api_tokens table
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS api_tokens (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            token_hash TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL,
            last_used_at TEXT
        );
        "#,
    )?;

    debug!("Created database tables and indexes");
    Ok(())
}

/// Apply migrations from `from_version` up to [`SCHEMA_VERSION`].
fn migrate_schema(conn: &Connection, from_version: i32) -> Result<()> {
    // Version 1 is the first public layout. Future versions add stepwise
    // migrations here, bumping through each intermediate version.
    let _ = conn;
    anyhow::bail!(
        "No migration path from schema version {} to {}",
        from_version,
        SCHEMA_VERSION
    )
}

/// Drop all application tables. Only used by tests that need a clean slate.
#[cfg(test)]
pub fn drop_all_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        DROP TABLE IF EXISTS translations;
        DROP TABLE IF EXISTS api_tokens;
        DROP TABLE IF EXISTS schema_version;
        ",
    )
    .context("Failed to drop database tables")?;

    Ok(())
}
