//! SQLite schema definitions for the racing and sports catalogs.
//!
//! The racing and sports catalogs live in separate database files, so each
//! gets its own DDL entry point. All statements are idempotent; schema
//! creation runs explicitly when a repository is constructed, before any
//! traffic is served.

use rusqlite::{Connection, Result};

/// Create the races table and its indexes.
pub fn create_racing_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS races (
            id INTEGER PRIMARY KEY,
            meeting_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            number INTEGER NOT NULL,
            visible INTEGER NOT NULL,
            advertised_start_time TEXT NOT NULL
        )
        "#,
        [],
    )?;

    // List queries always order on advertised_start_time.
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_races_start ON races(advertised_start_time)",
        [],
    )?;

    Ok(())
}

/// Create the sports events table.
pub fn create_sports_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS sports (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            city_address TEXT NOT NULL,
            num_of_participants INTEGER NOT NULL,
            advertised_start_time TEXT NOT NULL
        )
        "#,
        [],
    )?;

    Ok(())
}
