//! SQLite repositories for the racing and sports catalogs.
//!
//! Each repository owns one connection (the two catalogs live in separate
//! database files) and performs a single read round trip per call: compose
//! the query, execute, scan rows into domain records. Store failures are
//! surfaced immediately; a scan failure mid-sequence discards the whole
//! in-progress result rather than returning a truncated list.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use anyhow::Context;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, Connection, Row};
use thiserror::Error;

use super::query::{Predicate, SelectBuilder};
use super::schema::{create_racing_tables, create_sports_tables};
use crate::types::{Event, EventFilter, Race, RaceFilter, RaceStatus, SortOrder};

const RACES_SELECT: &str =
    "SELECT id, meeting_id, name, number, visible, advertised_start_time FROM races";
const SPORTS_SELECT: &str =
    "SELECT id, name, city_address, num_of_participants, advertised_start_time FROM sports";

/// Storage-level failure.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Query composition, execution or row-scan failure.
    #[error("store query failed: {0}")]
    Store(#[from] rusqlite::Error),
    /// More than one row matched a unique-key lookup.
    #[error("unique lookup for id {0} matched multiple rows")]
    DuplicateKey(i64),
}

/// Insert shape for a race. Status is derived, never stored.
#[derive(Debug, Clone)]
pub struct NewRace {
    pub id: i64,
    pub meeting_id: i64,
    pub name: String,
    pub number: i32,
    pub visible: bool,
    pub advertised_start_time: DateTime<Utc>,
}

/// Insert shape for a sporting event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub id: i64,
    pub name: String,
    pub city_address: String,
    pub num_of_participants: i64,
    pub advertised_start_time: DateTime<Utc>,
}

fn parse_start_time(column: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

/// Repository for the races catalog.
pub struct RaceRepository {
    conn: Mutex<Connection>,
}

impl RaceRepository {
    /// Open (or create) the racing database and run the schema DDL.
    pub fn open(db_path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create database directory")?;
        }

        let conn = Connection::open(db_path).context("Failed to open racing database")?;
        create_racing_tables(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory repository (for testing).
    #[cfg(test)]
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        create_racing_tables(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Insert a race (upsert).
    pub fn insert_race(&self, race: &NewRace) -> Result<(), StorageError> {
        self.conn().execute(
            r#"
            INSERT OR REPLACE INTO races
            (id, meeting_id, name, number, visible, advertised_start_time)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                race.id,
                race.meeting_id,
                race.name,
                race.number,
                race.visible,
                race.advertised_start_time.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// List races, optionally filtered, ordered by advertised start time.
    ///
    /// `now` is the evaluation instant for status resolution; callers pass
    /// it once so every row in the response is classified against the same
    /// snapshot.
    pub fn list(
        &self,
        filter: Option<&RaceFilter>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Race>, StorageError> {
        let mut builder = SelectBuilder::new(RACES_SELECT);

        if let Some(visible) = filter.and_then(|f| f.visible) {
            builder = builder.push(Predicate::EqualsBool {
                column: "visible",
                value: visible,
            });
        }

        let order = filter.and_then(|f| f.order_by).unwrap_or(SortOrder::Asc);
        let (sql, args) = builder.order_by("advertised_start_time", order).build();

        let conn = self.conn();
        let mut stmt = conn.prepare(&sql)?;
        let races = stmt
            .query_map(params_from_iter(args), |row| scan_race(row, now))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(races)
    }

    /// Fetch a single race by id.
    ///
    /// Zero rows is `Ok(None)`, left for the service layer to surface as
    /// NotFound. More than one row for the unique key is an invariant
    /// violation.
    pub fn get(&self, id: i64, now: DateTime<Utc>) -> Result<Option<Race>, StorageError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!("{} WHERE id = ?1", RACES_SELECT))?;
        let mut rows = stmt.query(params![id])?;

        let race = match rows.next()? {
            Some(row) => scan_race(row, now)?,
            None => return Ok(None),
        };

        if rows.next()?.is_some() {
            return Err(StorageError::DuplicateKey(id));
        }

        Ok(Some(race))
    }
}

fn scan_race(row: &Row<'_>, now: DateTime<Utc>) -> rusqlite::Result<Race> {
    let raw_start: String = row.get(5)?;
    let advertised_start_time = parse_start_time(5, &raw_start)?;

    Ok(Race {
        id: row.get(0)?,
        meeting_id: row.get(1)?,
        name: row.get(2)?,
        number: row.get(3)?,
        visible: row.get(4)?,
        advertised_start_time,
        status: RaceStatus::at(advertised_start_time, now),
    })
}

/// Repository for the sports events catalog.
pub struct EventRepository {
    conn: Mutex<Connection>,
}

impl EventRepository {
    /// Open (or create) the sports database and run the schema DDL.
    pub fn open(db_path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create database directory")?;
        }

        let conn = Connection::open(db_path).context("Failed to open sports database")?;
        create_sports_tables(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory repository (for testing).
    #[cfg(test)]
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        create_sports_tables(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Insert an event (upsert).
    pub fn insert_event(&self, event: &NewEvent) -> Result<(), StorageError> {
        self.conn().execute(
            r#"
            INSERT OR REPLACE INTO sports
            (id, name, city_address, num_of_participants, advertised_start_time)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                event.id,
                event.name,
                event.city_address,
                event.num_of_participants,
                event.advertised_start_time.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// List events, optionally restricted to an identifier set.
    ///
    /// An absent or empty id set means no constraint. The response order
    /// is whatever the store returns; no ORDER BY is appended.
    pub fn list(&self, filter: Option<&EventFilter>) -> Result<Vec<Event>, StorageError> {
        let mut builder = SelectBuilder::new(SPORTS_SELECT);

        if let Some(f) = filter {
            builder = builder.push(Predicate::InSet {
                column: "id",
                values: f.ids.clone(),
            });
        }

        let (sql, args) = builder.build();

        let conn = self.conn();
        let mut stmt = conn.prepare(&sql)?;
        let events = stmt
            .query_map(params_from_iter(args), scan_event)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(events)
    }
}

fn scan_event(row: &Row<'_>) -> rusqlite::Result<Event> {
    let raw_start: String = row.get(4)?;

    Ok(Event {
        id: row.get(0)?,
        name: row.get(1)?,
        city_address: row.get(2)?,
        num_of_participants: row.get(3)?,
        advertised_start_time: parse_start_time(4, &raw_start)?,
    })
}
