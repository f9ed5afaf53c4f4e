//! SQLite storage layer for the racing and sports catalogs.
//!
//! Query composition lives in `query`, DDL in `schema`, the repositories
//! in `repository`, and the demo-data generators in `seed`.

pub mod query;
pub mod repository;
pub mod schema;
pub mod seed;

pub use repository::{EventRepository, RaceRepository, StorageError};
