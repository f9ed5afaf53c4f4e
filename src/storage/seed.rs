//! Demo-data generators for the racing and sports catalogs.
//!
//! Invoked only by the explicit `seed` CLI command, never lazily at serve
//! time. Inserts are upserts keyed on id, so re-running a seed converges
//! instead of duplicating rows.

use chrono::{Duration, Utc};
use rand::Rng;

use super::repository::{EventRepository, NewEvent, NewRace, RaceRepository, StorageError};

const SPORT_NAMES: [&str; 5] = [
    "Horse Racing",
    "Car Racing",
    "Dog Racing",
    "Human Racing",
    "Bike Racing",
];

const CITIES: [&str; 8] = [
    "Brisbane",
    "Melbourne",
    "Perth",
    "Davismouth",
    "Manchester",
    "Auckland",
    "Osaka",
    "Calgary",
];

/// Advertised start somewhere between one day ago and two days from now.
fn random_start(rng: &mut impl Rng) -> chrono::DateTime<Utc> {
    let window = Duration::days(3).num_seconds();
    let offset = rng.gen_range(0..window);
    Utc::now() - Duration::days(1) + Duration::seconds(offset)
}

/// Populate the races table with `count` demo races.
pub fn seed_races(repo: &RaceRepository, count: i64) -> Result<(), StorageError> {
    let mut rng = rand::thread_rng();

    for id in 1..=count {
        repo.insert_race(&NewRace {
            id,
            meeting_id: rng.gen_range(1..=10),
            name: format!("Race {}", id),
            number: rng.gen_range(1..=12),
            visible: rng.gen_bool(0.5),
            advertised_start_time: random_start(&mut rng),
        })?;
    }

    Ok(())
}

/// Populate the sports table with `count` demo events.
pub fn seed_events(repo: &EventRepository, count: i64) -> Result<(), StorageError> {
    let mut rng = rand::thread_rng();

    for id in 1..=count {
        repo.insert_event(&NewEvent {
            id,
            name: SPORT_NAMES[rng.gen_range(0..SPORT_NAMES.len())].to_string(),
            city_address: CITIES[rng.gen_range(0..CITIES.len())].to_string(),
            num_of_participants: rng.gen_range(0..=1000),
            advertised_start_time: random_start(&mut rng),
        })?;
    }

    Ok(())
}
