//! Service layer over the catalog repositories.
//!
//! Each request maps to exactly one repository call. The racing service
//! captures the evaluation instant once per request so every race in a
//! response is classified against the same snapshot, and turns a zero-row
//! unique lookup into a domain-visible NotFound.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use crate::storage::{EventRepository, RaceRepository, StorageError};
use crate::types::{Event, EventFilter, Race, RaceFilter};

/// Domain-level failure surfaced to the transport layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No race exists with the requested id. Expected, user-facing.
    #[error("race {0} not found")]
    NotFound(i64),
    /// Storage failure, surfaced as an internal error.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Read-only racing catalog service.
#[derive(Clone)]
pub struct RacingService {
    repo: Arc<RaceRepository>,
}

impl RacingService {
    pub fn new(repo: Arc<RaceRepository>) -> Self {
        Self { repo }
    }

    /// List races. An absent filter means unrestricted, ascending order.
    pub fn list_races(&self, filter: Option<&RaceFilter>) -> Result<Vec<Race>, ServiceError> {
        Ok(self.repo.list(filter, Utc::now())?)
    }

    /// Fetch a single race by id.
    pub fn get_race(&self, id: i64) -> Result<Race, ServiceError> {
        self.repo
            .get(id, Utc::now())?
            .ok_or(ServiceError::NotFound(id))
    }
}

/// Read-only sports catalog service.
#[derive(Clone)]
pub struct SportsService {
    repo: Arc<EventRepository>,
}

impl SportsService {
    pub fn new(repo: Arc<EventRepository>) -> Self {
        Self { repo }
    }

    /// List events, optionally restricted to an identifier set.
    pub fn list_events(&self, filter: Option<&EventFilter>) -> Result<Vec<Event>, ServiceError> {
        Ok(self.repo.list(filter)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::repository::{NewEvent, NewRace};
    use crate::types::RaceStatus;
    use chrono::{DateTime, TimeZone};

    fn apr5(year: i32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, 4, 5, 0, 0, 0).unwrap()
    }

    fn racing_service_with(races: &[(i64, bool, DateTime<Utc>)]) -> RacingService {
        let repo = RaceRepository::in_memory().unwrap();
        for &(id, visible, start) in races {
            repo.insert_race(&NewRace {
                id,
                meeting_id: id,
                name: format!("Test Race {}", id),
                number: id as i32,
                visible,
                advertised_start_time: start,
            })
            .unwrap();
        }
        RacingService::new(Arc::new(repo))
    }

    #[test]
    fn test_list_races_no_filter_returns_all_ascending() {
        let service = racing_service_with(&[
            (2, false, apr5(2001)),
            (1, true, apr5(2000)),
            (3, true, apr5(2002)),
        ]);

        let races = service.list_races(None).unwrap();
        let ids: Vec<i64> = races.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_list_races_visible_only_scenario() {
        // Races 1 and 3 visible, race 2 hidden; all in the past, so both
        // returned races have closed.
        let service = racing_service_with(&[
            (1, true, apr5(2000)),
            (2, false, apr5(2001)),
            (3, true, apr5(2002)),
        ]);

        let filter = RaceFilter {
            visible: Some(true),
            order_by: None,
        };
        let races = service.list_races(Some(&filter)).unwrap();
        let ids: Vec<i64> = races.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(races.iter().all(|r| r.status == RaceStatus::Closed));
    }

    #[test]
    fn test_list_races_mixed_statuses() {
        let service = racing_service_with(&[(1, true, apr5(2000)), (2, true, apr5(5555))]);

        let races = service.list_races(None).unwrap();
        assert_eq!(races[0].status, RaceStatus::Closed);
        assert_eq!(races[1].status, RaceStatus::Open);
    }

    #[test]
    fn test_get_race_returns_record() {
        let service = racing_service_with(&[(1, true, apr5(2000))]);

        let race = service.get_race(1).unwrap();
        assert_eq!(race.id, 1);
        assert_eq!(race.name, "Test Race 1");
    }

    #[test]
    fn test_get_race_missing_is_not_found() {
        let service = racing_service_with(&[(1, true, apr5(2000))]);

        match service.get_race(99) {
            Err(ServiceError::NotFound(99)) => {}
            other => panic!("expected NotFound(99), got {:?}", other.map(|r| r.id)),
        }
    }

    #[test]
    fn test_list_events_with_partial_id_set() {
        let repo = EventRepository::in_memory().unwrap();
        repo.insert_event(&NewEvent {
            id: 1,
            name: "Horse Racing".to_string(),
            city_address: "Davismouth".to_string(),
            num_of_participants: 826,
            advertised_start_time: apr5(1992),
        })
        .unwrap();
        let service = SportsService::new(Arc::new(repo));

        let filter = EventFilter { ids: vec![1, 42] };
        let events = service.list_events(Some(&filter)).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, 1);
    }
}
