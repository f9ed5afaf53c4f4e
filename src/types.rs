//! Request, response and domain types for the Paddock API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a race, derived from its advertised start time.
///
/// Never persisted: always recomputed against an evaluation instant, so
/// repeated reads around the start time may observe different values for
/// the same race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RaceStatus {
    Open,
    Closed,
}

impl RaceStatus {
    /// Resolve the status of a race at `now`.
    ///
    /// A race is OPEN only while its advertised start is strictly in the
    /// future; a race starting exactly at `now` is already CLOSED. The
    /// comparison uses chrono's full nanosecond ordering, which matches
    /// the precision of the stored RFC 3339 text.
    pub fn at(advertised_start: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if advertised_start > now {
            RaceStatus::Open
        } else {
            RaceStatus::Closed
        }
    }
}

/// A race as returned to callers, status included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    pub id: i64,
    pub meeting_id: i64,
    pub name: String,
    pub number: i32,
    pub visible: bool,
    pub advertised_start_time: DateTime<Utc>,
    pub status: RaceStatus,
}

/// A sporting event. Events carry no lifecycle status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub city_address: String,
    pub num_of_participants: i64,
    pub advertised_start_time: DateTime<Utc>,
}

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Optional predicates narrowing a race list query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RaceFilter {
    /// Restrict to races with this visibility. Absent = no constraint.
    pub visible: Option<bool>,
    /// Sort direction on advertised start time. Absent = ascending.
    pub order_by: Option<SortOrder>,
}

/// Optional identifier-set filter for event list queries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFilter {
    /// Restrict to these event ids. Empty = no constraint.
    #[serde(default)]
    pub ids: Vec<i64>,
}

/// List races request body.
#[derive(Debug, Default, Deserialize)]
pub struct ListRacesRequest {
    #[serde(default)]
    pub filter: Option<RaceFilter>,
}

/// List races response.
#[derive(Debug, Serialize)]
pub struct ListRacesResponse {
    pub races: Vec<Race>,
}

/// List events request body.
#[derive(Debug, Default, Deserialize)]
pub struct ListEventsRequest {
    #[serde(default)]
    pub filter: Option<EventFilter>,
}

/// List events response.
#[derive(Debug, Serialize)]
pub struct ListEventsResponse {
    pub events: Vec<Event>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
