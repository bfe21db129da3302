//! JSON shapes exchanged with the events backend and their conversion to
//! domain types.
//!
//! Conversion is all-or-nothing: one malformed element fails the whole batch.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::{SpdaError, SpdaResult};
use crate::event::{Event, EventId, Location, NewEvent};
use crate::session::User;

/// An event as the backend sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventResponse {
    pub id: EventId,
    pub title: String,
    /// Index into [`Category::ALL`]
    #[serde(rename = "type")]
    pub kind: i64,
    /// RFC 3339 timestamp
    pub date: String,
    pub total_seats: i64,
    pub available_seats: i64,
    pub creator_email: String,
    /// `[latitude, longitude]`
    pub location: [f64; 2],
    /// "true" or "false"
    #[serde(default)]
    pub has_unlimited_seats: String,
    #[serde(default)]
    pub description: String,
}

impl TryFrom<EventResponse> for Event {
    type Error = SpdaError;

    fn try_from(resp: EventResponse) -> SpdaResult<Self> {
        let start = DateTime::parse_from_rfc3339(&resp.date)
            .map_err(|e| SpdaError::Decode(format!("event {}: bad date '{}': {}", resp.id, resp.date, e)))?
            .with_timezone(&Utc);

        Ok(Event {
            id: resp.id,
            title: resp.title,
            category: Category::from_index(resp.kind),
            start,
            total_seats: seat_count(resp.id, "total_seats", resp.total_seats)?,
            available_seats: seat_count(resp.id, "available_seats", resp.available_seats)?,
            creator_email: resp.creator_email,
            location: Location::new(resp.location[0], resp.location[1]),
            has_unlimited_seats: parse_flag(resp.id, &resp.has_unlimited_seats)?,
            description: if resp.description.is_empty() {
                None
            } else {
                Some(resp.description)
            },
        })
    }
}

impl From<&Event> for EventResponse {
    fn from(event: &Event) -> Self {
        EventResponse {
            id: event.id,
            title: event.title.clone(),
            kind: event.category.index().into(),
            date: format_timestamp(&event.start),
            total_seats: event.total_seats.into(),
            available_seats: event.available_seats.into(),
            creator_email: event.creator_email.clone(),
            location: [event.location.latitude, event.location.longitude],
            has_unlimited_seats: event.has_unlimited_seats.to_string(),
            description: event.description.clone().unwrap_or_default(),
        }
    }
}

fn seat_count(id: EventId, field: &str, value: i64) -> SpdaResult<u32> {
    u32::try_from(value)
        .map_err(|_| SpdaError::Decode(format!("event {}: {} out of range: {}", id, field, value)))
}

fn parse_flag(id: EventId, value: &str) -> SpdaResult<bool> {
    // Events created without the flag come back with an empty string
    match value {
        "true" => Ok(true),
        "false" | "" => Ok(false),
        other => Err(SpdaError::Decode(format!(
            "event {}: has_unlimited_seats must be \"true\" or \"false\", got '{}'",
            id, other
        ))),
    }
}

/// Timestamps keep sub-second digits only when present.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Decode a `GET /events` body.
pub fn decode_events(body: &[u8]) -> SpdaResult<Vec<Event>> {
    // Go encodes an empty result set as `null`
    let responses: Option<Vec<EventResponse>> = serde_json::from_slice(body)?;

    responses
        .unwrap_or_default()
        .into_iter()
        .map(Event::try_from)
        .collect()
}

/// Decode a `GET /events/{id}` or `POST /events` body.
pub fn decode_event(body: &[u8]) -> SpdaResult<Event> {
    let response: EventResponse = serde_json::from_slice(body)?;
    Event::try_from(response)
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Serialize)]
pub struct LocationRequest {
    pub latitude: String,
    pub longitude: String,
}

/// Body of `POST /events`.
#[derive(Debug, Serialize)]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: u8,
    pub date: String,
    pub total_seats: u32,
    pub creator_email: String,
    pub location: LocationRequest,
    pub has_unlimited_seats: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&NewEvent> for CreateEventRequest {
    fn from(event: &NewEvent) -> Self {
        CreateEventRequest {
            title: event.title.clone(),
            kind: event.category.index(),
            date: format_timestamp(&event.start),
            total_seats: event.total_seats,
            creator_email: event.creator_email.clone(),
            location: LocationRequest {
                latitude: event.location.latitude.to_string(),
                longitude: event.location.longitude.to_string(),
            },
            has_unlimited_seats: event.has_unlimited_seats.to_string(),
            description: event.description.clone().filter(|d| !d.is_empty()),
        }
    }
}

/// Body of `POST /users/signin`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /users/signup`.
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub name: String,
    pub last_name: String,
    pub email: String,
}

/// Login and registration both answer with `{ "user": { ... } }`.
#[derive(Debug, Deserialize)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

impl From<UserResponse> for User {
    fn from(resp: UserResponse) -> Self {
        User {
            name: resp.name,
            last_name: resp.last_name,
            email: resp.email,
        }
    }
}

pub fn decode_user(body: &[u8]) -> SpdaResult<User> {
    let envelope: UserEnvelope = serde_json::from_slice(body)?;
    Ok(envelope.user.into())
}
