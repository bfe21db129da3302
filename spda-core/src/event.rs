//! Domain event types.
//!
//! Events are built from backend responses (see [`crate::wire`]) and are never
//! modified afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::Category;

pub type EventId = Uuid;

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Location {
            latitude,
            longitude,
        }
    }
}

/// An event as published by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub category: Category,
    pub start: DateTime<Utc>,
    pub total_seats: u32,
    pub available_seats: u32,
    /// Organizer
    pub creator_email: String,
    pub location: Location,
    /// When set, seat counts carry no meaning
    pub has_unlimited_seats: bool,
    pub description: Option<String>,
}

impl Event {
    pub fn is_full(&self) -> bool {
        !self.has_unlimited_seats && self.available_seats == 0
    }

    /// Seat availability for display, e.g. "12/40 seats" or "unlimited".
    pub fn seats_label(&self) -> String {
        if self.has_unlimited_seats {
            "unlimited".to_string()
        } else {
            format!("{}/{} seats", self.available_seats, self.total_seats)
        }
    }
}

/// An event about to be posted by its creator.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub category: Category,
    pub start: DateTime<Utc>,
    pub total_seats: u32,
    pub creator_email: String,
    pub location: Location,
    pub has_unlimited_seats: bool,
    pub description: Option<String>,
}
