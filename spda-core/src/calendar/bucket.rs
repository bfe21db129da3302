//! Sorting a window's events into day slots.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::calendar::window::{DAYS, Window};
use crate::event::{Event, EventId};

/// An event placed on the calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEntry {
    pub event: Event,
    /// The active user is a visitor of this event
    pub is_signed_up: bool,
}

/// One day of the window.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySlot {
    pub index: usize,
    /// Day-of-month label
    pub day_number: u32,
    pub starts_at: DateTime<Utc>,
    /// Ordered by start time
    pub entries: Vec<CalendarEntry>,
}

/// Everything the calendar displays for one window.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarView {
    pub window: Window,
    pub days: Vec<DaySlot>,
}

impl CalendarView {
    /// Seven empty days.
    pub fn empty(window: Window) -> Self {
        build_view(&window, Vec::new(), &HashSet::new())
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(|d| d.entries.is_empty())
    }

    pub fn entries(&self) -> impl Iterator<Item = &CalendarEntry> {
        self.days.iter().flat_map(|d| d.entries.iter())
    }
}

/// Bucket `events` by day, sort each day by start time (keeping the
/// backend's order for ties) and mark the ones in `signed_up`.
///
/// Events that land outside the window are dropped.
pub fn build_view(window: &Window, events: Vec<Event>, signed_up: &HashSet<EventId>) -> CalendarView {
    let mut days: Vec<DaySlot> = (0..DAYS)
        .map(|index| DaySlot {
            index,
            day_number: window.day_number(index),
            starts_at: window.day_start(index),
            entries: Vec::new(),
        })
        .collect();

    for event in events {
        let Some(index) = window.day_index(event.start) else {
            warn!(id = %event.id, start = %event.start, "event outside calendar window, skipping");
            continue;
        };

        let is_signed_up = signed_up.contains(&event.id);
        days[index].entries.push(CalendarEntry {
            event,
            is_signed_up,
        });
    }

    for day in &mut days {
        day.entries.sort_by_key(|entry| entry.event.start);
    }

    CalendarView {
        window: *window,
        days,
    }
}
