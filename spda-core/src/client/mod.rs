//! Backend-facing operations.
//!
//! [`EventSource`] is what the calendar depends on; [`EventClient`] is the
//! HTTP implementation.

mod filter;
mod http;

use std::future::Future;

pub use filter::{EventFilter, format_query_time};
pub use http::EventClient;

use crate::error::SpdaResult;
use crate::event::{Event, EventId};

/// Read access to published events.
pub trait EventSource: Send + Sync {
    fn fetch_events(
        &self,
        filter: &EventFilter,
    ) -> impl Future<Output = SpdaResult<Vec<Event>>> + Send;

    fn fetch_event_by_id(&self, id: EventId) -> impl Future<Output = SpdaResult<Event>> + Send;
}
