//! Sliding week calendar.
//!
//! [`CalendarWindow`] owns the current [`Window`], refetches its events
//! whenever the window or the active user changes, and keeps the last good
//! [`CalendarView`].
//!
//! Each refresh is tagged with a generation number taken when it is
//! triggered. A result is applied only if no newer refresh has been
//! triggered since and the active user is still the one it was fetched for;
//! otherwise it is discarded.

mod bucket;
mod window;

use std::collections::HashSet;
use std::future::Future;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, error, info};

pub use bucket::{CalendarEntry, CalendarView, DaySlot, build_view};
pub use window::{DAYS, Window, days_in_month};

use crate::client::EventSource;
use crate::error::SpdaResult;
use crate::event::{Event, EventId};
use crate::session::SessionReader;

/// Visitor filter sent when nobody is signed in; matches no account.
const NO_VISITOR: &str = ".";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Nothing fetched yet, or the last fetch was for a user who has since
    /// signed out or switched. Refresh again (or run `follow_session`).
    Idle,
    Fetching,
    Ready,
    /// The latest refresh failed; the previous view is still shown
    Failed,
}

/// What happened to one refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// A newer refresh or a different user took over; the result was dropped
    Superseded,
    Failed,
}

struct State {
    window: Window,
    generation: u64,
    status: Status,
    view: CalendarView,
    signed_up: HashSet<EventId>,
    last_error: Option<String>,
}

/// Inputs a refresh was triggered with.
struct Ticket {
    generation: u64,
    window: Window,
    visitor: Option<String>,
}

pub struct CalendarWindow<S> {
    source: S,
    session: SessionReader,
    state: Mutex<State>,
}

impl<S: EventSource> CalendarWindow<S> {
    /// A calendar showing the week from `after`. Nothing is fetched until
    /// [`refresh`](Self::refresh) is called.
    pub fn new(source: S, session: SessionReader, after: DateTime<Utc>) -> Self {
        let window = Window::starting_at(after);
        CalendarWindow {
            source,
            session,
            state: Mutex::new(State {
                window,
                generation: 0,
                status: Status::Idle,
                view: CalendarView::empty(window),
                signed_up: HashSet::new(),
                last_error: None,
            }),
        }
    }

    pub fn window(&self) -> Window {
        self.state.lock().window
    }

    /// Last successfully fetched view. After a failed refresh this may
    /// belong to an earlier window than [`window`](Self::window).
    pub fn view(&self) -> CalendarView {
        self.state.lock().view.clone()
    }

    pub fn status(&self) -> Status {
        self.state.lock().status
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.lock().last_error.clone()
    }

    pub fn is_signed_up(&self, id: &EventId) -> bool {
        self.state.lock().signed_up.contains(id)
    }

    /// Where the calendar should reopen: the middle of the current week.
    pub fn focus(&self) -> DateTime<Utc> {
        self.window().focus()
    }

    /// Move a week forward and refetch.
    pub fn shift_forward(&self) -> impl Future<Output = RefreshOutcome> + '_ {
        self.shift(1);
        self.refresh()
    }

    /// Move a week back and refetch.
    pub fn shift_back(&self) -> impl Future<Output = RefreshOutcome> + '_ {
        self.shift(-1);
        self.refresh()
    }

    fn shift(&self, weeks: i64) {
        let mut state = self.state.lock();
        state.window = state.window.shifted(weeks);
        debug!(after = %state.window.after, before = %state.window.before, "calendar window moved");
    }

    /// Refetch the current window for the current user.
    ///
    /// The window and user are captured when this is called, not when the
    /// returned future is first polled.
    pub fn refresh(&self) -> impl Future<Output = RefreshOutcome> + '_ {
        let ticket = self.issue_ticket();

        async move {
            let result = self.fetch(&ticket).await;
            self.apply(ticket, result)
        }
    }

    /// Refresh every time the active user changes, until the session is
    /// dropped.
    pub async fn follow_session(&self) {
        let mut session = self.session.clone();
        while session.changed().await {
            self.refresh().await;
        }
    }

    fn issue_ticket(&self) -> Ticket {
        let mut state = self.state.lock();
        state.generation += 1;
        state.status = Status::Fetching;

        Ticket {
            generation: state.generation,
            window: state.window,
            visitor: self.session.email(),
        }
    }

    async fn fetch(&self, ticket: &Ticket) -> SpdaResult<(Vec<Event>, HashSet<EventId>)> {
        let all = ticket.window.filter();
        let visited = all
            .clone()
            .visitor_email(ticket.visitor.as_deref().unwrap_or(NO_VISITOR));

        debug!(generation = ticket.generation, after = %ticket.window.after, "fetching calendar");
        let (events, visited) = tokio::join!(
            self.source.fetch_events(&all),
            self.source.fetch_events(&visited)
        );

        let events = events?;
        let visited = visited?;
        // Nobody signed in means nothing is signed up, whatever came back
        let signed_up = match ticket.visitor {
            Some(_) => visited.into_iter().map(|e| e.id).collect(),
            None => HashSet::new(),
        };

        Ok((events, signed_up))
    }

    fn apply(
        &self,
        ticket: Ticket,
        result: SpdaResult<(Vec<Event>, HashSet<EventId>)>,
    ) -> RefreshOutcome {
        let mut state = self.state.lock();

        if state.generation != ticket.generation {
            debug!(
                generation = ticket.generation,
                current = state.generation,
                "discarding superseded calendar fetch"
            );
            return RefreshOutcome::Superseded;
        }

        if self.session.email() != ticket.visitor {
            // No newer refresh is in flight, so nothing will move the status on
            debug!(generation = ticket.generation, "discarding calendar fetch for a previous user");
            state.status = Status::Idle;
            return RefreshOutcome::Superseded;
        }

        match result {
            Ok((events, signed_up)) => {
                state.view = build_view(&ticket.window, events, &signed_up);
                state.signed_up = signed_up;
                state.status = Status::Ready;
                state.last_error = None;
                info!(
                    after = %ticket.window.after,
                    events = state.view.entries().count(),
                    "calendar updated"
                );
                RefreshOutcome::Applied
            }
            Err(err) => {
                error!(after = %ticket.window.after, error = %err, "calendar refresh failed");
                state.status = Status::Failed;
                state.last_error = Some(err.to_string());
                RefreshOutcome::Failed
            }
        }
    }
}
