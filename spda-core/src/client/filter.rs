//! Query options for `GET /events`.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::category::Category;

/// Filters for an event search. Unset options are left out of the query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    pub category: Option<Category>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub creator_email: Option<String>,
    pub visitor_email: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Search radius around (`latitude`, `longitude`)
    pub radius: Option<f64>,
    /// Inclusive lower bound on the start time
    pub after: Option<DateTime<Utc>>,
    /// Exclusive upper bound on the start time
    pub before: Option<DateTime<Utc>>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events starting in `[after, before)`.
    pub fn between(after: DateTime<Utc>, before: DateTime<Utc>) -> Self {
        EventFilter {
            after: Some(after),
            before: Some(before),
            ..Self::default()
        }
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn creator_email(mut self, email: impl Into<String>) -> Self {
        self.creator_email = Some(email.into());
        self
    }

    pub fn visitor_email(mut self, email: impl Into<String>) -> Self {
        self.visitor_email = Some(email.into());
        self
    }

    pub fn near(mut self, latitude: f64, longitude: f64, radius: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self.radius = Some(radius);
        self
    }

    pub fn after(mut self, after: DateTime<Utc>) -> Self {
        self.after = Some(after);
        self
    }

    pub fn before(mut self, before: DateTime<Utc>) -> Self {
        self.before = Some(before);
        self
    }

    /// Query parameters in the order the backend documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(category) = self.category {
            pairs.push(("type", category.index().to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(email) = non_empty(&self.creator_email) {
            pairs.push(("creator_email", email.to_string()));
        }
        if let Some(email) = non_empty(&self.visitor_email) {
            pairs.push(("visitor_email", email.to_string()));
        }
        if let Some(lon) = self.longitude {
            pairs.push(("lon", lon.to_string()));
        }
        if let Some(lat) = self.latitude {
            pairs.push(("lat", lat.to_string()));
        }
        if let Some(radius) = self.radius {
            pairs.push(("radius", radius.to_string()));
        }
        if let Some(before) = self.before {
            pairs.push(("before", format_query_time(&before)));
        }
        if let Some(after) = self.after {
            pairs.push(("after", format_query_time(&after)));
        }

        pairs
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// `2025-05-15T08:00:00.000Z`
pub fn format_query_time(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
