//! HTTP client for the events backend.

use reqwest::{Response, StatusCode};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::client::{EventFilter, EventSource};
use crate::config::ClientConfig;
use crate::error::{SpdaError, SpdaResult};
use crate::event::{Event, EventId, NewEvent};
use crate::session::User;
use crate::wire::{self, CreateEventRequest, LoginRequest, RegisterRequest};

/// HTTP client for the events backend
#[derive(Debug, Clone)]
pub struct EventClient {
    http: reqwest::Client,
    base_url: Url,
}

impl EventClient {
    pub fn new(config: &ClientConfig) -> SpdaResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| SpdaError::Config(format!("Could not build HTTP client: {e}")))?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| SpdaError::Config(format!("Invalid base_url '{}': {e}", config.base_url)))?;

        if base_url.cannot_be_a_base() {
            return Err(SpdaError::Config(format!(
                "Invalid base_url '{}': not a base URL",
                config.base_url
            )));
        }

        Ok(EventClient { http, base_url })
    }

    /// Client with default settings against `base_url`.
    pub fn with_base_url(base_url: &str) -> SpdaResult<Self> {
        Self::new(&ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // new() rejects URLs that cannot be a base, so this always succeeds
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET /events
    pub async fn fetch_events(&self, filter: &EventFilter) -> SpdaResult<Vec<Event>> {
        let url = self.endpoint(&["events"]);
        let query = filter.query_pairs();
        debug!(%url, ?query, "fetching events");

        let resp = self.http.get(url).query(&query).send().await?;
        let body = ensure_success(resp).await?.bytes().await?;

        let events = wire::decode_events(&body)?;
        debug!(count = events.len(), "fetched events");
        Ok(events)
    }

    /// GET /events/{id}
    pub async fn fetch_event_by_id(&self, id: EventId) -> SpdaResult<Event> {
        let url = self.endpoint(&["events", &id.to_string()]);
        debug!(%url, "fetching event");

        let resp = self.http.get(url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(SpdaError::NotFound(id.to_string()));
        }

        let body = ensure_success(resp).await?.bytes().await?;
        wire::decode_event(&body)
    }

    /// POST /events
    pub async fn create_event(&self, event: &NewEvent) -> SpdaResult<Event> {
        let body = self
            .post_json(&["events"], &CreateEventRequest::from(event))
            .await?;
        wire::decode_event(&body)
    }

    /// POST /users/signin
    pub async fn login(&self, email: &str, password: &str) -> SpdaResult<User> {
        let body = self
            .post_json(&["users", "signin"], &LoginRequest { email, password })
            .await?;
        wire::decode_user(&body)
    }

    /// POST /users/signup
    pub async fn register(
        &self,
        name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> SpdaResult<User> {
        let req = RegisterRequest {
            name,
            last_name,
            email,
            password,
        };
        let body = self.post_json(&["users", "signup"], &req).await?;
        wire::decode_user(&body)
    }

    async fn post_json<T: Serialize>(&self, segments: &[&str], body: &T) -> SpdaResult<Vec<u8>> {
        let url = self.endpoint(segments);
        debug!(%url, "posting");

        let resp = self.http.post(url).json(body).send().await?;
        let bytes = ensure_success(resp).await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}

async fn ensure_success(resp: Response) -> SpdaResult<Response> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(SpdaError::Status(status))
    }
}

impl EventSource for EventClient {
    async fn fetch_events(&self, filter: &EventFilter) -> SpdaResult<Vec<Event>> {
        EventClient::fetch_events(self, filter).await
    }

    async fn fetch_event_by_id(&self, id: EventId) -> SpdaResult<Event> {
        EventClient::fetch_event_by_id(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::event::Location;
    use axum::extract::{Path, RawQuery};
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use chrono::{TimeZone, Utc};
    use std::sync::{Arc, Mutex};

    const EVENT_ID: &str = "7f1d2c9e-3b4a-4f5e-9a8b-1c2d3e4f5a6b";

    fn event_json(id: &str, kind: i64, date: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title": "Tech talk",
            "type": kind,
            "date": date,
            "total_seats": 50,
            "available_seats": 20,
            "creator_email": "org@example.com",
            "location": [55.79, 49.12],
            "has_unlimited_seats": "false",
            "description": "Slides online"
        })
    }

    /// Serve `app` under `/team-1` on a random local port.
    async fn serve(app: Router) -> EventClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().nest("/team-1", app);
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        EventClient::with_base_url(&format!("http://{}/team-1", addr)).unwrap()
    }

    fn backend(seen_query: Arc<Mutex<Option<String>>>) -> Router {
        Router::new()
            .route(
                "/events",
                get(move |RawQuery(query): RawQuery| {
                    let seen_query = seen_query.clone();
                    async move {
                        *seen_query.lock().unwrap() = query;
                        Json(serde_json::json!([
                            event_json(EVENT_ID, 0, "2025-05-15T09:00:00Z"),
                            event_json("0b9e6f0e-52a1-4c3b-8a59-2d6a0f1e7c11", 5, "2025-05-21T23:59:00Z"),
                        ]))
                    }
                })
                .post(|Json(body): Json<serde_json::Value>| async move {
                    let kind = body["type"].as_i64().unwrap_or(8);
                    let date = body["date"].as_str().unwrap_or_default().to_string();
                    let mut stored = event_json(EVENT_ID, kind, &date);
                    stored["title"] = body["title"].clone();
                    stored["description"] = "".into();
                    Json(stored)
                }),
            )
            .route(
                "/events/{id}",
                get(|Path(id): Path<String>| async move {
                    if id == EVENT_ID {
                        Ok(Json(event_json(EVENT_ID, 2, "2025-05-16T19:00:00Z")))
                    } else {
                        Err(AxumStatus::NOT_FOUND)
                    }
                }),
            )
            .route(
                "/users/signin",
                post(|Json(body): Json<serde_json::Value>| async move {
                    if body["password"] == "correct-horse" {
                        Ok(Json(serde_json::json!({
                            "user": {"name": "Ada", "last_name": "Lovelace", "email": body["email"]}
                        })))
                    } else {
                        Err(AxumStatus::UNAUTHORIZED)
                    }
                }),
            )
            .route(
                "/users/signup",
                post(|Json(body): Json<serde_json::Value>| async move {
                    Json(serde_json::json!({
                        "user": {"name": body["name"], "last_name": body["last_name"], "email": body["email"]}
                    }))
                }),
            )
    }

    #[tokio::test]
    async fn fetch_events_sends_filter_and_decodes() {
        let seen_query = Arc::new(Mutex::new(None));
        let client = serve(backend(seen_query.clone())).await;

        let after = Utc.with_ymd_and_hms(2025, 5, 15, 8, 0, 0).unwrap();
        let before = Utc.with_ymd_and_hms(2025, 5, 22, 8, 0, 0).unwrap();
        let filter = EventFilter::between(after, before).visitor_email("ada@example.com");

        let events = client.fetch_events(&filter).await.unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].category, Category::Conference);
        assert_eq!(events[1].category, Category::Sport);

        let query = seen_query.lock().unwrap().clone().unwrap();
        assert_eq!(
            query,
            "visitor_email=ada%40example.com&before=2025-05-22T08%3A00%3A00.000Z&after=2025-05-15T08%3A00%3A00.000Z"
        );
    }

    #[tokio::test]
    async fn fetch_event_by_id_found_and_missing() {
        let client = serve(backend(Arc::new(Mutex::new(None)))).await;

        let id: EventId = EVENT_ID.parse().unwrap();
        let event = client.fetch_event_by_id(id).await.unwrap();
        assert_eq!(event.id, id);
        assert_eq!(event.category, Category::Concert);
        assert_eq!(event.description.as_deref(), Some("Slides online"));

        let missing = uuid::Uuid::new_v4();
        let err = client.fetch_event_by_id(missing).await.unwrap_err();
        assert!(matches!(err, SpdaError::NotFound(ref id) if *id == missing.to_string()));
    }

    #[tokio::test]
    async fn server_error_carries_status() {
        let app = Router::new().route(
            "/events",
            get(|| async { AxumStatus::INTERNAL_SERVER_ERROR }),
        );
        let client = serve(app).await;

        let err = client.fetch_events(&EventFilter::new()).await.unwrap_err();
        assert!(err.is_fetch_error());
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let app = Router::new().route(
            "/events",
            get(|| async { Json(serde_json::json!([{"id": "not-a-uuid"}])) }),
        );
        let client = serve(app).await;

        let err = client.fetch_events(&EventFilter::new()).await.unwrap_err();
        assert!(matches!(err, SpdaError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = EventClient::with_base_url(&format!("http://{}", addr)).unwrap();
        let err = client.fetch_events(&EventFilter::new()).await.unwrap_err();
        assert!(matches!(err, SpdaError::Transport(_)));
        assert!(err.is_fetch_error());
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn login_and_register() {
        let client = serve(backend(Arc::new(Mutex::new(None)))).await;

        let user = client.login("ada@example.com", "correct-horse").await.unwrap();
        assert_eq!(user.email, "ada@example.com");

        let err = client.login("ada@example.com", "wrong").await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));

        let user = client
            .register("Grace", "Hopper", "grace@example.com", "cobol-forever")
            .await
            .unwrap();
        assert_eq!(user.full_name(), "Grace Hopper");
    }

    #[tokio::test]
    async fn create_event_posts_and_decodes_result() {
        let client = serve(backend(Arc::new(Mutex::new(None)))).await;

        let new = NewEvent {
            title: "Chess night".to_string(),
            category: Category::Competition,
            start: Utc.with_ymd_and_hms(2025, 6, 1, 17, 30, 0).unwrap(),
            total_seats: 16,
            creator_email: "org@example.com".to_string(),
            location: Location::new(55.79, 49.12),
            has_unlimited_seats: false,
            description: None,
        };

        let created = client.create_event(&new).await.unwrap();
        assert_eq!(created.title, "Chess night");
        assert_eq!(created.category, Category::Competition);
        assert_eq!(created.start, new.start);
        assert_eq!(created.description, None);
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let client = EventClient::with_base_url("https://example.com/team-1/").unwrap();
        assert_eq!(
            client.endpoint(&["events", "abc"]).as_str(),
            "https://example.com/team-1/events/abc"
        );

        let client = EventClient::with_base_url("https://example.com").unwrap();
        assert_eq!(client.endpoint(&["events"]).as_str(), "https://example.com/events");
    }

    #[test]
    fn rejects_bad_base_url() {
        assert!(matches!(
            EventClient::with_base_url("not a url"),
            Err(SpdaError::Config(_))
        ));
        assert!(matches!(
            EventClient::with_base_url("mailto:ada@example.com"),
            Err(SpdaError::Config(_))
        ));
    }
}
