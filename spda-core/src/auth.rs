//! Sign-in and registration flows. These are the only writers of the
//! [`Session`].

use reqwest::StatusCode;
use thiserror::Error;
use tracing::warn;

use crate::client::EventClient;
use crate::error::SpdaError;
use crate::session::{Session, User};

/// A failed sign-in or registration, phrased for the person at the keyboard.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
    #[source]
    pub source: SpdaError,
}

impl AuthError {
    fn sign_in(err: SpdaError) -> Self {
        let message = match err.status() {
            Some(StatusCode::UNAUTHORIZED) => "Wrong email or password".to_string(),
            Some(StatusCode::BAD_REQUEST) => "Check the email and password format".to_string(),
            _ => describe(&err),
        };
        AuthError {
            message,
            source: err,
        }
    }

    fn sign_up(err: SpdaError) -> Self {
        let message = match err.status() {
            Some(StatusCode::BAD_REQUEST) => {
                "Registration rejected: check every field (password needs 8+ characters)"
                    .to_string()
            }
            Some(StatusCode::CONFLICT) => "An account with this email already exists".to_string(),
            _ => describe(&err),
        };
        AuthError {
            message,
            source: err,
        }
    }
}

fn describe(err: &SpdaError) -> String {
    match err {
        SpdaError::Transport(_) => "Could not reach the server".to_string(),
        SpdaError::Status(status) => format!("Server answered {}", status),
        other => other.to_string(),
    }
}

/// Log in and make the user active. The session is untouched on failure.
pub async fn sign_in(
    client: &EventClient,
    session: &Session,
    email: &str,
    password: &str,
) -> Result<User, AuthError> {
    match client.login(email, password).await {
        Ok(user) => {
            session.login(user.clone());
            Ok(user)
        }
        Err(err) => {
            warn!(email, error = %err, "sign-in failed");
            Err(AuthError::sign_in(err))
        }
    }
}

/// Register a new account and make it active. The session is untouched on
/// failure.
pub async fn sign_up(
    client: &EventClient,
    session: &Session,
    name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> Result<User, AuthError> {
    match client.register(name, last_name, email, password).await {
        Ok(user) => {
            session.login(user.clone());
            Ok(user)
        }
        Err(err) => {
            warn!(email, error = %err, "registration failed");
            Err(AuthError::sign_up(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::post;
    use axum::{Json, Router};

    async fn serve(app: Router) -> EventClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        EventClient::with_base_url(&format!("http://{}", addr)).unwrap()
    }

    fn backend() -> Router {
        Router::new()
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
                post(|| async { AxumStatus::BAD_REQUEST }),
            )
    }

    #[tokio::test]
    async fn sign_in_sets_the_session() {
        let client = serve(backend()).await;
        let session = Session::new();

        let user = sign_in(&client, &session, "ada@example.com", "correct-horse")
            .await
            .unwrap();

        assert_eq!(session.current(), Some(user));
    }

    #[tokio::test]
    async fn failed_sign_in_leaves_session_alone() {
        let client = serve(backend()).await;
        let session = Session::new();

        let err = sign_in(&client, &session, "ada@example.com", "nope")
            .await
            .unwrap_err();

        assert_eq!(err.message, "Wrong email or password");
        assert_eq!(session.current(), None);
    }

    #[tokio::test]
    async fn failed_sign_up_has_a_message() {
        let client = serve(backend()).await;
        let session = Session::new();

        let err = sign_up(&client, &session, "Ada", "Lovelace", "ada@example.com", "short")
            .await
            .unwrap_err();

        assert!(err.message.starts_with("Registration rejected"));
        assert_eq!(session.current(), None);
    }
}
