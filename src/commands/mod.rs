pub mod events;
pub mod login;
pub mod new;
pub mod register;
pub mod show;
pub mod week;

use anyhow::{Context as _, Result};
use spda_core::auth;
use spda_core::client::EventClient;
use spda_core::config::ClientConfig;
use spda_core::{Session, User};

use crate::utils::tui::{prompt_password, prompt_text, with_spinner};

/// Everything a command needs, loaded once per run.
pub struct Context {
    pub config: ClientConfig,
    pub client: EventClient,
    pub session: Session,
}

impl Context {
    pub fn load() -> Result<Self> {
        let config = ClientConfig::load().context("Failed to load configuration")?;
        let client = EventClient::new(&config)?;

        Ok(Context {
            config,
            client,
            session: Session::new(),
        })
    }

    /// Prompt for whatever is missing and sign in. `email` falls back to
    /// `default_email` from the config.
    pub async fn sign_in(&self, email: Option<&str>) -> Result<User> {
        let email = match email.or(self.config.default_email.as_deref()) {
            Some(email) => email.to_string(),
            None => prompt_text("Email")?,
        };
        let password = prompt_password("Password")?;

        let user = with_spinner(
            "Signing in",
            auth::sign_in(&self.client, &self.session, &email, &password),
        )
        .await?;

        Ok(user)
    }
}
