//! Active user shared by everything that needs to know who is signed in.
//!
//! [`Session`] is the only writer. Readers hold a [`SessionReader`] and may
//! wait for the user to change. `None` means nobody is signed in.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub last_name: String,
    pub email: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name)
    }
}

/// Owner of the active user. Not `Clone`: there is one writer.
#[derive(Debug)]
pub struct Session {
    tx: watch::Sender<Option<User>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Session { tx }
    }

    /// Replace the active user.
    pub fn login(&self, user: User) {
        tracing::info!(email = %user.email, "user signed in");
        self.tx.send_replace(Some(user));
    }

    pub fn logout(&self) {
        if self.tx.send_replace(None).is_some() {
            tracing::info!("user signed out");
        }
    }

    pub fn current(&self) -> Option<User> {
        self.tx.borrow().clone()
    }

    pub fn reader(&self) -> SessionReader {
        SessionReader {
            rx: self.tx.subscribe(),
        }
    }
}

/// Read-only view of the active user.
#[derive(Debug, Clone)]
pub struct SessionReader {
    rx: watch::Receiver<Option<User>>,
}

impl SessionReader {
    pub fn current(&self) -> Option<User> {
        self.rx.borrow().clone()
    }

    pub fn email(&self) -> Option<String> {
        self.rx.borrow().as_ref().map(|u| u.email.clone())
    }

    /// Wait until the user is replaced. Returns `false` once the
    /// [`Session`] has been dropped.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}
