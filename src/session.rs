//! Authentication state of the current user
//!
//! A [`Session`] is created once and handed by reference to every operation that
//! needs to know who is signed in. Only [`Session::login`] and [`Session::logout`]
//! change it.

use crate::models::{Token, User};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
}

impl Session {
    /// A signed-out session
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session carrying a bare bearer token (user details not fetched yet)
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            user: None,
        }
    }

    /// Adopt the token issued by login or registration
    pub fn login(&mut self, token: Token) {
        info!("Signed in as {}", token.user.email);
        self.token = Some(token.access_token);
        self.user = Some(token.user);
    }

    /// Record the user fetched for an existing token
    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!("Signed out {}", user.email);
        }
        self.token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}
