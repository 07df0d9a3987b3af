//! Authentication context handed to the API layer.
//!
//! An `AuthSession` is created empty, filled when a login succeeds and
//! emptied on logout. It is passed explicitly to `GraphqlClient::build_*`;
//! nothing in the crate reads a token from ambient state.

use std::fmt;

use crate::navigation::NavigationIntent;

/// Opaque bearer credential returned by `login`.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        AuthToken(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens never reach logs through `{:?}`.
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSession {
    token: Option<AuthToken>,
}

impl AuthSession {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(token: AuthToken) -> Self {
        AuthSession { token: Some(token) }
    }

    pub fn sign_in(&mut self, token: AuthToken) {
        tracing::debug!("auth session signed in");
        self.token = Some(token);
    }

    pub fn sign_out(&mut self) {
        tracing::debug!("auth session signed out");
        self.token = None;
    }

    /// Sign out and drop the persisted token. The host returns to login.
    pub fn log_out<S: TokenStore + ?Sized>(&mut self, store: &mut S) -> NavigationIntent {
        self.sign_out();
        store.clear();
        NavigationIntent::Login
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Host-side persistence for the login token.
pub trait TokenStore {
    fn persist(&mut self, token: &AuthToken);
    fn load(&self) -> Option<AuthToken>;
    fn clear(&mut self);

    /// Rebuild a session from whatever was persisted last.
    fn restore(&self) -> AuthSession {
        self.load().map(AuthSession::signed_in).unwrap_or_default()
    }
}

/// `TokenStore` that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Option<AuthToken>,
}

impl TokenStore for MemoryTokenStore {
    fn persist(&mut self, token: &AuthToken) {
        self.token = Some(token.clone());
    }

    fn load(&self) -> Option<AuthToken> {
        self.token.clone()
    }

    fn clear(&mut self) {
        self.token = None;
    }
}
