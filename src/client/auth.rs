//! The auth store: who is logged in, and the token that proves it.
//!
//! The in-memory state and the persisted token are only ever changed together
//! by the actions below; login writes both, logout clears both.

use super::{
    error::ApiError,
    http::{self, AccessToken, ApiClient},
    token::TokenStorage,
};
use crate::post::User;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A snapshot of authentication state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    /// True until the first [AuthStore::check_auth] resolves.
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        AuthState {
            user: None,
            is_authenticated: false,
            is_loading: true,
            error: None,
        }
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// The details required to open an account.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Returned by both login and register.
#[derive(Deserialize)]
struct SessionResponse {
    access_token: Option<String>,
    user: User,
}

#[derive(Deserialize)]
struct MeResponse {
    user: User,
}

pub struct AuthStore<S: TokenStorage> {
    api: ApiClient,
    storage: S,
    state: AuthState,
}

impl<S: TokenStorage> AuthStore<S> {
    /// Any token already in `storage` is attached to `api` straight away; it
    /// is [AuthStore::check_auth] which decides whether it's still good.
    pub fn new(api: ApiClient, storage: S) -> Self {
        let api = match storage.load() {
            Some(t) => api.with_token(t),
            None => api.without_token(),
        };

        AuthStore {
            api,
            storage,
            state: AuthState::default(),
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// The client to use for every other call, carrying the current token.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<&AuthState, ApiError> {
        let req = self
            .api
            .without_token()
            .post("/api/auth/login")
            .json(&LoginRequest { email, password });

        let res = http::send_json::<SessionResponse>(req).await;

        match res.and_then(|x| self.start_session(x)) {
            Ok(()) => Ok(&self.state),
            Err(e) => {
                self.state.error = Some(e.message_or("Login failed"));
                Err(e)
            }
        }
    }

    pub async fn register(&mut self, registration: &Registration) -> Result<&AuthState, ApiError> {
        let req = self
            .api
            .without_token()
            .post("/api/auth/register")
            .json(registration);

        let res = http::send_json::<SessionResponse>(req).await;

        match res.and_then(|x| self.start_session(x)) {
            Ok(()) => Ok(&self.state),
            Err(e) => {
                self.state.error = Some(e.message_or("Registration failed"));
                Err(e)
            }
        }
    }

    /// The server is told first, but local state is cleared regardless of
    /// whether it was reachable. Fails only if the stored token could not be
    /// removed, in which case the next [AuthStore::check_auth] may still find
    /// it.
    pub async fn logout(&mut self) -> Result<&AuthState, ApiError> {
        if let Err(e) = http::send(self.api.post("/api/auth/logout")).await {
            warn!("Logout request failed: {}", e);
        }

        let cleared = self.storage.clear();
        self.api = self.api.without_token();
        self.state = AuthState {
            user: None,
            is_authenticated: false,
            is_loading: false,
            error: None,
        };

        match cleared {
            Ok(()) => Ok(&self.state),
            Err(e) => {
                let e = ApiError::Storage(e);
                self.state.error = Some(e.message_or("Logout failed"));
                Err(e)
            }
        }
    }

    /// Decide the initial authentication state. Failure of any kind means
    /// "not authenticated" and is never surfaced as an error. A token the
    /// server explicitly rejects is discarded.
    pub async fn check_auth(&mut self) -> &AuthState {
        let res = match self.api.token() {
            Some(_) => http::send_json::<MeResponse>(self.api.get("/api/auth/me")).await,
            None => Err(ApiError::Invalid("no stored token".into())),
        };

        self.state = match res {
            Ok(me) => AuthState {
                user: Some(me.user),
                is_authenticated: true,
                is_loading: false,
                error: None,
            },
            Err(e) => {
                if e.is_unauthorized() {
                    info!("Stored token was rejected, discarding it");
                    if let Err(e) = self.storage.clear() {
                        warn!("Could not discard rejected token: {}", e);
                    }
                    self.api = self.api.without_token();
                }

                AuthState {
                    user: None,
                    is_authenticated: false,
                    is_loading: false,
                    error: None,
                }
            }
        };

        &self.state
    }

    pub fn clear_error(&mut self) {
        self.state.error = None;
    }

    /// The token is persisted before any state changes, so a session which
    /// couldn't be saved never starts. A response without a token replaces
    /// whatever token the previous session left behind.
    fn start_session(&mut self, res: SessionResponse) -> Result<(), ApiError> {
        match res.access_token {
            Some(t) => {
                let token = AccessToken(t);
                self.storage.store(&token).map_err(ApiError::Storage)?;
                self.api = self.api.with_token(token);
            }
            None => {
                self.storage.clear().map_err(ApiError::Storage)?;
                self.api = self.api.without_token();
            }
        }

        self.state = AuthState {
            user: Some(res.user),
            is_authenticated: true,
            is_loading: false,
            error: None,
        };

        Ok(())
    }
}
