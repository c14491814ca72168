//! Protect views which require a logged in user.

use super::auth::AuthState;

/// What a protected route should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Authentication state is still being resolved.
    Spinner,
    /// Navigate to the given path instead.
    Redirect(&'static str),
    /// Render the protected view.
    Render,
}

pub const LOGIN_PATH: &str = "/login";

pub fn guard(is_authenticated: bool, is_loading: bool) -> Guard {
    match (is_loading, is_authenticated) {
        (true, _) => Guard::Spinner,
        (false, false) => Guard::Redirect(LOGIN_PATH),
        (false, true) => Guard::Render,
    }
}

impl From<&AuthState> for Guard {
    fn from(s: &AuthState) -> Self {
        guard(s.is_authenticated, s.is_loading)
    }
}
