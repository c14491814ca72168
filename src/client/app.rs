//! The application state object: the auth store, the lazily loaded pages,
//! and top-level route resolution.

use super::{
    auth::{AuthState, AuthStore},
    error::ApiError,
    guard::{Guard, LOGIN_PATH},
    http::ApiClient,
    token::TokenStorage,
    view::{PostsPage, ViewState},
};

pub const POSTS_PATH: &str = "/posts";

/// What to display for the current path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Spinner,
    Redirect(&'static str),
    Login,
    Posts,
    NotFound,
}

pub struct App<S: TokenStorage> {
    auth: AuthStore<S>,
    posts: ViewState<PostsPage>,
}

impl<S: TokenStorage> App<S> {
    pub fn new(api: ApiClient, storage: S) -> Self {
        App {
            auth: AuthStore::new(api, storage),
            posts: ViewState::NotLoaded,
        }
    }

    pub fn auth(&self) -> &AuthState {
        self.auth.state()
    }

    pub fn api(&self) -> &ApiClient {
        self.auth.api()
    }

    /// Resolve the initial authentication state from any stored token.
    pub async fn start(&mut self) -> &AuthState {
        self.auth.check_auth().await
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<&AuthState, ApiError> {
        self.auth.login(email, password).await
    }

    /// Logging out also drops every page's loaded state.
    pub async fn logout(&mut self) -> Result<&AuthState, ApiError> {
        self.posts = ViewState::NotLoaded;
        self.auth.logout().await
    }

    /// Decide what `path` displays. Navigating to a page which isn't loaded
    /// yet marks it as loading; see [App::load_pending].
    pub fn navigate(&mut self, path: &str) -> Screen {
        let state = self.auth.state();

        match path {
            "/" if state.is_authenticated => Screen::Redirect(POSTS_PATH),
            "/" => Screen::Redirect(LOGIN_PATH),
            LOGIN_PATH => Screen::Login,
            POSTS_PATH => match Guard::from(state) {
                Guard::Spinner => Screen::Spinner,
                Guard::Redirect(to) => Screen::Redirect(to),
                Guard::Render => {
                    self.posts.begin();
                    if self.posts.shows_indicator() {
                        Screen::Spinner
                    } else {
                        Screen::Posts
                    }
                }
            },
            _ => Screen::NotFound,
        }
    }

    /// Resolve any page left loading by [App::navigate].
    pub async fn load_pending(&mut self) {
        if let ViewState::Loading = self.posts {
            let mut page = PostsPage::new();
            page.load(self.auth.api()).await;
            self.posts.resolve(page);
        }
    }

    pub fn posts(&self) -> Option<&PostsPage> {
        self.posts.loaded()
    }

    pub fn posts_mut(&mut self) -> Option<&mut PostsPage> {
        self.posts.loaded_mut()
    }
}
