//! A thin wrapper over [reqwest::Client] for talking to the calendar backend.
//!
//! The bearer token is part of each [ApiClient] value rather than ambient
//! state: logging in produces a new client carrying the token, and every
//! request built from it is authenticated.

use super::error::{ApiError, ErrorBody};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::{fmt, time::Duration};
use url::Url;

/// A newtype wrapper around the backend's access tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);

/// Tokens are never printed in full.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken(..)")
    }
}

/// Convert an access token to a `Bearer` `Authorization` header value.
///
/// ```
/// use almanac::client::http::{to_auth_header_val, AccessToken};
///
/// let token = AccessToken("abc".into());
/// assert_eq!(to_auth_header_val(&token), "Bearer abc");
/// ```
pub fn to_auth_header_val(t: &AccessToken) -> String {
    format!("Bearer {}", t.0)
}

/// Per-instance client configuration. Cloning is cheap; the connection pool
/// is shared between clones.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    token: Option<AccessToken>,
    timeout: Option<Duration>,
}

impl ApiClient {
    pub fn new(base: Url) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base,
            token: None,
            timeout: None,
        }
    }

    /// A copy of this client which authenticates its requests with `token`.
    pub fn with_token(&self, token: AccessToken) -> Self {
        ApiClient {
            token: Some(token),
            ..self.clone()
        }
    }

    /// A copy of this client which sends unauthenticated requests.
    pub fn without_token(&self) -> Self {
        ApiClient {
            token: None,
            ..self.clone()
        }
    }

    /// By default no timeout is applied, so a hung backend hangs the caller.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    /// Create a request to any backend path, handling authentication.
    pub fn request<T: AsRef<str>>(&self, method: Method, path: T) -> RequestBuilder {
        let url = format!(
            "{}{}",
            self.base.as_str().trim_end_matches('/'),
            path.as_ref()
        );

        let mut req = self.http.request(method, url);

        if let Some(t) = &self.token {
            req = req.header(reqwest::header::AUTHORIZATION, to_auth_header_val(t));
        }

        if let Some(d) = self.timeout {
            req = req.timeout(d);
        }

        req
    }

    pub fn get<T: AsRef<str>>(&self, path: T) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub fn post<T: AsRef<str>>(&self, path: T) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    pub fn put<T: AsRef<str>>(&self, path: T) -> RequestBuilder {
        self.request(Method::PUT, path)
    }

    pub fn delete<T: AsRef<str>>(&self, path: T) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }
}

/// Send a request, turning non-success statuses into [ApiError::Server].
pub async fn send(req: RequestBuilder) -> Result<Response, ApiError> {
    let res = req.send().await?;

    if res.status().is_success() {
        return Ok(res);
    }

    let status = res.status();
    // An unparsable error body is not itself an error worth reporting.
    let detail = res
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(ErrorBody::into_detail);

    Err(ApiError::Server { status, detail })
}

/// Send a request and decode a successful JSON response.
pub async fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, ApiError> {
    Ok(send(req).await?.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_bearer_header_only_when_token_present() {
        let mut srv = mockito::Server::new_async().await;

        let anon = srv
            .mock("GET", "/api/posts")
            .match_header("authorization", Matcher::Missing)
            .with_body("[]")
            .create_async()
            .await;

        let authed = srv
            .mock("GET", "/api/posts")
            .match_header("authorization", "Bearer abc")
            .with_body("[]")
            .create_async()
            .await;

        let client = ApiClient::new(Url::parse(&srv.url()).unwrap());
        send(client.get("/api/posts")).await.unwrap();
        send(client.with_token(AccessToken("abc".into())).get("/api/posts"))
            .await
            .unwrap();

        anon.assert_async().await;
        authed.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_detail() {
        let mut srv = mockito::Server::new_async().await;

        let _m = srv
            .mock("DELETE", "/api/posts/9")
            .with_status(404)
            .with_body(r#"{"detail": "Post not found"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(Url::parse(&srv.url()).unwrap());
        let e = send(client.delete("/api/posts/9")).await.unwrap_err();

        match e {
            ApiError::Server { status, detail } => {
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
                assert_eq!(detail.as_deref(), Some("Post not found"));
            }
            e => panic!("unexpected error: {}", e),
        }
    }

    #[tokio::test]
    async fn test_server_error_without_body() {
        let mut srv = mockito::Server::new_async().await;

        let _m = srv
            .mock("GET", "/api/posts")
            .with_status(502)
            .create_async()
            .await;

        let client = ApiClient::new(Url::parse(&srv.url()).unwrap());
        let e = send(client.get("/api/posts")).await.unwrap_err();

        assert_eq!(e.message_or("Failed to fetch posts"), "Failed to fetch posts");
    }

    #[test]
    fn test_token_not_debug_printed() {
        let client = ApiClient::new(Url::parse("http://localhost").unwrap())
            .with_token(AccessToken("secret".into()));
        assert!(!format!("{:?}", client).contains("secret"));
    }
}
