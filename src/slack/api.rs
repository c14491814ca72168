//! Type definitions and helpers for the Slack Web API.

use super::{auth::*, error::SlackError};
use serde::{Deserialize, Serialize};

/// The base URL of the Slack API.
pub const API_BASE: &str = "https://slack.com/api";

/// A Slack Web API client bound to a base URL and bot token.
pub struct SlackClient {
    base: String,
    token: SlackAccessToken,
    http: reqwest::Client,
}

impl SlackClient {
    pub fn new(base: String, token: SlackAccessToken) -> Self {
        SlackClient {
            base,
            token,
            http: reqwest::Client::new(),
        }
    }

    /// The underlying client, which holds a connection pool internally as per
    /// [reqwest::Client]. Other outbound requests may share it.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Create a POST request to any Slack API method, handling
    /// authentication.
    pub fn post<T: ToString>(&self, path: T) -> reqwest::RequestBuilder {
        self.http
            .post(self.base.to_owned() + &path.to_string())
            .header(reqwest::header::AUTHORIZATION, to_auth_header_val(&self.token))
    }

    /// Call a Slack API method with a JSON body, caring only whether it
    /// succeeded.
    pub(super) async fn call<B: Serialize>(&self, path: &str, body: &B) -> Result<(), SlackError> {
        let res: APIResult<OkResponse> = self.post(path).json(body).send().await?.json().await?;

        match res {
            APIResult::Ok(_) => Ok(()),
            APIResult::Err(res) => Err(SlackError::APIResponseError(res.error)),
        }
    }
}

/// Slack's API returns a common "untagged" response, representing whether a
/// request was successful.
///
/// ```json
/// {
///     "ok": true,
///     "view": {}
/// }
/// ```
///
/// ```json
/// {
///     "ok": false,
///     "error": "invalid_auth"
/// }
/// ```
#[derive(Deserialize)]
#[serde(untagged)]
pub enum APIResult<T> {
    Ok(T),
    Err(ErrorResponse),
}

/// The universal response in case of an unsuccessful request.
// The `ok` field is checked here, and should be checked on responses too,
// primarily to ensure appropriate deserialization behaviour in case of an
// otherwise empty successful response.
//
// Ideally we'd be able to use `ok` as a tag, rather than defining `APIResult`
// as untagged. See:
//   <https://github.com/serde-rs/serde/issues/745#issuecomment-294314786>
#[derive(Deserialize)]
pub struct ErrorResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_false")]
    ok: bool,
    pub error: String,
}

/// A successful response whose contents we don't need.
#[derive(Deserialize)]
pub struct OkResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_true")]
    ok: bool,
}
