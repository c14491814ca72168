//! Server router definition.
//!
//! The following routes are supported:
//!
//! - GET: `/api/health`
//! - GET: `/api/calendar`
//! - POST: `/slack/events`
//! - GET: anything else, served from the public directory, falling back to
//!   its `index.html`

use crate::{
    calendar::{mock_entries, CalendarEntry},
    slack::{api::SlackClient, auth::SigningSecret, router::slack_router},
};
use axum::{http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use std::{path::PathBuf, sync::Arc};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::{self, TraceLayer},
};
use tracing::Level;

/// Dependencies shared by routes across requests.
#[derive(Clone)]
pub struct Deps {
    pub slack_client: Arc<SlackClient>,
    pub signing_secret: Option<SigningSecret>,
    /// Base URL of the service serving `/api/calendar`.
    pub calendar_base: String,
    pub public_dir: PathBuf,
}

/// Instantiate a new router with tracing.
pub fn new(deps: Deps) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
        .on_response(trace::DefaultOnResponse::new().level(Level::INFO));

    let api = Router::new()
        .route("/calendar", get(calendar_handler))
        .layer(trace_layer.clone())
        // Exclude the health check route from tracing.
        .route("/health", get(|| async { StatusCode::OK }));

    let assets = ServeDir::new(&deps.public_dir)
        .fallback(ServeFile::new(deps.public_dir.join("index.html")));

    Router::new()
        .nest("/api", api)
        .nest("/slack", slack_router().layer(trace_layer))
        .fallback_service(assets)
        .with_state(deps)
}

/// Handler for `GET /api/calendar`. Always the same fixture; see
/// [crate::calendar].
async fn calendar_handler() -> Json<Vec<CalendarEntry>> {
    Json(mock_entries(Utc::now()))
}


#[cfg(test)]
mod tests_slack {
    use super::tests_general::deps;
    use super::*;
    use crate::slack::auth::{gen_signature, SIGNATURE_HEADER, TIMESTAMP_HEADER};
    use axum::{body::Body, http::Request};
    use mockito::Matcher;
    use tower::ServiceExt;

    const SECRET: &str = "shh";

    async fn server() -> mockito::ServerGuard {
        mockito::Server::new_async().await
    }

    async fn plaintext_body(body: Body) -> String {
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn signed(content_type: &str, body: String) -> Request<Body> {
        let ts = Utc::now().timestamp().to_string();
        let sig = gen_signature(&SigningSecret(SECRET.into()), &ts, body.as_bytes()).unwrap();

        Request::builder()
            .method("POST")
            .uri("/slack/events")
            .header("Content-Type", content_type)
            .header(TIMESTAMP_HEADER, ts)
            .header(SIGNATURE_HEADER, sig)
            .body(Body::from(body))
            .unwrap()
    }

    fn interaction(payload: serde_json::Value) -> Request<Body> {
        let form = serde_urlencoded::to_string([("payload", payload.to_string())]).unwrap();
        signed("application/x-www-form-urlencoded", form)
    }

    /// Serve the whole router on a real port, so that the Slack handlers can
    /// fetch the calendar from it.
    async fn spawn(slack_base: String) -> Router {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let mut d = deps(slack_base, Some(SECRET));
        d.calendar_base = format!("http://{}", addr);
        let router = super::new(d);

        let served = router.clone();
        tokio::spawn(async move { axum::serve(listener, served).await });

        router
    }

    #[tokio::test]
    async fn test_missing_secret() {
        let res = super::new(deps("any".to_owned(), None))
            .oneshot(signed("application/json", "{}".into()))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::PRECONDITION_FAILED);
    }

    #[tokio::test]
    async fn test_bad_method() {
        let req = Request::builder()
            .method("GET")
            .uri("/slack/events")
            .body(Body::empty())
            .unwrap();

        let res = super::new(deps("any".to_owned(), Some(SECRET)))
            .oneshot(req)
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_missing_signature() {
        let req = Request::builder()
            .method("POST")
            .uri("/slack/events")
            .header("Content-Type", "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let res = super::new(deps("any".to_owned(), Some(SECRET)))
            .oneshot(req)
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(plaintext_body(res.into_body()).await.is_empty());
    }

    #[tokio::test]
    async fn test_tampered_body() {
        let body = r#"{"type": "url_verification", "challenge": "a"}"#;
        let mut req = signed("application/json", body.into());
        *req.body_mut() = Body::from(r#"{"type": "url_verification", "challenge": "b"}"#);

        let res = super::new(deps("any".to_owned(), Some(SECRET)))
            .oneshot(req)
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bad_content_type() {
        let res = super::new(deps("any".to_owned(), Some(SECRET)))
            .oneshot(signed("application/xml", "<x/>".into()))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_bad_payload() {
        let res = super::new(deps("any".to_owned(), Some(SECRET)))
            .oneshot(signed("application/json", "not json".into()))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(plaintext_body(res.into_body())
            .await
            .starts_with("Failed to deserialize payload:"));
    }

    #[tokio::test]
    async fn test_url_verification() {
        let body = r#"{"token": "t", "challenge": "3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P", "type": "url_verification"}"#;

        let res = super::new(deps("any".to_owned(), Some(SECRET)))
            .oneshot(signed("application/json; charset=utf-8", body.into()))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&plaintext_body(res.into_body()).await)
                .unwrap(),
            serde_json::json!({"challenge": "3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P"})
        );
    }

    #[tokio::test]
    async fn test_app_home_opened_publishes_calendar() {
        let mut srv = server().await;

        let publish_mock = srv
            .mock("POST", "/views.publish")
            .match_header("authorization", "Bearer xoxb-test")
            .match_body(Matcher::AllOf(vec![
                Matcher::PartialJson(serde_json::json!({
                    "user_id": "U1",
                    "view": {"type": "home", "callback_id": "home_view"}
                })),
                Matcher::Regex("Check out our latest product update!".into()),
                Matcher::Regex("We are hiring! Join our amazing team.".into()),
                Matcher::Regex("add_new_post".into()),
            ]))
            .with_body(r#"{"ok": true, "view": {}}"#)
            .create_async()
            .await;

        let body = r#"{"type": "event_callback", "event": {"type": "app_home_opened", "user": "U1", "tab": "home"}}"#;
        let res = spawn(srv.url())
            .await
            .oneshot(signed("application/json", body.into()))
            .await
            .unwrap();

        publish_mock.assert_async().await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_slack_failure_is_only_logged() {
        let mut srv = server().await;

        let publish_mock = srv
            .mock("POST", "/views.publish")
            .with_body(r#"{"ok": false, "error": "invalid_auth"}"#)
            .create_async()
            .await;

        let body = r#"{"type": "event_callback", "event": {"type": "app_home_opened", "user": "U1"}}"#;
        let res = spawn(srv.url())
            .await
            .oneshot(signed("application/json", body.into()))
            .await
            .unwrap();

        publish_mock.assert_async().await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(plaintext_body(res.into_body()).await.is_empty());
    }

    #[tokio::test]
    async fn test_app_mention_greets() {
        let mut srv = server().await;

        let msg_mock = srv
            .mock("POST", "/chat.postMessage")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "channel": "C1",
                "text": "Hello <@U2>! I'm your Social Media Content Calendar bot."
            })))
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;

        let body = r#"{"type": "event_callback", "event": {"type": "app_mention", "user": "U2", "channel": "C1", "text": "<@B1> hi"}}"#;
        let res = super::new(deps(srv.url(), Some(SECRET)))
            .oneshot(signed("application/json", body.into()))
            .await
            .unwrap();

        msg_mock.assert_async().await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_add_new_post_opens_modal() {
        let mut srv = server().await;

        let open_mock = srv
            .mock("POST", "/views.open")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "trigger_id": "T123",
                "view": {"type": "modal", "callback_id": "new_post_modal"}
            })))
            .with_body(r#"{"ok": true, "view": {}}"#)
            .create_async()
            .await;

        let res = super::new(deps(srv.url(), Some(SECRET)))
            .oneshot(interaction(serde_json::json!({
                "type": "block_actions",
                "trigger_id": "T123",
                "user": {"id": "U1"},
                "actions": [{"action_id": "add_new_post", "type": "button"}]
            })))
            .await
            .unwrap();

        open_mock.assert_async().await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_submission_confirms_and_home_still_shows_fixture() {
        let mut srv = server().await;

        let msg_mock = srv
            .mock("POST", "/chat.postMessage")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "channel": "U1",
                "text": "✅ New post scheduled on *LinkedIn*: Brand new post"
            })))
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;

        let leaked_mock = srv
            .mock("POST", "/views.publish")
            .match_body(Matcher::Regex("Brand new post".into()))
            .expect(0)
            .create_async()
            .await;

        let publish_mock = srv
            .mock("POST", "/views.publish")
            .match_body(Matcher::AllOf(vec![
                Matcher::PartialJson(serde_json::json!({"user_id": "U1"})),
                Matcher::Regex("Check out our latest product update!".into()),
                Matcher::Regex("We are hiring! Join our amazing team.".into()),
            ]))
            .with_body(r#"{"ok": true, "view": {}}"#)
            .expect(2)
            .create_async()
            .await;

        let router = spawn(srv.url()).await;

        let res = router
            .clone()
            .oneshot(interaction(serde_json::json!({
                "type": "view_submission",
                "user": {"id": "U1"},
                "view": {
                    "callback_id": "new_post_modal",
                    "state": {"values": {
                        "content_block": {"content_input": {"type": "plain_text_input", "value": "Brand new post"}},
                        "platform_block": {"platform_select": {
                            "type": "static_select",
                            "selected_option": {"text": {"type": "plain_text", "text": "LinkedIn"}, "value": "LinkedIn"}
                        }}
                    }}
                }
            })))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body = r#"{"type": "event_callback", "event": {"type": "app_home_opened", "user": "U1"}}"#;
        let res = router
            .oneshot(signed("application/json", body.into()))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        msg_mock.assert_async().await;
        publish_mock.assert_async().await;
        leaked_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_incomplete_submission_is_acknowledged() {
        let mut srv = server().await;

        let msg_mock = srv
            .mock("POST", "/chat.postMessage")
            .expect(0)
            .create_async()
            .await;

        let res = super::new(deps(srv.url(), Some(SECRET)))
            .oneshot(interaction(serde_json::json!({
                "type": "view_submission",
                "user": {"id": "U1"},
                "view": {"callback_id": "new_post_modal", "state": {"values": {}}}
            })))
            .await
            .unwrap();

        msg_mock.assert_async().await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
