//! Slack subrouter definition.
//!
//! The following subroute is supported:
//!
//! - POST: `/events`

use super::{
    auth::{validate_request_signature, SignatureError},
    dispatch::{on_event, on_interaction},
    events::{EventPayload, Interaction, InteractionForm},
};
use crate::router::Deps;
use axum::{
    body::Bytes,
    extract::State,
    http::{header::HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use axum_extra::{headers, TypedHeader};
use chrono::Utc;
use serde_json::json;
use tracing::{error, info, warn};

/// Instantiate a new Slack subrouter.
pub fn slack_router() -> Router<Deps> {
    Router::new().route("/events", post(events_handler))
}

/// Handler for the POST subroute `/events`.
///
/// `X-Slack-Request-Timestamp` and `X-Slack-Signature` headers signed with
/// the shared signing secret must be present.
///
/// Accepts Events API payloads in `application/json` format and interaction
/// payloads in `application/x-www-form-urlencoded` format. Valid requests are
/// always acknowledged; failures while handling them are only logged.
async fn events_handler(
    State(deps): State<Deps>,
    TypedHeader(content_type): TypedHeader<headers::ContentType>,
    headers: HeaderMap,
    // We can't parse this at all yet as we need to compare signatures.
    body_bytes: Bytes,
) -> Result<Response, (StatusCode, String)> {
    let secret = deps
        .signing_secret
        .as_ref()
        .ok_or_else(|| (StatusCode::PRECONDITION_FAILED, String::new()))?;

    validate_request_signature(secret, &body_bytes, &headers, Utc::now().timestamp()).map_err(
        |e| {
            let msg = match e {
                SignatureError::Missing => "Missing Slack signature",
                SignatureError::Stale => "Stale Slack request timestamp",
                SignatureError::Invalid => "Invalid Slack signature",
            };
            warn!("{}", msg);

            (StatusCode::UNAUTHORIZED, String::new())
        },
    )?;

    match essence(&content_type).as_str() {
        "application/json" => {
            let payload = serde_json::from_slice::<EventPayload>(&body_bytes)
                .map_err(|e| unprocessable(e.to_string()))?;

            match payload {
                EventPayload::UrlVerification { challenge } => {
                    Ok(Json(json!({ "challenge": challenge })).into_response())
                }
                EventPayload::EventCallback { event } => {
                    if let Err(e) = on_event(&deps, &event).await {
                        error!("Error handling event: {}", e);
                    }
                    Ok(StatusCode::OK.into_response())
                }
                EventPayload::Other => {
                    info!("Ignoring unsupported payload");
                    Ok(StatusCode::OK.into_response())
                }
            }
        }

        "application/x-www-form-urlencoded" => {
            let form = serde_urlencoded::from_bytes::<InteractionForm>(&body_bytes)
                .map_err(|e| unprocessable(e.to_string()))?;
            let interaction = serde_json::from_str::<Interaction>(&form.payload)
                .map_err(|e| unprocessable(e.to_string()))?;

            if let Err(e) = on_interaction(&deps, &interaction).await {
                error!("Error handling interaction: {}", e);
            }

            Ok(StatusCode::OK.into_response())
        }

        _ => Err((
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            String::from(
                "Requests must have `Content-Type: application/json` or `application/x-www-form-urlencoded`",
            ),
        )),
    }
}

/// The media type without any parameters, such as `charset`.
fn essence(ct: &headers::ContentType) -> String {
    ct.to_string()
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn unprocessable(e: String) -> (StatusCode, String) {
    let msg = format!("Failed to deserialize payload: {}", e);
    warn!("{}", msg);

    (StatusCode::UNPROCESSABLE_ENTITY, msg)
}
