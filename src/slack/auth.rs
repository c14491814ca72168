//! Helpers around Slack's use of OAuth Bearer Authentication for outbound
//! calls, and of a signing secret for inbound requests.
//!
//! Every request Slack sends us carries a timestamp and a signature of the
//! body made with the app's signing secret. We compute our own signature and
//! compare.
//!
//! <https://api.slack.com/authentication/verifying-requests-from-slack>

use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// A newtype wrapper around Slack bot tokens.
#[derive(PartialEq, Eq, Hash, Clone)]
pub struct SlackAccessToken(pub String);

/// Convert a Slack access token to a `Bearer` `Authorization` header value.
///
/// ```
/// use almanac::slack::auth::{to_auth_header_val, SlackAccessToken};
///
/// let token = SlackAccessToken("xoxb-foo".into());
/// assert_eq!(to_auth_header_val(&token), "Bearer xoxb-foo");
/// ```
pub fn to_auth_header_val(t: &SlackAccessToken) -> String {
    format!("Bearer {}", t.0)
}

/// A newtype wrapper around the app's signing secret.
#[derive(Clone)]
pub struct SigningSecret(pub String);

pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";
pub const SIGNATURE_HEADER: &str = "x-slack-signature";

/// Requests older than this are assumed to be replays.
const MAX_AGE_SECS: u64 = 60 * 5;

#[derive(Debug, PartialEq, Eq)]
pub enum SignatureError {
    Missing,
    Stale,
    Invalid,
}

/// Validate the signature headers of a request against its raw body, given
/// the current unix time in seconds.
pub fn validate_request_signature(
    secret: &SigningSecret,
    body: &[u8],
    headers: &HeaderMap,
    now: i64,
) -> Result<(), SignatureError> {
    let header = |name| headers.get(name).and_then(|v| v.to_str().ok());

    let ts = header(TIMESTAMP_HEADER).ok_or(SignatureError::Missing)?;
    let sig = header(SIGNATURE_HEADER).ok_or(SignatureError::Missing)?;

    let ts_secs: i64 = ts.parse().map_err(|_| SignatureError::Invalid)?;
    if now.abs_diff(ts_secs) > MAX_AGE_SECS {
        return Err(SignatureError::Stale);
    }

    if is_valid_signature(secret, ts, body, sig) {
        Ok(())
    } else {
        Err(SignatureError::Invalid)
    }
}

/// Compare a valid signature for a payload against that offered alongside it
/// in a request.
pub fn is_valid_signature(secret: &SigningSecret, ts: &str, body: &[u8], sig: &str) -> bool {
    let Some(hex_sig) = sig.strip_prefix("v0=") else {
        return false;
    };
    let Ok(sig_bytes) = hex::decode(hex_sig) else {
        return false;
    };

    mac(secret, ts, body)
        .map(|m| m.verify_slice(&sig_bytes).is_ok())
        .unwrap_or(false)
}

/// Generate a valid signature with our secret for a payload.
pub fn gen_signature(secret: &SigningSecret, ts: &str, body: &[u8]) -> Option<String> {
    mac(secret, ts, body).map(|m| format!("v0={}", hex::encode(m.finalize().into_bytes())))
}

type HmacSha256 = Hmac<Sha256>;

fn mac(secret: &SigningSecret, ts: &str, body: &[u8]) -> Option<HmacSha256> {
    HmacSha256::new_from_slice(secret.0.as_bytes())
        .map(|mut mac| {
            mac.update(b"v0:");
            mac.update(ts.as_bytes());
            mac.update(b":");
            mac.update(body);
            mac
        })
        .ok()
}
